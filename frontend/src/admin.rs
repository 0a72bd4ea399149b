//! Admin panel logic: tabs, event list, invite wave, code expiry.

use crate::api::DesyncApi;
use crate::gateway::{RequestError, TokenStore, Transport};
use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use desync_shared::date::{add_months, expiry_from_picker};
use desync_shared::{AdminEvent, EventKind, Identity, ItemKind, Report, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Overview,
    Users,
    Activity,
    Banned,
    Reports,
    Events,
}

impl AdminTab {
    pub const ALL: [AdminTab; 6] = [
        AdminTab::Overview,
        AdminTab::Users,
        AdminTab::Activity,
        AdminTab::Banned,
        AdminTab::Reports,
        AdminTab::Events,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AdminTab::Overview => "📊 Overview",
            AdminTab::Users => "👥 Users",
            AdminTab::Activity => "📈 Activity",
            AdminTab::Banned => "🚫 Banned",
            AdminTab::Reports => "🚩 Reports",
            AdminTab::Events => "🎉 Events",
        }
    }
}

/// Number of recent members listed on the activity tab.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;
/// Reviewed reports shown under the pending queue.
pub const REVIEWED_REPORTS_LIMIT: usize = 10;

pub fn banned_users(users: &[Identity]) -> Vec<Identity> {
    users.iter().filter(|u| u.banned).cloned().collect()
}

/// Pending reports first, then the others.
pub fn split_reports(reports: &[Report]) -> (Vec<Report>, Vec<Report>) {
    reports.iter().cloned().partition(|r| r.status == "pending")
}

/// Events to list; the invite wave entry is shown even when the backend has none.
pub fn events_or_fallback(
    loaded: Result<Vec<AdminEvent>, RequestError>,
    now: DateTime<Utc>,
) -> Vec<AdminEvent> {
    match loaded {
        Ok(events) if !events.is_empty() => events,
        Ok(_) => vec![invite_wave_event(now)],
        Err(e) => {
            tracing::warn!(error = %e, "failed to load events");
            vec![invite_wave_event(now)]
        }
    }
}

fn invite_wave_event(now: DateTime<Utc>) -> AdminEvent {
    AdminEvent {
        id: 1,
        name: "Invite Wave".to_string(),
        description: "Give all users an invite that lasts 2 months".to_string(),
        kind: EventKind::InviteWave,
        is_active: true,
        created_at: Timestamp::from_datetime(now),
        executed_at: None,
    }
}

/// Newest members first, by join date.
pub fn recent_members(users: &[Identity]) -> Vec<Identity> {
    let mut recent = users.to_vec();
    recent.sort_by(|a, b| b.join_date.parse().cmp(&a.join_date.parse()));
    recent.truncate(RECENT_ACTIVITY_LIMIT);
    recent
}

/// Stamps the first event of `kind` as executed at `now`.
pub fn mark_executed(events: &mut [AdminEvent], kind: EventKind, now: DateTime<Utc>) {
    if let Some(event) = events.iter_mut().find(|e| e.kind == kind) {
        event.executed_at = Some(Timestamp::from_datetime(now));
    }
}

/// Executed events, most recent first.
pub fn execution_history(events: &[AdminEvent]) -> Vec<AdminEvent> {
    let mut done: Vec<AdminEvent> = events
        .iter()
        .filter(|e| e.executed_at.is_some())
        .cloned()
        .collect();
    done.sort_by(|a, b| {
        let at = |e: &AdminEvent| e.executed_at.as_ref().and_then(Timestamp::parse);
        at(b).cmp(&at(a))
    });
    done
}

/// Moderator verdict on a pending report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportDecision {
    RemoveContent,
    Dismiss,
}

impl ReportDecision {
    pub fn status(self) -> &'static str {
        match self {
            ReportDecision::RemoveContent => "resolved",
            ReportDecision::Dismiss => "dismissed",
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            ReportDecision::RemoveContent => "Content removed",
            ReportDecision::Dismiss => "No action needed",
        }
    }
}

/// Expiry of a generated invitation code from the date and time pickers.
pub fn code_expiry(date: &str, time: &str) -> Result<Timestamp, ValidationError> {
    if date.trim().is_empty() {
        return Err(ValidationError::ExpiryRequired);
    }
    expiry_from_picker(date, time).ok_or(ValidationError::ExpiryRequired)
}

// =========================================================
// Invite wave
// =========================================================

pub const INVITE_VALIDITY_MONTHS: u32 = 2;
const INVITE_ITEM_NAME: &str = "Invitation";
const INVITE_ITEM_DESCRIPTION: &str = "Invite a friend to Desync. Valid for 2 months.";

/// Invites per member; stays within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InviteAmount(u8);

impl InviteAmount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self((self.0 + 1).min(Self::MAX))
    }

    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN))
    }
}

impl Default for InviteAmount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InviteWaveReport {
    pub recipients: usize,
    pub granted: usize,
    pub failed: usize,
}

impl InviteWaveReport {
    pub fn summary(&self, amount: InviteAmount) -> String {
        let plural = |count: usize| if count == 1 { "" } else { "s" };
        if self.failed == 0 {
            let n = amount.get();
            format!(
                "Successfully sent {n} invite{} to {} users!",
                plural(usize::from(n)),
                self.recipients
            )
        } else {
            format!(
                "Sent {} invite{}; {} failed. Please try again.",
                self.granted,
                plural(self.granted),
                self.failed
            )
        }
    }
}

/// Grants `amount` invite items to every member who is not banned.
///
/// Failures are counted, not fatal: one rejected grant does not stop the wave.
pub async fn run_invite_wave<T: Transport, S: TokenStore>(
    api: &DesyncApi<T, S>,
    users: &[Identity],
    amount: InviteAmount,
    now: DateTime<Utc>,
) -> InviteWaveReport {
    let expires_at = Timestamp::from_datetime(add_months(now, INVITE_VALIDITY_MONTHS));
    let mut report = InviteWaveReport::default();

    for user in users.iter().filter(|u| !u.banned) {
        report.recipients += 1;
        for _ in 0..amount.get() {
            let result = api
                .add_inventory_item(
                    user.uid,
                    ItemKind::Invite,
                    INVITE_ITEM_NAME,
                    INVITE_ITEM_DESCRIPTION,
                    Some(expires_at.clone()),
                )
                .await;
            match result {
                Ok(()) => report.granted += 1,
                Err(e) => {
                    tracing::warn!(uid = user.uid, error = %e, "invite grant failed");
                    report.failed += 1;
                }
            }
        }
    }

    tracing::info!(
        recipients = report.recipients,
        granted = report.granted,
        failed = report.failed,
        "invite wave finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{Gateway, MemoryTokenStore, MockTransport};
    use chrono::TimeZone;
    use desync_shared::protocol::HttpMethod;
    use serde_json::{Value, json};

    const BASE: &str = "http://api.test/api";

    fn member(uid: u64, banned: bool) -> Identity {
        serde_json::from_value(json!({
            "uid": uid, "email": "m@gmail.com", "username": format!("m{uid}"), "banned": banned
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_invite_wave_skips_banned_and_counts_failures() {
        let transport = MockTransport::new();
        let ok = json!({"success": true});
        transport.respond(HttpMethod::Post, &format!("{BASE}/admin/users/1/inventory"), 200, ok.clone());
        transport.respond(HttpMethod::Post, &format!("{BASE}/admin/users/3/inventory"), 500, json!({"message": "boom"}));
        let api = DesyncApi::new(Gateway::new(BASE, transport.clone(), MemoryTokenStore::with_token("t")));
        let users = [member(1, false), member(2, true), member(3, false)];
        let now = Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap();

        let report = run_invite_wave(&api, &users, InviteAmount::default().increment(), now).await;

        assert_eq!(
            report,
            InviteWaveReport {
                recipients: 2,
                granted: 2,
                failed: 2
            }
        );
        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 4);
        assert!(requests.iter().all(|r| !r.url.contains("/users/2/")));

        let body: Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["itemType"], "invite");
        assert_eq!(body["expiresAt"], "2025-03-31T12:00:00.000Z");
    }

    #[test]
    fn test_invite_amount_is_clamped() {
        let mut amount = InviteAmount::default();
        amount = amount.decrement();
        assert_eq!(amount.get(), 1);
        for _ in 0..20 {
            amount = amount.increment();
        }
        assert_eq!(amount.get(), InviteAmount::MAX);
    }

    #[test]
    fn test_events_fall_back_to_invite_wave() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let empty = events_or_fallback(Ok(vec![]), now);
        let failed = events_or_fallback(Err(RequestError::Rejected("nope".into())), now);

        for events in [empty, failed] {
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].name, "Invite Wave");
            assert_eq!(events[0].kind, EventKind::InviteWave);
            assert!(events[0].is_active);
        }
    }

    #[test]
    fn test_code_expiry_requires_date() {
        assert_eq!(code_expiry("", "23:59"), Err(ValidationError::ExpiryRequired));
        assert_eq!(
            code_expiry("2025-01-31", "23:59").unwrap().as_str(),
            "2025-01-31T23:59:00.000Z"
        );
    }

    #[test]
    fn test_report_split_and_banned_filter() {
        let reports: Vec<Report> = serde_json::from_value(json!([
            {"id": 1, "type": "post", "targetId": 4, "reason": "Spam", "status": "pending"},
            {"id": 2, "type": "thread", "targetId": 5, "reason": "Other", "status": "resolved"}
        ]))
        .unwrap();
        let (pending, reviewed) = split_reports(&reports);
        assert_eq!(pending[0].id, 1);
        assert_eq!(reviewed[0].id, 2);

        let users = [member(1, false), member(2, true)];
        assert_eq!(banned_users(&users).len(), 1);
    }

    #[test]
    fn test_recent_members_newest_first() {
        let users: Vec<Identity> = serde_json::from_value(json!([
            {"uid": 1, "email": "a@gmail.com", "username": "a", "joinDate": "2024-01-01T00:00:00Z"},
            {"uid": 2, "email": "b@gmail.com", "username": "b", "joinDate": "2024-03-01T00:00:00Z"},
            {"uid": 3, "email": "c@gmail.com", "username": "c", "joinDate": "2024-02-01T00:00:00Z"}
        ]))
        .unwrap();
        let order: Vec<u64> = recent_members(&users).iter().map(|u| u.uid).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_execution_history_after_wave() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut events = events_or_fallback(Ok(vec![]), now);
        assert!(execution_history(&events).is_empty());

        mark_executed(&mut events, EventKind::InviteWave, now);
        let history = execution_history(&events);
        assert_eq!(history.len(), 1);
        assert_eq!(
            history[0].executed_at.as_ref().map(Timestamp::as_str),
            Some("2025-06-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_report_decisions() {
        assert_eq!(ReportDecision::RemoveContent.status(), "resolved");
        assert_eq!(ReportDecision::RemoveContent.action(), "Content removed");
        assert_eq!(ReportDecision::Dismiss.status(), "dismissed");
        assert_eq!(ReportDecision::Dismiss.action(), "No action needed");
    }

    #[test]
    fn test_summary_wording() {
        let ok = InviteWaveReport { recipients: 3, granted: 3, failed: 0 };
        assert_eq!(ok.summary(InviteAmount::default()), "Successfully sent 1 invite to 3 users!");
        let partial = InviteWaveReport { recipients: 3, granted: 4, failed: 2 };
        assert_eq!(
            partial.summary(InviteAmount::default().increment()),
            "Sent 4 invites; 2 failed. Please try again."
        );
    }

    #[test]
    fn test_partial_summary_counts_granted_invites() {
        let one = InviteWaveReport { recipients: 1, granted: 1, failed: 1 };
        assert_eq!(
            one.summary(InviteAmount::default().increment()),
            "Sent 1 invite; 1 failed. Please try again."
        );
        let none = InviteWaveReport { recipients: 1, granted: 0, failed: 2 };
        assert_eq!(
            none.summary(InviteAmount::default().increment()),
            "Sent 0 invites; 2 failed. Please try again."
        );
    }
}
