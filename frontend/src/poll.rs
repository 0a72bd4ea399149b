//! Sequence-guarded polling.
//!
//! Every fetch takes a ticket from a [`RequestSequence`]. A result is handed
//! on only if its ticket is still the newest one issued and the sequence was
//! not cancelled, so a slow old response can never overwrite a newer one.

use crate::web::Interval;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct SequenceState {
    latest: Cell<u64>,
    cancelled: Cell<bool>,
}

/// Monotonic ticket counter; clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    state: Rc<SequenceState>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        let next = self.state.latest.get() + 1;
        self.state.latest.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        !self.state.cancelled.get() && ticket.0 == self.state.latest.get()
    }

    /// Invalidates every ticket, issued or future.
    pub fn cancel(&self) {
        self.state.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    /// Issues a ticket now and resolves to `fut`'s output only if that ticket
    /// is still current when `fut` completes.
    pub fn guarded<F: Future>(&self, fut: F) -> impl Future<Output = Option<F::Output>> + use<F> {
        let ticket = self.issue();
        let sequence = self.clone();
        async move {
            let output = fut.await;
            if sequence.is_current(ticket) {
                Some(output)
            } else {
                tracing::debug!(ticket = ticket.0, "dropping stale poll response");
                None
            }
        }
    }
}

/// Runs `fut` under a fresh ticket and passes its output to `apply` only if
/// the ticket is still current when it lands.
pub fn apply_latest<Fut, T>(
    sequence: &RequestSequence,
    fut: Fut,
    apply: Rc<dyn Fn(T)>,
) -> impl Future<Output = ()> + use<Fut, T>
where
    Fut: Future<Output = T>,
{
    let guarded = sequence.guarded(fut);
    async move {
        if let Some(value) = guarded.await {
            apply(value);
        }
    }
}

/// Periodic fetch loop bound to the browser timer.
///
/// Fetches once immediately, then every `period`. Dropping or cancelling it
/// clears the interval and discards responses still in flight.
pub struct Poller {
    sequence: RequestSequence,
    tick: Rc<dyn Fn()>,
    interval: Option<Interval>,
}

impl Poller {
    pub fn start<F, Fut, T>(period: Duration, fetch: F, apply: impl Fn(T) + 'static) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = T> + 'static,
        T: 'static,
    {
        let sequence = RequestSequence::new();
        let apply: Rc<dyn Fn(T)> = Rc::new(apply);

        let tick: Rc<dyn Fn()> = {
            let sequence = sequence.clone();
            Rc::new(move || {
                if sequence.is_cancelled() {
                    return;
                }
                leptos::task::spawn_local(apply_latest(&sequence, fetch(), Rc::clone(&apply)));
            })
        };

        tick();
        let timer_tick = Rc::clone(&tick);
        let interval = match Interval::new(period, move || timer_tick()) {
            Ok(interval) => Some(interval),
            Err(e) => {
                tracing::error!(error = ?e, "failed to start poll timer");
                None
            }
        };

        Self {
            sequence,
            tick,
            interval,
        }
    }

    /// Fetches right away, outside the timer. Shares the tick sequence, so a
    /// newer tick still wins over a slow refresh.
    pub fn refresh(&self) {
        (self.tick)();
    }

    pub fn cancel(&mut self) {
        self.sequence.cancel();
        self.interval.take();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_reordered_older_response_is_discarded() {
        let sequence = RequestSequence::new();
        let shown = RefCell::new(None);
        let (tx_old, rx_old) = oneshot::channel();
        let (tx_new, rx_new) = oneshot::channel();

        let older = sequence.guarded(rx_old);
        let newer = sequence.guarded(rx_new);

        // The newer response lands first.
        tx_new.send("tick 2").unwrap();
        if let Some(Ok(v)) = newer.await {
            *shown.borrow_mut() = Some(v);
        }
        tx_old.send("tick 1").unwrap();
        if let Some(Ok(v)) = older.await {
            *shown.borrow_mut() = Some(v);
        }

        assert_eq!(*shown.borrow(), Some("tick 2"));
    }

    #[tokio::test]
    async fn test_response_after_newer_issue_is_discarded() {
        let sequence = RequestSequence::new();
        let first = sequence.guarded(async { 1 });
        let _second = sequence.issue();

        assert_eq!(first.await, None);
    }

    #[tokio::test]
    async fn test_in_order_responses_are_applied() {
        let sequence = RequestSequence::new();
        assert_eq!(sequence.guarded(async { 1 }).await, Some(1));
        assert_eq!(sequence.guarded(async { 2 }).await, Some(2));
    }

    #[tokio::test]
    async fn test_cancel_invalidates_in_flight_tickets() {
        let sequence = RequestSequence::new();
        let (tx, rx) = oneshot::channel::<u8>();
        let pending = sequence.guarded(rx);

        sequence.cancel();
        tx.send(7).unwrap();

        assert_eq!(pending.await, None);
        assert_eq!(sequence.guarded(async { 8 }).await, None);
    }

    #[tokio::test]
    async fn test_refresh_overtaken_by_newer_tick_is_discarded() {
        let sequence = RequestSequence::new();
        let shown = Rc::new(RefCell::new(Vec::<&str>::new()));
        let apply: Rc<dyn Fn(Vec<&'static str>)> = {
            let shown = Rc::clone(&shown);
            Rc::new(move |list| *shown.borrow_mut() = list)
        };
        let (tx_refresh, rx_refresh) = oneshot::channel();
        let (tx_tick, rx_tick) = oneshot::channel();

        // Refresh after a sent message, then a timer tick while it is in flight.
        let refresh = apply_latest(&sequence, async move { rx_refresh.await.unwrap() }, Rc::clone(&apply));
        let tick = apply_latest(&sequence, async move { rx_tick.await.unwrap() }, Rc::clone(&apply));

        tx_tick.send(vec!["a", "b", "c"]).unwrap();
        tick.await;
        tx_refresh.send(vec!["a", "b"]).unwrap();
        refresh.await;

        assert_eq!(*shown.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tickets_are_monotonic_across_clones() {
        let sequence = RequestSequence::new();
        let clone = sequence.clone();
        let a = sequence.issue();
        let b = clone.issue();
        assert!(b > a);
        assert!(!sequence.is_current(a));
        assert!(sequence.is_current(b));
    }
}
