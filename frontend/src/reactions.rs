//! Reaction counters with optimistic updates.
//!
//! The backend answers with `emoji -> [uid]`; the view only shows counts.
//! A click bumps the count locally at once, then the server answer either
//! replaces the counts or the bump is undone.

use desync_shared::ReactionMap;
use std::collections::BTreeMap;

/// Emojis offered under every thread and post.
pub const REACTION_EMOJIS: [&str; 4] = ["👍", "❤️", "😂", "🔥"];

pub type ReactionCounts = BTreeMap<String, usize>;

pub fn counts(map: &ReactionMap) -> ReactionCounts {
    map.iter()
        .map(|(emoji, users)| (emoji.clone(), users.len()))
        .collect()
}

/// Counts per target id (thread or post).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionBoard {
    current: BTreeMap<u64, ReactionCounts>,
    snapshots: BTreeMap<u64, ReactionCounts>,
}

impl ReactionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, target: u64, emoji: &str) -> usize {
        self.current
            .get(&target)
            .and_then(|c| c.get(emoji))
            .copied()
            .unwrap_or(0)
    }

    /// Stores the server's view for `target`.
    pub fn load(&mut self, target: u64, map: &ReactionMap) {
        self.current.insert(target, counts(map));
    }

    /// Bumps `emoji` on `target` before the server has answered.
    pub fn begin(&mut self, target: u64, emoji: &str) {
        let entry = self.current.entry(target).or_default();
        self.snapshots.entry(target).or_insert_with(|| entry.clone());
        *entry.entry(emoji.to_string()).or_insert(0) += 1;
    }

    /// Replaces the optimistic counts with the server's answer.
    pub fn reconcile(&mut self, target: u64, map: &ReactionMap) {
        self.snapshots.remove(&target);
        self.load(target, map);
    }

    /// Restores the counts from before the pending bump.
    pub fn rollback(&mut self, target: u64) {
        if let Some(previous) = self.snapshots.remove(&target) {
            self.current.insert(target, previous);
        }
    }

    pub fn is_pending(&self, target: u64) -> bool {
        self.snapshots.contains_key(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &[u64])]) -> ReactionMap {
        entries
            .iter()
            .map(|(emoji, users)| (emoji.to_string(), users.to_vec()))
            .collect()
    }

    #[test]
    fn test_counts_are_user_list_lengths() {
        let c = counts(&map(&[("👍", &[1, 2, 3]), ("🔥", &[])]));
        assert_eq!(c["👍"], 3);
        assert_eq!(c["🔥"], 0);
    }

    #[test]
    fn test_optimistic_bump_then_reconcile() {
        let mut board = ReactionBoard::new();
        board.load(5, &map(&[("👍", &[1])]));

        board.begin(5, "👍");
        assert_eq!(board.count(5, "👍"), 2);
        assert!(board.is_pending(5));

        // Server says the click toggled an existing reaction off.
        board.reconcile(5, &map(&[("👍", &[])]));
        assert_eq!(board.count(5, "👍"), 0);
        assert!(!board.is_pending(5));
    }

    #[test]
    fn test_rollback_restores_previous_counts() {
        let mut board = ReactionBoard::new();
        board.load(5, &map(&[("❤️", &[4])]));

        board.begin(5, "❤️");
        board.begin(5, "😂");
        board.rollback(5);

        assert_eq!(board.count(5, "❤️"), 1);
        assert_eq!(board.count(5, "😂"), 0);
    }

    #[test]
    fn test_unknown_targets_count_zero() {
        let mut board = ReactionBoard::new();
        assert_eq!(board.count(1, "👍"), 0);
        board.begin(1, "👍");
        board.rollback(1);
        assert_eq!(board.count(1, "👍"), 0);
    }
}
