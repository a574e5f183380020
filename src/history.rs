//! Node click history with recency/frequency weighting.
//!
//! Each click history is an ordered list, most recent last. An entry's weight is
//! `k^n * degree_opacity * aging * click_boost`, normalised into `[0.1, 1.0]`,
//! where `n` is its position counted from the oldest entry.
//!
//! Histories are kept per session in a [`HistoryStore`], an explicit handle
//! that callers own and share; there is no process-wide history.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Maximum number of distinct nodes remembered.
pub const MAX_HISTORY_SIZE: usize = 50;
/// Base of the positional `k^n` term.
const BASE_K: f64 = 1.2;
/// Minutes after which the aging factor halves.
const AGING_HALF_LIFE_MINUTES: f64 = 30.0;
const MIN_WEIGHT: f64 = 0.1;
const MIN_AGING_FACTOR: f64 = 0.1;

/// Whether the entry was created or updated by its latest click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Added,
    Modified,
}

/// One remembered node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickRecord {
    pub node_id: String,
    pub node_name: String,
    pub change_type: ChangeType,
    /// Seconds since UNIX epoch of the latest click.
    pub clicked_at: u64,
    /// Normalised weight in `[0.1, 1.0]`.
    pub weight: f64,
    /// 1-based position in the history.
    pub click_order: usize,
    pub degree_opacity: f64,
    pub click_count: u32,
    pub aging_factor: f64,
}

/// Aggregate view of a history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickStatistics {
    pub unique_nodes: usize,
    pub total_clicks: u64,
    pub average_weight: f64,
}

/// Ordered click history of one session.
#[derive(Debug, Clone, Default)]
pub struct ClickHistory {
    entries: Vec<ClickRecord>,
}

impl ClickHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a click on `node_id` at `now` (seconds since UNIX epoch).
    ///
    /// A repeat click moves the node to the most recent position.
    pub fn record_click(
        &mut self,
        node_id: &str,
        node_name: &str,
        degree_opacity: f64,
        now: u64,
    ) {
        if let Some(pos) = self.entries.iter().position(|e| e.node_id == node_id) {
            let mut entry = self.entries.remove(pos);
            entry.click_count += 1;
            entry.clicked_at = now;
            entry.change_type = ChangeType::Modified;
            self.entries.push(entry);
        } else {
            let click_order = self.entries.len() + 1;
            self.entries.push(ClickRecord {
                node_id: node_id.to_string(),
                node_name: node_name.to_string(),
                change_type: ChangeType::Added,
                clicked_at: now,
                weight: 0.0,
                click_order,
                degree_opacity,
                click_count: 1,
                aging_factor: 1.0,
            });
        }

        if self.entries.len() > MAX_HISTORY_SIZE {
            self.entries.remove(0);
            for (i, entry) in self.entries.iter_mut().enumerate() {
                entry.click_order = i + 1;
            }
        }
        self.recalculate(now);
    }

    /// Entries, oldest first, with weights recomputed for `now`.
    pub fn entries(&mut self, now: u64) -> Vec<ClickRecord> {
        self.recalculate(now);
        self.entries.clone()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn statistics(&self) -> ClickStatistics {
        let total_clicks = self.entries.iter().map(|e| u64::from(e.click_count)).sum();
        let average_weight = if self.entries.is_empty() {
            0.0
        } else {
            self.entries.iter().map(|e| e.weight).sum::<f64>() / self.entries.len() as f64
        };
        ClickStatistics {
            unique_nodes: self.entries.len(),
            total_clicks,
            average_weight,
        }
    }

    fn recalculate(&mut self, now: u64) {
        let total = self.entries.len();
        let max_weight = BASE_K.powi(total as i32) * 1.5;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            let position_from_end = (total - i) as i32;
            let aging = aging_factor(entry.clicked_at, now);
            let click_boost = 1.0 + 0.1 * f64::from(entry.click_count.saturating_sub(1).min(5));
            let raw = BASE_K.powi(position_from_end) * entry.degree_opacity * aging * click_boost;

            let normalized = MIN_WEIGHT + (1.0 - MIN_WEIGHT) * (raw / max_weight).min(1.0);
            entry.weight = normalized.clamp(MIN_WEIGHT, 1.0);
            entry.aging_factor = aging;
        }
    }
}

/// `exp(-λt)` with `λ = ln 2 / half-life`, over whole elapsed minutes, floored at 0.1.
fn aging_factor(clicked_at: u64, now: u64) -> f64 {
    let minutes = (now.saturating_sub(clicked_at) / 60) as f64;
    let lambda = std::f64::consts::LN_2 / AGING_HALF_LIFE_MINUTES;
    (-lambda * minutes).exp().max(MIN_AGING_FACTOR)
}

/// Current time in seconds since UNIX epoch.
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Default upper bound on concurrently remembered sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

#[derive(Debug, Default)]
struct Session {
    history: ClickHistory,
    last_touched: u64,
}

/// Click histories keyed by session id.
///
/// Opening a session beyond `max_sessions` evicts the one touched least
/// recently. Concurrent first clicks on new sessions may overshoot the bound
/// until the next insert.
#[derive(Debug)]
pub struct HistoryStore {
    sessions: DashMap<String, Session>,
    max_sessions: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::with_max_sessions(DEFAULT_MAX_SESSIONS)
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store bounded to `max_sessions` sessions (at least one).
    pub fn with_max_sessions(max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    pub fn record_click(
        &self,
        session: &str,
        node_id: &str,
        node_name: &str,
        degree_opacity: f64,
        now: u64,
    ) {
        if !self.sessions.contains_key(session) {
            self.evict_for_insert();
        }
        let mut entry = self.sessions.entry(session.to_string()).or_default();
        entry.last_touched = now;
        entry
            .history
            .record_click(node_id, node_name, degree_opacity, now);
    }

    /// Entries of `session`; empty for unknown sessions.
    pub fn entries(&self, session: &str, now: u64) -> Vec<ClickRecord> {
        self.sessions
            .get_mut(session)
            .map(|mut s| {
                s.last_touched = now;
                s.history.entries(now)
            })
            .unwrap_or_default()
    }

    pub fn statistics(&self, session: &str) -> ClickStatistics {
        self.sessions
            .get(session)
            .map(|s| s.history.statistics())
            .unwrap_or_else(|| ClickHistory::new().statistics())
    }

    /// Drop a session's history. Returns whether it existed.
    pub fn clear(&self, session: &str) -> bool {
        self.sessions.remove(session).is_some()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn evict_for_insert(&self) {
        while self.sessions.len() >= self.max_sessions {
            // Ties on timestamp fall back to the session id so eviction is deterministic.
            let oldest = self
                .sessions
                .iter()
                .map(|s| (s.last_touched, s.key().clone()))
                .min();
            let Some((last_touched, key)) = oldest else {
                break;
            };
            self.sessions.remove(&key);
            tracing::debug!(session = %key, last_touched, "evicted idle click-history session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000;

    #[test]
    fn new_clicks_append_in_order() {
        let mut h = ClickHistory::new();
        h.record_click("a", "A", 1.0, T0);
        h.record_click("b", "B", 1.0, T0);

        assert_eq!(h.len(), 2);
        let entries = h.entries(T0);
        assert_eq!(entries[0].click_order, 1);
        assert_eq!(entries[1].click_order, 2);
        assert_eq!(entries[1].change_type, ChangeType::Added);
    }

    #[test]
    fn repeat_click_moves_node_to_end() {
        let mut h = ClickHistory::new();
        h.record_click("a", "A", 1.0, T0);
        h.record_click("b", "B", 1.0, T0);
        h.record_click("a", "A", 1.0, T0 + 10);

        let entries = h.entries(T0 + 10);
        assert_eq!(entries[1].node_id, "a");
        assert_eq!(entries[1].click_count, 2);
        assert_eq!(entries[1].change_type, ChangeType::Modified);
        assert_eq!(entries[1].clicked_at, T0 + 10);
    }

    #[test]
    fn most_recent_entry_weighs_most() {
        let mut h = ClickHistory::new();
        for id in ["a", "b", "c"] {
            h.record_click(id, id, 1.0, T0);
        }
        let entries = h.entries(T0);
        assert!(entries[0].weight > entries[1].weight);
        assert!(entries[1].weight > entries[2].weight);
        for e in &entries {
            assert!((0.1..=1.0).contains(&e.weight));
        }
    }

    #[test]
    fn aging_halves_after_half_life() {
        assert!((aging_factor(T0, T0) - 1.0).abs() < 1e-9);
        assert!((aging_factor(T0, T0 + 30 * 60) - 0.5).abs() < 1e-9);
        assert_eq!(aging_factor(T0, T0 + 24 * 3600), 0.1);
        // Partial minutes do not count.
        assert!((aging_factor(T0, T0 + 59) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn capacity_evicts_oldest_and_renumbers() {
        let mut h = ClickHistory::new();
        for i in 0..=MAX_HISTORY_SIZE {
            h.record_click(&format!("n{i}"), "n", 1.0, T0);
        }
        let entries = h.entries(T0);
        assert_eq!(entries.len(), MAX_HISTORY_SIZE);
        assert_eq!(entries[0].node_id, "n1");
        assert_eq!(entries[0].click_order, 1);
        assert_eq!(entries[MAX_HISTORY_SIZE - 1].click_order, MAX_HISTORY_SIZE);
    }

    #[test]
    fn statistics_summarise_history() {
        let mut h = ClickHistory::new();
        assert_eq!(h.statistics().average_weight, 0.0);

        h.record_click("a", "A", 0.5, T0);
        h.record_click("a", "A", 0.5, T0);
        h.record_click("b", "B", 0.5, T0);

        let stats = h.statistics();
        assert_eq!(stats.unique_nodes, 2);

        h.clear();
        assert!(h.is_empty());
        assert_eq!(stats.total_clicks, 3);
        assert!(stats.average_weight >= 0.1);
    }

    #[test]
    fn store_isolates_sessions() {
        let store = HistoryStore::new();
        store.record_click("s1", "a", "A", 1.0, T0);
        store.record_click("s2", "b", "B", 1.0, T0);
        store.record_click("s2", "c", "C", 1.0, T0);

        assert_eq!(store.entries("s1", T0).len(), 1);
        assert_eq!(store.entries("s2", T0).len(), 2);
        assert!(store.entries("unknown", T0).is_empty());
        assert_eq!(store.session_count(), 2);

        assert!(store.clear("s1"));
        assert!(!store.clear("s1"));
        assert_eq!(store.statistics("s1").unique_nodes, 0);
    }

    #[test]
    fn store_evicts_least_recently_touched_session() {
        let store = HistoryStore::with_max_sessions(2);
        store.record_click("old", "a", "A", 1.0, T0);
        store.record_click("mid", "b", "B", 1.0, T0 + 10);
        // Reading "old" touches it, so "mid" becomes the eviction candidate.
        assert_eq!(store.entries("old", T0 + 20).len(), 1);

        store.record_click("new", "c", "C", 1.0, T0 + 30);
        assert_eq!(store.session_count(), 2);
        assert!(store.entries("mid", T0 + 30).is_empty());
        assert_eq!(store.entries("old", T0 + 30).len(), 1);
        assert_eq!(store.entries("new", T0 + 30).len(), 1);
    }

    #[test]
    fn known_session_never_triggers_eviction() {
        let store = HistoryStore::with_max_sessions(1);
        store.record_click("only", "a", "A", 1.0, T0);
        store.record_click("only", "b", "B", 1.0, T0 + 1);
        assert_eq!(store.session_count(), 1);
        assert_eq!(store.statistics("only").unique_nodes, 2);
        assert_eq!(HistoryStore::with_max_sessions(0).max_sessions(), 1);
    }

    #[test]
    fn store_is_safe_across_threads() {
        let store = std::sync::Arc::new(HistoryStore::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..10 {
                        store.record_click("shared", &format!("n{t}-{i}"), "n", 1.0, T0);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.statistics("shared").unique_nodes, 40);
    }
}
