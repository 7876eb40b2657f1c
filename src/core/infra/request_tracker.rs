//! Stale-response filtering for in-flight collaborator requests.
//!
//! Each key keeps only its newest req_id; responses carrying an older id
//! are rejected so a cancelled narration or an abandoned consult can never
//! land after the set has moved on.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug)]
pub struct RequestTracker<K> {
    pending: HashMap<K, u64>,
}

impl<K: Eq + Hash> Default for RequestTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> RequestTracker<K> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Issue a new request for this key. An older pending request on the
    /// same key is superseded; its response will fail `accept`.
    pub fn issue(&mut self, key: K, next_id_fn: impl FnOnce() -> u64) -> u64 {
        let id = next_id_fn();
        self.pending.insert(key, id);
        id
    }

    /// True only when `req_id` is still the newest for the key. Clears the
    /// pending state on success.
    pub fn accept(&mut self, key: &K, req_id: u64) -> bool {
        match self.pending.get(key) {
            Some(&pending_id) if pending_id == req_id => {
                self.pending.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Drop the pending request for a key, e.g. when leaving the channel
    /// that issued it.
    pub fn clear(&mut self, key: &K) {
        self.pending.remove(key);
    }

    pub fn reset_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }
}

/// The request classes the reducer keeps in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKey {
    /// Narration synthesis.
    Speech,
    /// Consulting the presence for a comeback.
    Presence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_request_wins() {
        let mut t = RequestTracker::new();
        let mut next = 0u64;
        let mut issue = || {
            next += 1;
            next
        };
        let old = t.issue(RequestKey::Speech, &mut issue);
        let new = t.issue(RequestKey::Speech, &mut issue);
        assert!(!t.accept(&RequestKey::Speech, old));
        assert!(t.accept(&RequestKey::Speech, new));
        // Accepted once; a replay is stale.
        assert!(!t.accept(&RequestKey::Speech, new));
    }

    #[test]
    fn keys_are_independent() {
        let mut t = RequestTracker::new();
        let a = t.issue(RequestKey::Speech, || 1);
        let b = t.issue(RequestKey::Presence, || 2);
        assert!(t.accept(&RequestKey::Presence, b));
        assert!(t.accept(&RequestKey::Speech, a));
    }

    #[test]
    fn clear_drops_pending() {
        let mut t = RequestTracker::new();
        let id = t.issue(RequestKey::Presence, || 9);
        t.clear(&RequestKey::Presence);
        assert!(!t.accept(&RequestKey::Presence, id));
        assert!(!t.is_pending(&RequestKey::Presence));
    }
}
