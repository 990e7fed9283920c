//! One-shot timers on the simulation clock
//!
//! Delayed transitions (fail reset, reveal steps, fake loading) are queued
//! here instead of in host callbacks, so a whole group can be cancelled at
//! once and nothing fires against a run that no longer exists.

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Pending<K> {
    id: TimerId,
    due_ms: f64,
    key: K,
}

/// Queue of pending one-shot timers keyed by `K`
#[derive(Debug, Clone)]
pub struct Timers<K> {
    now_ms: f64,
    next_id: u64,
    pending: Vec<Pending<K>>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 1,
            pending: Vec::new(),
        }
    }
}

impl<K> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading (ms since creation)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Fire `key` once `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: f64, key: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due_ms: self.now_ms + delay_ms.max(0.0),
            key,
        });
        id
    }

    /// Cancel one timer; false if it already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Cancel every timer whose key matches
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&K) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| !predicate(&p.key));
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Move the clock forward and return due keys, earliest first
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<K> {
        self.now_ms += elapsed_ms.max(0.0);
        let now = self.now_ms;

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due_ms <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        // Stable order: due time, then scheduling order
        due.sort_by(|a, b| {
            a.due_ms
                .partial_cmp(&b.due_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.0.cmp(&b.id.0))
        });
        due.into_iter().map(|p| p.key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut timers = Timers::new();
        timers.schedule(1500.0, "reset");
        assert!(timers.advance(1000.0).is_empty());
        assert_eq!(timers.advance(500.0), vec!["reset"]);
        assert!(timers.advance(5000.0).is_empty());
    }

    #[test]
    fn test_due_order() {
        let mut timers = Timers::new();
        timers.schedule(300.0, 3);
        timers.schedule(100.0, 1);
        timers.schedule(100.0, 2);
        assert_eq!(timers.advance(1000.0), vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel_single_and_group() {
        let mut timers = Timers::new();
        let a = timers.schedule(10.0, 'a');
        timers.schedule(10.0, 'b');
        timers.schedule(10.0, 'c');
        assert!(timers.cancel(a));
        assert!(!timers.cancel(a));
        assert_eq!(timers.cancel_where(|k| *k == 'b'), 1);
        assert_eq!(timers.advance(10.0), vec!['c']);
    }

    #[test]
    fn test_delay_measured_from_schedule_time() {
        let mut timers = Timers::new();
        timers.advance(1000.0);
        timers.schedule(800.0, ());
        assert!(timers.advance(799.0).is_empty());
        assert_eq!(timers.advance(1.0).len(), 1);
    }
}
