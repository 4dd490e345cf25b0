//! Delayed items on a simulated clock. Items carry their own validity checks
//! (phase, generation); the scheduler only orders and releases them.

#[derive(Debug)]
struct Entry<T> {
    due: f64,
    seq: u64,
    item: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: f64,
    next_seq: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0.0,
            next_seq: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn enqueue(&mut self, delay: f32, item: T) {
        let due = self.now + delay.max(0.0) as f64;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { due, seq, item });
    }

    /// Advance the clock and return every item now due, earliest first,
    /// ties in enqueue order.
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        self.now += dt.max(0.0) as f64;
        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) = self.entries.drain(..).partition(|e| e.due <= now);
        self.entries = pending;
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.item).collect()
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_in_due_then_enqueue_order() {
        let mut s = Scheduler::new();
        s.enqueue(1.0, "late");
        s.enqueue(0.5, "early");
        s.enqueue(0.5, "early-2");
        assert!(s.advance(0.4).is_empty());
        assert_eq!(s.advance(0.7), vec!["early", "early-2", "late"]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn delay_is_relative_to_current_time() {
        let mut s = Scheduler::new();
        s.advance(10.0);
        s.enqueue(1.0, 1);
        assert!(s.advance(0.5).is_empty());
        assert_eq!(s.advance(0.5), vec![1]);
    }
}
