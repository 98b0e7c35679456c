use std::collections::VecDeque;

const HISTORY: usize = 20;
const WINDOW: usize = 8;
const TRIGGER: usize = 2;

/// Recent placement keys, used by the policy to notice it is shuffling back and forth.
#[derive(Debug, Clone, Default)]
pub struct RepetitionTracker {
    keys: VecDeque<String>,
    count: usize,
}

impl RepetitionTracker {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, key: String) {
        self.keys.push_back(key);
        if self.keys.len() > HISTORY { self.keys.pop_front(); }
    }

    /// Drops the most recent `n` keys (used when moves are taken back).
    pub fn pop(&mut self, n: usize) {
        for _ in 0..n { self.keys.pop_back(); }
    }

    /// How often `key` appears among the last eight tracked keys.
    pub fn occurrences(&self, key: &str) -> usize {
        self.keys.iter().rev().take(WINDOW).filter(|k| k.as_str() == key).count()
    }

    /// Counts `key` in the recent window and latches the counter when it repeats.
    /// The counter stays set until [`clear`](Self::clear) is called.
    pub fn observe(&mut self, key: &str) -> usize {
        let n = self.occurrences(key);
        if n >= TRIGGER { self.count = n; }
        n
    }

    pub fn is_repeating(&self) -> bool { self.count >= TRIGGER }

    pub fn count(&self) -> usize { self.count }

    pub fn clear(&mut self) { self.count = 0; }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    pub fn reset(&mut self) {
        self.keys.clear();
        self.count = 0;
    }
}
