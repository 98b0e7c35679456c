use log::trace;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use crate::search::alphabeta::SearchResult;

#[derive(Clone, Debug)]
pub struct Entry {
    pub depth: u32,
    pub result: SearchResult,
}

/// Search cache keyed by canonical position text.
///
/// Writes always replace, whatever the stored depth. Once the table holds more than
/// `max_entries`, each write has a `clear_chance` of wiping it completely; there is no
/// per-entry eviction.
pub struct Tt {
    entries: HashMap<String, Entry>,
    max_entries: usize,
    clear_chance: f64,
    rng: SmallRng,
}

impl Default for Tt {
    fn default() -> Self { Self::new(1000, 0.05, None) }
}

impl Tt {
    pub fn new(max_entries: usize, clear_chance: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        Self { entries: HashMap::new(), max_entries, clear_chance: clear_chance.clamp(0.0, 1.0), rng }
    }

    /// Returns the cached result only when it was searched at least `depth` plies deep.
    pub fn get(&self, key: &str, depth: u32) -> Option<&SearchResult> {
        self.entries.get(key).filter(|e| e.depth >= depth).map(|e| &e.result)
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> { self.entries.get(key) }

    pub fn put(&mut self, key: String, depth: u32, result: SearchResult) {
        self.entries.insert(key, Entry { depth, result });
        if self.entries.len() > self.max_entries && self.rng.gen_bool(self.clear_chance) {
            trace!("tt: clearing {} entries", self.entries.len());
            self.entries.clear();
        }
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn clear(&mut self) { self.entries.clear(); }

    pub fn max_entries(&self) -> usize { self.max_entries }
}
