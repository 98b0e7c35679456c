use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Tunables for search depth, the difficulty policy and the session.
/// Every field has a default, so a JSON file only needs the keys it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub base_depth: u32,
    pub beast_depth: u32,
    /// Normal-mode depth once the human's rating exceeds `expert_rating`.
    pub expert_depth: u32,
    pub expert_rating: f64,
    /// Plies during which normal-mode depth is capped at `opening_depth_cap`.
    pub opening_plies: usize,
    pub opening_depth_cap: u32,

    pub target_win_prob: f64,
    pub target_band: (f64, f64),
    pub crushing_win_prob: f64,
    pub winning_win_prob: f64,
    /// Winning moves are only cashed in while the human is at or below this.
    pub press_win_prob: f64,
    pub aggressive_win_prob: f64,
    pub frustration_bad_streak: u32,
    pub frustration_win_prob: f64,
    pub frustration_margin: f64,

    /// Depth of the search used to grade a human move.
    pub quality_depth: u32,
    pub hint_shallow_depth: u32,
    pub hint_deep_depth: u32,
    pub hint_candidates: usize,

    pub tt_max_entries: usize,
    pub tt_clear_chance: f64,
    pub clear_cache_on_reset: bool,

    /// Pause before the automated reply, in milliseconds.
    pub reply_delay_ms: u64,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_depth: 3,
            beast_depth: 4,
            expert_depth: 4,
            expert_rating: 1800.0,
            opening_plies: 10,
            opening_depth_cap: 3,
            target_win_prob: 38.0,
            target_band: (30.0, 45.0),
            crushing_win_prob: 10.0,
            winning_win_prob: 20.0,
            press_win_prob: 45.0,
            aggressive_win_prob: 40.0,
            frustration_bad_streak: 4,
            frustration_win_prob: 25.0,
            frustration_margin: 8.0,
            quality_depth: 3,
            hint_shallow_depth: 1,
            hint_deep_depth: 5,
            hint_candidates: 3,
            tt_max_entries: 1000,
            tt_clear_chance: 0.05,
            clear_cache_on_reset: false,
            reply_delay_ms: 50,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Config for deterministic tests: fixed seed, no reply pause.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), reply_delay_ms: 0, ..Self::default() }
    }
}
