use serde::{Deserialize, Serialize};
use std::fmt;

use crate::search::eval::win_prob;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveQuality {
    Excellent,
    Good,
    Neutral,
    Bad,
    Terrible,
}

impl MoveQuality {
    pub const ALL: [MoveQuality; 5] =
        [MoveQuality::Excellent, MoveQuality::Good, MoveQuality::Neutral, MoveQuality::Bad, MoveQuality::Terrible];

    /// Grades a change in winning chances, in percentage points.
    pub fn from_win_prob_delta(delta: f64) -> Self {
        if delta >= 20.0 {
            MoveQuality::Excellent
        } else if delta >= 10.0 {
            MoveQuality::Good
        } else if delta > -10.0 {
            MoveQuality::Neutral
        } else if delta > -20.0 {
            MoveQuality::Bad
        } else {
            MoveQuality::Terrible
        }
    }

    /// -2 (Terrible) ..= 2 (Excellent).
    pub fn points(self) -> i32 {
        match self {
            MoveQuality::Excellent => 2,
            MoveQuality::Good => 1,
            MoveQuality::Neutral => 0,
            MoveQuality::Bad => -1,
            MoveQuality::Terrible => -2,
        }
    }

    pub fn is_good(self) -> bool { matches!(self, MoveQuality::Excellent | MoveQuality::Good) }

    pub fn is_bad(self) -> bool { matches!(self, MoveQuality::Bad | MoveQuality::Terrible) }
}

impl fmt::Display for MoveQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MoveQuality::Excellent => "Excellent",
            MoveQuality::Good => "Good",
            MoveQuality::Neutral => "Neutral",
            MoveQuality::Bad => "Bad",
            MoveQuality::Terrible => "Terrible",
        };
        f.write_str(s)
    }
}

/// Grade plus the numbers it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub quality: MoveQuality,
    pub eval_delta: i32,
    pub win_prob_delta: f64,
}

/// Human (White) move: both evaluations come from searches, and a gain for White is good.
pub fn assess_human(prev_eval: i32, new_eval: i32) -> Assessment {
    let delta = win_prob(new_eval) - win_prob(prev_eval);
    Assessment { quality: MoveQuality::from_win_prob_delta(delta), eval_delta: new_eval - prev_eval, win_prob_delta: delta }
}

/// Automated (Black) move, graded from the raw score change without a fresh search.
/// Deltas are from Black's side, so a drop in White's score is a gain.
pub fn assess_automated(prev_eval: i32, chosen_score: i32) -> Assessment {
    let delta = win_prob(prev_eval) - win_prob(chosen_score);
    Assessment { quality: MoveQuality::from_win_prob_delta(delta), eval_delta: prev_eval - chosen_score, win_prob_delta: delta }
}
