use log::debug;
use std::collections::VecDeque;

use crate::adapt::quality::MoveQuality;

pub const MIN_RATING: f64 = 600.0;
pub const MAX_RATING: f64 = 2600.0;
pub const START_RATING: f64 = 1200.0;
const WINDOW: usize = 10;
const STREAK: u32 = 3;
const DAMPING: f64 = 0.7;

fn base_adjustment(q: MoveQuality) -> f64 {
    match q {
        MoveQuality::Excellent => 30.0,
        MoveQuality::Good => 12.0,
        MoveQuality::Neutral => 0.0,
        MoveQuality::Bad => -15.0,
        MoveQuality::Terrible => -40.0,
    }
}

/// Running estimate of the human's strength, nudged after every human move.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillState {
    rating: f64,
    recent: VecDeque<MoveQuality>,
    good_streak: u32,
    bad_streak: u32,
}

impl Default for SkillState {
    fn default() -> Self {
        Self { rating: START_RATING, recent: VecDeque::with_capacity(WINDOW + 1), good_streak: 0, bad_streak: 0 }
    }
}

impl SkillState {
    pub fn new() -> Self { Self::default() }

    pub fn rating(&self) -> f64 { self.rating }

    pub fn recent(&self) -> impl Iterator<Item = MoveQuality> + '_ { self.recent.iter().copied() }

    pub fn good_streak(&self) -> u32 { self.good_streak }

    pub fn bad_streak(&self) -> u32 { self.bad_streak }

    fn recent_mean(&self) -> Option<f64> {
        if self.recent.len() < 5 { return None; }
        let sum: i32 = self.recent.iter().map(|q| q.points()).sum();
        Some(sum as f64 / self.recent.len() as f64)
    }

    pub fn update(&mut self, quality: MoveQuality) {
        self.recent.push_back(quality);
        if self.recent.len() > WINDOW { self.recent.pop_front(); }

        if quality.is_good() {
            self.good_streak += 1;
            self.bad_streak = 0;
        } else if quality.is_bad() {
            self.bad_streak += 1;
            self.good_streak = 0;
        } else {
            self.good_streak = self.good_streak.saturating_sub(1);
            self.bad_streak = self.bad_streak.saturating_sub(1);
        }

        let mut adj = base_adjustment(quality);
        if self.good_streak >= STREAK { adj += 10.0; }
        if self.bad_streak >= STREAK { adj -= 5.0; }

        // one slip from a strong player (or one find from a struggling one) moves the rating less
        if let Some(mean) = self.recent_mean() {
            if (mean > 0.5 && adj < 0.0) || (mean < -0.5 && adj > 0.0) { adj *= DAMPING; }
        }

        self.rating = (self.rating + adj).clamp(MIN_RATING, MAX_RATING);
        debug!("skill: {} adj={:.1} rating={:.1} streaks=+{}/-{}", quality, adj, self.rating, self.good_streak, self.bad_streak);
    }

    pub fn reset(&mut self) { *self = Self::default(); }
}
