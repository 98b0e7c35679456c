use cozy_chess::{Piece, Square};
use serde::Serialize;

use crate::adapt::quality::MoveQuality;
use crate::board::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mover {
    Human,
    Automated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

impl GamePhase {
    pub fn of(pos: &Position) -> Self {
        if pos.plies_played() < 20 {
            GamePhase::Opening
        } else if pos.officer_count() <= 6 {
            GamePhase::Endgame
        } else {
            GamePhase::Middlegame
        }
    }
}

/// One completed move. Never modified after it is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveHistoryEntry {
    pub notation: String,
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
    pub mover: Mover,
    pub quality: MoveQuality,
    pub eval_score: i32,
    pub eval_delta: i32,
    pub win_prob_delta: f64,
    pub phase: GamePhase,
    /// FEN after the move.
    pub fen: String,
    /// Other moves the same piece could have made (human moves only).
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MoveStats {
    pub excellent: usize,
    pub good: usize,
    pub neutral: usize,
    pub bad: usize,
    pub terrible: usize,
}

impl MoveStats {
    pub fn record(&mut self, q: MoveQuality) {
        match q {
            MoveQuality::Excellent => self.excellent += 1,
            MoveQuality::Good => self.good += 1,
            MoveQuality::Neutral => self.neutral += 1,
            MoveQuality::Bad => self.bad += 1,
            MoveQuality::Terrible => self.terrible += 1,
        }
    }

    pub fn get(&self, q: MoveQuality) -> usize {
        match q {
            MoveQuality::Excellent => self.excellent,
            MoveQuality::Good => self.good,
            MoveQuality::Neutral => self.neutral,
            MoveQuality::Bad => self.bad,
            MoveQuality::Terrible => self.terrible,
        }
    }

    pub fn total(&self) -> usize { self.excellent + self.good + self.neutral + self.bad + self.terrible }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a MoveHistoryEntry>) -> Self {
        let mut s = Self::default();
        for e in entries.into_iter().filter(|e| e.mover == Mover::Human) { s.record(e.quality); }
        s
    }
}

/// Which position the review view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewCursor {
    #[default]
    Live,
    Start,
    /// After history entry `i`.
    Ply(usize),
}

impl ReviewCursor {
    pub fn next(self, len: usize) -> Self {
        match self {
            ReviewCursor::Live => ReviewCursor::Live,
            ReviewCursor::Start if len == 0 => ReviewCursor::Live,
            ReviewCursor::Start => ReviewCursor::Ply(0),
            ReviewCursor::Ply(i) if i + 1 >= len => ReviewCursor::Live,
            ReviewCursor::Ply(i) => ReviewCursor::Ply(i + 1),
        }
    }

    pub fn prev(self, len: usize) -> Self {
        match self {
            ReviewCursor::Live if len == 0 => ReviewCursor::Start,
            ReviewCursor::Live => ReviewCursor::Ply(len - 1),
            ReviewCursor::Start | ReviewCursor::Ply(0) => ReviewCursor::Start,
            ReviewCursor::Ply(i) => ReviewCursor::Ply(i - 1),
        }
    }
}
