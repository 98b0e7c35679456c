//! Move choice for the automated side (Black).
//!
//! Normal mode aims to keep the human a little behind, around 38% winning chances,
//! while still converting decisive chances and breaking up move repetitions. Beast
//! mode always plays the top-scored move.

use log::debug;
use rand::Rng;

use crate::adapt::repetition::RepetitionTracker;
use crate::adapt::skill::SkillState;
use crate::board::{MoveInfo, Position};
use crate::config::EngineConfig;
use crate::search::alphabeta::Searcher;
use crate::search::eval::{evaluate, win_prob};

const AHEAD_WIN_PROB: f64 = 50.0;
const FAR_BEHIND_WIN_PROB: f64 = 30.0;
const EASE_FRACTION: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMove {
    pub notation: String,
    pub score: i32,
    pub win_prob: f64,
}

impl ScoredMove {
    pub fn new(notation: impl Into<String>, score: i32) -> Self {
        Self { notation: notation.into(), score, win_prob: win_prob(score) }
    }
}

/// Which rule picked the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Beast,
    Crushing,
    Winning,
    BreakRepetition,
    Target,
    CatchUp,
    EaseUp,
    Variety,
    Frustration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyContext {
    /// Human winning chances in the position before the automated move.
    pub current_win_prob: f64,
    pub repeating: bool,
    /// Consecutive Bad/Terrible human moves.
    pub bad_streak: u32,
    pub beast: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub index: usize,
    pub branch: Branch,
    pub clears_repetition: bool,
}

#[derive(Debug, Clone)]
pub struct SelectedMove {
    pub info: MoveInfo,
    pub score: i32,
    pub win_prob: f64,
    pub branch: Branch,
    pub depth: u32,
}

#[derive(Debug, Clone)]
pub struct DifficultyPolicy {
    base_depth: u32,
    beast_depth: u32,
    expert_depth: u32,
    expert_rating: f64,
    opening_plies: usize,
    opening_depth_cap: u32,
    target: f64,
    band: (f64, f64),
    crushing: f64,
    winning: f64,
    press: f64,
    aggressive: f64,
    frustration_streak: u32,
    frustration_win_prob: f64,
    frustration_margin: f64,
}

impl Default for DifficultyPolicy {
    fn default() -> Self { Self::from_config(&EngineConfig::default()) }
}

fn indices_where(moves: &[ScoredMove], pred: impl Fn(&ScoredMove) -> bool) -> Vec<usize> {
    moves.iter().enumerate().filter(|(_, m)| pred(m)).map(|(i, _)| i).collect()
}

fn pick<R: Rng + ?Sized>(pool: &[usize], top: usize, rng: &mut R) -> usize {
    pool[rng.gen_range(0..pool.len().min(top))]
}

impl DifficultyPolicy {
    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self {
            base_depth: cfg.base_depth,
            beast_depth: cfg.beast_depth,
            expert_depth: cfg.expert_depth,
            expert_rating: cfg.expert_rating,
            opening_plies: cfg.opening_plies,
            opening_depth_cap: cfg.opening_depth_cap,
            target: cfg.target_win_prob,
            band: cfg.target_band,
            crushing: cfg.crushing_win_prob,
            winning: cfg.winning_win_prob,
            press: cfg.press_win_prob,
            aggressive: cfg.aggressive_win_prob,
            frustration_streak: cfg.frustration_bad_streak,
            frustration_win_prob: cfg.frustration_win_prob,
            frustration_margin: cfg.frustration_margin,
        }
    }

    pub fn depth(&self, rating: f64, plies_played: usize, beast: bool) -> u32 {
        if beast { return self.beast_depth; }
        let mut depth = self.base_depth;
        if rating > self.expert_rating { depth = self.expert_depth; }
        if plies_played < self.opening_plies { depth = depth.min(self.opening_depth_cap); }
        depth
    }

    /// Picks an index into `moves`, which must be sorted by ascending score
    /// (best for the automated side first). `None` only for an empty list.
    pub fn choose<R: Rng + ?Sized>(&self, moves: &[ScoredMove], ctx: &PolicyContext, rng: &mut R) -> Option<Choice> {
        if moves.is_empty() { return None; }
        if ctx.beast { return Some(Choice { index: 0, branch: Branch::Beast, clears_repetition: false }); }

        let cur = ctx.current_win_prob;

        let crushing = moves.iter().position(|m| m.win_prob <= self.crushing);
        let winning = moves.iter().position(|m| m.win_prob <= self.winning);

        let (index, branch, clears) = if let Some(i) = crushing {
            (i, Branch::Crushing, false)
        } else if let Some(i) = winning.filter(|_| cur <= self.press || ctx.repeating) {
            (i, Branch::Winning, true)
        } else if ctx.repeating {
            let aggressive = indices_where(moves, |m| m.win_prob <= self.aggressive);
            let i = if aggressive.is_empty() { 0 } else { pick(&aggressive, 2, rng) };
            (i, Branch::BreakRepetition, true)
        } else {
            let (lo, hi) = self.band;
            let mut band = indices_where(moves, |m| m.win_prob >= lo && m.win_prob <= hi);
            if !band.is_empty() {
                let dist = |i: &usize| (moves[*i].win_prob - self.target).abs();
                band.sort_by(|a, b| dist(a).total_cmp(&dist(b)));
                (pick(&band, 3, rng), Branch::Target, false)
            } else if cur > AHEAD_WIN_PROB {
                (0, Branch::CatchUp, false)
            } else if cur < FAR_BEHIND_WIN_PROB {
                // hand back some ground: 30% of the way up the moves that help the human
                let ease = indices_where(moves, |m| m.win_prob > cur);
                let i = match ease.len() {
                    0 => 2.min(moves.len() - 1),
                    n => ease[((n as f64 * EASE_FRACTION) as usize).min(n - 1)],
                };
                (i, Branch::EaseUp, false)
            } else {
                (rng.gen_range(0..moves.len().min(3)), Branch::Variety, false)
            }
        };

        if ctx.bad_streak >= self.frustration_streak && cur < self.frustration_win_prob {
            let help = indices_where(moves, |m| m.win_prob > cur + self.frustration_margin);
            if !help.is_empty() {
                return Some(Choice { index: pick(&help, 2, rng), branch: Branch::Frustration, clears_repetition: clears });
            }
        }
        Some(Choice { index, branch, clears_repetition: clears })
    }

    /// Searches every legal move for the automated side and picks one.
    ///
    /// Returns `None` when there are no legal moves. Updates the repetition counter;
    /// never touches the skill state.
    pub fn select_move<R: Rng + ?Sized>(
        &self,
        searcher: &mut Searcher,
        pos: &mut Position,
        skill: &SkillState,
        repetition: &mut RepetitionTracker,
        beast: bool,
        rng: &mut R,
    ) -> Option<SelectedMove> {
        let depth = self.depth(skill.rating(), pos.plies_played(), beast);
        if !beast { repetition.observe(&pos.placement_key()); }
        let current_win_prob = win_prob(evaluate(pos.board()));

        // each reply is searched as if the human answers with their best move
        let mut scored = searcher.score_children(pos, depth.saturating_sub(1), true);
        if scored.is_empty() { return None; }
        scored.sort_by_key(|(_, r)| r.score);
        let list: Vec<ScoredMove> = scored.iter().map(|(info, r)| ScoredMove::new(info.notation.clone(), r.score)).collect();

        let ctx = PolicyContext { current_win_prob, repeating: repetition.is_repeating(), bad_streak: skill.bad_streak(), beast };
        let choice = self.choose(&list, &ctx, rng)?;
        if choice.clears_repetition { repetition.clear(); }

        let picked = &list[choice.index];
        debug!(
            "policy: d{} {:?} -> {} score={} wp={:.1} (cur wp={:.1}, {} moves)",
            depth, choice.branch, picked.notation, picked.score, picked.win_prob, current_win_prob, list.len()
        );
        let (info, r) = scored.swap_remove(choice.index);
        Some(SelectedMove { info, score: r.score, win_prob: win_prob(r.score), branch: choice.branch, depth })
    }
}
