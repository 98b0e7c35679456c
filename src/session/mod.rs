//! One game against the adaptive opponent: the human plays White, the engine Black.

pub mod history;

use cozy_chess::{Color, Square};
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::adapt::{assess_automated, assess_human, DifficultyPolicy, RepetitionTracker, SkillState};
use crate::board::{parse_square, MoveInfo, Outcome, Position};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::search::alphabeta::{Searcher, SCORE_INF};
use crate::search::eval::{evaluate, win_prob};
use crate::search::hint::{analyze, Hint, HintParams};

pub use history::{GamePhase, MoveHistoryEntry, MoveStats, Mover, ReviewCursor};

/// A human move and the engine's answer to it, if the game was still going.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub human: MoveHistoryEntry,
    pub reply: Option<MoveHistoryEntry>,
}

#[derive(Debug, Clone)]
pub enum Click {
    Selected(Square),
    Deselected,
    Moved(Box<Exchange>),
    Ignored,
}

pub struct Session {
    config: EngineConfig,
    policy: DifficultyPolicy,
    searcher: Searcher,
    start: Position,
    pos: Position,
    history: Vec<MoveHistoryEntry>,
    skill: SkillState,
    repetition: RepetitionTracker,
    rng: SmallRng,
    beast: bool,
    current_eval: i32,
    selected: Option<Square>,
    cursor: ReviewCursor,
}

impl Default for Session {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl Session {
    pub fn new(config: EngineConfig) -> Self { Self::with_position(config, Position::startpos()) }

    pub fn from_fen(config: EngineConfig, fen: &str) -> Result<Self> {
        Ok(Self::with_position(config, Position::from_fen(fen)?))
    }

    pub fn with_position(config: EngineConfig, start: Position) -> Self {
        let rng = match config.seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        Self {
            policy: DifficultyPolicy::from_config(&config),
            searcher: Searcher::from_config(&config),
            pos: start.clone(),
            current_eval: evaluate(start.board()),
            start,
            history: Vec::new(),
            skill: SkillState::new(),
            repetition: RepetitionTracker::new(),
            rng,
            beast: false,
            selected: None,
            cursor: ReviewCursor::Live,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn position(&self) -> &Position { &self.pos }
    pub fn history(&self) -> &[MoveHistoryEntry] { &self.history }
    pub fn skill(&self) -> &SkillState { &self.skill }
    pub fn repetition(&self) -> &RepetitionTracker { &self.repetition }
    pub fn searcher(&self) -> &Searcher { &self.searcher }
    pub fn current_eval(&self) -> i32 { self.current_eval }
    pub fn win_probability(&self) -> f64 { win_prob(self.current_eval) }
    pub fn selected_square(&self) -> Option<Square> { self.selected }
    pub fn is_beast_mode(&self) -> bool { self.beast }
    pub fn is_game_over(&self) -> bool { self.pos.is_game_over() }
    pub fn outcome(&self) -> Option<Outcome> { self.pos.outcome() }
    pub fn move_stats(&self) -> MoveStats { MoveStats::from_entries(&self.history) }

    pub fn set_beast_mode(&mut self, on: bool) {
        if self.beast != on { info!("beast mode {}", if on { "on" } else { "off" }); }
        self.beast = on;
    }

    fn check_human_turn(&self) -> Result<()> {
        if self.pos.is_game_over() { return Err(EngineError::GameOver); }
        if self.pos.side_to_move() != Color::White { return Err(EngineError::NotHumanTurn); }
        Ok(())
    }

    /// Validates and plays a human move given by squares, then lets the engine reply.
    /// An illegal move changes nothing except clearing the square selection.
    pub fn on_human_move(&mut self, from: &str, to: &str) -> Result<Exchange> {
        self.check_human_turn()?;
        let illegal = || EngineError::IllegalMove { from: from.to_string(), to: to.to_string() };
        let (f, t) = match (parse_square(from), parse_square(to)) {
            (Ok(f), Ok(t)) => (f, t),
            _ => {
                self.selected = None;
                return Err(illegal());
            }
        };
        match self.pos.find_move(f, t, None) {
            Some(info) => self.commit_human(info),
            None => {
                self.selected = None;
                Err(illegal())
            }
        }
    }

    /// Plays a human move given in move notation (e.g. from an opening list).
    pub fn play_human_notation(&mut self, notation: &str) -> Result<Exchange> {
        self.check_human_turn()?;
        let info = self.pos.find_notation(notation).ok_or_else(|| EngineError::UnknownMove(notation.to_string()))?;
        self.commit_human(info)
    }

    /// Board-click interaction: select a White piece, then click its destination.
    pub fn click(&mut self, sq: Square) -> Result<Click> {
        if self.cursor != ReviewCursor::Live || self.check_human_turn().is_err() { return Ok(Click::Ignored); }
        if let Some(from) = self.selected {
            if let Some(info) = self.pos.find_move(from, sq, None) {
                return Ok(Click::Moved(Box::new(self.commit_human(info)?)));
            }
        }
        if self.selected == Some(sq) {
            self.selected = None;
            return Ok(Click::Deselected);
        }
        match self.pos.piece_at(sq) {
            Some((Color::White, _)) => {
                self.selected = Some(sq);
                Ok(Click::Selected(sq))
            }
            _ => {
                self.selected = None;
                Ok(Click::Deselected)
            }
        }
    }

    fn commit_human(&mut self, info: MoveInfo) -> Result<Exchange> {
        self.check_human_turn()?;
        let alternatives: Vec<String> = self
            .pos
            .legal_moves_from(info.from)
            .into_iter()
            .take(4)
            .map(|m| m.notation)
            .filter(|n| *n != info.notation)
            .collect();

        let prev_eval = self.current_eval;
        self.pos.play(info.mv);
        let maximizing = self.pos.side_to_move() == Color::White;
        let new_eval = self.searcher.search(&mut self.pos, self.config.quality_depth, -SCORE_INF, SCORE_INF, maximizing).score;
        let a = assess_human(prev_eval, new_eval);
        self.skill.update(a.quality);
        self.repetition.push(self.pos.placement_key());

        let entry = MoveHistoryEntry {
            notation: info.notation,
            from: info.from,
            to: info.to,
            piece: info.piece,
            captured: info.captured,
            promotion: info.promotion,
            mover: Mover::Human,
            quality: a.quality,
            eval_score: new_eval,
            eval_delta: a.eval_delta,
            win_prob_delta: a.win_prob_delta,
            phase: GamePhase::of(&self.pos),
            fen: self.pos.fen(),
            alternatives,
        };
        info!(
            "human {} {} eval={} wp {:+.1} rating={:.0}",
            entry.notation, entry.quality, new_eval, a.win_prob_delta, self.skill.rating()
        );
        self.history.push(entry.clone());
        self.current_eval = new_eval;
        self.selected = None;
        self.cursor = ReviewCursor::Live;

        let reply = if self.pos.is_game_over() {
            None
        } else {
            if self.config.reply_delay_ms > 0 {
                std::thread::sleep(Duration::from_millis(self.config.reply_delay_ms));
            }
            self.make_automated_move()
        };
        Ok(Exchange { human: entry, reply })
    }

    /// Lets the engine move. `None` when it is not Black's turn, the game is over or there is
    /// nothing to play.
    pub fn make_automated_move(&mut self) -> Option<MoveHistoryEntry> {
        if self.pos.side_to_move() != Color::Black || self.pos.is_game_over() { return None; }
        let sel = self.policy.select_move(
            &mut self.searcher,
            &mut self.pos,
            &self.skill,
            &mut self.repetition,
            self.beast,
            &mut self.rng,
        )?;
        let a = assess_automated(self.current_eval, sel.score);
        self.pos.play(sel.info.mv);
        self.repetition.push(self.pos.placement_key());

        let entry = MoveHistoryEntry {
            notation: sel.info.notation,
            from: sel.info.from,
            to: sel.info.to,
            piece: sel.info.piece,
            captured: sel.info.captured,
            promotion: sel.info.promotion,
            mover: Mover::Automated,
            quality: a.quality,
            eval_score: sel.score,
            eval_delta: a.eval_delta,
            win_prob_delta: a.win_prob_delta,
            phase: GamePhase::of(&self.pos),
            fen: self.pos.fen(),
            alternatives: Vec::new(),
        };
        info!("engine {} ({:?}, d{}) eval={} wp={:.1}", entry.notation, sel.branch, sel.depth, sel.score, sel.win_prob);
        self.history.push(entry.clone());
        self.current_eval = sel.score;
        self.cursor = ReviewCursor::Live;
        Some(entry)
    }

    /// Ranked suggestions for the side to move in the live position.
    pub fn analyze_best_moves(&mut self) -> Vec<Hint> {
        let params = HintParams {
            shallow_depth: self.config.hint_shallow_depth,
            deep_depth: self.config.hint_deep_depth,
            candidates: self.config.hint_candidates,
        };
        analyze(&mut self.searcher, &mut self.pos, params)
    }

    pub fn reset(&mut self) {
        self.pos = self.start.clone();
        self.history.clear();
        self.skill.reset();
        self.repetition.reset();
        self.current_eval = evaluate(self.pos.board());
        self.selected = None;
        self.cursor = ReviewCursor::Live;
        if self.config.clear_cache_on_reset { self.searcher.clear_cache(); }
        info!("new game");
    }

    /// Takes back the last human move and the reply to it, if there was one, so the human
    /// is on move again. Returns false when no human move has been played.
    pub fn undo(&mut self) -> bool {
        let Some(last_human) = self.history.iter().rposition(|e| e.mover == Mover::Human) else { return false };
        let plies = self.history.len() - last_human;
        if self.pos.plies_played() < plies { return false; }
        for _ in 0..plies { self.pos.undo(); }
        self.history.truncate(last_human);
        self.repetition.pop(plies);
        self.current_eval = evaluate(self.pos.board());
        self.selected = None;
        self.cursor = ReviewCursor::Live;
        true
    }

    pub fn review_cursor(&self) -> ReviewCursor { self.cursor }

    pub fn is_reviewing(&self) -> bool { self.cursor != ReviewCursor::Live }

    pub fn go_to(&mut self, cursor: ReviewCursor) {
        self.cursor = match cursor {
            ReviewCursor::Ply(i) if i >= self.history.len() => ReviewCursor::Live,
            c => c,
        };
    }

    pub fn review_next(&mut self) { self.cursor = self.cursor.next(self.history.len()); }

    pub fn review_prev(&mut self) { self.cursor = self.cursor.prev(self.history.len()); }

    /// FEN of the position under the review cursor.
    pub fn view_fen(&self) -> String {
        match self.cursor {
            ReviewCursor::Live => self.pos.fen(),
            ReviewCursor::Start => self.start.fen(),
            ReviewCursor::Ply(i) => self.history[i].fen.clone(),
        }
    }
}
