use cozy_chess::{Color, Piece, Square};
use log::debug;

use crate::board::Position;
use crate::search::alphabeta::Searcher;
use crate::search::eval::win_prob;

#[derive(Debug, Clone, PartialEq)]
pub struct Hint {
    pub notation: String,
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub score: i32,
    /// Rounded to a whole percent.
    pub win_prob: f64,
    pub pv: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct HintParams {
    pub shallow_depth: u32,
    /// Depth counted from the current position; the candidate's own ply is one of them.
    pub deep_depth: u32,
    pub candidates: usize,
}

impl Default for HintParams {
    fn default() -> Self { Self { shallow_depth: 1, deep_depth: 5, candidates: 3 } }
}

/// Ranks the best moves for the side to move.
///
/// Every legal move gets a cheap scan; only the leading `candidates` are searched deeply.
/// Returns an empty list when the game is over.
pub fn analyze(searcher: &mut Searcher, pos: &mut Position, params: HintParams) -> Vec<Hint> {
    if pos.is_game_over() { return Vec::new(); }
    let white_to_move = pos.side_to_move() == Color::White;
    // after our move the opponent picks; White maximizes
    let reply_maximizing = !white_to_move;

    let mut scan = searcher.score_children(pos, params.shallow_depth, reply_maximizing);
    if white_to_move {
        scan.sort_by(|a, b| b.1.score.cmp(&a.1.score));
    } else {
        scan.sort_by(|a, b| a.1.score.cmp(&b.1.score));
    }
    scan.truncate(params.candidates);

    let deep = params.deep_depth.saturating_sub(1);
    let hints: Vec<Hint> = scan
        .into_iter()
        .map(|(info, _)| {
            let r = searcher.score_child(pos, &info, deep, reply_maximizing);
            Hint {
                notation: info.notation,
                from: info.from,
                to: info.to,
                piece: info.piece,
                captured: info.captured,
                score: r.score,
                win_prob: win_prob(r.score).round(),
                pv: r.pv,
            }
        })
        .collect();
    debug!("hints: {:?}", hints.iter().map(|h| (&h.notation, h.score)).collect::<Vec<_>>());
    hints
}
