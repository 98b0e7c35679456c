use cozy_chess::{Color, Move};
use log::debug;

use crate::board::{MoveInfo, Position};
use crate::config::EngineConfig;
use crate::search::eval::evaluate;
use crate::search::tt::Tt;

/// Larger than any reachable evaluation; used for open search windows.
pub const SCORE_INF: i32 = 1_000_000;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub use_tt: bool,
    pub order_captures: bool,
}

impl Default for SearchParams {
    fn default() -> Self { Self { use_tt: true, order_captures: true } }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    /// Best line from the searched position, in move notation.
    pub pv: Vec<String>,
}

/// Minimax with alpha-beta over a single shared position.
/// White maximizes, Black minimizes; scores are always from White's point of view.
pub struct Searcher {
    tt: Tt,
    params: SearchParams,
    nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(Tt::default(), SearchParams::default()) }
}

impl Searcher {
    pub fn new(tt: Tt, params: SearchParams) -> Self { Self { tt, params, nodes: 0 } }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self::new(Tt::new(cfg.tt_max_entries, cfg.tt_clear_chance, cfg.seed), SearchParams::default())
    }

    pub fn with_params(params: SearchParams) -> Self { Self::new(Tt::default(), params) }

    pub fn params(&self) -> SearchParams { self.params }

    pub fn set_order_captures(&mut self, on: bool) { self.params.order_captures = on; }

    pub fn set_use_tt(&mut self, on: bool) { self.params.use_tt = on; }

    /// Nodes visited since the counter was last reset.
    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn reset_nodes(&mut self) { self.nodes = 0; }

    pub fn tt(&self) -> &Tt { &self.tt }

    pub fn clear_cache(&mut self) { self.tt.clear(); }

    fn ordered_moves(&self, pos: &Position) -> Vec<Move> {
        let mut moves = pos.moves();
        if self.params.order_captures {
            // stable: captures keep their generation order, as do quiets
            moves.sort_by_key(|&m| !pos.is_capture(m));
        }
        moves
    }

    /// Searches `pos` to `depth` plies. `pos` is mutated during the search but is
    /// returned to its original state before this function returns.
    pub fn search(&mut self, pos: &mut Position, depth: u32, mut alpha: i32, mut beta: i32, maximizing: bool) -> SearchResult {
        self.nodes += 1;
        let key = if self.params.use_tt { Some(pos.cache_key()) } else { None };
        if let Some(k) = key.as_deref() {
            if let Some(hit) = self.tt.get(k, depth) { return hit.clone(); }
        }
        if depth == 0 || pos.is_game_over() {
            return SearchResult { score: evaluate(pos.board()), pv: Vec::new() };
        }

        let moves = self.ordered_moves(pos);
        let mut best_score = if maximizing { -SCORE_INF } else { SCORE_INF };
        let mut best_pv: Vec<String> = Vec::new();
        for mv in moves {
            let child = {
                let mut next = pos.apply(mv);
                self.search(&mut next, depth - 1, alpha, beta, !maximizing)
            };
            let improves = if maximizing { child.score > best_score } else { child.score < best_score };
            if improves {
                best_score = child.score;
                best_pv.clear();
                best_pv.push(pos.notation(mv));
                best_pv.extend(child.pv);
            }
            if maximizing { alpha = alpha.max(child.score); } else { beta = beta.min(child.score); }
            if beta <= alpha { break; }
        }

        let result = SearchResult { score: best_score, pv: best_pv };
        if let Some(k) = key { self.tt.put(k, depth, result.clone()); }
        result
    }

    /// Full-window search with the side to move choosing whether to maximize.
    pub fn search_root(&mut self, pos: &mut Position, depth: u32) -> SearchResult {
        let maximizing = pos.side_to_move() == Color::White;
        let before = self.nodes;
        let r = self.search(pos, depth, -SCORE_INF, SCORE_INF, maximizing);
        debug!("search d{} score={} pv={:?} nodes={}", depth, r.score, r.pv, self.nodes - before);
        r
    }

    /// Searches the position after each legal move, `depth` plies deep, in generation order.
    pub fn score_children(&mut self, pos: &mut Position, depth: u32, maximizing: bool) -> Vec<(MoveInfo, SearchResult)> {
        let moves = pos.legal_moves();
        let mut out = Vec::with_capacity(moves.len());
        for info in moves {
            let r = {
                let mut next = pos.apply(info.mv);
                self.search(&mut next, depth, -SCORE_INF, SCORE_INF, maximizing)
            };
            out.push((info, r));
        }
        out
    }

    /// Re-searches one move's resulting position.
    pub fn score_child(&mut self, pos: &mut Position, info: &MoveInfo, depth: u32, maximizing: bool) -> SearchResult {
        let mut next = pos.apply(info.mv);
        self.search(&mut next, depth, -SCORE_INF, SCORE_INF, maximizing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_leaves_position_untouched() {
        let mut pos = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
        let fen = pos.fen();
        let mut s = Searcher::default();
        s.search_root(&mut pos, 3);
        assert_eq!(pos.fen(), fen);
        assert_eq!(pos.plies_played(), 0);
    }
}
