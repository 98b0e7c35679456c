use adaptive_chess::board::Position;
use adaptive_chess::search::alphabeta::{SearchParams, Searcher, SCORE_INF};
use adaptive_chess::search::eval::evaluate;
use proptest::prelude::*;

/// Plain minimax with no pruning, for comparison.
fn minimax(pos: &mut Position, depth: u32, maximizing: bool) -> i32 {
    if depth == 0 || pos.is_game_over() {
        return evaluate(pos.board());
    }
    let mut best = if maximizing { -SCORE_INF } else { SCORE_INF };
    for mv in pos.moves() {
        let mut next = pos.apply(mv);
        let v = minimax(&mut next, depth - 1, !maximizing);
        best = if maximizing { best.max(v) } else { best.min(v) };
    }
    best
}

fn uncached() -> Searcher {
    Searcher::with_params(SearchParams { use_tt: false, order_captures: true })
}

#[test]
fn matches_minimax_on_fixed_positions() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        "4k3/8/8/8/5Q2/8/8/2b4K b - - 0 1",
        "r3k2r/ppp2ppp/2n5/3qp3/3P4/2N5/PPP2PPP/R2QK2R b KQkq - 0 10",
    ];
    for fen in fens {
        for depth in 1..=3 {
            let mut pos = Position::from_fen(fen).unwrap();
            let maximizing = fen.contains(" w ");
            let expected = minimax(&mut pos, depth, maximizing);
            let got = uncached().search(&mut pos, depth, -SCORE_INF, SCORE_INF, maximizing).score;
            assert_eq!(got, expected, "{fen} at depth {depth}");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_alphabeta_equals_minimax(picks in proptest::collection::vec(any::<u16>(), 0..10)) {
        let mut pos = Position::startpos();
        for p in picks {
            let moves = pos.moves();
            if moves.is_empty() || pos.is_game_over() { break; }
            pos.play(moves[p as usize % moves.len()]);
        }
        let maximizing = pos.side_to_move() == cozy_chess::Color::White;
        let expected = minimax(&mut pos, 2, maximizing);
        let got = uncached().search(&mut pos, 2, -SCORE_INF, SCORE_INF, maximizing).score;
        prop_assert_eq!(got, expected);
    }
}
