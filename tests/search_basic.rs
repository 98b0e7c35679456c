use adaptive_chess::board::Position;
use adaptive_chess::search::alphabeta::{Searcher, SCORE_INF};
use adaptive_chess::search::eval::evaluate;

#[test]
fn depth_zero_returns_static_eval() {
    let mut pos = Position::startpos();
    let mut s = Searcher::default();
    let r = s.search(&mut pos, 0, -SCORE_INF, SCORE_INF, true);
    assert_eq!(r.score, evaluate(pos.board()));
    assert!(r.pv.is_empty());
}

#[test]
fn checkmated_side_gets_static_eval_and_no_line() {
    // fool's mate, White is mated
    let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    let mut pos = Position::from_fen(fen).expect("valid fen");
    assert!(pos.is_checkmate());
    for depth in [0, 3] {
        let mut s = Searcher::default();
        let r = s.search(&mut pos, depth, -SCORE_INF, SCORE_INF, true);
        assert_eq!(r.score, evaluate(pos.board()));
        assert!(r.pv.is_empty());
    }
}

#[test]
fn stalemate_is_terminal() {
    let mut pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("valid fen");
    assert!(pos.is_stalemate());
    let mut s = Searcher::default();
    assert!(s.search(&mut pos, 0, -SCORE_INF, SCORE_INF, false).pv.is_empty());
    let r = s.search_root(&mut pos, 4);
    assert_eq!(r.score, evaluate(pos.board()));
    assert!(r.pv.is_empty());
}

#[test]
fn search_prefers_winning_queen_capture() {
    let fen = "k7/8/8/8/8/8/3qQ3/7K w - - 0 1";
    let mut pos = Position::from_fen(fen).expect("valid fen");
    let mut s = Searcher::default();
    let r = s.search_root(&mut pos, 1);
    assert_eq!(r.pv.first().map(String::as_str), Some("e2d2"), "got {:?}", r.pv);
    assert!(r.score > 800);
}

#[test]
fn black_minimizes() {
    let fen = "k7/8/8/8/8/8/3qQ3/7K b - - 0 1";
    let mut pos = Position::from_fen(fen).expect("valid fen");
    let mut s = Searcher::default();
    let r = s.search_root(&mut pos, 2);
    assert_eq!(r.pv.first().map(String::as_str), Some("d2e2"), "got {:?}", r.pv);
    assert!(r.score < -800);
}

#[test]
fn pv_length_matches_depth_in_quiet_positions() {
    let mut pos = Position::startpos();
    let mut s = Searcher::default();
    let r = s.search_root(&mut pos, 3);
    assert_eq!(r.pv.len(), 3, "pv {:?}", r.pv);
    // every PV move must be legal in sequence
    let mut replay = Position::startpos();
    for m in &r.pv {
        replay.make_move_notation(m).expect("pv move legal");
    }
}
