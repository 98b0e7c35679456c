use adaptive_chess::adapt::quality::MoveQuality;
use adaptive_chess::board::Position;
use adaptive_chess::session::{Click, Mover, ReviewCursor, Session};
use adaptive_chess::{EngineConfig, EngineError};
use cozy_chess::Color;
use pretty_assertions::assert_eq;

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn quick_config() -> EngineConfig {
    EngineConfig {
        base_depth: 2,
        quality_depth: 2,
        hint_deep_depth: 3,
        tt_max_entries: 1_000_000,
        ..EngineConfig::seeded(7)
    }
}

fn session() -> Session {
    Session::new(quick_config())
}

#[test]
fn opening_move_is_graded_and_answered() {
    let mut s = session();
    let ex = s.on_human_move("e2", "e4").expect("legal");
    assert_eq!(ex.human.notation, "e2e4");
    assert_eq!(ex.human.mover, Mover::Human);
    assert_eq!(ex.human.quality, MoveQuality::Neutral);
    assert!(!ex.human.alternatives.contains(&"e2e4".to_string()));
    assert_eq!(ex.human.alternatives, vec!["e2e3".to_string()]);

    let reply = ex.reply.expect("engine replies");
    assert_eq!(reply.mover, Mover::Automated);
    assert_eq!(s.history().len(), 2);
    assert_eq!(s.position().side_to_move(), Color::White);
    assert!(!s.searcher().tt().is_empty());
    assert_eq!(s.current_eval(), reply.eval_score);
    assert_eq!(s.move_stats().total(), 1);
}

#[test]
fn illegal_move_changes_nothing() {
    let mut s = session();
    let err = s.on_human_move("e2", "e5").unwrap_err();
    assert!(matches!(err, EngineError::IllegalMove { .. }));
    assert!(matches!(s.on_human_move("z9", "e4"), Err(EngineError::IllegalMove { .. })));
    assert!(matches!(s.play_human_notation("e2e5"), Err(EngineError::UnknownMove(_))));
    assert_eq!(s.position().fen(), START);
    assert!(s.history().is_empty());
    assert_eq!(s.skill().rating(), 1200.0);
}

#[test]
fn wrong_turn_and_finished_games_are_rejected() {
    let black = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
    let mut s = Session::from_fen(quick_config(), black).unwrap();
    assert!(matches!(s.on_human_move("d2", "d4"), Err(EngineError::NotHumanTurn)));

    let mated = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    let mut s = Session::from_fen(quick_config(), mated).unwrap();
    assert!(s.is_game_over());
    assert!(matches!(s.on_human_move("a2", "a3"), Err(EngineError::GameOver)));
    assert!(s.make_automated_move().is_none());
}

#[test]
fn engine_can_move_first_from_a_black_to_move_position() {
    let black = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
    let mut s = Session::from_fen(quick_config(), black).unwrap();
    let e = s.make_automated_move().expect("a reply");
    assert_eq!(e.mover, Mover::Automated);
    assert_eq!(s.position().side_to_move(), Color::White);

    // the human can carry on, and undo stops at the engine's opening move
    s.play_human_notation("d2d4").unwrap();
    assert_eq!(s.history().len(), 3);
    assert!(s.undo());
    assert_eq!(s.history().len(), 1);
    assert_eq!(s.position().side_to_move(), Color::White);
    assert!(!s.undo());

    // after a reset Black is on move again and the engine opens once more
    s.reset();
    assert!(matches!(s.on_human_move("d2", "d4"), Err(EngineError::NotHumanTurn)));
    assert!(s.make_automated_move().is_some());
    assert!(s.on_human_move("d2", "d4").is_ok());
}

#[test]
fn engine_never_moves_for_white() {
    let mut s = session();
    assert!(s.make_automated_move().is_none());
    assert!(s.history().is_empty());
    assert_eq!(s.position().fen(), START);

    s.on_human_move("e2", "e4").unwrap();
    assert_eq!(s.position().side_to_move(), Color::White);
    assert!(s.make_automated_move().is_none());
    assert_eq!(s.history().len(), 2);
}

#[test]
fn undo_after_a_game_ending_human_move_takes_back_one_ply() {
    let fen = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
    let mut s = Session::from_fen(quick_config(), fen).unwrap();
    let ex = s.on_human_move("a1", "a8").unwrap();
    assert!(ex.reply.is_none());
    assert!(s.is_game_over());
    assert_eq!(s.history().len(), 1);
    assert_eq!(s.repetition().len(), 1);

    assert!(s.undo());
    assert_eq!(s.position().fen(), fen);
    assert_eq!(s.position().side_to_move(), Color::White);
    assert!(s.history().is_empty());
    assert!(s.repetition().is_empty());
    assert!(s.on_human_move("a1", "a8").is_ok());
}

#[test]
fn undo_takes_back_a_move_pair() {
    let mut s = session();
    assert!(!s.undo());
    s.on_human_move("d2", "d4").unwrap();
    assert_eq!(s.repetition().len(), 2);
    assert!(s.undo());
    assert_eq!(s.position().fen(), START);
    assert!(s.history().is_empty());
    assert!(s.repetition().is_empty());
    assert_eq!(s.current_eval(), 0);
}

#[test]
fn reset_restores_a_fresh_game() {
    let mut s = session();
    s.play_human_notation("e2e4").unwrap();
    s.play_human_notation("g1f3").unwrap();
    s.reset();
    assert_eq!(s.position().fen(), START);
    assert!(s.history().is_empty());
    assert_eq!(s.skill().rating(), 1200.0);
    assert!(s.repetition().is_empty());
    // cache survives unless configured otherwise
    assert!(!s.searcher().tt().is_empty());

    let mut s = Session::new(EngineConfig { clear_cache_on_reset: true, ..quick_config() });
    s.play_human_notation("e2e4").unwrap();
    s.reset();
    assert!(s.searcher().tt().is_empty());
}

#[test]
fn beast_mode_toggle() {
    let mut s = session();
    assert!(!s.is_beast_mode());
    s.set_beast_mode(true);
    assert!(s.is_beast_mode());
    let ex = s.on_human_move("e2", "e4").unwrap();
    assert!(ex.reply.is_some());
    s.set_beast_mode(false);
    assert!(!s.is_beast_mode());
}

#[test]
fn click_to_move() {
    let mut s = session();
    let e2 = "e2".parse().unwrap();
    let e4 = "e4".parse().unwrap();
    assert!(matches!(s.click(e2).unwrap(), Click::Selected(_)));
    assert_eq!(s.selected_square(), Some(e2));
    assert!(matches!(s.click(e2).unwrap(), Click::Deselected));
    assert_eq!(s.selected_square(), None);
    // empty square with nothing selected
    assert!(matches!(s.click("e5".parse().unwrap()).unwrap(), Click::Deselected));
    s.click(e2).unwrap();
    match s.click(e4).unwrap() {
        Click::Moved(ex) => assert_eq!(ex.human.notation, "e2e4"),
        other => panic!("expected a move, got {other:?}"),
    }
    assert_eq!(s.selected_square(), None);
}

#[test]
fn review_walks_history() {
    let mut s = session();
    s.on_human_move("e2", "e4").unwrap();
    assert!(!s.is_reviewing());
    s.review_prev();
    assert_eq!(s.review_cursor(), ReviewCursor::Ply(1));
    assert_eq!(s.view_fen(), s.history()[1].fen);
    s.review_prev();
    assert_eq!(s.view_fen(), s.history()[0].fen);
    s.go_to(ReviewCursor::Start);
    assert_eq!(s.view_fen(), START);
    s.go_to(ReviewCursor::Ply(99));
    assert_eq!(s.review_cursor(), ReviewCursor::Live);
    assert_eq!(s.view_fen(), s.position().fen());
}

#[test]
fn hints_come_from_the_live_position() {
    let mut s = session();
    let hints = s.analyze_best_moves();
    assert_eq!(hints.len(), 3);
    assert_eq!(s.position().fen(), START);
}

#[test]
fn castling_is_accepted_in_both_forms() {
    let fen = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
    let mut s = Session::from_fen(quick_config(), fen).unwrap();
    let ex = s.play_human_notation("e1h1").unwrap();
    assert_eq!(ex.human.notation, "e1g1");
    let p = Position::from_fen(fen).unwrap();
    assert!(p.find_notation("e1c1").is_some());
}
