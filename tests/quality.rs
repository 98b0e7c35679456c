use adaptive_chess::adapt::quality::{assess_automated, assess_human, MoveQuality};
use pretty_assertions::assert_eq;

#[test]
fn thresholds_map_to_labels() {
    let cases = [
        (25.0, MoveQuality::Excellent),
        (20.0, MoveQuality::Excellent),
        (15.0, MoveQuality::Good),
        (10.0, MoveQuality::Good),
        (0.0, MoveQuality::Neutral),
        (-9.9, MoveQuality::Neutral),
        (-10.0, MoveQuality::Bad),
        (-15.0, MoveQuality::Bad),
        (-20.0, MoveQuality::Terrible),
        (-25.0, MoveQuality::Terrible),
    ];
    for (delta, want) in cases {
        assert_eq!(MoveQuality::from_win_prob_delta(delta), want, "delta {delta}");
    }
}

#[test]
fn human_gain_is_good() {
    let a = assess_human(0, 300);
    assert_eq!(a.quality, MoveQuality::Good);
    assert_eq!(a.eval_delta, 300);
    assert_eq!(a.win_prob_delta, 15.0);
}

#[test]
fn human_blunder_is_terrible() {
    assert_eq!(assess_human(0, -500).quality, MoveQuality::Terrible);
    assert_eq!(assess_human(100, -150).quality, MoveQuality::Bad);
}

#[test]
fn automated_gain_is_measured_from_black_side() {
    let a = assess_automated(0, -200);
    assert_eq!(a.quality, MoveQuality::Good);
    assert_eq!(a.eval_delta, 200);
    assert_eq!(a.win_prob_delta, 10.0);
    assert_eq!(assess_automated(0, 0).quality, MoveQuality::Neutral);
    assert_eq!(assess_automated(0, 500).quality, MoveQuality::Terrible);
}

#[test]
fn display_names() {
    let names: Vec<String> = MoveQuality::ALL.iter().map(|q| q.to_string()).collect();
    assert_eq!(names, vec!["Excellent", "Good", "Neutral", "Bad", "Terrible"]);
}
