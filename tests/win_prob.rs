use adaptive_chess::search::eval::win_prob;
use proptest::prelude::*;

#[test]
fn linear_between_clamps() {
    assert_eq!(win_prob(-200), 40.0);
    assert_eq!(win_prob(-250), 37.5);
    assert_eq!(win_prob(-400), 30.0);
    assert_eq!(win_prob(-100), 45.0);
    assert_eq!(win_prob(-800), 10.0);
    assert_eq!(win_prob(900), 95.0);
}

proptest! {
    #[test]
    fn prop_bounded(score in -100_000i32..100_000) {
        let p = win_prob(score);
        prop_assert!((5.0..=95.0).contains(&p));
    }

    #[test]
    fn prop_monotone(a in -5_000i32..5_000, b in -5_000i32..5_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(win_prob(lo) <= win_prob(hi));
    }
}
