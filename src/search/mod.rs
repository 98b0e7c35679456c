pub mod alphabeta;
pub mod eval;
pub mod hint;
pub mod tt;

pub use alphabeta::{SearchParams, SearchResult, Searcher, SCORE_INF};
pub use eval::{evaluate, win_prob};
pub use hint::{analyze, Hint, HintParams};
