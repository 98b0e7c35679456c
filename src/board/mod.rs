pub mod cozy;

pub use cozy::{parse_square, piece_char, MoveGuard, MoveInfo, Outcome, Position};
