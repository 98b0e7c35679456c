//! Adaptive chess opponent: a small alpha-beta searcher plus a policy that picks
//! moves to keep the human's winning chances in a target band.
pub mod adapt;
pub mod board;
pub mod config;
pub mod error;
pub mod search;
pub mod selfplay;
pub mod session;

pub use board::{Outcome, Position};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use session::Session;
