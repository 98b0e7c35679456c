use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("FEN error: {0}")]
    InvalidFen(String),

    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    #[error("illegal move: {from}{to}")]
    IllegalMove { from: String, to: String },

    #[error("unknown move `{0}`")]
    UnknownMove(String),

    #[error("game is over")]
    GameOver,

    #[error("not the human side's turn")]
    NotHumanTurn,

    #[error("config I/O: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("config parse: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
