use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Deck parsing error: {0}")]
    DeckParse(String),

    #[error("Deck has no panels")]
    EmptyDeck,

    #[error("Panel index {index} out of range for a deck of {len} panels")]
    PanelOutOfRange { index: usize, len: usize },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
