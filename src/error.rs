use thiserror::Error;

/// Errors surfaced by the race engine and its persistence helpers.
///
/// Everything recoverable (wrong keystroke, out-of-phase input, stale tick)
/// is handled locally and never reaches this type; only misuse at session
/// construction and ambient IO failures do.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("race passage must not be empty")]
    EmptyPassage,

    #[error("race needs exactly one human participant, got {0}")]
    HumanCount(usize),

    #[error("history database error: {0}")]
    History(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv export error: {0}")]
    Export(#[from] csv::Error),
}
