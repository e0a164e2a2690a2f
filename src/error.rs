use thiserror::Error;

/// Recoverable errors reported to the UI collaborator. None of these abort
/// the session; the caller decides whether and how to surface them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("value {0} is outside 0-9")]
    InvalidValue(u8),
    #[error("cell ({0}, {1}) cannot be changed")]
    InvalidCell(usize, usize),
    #[error("the game is over")]
    GameOver,
    #[error("no hint available")]
    HintUnavailable,
}
