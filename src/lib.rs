pub mod board;
pub mod difficulty;
pub mod error;
pub mod puzzle;
pub mod save;
pub mod session;
pub mod validation;

pub use board::{Board, Cell, SolutionBoard};
pub use difficulty::Difficulty;
pub use error::GameError;
pub use save::SavedGame;
pub use session::{GameSession, Progress, SessionState};
