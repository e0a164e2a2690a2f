use log::debug;
use rand::RngExt;
use rand::rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, SolutionBoard, empty_board};
use crate::difficulty::Difficulty;
use crate::error::GameError;
use crate::puzzle::generate_puzzle_with;
use crate::save::SavedGame;
use crate::validation::get_all_conflicts;

/// Hints granted at the start of every game.
pub const STARTING_HINTS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Completed,
    Revealed,
}

/// Result of a progress check: per-cell correctness against the stored
/// solution. A cell counts as correct iff it is filled and matches; empty
/// cells report false.
#[derive(Clone, Copy, Debug)]
pub struct Progress {
    pub correct: [[bool; 9]; 9],
    pub complete: bool,
}

/// One accepted move, as recorded on the undo/redo stacks.
#[derive(Clone, Copy, Debug)]
struct GameMove {
    row: usize,
    col: usize,
    old: Cell,
    new: Cell,
}

/// A single-player game: the puzzle board, its solution, and play-session
/// bookkeeping. All operations are synchronous and mutate only this value;
/// errors are reported to the caller, never surfaced as panics.
pub struct GameSession {
    board: Board,
    solution: SolutionBoard,
    difficulty: Difficulty,
    state: SessionState,
    undo_stack: Vec<GameMove>,
    redo_stack: Vec<GameMove>,
    conflicts: Vec<(usize, usize)>,
    mistakes: u32,
    hints_remaining: u32,
    elapsed_secs: u64,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            board: empty_board(),
            solution: [[0u8; 9]; 9],
            difficulty: Difficulty::Easy,
            state: SessionState::NotStarted,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            conflicts: Vec::new(),
            mistakes: 0,
            hints_remaining: STARTING_HINTS,
            elapsed_secs: 0,
        }
    }

    /// Generate a fresh puzzle at `difficulty` and begin play. Returns the
    /// puzzle board (givens only) and its solution.
    pub fn start_new_game(&mut self, difficulty: Difficulty) -> (Board, SolutionBoard) {
        self.start_new_game_with(difficulty, &mut rng())
    }

    /// Like [`start_new_game`](Self::start_new_game), with an injected
    /// randomness source.
    pub fn start_new_game_with<R: RngExt>(
        &mut self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> (Board, SolutionBoard) {
        let (board, solution) = generate_puzzle_with(difficulty, rng);
        self.board = board;
        self.solution = solution;
        self.difficulty = difficulty;
        self.state = SessionState::InProgress;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.conflicts.clear();
        self.mistakes = 0;
        self.hints_remaining = STARTING_HINTS;
        self.elapsed_secs = 0;
        debug!("new {} game started", difficulty.label());
        (board, solution)
    }

    /// Write `value` into (row, col). A value of 0 erases a player entry.
    pub fn apply_move(&mut self, row: usize, col: usize, value: u8) -> Result<(), GameError> {
        if self.state != SessionState::InProgress {
            return Err(GameError::GameOver);
        }
        if value > 9 {
            return Err(GameError::InvalidValue(value));
        }
        if row >= 9 || col >= 9 {
            return Err(GameError::InvalidCell(row, col));
        }
        if self.board[row][col].is_given() {
            return Err(GameError::InvalidCell(row, col));
        }

        let old = self.board[row][col];
        let new = if value == 0 {
            Cell::Empty
        } else {
            Cell::UserInput(value)
        };
        self.board[row][col] = new;
        self.undo_stack.push(GameMove { row, col, old, new });
        self.redo_stack.clear();

        if value != 0 && value != self.solution[row][col] {
            self.mistakes += 1;
        }
        self.conflicts = get_all_conflicts(&self.board);
        Ok(())
    }

    /// Compare every filled cell against the solution. Detecting a fully
    /// correct board moves the session to `Completed`.
    pub fn check_progress(&mut self) -> Progress {
        let mut correct = [[false; 9]; 9];
        let mut complete = true;
        for r in 0..9 {
            for c in 0..9 {
                correct[r][c] = self.board[r][c].value() == Some(self.solution[r][c]);
                if !correct[r][c] {
                    complete = false;
                }
            }
        }
        if complete && self.state == SessionState::InProgress {
            self.state = SessionState::Completed;
            debug!("puzzle completed with {} mistakes", self.mistakes);
        }
        Progress { correct, complete }
    }

    /// Discard all player entries, reverting the board to its givens.
    /// Mistake count and hint budget describe the whole game and survive.
    pub fn reset(&mut self) {
        if self.state != SessionState::InProgress {
            return;
        }
        for r in 0..9 {
            for c in 0..9 {
                if !self.board[r][c].is_given() {
                    self.board[r][c] = Cell::Empty;
                }
            }
        }
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.conflicts.clear();
    }

    /// Fill every non-given cell from the solution and end the game.
    pub fn reveal_solution(&mut self) {
        if self.state != SessionState::InProgress {
            return;
        }
        for r in 0..9 {
            for c in 0..9 {
                if !self.board[r][c].is_given() {
                    self.board[r][c] = Cell::UserInput(self.solution[r][c]);
                }
            }
        }
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.conflicts.clear();
        self.state = SessionState::Revealed;
        debug!("solution revealed");
    }

    /// Look up the solution digit for an empty cell, spending one hint.
    /// The board is not modified; the caller applies the digit as a move.
    pub fn hint(&mut self, row: usize, col: usize) -> Result<u8, GameError> {
        if self.state != SessionState::InProgress {
            return Err(GameError::GameOver);
        }
        if row >= 9 || col >= 9 {
            return Err(GameError::InvalidCell(row, col));
        }
        if self.hints_remaining == 0 || !self.board[row][col].is_empty() {
            return Err(GameError::HintUnavailable);
        }
        self.hints_remaining -= 1;
        Ok(self.solution[row][col])
    }

    /// Revert the most recent move. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.state != SessionState::InProgress {
            return false;
        }
        match self.undo_stack.pop() {
            Some(mv) => {
                self.board[mv.row][mv.col] = mv.old;
                self.redo_stack.push(mv);
                self.conflicts = get_all_conflicts(&self.board);
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone move. Returns false if there was
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        if self.state != SessionState::InProgress {
            return false;
        }
        match self.redo_stack.pop() {
            Some(mv) => {
                self.board[mv.row][mv.col] = mv.new;
                self.undo_stack.push(mv);
                self.conflicts = get_all_conflicts(&self.board);
                true
            }
            None => false,
        }
    }

    /// Snapshot the session for persistence. Given-ness travels inside the
    /// board's cells, so the initial puzzle is saved, not re-derived.
    pub fn save(&self) -> SavedGame {
        SavedGame {
            board: self.board,
            solution: self.solution,
            difficulty: self.difficulty,
            elapsed_secs: self.elapsed_secs,
            hints_remaining: self.hints_remaining,
            mistakes: self.mistakes,
        }
    }

    /// Rebuild a session from a saved snapshot. The resumed game is in
    /// progress; undo history does not survive a save.
    pub fn resume(saved: SavedGame) -> Self {
        let conflicts = get_all_conflicts(&saved.board);
        Self {
            board: saved.board,
            solution: saved.solution,
            difficulty: saved.difficulty,
            state: SessionState::InProgress,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            conflicts,
            mistakes: saved.mistakes,
            hints_remaining: saved.hints_remaining,
            elapsed_secs: saved.elapsed_secs,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn solution(&self) -> &SolutionBoard {
        &self.solution
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Cells currently conflicting with a row/col/box neighbour, for display.
    pub fn conflicts(&self) -> &[(usize, usize)] {
        &self.conflicts
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hints_remaining
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// The core runs no timers; the UI ticks elapsed time and stores it here
    /// so it round-trips through save/load.
    pub fn set_elapsed_secs(&mut self, secs: u64) {
        self.elapsed_secs = secs;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
