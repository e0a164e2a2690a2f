use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Given(u8),
    UserInput(u8),
    Empty,
}

impl Cell {
    pub fn value(&self) -> Option<u8> {
        match self {
            Cell::Given(v) | Cell::UserInput(v) => Some(*v),
            Cell::Empty => None,
        }
    }

    pub fn is_given(&self) -> bool {
        matches!(self, Cell::Given(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

pub type Board = [[Cell; 9]; 9];
pub type SolutionBoard = [[u8; 9]; 9];

pub fn empty_board() -> Board {
    [[Cell::Empty; 9]; 9]
}

/// Turn a carved puzzle grid into a board where every non-zero cell is a given.
pub fn board_from_puzzle(puzzle: &SolutionBoard) -> Board {
    let mut board = empty_board();
    for r in 0..9 {
        for c in 0..9 {
            if puzzle[r][c] != 0 {
                board[r][c] = Cell::Given(puzzle[r][c]);
            }
        }
    }
    board
}

/// Flatten a board to its raw values, 0 for empty.
pub fn board_values(board: &Board) -> SolutionBoard {
    let mut grid = [[0u8; 9]; 9];
    for r in 0..9 {
        for c in 0..9 {
            grid[r][c] = board[r][c].value().unwrap_or(0);
        }
    }
    grid
}
