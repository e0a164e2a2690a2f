use log::debug;
use rand::RngExt;
use rand::rng;
use rand::seq::SliceRandom;

use crate::board::{Board, SolutionBoard, board_from_puzzle};
use crate::difficulty::Difficulty;

/// Check if placing `val` at (row, col) is valid on a raw u8 grid.
/// Empty cells hold 0 and never count as a duplicate.
pub fn is_valid_placement(grid: &SolutionBoard, row: usize, col: usize, val: u8) -> bool {
    for c in 0..9 {
        if grid[row][c] == val {
            return false;
        }
    }
    for r in 0..9 {
        if grid[r][col] == val {
            return false;
        }
    }
    let box_r = (row / 3) * 3;
    let box_c = (col / 3) * 3;
    for r in box_r..box_r + 3 {
        for c in box_c..box_c + 3 {
            if grid[r][c] == val {
                return false;
            }
        }
    }
    true
}

/// Fill the grid in place by backtracking over cells in row-major order,
/// trying candidate digits in a freshly shuffled order at each cell.
/// Returns true if the grid was completed.
fn fill_grid<R: RngExt>(grid: &mut SolutionBoard, rng: &mut R) -> bool {
    for row in 0..9 {
        for col in 0..9 {
            if grid[row][col] == 0 {
                let mut vals: Vec<u8> = (1..=9).collect();
                vals.shuffle(rng);
                for val in vals {
                    if is_valid_placement(grid, row, col, val) {
                        grid[row][col] = val;
                        if fill_grid(grid, rng) {
                            return true;
                        }
                        grid[row][col] = 0;
                    }
                }
                return false;
            }
        }
    }
    true
}

/// Generate a complete valid solution grid with the supplied randomness source.
pub fn generate_solution_with<R: RngExt>(rng: &mut R) -> SolutionBoard {
    let mut grid = [[0u8; 9]; 9];
    let solved = fill_grid(&mut grid, rng);
    // An empty 9x9 grid is always completable; exhaustion here is a logic bug.
    assert!(solved, "backtracking exhausted on an empty grid");
    grid
}

/// Generate a complete valid solution grid.
pub fn generate_solution() -> SolutionBoard {
    generate_solution_with(&mut rng())
}

/// Carve a puzzle out of `solution`, keeping exactly `num_filled` cells.
///
/// Removal order is a uniform shuffle of all 81 positions. The carved puzzle
/// is not checked for solution uniqueness: play is always validated against
/// the original `solution`, so an alternate completion of the carved grid
/// counts as wrong.
pub fn carve_puzzle_with<R: RngExt>(
    solution: &SolutionBoard,
    num_filled: usize,
    rng: &mut R,
) -> SolutionBoard {
    let num_filled = num_filled.min(81);
    let cells_to_remove = 81 - num_filled;

    let mut positions: Vec<(usize, usize)> = Vec::with_capacity(81);
    for r in 0..9 {
        for c in 0..9 {
            positions.push((r, c));
        }
    }
    positions.shuffle(rng);

    let mut puzzle = *solution;
    for &(r, c) in positions.iter().take(cells_to_remove) {
        puzzle[r][c] = 0;
    }
    puzzle
}

/// Carve a puzzle out of `solution`, keeping exactly `num_filled` cells.
pub fn carve_puzzle(solution: &SolutionBoard, num_filled: usize) -> SolutionBoard {
    carve_puzzle_with(solution, num_filled, &mut rng())
}

/// Generate a puzzle with the given difficulty, using the supplied randomness
/// source. Returns the puzzle board (givens only) and its solution.
pub fn generate_puzzle_with<R: RngExt>(
    difficulty: Difficulty,
    rng: &mut R,
) -> (Board, SolutionBoard) {
    let solution = generate_solution_with(rng);
    let puzzle = carve_puzzle_with(&solution, difficulty.num_filled(), rng);
    debug!(
        "generated {} puzzle with {} givens",
        difficulty.label(),
        difficulty.num_filled()
    );
    (board_from_puzzle(&puzzle), solution)
}

/// Generate a puzzle with the given difficulty.
pub fn generate_puzzle(difficulty: Difficulty) -> (Board, SolutionBoard) {
    generate_puzzle_with(difficulty, &mut rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_valid_solution(grid: &SolutionBoard) {
        for row in 0..9 {
            let mut seen = [false; 10];
            for col in 0..9 {
                let v = grid[row][col] as usize;
                assert!((1..=9).contains(&v), "cell out of range");
                assert!(!seen[v], "duplicate {} in row {}", v, row);
                seen[v] = true;
            }
        }
        for col in 0..9 {
            let mut seen = [false; 10];
            for row in 0..9 {
                let v = grid[row][col] as usize;
                assert!(!seen[v], "duplicate {} in col {}", v, col);
                seen[v] = true;
            }
        }
        for box_r in (0..9).step_by(3) {
            for box_c in (0..9).step_by(3) {
                let mut seen = [false; 10];
                for r in box_r..box_r + 3 {
                    for c in box_c..box_c + 3 {
                        let v = grid[r][c] as usize;
                        assert!(!seen[v], "duplicate {} in box ({},{})", v, box_r, box_c);
                        seen[v] = true;
                    }
                }
            }
        }
    }

    #[test]
    fn generated_solutions_are_valid() {
        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate_solution_with(&mut rng);
            assert_valid_solution(&grid);
        }
    }

    #[test]
    fn same_seed_same_solution() {
        let a = generate_solution_with(&mut StdRng::seed_from_u64(7));
        let b = generate_solution_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        // Not guaranteed for any single pair, but 10 identical grids in a row
        // would mean the shuffle is not doing its job.
        let base = generate_solution_with(&mut StdRng::seed_from_u64(0));
        let any_differs =
            (1..=10u64).any(|s| generate_solution_with(&mut StdRng::seed_from_u64(s)) != base);
        assert!(any_differs);
    }

    #[test]
    fn rejects_duplicates_in_row_col_box() {
        let mut grid = [[0u8; 9]; 9];
        grid[0][0] = 5;
        assert!(!is_valid_placement(&grid, 0, 8, 5)); // same row
        assert!(!is_valid_placement(&grid, 8, 0, 5)); // same col
        assert!(!is_valid_placement(&grid, 1, 1, 5)); // same box
        assert!(is_valid_placement(&grid, 4, 4, 5));
        assert!(is_valid_placement(&grid, 0, 8, 6));
    }

    #[test]
    fn empty_cells_never_match() {
        let grid = [[0u8; 9]; 9];
        for v in 1..=9 {
            assert!(is_valid_placement(&grid, 4, 4, v));
        }
    }

    #[test]
    fn carve_keeps_exact_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let solution = generate_solution_with(&mut rng);
        for num_filled in [17, 30, 45, 81] {
            let puzzle = carve_puzzle_with(&solution, num_filled, &mut rng);
            let mut kept = 0;
            for r in 0..9 {
                for c in 0..9 {
                    if puzzle[r][c] != 0 {
                        assert_eq!(puzzle[r][c], solution[r][c]);
                        kept += 1;
                    }
                }
            }
            assert_eq!(kept, num_filled);
        }
    }

    #[test]
    fn carve_zero_empties_everything() {
        let mut rng = StdRng::seed_from_u64(1);
        let solution = generate_solution_with(&mut rng);
        let puzzle = carve_puzzle_with(&solution, 0, &mut rng);
        assert_eq!(puzzle, [[0u8; 9]; 9]);
    }

    #[test]
    fn generate_puzzle_marks_givens() {
        let mut rng = StdRng::seed_from_u64(9);
        let (board, solution) = generate_puzzle_with(Difficulty::Medium, &mut rng);
        assert_valid_solution(&solution);
        let mut givens = 0;
        for r in 0..9 {
            for c in 0..9 {
                match board[r][c] {
                    Cell::Given(v) => {
                        assert_eq!(v, solution[r][c]);
                        givens += 1;
                    }
                    Cell::Empty => {}
                    Cell::UserInput(_) => panic!("fresh puzzle has user input"),
                }
            }
        }
        assert_eq!(givens, Difficulty::Medium.num_filled());
    }
}
