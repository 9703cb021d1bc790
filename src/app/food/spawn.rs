use std::fmt::{self, Display, Formatter};

use rand::Rng;

use crate::app::collisions::classify;
use crate::app::occupancy::{Occupancy, OccupancyGrid};
use crate::basic::Cell;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SpawnError {
    /// The wall ring leaves no room at all
    AreaTooSmall,
    /// Every playable cell is taken
    ArenaFull,
}

impl Display for SpawnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::AreaTooSmall => write!(f, "playable area too small to place food"),
            SpawnError::ArenaFull => write!(f, "no empty cell left to place food"),
        }
    }
}

/// Random guesses before falling back to picking among the free cells
const MAX_ATTEMPTS: usize = 64;

/// A random empty cell of the playable area. Cheap guesses first, which
/// almost always succeed early in a round; once the arena gets crowded
/// pick uniformly among what's left.
pub fn random_free_cell(grid: &OccupancyGrid, rng: &mut impl Rng) -> Result<Cell, SpawnError> {
    let board = grid.board();
    let (cols, rows) = (board.playable_cols(), board.playable_rows());
    if cols <= 0 || rows <= 0 {
        return Err(SpawnError::AreaTooSmall);
    }

    let min = board.playable_min();
    let z = board.cell_size as i32;
    for _ in 0..MAX_ATTEMPTS {
        let candidate = Cell::new(
            rng.gen_range(0..cols) * z + min.x,
            rng.gen_range(0..rows) * z + min.y,
        );
        if classify(grid, candidate) == Occupancy::Empty {
            return Ok(candidate);
        }
    }

    let free = grid.free_cells().count();
    if free == 0 {
        return Err(SpawnError::ArenaFull);
    }
    grid.free_cells()
        .nth(rng.gen_range(0..free))
        .ok_or(SpawnError::ArenaFull)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Board;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_board() -> Board {
        Board { width: 48, height: 48, cell_size: 8, border_offset: 8 }
    }

    #[test]
    fn test_spawns_only_on_empty_playable_cells() {
        let board = small_board();
        let mut grid = OccupancyGrid::new(board).unwrap();
        for x in [8, 16, 24] {
            for y in [8, 16, 24, 32] {
                grid.set(Cell::new(x, y), Occupancy::Snake);
            }
        }
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let cell = random_free_cell(&grid, &mut rng).unwrap();
            assert!(board.is_playable(cell), "{}", cell);
            assert!(cell.is_aligned(8));
            assert_eq!(classify(&grid, cell), Occupancy::Empty, "{}", cell);
        }
    }

    #[test]
    fn test_last_free_cell_is_found() {
        let board = small_board();
        let mut grid = OccupancyGrid::new(board).unwrap();
        let free: Vec<_> = grid.free_cells().collect();
        let last = free[free.len() / 2];
        for &cell in &free {
            if cell != last {
                grid.set(cell, Occupancy::Snake);
            }
        }

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(random_free_cell(&grid, &mut rng), Ok(last));
        }
    }

    #[test]
    fn test_full_arena_is_reported() {
        let board = small_board();
        let mut grid = OccupancyGrid::new(board).unwrap();
        let free: Vec<_> = grid.free_cells().collect();
        for cell in free {
            grid.set(cell, Occupancy::Snake);
        }
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(random_free_cell(&grid, &mut rng), Err(SpawnError::ArenaFull));
    }
}
