use crate::basic::{Board, Cell};
use crate::error::{Error, ErrorConversion, Result};

/// What a grid cell holds. Declared in increasing collision priority.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Occupancy {
    Empty,
    Food,
    Snake,
    Wall,
}

/// The authoritative state of the arena, one entry per grid cell.
/// Whatever is on screen is drawn from this.
pub struct OccupancyGrid {
    board: Board,
    cells: Vec<Occupancy>,
    // cells changed since the last `take_dirty`, may contain duplicates
    dirty: Vec<Cell>,
}

impl OccupancyGrid {
    /// Everything outside the playable area is wall, the rest is empty.
    /// All cells start dirty.
    pub fn new(board: Board) -> Result<Self> {
        let len = (board.cols() * board.rows()) as usize;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(Error::from).with_trace_step("OccupancyGrid::new")?;
        cells.extend(board.cells().map(|cell| {
            if board.is_playable(cell) {
                Occupancy::Empty
            } else {
                Occupancy::Wall
            }
        }));

        Ok(Self { board, cells, dirty: board.cells().collect() })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// None when out of bounds
    pub fn get(&self, cell: Cell) -> Option<Occupancy> {
        self.board.index_of(cell).map(|i| self.cells[i])
    }

    /// Returns false (and changes nothing) when out of bounds
    pub fn set(&mut self, cell: Cell, occupancy: Occupancy) -> bool {
        match self.board.index_of(cell) {
            Some(i) => {
                if self.cells[i] != occupancy {
                    self.cells[i] = occupancy;
                    self.dirty.push(cell);
                }
                true
            }
            None => false,
        }
    }

    pub fn take_dirty(&mut self) -> Vec<Cell> {
        std::mem::take(&mut self.dirty)
    }

    /// Playable cells that are currently empty, row-major
    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.board
            .cells()
            .zip(&self.cells)
            .filter(|&(_, &occupancy)| occupancy == Occupancy::Empty)
            .map(|(cell, _)| cell)
    }

    pub fn count(&self, occupancy: Occupancy) -> usize {
        self.cells.iter().filter(|&&o| o == occupancy).count()
    }
}

#[test]
fn test_walls_surround_playable_area() {
    let board = Board { width: 48, height: 40, cell_size: 8, border_offset: 8 };
    let grid = OccupancyGrid::new(board).unwrap();

    for cell in board.cells() {
        let expected = if board.is_playable(cell) { Occupancy::Empty } else { Occupancy::Wall };
        assert_eq!(grid.get(cell), Some(expected), "{}", cell);
    }
    // 6x5 cells with a 4x3 hole in the middle
    assert_eq!(grid.count(Occupancy::Wall), 30 - 12);
    assert_eq!(grid.free_cells().count(), 12);
    assert_eq!(grid.get(Cell::new(48, 0)), None);
}

#[test]
fn test_only_real_changes_are_dirty() {
    let board = Board { width: 48, height: 40, cell_size: 8, border_offset: 8 };
    let mut grid = OccupancyGrid::new(board).unwrap();
    assert_eq!(grid.take_dirty().len(), 30);

    let cell = Cell::new(16, 16);
    assert!(grid.set(cell, Occupancy::Snake));
    assert!(grid.set(cell, Occupancy::Snake));
    assert!(!grid.set(Cell::new(-8, 0), Occupancy::Food));
    assert_eq!(grid.take_dirty(), vec![cell]);
    assert!(grid.take_dirty().is_empty());
}
