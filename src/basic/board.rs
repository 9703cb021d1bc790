use std::fmt::{self, Display, Formatter};

use itertools::iproduct;

use crate::basic::Cell;

/// Number of cells the snake starts with
pub const INITIAL_SNAKE_LEN: i32 = 3;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    ZeroCellSize,
    /// A window dimension is not a multiple of the cell size
    Misaligned { dimension: &'static str, value: u32, cell_size: u32 },
    /// The wall ring must be at least one cell thick
    BorderTooThin { border_offset: u32, cell_size: u32 },
    PlayableAreaTooSmall,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use ConfigError::*;
        match *self {
            ZeroCellSize => write!(f, "cell size must be positive"),
            Misaligned { dimension, value, cell_size } => write!(
                f,
                "{} ({}) is not a multiple of the cell size ({})",
                dimension, value, cell_size
            ),
            BorderTooThin { border_offset, cell_size } => write!(
                f,
                "border offset ({}) is thinner than one cell ({})",
                border_offset, cell_size
            ),
            PlayableAreaTooSmall => write!(f, "playable area too small for the snake and its food"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Pixel geometry of the arena: a `width` x `height` surface cut into
/// square cells with a ring of wall cells `border_offset` pixels thick
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Board {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub border_offset: u32,
}

impl Board {
    /// Full HD window, 8 pixel cells, two cells of wall
    pub const HD: Self = Self { width: 1920, height: 1080, cell_size: 8, border_offset: 16 };

    pub fn validate(&self) -> Result<(), ConfigError> {
        let z = self.cell_size;
        if z == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        for (dimension, value) in [("width", self.width), ("height", self.height)] {
            if value % z != 0 {
                return Err(ConfigError::Misaligned { dimension, value, cell_size: z });
            }
        }
        if self.border_offset < z {
            return Err(ConfigError::BorderTooThin { border_offset: self.border_offset, cell_size: z });
        }
        if self.playable_cols() <= 0 || self.playable_rows() <= 0 {
            return Err(ConfigError::PlayableAreaTooSmall);
        }

        let z = z as i32;
        let center = self.center();
        if (0..INITIAL_SNAKE_LEN).any(|i| !self.is_playable(Cell::new(center.x, center.y - i * z))) {
            return Err(ConfigError::PlayableAreaTooSmall);
        }
        Ok(())
    }

    fn z(&self) -> i32 {
        self.cell_size as i32
    }

    pub fn cols(&self) -> i32 {
        (self.width / self.cell_size) as i32
    }

    pub fn rows(&self) -> i32 {
        (self.height / self.cell_size) as i32
    }

    /// Top-left corner of the playable area, the border offset
    /// rounded up to the grid
    pub fn playable_min(&self) -> Cell {
        let z = self.z();
        let min = (self.border_offset as i32 + z - 1) / z * z;
        Cell::new(min, min)
    }

    pub fn playable_cols(&self) -> i32 {
        let max = self.width as i32 - self.border_offset as i32;
        (max - self.playable_min().x) / self.z()
    }

    pub fn playable_rows(&self) -> i32 {
        let max = self.height as i32 - self.border_offset as i32;
        (max - self.playable_min().y) / self.z()
    }

    /// Length at which the snake fills the whole playable area
    pub fn playable_cells(&self) -> usize {
        (self.playable_cols().max(0) * self.playable_rows().max(0)) as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width as i32).contains(&cell.x) && (0..self.height as i32).contains(&cell.y)
    }

    pub fn is_playable(&self, cell: Cell) -> bool {
        let min = self.playable_min();
        let z = self.z();
        (min.x..min.x + self.playable_cols() * z).contains(&cell.x)
            && (min.y..min.y + self.playable_rows() * z).contains(&cell.y)
    }

    /// The grid-aligned center, where the snake's head starts
    pub fn center(&self) -> Cell {
        let z = self.z();
        Cell::new(self.width as i32 / 2 / z * z, self.height as i32 / 2 / z * z)
    }

    /// Row-major index of an in-bounds cell
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let z = self.z();
        Some(((cell.y / z) * self.cols() + cell.x / z) as usize)
    }

    /// Every cell of the surface in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let z = self.z();
        iproduct!(0..self.rows(), 0..self.cols()).map(move |(row, col)| Cell::new(col * z, row * z))
    }
}


#[test]
fn test_hd_geometry() {
    let board = Board::HD;
    assert_eq!(board.validate(), Ok(()));
    assert_eq!(board.center(), Cell::new(960, 536));
    assert_eq!(board.playable_min(), Cell::new(16, 16));
    assert_eq!(board.playable_cols(), 236);
    assert_eq!(board.playable_rows(), 131);
    assert_eq!(board.playable_cells(), 236 * 131);

    assert!(board.is_playable(Cell::new(16, 16)));
    assert!(board.is_playable(Cell::new(1896, 1056)));
    assert!(!board.is_playable(Cell::new(8, 16)));
    assert!(!board.is_playable(Cell::new(1904, 16)));
    assert!(!board.is_playable(Cell::new(16, 1064)));
}

#[test]
fn test_unaligned_border_is_rounded_up() {
    let board = Board { width: 100, height: 100, cell_size: 10, border_offset: 15 };
    assert_eq!(board.playable_min(), Cell::new(20, 20));
    // 20..85 fits six whole cells
    assert_eq!(board.playable_cols(), 6);
}

#[test]
fn test_validation() {
    let ok = Board::HD;
    assert_eq!(Board { cell_size: 0, ..ok }.validate(), Err(ConfigError::ZeroCellSize));
    assert_eq!(
        Board { width: 1921, ..ok }.validate(),
        Err(ConfigError::Misaligned { dimension: "width", value: 1921, cell_size: 8 }),
    );
    assert_eq!(
        Board { border_offset: 4, ..ok }.validate(),
        Err(ConfigError::BorderTooThin { border_offset: 4, cell_size: 8 }),
    );
    // the wall ring eats everything
    assert_eq!(
        Board { width: 32, height: 32, cell_size: 8, border_offset: 16 }.validate(),
        Err(ConfigError::PlayableAreaTooSmall),
    );
    // room for food but not for a three cell snake
    assert_eq!(
        Board { width: 40, height: 40, cell_size: 8, border_offset: 8 }.validate(),
        Err(ConfigError::PlayableAreaTooSmall),
    );
}

#[test]
fn test_index_and_cells_agree() {
    let board = Board { width: 40, height: 24, cell_size: 8, border_offset: 8 };
    for (i, cell) in board.cells().enumerate() {
        assert_eq!(board.index_of(cell), Some(i));
    }
    assert_eq!(board.cells().count(), 15);
    assert_eq!(board.index_of(Cell::new(40, 0)), None);
    assert_eq!(board.index_of(Cell::new(0, -8)), None);
}
