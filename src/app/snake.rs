use std::collections::VecDeque;

use crate::app::collisions::Crash;
use crate::basic::board::INITIAL_SNAKE_LEN;
use crate::basic::{Cell, Dir};
use crate::error::{Error, ErrorConversion, Result};

/// The cells of the snake, tail at the front, head at the back
// INVARIANT: no cell appears twice
#[derive(Clone, Debug)]
pub struct Body {
    cells: VecDeque<Cell>,
}

impl Body {
    /// Three cells stacked vertically, head at `center` and the
    /// rest of the body above it
    pub fn initialize(center: Cell, cell_size: i32) -> Self {
        let cells = (0..INITIAL_SNAKE_LEN)
            .rev()
            .map(|i| Cell::new(center.x, center.y - i * cell_size))
            .collect();
        Self { cells }
    }

    pub fn head(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    pub fn tail(&self) -> Cell {
        self.cells[0]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Tail to head
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Push `new_head`; unless the snake just ate, drop the tail and
    /// return it
    pub fn advance(&mut self, new_head: Cell, ate_food: bool) -> Result<Option<Cell>> {
        if ate_food {
            self.cells
                .try_reserve(1)
                .map_err(Error::from)
                .with_trace_step("Body::advance")?;
            self.cells.push_back(new_head);
            Ok(None)
        } else {
            // pop first so the buffer never has to grow
            let tail = self.cells.pop_front();
            self.cells.push_back(new_head);
            Ok(tail)
        }
    }
}

/// Where the head ends up after one step, doesn't touch the body
pub fn compute_next(dir: Dir, head: Cell, cell_size: i32) -> Cell {
    head.translate(dir, cell_size)
}

pub struct Snake {
    pub body: Body,
    /// Requested direction, persists until the player picks another
    dir: Dir,
    /// Direction of the last completed step
    last_dir: Dir,
}

impl Snake {
    /// The body starts vertical with the head lowest, so it starts
    /// out heading down
    pub const START_DIR: Dir = Dir::Down;

    pub fn new(center: Cell, cell_size: i32) -> Self {
        Self {
            body: Body::initialize(center, cell_size),
            dir: Self::START_DIR,
            last_dir: Self::START_DIR,
        }
    }

    pub fn dir(&self) -> Dir {
        self.dir
    }

    pub fn steer(&mut self, dir: Dir) {
        self.dir = dir
    }

    /// The cell the head moves into on the next step. Reversing onto the
    /// previous step's direction is a crash, not an ignored input.
    pub fn next_head(&mut self, cell_size: i32) -> std::result::Result<Cell, Crash> {
        if self.dir.is_opposite(self.last_dir) {
            return Err(Crash::Reverse);
        }
        self.last_dir = self.dir;
        Ok(compute_next(self.dir, self.body.head(), cell_size))
    }
}
