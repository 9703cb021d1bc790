use crate::basic::Dir;

/// Top-left pixel of a grid cell. Every coordinate handled by the
/// game is a multiple of the cell size.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Add, Sub, Display)]
#[display(fmt = "({}, {})", x, y)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_aligned(self, cell_size: i32) -> bool {
        self.x % cell_size == 0 && self.y % cell_size == 0
    }

    /// One cell over in the given direction
    #[must_use]
    pub fn translate(self, dir: Dir, cell_size: i32) -> Self {
        let (dx, dy) = dir.offset();
        self + Self::new(dx * cell_size, dy * cell_size)
    }
}

#[test]
fn test_translate_moves_along_one_axis() {
    let cell_size = 8;
    for cell in [Cell::new(960, 536), Cell::new(16, 16), Cell::new(0, 0)] {
        for dir in Dir::iter() {
            let next = cell.translate(dir, cell_size);
            let delta = next - cell;
            assert!(
                (delta.x.abs() == cell_size && delta.y == 0)
                    || (delta.y.abs() == cell_size && delta.x == 0),
                "{} -> {} ({:?})",
                cell,
                next,
                dir,
            );
            assert!(next.is_aligned(cell_size));
        }
    }
}

#[test]
fn test_display() {
    assert_eq!(Cell::new(3, -4).to_string(), "(3, -4)");
}
