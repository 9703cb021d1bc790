use itertools::iproduct;

use crate::app::occupancy::{Occupancy, OccupancyGrid};
use crate::app::palette::Palette;
use crate::basic::Cell;
use crate::surface::Surface;

/// Ways a round can be lost
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Crash {
    Wall,
    Itself,
    /// Turned straight back onto the neck
    Reverse,
}

/// What moving the head into `position` would run into.
/// Out-of-bounds positions read as empty, callers keep the
/// head inside the wall ring.
pub fn classify(grid: &OccupancyGrid, position: Cell) -> Occupancy {
    grid.get(position).unwrap_or(Occupancy::Empty)
}

/// Same question asked of the rendered pixels of the `cell_size` block
/// at `position`. Mixed blocks resolve as wall > snake > food; a block
/// that isn't fully on the surface reads as empty.
pub fn classify_pixels(
    surface: &impl Surface,
    palette: &Palette,
    position: Cell,
    cell_size: u32,
) -> Occupancy {
    if position.x < 0 || position.y < 0 {
        return Occupancy::Empty;
    }
    let (x, y) = (position.x as u32, position.y as u32);
    if x + cell_size > surface.width() || y + cell_size > surface.height() {
        return Occupancy::Empty;
    }

    let mut found = Occupancy::Empty;
    for (dy, dx) in iproduct!(0..cell_size, 0..cell_size) {
        if let Some(color) = surface.get_pixel(x + dx, y + dy) {
            found = found.max(palette.occupancy(color));
        }
        if found == Occupancy::Wall {
            break;
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Board;
    use crate::surface::FrameBuffer;

    fn board() -> Board {
        Board { width: 48, height: 48, cell_size: 8, border_offset: 8 }
    }

    #[test]
    fn test_classify_reads_the_grid() {
        let mut grid = OccupancyGrid::new(board()).unwrap();
        grid.set(Cell::new(16, 16), Occupancy::Snake);
        grid.set(Cell::new(24, 16), Occupancy::Food);

        assert_eq!(classify(&grid, Cell::new(0, 16)), Occupancy::Wall);
        assert_eq!(classify(&grid, Cell::new(16, 16)), Occupancy::Snake);
        assert_eq!(classify(&grid, Cell::new(24, 16)), Occupancy::Food);
        assert_eq!(classify(&grid, Cell::new(32, 32)), Occupancy::Empty);
        assert_eq!(classify(&grid, Cell::new(-8, 16)), Occupancy::Empty);
    }

    #[test]
    fn test_classify_pixels_priority() {
        let palette = Palette::default();
        let mut fb = FrameBuffer::new(48, 48);
        fb.clear(palette.empty);

        fb.fill_block(8, 8, 8, palette.food);
        assert_eq!(classify_pixels(&fb, &palette, Cell::new(8, 8), 8), Occupancy::Food);

        // a single snake pixel beats food, a single wall pixel beats both
        fb.set_pixel(15, 15, palette.snake);
        assert_eq!(classify_pixels(&fb, &palette, Cell::new(8, 8), 8), Occupancy::Snake);
        fb.set_pixel(8, 15, palette.wall);
        assert_eq!(classify_pixels(&fb, &palette, Cell::new(8, 8), 8), Occupancy::Wall);

        assert_eq!(classify_pixels(&fb, &palette, Cell::new(24, 24), 8), Occupancy::Empty);
    }

    #[test]
    fn test_classify_pixels_out_of_bounds() {
        let palette = Palette::default();
        let mut fb = FrameBuffer::new(48, 48);
        fb.clear(palette.wall);
        assert_eq!(classify_pixels(&fb, &palette, Cell::new(44, 0), 8), Occupancy::Empty);
        assert_eq!(classify_pixels(&fb, &palette, Cell::new(-8, 0), 8), Occupancy::Empty);
    }
}
