use crate::app::occupancy::OccupancyGrid;
use crate::app::palette::Palette;
use crate::basic::Cell;
use crate::surface::Surface;

fn paint_cell(surface: &mut impl Surface, grid: &OccupancyGrid, palette: &Palette, cell: Cell) {
    if let Some(occupancy) = grid.get(cell) {
        let size = grid.board().cell_size;
        surface.fill_block(cell.x as u32, cell.y as u32, size, palette.color(occupancy));
    }
}

/// Repaint only what changed since the last call
pub fn draw_changes(surface: &mut impl Surface, grid: &mut OccupancyGrid, palette: &Palette) {
    for cell in grid.take_dirty() {
        paint_cell(surface, grid, palette, cell);
    }
}

/// Repaint everything, used when a round starts on a surface that
/// still shows something else
pub fn draw_all(surface: &mut impl Surface, grid: &mut OccupancyGrid, palette: &Palette) {
    grid.take_dirty();
    surface.clear(palette.empty);
    let board = *grid.board();
    for cell in board.cells() {
        paint_cell(surface, grid, palette, cell);
    }
}
