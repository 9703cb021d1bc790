pub use frame_buffer::FrameBuffer;

use crate::basic::Dir;

mod frame_buffer;

/// 24-bit `0xRRGGBB`
pub type Rgb = u32;

/// Keys the game reacts to, anything else is dropped by the frontend
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Confirm,
}

impl Key {
    pub fn dir(self) -> Option<Dir> {
        match self {
            Key::Up => Some(Dir::Up),
            Key::Down => Some(Dir::Down),
            Key::Left => Some(Dir::Left),
            Key::Right => Some(Dir::Right),
            Key::Confirm => None,
        }
    }
}

/// A pixel surface with non-blocking input, the only thing the game
/// needs from a windowing backend. Creating and destroying the surface
/// is left to the constructor and `Drop` of the implementor.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Out-of-bounds writes are ignored
    fn set_pixel(&mut self, x: u32, y: u32, color: Rgb);
    /// None when out of bounds
    fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb>;

    /// Make everything drawn since the last call visible
    fn present(&mut self);

    /// The oldest pending key press, never blocks
    fn poll_key(&mut self) -> Option<Key>;
    /// Whether the user asked to close the game
    fn poll_quit(&mut self) -> bool;

    fn fill_block(&mut self, x: u32, y: u32, size: u32, color: Rgb) {
        for dy in 0..size {
            for dx in 0..size {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    fn clear(&mut self, color: Rgb) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.set_pixel(x, y, color);
            }
        }
    }
}
