pub use board::Board;
pub use cell::Cell;
pub use dir::Dir;

pub mod board;
mod cell;
mod dir;
