use std::ops::Neg;

use static_assertions::const_assert_eq;
use Dir::*;

// the numbering is chosen so that opposite directions always sum to
// OPPOSITE_SUM, which is what reverse-turn detection relies on
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Dir {
    Left = 0,
    Up = 1,
    Down = 2,
    Right = 3,
}

const_assert_eq!(Left as u8 + Right as u8, Dir::OPPOSITE_SUM);
const_assert_eq!(Up as u8 + Down as u8, Dir::OPPOSITE_SUM);

impl Neg for Dir {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Left => Right,
            Up => Down,
            Down => Up,
            Right => Left,
        }
    }
}

impl Dir {
    pub const OPPOSITE_SUM: u8 = 3;

    pub fn iter() -> impl Iterator<Item = Self> {
        [Left, Up, Down, Right].iter().copied()
    }

    pub fn is_opposite(self, other: Self) -> bool {
        self as u8 + other as u8 == Self::OPPOSITE_SUM
    }

    /// Unit offset in screen coordinates (y grows downward)
    pub fn offset(self) -> (i32, i32) {
        match self {
            Left => (-1, 0),
            Up => (0, -1),
            Down => (0, 1),
            Right => (1, 0),
        }
    }
}

#[test]
fn test_opposites() {
    for dir in Dir::iter() {
        assert!(dir.is_opposite(-dir), "{:?}", dir);
        assert!(!dir.is_opposite(dir), "{:?}", dir);
    }

    // perpendicular turns are never reverse turns
    for (a, b) in [(Left, Up), (Left, Down), (Right, Up), (Right, Down)] {
        assert!(!a.is_opposite(b), "{:?} {:?}", a, b);
        assert!(!b.is_opposite(a), "{:?} {:?}", b, a);
    }
}

#[test]
fn test_offsets_cancel_out() {
    for dir in Dir::iter() {
        let (dx, dy) = dir.offset();
        let (ox, oy) = (-dir).offset();
        assert_eq!((dx + ox, dy + oy), (0, 0));
        assert_eq!(dx.abs() + dy.abs(), 1);
    }
}
