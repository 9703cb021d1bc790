use crate::app::occupancy::Occupancy;
use crate::surface::Rgb;

pub const BLACK: Rgb = 0x00_00_00;
pub const WHITE: Rgb = 0xff_ff_ff;
pub const GREEN: Rgb = 0x00_ff_00;
pub const RED: Rgb = 0xff_00_00;

/// Exact, one-to-one mapping between occupancy and pixel color
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Palette {
    pub empty: Rgb,
    pub wall: Rgb,
    pub snake: Rgb,
    pub food: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self { empty: BLACK, wall: WHITE, snake: GREEN, food: RED }
    }
}

impl Palette {
    pub fn color(&self, occupancy: Occupancy) -> Rgb {
        match occupancy {
            Occupancy::Empty => self.empty,
            Occupancy::Wall => self.wall,
            Occupancy::Snake => self.snake,
            Occupancy::Food => self.food,
        }
    }

    /// Unknown colors read as empty
    pub fn occupancy(&self, color: Rgb) -> Occupancy {
        match color {
            c if c == self.wall => Occupancy::Wall,
            c if c == self.snake => Occupancy::Snake,
            c if c == self.food => Occupancy::Food,
            _ => Occupancy::Empty,
        }
    }
}

#[test]
fn test_palette_round_trips() {
    let palette = Palette::default();
    for occupancy in [Occupancy::Empty, Occupancy::Wall, Occupancy::Snake, Occupancy::Food] {
        assert_eq!(palette.occupancy(palette.color(occupancy)), occupancy);
    }
    assert_eq!(palette.occupancy(0x12_34_56), Occupancy::Empty);
}
