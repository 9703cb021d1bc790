use std::time::Duration;

use crate::app::screen::Label;
use crate::surface::Key;

/// Only changes how fast the snake moves
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    const ALL: [Self; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn move_interval(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(150),
            Difficulty::Normal => Duration::from_millis(100),
            Difficulty::Hard => Duration::from_millis(50),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

pub struct StartScreen {
    selection: Difficulty,
}

impl StartScreen {
    pub fn new() -> Self {
        Self { selection: Difficulty::Normal }
    }

    pub fn selection(&self) -> Difficulty {
        self.selection
    }

    /// Up/down move the cursor without wrapping, confirm picks
    pub fn key_pressed(&mut self, key: Key) -> Option<Difficulty> {
        let i = self.selection.index();
        match key {
            Key::Up if i > 0 => self.selection = Difficulty::ALL[i - 1],
            Key::Down if i + 1 < Difficulty::ALL.len() => self.selection = Difficulty::ALL[i + 1],
            Key::Confirm => return Some(self.selection),
            _ => {}
        }
        None
    }

    pub fn labels(&self) -> Vec<Label> {
        let mut labels = vec![Label::title("SNAKE")];
        labels.extend(
            Difficulty::ALL
                .iter()
                .map(|&d| Label::item(d.name(), d == self.selection)),
        );
        labels.push(Label::hint("PRESS ENTER"));
        labels
    }
}

impl Default for StartScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_menu_navigation() {
    let mut menu = StartScreen::new();
    assert_eq!(menu.selection(), Difficulty::Normal);

    assert_eq!(menu.key_pressed(Key::Up), None);
    assert_eq!(menu.selection(), Difficulty::Easy);
    // no wrapping
    menu.key_pressed(Key::Up);
    assert_eq!(menu.selection(), Difficulty::Easy);

    menu.key_pressed(Key::Down);
    menu.key_pressed(Key::Down);
    menu.key_pressed(Key::Down);
    assert_eq!(menu.selection(), Difficulty::Hard);

    menu.key_pressed(Key::Left);
    assert_eq!(menu.key_pressed(Key::Confirm), Some(Difficulty::Hard));
}

#[test]
fn test_harder_is_faster() {
    assert!(Difficulty::Easy.move_interval() > Difficulty::Normal.move_interval());
    assert!(Difficulty::Normal.move_interval() > Difficulty::Hard.move_interval());
}
