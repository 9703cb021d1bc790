pub use end_screen::{EndChoice, EndScreen};
pub use game::Game;
pub use start_screen::{Difficulty, StartScreen};

mod end_screen;
mod game;
mod start_screen;

pub enum Screen {
    StartScreen(StartScreen),
    Game(Box<Game>),
    EndScreen(EndScreen),
    Exit,
}

impl Screen {
    /// Whether auto-repeated presses of a held key count. In menus a
    /// press moves the cursor once no matter how long it's held.
    pub fn accepts_repeats(&self) -> bool {
        matches!(self, Screen::Game(_))
    }

    /// Text drawn over the pixel surface by the frontend
    pub fn labels(&self) -> Vec<Label> {
        match self {
            Screen::StartScreen(x) => x.labels(),
            Screen::EndScreen(x) => x.labels(),
            Screen::Game(_) | Screen::Exit => vec![],
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LabelStyle {
    Title,
    Text,
    Item,
    Hint,
}

/// A line of menu text, laid out top to bottom in order
#[derive(Clone, Debug)]
pub struct Label {
    pub text: String,
    pub style: LabelStyle,
    pub highlighted: bool,
}

impl Label {
    fn new<S: ToString>(text: S, style: LabelStyle, highlighted: bool) -> Self {
        Self { text: text.to_string(), style, highlighted }
    }

    pub fn title<S: ToString>(text: S) -> Self {
        Self::new(text, LabelStyle::Title, false)
    }

    pub fn text<S: ToString>(text: S) -> Self {
        Self::new(text, LabelStyle::Text, false)
    }

    pub fn item<S: ToString>(text: S, selected: bool) -> Self {
        Self::new(text, LabelStyle::Item, selected)
    }

    pub fn hint<S: ToString>(text: S) -> Self {
        Self::new(text, LabelStyle::Hint, false)
    }
}

#[test]
fn test_only_rounds_accept_repeats() {
    use crate::app::prefs::Prefs;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Instant;

    assert!(!Screen::StartScreen(StartScreen::new()).accepts_repeats());
    assert!(!Screen::EndScreen(EndScreen::new(0, true)).accepts_repeats());

    let game = Game::new(&Prefs::default(), Difficulty::Easy, Instant::now(), StdRng::seed_from_u64(0)).unwrap();
    assert!(Screen::Game(Box::new(game)).accepts_repeats());
}
