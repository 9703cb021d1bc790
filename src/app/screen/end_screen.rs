use crate::app::screen::Label;
use crate::surface::Key;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum EndChoice {
    PlayAgain,
    Leave,
}

/// Shown once a round is over
pub struct EndScreen {
    score: u32,
    won: bool,
    selection: EndChoice,
}

impl EndScreen {
    pub fn new(score: u32, won: bool) -> Self {
        Self { score, won, selection: EndChoice::PlayAgain }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn key_pressed(&mut self, key: Key) -> Option<EndChoice> {
        match key {
            Key::Up => self.selection = EndChoice::PlayAgain,
            Key::Down => self.selection = EndChoice::Leave,
            Key::Confirm => return Some(self.selection),
            _ => {}
        }
        None
    }

    pub fn labels(&self) -> Vec<Label> {
        let title = if self.won { "YOU WIN" } else { "GAME OVER" };
        vec![
            Label::title(title),
            Label::text(format!("Your score is {}", self.score)),
            Label::item("PLAY AGAIN", self.selection == EndChoice::PlayAgain),
            Label::item("LEAVE", self.selection == EndChoice::Leave),
        ]
    }
}

#[test]
fn test_end_screen_choices() {
    let mut screen = EndScreen::new(30, false);
    assert_eq!(screen.labels()[0].text, "GAME OVER");
    assert_eq!(screen.labels()[1].text, "Your score is 30");

    assert_eq!(screen.key_pressed(Key::Confirm), Some(EndChoice::PlayAgain));
    screen.key_pressed(Key::Down);
    assert!(screen.labels()[3].highlighted);
    assert_eq!(screen.key_pressed(Key::Confirm), Some(EndChoice::Leave));
}
