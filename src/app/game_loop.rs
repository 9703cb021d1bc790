use std::iter;
use std::time::{Duration, Instant};

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::control::State;
use crate::app::palette::Palette;
use crate::app::prefs::Prefs;
use crate::app::screen::{Difficulty, EndChoice, EndScreen, Game, Screen, StartScreen};
use crate::basic::Dir;
use crate::surface::{Key, Surface};

/// Monotonic time and a way to wait, for driving `Runner::run`
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

enum Transition {
    StartRound { difficulty: Difficulty, steer: Option<Dir> },
    RoundOver { score: u32, won: bool },
    Menu,
    Exit,
}

/// Owns the surface-independent state of the whole program and moves
/// it between the menu, a round and the end screen
pub struct Runner {
    prefs: Prefs,
    palette: Palette,
    screen: Screen,
    rng: StdRng,
    // the surface still shows whatever was there before the first frame
    needs_clear: bool,
}

impl Runner {
    pub fn new(prefs: Prefs) -> Self {
        Self::with_rng(prefs, StdRng::from_entropy())
    }

    pub fn with_rng(prefs: Prefs, rng: StdRng) -> Self {
        Self {
            prefs,
            palette: Palette::default(),
            screen: Screen::StartScreen(StartScreen::new()),
            rng,
            needs_clear: true,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn prefs(&self) -> &Prefs {
        &self.prefs
    }

    /// One iteration of the loop. Returns false once the program
    /// should exit.
    pub fn frame(&mut self, surface: &mut impl Surface, now: Instant) -> bool {
        if surface.poll_quit() {
            info!("quit requested");
            self.screen = Screen::Exit;
            return false;
        }
        if std::mem::take(&mut self.needs_clear) {
            surface.clear(self.palette.empty);
        }

        let keys: Vec<Key> = iter::from_fn(|| surface.poll_key()).collect();

        let transition = match &mut self.screen {
            Screen::StartScreen(menu) => {
                let mut keys = keys.into_iter();
                keys.by_ref()
                    .find_map(|key| menu.key_pressed(key))
                    .map(|difficulty| Transition::StartRound {
                        difficulty,
                        // directions pressed along with the confirmation
                        // carry over into the new round
                        steer: keys.rev().find_map(Key::dir),
                    })
            }
            Screen::Game(game) => {
                // the most recent direction key wins
                let steer = keys.iter().rev().find_map(|key| key.dir());
                match game.frame(now, steer) {
                    Ok(state) => {
                        game.render(surface, &self.palette);
                        match state {
                            State::Playing => None,
                            State::Won | State::Lost(_) => Some(Transition::RoundOver {
                                score: game.score(),
                                won: state == State::Won,
                            }),
                        }
                    }
                    Err(e) => {
                        error!("round aborted: {}", e);
                        debug!("{:?}", e);
                        Some(Transition::Menu)
                    }
                }
            }
            // keys after the choice are dropped, both targets start idle
            Screen::EndScreen(end) => keys
                .into_iter()
                .find_map(|key| end.key_pressed(key))
                .map(|choice| match choice {
                    EndChoice::PlayAgain => Transition::Menu,
                    EndChoice::Leave => Transition::Exit,
                }),
            Screen::Exit => return false,
        };

        if let Some(transition) = transition {
            if !self.apply(transition, surface, now) {
                return false;
            }
        }

        surface.present();
        true
    }

    fn apply(&mut self, transition: Transition, surface: &mut impl Surface, now: Instant) -> bool {
        match transition {
            Transition::StartRound { difficulty, steer } => {
                let rng = StdRng::seed_from_u64(self.rng.gen());
                match Game::new(&self.prefs, difficulty, now, rng) {
                    Ok(mut game) => {
                        if let Some(dir) = steer {
                            game.steer(dir);
                        }
                        game.render_all(surface, &self.palette);
                        self.screen = Screen::Game(Box::new(game));
                    }
                    Err(e) => {
                        error!("could not start round: {}", e);
                        debug!("{:?}", e);
                    }
                }
            }
            Transition::RoundOver { score, won } => {
                surface.clear(self.palette.empty);
                self.screen = Screen::EndScreen(EndScreen::new(score, won));
            }
            Transition::Menu => {
                surface.clear(self.palette.empty);
                self.screen = Screen::StartScreen(StartScreen::new());
            }
            Transition::Exit => {
                info!("leaving");
                self.screen = Screen::Exit;
                return false;
            }
        }
        true
    }

    /// Run frames until the program exits, sleeping away whatever is
    /// left of each frame's time budget. The window frontend doesn't use
    /// this, ggez's event loop paces it through `frame` instead.
    pub fn run(&mut self, surface: &mut impl Surface, clock: &impl Clock) {
        let frame_duration = self.prefs.frame_duration();
        loop {
            let start = clock.now();
            if !self.frame(surface, start) {
                break;
            }
            let elapsed = clock.now().saturating_duration_since(start);
            if let Some(remaining) = frame_duration.checked_sub(elapsed) {
                clock.sleep(remaining);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::occupancy::Occupancy;
    use crate::basic::{Board, Cell};
    use crate::surface::FrameBuffer;
    use std::cell::Cell as StdCell;

    fn small_prefs() -> Prefs {
        Prefs::default()
            .board(Board { width: 48, height: 64, cell_size: 8, border_offset: 8 })
            .max_food_count(0)
    }

    fn runner() -> Runner {
        Runner::with_rng(small_prefs(), StdRng::seed_from_u64(5))
    }

    fn fb() -> FrameBuffer {
        FrameBuffer::new(48, 64)
    }

    fn head(runner: &Runner) -> Cell {
        match runner.screen() {
            Screen::Game(game) => game.snake().body.head(),
            _ => panic!("not in a round"),
        }
    }

    #[test]
    fn test_menu_round_end_exit() {
        let mut runner = runner();
        let mut fb = fb();
        let mut now = Instant::now();

        assert!(runner.frame(&mut fb, now));
        assert!(matches!(runner.screen(), Screen::StartScreen(_)));

        fb.push_key(Key::Down);
        fb.push_key(Key::Confirm);
        assert!(runner.frame(&mut fb, now));
        let game = match runner.screen() {
            Screen::Game(game) => game,
            _ => panic!("round didn't start"),
        };
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(fb.get_pixel(24, 32), Some(Palette::default().snake));
        assert_eq!(fb.get_pixel(0, 0), Some(Palette::default().wall));

        // straight down into the bottom wall: 40, 48, then the wall at 56
        let step = Difficulty::Hard.move_interval();
        for _ in 0..2 {
            now += step;
            assert!(runner.frame(&mut fb, now));
            assert!(matches!(runner.screen(), Screen::Game(_)));
        }
        now += step;
        assert!(runner.frame(&mut fb, now));
        match runner.screen() {
            Screen::EndScreen(end) => {
                assert!(!end.won());
                assert_eq!(end.score(), 0);
            }
            _ => panic!("round didn't end"),
        }

        fb.push_key(Key::Down);
        fb.push_key(Key::Confirm);
        assert!(!runner.frame(&mut fb, now));
        assert!(matches!(runner.screen(), Screen::Exit));
    }

    #[test]
    fn test_play_again_goes_back_to_menu() {
        let mut runner = runner();
        let mut fb = fb();
        let mut now = Instant::now();

        fb.push_key(Key::Confirm);
        runner.frame(&mut fb, now);
        // reverse turn on the first move
        fb.push_key(Key::Up);
        for _ in 0..2 {
            now += Difficulty::Normal.move_interval();
            runner.frame(&mut fb, now);
        }
        assert!(matches!(runner.screen(), Screen::EndScreen(_)));

        fb.push_key(Key::Confirm);
        assert!(runner.frame(&mut fb, now));
        assert!(matches!(runner.screen(), Screen::StartScreen(_)));
        assert_eq!(fb.get_pixel(24, 32), Some(Palette::default().empty));
    }

    #[test]
    fn test_last_direction_key_wins() {
        let mut runner = runner();
        let mut fb = fb();
        let now = Instant::now();

        fb.push_key(Key::Confirm);
        runner.frame(&mut fb, now);
        assert_eq!(head(&runner), Cell::new(24, 32));

        fb.push_key(Key::Right);
        fb.push_key(Key::Left);
        runner.frame(&mut fb, now + Difficulty::Normal.move_interval());
        assert_eq!(head(&runner), Cell::new(16, 32));

        // no new key, keep going left
        runner.frame(&mut fb, now + 2 * Difficulty::Normal.move_interval());
        assert_eq!(head(&runner), Cell::new(8, 32));
        match runner.screen() {
            Screen::Game(game) => assert_eq!(game.grid().get(Cell::new(24, 24)), Some(Occupancy::Empty)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_direction_pressed_with_confirm_steers_new_round() {
        let mut runner = runner();
        let mut fb = fb();
        let now = Instant::now();

        fb.push_key(Key::Confirm);
        fb.push_key(Key::Right);
        fb.push_key(Key::Left);
        runner.frame(&mut fb, now);
        match runner.screen() {
            Screen::Game(game) => assert_eq!(game.snake().dir(), Dir::Left),
            _ => panic!("round didn't start"),
        }

        runner.frame(&mut fb, now + Difficulty::Normal.move_interval());
        assert_eq!(head(&runner), Cell::new(16, 32));
    }

    #[test]
    fn test_quit_signal_ends_loop() {
        let mut runner = runner();
        let mut fb = fb();
        fb.request_quit();
        assert!(!runner.frame(&mut fb, Instant::now()));
        assert!(matches!(runner.screen(), Screen::Exit));
        assert_eq!(fb.presented(), 0);
    }

    struct ManualClock {
        now: StdCell<Instant>,
        slept: StdCell<Duration>,
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }

        fn sleep(&self, duration: Duration) {
            self.now.set(self.now.get() + duration);
            self.slept.set(self.slept.get() + duration);
        }
    }

    /// Asks to quit once it has shown a given number of frames
    struct QuitAfter {
        fb: FrameBuffer,
        frames: usize,
    }

    impl Surface for QuitAfter {
        fn width(&self) -> u32 {
            self.fb.width()
        }

        fn height(&self) -> u32 {
            self.fb.height()
        }

        fn set_pixel(&mut self, x: u32, y: u32, color: u32) {
            self.fb.set_pixel(x, y, color)
        }

        fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
            self.fb.get_pixel(x, y)
        }

        fn present(&mut self) {
            self.fb.present()
        }

        fn poll_key(&mut self) -> Option<Key> {
            self.fb.poll_key()
        }

        fn poll_quit(&mut self) -> bool {
            self.fb.presented() >= self.frames
        }
    }

    #[test]
    fn test_run_sleeps_out_each_frame() {
        let mut runner = runner();
        let mut surface = QuitAfter { fb: fb(), frames: 10 };
        let clock = ManualClock {
            now: StdCell::new(Instant::now()),
            slept: StdCell::new(Duration::ZERO),
        };

        runner.run(&mut surface, &clock);

        assert_eq!(surface.fb.presented(), 10);
        assert_eq!(clock.slept.get(), 10 * runner.prefs().frame_duration());
        assert!(matches!(runner.screen(), Screen::Exit));
    }
}
