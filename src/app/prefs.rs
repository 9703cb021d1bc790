use std::time::Duration;

use log::warn;

use crate::app::food::SpawnPolicy;
use crate::basic::board::ConfigError;
use crate::basic::Board;

pub struct Prefs {
    pub board: Board,

    pub food_spawn_interval: Duration,
    pub max_food_count: usize,
    pub score_per_food: u32,

    /// Render rate cap
    pub frames_per_second: u32,
}

impl Prefs {
    pub const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_secs(5);
    pub const DEFAULT_MAX_FOOD: usize = 50;
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            board: Board::HD,

            food_spawn_interval: Self::DEFAULT_SPAWN_INTERVAL,
            max_food_count: Self::DEFAULT_MAX_FOOD,
            score_per_food: 10,

            frames_per_second: 60,
        }
    }
}

// builder
impl Prefs {
    pub fn board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn food_spawn_interval(mut self, interval: Duration) -> Self {
        self.food_spawn_interval = interval;
        self
    }

    pub fn max_food_count(mut self, max: usize) -> Self {
        self.max_food_count = max;
        self
    }

    /// Apply the two optional positional arguments, falling back to the
    /// current values (with a warning) when they don't parse
    pub fn with_args(mut self, spawn_interval: Option<&str>, max_food: Option<&str>) -> Self {
        if let Some(arg) = spawn_interval {
            match parse_spawn_interval(arg) {
                Some(interval) => self.food_spawn_interval = interval,
                None => warn!(
                    "invalid food spawn interval {:?}, using {}s",
                    arg,
                    self.food_spawn_interval.as_secs_f64(),
                ),
            }
        }
        if let Some(arg) = max_food {
            match parse_max_food(arg) {
                Some(max) => self.max_food_count = max,
                None => warn!("invalid max food count {:?}, using {}", arg, self.max_food_count),
            }
        }
        self
    }

    pub fn spawn_policy(&self) -> SpawnPolicy {
        SpawnPolicy {
            interval: self.food_spawn_interval,
            max_count: self.max_food_count,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1. / self.frames_per_second.max(1) as f64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()
    }
}

/// Seconds, strictly positive and finite
pub fn parse_spawn_interval(arg: &str) -> Option<Duration> {
    let secs = arg.trim().parse::<f64>().ok()?;
    if secs > 0. && secs.is_finite() {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

/// Strictly positive integer
pub fn parse_max_food(arg: &str) -> Option<usize> {
    arg.trim().parse::<usize>().ok().filter(|&max| max > 0)
}

#[test]
fn test_parse_spawn_interval() {
    assert_eq!(parse_spawn_interval("2.5"), Some(Duration::from_millis(2500)));
    assert_eq!(parse_spawn_interval("1"), Some(Duration::from_secs(1)));
    for bad in ["0", "-1", "abc", "", "inf", "NaN"] {
        assert_eq!(parse_spawn_interval(bad), None, "{:?}", bad);
    }
}

#[test]
fn test_parse_max_food() {
    assert_eq!(parse_max_food("3"), Some(3));
    for bad in ["0", "-2", "1.5", "many"] {
        assert_eq!(parse_max_food(bad), None, "{:?}", bad);
    }
}

#[test]
fn test_args_fall_back_to_defaults() {
    let prefs = Prefs::default().with_args(Some("nope"), Some("0"));
    assert_eq!(prefs.food_spawn_interval, Prefs::DEFAULT_SPAWN_INTERVAL);
    assert_eq!(prefs.max_food_count, Prefs::DEFAULT_MAX_FOOD);

    let prefs = Prefs::default().with_args(Some("0.5"), None);
    assert_eq!(prefs.food_spawn_interval, Duration::from_millis(500));
    assert_eq!(prefs.max_food_count, Prefs::DEFAULT_MAX_FOOD);

    let prefs = Prefs::default().with_args(None, Some("7"));
    assert_eq!(prefs.spawn_policy().max_count, 7);
}

#[test]
fn test_default_board_is_valid() {
    let prefs = Prefs::default();
    assert_eq!(prefs.validate(), Ok(()));
    assert_eq!(prefs.board, Board::HD);
    assert_eq!(prefs.board.center(), crate::basic::Cell::new(960, 536));
}
