use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;

use crate::app::collisions::{classify, Crash};
use crate::app::control::{State, Timer};
use crate::app::food::FoodManager;
use crate::app::occupancy::{Occupancy, OccupancyGrid};
use crate::app::palette::Palette;
use crate::app::prefs::Prefs;
use crate::app::rendering;
use crate::app::screen::Difficulty;
use crate::app::snake::Snake;
use crate::basic::{Board, Cell, Dir};
use crate::error::{Error, ErrorConversion, Result};
use crate::surface::Surface;

/// One round, from the first tick until the snake crashes or fills
/// the arena
pub struct Game {
    board: Board,
    difficulty: Difficulty,
    score_per_food: u32,

    grid: OccupancyGrid,
    snake: Snake,
    food: FoodManager,

    move_timer: Timer,
    state: State,
    score: u32,
    ticks: usize,

    rng: StdRng,
}

impl Game {
    pub fn new(prefs: &Prefs, difficulty: Difficulty, now: Instant, rng: StdRng) -> Result<Self> {
        let board = prefs.board;
        board
            .validate()
            .map_err(Error::from)
            .with_trace_step("Game::new")?;

        let mut grid = OccupancyGrid::new(board).with_trace_step("Game::new")?;
        let snake = Snake::new(board.center(), board.cell_size as i32);
        for cell in snake.body.iter() {
            grid.set(cell, Occupancy::Snake);
        }

        info!(
            "round started: {} ({}ms per move), {}x{} playable cells",
            difficulty.name(),
            difficulty.move_interval().as_millis(),
            board.playable_cols(),
            board.playable_rows(),
        );

        Ok(Self {
            board,
            difficulty,
            score_per_food: prefs.score_per_food,

            grid,
            snake,
            food: FoodManager::new(prefs.spawn_policy(), now),

            move_timer: Timer::new(difficulty.move_interval(), now),
            state: State::Playing,
            score: 0,
            ticks: 0,

            rng,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &FoodManager {
        &self.food
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Number of movement ticks so far
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn steer(&mut self, dir: Dir) {
        self.snake.steer(dir)
    }

    /// Put food on a given empty cell outside of the spawn schedule
    pub fn place_food(&mut self, cell: Cell, now: Instant) -> bool {
        self.food.place(cell, now, &mut self.grid)
    }

    /// Everything that happens in one frame: steering, at most one
    /// movement tick, at most one food spawn. Does nothing once the
    /// round is over.
    pub fn frame(&mut self, now: Instant, steer: Option<Dir>) -> Result<State> {
        if self.state.is_over() {
            return Ok(self.state);
        }

        if let Some(dir) = steer {
            self.steer(dir);
        }

        if self.move_timer.fire(now) {
            self.state = self.tick().with_trace_step("Game::frame")?;
            if self.state.is_over() {
                info!(
                    "round over after {} moves: {:?}, score {}",
                    self.ticks, self.state, self.score,
                );
                return Ok(self.state);
            }
        }

        if let Err(e) = self.food.try_spawn(now, &mut self.grid, &mut self.rng) {
            warn!("food not spawned: {}", e);
        }

        Ok(self.state)
    }

    /// Move the snake by one cell
    fn tick(&mut self) -> Result<State> {
        self.ticks += 1;
        let z = self.board.cell_size as i32;

        let next = match self.snake.next_head(z) {
            Ok(next) => next,
            Err(crash) => return Ok(State::Lost(crash)),
        };

        match classify(&self.grid, next) {
            Occupancy::Wall => return Ok(State::Lost(Crash::Wall)),
            Occupancy::Snake => return Ok(State::Lost(Crash::Itself)),
            Occupancy::Food => {
                self.food.consume(next);
                self.snake.body.advance(next, true)?;
                self.score += self.score_per_food;
                debug!("ate food at {}, length {}", next, self.snake.body.len());
            }
            Occupancy::Empty => {
                if let Some(tail) = self.snake.body.advance(next, false)? {
                    self.grid.set(tail, Occupancy::Empty);
                }
            }
        }
        self.grid.set(next, Occupancy::Snake);

        if self.snake.body.len() >= self.board.playable_cells() {
            Ok(State::Won)
        } else {
            Ok(State::Playing)
        }
    }

    /// Paint the cells that changed since the last call
    pub fn render(&mut self, surface: &mut impl Surface, palette: &Palette) {
        rendering::draw_changes(surface, &mut self.grid, palette)
    }

    pub fn render_all(&mut self, surface: &mut impl Surface, palette: &Palette) {
        rendering::draw_all(surface, &mut self.grid, palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::collisions::classify_pixels;
    use crate::surface::FrameBuffer;
    use rand::SeedableRng;
    use std::time::Duration;

    fn start(prefs: &Prefs, now: Instant) -> Game {
        Game::new(prefs, Difficulty::Normal, now, StdRng::seed_from_u64(9)).unwrap()
    }

    fn hd_prefs() -> Prefs {
        Prefs::default().board(Board::HD)
    }

    /// Time of the n-th movement tick
    fn tick_time(t0: Instant, n: u32) -> Instant {
        t0 + n * Difficulty::Normal.move_interval()
    }

    #[test]
    fn test_hd_round_start_and_first_move() {
        let t0 = Instant::now();
        let mut game = start(&hd_prefs(), t0);

        let body: Vec<_> = game.snake().body.iter().collect();
        assert_eq!(body, vec![Cell::new(960, 520), Cell::new(960, 528), Cell::new(960, 536)]);
        assert_eq!(game.score(), 0);

        // too early to move
        assert_eq!(game.frame(t0, Some(Dir::Right)).unwrap(), State::Playing);
        assert_eq!(game.ticks(), 0);

        assert_eq!(game.frame(tick_time(t0, 1), None).unwrap(), State::Playing);
        assert_eq!(game.snake().body.head(), Cell::new(968, 536));
        assert_eq!(game.snake().body.len(), 3);
        assert_eq!(game.grid().get(Cell::new(960, 520)), Some(Occupancy::Empty));
    }

    #[test]
    fn test_eating_scores_and_grows() {
        let t0 = Instant::now();
        let mut game = start(&hd_prefs(), t0);
        assert!(game.place_food(Cell::new(968, 536), t0));

        game.frame(t0, Some(Dir::Right)).unwrap();
        assert_eq!(game.frame(tick_time(t0, 1), None).unwrap(), State::Playing);
        assert_eq!(game.score(), 10);
        assert_eq!(game.snake().body.len(), 4);
        assert!(game.food().is_empty());
        assert_eq!(game.grid().get(Cell::new(968, 536)), Some(Occupancy::Snake));
        // the tail stayed put
        assert_eq!(game.snake().body.tail(), Cell::new(960, 520));
    }

    #[test]
    fn test_reverse_turn_ends_round() {
        let t0 = Instant::now();
        let mut game = start(&hd_prefs(), t0);
        game.frame(t0, Some(Dir::Left)).unwrap();
        game.frame(tick_time(t0, 1), None).unwrap();
        assert_eq!(game.state(), State::Playing);

        game.frame(tick_time(t0, 1), Some(Dir::Right)).unwrap();
        assert_eq!(game.frame(tick_time(t0, 2), None).unwrap(), State::Lost(Crash::Reverse));
    }

    #[test]
    fn test_wall_ends_round() {
        let t0 = Instant::now();
        let board = Board { width: 48, height: 64, cell_size: 8, border_offset: 8 };
        let mut game = start(&Prefs::default().board(board), t0);
        // head starts at (24, 32), the right wall starts at x = 40
        game.frame(t0, Some(Dir::Right)).unwrap();
        assert_eq!(game.frame(tick_time(t0, 1), None).unwrap(), State::Playing);
        assert_eq!(game.frame(tick_time(t0, 2), None).unwrap(), State::Lost(Crash::Wall));
        assert_eq!(game.snake().body.head(), Cell::new(32, 32));
    }

    #[test]
    fn test_self_collision_ends_round() {
        let t0 = Instant::now();
        let mut game = start(&hd_prefs(), t0);
        // grow to five cells, then turn back into the body
        assert!(game.place_food(Cell::new(960, 544), t0));
        assert!(game.place_food(Cell::new(968, 544), t0));
        game.frame(tick_time(t0, 1), None).unwrap();
        game.frame(tick_time(t0, 1), Some(Dir::Right)).unwrap();
        game.frame(tick_time(t0, 2), None).unwrap();
        assert_eq!(game.snake().body.len(), 5);

        game.frame(tick_time(t0, 2), Some(Dir::Up)).unwrap();
        assert_eq!(game.frame(tick_time(t0, 3), None).unwrap(), State::Playing);
        game.frame(tick_time(t0, 3), Some(Dir::Left)).unwrap();
        assert_eq!(game.frame(tick_time(t0, 4), None).unwrap(), State::Lost(Crash::Itself));
    }

    #[test]
    fn test_filling_the_arena_wins() {
        let t0 = Instant::now();
        // a single playable column four cells tall
        let board = Board { width: 24, height: 48, cell_size: 8, border_offset: 8 };
        let mut game = start(&Prefs::default().board(board).max_food_count(0), t0);
        assert_eq!(board.playable_cells(), 4);
        assert_eq!(game.snake().body.head(), Cell::new(8, 24));

        assert!(game.place_food(Cell::new(8, 32), t0));
        assert_eq!(game.frame(tick_time(t0, 1), None).unwrap(), State::Won);
        assert_eq!(game.ticks(), 1);

        // no further ticks once the round is over
        assert_eq!(game.frame(tick_time(t0, 5), None).unwrap(), State::Won);
        assert_eq!(game.ticks(), 1);
        assert_eq!(game.snake().body.len(), 4);
    }

    #[test]
    fn test_food_spawns_on_its_own_timer() {
        let t0 = Instant::now();
        let prefs = hd_prefs()
            .food_spawn_interval(Duration::from_millis(250))
            .max_food_count(2);
        let mut game = start(&prefs, t0);

        game.frame(t0 + Duration::from_millis(249), None).unwrap();
        assert_eq!(game.food().len(), 0);
        game.frame(t0 + Duration::from_millis(250), None).unwrap();
        assert_eq!(game.food().len(), 1);
        game.frame(t0 + Duration::from_millis(500), None).unwrap();
        game.frame(t0 + Duration::from_millis(750), None).unwrap();
        assert_eq!(game.food().len(), 2);

        for food in game.food().iter() {
            assert_eq!(classify(game.grid(), food.pos), Occupancy::Food);
            assert!(!game.snake().body.contains(food.pos));
        }
    }

    #[test]
    fn test_render_matches_grid() {
        let t0 = Instant::now();
        let palette = Palette::default();
        let board = Board { width: 96, height: 96, cell_size: 8, border_offset: 16 };
        let prefs = Prefs::default()
            .board(board)
            .food_spawn_interval(Duration::from_millis(100))
            .max_food_count(3);
        let mut game = start(&prefs, t0);
        let mut fb = FrameBuffer::new(board.width, board.height);
        game.render_all(&mut fb, &palette);

        let check = |game: &Game, fb: &FrameBuffer| {
            for cell in board.cells() {
                assert_eq!(
                    classify_pixels(fb, &palette, cell, board.cell_size),
                    classify(game.grid(), cell),
                    "{}",
                    cell,
                );
            }
            for cell in game.snake().body.iter() {
                assert_eq!(classify_pixels(fb, &palette, cell, board.cell_size), Occupancy::Snake);
            }
        };
        check(&game, &fb);

        let steps = [Some(Dir::Right), None, Some(Dir::Up), None, Some(Dir::Left)];
        for (i, steer) in steps.into_iter().enumerate() {
            game.frame(tick_time(t0, i as u32 + 1), steer).unwrap();
            game.render(&mut fb, &palette);
            check(&game, &fb);
        }
    }
}
