use std::time::{Duration, Instant};

use log::{debug, warn};
use rand::Rng;

use crate::app::occupancy::{Occupancy, OccupancyGrid};
use crate::basic::Cell;

pub use spawn::SpawnError;

pub mod spawn;

/// When food may appear
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SpawnPolicy {
    pub interval: Duration,
    /// Zero disables food entirely
    pub max_count: usize,
}

impl SpawnPolicy {
    pub fn is_due(&self, now: Instant, last_spawn: Instant, active: usize) -> bool {
        self.max_count > 0
            && active < self.max_count
            && now.saturating_duration_since(last_spawn) >= self.interval
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Food {
    pub pos: Cell,
    pub spawned_at: Instant,
}

/// The food currently on the board. Food only leaves by being eaten.
pub struct FoodManager {
    policy: SpawnPolicy,
    items: Vec<Food>,
    last_spawn: Instant,
}

impl FoodManager {
    /// The spawn timer starts at `now`
    pub fn new(policy: SpawnPolicy, now: Instant) -> Self {
        Self { policy, items: vec![], last_spawn: now }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Food> {
        self.items.iter()
    }

    /// Place one new piece of food if the policy allows it. A failed
    /// placement still restarts the timer so a full arena isn't
    /// searched again every frame.
    pub fn try_spawn(
        &mut self,
        now: Instant,
        grid: &mut OccupancyGrid,
        rng: &mut impl Rng,
    ) -> Result<Option<Cell>, SpawnError> {
        if !self.policy.is_due(now, self.last_spawn, self.items.len()) {
            return Ok(None);
        }
        self.last_spawn = now;

        let pos = spawn::random_free_cell(grid, rng)?;
        self.place(pos, now, grid);
        debug!("food spawned at {} ({} on board)", pos, self.items.len());
        Ok(Some(pos))
    }

    /// Put food on a specific cell, false if the cell isn't empty
    pub fn place(&mut self, pos: Cell, now: Instant, grid: &mut OccupancyGrid) -> bool {
        if grid.get(pos) != Some(Occupancy::Empty) {
            return false;
        }
        grid.set(pos, Occupancy::Food);
        self.items.push(Food { pos, spawned_at: now });
        true
    }

    /// Remove the food at `pos`. The grid cell is left for the
    /// caller, who is about to put the snake's head there.
    pub fn consume(&mut self, pos: Cell) -> Option<Food> {
        match self.items.iter().position(|food| food.pos == pos) {
            Some(i) => Some(self.items.swap_remove(i)),
            None => {
                warn!("no food to eat at {}", pos);
                None
            }
        }
    }
}
