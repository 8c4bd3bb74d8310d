/// RoundContext: the complete state of a running game.
///
/// Owned by the frame loop and passed by reference to every core
/// operation. Nothing in the simulation reaches for global state; the
/// random source travels alongside as a separate `RandomSource`.
///
/// Scope of each part:
///   - `grid`:  static layout for the process, obstacles per round
///   - `frog`:  persists across rounds, respawned on score and reset
///   - `cars`:  one per lane, slot = lane index
///   - `round`: timer, score, collisions; reset in place each round
///
/// `highscore` lives in `round` but survives resets.

use crate::config::{GameConfig, LookConfig, RulesConfig, TuningConfig};
use crate::domain::contact::Reach;
use crate::domain::entity::{Car, Frog};
use crate::domain::grid::{Grid, MAX_CARS, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Points for reaching the finish row.
pub const FINISH_AWARD: i32 = 10;
/// Points lost to an aggressive car.
pub const HIT_PENALTY: i32 = 5;

#[derive(Clone, Debug, Default)]
pub struct RoundState {
    pub elapsed_ms: u64,
    pub score: i32,
    pub highscore: i32,
    pub collisions: u32,
    pub max_time_ms: u64,
    /// Round time of the last accepted frog step (debounce).
    pub last_jump_ms: Option<u64>,
}

impl RoundState {
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_ms as f32 / 1000.0
    }

    pub fn expired(&self) -> bool {
        self.elapsed_ms > self.max_time_ms
    }
}

pub struct RoundContext {
    pub grid: Grid,
    pub frog: Frog,
    pub cars: Vec<Car>,
    pub round: RoundState,

    // ── Config-derived, fixed for the process ──
    pub rules: RulesConfig,
    pub look: LookConfig,
    pub tuning: TuningConfig,
}

impl RoundContext {
    pub fn new(config: &GameConfig) -> Self {
        let grid = Grid::new(MAX_CARS, SCREEN_WIDTH);
        debug_assert_eq!(grid.height, SCREEN_HEIGHT);
        let (row, col) = grid.start();
        let cars = (0..MAX_CARS).map(|slot| Car::new(slot, Grid::lane_row(slot))).collect();
        RoundContext {
            grid,
            frog: Frog::new(row, col),
            cars,
            round: RoundState {
                max_time_ms: config.rules.max_time as u64 * 1000,
                ..RoundState::default()
            },
            rules: config.rules.clone(),
            look: config.look.clone(),
            tuning: config.tuning.clone(),
        }
    }

    pub fn reach(&self) -> Reach {
        Reach {
            tolerance: self.tuning.overlap_tolerance,
            look_ahead: self.tuning.look_ahead,
            width: self.grid.width,
        }
    }

    /// Has the jump delay passed since the last accepted step?
    pub fn jump_ready(&self) -> bool {
        match self.round.last_jump_ms {
            Some(t) => self.round.elapsed_ms.saturating_sub(t) > self.tuning.jump_delay_ms,
            None => true,
        }
    }

    /// Send the frog back to the start and end any ride.
    pub fn respawn_frog(&mut self) {
        self.release_ride();
        let start = self.grid.start();
        self.frog.respawn(start);
    }

    /// Drop the frog-car link on both sides. Returns the slot that was carrying.
    pub fn release_ride(&mut self) -> Option<usize> {
        let slot = self.frog.riding.take()?;
        if let Some(car) = self.cars.get_mut(slot) {
            car.carrying = false;
        }
        Some(slot)
    }
}
