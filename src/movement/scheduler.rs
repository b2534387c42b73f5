use std::{cell::Cell, rc::Rc, time::Instant};

use tracing::{debug, trace};

use crate::{config::Config, network::Network, shared::time::Duration};

/// Source of monotonic time for the scheduler.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed().into()
    }
}

/// Hand-driven clock for deterministic simulation. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Whether the scheduler wants another tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// At least one train is moving or loading and the game is not paused.
    Active,
    /// Nothing to simulate until [`Scheduler::wake`] is called.
    Idle,
}

impl Schedule {
    pub fn is_active(&self) -> bool {
        matches!(self, Schedule::Active)
    }
}

/// Fixed-rate driver for [`Network::update_trains`].
///
/// Each tick pulls the real time elapsed since the previous one from the
/// clock, clamps it to a few nominal frames so a stall does not teleport
/// trains, scales it by the game speed and advances every train. The
/// scheduler goes idle by itself once nothing is moving and must be woken
/// after a train is started or resumed.
pub struct Scheduler<C: Clock> {
    clock: C,
    last_tick: Option<Duration>,
    game_speed: f64,
    max_tick: Duration,
    schedule: Schedule,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C, config: &Config) -> Self {
        Self {
            clock,
            last_tick: None,
            game_speed: 1.0,
            max_tick: config.max_tick(),
            schedule: Schedule::Idle,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn game_speed(&self) -> f64 {
        self.game_speed
    }

    /// Sets the multiplier, clamped to the configured bounds. Zero pauses everything.
    pub fn set_game_speed(&mut self, speed: f64, config: &Config) {
        self.game_speed = config.clamp_game_speed(speed);
        debug!("Game speed set to {}", self.game_speed);
        if self.game_speed == 0.0 {
            self.schedule = Schedule::Idle;
        }
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Resumes ticking after an external change. Time spent idle is not simulated.
    pub fn wake(&mut self) {
        if self.schedule == Schedule::Idle && self.game_speed > 0.0 {
            trace!("Scheduler woken");
            self.last_tick = Some(self.clock.now());
            self.schedule = Schedule::Active;
        }
    }

    /// Runs one tick and reports whether another one is wanted.
    pub fn tick(&mut self, network: &mut Network) -> Schedule {
        let now = self.clock.now();
        let raw = now.saturating_sub(self.last_tick.unwrap_or(now));
        self.last_tick = Some(now);

        let active = if self.game_speed > 0.0 {
            let elapsed = raw.min(self.max_tick) * self.game_speed;
            network.update_trains(elapsed)
        } else {
            network.active_trains()
        };

        self.schedule = if active > 0 && self.game_speed > 0.0 {
            Schedule::Active
        } else {
            Schedule::Idle
        };
        if self.schedule == Schedule::Idle {
            trace!("No active trains, scheduler going idle");
        }
        self.schedule
    }
}
