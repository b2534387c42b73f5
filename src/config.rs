use crate::shared::{Distance, Duration};

#[derive(Debug, Clone)]
pub struct Config {
    /// Balance of a fresh game.
    pub starting_money: i64,
    /// How long a train dwells at a station stop.
    pub dwell: Duration,
    /// Catmull-Rom samples per waypoint pair for committed railways.
    pub smoothing_segments: usize,
    /// Catmull-Rom samples per waypoint pair for the drawing preview.
    pub preview_segments: usize,
    /// Default search radius of the nearest-railway query.
    pub nearest_threshold: Distance,
    /// Search radius used when placing a branch junction on a line.
    pub junction_snap_threshold: Distance,
    /// Nominal frame length of the tick source (60 Hz).
    pub frame: Duration,
    /// Upper bound on frames absorbed by a single tick after a stall.
    pub max_frame_skip: f64,
    pub min_game_speed: f64,
    pub max_game_speed: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_money: 1_000_000,
            dwell: Duration::from_millis(5000.0),
            smoothing_segments: 30,
            preview_segments: 20,
            nearest_threshold: Distance::from_meters(100.0),
            junction_snap_threshold: Distance::from_meters(50.0),
            frame: Duration::from_millis(16.67),
            max_frame_skip: 2.0,
            min_game_speed: 0.1,
            max_game_speed: 10.0,
        }
    }
}

impl Config {
    /// Longest elapsed interval a single tick will simulate.
    pub fn max_tick(&self) -> Duration {
        self.frame * self.max_frame_skip
    }

    /// Clamps a requested game speed; zero or less pauses the whole simulation.
    pub fn clamp_game_speed(&self, speed: f64) -> f64 {
        if speed <= 0.0 {
            0.0
        } else {
            speed.clamp(self.min_game_speed, self.max_game_speed)
        }
    }
}
