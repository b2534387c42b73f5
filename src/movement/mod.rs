mod control;
pub mod scheduler;

pub use scheduler::*;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    network::{
        Building, Direction, Id, Junction, Network, Railway, Train, TrainStatus,
        find_connecting_railway, find_stop,
    },
    shared::{
        geo::{Coordinate, Distance},
        time::{Duration, now_millis},
    },
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Train id does not match any entry: {0}")]
    UnknownTrain(Id),
    #[error("A route needs at least two stops")]
    RouteTooShort,
    #[error("No railway directly connects {from} and {to}")]
    NoDirectConnection { from: Id, to: Id },
}

/// Result of moving a train along its railway for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    pub position: Coordinate,
    /// Clamped to [0, 1].
    pub progress: f64,
    /// Set when progress passed the far end in the direction of travel.
    pub reached_end: bool,
}

/// Moves `train` along `railway` for `elapsed` simulated time.
///
/// Speed is converted to a progress delta against the railway's stored
/// length, so progress is a fraction of distance rather than of path points.
/// A tick that covers no distance leaves the train where it is.
pub fn advance_along(train: &Train, railway: &Railway, elapsed: Duration) -> Advance {
    let length = railway.length();
    if railway.path.len() < 2 || length.as_meters() <= 0.0 {
        warn!(
            "Railway {} has degenerate geometry, treating it as traversed",
            railway.id
        );
        return Advance {
            position: train.current_position,
            progress: train.progress,
            reached_end: true,
        };
    }

    let speed_mps = train.speed * 1000.0 / 3600.0;
    let traveled = Distance::from_meters(speed_mps * elapsed.as_seconds());
    let delta = traveled / length;
    if delta <= 0.0 {
        return Advance {
            position: train.current_position,
            progress: train.progress,
            reached_end: false,
        };
    }

    // Only the far end in the direction of travel counts as arrival
    let (unclamped, reached_end) = match train.direction {
        Direction::Forward => {
            let unclamped = train.progress + delta;
            (unclamped, unclamped >= 1.0)
        }
        Direction::Backward => {
            let unclamped = train.progress - delta;
            (unclamped, unclamped <= 0.0)
        }
    };
    let progress = unclamped.clamp(0.0, 1.0);

    Advance {
        position: position_at(&railway.path, progress),
        progress,
        reached_end,
    }
}

/// Coordinate at `progress` of the path's total great-circle length.
///
/// Smoothed paths have unequal segments, so the segment is found by walking
/// cumulative lengths and the point is interpolated inside it.
pub fn position_at(path: &[Coordinate], progress: f64) -> Coordinate {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return Coordinate::default();
    };
    if path.len() < 2 || progress <= 0.0 {
        return *first;
    }
    if progress >= 1.0 {
        return *last;
    }

    let lengths: Vec<Distance> = path
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .collect();
    let total: Distance = lengths.iter().copied().sum();
    let target = total * progress;

    let mut covered = Distance::ZERO;
    for (i, length) in lengths.iter().enumerate() {
        let segment_end = covered + *length;
        if target <= segment_end {
            if length.as_meters() <= 0.0 {
                return path[i];
            }
            return path[i].lerp(&path[i + 1], (target - covered) / *length);
        }
        covered = segment_end;
    }
    *last
}

/// Read-only view of the parts of the network a moving train needs.
struct Tracks<'a> {
    buildings: &'a [Building],
    junctions: &'a [Junction],
    railways: &'a [Railway],
    dwell_time: Duration,
}

impl Network {
    /// Advances every train by `elapsed` simulated time, already scaled by
    /// game speed. Returns how many trains still need ticks afterwards.
    ///
    /// Each train is handled on its own: a dangling railway or stop idles
    /// that train and the rest keep moving.
    pub fn update_trains(&mut self, elapsed: Duration) -> usize {
        let tracks = Tracks {
            buildings: &self.buildings,
            junctions: &self.junctions,
            railways: &self.railways,
            dwell_time: self.config.dwell,
        };
        let now = now_millis();
        for train in self.trains.iter_mut() {
            match train.status {
                TrainStatus::Moving => tracks.drive(train, elapsed, now),
                TrainStatus::Loading => tracks.count_down(train, elapsed),
                TrainStatus::Idle | TrainStatus::Paused => {}
            }
        }
        self.active_trains()
    }

    /// Trains that are moving or loading.
    pub fn active_trains(&self) -> usize {
        self.trains
            .iter()
            .filter(|train| train.status.is_active())
            .count()
    }
}

impl Tracks<'_> {
    fn railway(&self, id: &str) -> Option<&Railway> {
        self.railways.iter().find(|railway| *railway.id == *id)
    }

    fn drive(&self, train: &mut Train, elapsed: Duration, now: i64) {
        let Some(railway) = train
            .current_railway
            .as_deref()
            .and_then(|id| self.railway(id))
        else {
            warn!(
                "Railway {:?} not found for train {}, stopping it",
                train.current_railway, train.id
            );
            train.halt();
            return;
        };

        let step = advance_along(train, railway, elapsed);
        trace!(
            "Train {} at {:.4} on {} ({})",
            train.id, step.progress, railway.id, step.position
        );
        train.current_position = step.position;
        train.progress = step.progress;
        train.last_update = now;

        if step.reached_end {
            self.arrive(train);
        }
    }

    /// Handles reaching the far end of the current railway.
    ///
    /// The next leg is boarded straight away; a station stop then holds the
    /// train in `Loading` on that leg until the dwell runs out.
    fn arrive(&self, train: &mut Train) {
        let next_index = train.current_route_index + 1;
        let Some(stop_id) = train.route.get(next_index) else {
            warn!("Train {} ran past the end of its route", train.id);
            train.halt();
            return;
        };
        let Some(stop) = find_stop(stop_id, self.buildings, self.junctions) else {
            warn!("Stop {stop_id} on the route of train {} no longer exists", train.id);
            train.halt();
            return;
        };
        let is_station = stop.is_station();

        train.current_route_index = next_index;
        train.progress = 0.0;
        debug!("Train {} arrived at {stop_id}", train.id);

        if next_index + 1 >= train.route.len() {
            debug!("Train {} completed its route", train.id);
            train.halt();
            return;
        }
        if !self.depart(train) {
            return;
        }
        if is_station {
            train.status = TrainStatus::Loading;
            train.wait_time = self.dwell_time.as_millis();
        }
    }

    fn count_down(&self, train: &mut Train, elapsed: Duration) {
        let remaining = train.remaining_wait().saturating_sub(elapsed);
        train.wait_time = remaining.as_millis();
        if remaining.is_zero() {
            debug!("Train {} finished loading", train.id);
            train.status = TrainStatus::Moving;
        }
    }

    /// Boards the railway of the next leg, or idles when the leg has none.
    fn depart(&self, train: &mut Train) -> bool {
        let railway = train.current_leg().and_then(|(from, to)| {
            find_connecting_railway(from, to, self.railways).map(|railway| (from, railway))
        });
        match railway {
            Some((from, railway)) => {
                let direction = if railway.from == *from {
                    Direction::Forward
                } else {
                    Direction::Backward
                };
                let id = railway.id.clone();
                debug!("Train {} departing on {id} ({direction:?})", train.id);
                train.current_railway = Some(id);
                train.direction = direction;
                train.progress = direction.entry_progress();
                train.wait_time = 0.0;
                train.status = TrainStatus::Moving;
                true
            }
            None => {
                warn!(
                    "No railway for the next leg of train {}, route is broken",
                    train.id
                );
                train.wait_time = 0.0;
                train.halt();
                false
            }
        }
    }
}
