use tracing::debug;

use crate::{
    movement::Error,
    network::{Direction, Id, Network, Train, TrainStatus, find_connecting_railway},
    shared::time::now_millis,
};

impl Network {
    fn train_mut(&mut self, id: &str) -> Result<&mut Train, self::Error> {
        self.trains
            .iter_mut()
            .find(|train| *train.id == *id)
            .ok_or_else(|| Error::UnknownTrain(id.into()))
    }

    /// Sends a train off on `route`.
    ///
    /// Only the first leg is checked here; later legs are resolved as the
    /// train reaches each stop, and a missing one idles the train there.
    pub fn start_train(&mut self, id: &str, route: Vec<Id>) -> Result<(), self::Error> {
        if route.len() < 2 {
            return Err(Error::RouteTooShort);
        }
        let railway = find_connecting_railway(&route[0], &route[1], &self.railways).ok_or_else(
            || Error::NoDirectConnection {
                from: route[0].clone(),
                to: route[1].clone(),
            },
        )?;
        let direction = if railway.from == route[0] {
            Direction::Forward
        } else {
            Direction::Backward
        };
        let railway_id = railway.id.clone();
        let entry = match direction {
            Direction::Forward => railway.path.first().copied(),
            Direction::Backward => railway.path.last().copied(),
        };

        let train = self.train_mut(id)?;
        train.route = route;
        train.current_route_index = 0;
        train.current_railway = Some(railway_id);
        train.direction = direction;
        train.progress = direction.entry_progress();
        train.wait_time = 0.0;
        train.status = TrainStatus::Moving;
        train.last_update = now_millis();
        if let Some(entry) = entry {
            train.current_position = entry;
        }
        debug!("Started train {id} ({direction:?})");
        Ok(())
    }

    /// Freezes a moving or loading train in place. Other states are left alone.
    pub fn pause_train(&mut self, id: &str) -> Result<(), self::Error> {
        let train = self.train_mut(id)?;
        if train.status.is_active() {
            train.status = TrainStatus::Paused;
            debug!("Paused train {id}");
        }
        Ok(())
    }

    /// Puts a paused train back to `Moving`.
    ///
    /// A train paused while loading also resumes as moving and its remaining
    /// dwell is dropped.
    pub fn resume_train(&mut self, id: &str) -> Result<(), self::Error> {
        let train = self.train_mut(id)?;
        if train.status == TrainStatus::Paused {
            train.status = TrainStatus::Moving;
            train.last_update = now_millis();
            debug!("Resumed train {id}");
        }
        Ok(())
    }

    /// Stops the train and forgets its route. The purchase price is not refunded.
    pub fn abort_train(&mut self, id: &str) -> Result<(), self::Error> {
        let train = self.train_mut(id)?;
        train.halt();
        train.route.clear();
        train.current_route_index = 0;
        train.progress = 0.0;
        train.wait_time = 0.0;
        debug!("Aborted train {id}");
        Ok(())
    }
}
