pub mod cost;
mod models;
mod nearest;
mod route;

pub use cost::{MINIMUM_RAILWAY_COST, building_cost, railway_cost};
pub use models::*;
pub use nearest::*;
pub use route::*;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::{
    config::Config,
    shared::{
        geo::{Coordinate, Distance, path_length},
        smoothing::smooth_path,
        time::now_millis,
    },
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Insufficient funds: {required} required, {available} available")]
    InsufficientFunds { required: i64, available: i64 },
    #[error("A railway cannot start and end at the same stop")]
    SameEndpoints,
    #[error("Stop id does not match any building or junction: {0}")]
    UnknownStop(Id),
    #[error("Railway id does not match any entry: {0}")]
    UnknownRailway(Id),
    #[error("A railway path needs at least two points")]
    InvalidPath,
    #[error("Segment {segment_index} is outside the railway path")]
    InvalidSplit { segment_index: usize },
    #[error("No railway within {0} of the requested point")]
    NoRailwayNearby(Distance),
}

/// Aggregate figures for dashboards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub buildings: usize,
    pub stations: usize,
    pub junctions: usize,
    pub railways: usize,
    pub railway_length: Distance,
    pub trains: usize,
    pub moving_trains: usize,
    pub loading_trains: usize,
    pub idle_trains: usize,
    pub paused_trains: usize,
    pub money: i64,
    pub total_spent: i64,
}

/// The authoritative state of one game: every entity plus the shared balance.
///
/// All mutations go through the methods below so purchases stay atomic with
/// respect to the balance and deletions cascade to dependent entities.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) config: Config,
    pub(crate) buildings: Vec<Building>,
    pub(crate) junctions: Vec<Junction>,
    pub(crate) railways: Vec<Railway>,
    pub(crate) trains: Vec<Train>,
    pub(crate) money: i64,
    pub(crate) total_spent: i64,
    selected_building: Option<Id>,
    selected_railway: Option<Id>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Network {
    pub fn new(config: Config) -> Self {
        Self {
            money: config.starting_money,
            config,
            buildings: Vec::new(),
            junctions: Vec::new(),
            railways: Vec::new(),
            trains: Vec::new(),
            total_spent: 0,
            selected_building: None,
            selected_railway: None,
        }
    }

    /// Overrides the balance, mostly useful when setting up scenarios.
    pub fn with_money(mut self, money: i64) -> Self {
        self.money = money;
        self
    }

    /// Resets to a fresh game, keeping the configuration.
    pub fn clear_all(&mut self) {
        let config = self.config.clone();
        *self = Self::new(config);
        debug!("Cleared network");
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    pub fn total_spent(&self) -> i64 {
        self.total_spent
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    pub fn railways(&self) -> &[Railway] {
        &self.railways
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn building(&self, id: &str) -> Option<&Building> {
        self.buildings.iter().find(|building| *building.id == *id)
    }

    pub fn junction(&self, id: &str) -> Option<&Junction> {
        self.junctions.iter().find(|junction| *junction.id == *id)
    }

    pub fn railway(&self, id: &str) -> Option<&Railway> {
        self.railways.iter().find(|railway| *railway.id == *id)
    }

    pub fn train(&self, id: &str) -> Option<&Train> {
        self.trains.iter().find(|train| *train.id == *id)
    }

    pub fn stop(&self, id: &str) -> Option<Stop<'_>> {
        find_stop(id, &self.buildings, &self.junctions)
    }

    pub fn selected_building(&self) -> Option<&Id> {
        self.selected_building.as_ref()
    }

    pub fn selected_railway(&self) -> Option<&Id> {
        self.selected_railway.as_ref()
    }

    pub fn select_building(&mut self, id: Option<Id>) {
        self.selected_building = id;
    }

    pub fn select_railway(&mut self, id: Option<Id>) {
        self.selected_railway = id;
    }

    /// Debits `cost` or rejects without touching the balance.
    fn charge(&mut self, cost: i64) -> Result<(), self::Error> {
        if self.money < cost {
            return Err(self::Error::InsufficientFunds {
                required: cost,
                available: self.money,
            });
        }
        self.money -= cost;
        self.total_spent += cost;
        Ok(())
    }

    pub fn add_building(&mut self, spec: BuildingSpec) -> Result<Id, self::Error> {
        let level = spec.level.max(1);
        let cost = building_cost(spec.kind, level);
        self.charge(cost)?;

        let building = Building {
            id: new_id(),
            kind: spec.kind,
            name: spec.name.into(),
            position: spec.position,
            level,
            created_at: Utc::now(),
        };
        debug!("Built {:?} {} for {cost}", building.kind, building.id);
        let id = building.id.clone();
        self.buildings.push(building);
        Ok(id)
    }

    /// Removes the building and every railway touching it. Unknown ids are ignored.
    pub fn remove_building(&mut self, id: &str) {
        let before = self.buildings.len();
        self.buildings.retain(|building| *building.id != *id);
        if self.buildings.len() == before {
            return;
        }
        self.remove_railways_touching(id);
        if self.selected_building.as_deref() == Some(id) {
            self.selected_building = None;
        }
        debug!("Removed building {id}");
    }

    /// Places a junction, optionally cutting an existing railway in two at it.
    ///
    /// The replacement halves inherit the original's kind, are re-smoothed when
    /// they have more than two points and are recorded with zero cost since
    /// the original line was already paid for.
    pub fn add_junction(
        &mut self,
        spec: JunctionSpec,
        split: Option<Split>,
    ) -> Result<Id, self::Error> {
        let junction = Junction {
            id: new_id(),
            position: spec.position,
            name: spec.name.into(),
            created_at: Utc::now(),
        };

        let halves = match split {
            Some(split) => {
                let railway = self
                    .railway(&split.railway)
                    .ok_or_else(|| self::Error::UnknownRailway(split.railway.clone()))?;
                if split.segment_index + 1 >= railway.path.len() {
                    return Err(self::Error::InvalidSplit {
                        segment_index: split.segment_index,
                    });
                }
                let mut first: Vec<Coordinate> = railway.path[..=split.segment_index].to_vec();
                first.push(split.point);
                let mut second = vec![split.point];
                second.extend_from_slice(&railway.path[split.segment_index + 1..]);

                let segments = self.config.smoothing_segments;
                let halves = [
                    self.split_half(railway, railway.from.clone(), junction.id.clone(), first, segments),
                    self.split_half(railway, junction.id.clone(), railway.to.clone(), second, segments),
                ];
                Some((split.railway, halves))
            }
            None => None,
        };

        let id = junction.id.clone();
        self.junctions.push(junction);
        if let Some((original, halves)) = halves {
            self.railways.retain(|railway| railway.id != original);
            self.release_trains_on(&original);
            debug!("Split railway {original} at junction {id}");
            self.railways.extend(halves);
        }
        debug!("Placed junction {id}");
        Ok(id)
    }

    /// Drops a junction on the railway closest to `click` and splits it there.
    ///
    /// The junction lands on the projected point, not on the click itself.
    /// Fails when no railway lies within the configured snap threshold.
    pub fn add_branch_junction(
        &mut self,
        name: impl Into<String>,
        click: &Coordinate,
    ) -> Result<Id, self::Error> {
        let threshold = self.config.junction_snap_threshold;
        let found = self
            .nearest_railway_point(click, threshold)
            .ok_or(self::Error::NoRailwayNearby(threshold))?;
        let split = Split {
            railway: found.railway,
            point: found.point,
            segment_index: found.segment_index,
        };
        self.add_junction(JunctionSpec::new(name, found.point), Some(split))
    }

    fn split_half(
        &self,
        original: &Railway,
        from: Id,
        to: Id,
        path: Vec<Coordinate>,
        segments: usize,
    ) -> Railway {
        let path = if path.len() > 2 {
            smooth_path(&path, segments)
        } else {
            path
        };
        Railway {
            id: new_id(),
            from,
            to,
            length_km: path_length(&path).as_kilometers(),
            path,
            kind: original.kind,
            cost: 0,
            created_at: Utc::now(),
        }
    }

    /// Removes the junction and every railway touching it; the line is not re-joined.
    pub fn remove_junction(&mut self, id: &str) {
        let before = self.junctions.len();
        self.junctions.retain(|junction| *junction.id != *id);
        if self.junctions.len() == before {
            return;
        }
        self.remove_railways_touching(id);
        debug!("Removed junction {id}");
    }

    pub fn add_railway(&mut self, spec: RailwaySpec) -> Result<Id, self::Error> {
        if spec.from == spec.to {
            return Err(self::Error::SameEndpoints);
        }
        if spec.path.len() < 2 {
            return Err(self::Error::InvalidPath);
        }
        for endpoint in [&spec.from, &spec.to] {
            if self.stop(endpoint).is_none() {
                return Err(self::Error::UnknownStop(endpoint.clone()));
            }
        }

        let path = if spec.path.len() > 2 {
            smooth_path(&spec.path, self.config.smoothing_segments)
        } else {
            spec.path
        };
        let length = path_length(&path);
        let cost = railway_cost(length, spec.kind);
        self.charge(cost)?;

        let railway = Railway {
            id: new_id(),
            from: spec.from,
            to: spec.to,
            path,
            kind: spec.kind,
            length_km: length.as_kilometers(),
            cost,
            created_at: Utc::now(),
        };
        debug!(
            "Built railway {} ({} -> {}, {length}) for {cost}",
            railway.id, railway.from, railway.to
        );
        let id = railway.id.clone();
        self.railways.push(railway);
        Ok(id)
    }

    /// Removes the railway and idles every train on it. Unknown ids are ignored.
    pub fn remove_railway(&mut self, id: &str) {
        let before = self.railways.len();
        self.railways.retain(|railway| *railway.id != *id);
        if self.railways.len() == before {
            return;
        }
        self.release_trains_on(id);
        if self.selected_railway.as_deref() == Some(id) {
            self.selected_railway = None;
        }
        debug!("Removed railway {id}");
    }

    fn remove_railways_touching(&mut self, stop: &str) {
        let removed: Vec<Id> = self
            .railways
            .iter()
            .filter(|railway| railway.touches(stop))
            .map(|railway| railway.id.clone())
            .collect();
        for id in removed {
            self.remove_railway(&id);
        }
    }

    fn release_trains_on(&mut self, railway: &str) {
        self.trains
            .iter_mut()
            .filter(|train| train.current_railway.as_deref() == Some(railway))
            .for_each(|train| {
                debug!("Idling train {} after its railway was removed", train.id);
                train.halt();
            });
    }

    /// Buys a train. It starts idle at the requested position.
    pub fn add_train(&mut self, spec: TrainSpec) -> Result<Id, self::Error> {
        let price = spec.price();
        self.charge(price)?;

        let speed = spec.speed.unwrap_or(spec.kind.default_speed());
        let train = Train {
            id: new_id(),
            name: spec.name.into(),
            kind: spec.kind,
            current_position: spec.position,
            current_railway: None,
            progress: 0.0,
            direction: Direction::Forward,
            speed,
            status: TrainStatus::Idle,
            route: Vec::new(),
            current_route_index: 0,
            purchase_price: price,
            created_at: Utc::now(),
            target_speed: speed,
            wait_time: 0.0,
            last_update: now_millis(),
        };
        debug!("Bought {:?} train {} for {price}", train.kind, train.id);
        let id = train.id.clone();
        self.trains.push(train);
        Ok(id)
    }

    /// Sells a train back at its purchase price.
    pub fn remove_train(&mut self, id: &str) -> Option<Train> {
        let index = self.trains.iter().position(|train| *train.id == *id)?;
        let train = self.trains.remove(index);
        self.money += train.purchase_price;
        self.total_spent -= train.purchase_price;
        debug!("Sold train {id} for {}", train.purchase_price);
        Some(train)
    }

    pub fn nearest_railway_point(
        &self,
        point: &Coordinate,
        threshold: Distance,
    ) -> Option<RailwayPoint> {
        nearest_point_on_any_railway(point, &self.railways, threshold)
    }

    pub fn validate_route<S: AsRef<str>>(&self, stops: &[S]) -> bool {
        validate_route(stops, &self.railways)
    }

    pub fn find_simple_route(&self, start: &Id, end: &Id) -> Vec<Id> {
        find_simple_route(start, end, &self.railways)
    }

    pub fn statistics(&self) -> Statistics {
        let count = |status: TrainStatus| {
            self.trains
                .iter()
                .filter(|train| train.status == status)
                .count()
        };
        Statistics {
            buildings: self.buildings.len(),
            stations: self
                .buildings
                .iter()
                .filter(|building| building.kind == BuildingKind::Station)
                .count(),
            junctions: self.junctions.len(),
            railways: self.railways.len(),
            railway_length: self.railways.iter().map(Railway::length).sum(),
            trains: self.trains.len(),
            moving_trains: count(TrainStatus::Moving),
            loading_trains: count(TrainStatus::Loading),
            idle_trains: count(TrainStatus::Idle),
            paused_trains: count(TrainStatus::Paused),
            money: self.money,
            total_spent: self.total_spent,
        }
    }
}

pub(crate) fn find_stop<'a>(
    id: &str,
    buildings: &'a [Building],
    junctions: &'a [Junction],
) -> Option<Stop<'a>> {
    buildings
        .iter()
        .find(|building| *building.id == *id)
        .map(Stop::Building)
        .or_else(|| {
            junctions
                .iter()
                .find(|junction| *junction.id == *id)
                .map(Stop::Junction)
        })
}
