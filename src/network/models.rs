use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::shared::{
    Identifiable,
    geo::{Coordinate, Distance},
    time::{Duration, Timestamp},
};

/// Identity shared by every entity. Buildings and junctions draw from the same id space.
pub type Id = Arc<str>;

pub(crate) fn new_id() -> Id {
    uuid::Uuid::new_v4().to_string().into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    /// The only kind trains dwell at.
    Station,
    Factory,
    Warehouse,
    City,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: Id,
    #[serde(rename = "type")]
    pub kind: BuildingKind,
    pub name: Arc<str>,
    pub position: Coordinate,
    /// Upgrade level, at least 1. Scales construction cost linearly.
    pub level: u32,
    pub created_at: Timestamp,
}

impl Identifiable for Building {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A zero-footprint node that lets one physical line branch into several edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Junction {
    pub id: Id,
    pub position: Coordinate,
    pub name: Arc<str>,
    pub created_at: Timestamp,
}

impl Identifiable for Junction {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Anything a railway can terminate at or a route can target.
#[derive(Debug, Clone, Copy)]
pub enum Stop<'a> {
    Building(&'a Building),
    Junction(&'a Junction),
}

impl Stop<'_> {
    pub fn position(&self) -> Coordinate {
        match self {
            Stop::Building(building) => building.position,
            Stop::Junction(junction) => junction.position,
        }
    }

    pub fn is_station(&self) -> bool {
        matches!(self, Stop::Building(building) if building.kind == BuildingKind::Station)
    }

    pub fn is_junction(&self) -> bool {
        matches!(self, Stop::Junction(_))
    }
}

impl Identifiable for Stop<'_> {
    fn id(&self) -> &str {
        match self {
            Stop::Building(building) => &building.id,
            Stop::Junction(junction) => &junction.id,
        }
    }

    fn name(&self) -> &str {
        match self {
            Stop::Building(building) => &building.name,
            Stop::Junction(junction) => &junction.name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RailwayKind {
    Passenger,
    Cargo,
}

/// A railway edge between two stops with frozen, already smoothed geometry.
///
/// `length` and `cost` are derived once at creation. Endpoints never move, so
/// they are never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Railway {
    pub id: Id,
    pub from: Id,
    pub to: Id,
    /// At least two points; the first sits on `from`, the last on `to`.
    pub path: Vec<Coordinate>,
    #[serde(rename = "type")]
    pub kind: RailwayKind,
    /// Kilometers, summed over `path` with the haversine formula.
    #[serde(rename = "length")]
    pub length_km: f64,
    pub cost: i64,
    pub created_at: Timestamp,
}

impl Identifiable for Railway {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }
}

impl Railway {
    pub fn length(&self) -> Distance {
        Distance::from_kilometers(self.length_km)
    }

    /// True when the endpoints equal `a` and `b` in either order.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (*self.from == *a && *self.to == *b) || (*self.from == *b && *self.to == *a)
    }

    pub fn touches(&self, stop: &str) -> bool {
        *self.from == *stop || *self.to == *stop
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainKind {
    Passenger,
    Cargo,
}

impl TrainKind {
    pub const fn default_price(&self) -> i64 {
        match self {
            TrainKind::Passenger => 150_000,
            TrainKind::Cargo => 200_000,
        }
    }

    /// Cruising speed in km/h.
    pub const fn default_speed(&self) -> f64 {
        match self {
            TrainKind::Passenger => 60.0,
            TrainKind::Cargo => 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Progress increases, traveling `from` -> `to`.
    #[default]
    Forward,
    /// Progress decreases, traveling `to` -> `from`.
    Backward,
}

impl Direction {
    /// Progress value at which a traversal in this direction begins.
    pub const fn entry_progress(&self) -> f64 {
        match self {
            Direction::Forward => 0.0,
            Direction::Backward => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainStatus {
    #[default]
    Idle,
    Moving,
    Loading,
    Paused,
}

impl TrainStatus {
    /// Moving and loading trains need further ticks.
    pub fn is_active(&self) -> bool {
        matches!(self, TrainStatus::Moving | TrainStatus::Loading)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Train {
    pub id: Id,
    pub name: Arc<str>,
    #[serde(rename = "type")]
    pub kind: TrainKind,
    pub current_position: Coordinate,
    /// Railway currently occupied, if any.
    pub current_railway: Option<Id>,
    /// Fraction of the current railway's length covered, in [0, 1].
    pub progress: f64,
    pub direction: Direction,
    /// km/h
    pub speed: f64,
    pub status: TrainStatus,
    /// Full itinerary of stop ids.
    pub route: Vec<Id>,
    /// Index into `route` of the stop last departed from or arrived at.
    pub current_route_index: usize,
    pub purchase_price: i64,
    pub created_at: Timestamp,
    // Reserved for acceleration modelling.
    #[serde(default)]
    pub target_speed: f64,
    /// Remaining dwell in milliseconds, only meaningful while loading.
    #[serde(default)]
    pub wait_time: f64,
    /// Unix milliseconds.
    #[serde(default)]
    pub last_update: i64,
}

impl Identifiable for Train {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Train {
    pub fn remaining_wait(&self) -> Duration {
        Duration::from_millis(self.wait_time)
    }

    /// The `(current, next)` stop pair of the leg the train is on or about to take.
    pub fn current_leg(&self) -> Option<(&Id, &Id)> {
        let from = self.route.get(self.current_route_index)?;
        let to = self.route.get(self.current_route_index + 1)?;
        Some((from, to))
    }

    /// Stops the train where it stands and releases its railway.
    pub(crate) fn halt(&mut self) {
        self.status = TrainStatus::Idle;
        self.current_railway = None;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingSpec {
    #[serde(rename = "type")]
    pub kind: BuildingKind,
    pub name: String,
    pub position: Coordinate,
    #[serde(default = "default_level")]
    pub level: u32,
}

fn default_level() -> u32 {
    1
}

impl BuildingSpec {
    pub fn new(kind: BuildingKind, name: impl Into<String>, position: Coordinate) -> Self {
        Self {
            kind,
            name: name.into(),
            position,
            level: 1,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JunctionSpec {
    pub name: String,
    pub position: Coordinate,
}

impl JunctionSpec {
    pub fn new(name: impl Into<String>, position: Coordinate) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Where to cut an existing railway when a junction is inserted on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub railway: Id,
    pub point: Coordinate,
    /// Index of the path segment (`path[i]..path[i + 1]`) containing `point`.
    pub segment_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailwaySpec {
    pub from: Id,
    pub to: Id,
    /// Raw waypoints, smoothed on creation when there are more than two.
    pub path: Vec<Coordinate>,
    #[serde(rename = "type")]
    pub kind: RailwayKind,
}

impl RailwaySpec {
    pub fn new(
        from: impl Into<Id>,
        to: impl Into<Id>,
        path: Vec<Coordinate>,
        kind: RailwayKind,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            path,
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TrainKind,
    pub position: Coordinate,
    /// Defaults to the kind's cruising speed.
    #[serde(default)]
    pub speed: Option<f64>,
    /// Defaults to the kind's catalogue price.
    #[serde(default)]
    pub purchase_price: Option<i64>,
}

impl TrainSpec {
    pub fn new(name: impl Into<String>, kind: TrainKind, position: Coordinate) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            speed: None,
            purchase_price: None,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_price(mut self, price: i64) -> Self {
        self.purchase_price = Some(price);
        self
    }

    pub fn price(&self) -> i64 {
        self.purchase_price.unwrap_or(self.kind.default_price())
    }
}
