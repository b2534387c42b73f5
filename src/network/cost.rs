use crate::{
    network::{BuildingKind, RailwayKind},
    shared::geo::Distance,
};

/// Floor on the price of any railway, however short.
pub const MINIMUM_RAILWAY_COST: i64 = 10_000;

impl BuildingKind {
    pub const fn base_cost(&self) -> i64 {
        match self {
            BuildingKind::Station => 25_000,
            BuildingKind::Factory => 40_000,
            BuildingKind::Warehouse => 30_000,
            BuildingKind::City => 60_000,
        }
    }
}

impl RailwayKind {
    pub const fn cost_per_km(&self) -> i64 {
        match self {
            RailwayKind::Passenger => 50_000,
            RailwayKind::Cargo => 40_000,
        }
    }
}

pub fn building_cost(kind: BuildingKind, level: u32) -> i64 {
    kind.base_cost() * i64::from(level)
}

pub fn railway_cost(length: Distance, kind: RailwayKind) -> i64 {
    let cost = (length.as_kilometers() * kind.cost_per_km() as f64).round() as i64;
    cost.max(MINIMUM_RAILWAY_COST)
}
