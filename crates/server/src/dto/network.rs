use serde::{Deserialize, Serialize};
use tracklayer::prelude::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdDto {
    pub id: String,
}

impl IdDto {
    pub fn from(id: &Id) -> Self {
        Self { id: id.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailwayPointDto {
    pub railway: String,
    pub point: Coordinate,
    pub segment_index: usize,
    pub distance_m: f64,
}

impl RailwayPointDto {
    pub fn from(found: &RailwayPoint) -> Self {
        Self {
            railway: found.railway.to_string(),
            point: found.point,
            segment_index: found.segment_index,
            distance_m: found.distance.as_meters(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDto {
    pub buildings: usize,
    pub stations: usize,
    pub junctions: usize,
    pub railways: usize,
    pub railway_length_km: f64,
    pub trains: usize,
    pub moving_trains: usize,
    pub loading_trains: usize,
    pub idle_trains: usize,
    pub paused_trains: usize,
    pub money: i64,
    pub total_spent: i64,
    pub game_speed: f64,
}

impl StatisticsDto {
    pub fn from(stats: Statistics, game_speed: f64) -> Self {
        Self {
            buildings: stats.buildings,
            stations: stats.stations,
            junctions: stats.junctions,
            railways: stats.railways,
            railway_length_km: stats.railway_length.as_kilometers(),
            trains: stats.trains,
            moving_trains: stats.moving_trains,
            loading_trains: stats.loading_trains,
            idle_trains: stats.idle_trains,
            paused_trains: stats.paused_trains,
            money: stats.money,
            total_spent: stats.total_spent,
            game_speed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationDto {
    pub valid: bool,
}
