use serde::Deserialize;
use tracklayer::prelude::*;

#[derive(Debug, Clone, Deserialize)]
pub struct JunctionRequest {
    pub name: String,
    pub position: Coordinate,
    /// Snap onto the nearest railway and split it at the junction.
    #[serde(default)]
    pub branch: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteRequest {
    pub stops: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeedRequest {
    pub speed: f64,
}
