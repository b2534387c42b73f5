pub mod config;
pub mod movement;
pub mod network;
pub mod persistence;
pub mod planning;
pub mod shared;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::movement::{Clock, ManualClock, Schedule, Scheduler, SystemClock};
    pub use crate::network::{
        Building, BuildingKind, BuildingSpec, Direction, Id, Junction, JunctionSpec, Network,
        Railway, RailwayKind, RailwayPoint, RailwaySpec, Split, Statistics, Stop, Train,
        TrainKind, TrainSpec, TrainStatus,
    };
    pub use crate::persistence::Snapshot;
    pub use crate::planning::{RailwayDrawing, RoutePlanner};
    pub use crate::shared::{Coordinate, Distance, Duration, Identifiable};
}
