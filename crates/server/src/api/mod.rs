mod game;
mod network;
mod trains;

pub use game::*;
pub use network::*;
pub use trains::*;

use axum::http::StatusCode;
use tracing::warn;
use tracklayer::{movement, network as net};

fn network_error(err: net::Error) -> StatusCode {
    warn!("Rejected network change: {err}");
    match err {
        net::Error::InsufficientFunds { .. } => StatusCode::PAYMENT_REQUIRED,
        net::Error::UnknownStop(_)
        | net::Error::UnknownRailway(_)
        | net::Error::NoRailwayNearby(_) => StatusCode::NOT_FOUND,
        net::Error::SameEndpoints | net::Error::InvalidPath | net::Error::InvalidSplit { .. } => {
            StatusCode::BAD_REQUEST
        }
    }
}

fn movement_error(err: movement::Error) -> StatusCode {
    warn!("Rejected train command: {err}");
    match err {
        movement::Error::UnknownTrain(_) => StatusCode::NOT_FOUND,
        movement::Error::RouteTooShort | movement::Error::NoDirectConnection { .. } => {
            StatusCode::BAD_REQUEST
        }
    }
}
