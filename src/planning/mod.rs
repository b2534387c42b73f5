mod drawing;
mod route;

pub use drawing::*;
pub use route::*;

use thiserror::Error;

use crate::{movement, network};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("No session is in progress")]
    NotActive,
    #[error("A session is already in progress")]
    AlreadyActive,
    #[error("Every consecutive pair of stops must be directly connected")]
    InvalidRoute,
    #[error(transparent)]
    Network(#[from] network::Error),
    #[error(transparent)]
    Movement(#[from] movement::Error),
}
