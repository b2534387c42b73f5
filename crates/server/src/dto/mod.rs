mod network;
mod request;

pub use network::*;
pub use request::*;
