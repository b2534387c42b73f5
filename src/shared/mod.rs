pub mod geo;
pub mod smoothing;
pub mod time;

pub use geo::*;
pub use smoothing::*;
pub use time::*;

/// Anything that carries a stable identity and a display name.
pub trait Identifiable {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}
