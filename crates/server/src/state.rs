use std::path::PathBuf;
use tokio::sync::{Mutex, Notify};
use tracklayer::prelude::*;

/// Everything the simulation loop and the handlers share.
pub struct World {
    pub network: Network,
    pub scheduler: Scheduler<SystemClock>,
}

impl World {
    pub fn new(network: Network) -> Self {
        let scheduler = Scheduler::new(SystemClock::default(), network.config());
        Self { network, scheduler }
    }
}

pub struct AppState {
    pub save_path: PathBuf,
    pub world: Mutex<World>,
    /// Signals the simulation loop that trains may need ticking again.
    pub wake: Notify,
}

impl AppState {
    pub fn new(save_path: PathBuf, network: Network) -> Self {
        Self {
            save_path,
            world: Mutex::new(World::new(network)),
            wake: Notify::new(),
        }
    }

    /// Wakes the scheduler after a change that can set trains in motion.
    pub fn wake(&self, world: &mut World) {
        world.scheduler.wake();
        self.wake.notify_one();
    }
}
