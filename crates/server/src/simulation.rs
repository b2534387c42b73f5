use std::sync::Arc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::state::{AppState, World};

/// Drives the scheduler at the configured frame rate and parks while nothing moves.
pub async fn run(state: Arc<AppState>) {
    let frame = state.world.lock().await.network.config().frame;
    let mut interval = time::interval(std::time::Duration::from_secs_f64(frame.as_seconds()));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!("Simulation loop running every {:.2} ms", frame.as_millis());

    loop {
        interval.tick().await;
        let schedule = {
            let mut world = state.world.lock().await;
            let World { network, scheduler } = &mut *world;
            scheduler.tick(network)
        };
        if !schedule.is_active() {
            debug!("Simulation idle");
            state.wake.notified().await;
            debug!("Simulation woken");
            interval.reset();
        }
    }
}
