mod api;
mod dto;
mod simulation;
mod state;

use crate::state::AppState;
use axum::routing::{delete, get, post};
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info, warn};
use tracklayer::{persistence, prelude::*};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SAVE_PATH: &str = "tracklayer-save.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let args: Vec<String> = std::env::args().collect();
    let save_path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH));
    let port = match args.get(2).map(|value| value.parse::<u16>()) {
        Some(Ok(port)) => port,
        Some(Err(err)) => {
            error!("Invalid port: {err}");
            std::process::exit(1);
        }
        None => DEFAULT_PORT,
    };

    let mut network = Network::new(Config::default());
    if persistence::has_saved_game(&save_path) {
        if network.load_from_path(&save_path) {
            info!("Loaded saved game from {}", save_path.display());
        } else {
            warn!("Ignoring unreadable save at {}", save_path.display());
        }
    }
    let state = Arc::new(AppState::new(save_path, network));
    {
        let mut world = state.world.lock().await;
        state.wake(&mut world);
    }
    tokio::spawn(simulation::run(state.clone()));

    let app = axum::Router::new()
        .route("/network", get(api::snapshot))
        .route("/statistics", get(api::statistics))
        .route("/near", get(api::near))
        .route("/buildings", post(api::add_building))
        .route("/buildings/{id}", delete(api::remove_building))
        .route("/junctions", post(api::add_junction))
        .route("/junctions/{id}", delete(api::remove_junction))
        .route("/railways", post(api::add_railway))
        .route("/railways/{id}", delete(api::remove_railway))
        .route("/routes/validate", post(api::validate_route))
        .route("/trains", post(api::add_train))
        .route("/trains/{id}", delete(api::remove_train))
        .route("/trains/{id}/start", post(api::start_train))
        .route("/trains/{id}/pause", post(api::pause_train))
        .route("/trains/{id}/resume", post(api::resume_train))
        .route("/trains/{id}/abort", post(api::abort_train))
        .route("/speed", post(api::set_speed))
        .route("/game/save", post(api::save))
        .route("/game/load", post(api::load))
        .route("/game/import", post(api::import))
        .route("/game/export", get(api::export))
        .route("/game/reset", post(api::reset))
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}
