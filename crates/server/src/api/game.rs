use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::state::AppState;

pub async fn save(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let world = state.world.lock().await;
    world
        .network
        .try_save_to_path(&state.save_path)
        .map_err(|err| {
            error!("Failed to save game: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    info!("Saved game to {}", state.save_path.display());
    Ok(().into_response())
}

pub async fn load(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    if !world.network.load_from_path(&state.save_path) {
        return Err(StatusCode::NOT_FOUND);
    }
    state.wake(&mut world);
    Ok(().into_response())
}

pub async fn import(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    world.network.try_import_json(&body).map_err(|err| {
        error!("Failed to import game: {err}");
        StatusCode::BAD_REQUEST
    })?;
    state.wake(&mut world);
    Ok(().into_response())
}

pub async fn export(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let world = state.world.lock().await;
    let json = world.network.export_json().map_err(|err| {
        error!("Failed to export game: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(json.into_response())
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    world.network.clear_all();
    info!("Started a new game");
    Ok(().into_response())
}
