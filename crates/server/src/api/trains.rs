use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;
use tracklayer::prelude::*;

use crate::{
    api::{movement_error, network_error},
    dto::{IdDto, RouteRequest, SpeedRequest},
    state::AppState,
};

pub async fn add_train(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<TrainSpec>,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    let id = world.network.add_train(spec).map_err(network_error)?;
    Ok(Json(IdDto::from(&id)).into_response())
}

pub async fn remove_train(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    match world.network.remove_train(&id) {
        Some(_) => Ok(().into_response()),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn start_train(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Response, StatusCode> {
    let route: Vec<Id> = request.stops.into_iter().map(Id::from).collect();
    let mut world = state.world.lock().await;
    world
        .network
        .start_train(&id, route)
        .map_err(movement_error)?;
    state.wake(&mut world);
    Ok(().into_response())
}

pub async fn pause_train(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    world.network.pause_train(&id).map_err(movement_error)?;
    Ok(().into_response())
}

pub async fn resume_train(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    world.network.resume_train(&id).map_err(movement_error)?;
    state.wake(&mut world);
    Ok(().into_response())
}

pub async fn abort_train(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    world.network.abort_train(&id).map_err(movement_error)?;
    Ok(().into_response())
}

pub async fn set_speed(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SpeedRequest>,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    let config = world.network.config().clone();
    world.scheduler.set_game_speed(request.speed, &config);
    info!("Game speed is now {}", world.scheduler.game_speed());
    state.wake(&mut world);
    Ok(Json(world.scheduler.game_speed()).into_response())
}
