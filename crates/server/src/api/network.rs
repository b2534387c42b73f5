use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracklayer::prelude::*;

use crate::{
    api::network_error,
    dto::{IdDto, JunctionRequest, RailwayPointDto, RouteRequest, StatisticsDto, ValidationDto},
    state::AppState,
};

pub async fn snapshot(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let world = state.world.lock().await;
    Ok(Json(world.network.snapshot()).into_response())
}

pub async fn statistics(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let world = state.world.lock().await;
    let stats = StatisticsDto::from(world.network.statistics(), world.scheduler.game_speed());
    Ok(Json(stats).into_response())
}

pub async fn add_building(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<BuildingSpec>,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    let id = world.network.add_building(spec).map_err(network_error)?;
    Ok(Json(IdDto::from(&id)).into_response())
}

pub async fn remove_building(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    world.network.remove_building(&id);
    Ok(().into_response())
}

pub async fn add_junction(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JunctionRequest>,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    let id = if request.branch {
        world
            .network
            .add_branch_junction(request.name, &request.position)
    } else {
        world
            .network
            .add_junction(JunctionSpec::new(request.name, request.position), None)
    }
    .map_err(network_error)?;
    Ok(Json(IdDto::from(&id)).into_response())
}

pub async fn remove_junction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    world.network.remove_junction(&id);
    Ok(().into_response())
}

pub async fn add_railway(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<RailwaySpec>,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    let id = world.network.add_railway(spec).map_err(network_error)?;
    Ok(Json(IdDto::from(&id)).into_response())
}

pub async fn remove_railway(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let mut world = state.world.lock().await;
    world.network.remove_railway(&id);
    Ok(().into_response())
}

pub async fn near(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let latitude: f64 = parse_param(&params, "lat")?.ok_or(StatusCode::BAD_REQUEST)?;
    let longitude: f64 = parse_param(&params, "lng")?.ok_or(StatusCode::BAD_REQUEST)?;

    let world = state.world.lock().await;
    let threshold = match parse_param::<f64>(&params, "threshold")? {
        Some(meters) => Distance::from_meters(meters),
        None => world.network.config().nearest_threshold,
    };
    let found = world
        .network
        .nearest_railway_point(&Coordinate::new(latitude, longitude), threshold);
    Ok(Json(found.as_ref().map(RailwayPointDto::from)).into_response())
}

pub async fn validate_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Response, StatusCode> {
    let world = state.world.lock().await;
    let valid = world.network.validate_route(request.stops.as_slice());
    Ok(Json(ValidationDto { valid }).into_response())
}

fn parse_param<T: std::str::FromStr>(
    params: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, StatusCode> {
    match params.get(key) {
        Some(value) => match value.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(StatusCode::BAD_REQUEST),
        },
        None => Ok(None),
    }
}
