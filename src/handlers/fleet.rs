use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    db::fleet_store::VehicleStore, error::Result, handlers::AppState, models::fleet::VehicleDto,
};

/// Vehicle listings carry the derived remaining-capacity column.
pub async fn list_vehicles(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let views = VehicleStore::new(state.pool).get_all_views().await?;
    Ok((StatusCode::OK, Json(views)))
}

pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> Result<impl IntoResponse> {
    let view = VehicleStore::new(state.pool).get_view(&plate).await?;
    Ok((StatusCode::OK, Json(view)))
}

pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(dto): Json<VehicleDto>,
) -> Result<impl IntoResponse> {
    let vehicle = VehicleStore::new(state.pool).create(dto).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(plate): Path<String>,
    Json(dto): Json<VehicleDto>,
) -> Result<impl IntoResponse> {
    let vehicle = VehicleStore::new(state.pool).update(&plate, dto).await?;
    Ok((StatusCode::OK, Json(vehicle)))
}

pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> Result<impl IntoResponse> {
    VehicleStore::new(state.pool).delete(&plate).await?;
    Ok(StatusCode::NO_CONTENT)
}
