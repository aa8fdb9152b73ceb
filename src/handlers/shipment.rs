use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    db::shipment_store::{PackageStore, ShipmentStore},
    error::Result,
    handlers::AppState,
    models::shipment::{PackageDto, PackageView, ShipmentDto},
};

pub async fn list_shipments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let shipments = ShipmentStore::new(state.pool).get_all().await?;
    Ok((StatusCode::OK, Json(shipments)))
}

pub async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let shipment = ShipmentStore::new(state.pool).get_by_id(id).await?;
    Ok((StatusCode::OK, Json(shipment)))
}

pub async fn create_shipment(
    State(state): State<AppState>,
    Json(dto): Json<ShipmentDto>,
) -> Result<impl IntoResponse> {
    let shipment = ShipmentStore::new(state.pool).create(dto).await?;
    Ok((StatusCode::CREATED, Json(shipment)))
}

pub async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<ShipmentDto>,
) -> Result<impl IntoResponse> {
    let shipment = ShipmentStore::new(state.pool).update(id, dto).await?;
    Ok((StatusCode::OK, Json(shipment)))
}

pub async fn delete_shipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    ShipmentStore::new(state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Package listings carry the derived volume column.
pub async fn list_packages(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let packages = PackageStore::new(state.pool).get_all().await?;
    let views: Vec<PackageView> = packages.into_iter().map(PackageView::from).collect();
    Ok((StatusCode::OK, Json(views)))
}

pub async fn get_package(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let package = PackageStore::new(state.pool).get_by_id(id).await?;
    Ok((StatusCode::OK, Json(PackageView::from(package))))
}

pub async fn create_package(
    State(state): State<AppState>,
    Json(dto): Json<PackageDto>,
) -> Result<impl IntoResponse> {
    let package = PackageStore::new(state.pool).create(dto).await?;
    Ok((StatusCode::CREATED, Json(PackageView::from(package))))
}

pub async fn update_package(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<PackageDto>,
) -> Result<impl IntoResponse> {
    let package = PackageStore::new(state.pool).update(id, dto).await?;
    Ok((StatusCode::OK, Json(PackageView::from(package))))
}

pub async fn delete_package(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    PackageStore::new(state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
