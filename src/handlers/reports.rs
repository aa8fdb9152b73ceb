use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::{db::reports, error::Result, handlers::AppState};

pub async fn shipment_loads(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let rows = reports::shipment_loads(&state.pool).await?;
    Ok((StatusCode::OK, Json(rows)))
}

pub async fn employee_vehicle_counts(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let rows = reports::employee_vehicle_counts(&state.pool).await?;
    Ok((StatusCode::OK, Json(rows)))
}

#[derive(Deserialize)]
pub struct StaffedBranchesQuery {
    #[serde(default = "default_min_employees")]
    pub min_employees: i64,
}

fn default_min_employees() -> i64 {
    5
}

pub async fn staffed_branches(
    State(state): State<AppState>,
    Query(params): Query<StaffedBranchesQuery>,
) -> Result<impl IntoResponse> {
    let rows = reports::branches_with_headcount(&state.pool, params.min_employees).await?;
    Ok((StatusCode::OK, Json(rows)))
}

#[derive(Deserialize)]
pub struct HeavyHaulersQuery {
    #[serde(default = "default_min_weight")]
    pub min_weight: f64,
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

fn default_min_weight() -> f64 {
    50.0
}

fn default_window_days() -> i64 {
    30
}

/// Vehicles that carried a package over the weight threshold within the
/// lookback window (default: over 50 within the last 30 days).
pub async fn heavy_haulers(
    State(state): State<AppState>,
    Query(params): Query<HeavyHaulersQuery>,
) -> Result<impl IntoResponse> {
    let since = Utc::now() - Duration::days(params.window_days);
    let rows = reports::vehicles_with_heavy_packages(&state.pool, since, params.min_weight).await?;
    Ok((StatusCode::OK, Json(rows)))
}

pub async fn client_last_shipments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let rows = reports::client_last_shipments(&state.pool).await?;
    Ok((StatusCode::OK, Json(rows)))
}

pub async fn province_with_most_cities(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let row = reports::province_with_most_cities(&state.pool).await?;
    Ok((StatusCode::OK, Json(row)))
}

#[derive(Deserialize)]
pub struct ProvinceQuery {
    pub province: String,
}

pub async fn employees_in_province(
    State(state): State<AppState>,
    Query(params): Query<ProvinceQuery>,
) -> Result<impl IntoResponse> {
    let rows = reports::employees_in_province(&state.pool, &params.province).await?;
    Ok((StatusCode::OK, Json(rows)))
}

#[derive(Deserialize)]
pub struct PackageSearchQuery {
    pub term: String,
}

pub async fn package_search(
    State(state): State<AppState>,
    Query(params): Query<PackageSearchQuery>,
) -> Result<impl IntoResponse> {
    let rows = reports::packages_matching_description(&state.pool, &params.term).await?;
    Ok((StatusCode::OK, Json(rows)))
}

pub async fn vehicle_type_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let rows = reports::vehicle_type_stats(&state.pool).await?;
    Ok((StatusCode::OK, Json(rows)))
}

pub async fn employees_without_vehicles(
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let rows = reports::employees_without_vehicles(&state.pool).await?;
    Ok((StatusCode::OK, Json(rows)))
}
