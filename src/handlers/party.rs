use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    db::party_store::{ClientStore, EmployeeStore},
    error::Result,
    handlers::AppState,
    models::party::{ClientDto, EmployeeDto, EmployeeView},
};

/// Employee listings carry the derived seniority column, evaluated against
/// today's date.
pub async fn list_employees(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let employees = EmployeeStore::new(state.pool).get_all().await?;
    let today = Utc::now().date_naive();
    let views: Vec<EmployeeView> = employees
        .into_iter()
        .map(|e| EmployeeView::at(e, today))
        .collect();
    Ok((StatusCode::OK, Json(views)))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let employee = EmployeeStore::new(state.pool).get_by_id(id).await?;
    let view = EmployeeView::at(employee, Utc::now().date_naive());
    Ok((StatusCode::OK, Json(view)))
}

pub async fn create_employee(
    State(state): State<AppState>,
    Json(dto): Json<EmployeeDto>,
) -> Result<impl IntoResponse> {
    let employee = EmployeeStore::new(state.pool).create(dto).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<EmployeeDto>,
) -> Result<impl IntoResponse> {
    let employee = EmployeeStore::new(state.pool).update(id, dto).await?;
    Ok((StatusCode::OK, Json(employee)))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    EmployeeStore::new(state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_clients(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let clients = ClientStore::new(state.pool).get_all().await?;
    Ok((StatusCode::OK, Json(clients)))
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let client = ClientStore::new(state.pool).get_by_id(id).await?;
    Ok((StatusCode::OK, Json(client)))
}

pub async fn create_client(
    State(state): State<AppState>,
    Json(dto): Json<ClientDto>,
) -> Result<impl IntoResponse> {
    let client = ClientStore::new(state.pool).create(dto).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<ClientDto>,
) -> Result<impl IntoResponse> {
    let client = ClientStore::new(state.pool).update(id, dto).await?;
    Ok((StatusCode::OK, Json(client)))
}

pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    ClientStore::new(state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
