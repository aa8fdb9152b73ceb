use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    db::catalog_store::{BranchStore, DocumentTypeStore, VehicleTypeStore},
    error::Result,
    handlers::AppState,
    models::catalog::{BranchDto, CatalogDto},
};

pub async fn list_document_types(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let types = DocumentTypeStore::new(state.pool).get_all().await?;
    Ok((StatusCode::OK, Json(types)))
}

pub async fn get_document_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let doc_type = DocumentTypeStore::new(state.pool).get_by_id(id).await?;
    Ok((StatusCode::OK, Json(doc_type)))
}

pub async fn create_document_type(
    State(state): State<AppState>,
    Json(dto): Json<CatalogDto>,
) -> Result<impl IntoResponse> {
    let doc_type = DocumentTypeStore::new(state.pool).create(dto).await?;
    Ok((StatusCode::CREATED, Json(doc_type)))
}

pub async fn update_document_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<CatalogDto>,
) -> Result<impl IntoResponse> {
    let doc_type = DocumentTypeStore::new(state.pool).update(id, dto).await?;
    Ok((StatusCode::OK, Json(doc_type)))
}

pub async fn delete_document_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    DocumentTypeStore::new(state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_vehicle_types(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let types = VehicleTypeStore::new(state.pool).get_all().await?;
    Ok((StatusCode::OK, Json(types)))
}

pub async fn get_vehicle_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let vehicle_type = VehicleTypeStore::new(state.pool).get_by_id(id).await?;
    Ok((StatusCode::OK, Json(vehicle_type)))
}

pub async fn create_vehicle_type(
    State(state): State<AppState>,
    Json(dto): Json<CatalogDto>,
) -> Result<impl IntoResponse> {
    let vehicle_type = VehicleTypeStore::new(state.pool).create(dto).await?;
    Ok((StatusCode::CREATED, Json(vehicle_type)))
}

pub async fn update_vehicle_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<CatalogDto>,
) -> Result<impl IntoResponse> {
    let vehicle_type = VehicleTypeStore::new(state.pool).update(id, dto).await?;
    Ok((StatusCode::OK, Json(vehicle_type)))
}

pub async fn delete_vehicle_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    VehicleTypeStore::new(state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_branches(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let branches = BranchStore::new(state.pool).get_all().await?;
    Ok((StatusCode::OK, Json(branches)))
}

pub async fn get_branch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let branch = BranchStore::new(state.pool).get_by_id(id).await?;
    Ok((StatusCode::OK, Json(branch)))
}

pub async fn create_branch(
    State(state): State<AppState>,
    Json(dto): Json<BranchDto>,
) -> Result<impl IntoResponse> {
    let branch = BranchStore::new(state.pool).create(dto).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

pub async fn update_branch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<BranchDto>,
) -> Result<impl IntoResponse> {
    let branch = BranchStore::new(state.pool).update(id, dto).await?;
    Ok((StatusCode::OK, Json(branch)))
}

pub async fn delete_branch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    BranchStore::new(state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
