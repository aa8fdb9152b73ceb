use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    db::geo_store::{AddressStore, CityStore, ProvinceStore},
    error::Result,
    handlers::AppState,
    models::geo::{AddressDto, CityDto, ProvinceDto},
};

pub async fn list_provinces(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let provinces = ProvinceStore::new(state.pool).get_all().await?;
    Ok((StatusCode::OK, Json(provinces)))
}

pub async fn get_province(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let province = ProvinceStore::new(state.pool).get_by_id(id).await?;
    Ok((StatusCode::OK, Json(province)))
}

pub async fn create_province(
    State(state): State<AppState>,
    Json(dto): Json<ProvinceDto>,
) -> Result<impl IntoResponse> {
    let province = ProvinceStore::new(state.pool).create(dto).await?;
    Ok((StatusCode::CREATED, Json(province)))
}

pub async fn update_province(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<ProvinceDto>,
) -> Result<impl IntoResponse> {
    let province = ProvinceStore::new(state.pool).update(id, dto).await?;
    Ok((StatusCode::OK, Json(province)))
}

pub async fn delete_province(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    ProvinceStore::new(state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_cities(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let cities = CityStore::new(state.pool).get_all().await?;
    Ok((StatusCode::OK, Json(cities)))
}

pub async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let city = CityStore::new(state.pool).get_by_id(id).await?;
    Ok((StatusCode::OK, Json(city)))
}

pub async fn create_city(
    State(state): State<AppState>,
    Json(dto): Json<CityDto>,
) -> Result<impl IntoResponse> {
    let city = CityStore::new(state.pool).create(dto).await?;
    Ok((StatusCode::CREATED, Json(city)))
}

pub async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<CityDto>,
) -> Result<impl IntoResponse> {
    let city = CityStore::new(state.pool).update(id, dto).await?;
    Ok((StatusCode::OK, Json(city)))
}

pub async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    CityStore::new(state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_addresses(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let addresses = AddressStore::new(state.pool).get_all().await?;
    Ok((StatusCode::OK, Json(addresses)))
}

pub async fn get_address(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let address = AddressStore::new(state.pool).get_by_id(id).await?;
    Ok((StatusCode::OK, Json(address)))
}

pub async fn create_address(
    State(state): State<AppState>,
    Json(dto): Json<AddressDto>,
) -> Result<impl IntoResponse> {
    let address = AddressStore::new(state.pool).create(dto).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

pub async fn update_address(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<AddressDto>,
) -> Result<impl IntoResponse> {
    let address = AddressStore::new(state.pool).update(id, dto).await?;
    Ok((StatusCode::OK, Json(address)))
}

pub async fn delete_address(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    AddressStore::new(state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
