use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::db::DbPool;

pub mod catalog;
pub mod fleet;
pub mod geo;
pub mod party;
pub mod reports;
pub mod shipment;

/// Shared handler state; stores are built per request from the pool.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

/// Build the admin API router: one resource scope per entity plus the
/// read-only report endpoints.
pub fn router(pool: DbPool) -> Router {
    let state = AppState { pool };

    Router::new()
        .route("/provinces", get(geo::list_provinces).post(geo::create_province))
        .route(
            "/provinces/{id}",
            get(geo::get_province)
                .put(geo::update_province)
                .delete(geo::delete_province),
        )
        .route("/cities", get(geo::list_cities).post(geo::create_city))
        .route(
            "/cities/{id}",
            get(geo::get_city).put(geo::update_city).delete(geo::delete_city),
        )
        .route("/addresses", get(geo::list_addresses).post(geo::create_address))
        .route(
            "/addresses/{id}",
            get(geo::get_address)
                .put(geo::update_address)
                .delete(geo::delete_address),
        )
        .route(
            "/document-types",
            get(catalog::list_document_types).post(catalog::create_document_type),
        )
        .route(
            "/document-types/{id}",
            get(catalog::get_document_type)
                .put(catalog::update_document_type)
                .delete(catalog::delete_document_type),
        )
        .route(
            "/vehicle-types",
            get(catalog::list_vehicle_types).post(catalog::create_vehicle_type),
        )
        .route(
            "/vehicle-types/{id}",
            get(catalog::get_vehicle_type)
                .put(catalog::update_vehicle_type)
                .delete(catalog::delete_vehicle_type),
        )
        .route("/branches", get(catalog::list_branches).post(catalog::create_branch))
        .route(
            "/branches/{id}",
            get(catalog::get_branch)
                .put(catalog::update_branch)
                .delete(catalog::delete_branch),
        )
        .route("/employees", get(party::list_employees).post(party::create_employee))
        .route(
            "/employees/{id}",
            get(party::get_employee)
                .put(party::update_employee)
                .delete(party::delete_employee),
        )
        .route("/clients", get(party::list_clients).post(party::create_client))
        .route(
            "/clients/{id}",
            get(party::get_client)
                .put(party::update_client)
                .delete(party::delete_client),
        )
        .route("/vehicles", get(fleet::list_vehicles).post(fleet::create_vehicle))
        .route(
            "/vehicles/{plate}",
            get(fleet::get_vehicle)
                .put(fleet::update_vehicle)
                .delete(fleet::delete_vehicle),
        )
        .route(
            "/shipments",
            get(shipment::list_shipments).post(shipment::create_shipment),
        )
        .route(
            "/shipments/{id}",
            get(shipment::get_shipment)
                .put(shipment::update_shipment)
                .delete(shipment::delete_shipment),
        )
        .route("/packages", get(shipment::list_packages).post(shipment::create_package))
        .route(
            "/packages/{id}",
            get(shipment::get_package)
                .put(shipment::update_package)
                .delete(shipment::delete_package),
        )
        .route("/reports/shipment-loads", get(reports::shipment_loads))
        .route(
            "/reports/employee-vehicle-counts",
            get(reports::employee_vehicle_counts),
        )
        .route("/reports/staffed-branches", get(reports::staffed_branches))
        .route("/reports/heavy-haulers", get(reports::heavy_haulers))
        .route(
            "/reports/client-last-shipments",
            get(reports::client_last_shipments),
        )
        .route(
            "/reports/top-province",
            get(reports::province_with_most_cities),
        )
        .route(
            "/reports/employees-by-province",
            get(reports::employees_in_province),
        )
        .route("/reports/package-search", get(reports::package_search))
        .route(
            "/reports/vehicle-type-stats",
            get(reports::vehicle_type_stats),
        )
        .route(
            "/reports/idle-employees",
            get(reports::employees_without_vehicles),
        )
        .route("/health", get(|| async { "Transporte admin API is running." }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
