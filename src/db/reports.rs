//! Read-only reporting queries over the entity graph. Each function is an
//! independent snapshot query against the pool; nothing here mutates state.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::{
    db::DbPool,
    error::Result,
    models::{fleet::Vehicle, named::normalize, party::Employee, shipment::Package},
};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShipmentLoad {
    pub shipment_id: i64,
    pub package_count: i64,
    pub total_weight: f64,
}

/// Package count and total weight per shipment, heaviest first.
pub async fn shipment_loads(pool: &DbPool) -> Result<Vec<ShipmentLoad>> {
    let rows = sqlx::query_as::<_, ShipmentLoad>(
        r#"
        SELECT s.id AS shipment_id,
               COUNT(p.id) AS package_count,
               COALESCE(SUM(p.weight), 0.0) AS total_weight
        FROM shipments s
        LEFT JOIN packages p ON p.shipment_id = s.id
        GROUP BY s.id
        ORDER BY total_weight DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EmployeeVehicleCount {
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub vehicle_count: i64,
}

/// Employees with the number of vehicles they are responsible for.
pub async fn employee_vehicle_counts(pool: &DbPool) -> Result<Vec<EmployeeVehicleCount>> {
    let rows = sqlx::query_as::<_, EmployeeVehicleCount>(
        r#"
        SELECT e.id AS employee_id,
               e.first_name,
               e.last_name,
               COUNT(v.plate) AS vehicle_count
        FROM employees e
        LEFT JOIN vehicles v ON v.employee_id = e.id
        GROUP BY e.id
        ORDER BY vehicle_count DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BranchHeadcount {
    pub branch_id: i64,
    pub name: String,
    pub employee_count: i64,
}

/// Branches staffed with at least `min_employees` employees.
pub async fn branches_with_headcount(
    pool: &DbPool,
    min_employees: i64,
) -> Result<Vec<BranchHeadcount>> {
    let rows = sqlx::query_as::<_, BranchHeadcount>(
        r#"
        SELECT b.id AS branch_id,
               b.name,
               COUNT(e.id) AS employee_count
        FROM branches b
        LEFT JOIN employees e ON e.branch_id = b.id
        GROUP BY b.id
        HAVING employee_count >= ?
        ORDER BY employee_count DESC
        "#,
    )
    .bind(min_employees)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Vehicles that carried any package heavier than `min_weight` on a shipment
/// dated `since` or later. The caller supplies the window start so the query
/// stays clock-free.
pub async fn vehicles_with_heavy_packages(
    pool: &DbPool,
    since: DateTime<Utc>,
    min_weight: f64,
) -> Result<Vec<Vehicle>> {
    let rows = sqlx::query_as::<_, Vehicle>(
        r#"
        SELECT DISTINCT v.*
        FROM vehicles v
        JOIN shipments s ON s.vehicle_plate = v.plate
        JOIN packages p ON p.shipment_id = s.id
        WHERE s.shipped_at >= ? AND p.weight > ?
        "#,
    )
    .bind(since)
    .bind(min_weight)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ClientLastShipment {
    pub client_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub last_shipped_at: Option<DateTime<Utc>>,
}

/// Clients with the date of their most recent shipment, newest first.
/// Clients with no shipments sort last.
pub async fn client_last_shipments(pool: &DbPool) -> Result<Vec<ClientLastShipment>> {
    let rows = sqlx::query_as::<_, ClientLastShipment>(
        r#"
        SELECT c.id AS client_id,
               c.first_name,
               c.last_name,
               MAX(s.shipped_at) AS last_shipped_at
        FROM clients c
        LEFT JOIN shipments s ON s.client_id = c.id
        GROUP BY c.id
        ORDER BY last_shipped_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProvinceCityCount {
    pub province_id: i64,
    pub name: String,
    pub city_count: i64,
}

/// The province with the most cities, if any provinces exist.
pub async fn province_with_most_cities(pool: &DbPool) -> Result<Option<ProvinceCityCount>> {
    let row = sqlx::query_as::<_, ProvinceCityCount>(
        r#"
        SELECT p.id AS province_id,
               p.name,
               COUNT(c.id) AS city_count
        FROM provinces p
        LEFT JOIN cities c ON c.province_id = p.id
        GROUP BY p.id
        ORDER BY city_count DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Employees working at branches located in the named province. The name is
/// normalized the same way stored province names are.
pub async fn employees_in_province(pool: &DbPool, province: &str) -> Result<Vec<Employee>> {
    let rows = sqlx::query_as::<_, Employee>(
        r#"
        SELECT e.*
        FROM employees e
        JOIN branches b ON b.id = e.branch_id
        JOIN addresses a ON a.id = b.address_id
        JOIN cities c ON c.id = a.city_id
        JOIN provinces pr ON pr.id = c.province_id
        WHERE pr.name = ?
        ORDER BY e.last_name, e.first_name
        "#,
    )
    .bind(normalize(province))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Packages whose description contains the term, case-insensitively.
pub async fn packages_matching_description(pool: &DbPool, term: &str) -> Result<Vec<Package>> {
    let rows = sqlx::query_as::<_, Package>(
        r#"
        SELECT *
        FROM packages
        WHERE lower(description) LIKE '%' || lower(?) || '%'
        ORDER BY id
        "#,
    )
    .bind(term)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VehicleTypeStats {
    pub vehicle_type_id: i64,
    pub name: String,
    pub shipment_count: i64,
    pub avg_package_weight: Option<f64>,
}

/// Shipment count and average package weight per vehicle type.
pub async fn vehicle_type_stats(pool: &DbPool) -> Result<Vec<VehicleTypeStats>> {
    let rows = sqlx::query_as::<_, VehicleTypeStats>(
        r#"
        SELECT vt.id AS vehicle_type_id,
               vt.name,
               COUNT(DISTINCT s.id) AS shipment_count,
               AVG(p.weight) AS avg_package_weight
        FROM vehicle_types vt
        LEFT JOIN vehicles v ON v.vehicle_type_id = vt.id
        LEFT JOIN shipments s ON s.vehicle_plate = v.plate
        LEFT JOIN packages p ON p.shipment_id = s.id
        GROUP BY vt.id
        ORDER BY vt.name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Employees with no vehicle assigned to them.
pub async fn employees_without_vehicles(pool: &DbPool) -> Result<Vec<Employee>> {
    let rows = sqlx::query_as::<_, Employee>(
        r#"
        SELECT e.*
        FROM employees e
        WHERE NOT EXISTS (SELECT 1 FROM vehicles v WHERE v.employee_id = e.id)
        ORDER BY e.last_name, e.first_name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
