use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database vehicle model, keyed by its license plate
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub plate: String,
    pub capacity: f64,
    pub employee_id: i64,
    pub vehicle_type_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleDto {
    pub plate: String,
    pub capacity: f64,
    pub employee_id: i64,
    pub vehicle_type_id: i64,
}

/// Vehicle as shown on admin listings, with the derived remaining capacity.
/// Remaining capacity may be negative when the vehicle is over-committed;
/// the value is reported as computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleView {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub remaining_capacity: f64,
}
