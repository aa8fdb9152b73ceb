use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Shipment lifecycle state. New shipments start en route; delivered cargo
/// no longer counts against vehicle capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    EnRoute,
    Delivered,
}

impl Default for ShipmentStatus {
    fn default() -> Self {
        Self::EnRoute
    }
}

/// Database shipment model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shipment {
    pub id: i64,
    pub shipped_at: DateTime<Utc>,
    pub branch_id: i64,
    pub client_id: i64,
    pub vehicle_plate: String,
    pub status: ShipmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentDto {
    pub shipped_at: DateTime<Utc>,
    pub branch_id: i64,
    pub client_id: i64,
    pub vehicle_plate: String,
    #[serde(default)]
    pub status: ShipmentStatus,
}

/// Database package model. Dimensions are centimeters, weight kilograms.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Package {
    pub id: i64,
    pub weight: f64,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub description: String,
    pub shipment_id: i64,
}

impl Package {
    /// Volume as shown on admin listings. Falls back to the zero display
    /// when any dimension is missing or zero.
    pub fn volume_display(&self) -> String {
        volume_display(self.width, self.height, self.length)
    }
}

pub fn volume_display(width: f64, height: f64, length: f64) -> String {
    if width > 0.0 && height > 0.0 && length > 0.0 {
        format!("{:.2} cm³", width * height * length)
    } else {
        "0.00 cm³".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDto {
    pub weight: f64,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub description: String,
    pub shipment_id: i64,
}

/// Package as shown on admin listings, with the derived volume column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageView {
    #[serde(flatten)]
    pub package: Package,
    pub volume: String,
}

impl From<Package> for PackageView {
    fn from(package: Package) -> Self {
        let volume = package.volume_display();
        Self { package, volume }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_formats_two_decimals_with_unit() {
        assert_eq!(volume_display(2.0, 3.0, 4.0), "24.00 cm³");
        assert_eq!(volume_display(1.5, 1.5, 2.0), "4.50 cm³");
    }

    #[test]
    fn volume_is_zero_when_a_dimension_is_missing() {
        assert_eq!(volume_display(0.0, 3.0, 4.0), "0.00 cm³");
        assert_eq!(volume_display(2.0, 0.0, 4.0), "0.00 cm³");
        assert_eq!(volume_display(2.0, 3.0, 0.0), "0.00 cm³");
    }
}
