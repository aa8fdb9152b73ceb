use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::named::Named;

/// Document type catalog entry (DNI, passport, ...). Referenced by employees
/// and clients; deletion is refused while references exist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentType {
    pub id: i64,
    pub name: String,
}

impl Named for DocumentType {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Vehicle type catalog entry (truck, van, ...). Protected like DocumentType.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleType {
    pub id: i64,
    pub name: String,
}

impl Named for VehicleType {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Payload for either catalog table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDto {
    pub name: String,
}

/// Branch office, tied to an address
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub address_id: i64,
}

impl Named for Branch {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchDto {
    pub name: String,
    pub address_id: i64,
}
