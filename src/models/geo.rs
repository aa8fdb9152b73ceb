use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::named::Named;

/// Database province model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Province {
    pub id: i64,
    pub name: String,
}

impl Named for Province {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Payload for creating or updating a province
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvinceDto {
    pub name: String,
}

/// Database city model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub province_id: i64,
}

impl Named for City {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityDto {
    pub name: String,
    pub province_id: i64,
}

/// Database address model. The (street, number, city) triple is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: i64,
    pub street: String,
    pub number: i64,
    pub city_id: i64,
}

impl Address {
    pub fn display(&self) -> String {
        format!("{} {}", self.street, self.number)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressDto {
    pub street: String,
    pub number: i64,
    pub city_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_display_joins_street_and_number() {
        let address = Address {
            id: 1,
            street: "SAN MARTIN".to_string(),
            number: 1200,
            city_id: 1,
        };
        assert_eq!(address.display(), "SAN MARTIN 1200");
    }
}
