pub mod catalog;
pub mod fleet;
pub mod geo;
pub mod named;
pub mod party;
pub mod shipment;
