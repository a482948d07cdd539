pub mod client;
pub mod common;
pub mod property;

pub use client::Client;
pub use property::{CleaningEquipment, Coordinates, KeyInventory, Property, TransportationInfo};
