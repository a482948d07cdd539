use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A managed property record, owned by a user and tied to a client.
///
/// Field names serialize in camelCase so stored records stay compatible with
/// the admin front-end's JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub client_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_number: Option<String>,
    pub address: String,
    pub surface: f64,
    pub floor: i32,
    pub door: String,
    pub door_slams: bool,
    pub emergency_response_time: String,
    pub deposit: f64,
    pub elevator: bool,
    pub furnished: bool,
    pub wifi_name: String,
    pub wifi_password: String,
    pub keys: KeyInventory,
    pub cleaning: CleaningEquipment,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub transportation: TransportationInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for Property {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Property {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Property {
    fn display_label(&self) -> String {
        format!("{} — {}", self.name, self.address)
    }
}

/// Key stock and lock details collected as a nested group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyInventory {
    pub total: u32,
    pub available: u32,
    pub lock_system: String,
    #[serde(default)]
    pub key_images: Vec<String>,
}

/// Fixed four-flag cleaning equipment inventory. Absent equipment is stored
/// as an explicit `false`, never omitted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CleaningEquipment {
    pub mop: bool,
    pub broom: bool,
    pub dustpan: bool,
    pub vacuum_cleaner: bool,
}

/// Map position of the property. Not collected by the entry wizard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Travel directions around the property. Not collected by the entry wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransportationInfo {
    pub nearest_airport: String,
    pub airport_directions: String,
    pub train_station: String,
    pub train_directions: String,
    pub parking: String,
    pub parking_access: String,
}
