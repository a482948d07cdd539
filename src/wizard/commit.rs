//! Commit-time normalization.
//!
//! The flat buffer collected by the wizard is reshaped exactly once, here:
//! dot-paths expand into the key inventory group, yes/no selects become
//! booleans, and the cleaning checklist becomes the fixed four-flag struct.

use std::collections::BTreeMap;

use chrono::{NaiveTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{CleaningEquipment, Coordinates, KeyInventory, Property, TransportationInfo},
    errors::CoreError,
};

use super::buffer::{EditBuffer, FieldValue};
use super::path::{self, PathNode};

/// Stored when the user never touched the emergency response step.
pub const DEFAULT_EMERGENCY_RESPONSE_TIME: &str = "01:00";

const YES: &str = "Yes";

/// Failures raised while turning the buffer into a persisted record.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Persistence(#[from] CoreError),
}

/// Builds the nested property record from the flat buffer.
///
/// Missing answers fall back to the field's initial value (empty string,
/// zero, unchecked); numeric answers that carried the NaN sentinel are the
/// one thing rejected here.
pub fn build_record(
    buffer: &EditBuffer,
    client_id: Uuid,
    user_id: Uuid,
    record_id: Uuid,
) -> Result<Property, CommitError> {
    let tree = path::expand(buffer);
    let now = Utc::now();

    Ok(Property {
        id: record_id,
        client_id,
        user_id,
        name: text(&tree, "name"),
        property_type: text(&tree, "type"),
        building_number: optional_text(&tree, "buildingNumber"),
        address: text(&tree, "address"),
        surface: number(&tree, "surface")?,
        floor: number(&tree, "floor")? as i32,
        door: text(&tree, "door"),
        door_slams: yes(&tree, "doorSlams"),
        emergency_response_time: time_or(
            &tree,
            "emergencyResponseTime",
            DEFAULT_EMERGENCY_RESPONSE_TIME,
        )?,
        deposit: number(&tree, "deposit")?,
        elevator: yes(&tree, "elevator"),
        furnished: yes(&tree, "furnished"),
        wifi_name: text(&tree, "wifiName"),
        wifi_password: text(&tree, "wifiPassword"),
        keys: key_inventory(&tree)?,
        cleaning: cleaning_flags(&tree),
        coordinates: Coordinates::default(),
        transportation: TransportationInfo::default(),
        created_at: now,
        updated_at: now,
    })
}

fn text(tree: &BTreeMap<String, PathNode>, key: &str) -> String {
    path::leaf(tree, key)
        .and_then(FieldValue::as_text)
        .unwrap_or_default()
        .to_string()
}

/// Untouched time steps fall back to the default; anything present must read
/// as a 24-hour `HH:MM` clock value and is stored zero-padded.
fn time_or(
    tree: &BTreeMap<String, PathNode>,
    key: &str,
    default: &str,
) -> Result<String, CommitError> {
    let value = text(tree, key);
    let value = if value.is_empty() {
        default.to_string()
    } else {
        value
    };
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|time| time.format("%H:%M").to_string())
        .map_err(|_| CommitError::Validation(format!("`{key}` is not a 24-hour HH:MM time")))
}

fn optional_text(tree: &BTreeMap<String, PathNode>, key: &str) -> Option<String> {
    path::leaf(tree, key)
        .and_then(FieldValue::as_text)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn number(tree: &BTreeMap<String, PathNode>, key: &str) -> Result<f64, CommitError> {
    number_leaf(path::leaf(tree, key), key)
}

fn number_leaf(leaf: Option<&FieldValue>, key: &str) -> Result<f64, CommitError> {
    match leaf.and_then(FieldValue::as_number) {
        Some(value) if value.is_nan() => Err(CommitError::Validation(format!(
            "`{key}` is not a valid number"
        ))),
        Some(value) => Ok(value),
        None => Ok(0.0),
    }
}

fn yes(tree: &BTreeMap<String, PathNode>, key: &str) -> bool {
    path::leaf(tree, key).and_then(FieldValue::as_text) == Some(YES)
}

fn key_inventory(tree: &BTreeMap<String, PathNode>) -> Result<KeyInventory, CommitError> {
    let Some(keys) = path::branch(tree, "keys") else {
        return Ok(KeyInventory::default());
    };
    Ok(KeyInventory {
        total: number_leaf(path::leaf(keys, "total"), "keys.total")? as u32,
        available: number_leaf(path::leaf(keys, "available"), "keys.available")? as u32,
        lock_system: path::leaf(keys, "lockSystem")
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
            .to_string(),
        key_images: path::leaf(keys, "keyImages")
            .and_then(FieldValue::as_list)
            .map(<[String]>::to_vec)
            .unwrap_or_default(),
    })
}

fn cleaning_flags(tree: &BTreeMap<String, PathNode>) -> CleaningEquipment {
    let selected = path::leaf(tree, "cleaning")
        .and_then(FieldValue::as_list)
        .unwrap_or_default();
    let has = |name: &str| selected.iter().any(|entry| entry == name);
    CleaningEquipment {
        mop: has("mop"),
        broom: has("broom"),
        dustpan: has("dustpan"),
        vacuum_cleaner: has("vacuumCleaner"),
    }
}
