mod common;

use chrono::Utc;
use common::setup_test_env;
use uuid::Uuid;

use property_core::{
    core::services::{ClientService, PropertyService, ServiceError},
    domain::{
        CleaningEquipment, Client, Coordinates, KeyInventory, Property, TransportationInfo,
    },
    errors::CoreError,
    storage::{ClientDirectory, PropertyStore},
};

fn sample_property(user_id: Uuid, name: &str) -> Property {
    let now = Utc::now();
    Property {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        user_id,
        name: name.into(),
        property_type: "Apartment".into(),
        building_number: Some("12b".into()),
        address: "8 Rue Oberkampf".into(),
        surface: 55.0,
        floor: 4,
        door: "left".into(),
        door_slams: true,
        emergency_response_time: "01:30".into(),
        deposit: 1200.0,
        elevator: true,
        furnished: true,
        wifi_name: "oberkampf".into(),
        wifi_password: "secret".into(),
        keys: KeyInventory {
            total: 4,
            available: 3,
            lock_system: "cylinder".into(),
            key_images: vec!["https://cdn.example/k.jpg".into()],
        },
        cleaning: CleaningEquipment {
            mop: true,
            broom: true,
            dustpan: false,
            vacuum_cleaner: false,
        },
        coordinates: Coordinates::default(),
        transportation: TransportationInfo::default(),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn create_then_get_roundtrips_the_record() {
    let (mut storage, _config) = setup_test_env();
    let property = sample_property(Uuid::new_v4(), "Oberkampf");
    let id = storage.create(property.clone()).expect("create");

    let loaded = storage.get(id).expect("get");
    assert_eq!(loaded, property);
}

#[test]
fn stored_json_uses_the_front_end_field_names() {
    let (mut storage, _config) = setup_test_env();
    let property = sample_property(Uuid::new_v4(), "Shape check");
    let id = storage.create(property).expect("create");

    let raw = std::fs::read_to_string(storage.property_path(id)).expect("raw json");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert!(value.get("wifiName").is_some());
    assert!(value.get("type").is_some());
    assert!(value["keys"].get("lockSystem").is_some());
    assert!(value["cleaning"].get("vacuumCleaner").is_some());
    assert!(value.get("wifi_name").is_none());
}

#[test]
fn list_by_owner_filters_other_users_records() {
    let (mut storage, _config) = setup_test_env();
    let owner = Uuid::new_v4();
    storage
        .create(sample_property(owner, "Bastille"))
        .expect("create");
    storage
        .create(sample_property(owner, "Alma"))
        .expect("create");
    storage
        .create(sample_property(Uuid::new_v4(), "Not ours"))
        .expect("create");

    let listed = PropertyService::list(&storage, owner).expect("list");
    assert_eq!(listed.len(), 2);
    // Name-sorted listing.
    assert_eq!(listed[0].name, "Alma");
    assert_eq!(listed[1].name, "Bastille");
}

#[test]
fn update_preserves_creation_stamp_and_bumps_update_stamp() {
    let (mut storage, _config) = setup_test_env();
    let property = sample_property(Uuid::new_v4(), "Stamps");
    let created_at = property.created_at;
    let id = storage.create(property.clone()).expect("create");

    let mut changes = property;
    changes.name = "Stamps v2".into();
    storage.update(id, changes).expect("update");

    let loaded = storage.get(id).expect("get");
    assert_eq!(loaded.name, "Stamps v2");
    assert_eq!(loaded.created_at, created_at);
    assert!(loaded.updated_at >= created_at);
}

#[test]
fn update_and_delete_on_missing_ids_report_not_found() {
    let (mut storage, _config) = setup_test_env();
    let ghost = Uuid::new_v4();

    let err = storage
        .update(ghost, sample_property(Uuid::new_v4(), "Ghost"))
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));

    let err = storage.delete(ghost).unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));

    let err = storage.get(ghost).unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[test]
fn delete_removes_the_record_file() {
    let (mut storage, _config) = setup_test_env();
    let owner = Uuid::new_v4();
    let id = storage
        .create(sample_property(owner, "Short lived"))
        .expect("create");

    PropertyService::remove(&mut storage, id).expect("remove");
    assert!(PropertyService::list(&storage, owner)
        .expect("list")
        .is_empty());
}

#[test]
fn client_directory_roundtrip_and_duplicate_guard() {
    let (mut storage, _config) = setup_test_env();
    let id = ClientService::add(&mut storage, Client::new("Acme Rentals")).expect("add");

    let listed = ClientService::list(&storage as &dyn ClientDirectory).expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);

    let err = ClientService::add(&mut storage, Client::new("acme rentals")).unwrap_err();
    assert!(matches!(err, ServiceError::Invalid(_)));

    ClientService::remove(&mut storage, id).expect("remove");
    assert!(ClientService::list(&storage as &dyn ClientDirectory)
        .expect("list")
        .is_empty());
}
