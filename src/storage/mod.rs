pub mod json_backend;

use uuid::Uuid;

use crate::{
    domain::{Client, Property},
    errors::CoreError,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Abstraction over persistence backends capable of storing property records.
///
/// `update` and `delete` fail with [`CoreError::NotFound`] when the id does
/// not resolve; transient failures surface as [`CoreError::Storage`].
pub trait PropertyStore: Send + Sync {
    fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>>;
    fn get(&self, id: Uuid) -> Result<Property>;
    fn create(&mut self, property: Property) -> Result<Uuid>;
    fn update(&mut self, id: Uuid, property: Property) -> Result<()>;
    fn delete(&mut self, id: Uuid) -> Result<()>;
}

/// Directory of clients a new property can be attached to.
pub trait ClientDirectory {
    fn list(&self) -> Result<Vec<Client>>;
}

pub use json_backend::JsonStorage;
