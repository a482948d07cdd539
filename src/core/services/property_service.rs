use uuid::Uuid;

use crate::domain::Property;
use crate::storage::PropertyStore;

use super::ServiceResult;

/// List/detail/delete operations for the property screens. Creation and
/// editing go through the entry wizard, which dispatches to the store itself.
pub struct PropertyService;

impl PropertyService {
    /// Properties owned by one user, name-sorted by the backend.
    pub fn list(store: &dyn PropertyStore, owner_id: Uuid) -> ServiceResult<Vec<Property>> {
        Ok(store.list_by_owner(owner_id)?)
    }

    pub fn get(store: &dyn PropertyStore, id: Uuid) -> ServiceResult<Property> {
        Ok(store.get(id)?)
    }

    pub fn remove(store: &mut dyn PropertyStore, id: Uuid) -> ServiceResult<()> {
        store.delete(id)?;
        Ok(())
    }
}
