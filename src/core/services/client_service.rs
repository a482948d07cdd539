use uuid::Uuid;

use crate::domain::Client;
use crate::storage::{ClientDirectory, JsonStorage};

use super::{ServiceError, ServiceResult};

pub struct ClientService;

impl ClientService {
    pub fn list(directory: &dyn ClientDirectory) -> ServiceResult<Vec<Client>> {
        Ok(directory.list()?)
    }

    pub fn add(storage: &mut JsonStorage, client: Client) -> ServiceResult<Uuid> {
        Self::validate_name(storage, None, &client.name)?;
        Ok(storage.add_client(client)?)
    }

    pub fn remove(storage: &mut JsonStorage, id: Uuid) -> ServiceResult<()> {
        storage.remove_client(id)?;
        Ok(())
    }

    fn validate_name(
        directory: &dyn ClientDirectory,
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> ServiceResult<()> {
        if candidate.trim().is_empty() {
            return Err(ServiceError::Invalid("Client name is required".into()));
        }
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = directory.list()?.iter().any(|client| {
            let name = client.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| client.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Client `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
