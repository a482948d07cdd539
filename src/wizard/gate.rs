use uuid::Uuid;

use crate::{domain::Client, errors::CoreError, storage::ClientDirectory};

/// Outcome of the owner-selection gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateResponse {
    Selected(Uuid),
    /// Leave the wizard for the client-creation flow; the session is
    /// abandoned and no partial buffer survives.
    CreateNew,
    Cancelled,
}

/// Mandatory pre-step for new records: a property must be attached to an
/// existing client before the first wizard step can run. Edit sessions bypass
/// the gate because the owner is read from the record itself.
pub struct OwnerGate {
    clients: Vec<Client>,
}

impl OwnerGate {
    pub fn load(directory: &dyn ClientDirectory) -> Result<Self, CoreError> {
        Ok(Self {
            clients: directory.list()?,
        })
    }

    pub fn from_clients(clients: Vec<Client>) -> Self {
        Self { clients }
    }

    pub fn choices(&self) -> &[Client] {
        &self.clients
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.clients.iter().any(|client| client.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_exposes_directory_entries() {
        let clients = vec![Client::new("Acme Rentals"), Client::new("B. Martin")];
        let first = clients[0].id;
        let gate = OwnerGate::from_clients(clients);

        assert_eq!(gate.choices().len(), 2);
        assert!(gate.contains(first));
        assert!(!gate.contains(Uuid::new_v4()));
    }
}
