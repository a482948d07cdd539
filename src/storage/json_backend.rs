use chrono::Utc;
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use uuid::Uuid;

use crate::{
    core::utils::{clients_dir_in, ensure_dir, properties_dir_in},
    domain::{Client, Property},
    errors::CoreError,
};

use super::{ClientDirectory, PropertyStore, Result};

const RECORD_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// File-per-record JSON backend rooted at the application data directory.
#[derive(Clone)]
pub struct JsonStorage {
    properties_dir: PathBuf,
    clients_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        let properties_dir = properties_dir_in(&root);
        let clients_dir = clients_dir_in(&root);
        ensure_dir(&properties_dir)?;
        ensure_dir(&clients_dir)?;
        Ok(Self {
            properties_dir,
            clients_dir,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(crate::core::utils::app_data_dir())
    }

    pub fn property_path(&self, id: Uuid) -> PathBuf {
        self.properties_dir
            .join(format!("{}.{}", id, RECORD_EXTENSION))
    }

    pub fn client_path(&self, id: Uuid) -> PathBuf {
        self.clients_dir.join(format!("{}.{}", id, RECORD_EXTENSION))
    }

    pub fn add_client(&mut self, client: Client) -> Result<Uuid> {
        let id = client.id;
        let json = serde_json::to_string_pretty(&client)?;
        write_atomic(&self.client_path(id), &json)?;
        tracing::debug!(%id, "client record written");
        Ok(id)
    }

    pub fn remove_client(&mut self, id: Uuid) -> Result<()> {
        let path = self.client_path(id);
        if !path.exists() {
            return Err(CoreError::NotFound(format!("client `{id}`")));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn read_property(&self, path: &Path) -> Result<Property> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl PropertyStore for JsonStorage {
    fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>> {
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.properties_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            // Tolerate stray files; a partially-written record must not take
            // the whole listing down.
            let property: Property = match self.read_property(&path) {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "skipping unreadable record");
                    continue;
                }
            };
            if property.user_id == owner_id {
                records.push(property);
            }
        }
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    fn get(&self, id: Uuid) -> Result<Property> {
        let path = self.property_path(id);
        if !path.exists() {
            return Err(CoreError::NotFound(format!("property `{id}`")));
        }
        self.read_property(&path)
    }

    fn create(&mut self, property: Property) -> Result<Uuid> {
        let id = property.id;
        let json = serde_json::to_string_pretty(&property)?;
        write_atomic(&self.property_path(id), &json)?;
        tracing::debug!(%id, "property record created");
        Ok(id)
    }

    fn update(&mut self, id: Uuid, mut property: Property) -> Result<()> {
        let existing = self.get(id)?;
        property.id = id;
        property.created_at = existing.created_at;
        property.updated_at = Utc::now();
        let json = serde_json::to_string_pretty(&property)?;
        write_atomic(&self.property_path(id), &json)?;
        tracing::debug!(%id, "property record updated");
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        let path = self.property_path(id);
        if !path.exists() {
            return Err(CoreError::NotFound(format!("property `{id}`")));
        }
        fs::remove_file(path)?;
        tracing::debug!(%id, "property record deleted");
        Ok(())
    }
}

impl ClientDirectory for JsonStorage {
    fn list(&self) -> Result<Vec<Client>> {
        let mut clients = Vec::new();
        for entry in fs::read_dir(&self.clients_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            let data = match fs::read_to_string(&path) {
                Ok(value) => value,
                Err(_) => continue,
            };
            let client: Client = match serde_json::from_str(&data) {
                Ok(client) => client,
                Err(_) => continue,
            };
            clients.push(client);
        }
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
