//! Client-local file previews.
//!
//! A file step shows the user what they picked before anything is durably
//! uploaded. Handles are scoped resources: the session releases them when a
//! field's selection is overwritten and when the session itself ends.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

/// A file offered to the wizard, described by name and media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    pub name: String,
    pub media_type: String,
}

impl FileSource {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
        }
    }
}

/// Turns file sources into displayable preview references and revokes them.
pub trait PreviewProvider {
    fn acquire(&mut self, source: &FileSource) -> String;
    fn release(&mut self, handle: &str);
}

/// In-process provider handing out `preview://` references.
///
/// State is shared behind an `Arc` so callers can keep a clone for inspecting
/// which handles are still live after the session is gone.
#[derive(Clone, Default)]
pub struct LocalPreviews {
    active: Arc<Mutex<BTreeMap<String, String>>>,
}

impl LocalPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.active.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_active(&self, handle: &str) -> bool {
        self.active
            .lock()
            .map(|map| map.contains_key(handle))
            .unwrap_or(false)
    }
}

impl PreviewProvider for LocalPreviews {
    fn acquire(&mut self, source: &FileSource) -> String {
        let handle = format!("preview://{}", Uuid::new_v4());
        if let Ok(mut map) = self.active.lock() {
            map.insert(handle.clone(), source.name.clone());
        }
        tracing::debug!(%handle, source = %source.name, "preview acquired");
        handle
    }

    fn release(&mut self, handle: &str) {
        if let Ok(mut map) = self.active.lock() {
            map.remove(handle);
        }
        tracing::debug!(%handle, "preview released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_and_release_track_active_handles() {
        let mut previews = LocalPreviews::new();
        let handle = previews.acquire(&FileSource::new("front.jpg", "image/jpeg"));
        assert!(previews.is_active(&handle));
        assert_eq!(previews.active_count(), 1);

        previews.release(&handle);
        assert!(!previews.is_active(&handle));
        assert_eq!(previews.active_count(), 0);
    }

    #[test]
    fn releasing_an_unknown_handle_is_harmless() {
        let mut previews = LocalPreviews::new();
        previews.release("preview://unknown");
        assert_eq!(previews.active_count(), 0);
    }
}
