use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::{Handle, PinSet};
use crate::store::KeyValueStore;

/// Key under which the pinned handles are kept, as a JSON array of strings.
pub const PINNED_HANDLES_KEY: &str = "pinnedHandles";

#[derive(Debug)]
pub struct PinStore<S> {
    store: S,
}

impl<S: KeyValueStore> PinStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn pinned(&self) -> PinSet {
        self.load().into_iter().collect()
    }

    pub fn is_pinned(&self, handle: &str) -> bool {
        self.load().iter().any(|h| h == handle)
    }

    /// Adds `handle` if absent, removes it if present. Returns whether the
    /// handle is pinned afterwards.
    pub fn toggle(&mut self, handle: &str) -> Result<bool, StoreError> {
        let mut handles = self.load();
        let pinned = if handles.iter().any(|h| h == handle) {
            handles.retain(|h| h != handle);
            false
        } else {
            handles.push(handle.to_string());
            true
        };

        self.store
            .set(PINNED_HANDLES_KEY, serde_json::to_string(&handles)?)?;
        debug!(handle, pinned, "toggled pin");
        Ok(pinned)
    }

    /// Unreadable state counts as "nothing pinned"; the next toggle rewrites it.
    fn load(&self) -> Vec<Handle> {
        let raw = match self.store.get(PINNED_HANDLES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read pinned handles: {e}");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring malformed pinned handles {raw:?}: {e}");
            Vec::new()
        })
    }
}
