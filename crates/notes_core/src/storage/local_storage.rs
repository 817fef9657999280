//! Browser `localStorage` backend for wasm hosts.

use super::{KeyValueStore, StoreError, StoreResult};
use web_sys::Storage;

/// Store backed by `window.localStorage`.
///
/// Every call looks the storage object up again, so a page that loses storage
/// access mid-session degrades to `Unavailable` instead of holding a stale
/// handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLocalStorage;

impl BrowserLocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn local_storage(&self) -> StoreResult<Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window object".to_string()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StoreError::Unavailable(
                "localStorage is disabled".to_string(),
            )),
            Err(err) => Err(StoreError::Unavailable(format!("{err:?}"))),
        }
    }
}

impl KeyValueStore for BrowserLocalStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.local_storage()?
            .get_item(key)
            .map_err(|err| StoreError::Backend(format!("{err:?}")))
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        // Browsers raise QuotaExceededError here; the exact size is not exposed.
        self.local_storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::Backend(format!("{err:?}")))
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.local_storage()?
            .remove_item(key)
            .map_err(|err| StoreError::Backend(format!("{err:?}")))
    }
}
