//! Browser-local persistence.

use un_site_core::store::KvStore;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// `KvStore` over `window.localStorage`. Access failures (private
/// browsing, quota) degrade to reads of `None` and dropped writes,
/// never to user-facing errors.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl KvStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = storage() {
            let _ = storage.set_item(key, value);
        }
    }
}
