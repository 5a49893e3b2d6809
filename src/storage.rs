use web_sys::{Storage, Window};

/// Minimal key/value persistence used for user preferences.
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
}

impl PreferenceStore for Storage {
    fn read(&self, key: &str) -> Option<String> {
        self.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.set_item(key, value) {
            log::warn!("Failed to persist {}: {:?}", key, err);
        }
    }
}

/// `localStorage` when the browser allows it, otherwise nothing is
/// persisted.
pub fn local_storage(window: &Window) -> Option<Storage> {
    match window.local_storage() {
        Ok(storage) => storage,
        Err(err) => {
            log::warn!("localStorage unavailable: {:?}", err);
            None
        }
    }
}

impl<S: PreferenceStore> PreferenceStore for Option<S> {
    fn read(&self, key: &str) -> Option<String> {
        self.as_ref().and_then(|store| store.read(key))
    }

    fn write(&self, key: &str, value: &str) {
        if let Some(store) = self {
            store.write(key, value);
        }
    }
}
