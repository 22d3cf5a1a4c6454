use gamefun_engine::{MemoryStorage, ProgressError, ProgressStorage};
use wasm_bindgen::JsValue;

fn js_error(err: JsValue) -> ProgressError {
    ProgressError::storage(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// `window.localStorage`, the persistence the original web app used.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, ProgressError> {
        let window = web_sys::window().ok_or_else(|| ProgressError::storage("no window object"))?;
        let inner = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| ProgressError::storage("localStorage is unavailable"))?;
        Ok(Self { inner })
    }
}

impl ProgressStorage for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, ProgressError> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), ProgressError> {
        self.inner.set_item(key, value).map_err(js_error)
    }
}

/// localStorage when the browser allows it, otherwise an in-memory map so the
/// game stays playable (progress is then lost on reload).
pub enum BrowserStorage {
    Local(LocalStorage),
    Memory(MemoryStorage),
}

impl BrowserStorage {
    pub fn detect() -> Self {
        match LocalStorage::open() {
            Ok(local) => BrowserStorage::Local(local),
            Err(e) => {
                log::warn!("{}; progress will not be saved", e);
                BrowserStorage::Memory(MemoryStorage::new())
            }
        }
    }
}

impl ProgressStorage for BrowserStorage {
    fn load(&self, key: &str) -> Result<Option<String>, ProgressError> {
        match self {
            BrowserStorage::Local(s) => s.load(key),
            BrowserStorage::Memory(s) => s.load(key),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), ProgressError> {
        match self {
            BrowserStorage::Local(s) => s.save(key, value),
            BrowserStorage::Memory(s) => s.save(key, value),
        }
    }
}
