use crate::config::PlayerConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

/// Durable key/value capability. Neither operation can fail from the
/// caller's point of view: a missing or unreadable entry is `None` and a
/// rejected write is dropped.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) {
        (**self).set(key, value)
    }
}

/// `window.localStorage`, JSON-encoded per key.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    /// `None` when the page has no usable local storage (privacy modes,
    /// sandboxed iframes).
    pub fn detect() -> Option<Self> {
        let available = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .is_some();
        available.then_some(Self)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<Value> {
        LocalStorage::get::<Value>(key).ok()
    }

    fn set(&self, key: &str, value: Value) {
        if let Err(err) = LocalStorage::set(key, value) {
            debug!(key, %err, "storage write dropped");
        }
    }
}

/// Store that remembers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStore;

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    fn set(&self, _key: &str, _value: Value) {}
}

/// In-process store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.entries.borrow_mut().insert(key.to_string(), value);
    }
}

/// Best available store for the current platform.
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn KeyValueStore> {
    match BrowserStore::detect() {
        Some(store) => Box::new(store),
        None => {
            tracing::warn!("local storage unavailable, playback state will not persist");
            Box::new(DisabledStore)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotKeys {
    pub index: String,
    pub time: String,
    pub volume: String,
    pub muted: String,
}

impl SnapshotKeys {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            index: config.storage_key("index"),
            time: config.storage_key("time"),
            volume: config.storage_key("volume"),
            muted: config.storage_key("muted"),
        }
    }
}

/// Typed, best-effort persistence of the playback snapshot.
///
/// Every field lives under its own key and falls back to its own default, so
/// one corrupt entry never affects the others.
pub struct Persistence<S> {
    backend: S,
    keys: SnapshotKeys,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(backend: S, keys: SnapshotKeys) -> Self {
        Self { backend, keys }
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => self.backend.set(key, value),
            Err(err) => debug!(key, %err, "value not persisted"),
        }
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.backend
            .get(key)
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or(default)
    }

    /// Last selected index if it is a whole number inside `[0, len)`,
    /// otherwise 0.
    pub fn last_index(&self, len: usize) -> usize {
        let saved = self.load::<Value>(&self.keys.index, Value::from(0));
        as_number(&saved)
            .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v < len as f64)
            .map(|v| v as usize)
            .unwrap_or(0)
    }

    pub fn last_time(&self) -> f64 {
        let saved = self.load::<Value>(&self.keys.time, Value::from(0));
        as_number(&saved).filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Saved volume clamped to `[0, 1]`, 1 when absent or malformed.
    pub fn volume(&self) -> f64 {
        let saved = self.load::<Value>(&self.keys.volume, Value::from(1));
        as_number(&saved)
            .filter(|v| v.is_finite())
            .unwrap_or(1.0)
            .clamp(0.0, 1.0)
    }

    pub fn muted(&self) -> bool {
        let saved = self.load::<Value>(&self.keys.muted, Value::Bool(false));
        is_truthy(&saved)
    }

    pub fn save_index(&self, index: usize) {
        self.save(&self.keys.index, &index);
    }

    /// Whole seconds only.
    pub fn save_time(&self, seconds: f64) {
        let floored = if seconds.is_finite() {
            seconds.floor().max(0.0) as u64
        } else {
            0
        };
        self.save(&self.keys.time, &floored);
    }

    pub fn save_audio(&self, volume: f64, muted: bool) {
        self.save(&self.keys.volume, &volume);
        self.save(&self.keys.muted, &muted);
    }
}

/// Loose numeric reading: numbers, numeric strings, and booleans count.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse().ok()
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0 && !v.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn persistence(store: MemoryStore) -> Persistence<MemoryStore> {
        Persistence::new(store, SnapshotKeys::from_config(&PlayerConfig::default()))
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = persistence(MemoryStore::new());
        store.save("maxplayer.custom", &vec![1, 2, 3]);
        assert_eq!(store.load("maxplayer.custom", Vec::<i32>::new()), vec![1, 2, 3]);
        store.save("maxplayer.flag", &true);
        assert!(store.load("maxplayer.flag", false));
    }

    #[test]
    fn disabled_store_always_yields_defaults() {
        let store = Persistence::new(
            DisabledStore,
            SnapshotKeys::from_config(&PlayerConfig::default()),
        );
        store.save("k", &42);
        store.save_index(3);
        assert_eq!(store.load("k", 7), 7);
        assert_eq!(store.last_index(10), 0);
        assert_eq!(store.last_time(), 0.0);
        assert_eq!(store.volume(), 1.0);
        assert!(!store.muted());
    }

    #[test]
    fn type_mismatch_falls_back_to_default() {
        let backing = MemoryStore::new();
        backing.set("k", json!("not a number"));
        let store = persistence(backing);
        assert_eq!(store.load("k", 5u32), 5);
    }

    #[test]
    fn last_index_rejects_out_of_range_and_fractional_values() {
        let backing = MemoryStore::new();
        let store = persistence(backing.clone());

        backing.set("maxplayer.index", json!(2));
        assert_eq!(store.last_index(3), 2);
        assert_eq!(store.last_index(2), 0);

        backing.set("maxplayer.index", json!(1.5));
        assert_eq!(store.last_index(3), 0);

        backing.set("maxplayer.index", json!(-1));
        assert_eq!(store.last_index(3), 0);

        backing.set("maxplayer.index", json!({"oops": true}));
        assert_eq!(store.last_index(3), 0);
    }

    #[test]
    fn numeric_strings_read_back_as_numbers() {
        let backing = MemoryStore::new();
        let store = persistence(backing.clone());

        backing.set("maxplayer.index", json!("1"));
        backing.set("maxplayer.time", json!(" 42 "));
        backing.set("maxplayer.volume", json!("0.5"));
        assert_eq!(store.last_index(3), 1);
        assert_eq!(store.last_time(), 42.0);
        assert_eq!(store.volume(), 0.5);

        backing.set("maxplayer.index", json!("1.5"));
        backing.set("maxplayer.time", json!("NaN"));
        assert_eq!(store.last_index(3), 0);
        assert_eq!(store.last_time(), 0.0);
    }

    #[test]
    fn volume_is_clamped_and_defaulted() {
        let backing = MemoryStore::new();
        let store = persistence(backing.clone());
        assert_eq!(store.volume(), 1.0);

        backing.set("maxplayer.volume", json!(3.5));
        assert_eq!(store.volume(), 1.0);

        backing.set("maxplayer.volume", json!(-0.2));
        assert_eq!(store.volume(), 0.0);

        backing.set("maxplayer.volume", json!("loud"));
        assert_eq!(store.volume(), 1.0);
    }

    #[test]
    fn corrupt_field_does_not_affect_the_others() {
        let backing = MemoryStore::new();
        backing.set("maxplayer.time", json!("garbage"));
        backing.set("maxplayer.volume", json!(0.25));
        backing.set("maxplayer.muted", json!(true));
        let store = persistence(backing);
        assert_eq!(store.last_time(), 0.0);
        assert_eq!(store.volume(), 0.25);
        assert!(store.muted());
    }

    #[test]
    fn time_is_stored_as_whole_seconds() {
        let backing = MemoryStore::new();
        let store = persistence(backing.clone());
        store.save_time(41.9);
        assert_eq!(backing.raw("maxplayer.time"), Some(json!(41)));
        store.save_time(f64::NAN);
        assert_eq!(backing.raw("maxplayer.time"), Some(json!(0)));
    }

    #[test]
    fn muted_uses_loose_truthiness() {
        let backing = MemoryStore::new();
        let store = persistence(backing.clone());
        for (value, expected) in [
            (json!(1), true),
            (json!(0), false),
            (json!(""), false),
            (json!("yes"), true),
            (json!(null), false),
        ] {
            backing.set("maxplayer.muted", value);
            assert_eq!(store.muted(), expected);
        }
    }
}
