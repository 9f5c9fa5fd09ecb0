#[cfg(not(target_arch = "wasm32"))]
mod file;

use std::cell::RefCell;
use std::collections::BTreeMap;

use anyhow::{Context, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

/// Synchronous string key-value storage, the shape of `window.localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// In-process store. An optional byte quota makes writes fail the way a
/// full browser storage area does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RefCell::new(BTreeMap::new()),
            quota: Some(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        if let Some(quota) = self.quota {
            let needed = self.used_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(anyhow!(
                    "quota exceeded writing {key}: {needed} bytes > {quota}"
                ));
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[tracing::instrument(skip(store))]
pub fn read_collection<T>(store: &dyn KeyValueStore, key: &str) -> anyhow::Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        debug!("no stored document");
        return Ok(Vec::new());
    };
    let items: Vec<T> =
        serde_json::from_str(&raw).with_context(|| format!("failed parsing {key}"))?;
    debug!(count = items.len(), "loaded collection");
    Ok(items)
}

#[tracing::instrument(skip(store, items), fields(count = items.len()))]
pub fn write_collection<T>(store: &dyn KeyValueStore, key: &str, items: &[T]) -> anyhow::Result<()>
where
    T: Serialize,
{
    let serialized = serde_json::to_string(items)?;
    store
        .set(key, &serialized)
        .with_context(|| format!("failed writing {key}"))?;
    Ok(())
}

/// Loads a collection, treating a missing, corrupt or unreadable document
/// as empty.
pub fn load_or_empty<T>(store: &dyn KeyValueStore, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
{
    match read_collection(store, key) {
        Ok(items) => items,
        Err(err) => {
            error!(key, error = %format!("{err:#}"), "error loading collection; starting empty");
            Vec::new()
        }
    }
}

/// Persists a collection. Failures are logged and otherwise ignored; the
/// in-memory state stays authoritative until the next successful write.
pub fn save_or_log<T>(store: &dyn KeyValueStore, key: &str, items: &[T]) -> bool
where
    T: Serialize,
{
    match write_collection(store, key, items) {
        Ok(()) => true,
        Err(err) => {
            error!(key, error = %format!("{err:#}"), "error saving collection");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_corrupt_documents_load_empty() {
        let store = MemoryStore::new();
        let missing: Vec<u64> = load_or_empty(&store, "nothing");
        assert!(missing.is_empty());

        store.set("broken", "{not json").expect("set");
        let corrupt: Vec<u64> = load_or_empty(&store, "broken");
        assert!(corrupt.is_empty());
        assert!(read_collection::<u64>(&store, "broken").is_err());
    }

    #[test]
    fn quota_rejects_oversized_writes() {
        let store = MemoryStore::with_quota(16);
        assert!(save_or_log(&store, "k", &[1, 2, 3]));
        assert!(!save_or_log(&store, "k", &vec![123_456_789_u64; 8]));
        let kept: Vec<u64> = load_or_empty(&store, "k");
        assert_eq!(kept, vec![1, 2, 3]);
    }

    #[test]
    fn rewriting_a_key_does_not_count_twice_against_quota() {
        let store = MemoryStore::with_quota(12);
        store.set("k", "[1,2,3]").expect("first write");
        store.set("k", "[4,5,6]").expect("rewrite fits");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("[4,5,6]"));
    }
}
