//! # Config Store
//!
//! String-keyed option storage. Key material and site settings are persisted
//! through this capability, so the host decides where (and how atomically)
//! values are kept.

use std::sync::Arc;

use dashmap::DashMap;

use crate::Result;

/// `ConfigStore` is used by implementers to provide persistent option storage.
///
/// Implementations are expected to be cheap to clone (a handle onto shared
/// state) so the same store can be handed to several services.
pub trait ConfigStore: Send + Sync + Clone {
    /// Fetch the value stored under `key`, returning `None` if the key is not
    /// set.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a key that is not set is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn delete(&self, key: &str) -> Result<()>;
}

/// In-memory [`ConfigStore`]. Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    options: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` if no keys are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.options.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.options.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.options.remove(key);
        Ok(())
    }
}
