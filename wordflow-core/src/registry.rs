//! Ordered Document Registry
//!
//! Owns every [`StatisticsRecord`] of a run, keyed by label. Records live in
//! one contiguous table in registration order; a hash index maps labels to
//! slots.
//!
//! ## Layout
//!
//! ```text
//! slots:  [0: "Apple 10-K"] [1: "AMD 10-K"] [2: "Intel CSR"] ...
//! index:  "AMD 10-K" -> 1, "Apple 10-K" -> 0, "Intel CSR" -> 2
//! ```
//!
//! ## Ordering
//!
//! - New labels append a slot.
//! - Re-registering a label replaces the record in its existing slot, so
//!   iteration order (and every node index derived from it) is stable.
//!
//! ## Threading
//!
//! [`DocumentRegistry`] is a plain owned value. Hosts that need to share one
//! across threads wrap it in [`SharedRegistry`], which takes a single writer
//! lock per insert or overwrite.

use std::sync::Arc;

use indexmap::map::Entry;
use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;
use tracing::warn;
use wordflow_types::{RegistryError, StatisticsRecord};

/// Label → record table with stable insertion order.
#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    records: IndexMap<String, StatisticsRecord, FxBuildHasher>,
}

impl DocumentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with room for `docs` records.
    pub fn with_capacity(docs: usize) -> Self {
        Self {
            records: IndexMap::with_capacity_and_hasher(docs, FxBuildHasher::default()),
        }
    }

    /// Inserts or overwrites the record for `label`.
    ///
    /// Returns `true` if an older record was replaced. A replaced label keeps
    /// its original position.
    pub fn register(&mut self, label: impl Into<String>, record: StatisticsRecord) -> bool {
        self.register_full(label, record).1
    }

    /// Like [`register`](Self::register), also returning the stored record.
    pub fn register_full(
        &mut self,
        label: impl Into<String>,
        record: StatisticsRecord,
    ) -> (&StatisticsRecord, bool) {
        match self.records.entry(label.into()) {
            Entry::Occupied(mut slot) => {
                warn!(label = %slot.key(), slot = slot.index(), "overwriting registered document");
                slot.insert(record);
                (slot.into_mut(), true)
            }
            Entry::Vacant(slot) => (slot.insert(record), false),
        }
    }

    /// Returns the record registered under `label`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownLabel`] if `label` was never registered.
    pub fn get(&self, label: &str) -> Result<&StatisticsRecord, RegistryError> {
        self.records
            .get(label)
            .ok_or_else(|| RegistryError::UnknownLabel(label.to_owned()))
    }

    /// Returns `true` if `label` is registered.
    #[inline]
    pub fn contains(&self, label: &str) -> bool {
        self.records.contains_key(label)
    }

    /// Position of `label` in iteration order.
    #[inline]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.records.get_index_of(label)
    }

    /// Labels in registration order.
    pub fn labels(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    /// `(label, record)` pairs in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &StatisticsRecord)> + '_ {
        self.records.iter().map(|(l, r)| (l.as_str(), r))
    }

    /// Number of registered documents.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing is registered.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Shareable registry guarded by one reader/writer lock.
///
/// Records are written and read whole, so no finer locking is needed.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<DocumentRegistry>>,
}

impl SharedRegistry {
    /// Creates an empty shared registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing registry.
    pub fn from_registry(registry: DocumentRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Inserts or overwrites under the writer lock.
    pub fn register(&self, label: impl Into<String>, record: StatisticsRecord) -> bool {
        self.inner.write().register(label, record)
    }

    /// Clones the record registered under `label`.
    pub fn get(&self, label: &str) -> Result<StatisticsRecord, RegistryError> {
        self.inner.read().get(label).cloned()
    }

    /// Labels in registration order.
    pub fn labels(&self) -> Vec<String> {
        self.inner.read().labels().map(str::to_owned).collect()
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Runs `f` against the registry under the reader lock.
    pub fn read<R>(&self, f: impl FnOnce(&DocumentRegistry) -> R) -> R {
        f(&self.inner.read())
    }

    /// Clones the current contents.
    pub fn snapshot(&self) -> DocumentRegistry {
        self.inner.read().clone()
    }
}
