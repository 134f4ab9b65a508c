//! Class registry for the host runtime
//!
//! The registry is the answer to "does this class exist in the current
//! runtime?". Definitions are registered once and shared as
//! `Arc<ClassDef>`, so the registry can be handed to several workers while
//! each worker builds its own objects.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::types::ClassDef;

#[derive(Debug, Default)]
struct RegistryInner {
    /// Classes indexed by ID
    classes: Vec<Arc<ClassDef>>,
    /// Class name to ID mapping
    name_to_id: FxHashMap<String, usize>,
}

/// Registry of class definitions
#[derive(Debug, Default)]
pub struct ClassRegistry {
    inner: RwLock<RegistryInner>,
}

impl ClassRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class and return its ID.
    ///
    /// Registering a second class under an existing name shadows the
    /// first for name lookups.
    pub fn register(&self, class: ClassDef) -> usize {
        let mut inner = self.inner.write();
        let id = inner.classes.len();
        inner.name_to_id.insert(class.name().to_string(), id);
        inner.classes.push(Arc::new(class));
        id
    }

    /// Get class by name
    pub fn get_by_name(&self, name: &str) -> Option<Arc<ClassDef>> {
        let inner = self.inner.read();
        inner
            .name_to_id
            .get(name)
            .and_then(|id| inner.classes.get(*id))
            .cloned()
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.inner.read().classes.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().classes.is_empty()
    }
}
