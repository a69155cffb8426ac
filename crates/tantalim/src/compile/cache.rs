use tantalim_core::schema::Table;

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Process-wide table metadata, keyed by logical table name.
///
/// Readers never block each other. Re-inserting a table replaces the cached
/// copy; since the provider returns the same metadata for the same name this
/// is safe to race.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: RwLock<HashMap<String, Arc<Table>>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<Table>> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Caches `table` under `name`, replacing any previous entry.
    pub fn insert(&self, name: impl Into<String>, table: Table) -> Arc<Table> {
        let table = Arc::new(table);
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), table.clone());
        table
    }

    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Table> for TableCache {
    fn from_iter<I: IntoIterator<Item = Table>>(iter: I) -> Self {
        let cache = TableCache::new();
        for table in iter {
            cache.insert(table.name.clone(), table);
        }
        cache
    }
}
