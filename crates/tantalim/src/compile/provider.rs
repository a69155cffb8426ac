use async_trait::async_trait;
use tantalim_core::{schema::Table, Error, Result};

use std::{collections::HashMap, fmt::Debug};

/// Source of table metadata for tables the cache does not hold yet.
#[async_trait]
pub trait TableProvider: Debug + Send + Sync + 'static {
    /// Fetch the table with the given logical name.
    async fn table(&self, name: &str) -> Result<Table>;
}

/// An in-memory [`TableProvider`].
#[derive(Debug, Default, Clone)]
pub struct TableSet {
    tables: HashMap<String, Table>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: Table) -> &mut Self {
        self.tables.insert(table.name.clone(), table);
        self
    }

    /// Parses a JSON array of table definitions.
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: Vec<Table> = serde_json::from_str(json)?;
        Ok(tables.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<Table> for TableSet {
    fn from_iter<I: IntoIterator<Item = Table>>(iter: I) -> Self {
        let mut set = TableSet::new();
        for table in iter {
            set.insert(table);
        }
        set
    }
}

#[async_trait]
impl TableProvider for TableSet {
    async fn table(&self, name: &str) -> Result<Table> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| Error::table_not_found(name))
    }
}
