use super::Db;
use crate::compile::{Compiler, TableCache, TableProvider};

use tantalim_core::{schema::Table, Driver};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    /// Shared cache, when the caller wants one across handles.
    cache: Option<Arc<TableCache>>,

    provider: Option<Arc<dyn TableProvider>>,

    /// Tables to preload into the cache on build.
    tables: Vec<Table>,
}

impl Builder {
    /// Fetch tables that are not cached yet from `provider`.
    pub fn table_provider(&mut self, provider: impl TableProvider) -> &mut Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Use `cache` instead of a fresh one.
    pub fn table_cache(&mut self, cache: Arc<TableCache>) -> &mut Self {
        self.cache = Some(cache);
        self
    }

    /// Preload `table` into the cache.
    pub fn table(&mut self, table: Table) -> &mut Self {
        self.tables.push(table);
        self
    }

    pub fn build(&mut self, driver: impl Driver) -> Db {
        self.build_with(Arc::new(driver))
    }

    #[cfg(feature = "mysql")]
    pub async fn connect(&mut self, url: &str) -> tantalim_core::Result<Db> {
        let driver = super::connect(url).await?;
        Ok(self.build_with(driver))
    }

    fn build_with(&mut self, driver: Arc<dyn Driver>) -> Db {
        let cache = self.cache.clone().unwrap_or_default();

        for table in self.tables.drain(..) {
            tracing::debug!(table = %table.name, "preloading table");
            cache.insert(table.name.clone(), table);
        }

        let compiler = match &self.provider {
            Some(provider) => Compiler::with_provider(cache, provider.clone()),
            None => Compiler::new(cache),
        };

        Db { driver, compiler }
    }
}
