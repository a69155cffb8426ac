//! Turns [`ModelDef`]s into [`Model`]s.
//!
//! Compilation runs in two phases. The resolve phase walks the definition
//! tree, collects every table name it references that is not cached yet, and
//! fetches them all concurrently from the [`TableProvider`]. Fetched tables can
//! reference further tables through their joins, so this repeats until nothing
//! is missing. The bind phase then walks the tree once more and binds every
//! name against the cached metadata. Binding is synchronous and never fetches.

mod bind;

mod cache;
pub use cache::TableCache;

mod provider;
pub use provider::{TableProvider, TableSet};

mod resolve;

use tantalim_core::{
    schema::{Model, ModelDef},
    Result,
};

use std::sync::Arc;
use tracing::Instrument;

#[derive(Debug, Clone)]
pub struct Compiler {
    cache: Arc<TableCache>,
    provider: Option<Arc<dyn TableProvider>>,
}

impl Compiler {
    /// A compiler that only knows the tables already in `cache`.
    pub fn new(cache: Arc<TableCache>) -> Self {
        Self {
            cache,
            provider: None,
        }
    }

    /// A compiler that fetches missing tables from `provider`.
    pub fn with_provider(cache: Arc<TableCache>, provider: Arc<dyn TableProvider>) -> Self {
        Self {
            cache,
            provider: Some(provider),
        }
    }

    pub fn cache(&self) -> &Arc<TableCache> {
        &self.cache
    }

    pub async fn compile(&self, def: &ModelDef) -> Result<Model> {
        let span = tracing::debug_span!("compile", model = def.display_name());
        self.compile_in_span(def).instrument(span).await
    }

    async fn compile_in_span(&self, def: &ModelDef) -> Result<Model> {
        resolve::resolve(&self.cache, self.provider.as_deref(), def).await?;
        let model = bind::model(&self.cache, def)?;

        tracing::debug!(
            fields = model.fields.len(),
            steps = model.steps.len(),
            children = model.children.len(),
            "compiled model"
        );
        Ok(model)
    }
}
