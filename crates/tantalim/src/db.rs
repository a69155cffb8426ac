mod builder;
pub use builder::Builder;

mod connect;
pub use connect::connect;

use crate::{compile::Compiler, engine};

use tantalim_core::{
    schema::{Model, ModelDef},
    Driver, Result, Row,
};

use std::sync::Arc;
use tracing::Instrument;

/// A handle for compiling models and reading or saving their rows.
///
/// Cloning is cheap. Clones share the driver and the table cache.
#[derive(Debug, Clone)]
pub struct Db {
    driver: Arc<dyn Driver>,
    compiler: Compiler,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// Compiles a model definition, fetching any table metadata it needs.
    pub async fn compile(&self, def: &ModelDef) -> Result<Model> {
        self.compiler.compile(def).await
    }

    /// Deserializes a model definition from JSON and compiles it.
    pub async fn compile_json(&self, json: &str) -> Result<Model> {
        let def: ModelDef = serde_json::from_str(json)?;
        self.compile(&def).await
    }

    /// Reads the rows of `model` that match `filter`, with every level of
    /// children attached.
    ///
    /// `page_number` is 1-based and only applies when the model has a limit.
    pub async fn get_data(
        &self,
        model: &Model,
        filter: Option<&str>,
        page_number: Option<u64>,
    ) -> Result<Vec<Row>> {
        let span = tracing::debug_span!("get_data", model = %model.name);
        engine::read(&*self.driver, model, filter, page_number)
            .instrument(span)
            .await
    }

    /// Writes every row's pending change, and those of its children.
    ///
    /// Returns the saved rows with their state cleared and generated keys
    /// filled in. If any row fails, the error is a `SaveFailed` whose cause is
    /// the first failure; rows that succeeded stay written.
    pub async fn save(&self, model: &Model, rows: Vec<Row>) -> Result<Vec<Row>> {
        let span = tracing::debug_span!("save", model = %model.name, rows = rows.len());
        engine::save(&*self.driver, model, rows)
            .instrument(span)
            .await
    }
}
