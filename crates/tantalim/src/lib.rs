pub mod compile;
pub use compile::{Compiler, TableCache, TableProvider, TableSet};

pub mod db;
pub use db::Db;

mod engine;

pub use tantalim_core::{
    driver::{self, Driver},
    schema::{self, Model, ModelDef, Table},
    stmt::Value,
    Error, Record, Result, Row, RowState,
};
