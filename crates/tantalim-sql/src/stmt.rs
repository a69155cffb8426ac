//! Builds statements from compiled models.
//!
//! Builders are pure: they read the model and the row and never touch the
//! database.

mod delete_row;
pub use delete_row::delete_row;

mod insert_row;
pub use insert_row::insert_row;

mod query_model;
pub use query_model::query_model;

mod update_row;
pub use update_row::update_row;

pub use tantalim_core::stmt::*;

use tantalim_core::{schema::Model, Error, Result, Row};

/// Storage name of the instance key column and the row's key value.
fn key_filter(model: &Model, row: &Row) -> Result<Filter> {
    let Some(key) = model.instance_key() else {
        return Err(Error::missing_key(format!(
            "model `{}` has no instance key",
            model.name
        )));
    };

    let Some(id) = row.id.as_ref().filter(|id| !id.is_null()) else {
        return Err(Error::missing_key(format!(
            "row of `{}` has no id ({})",
            model.name,
            row.label()
        )));
    };

    let column = key.storage_name().ok_or_else(|| {
        Error::missing_key(format!(
            "instance key `{}` of `{}` has no column",
            key.name, model.name
        ))
    })?;

    Ok(Filter::new(Expr::eq(
        Expr::bare_column(column),
        Expr::Value(id.clone()),
    )))
}
