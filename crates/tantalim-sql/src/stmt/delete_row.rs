use super::*;

use tantalim_core::{schema::Model, Result, Row};

/// Builds the `DELETE` for a row, keyed by its `id`.
pub fn delete_row(model: &Model, row: &Row) -> Result<Delete> {
    Ok(Delete {
        from: model.basis_table.storage_name.clone(),
        filter: key_filter(model, row)?,
    })
}
