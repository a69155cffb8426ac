use super::*;

use tantalim_core::{schema::Model, Result, Row};

/// Builds the `UPDATE` for an existing row, keyed by its `id`.
///
/// Returns `None` when the row has nothing to write.
pub fn update_row(model: &Model, row: &Row) -> Result<Option<Update>> {
    let filter = key_filter(model, row)?;

    let assignments: Vec<_> = model
        .fields
        .iter()
        .filter(|field| field.is_on_basis_table())
        .filter_map(|field| {
            let column = field.storage_name()?;

            let expr = match &field.column_default {
                Some(default) if default.applies_on_update() => Expr::now(),
                _ if !field.updateable => return None,
                // Explicit nulls are written
                _ => Expr::Value(row.data.get(&field.name)?.clone()),
            };

            Some(Assignment {
                column: column.to_string(),
                expr,
            })
        })
        .collect();

    if assignments.is_empty() {
        return Ok(None);
    }

    Ok(Some(Update {
        table: model.basis_table.storage_name.clone(),
        assignments,
        filter,
    }))
}
