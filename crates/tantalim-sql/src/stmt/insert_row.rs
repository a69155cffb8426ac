use super::*;

use tantalim_core::{
    schema::{ColumnDefault, Model},
    Row,
};

/// Builds the `INSERT` for a new row.
///
/// Writes every basis-table field that is updateable and has a non-null
/// value. Hard column defaults replace the row's value and are written even
/// for fields that are not updateable.
pub fn insert_row(model: &Model, row: &Row) -> Insert {
    let mut columns = vec![];
    let mut values = vec![];

    for field in model.fields.iter().filter(|field| field.is_on_basis_table()) {
        let Some(column) = field.storage_name() else {
            continue;
        };

        let hard_default = field
            .column_default
            .as_ref()
            .filter(|default| default.applies_on_insert());

        let value = match hard_default {
            Some(ColumnDefault::Guid) => {
                match row.temp_id.as_ref().unwrap_or_else(|| row.get(&field.name)) {
                    value if value.is_null() => continue,
                    value => Expr::Value(value.clone()),
                }
            }
            Some(_) => Expr::now(),
            None if !field.updateable => continue,
            None => match row.get(&field.name) {
                value if value.is_null() => continue,
                value => Expr::Value(value.clone()),
            },
        };

        columns.push(column.to_string());
        values.push(value);
    }

    Insert {
        table: model.basis_table.storage_name.clone(),
        columns,
        values,
    }
}
