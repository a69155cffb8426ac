use async_recursion::async_recursion;
use futures::future::join_all;
use tantalim_core::{
    driver::QuerySql,
    err,
    schema::{ColumnDefault, Model},
    stmt::Value,
    Driver, Error, Result, Row, RowState,
};
use tantalim_sql::stmt;

/// Applies the pending state of every row in `rows`, then of their children.
///
/// Rows are saved concurrently and independently: one failing row does not
/// stop its siblings. The returned rows have their state cleared. Nothing is
/// rolled back on failure.
pub(crate) async fn save(driver: &dyn Driver, model: &Model, rows: Vec<Row>) -> Result<Vec<Row>> {
    require_key(model)?;
    check_keys(model, &rows, false)?;

    save_rows(driver, model, rows).await
}

fn require_key(model: &Model) -> Result<()> {
    if model.instance_key().is_none() {
        return Err(Error::missing_key(format!(
            "model `{}` has no instance key",
            model.name
        )));
    }

    Ok(())
}

/// Fails before any write when a row that would be written, or reached by a
/// cascade delete, belongs to a model without an instance key.
fn check_keys(model: &Model, rows: &[Row], cascading: bool) -> Result<()> {
    for row in rows {
        if cascading && is_unsaved(row) {
            continue;
        }

        if cascading || row.state.is_some() {
            require_key(model)?;
        }

        let cascading = cascading || row.state == Some(RowState::Deleted);

        for child in &model.children {
            if let Some(child_rows) = row.children.get(&child.name) {
                check_keys(child, child_rows, cascading)?;
            }
        }
    }

    Ok(())
}

/// Inserted on the client and never written.
fn is_unsaved(row: &Row) -> bool {
    row.state == Some(RowState::Inserted) && row.id.is_none()
}

#[async_recursion]
async fn save_rows(driver: &dyn Driver, model: &Model, rows: Vec<Row>) -> Result<Vec<Row>> {
    let total = rows.len();
    let results = join_all(rows.into_iter().map(|row| save_row(driver, model, row))).await;

    let mut saved = Vec::with_capacity(total);
    let mut failed = 0;
    let mut first_err = None;

    for result in results {
        match result {
            Ok(row) => saved.push(row),
            Err(err) => {
                tracing::error!(model = %model.name, error = %err, "failed to save row");
                failed += 1;
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
    }

    match first_err {
        None => Ok(saved),
        Some(err) => Err(err.context(Error::save_failed(&model.name, failed, total))),
    }
}

async fn save_row(driver: &dyn Driver, model: &Model, mut row: Row) -> Result<Row> {
    let state = row.state;
    let label = row.label();

    apply(driver, model, &mut row).await.map_err(|err| {
        let state = state.map_or("unchanged", RowState::as_str);
        err.context(err!("{state} `{}` row {label}", model.name))
    })?;

    Ok(row)
}

async fn apply(driver: &dyn Driver, model: &Model, row: &mut Row) -> Result<()> {
    match row.state {
        Some(RowState::Inserted) => {
            insert(driver, model, row).await?;
            row.state = None;
            stitch_children(model, row);
        }
        Some(RowState::Updated) => {
            update(driver, model, row).await?;
            row.state = None;
        }
        Some(RowState::Deleted) => {
            delete(driver, model, row).await?;
            row.state = None;
            return Ok(());
        }
        None => {}
    }

    save_children(driver, model, row).await
}

async fn insert(driver: &dyn Driver, model: &Model, row: &mut Row) -> Result<()> {
    if let Some(temp_id) = &row.temp_id {
        for field in &model.fields {
            if field.is_on_basis_table() && field.column_default == Some(ColumnDefault::Guid) {
                row.data.insert(field.name.clone(), temp_id.clone());
            }
        }
    }

    let insert = stmt::insert_row(model, row);
    let response = driver.exec(QuerySql::new(insert)).await?;

    match response.rows.last_insert_id() {
        Some(id) => {
            let id = i64::try_from(id).map_or(Value::U64(id), Value::I64);
            tracing::debug!(model = %model.name, %id, "assigned auto-increment key");

            if let Some(key) = model.instance_key() {
                row.data.insert(key.name.clone(), id.clone());
            }
            row.id = Some(id);
        }
        None => {
            row.id = row.temp_id.clone();

            if row.id.is_none() {
                tracing::warn!(
                    model = %model.name,
                    "inserted row has neither an auto-increment key nor a tempID"
                );
            }
        }
    }

    Ok(())
}

async fn update(driver: &dyn Driver, model: &Model, row: &Row) -> Result<()> {
    let Some(update) = stmt::update_row(model, row)? else {
        tracing::debug!(model = %model.name, row = %row.label(), "nothing to update");
        return Ok(());
    };

    let count = driver
        .exec(QuerySql::new(update))
        .await?
        .rows
        .into_count()?;

    if count == 0 {
        tracing::warn!(model = %model.name, row = %row.label(), "update matched no rows");
    }

    Ok(())
}

/// Deletes `row` after deleting every child row under it, whatever the child
/// rows' own state. Child rows that were never inserted are skipped.
#[async_recursion]
async fn delete(driver: &dyn Driver, model: &Model, row: &mut Row) -> Result<()> {
    let statement = stmt::delete_row(model, row)?;

    for child in &model.children {
        let Some(child_rows) = row.children.get_mut(&child.name) else {
            continue;
        };

        for child_row in child_rows.iter_mut() {
            if is_unsaved(child_row) {
                continue;
            }

            delete(driver, child, child_row).await?;
            child_row.state = None;
        }
    }

    let count = driver
        .exec(QuerySql::new(statement))
        .await?
        .rows
        .into_count()?;

    if count != 1 {
        return Err(Error::invalid_record_count(format!(
            "expected to delete 1 `{}` row ({}), deleted {count}",
            model.name,
            row.label()
        )));
    }

    Ok(())
}

/// Copies the parent's link value into every child row's link field.
fn stitch_children(model: &Model, row: &mut Row) {
    for child in &model.children {
        let Some(link) = &child.parent_link else {
            continue;
        };

        let mut value = row.get(&link.parent_field).clone();
        if value.is_null() && model.instance_key().is_some_and(|key| key.name == link.parent_field) {
            value = row.id.clone().unwrap_or_default();
        }

        let Some(child_rows) = row.children.get_mut(&child.name) else {
            continue;
        };

        for child_row in child_rows {
            child_row
                .data
                .insert(link.child_field.clone(), value.clone());
            child_row.foreign_key = Some(value.clone()).filter(|value| !value.is_null());
        }
    }
}

async fn save_children(driver: &dyn Driver, model: &Model, row: &mut Row) -> Result<()> {
    for child in &model.children {
        let Some(slot) = row.children.get_mut(&child.name) else {
            continue;
        };

        if slot.is_empty() {
            continue;
        }

        let child_rows = std::mem::take(slot);
        *slot = save_rows(driver, child, child_rows).await?;
    }

    Ok(())
}
