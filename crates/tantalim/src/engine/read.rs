use async_recursion::async_recursion;
use futures::future::try_join_all;
use indexmap::IndexSet;
use std::collections::HashMap;
use tantalim_core::{
    driver::QuerySql,
    schema::Model,
    stmt::{Filter, ValueKey},
    Driver, Error, Record, Result, Row,
};
use tantalim_sql::{filter, stmt};

/// Reads `model` and, level by level, all of its children.
///
/// The filter is parsed before anything is executed. `page_number` applies
/// to the top level only.
pub(crate) async fn read(
    driver: &dyn Driver,
    model: &Model,
    filter_text: Option<&str>,
    page_number: Option<u64>,
) -> Result<Vec<Row>> {
    let filter = match filter_text {
        Some(text) => filter::parse(text, &model.fields)?,
        None => None,
    };

    read_level(driver, model, Filter::from(filter), page_number).await
}

#[async_recursion]
async fn read_level(
    driver: &dyn Driver,
    model: &Model,
    filter: Filter,
    page_number: Option<u64>,
) -> Result<Vec<Row>> {
    let query = stmt::query_model(model, filter, page_number);
    let records = driver.exec(QuerySql::new(query)).await?.rows.into_values()?;

    tracing::debug!(model = %model.name, rows = records.len(), "read rows");

    let mut rows: Vec<_> = records
        .into_iter()
        .map(|record| to_row(model, record))
        .collect();

    if rows.is_empty() || model.children.is_empty() {
        return Ok(rows);
    }

    let child_rows = try_join_all(
        model
            .children
            .iter()
            .map(|child| read_children(driver, child, &rows)),
    )
    .await?;

    for (child, child_rows) in model.children.iter().zip(child_rows) {
        attach(child, &mut rows, child_rows)?;
    }

    Ok(rows)
}

/// Reads the rows of `child` that belong to any of `parents`.
async fn read_children(driver: &dyn Driver, child: &Model, parents: &[Row]) -> Result<Vec<Row>> {
    let Some(link) = &child.parent_link else {
        return Err(Error::invalid_definition(
            &child.name,
            "child model has no parent link",
        ));
    };

    let Some(column) = child
        .field(&link.child_field)
        .and_then(|field| field.column_expr())
    else {
        return Err(Error::invalid_definition(
            &child.name,
            format!("parent link field `{}` has no column", link.child_field),
        ));
    };

    // Distinct parent keys, in first-seen order
    let mut seen = IndexSet::new();
    let keys: Vec<_> = parents
        .iter()
        .map(|parent| parent.get(&link.parent_field))
        .filter(|value| value.key().is_some_and(|key| seen.insert(key)))
        .cloned()
        .collect();

    if keys.is_empty() {
        tracing::debug!(model = %child.name, "no parent keys; skipping child query");
        return Ok(vec![]);
    }

    let filter = Filter::new(stmt::Expr::in_list(column, keys));
    read_level(driver, child, filter, None).await
}

/// Distributes `child_rows` under every parent whose link value matches.
fn attach(child: &Model, parents: &mut [Row], child_rows: Vec<Row>) -> Result<()> {
    let Some(link) = &child.parent_link else {
        return Err(Error::invalid_definition(
            &child.name,
            "child model has no parent link",
        ));
    };

    let mut by_key: HashMap<ValueKey, Vec<usize>> = HashMap::new();
    for (index, parent) in parents.iter_mut().enumerate() {
        parent.children.insert(child.name.clone(), vec![]);

        if let Some(key) = parent.get(&link.parent_field).key() {
            by_key.entry(key).or_default().push(index);
        }
    }

    let mut orphans = 0;
    for row in child_rows {
        let matches = row
            .get(&link.child_field)
            .key()
            .and_then(|key| by_key.get(&key));

        let Some(matches) = matches else {
            orphans += 1;
            continue;
        };

        for &index in matches {
            if let Some(siblings) = parents[index].children.get_mut(&child.name) {
                siblings.push(row.clone());
            }
        }
    }

    if orphans > 0 {
        tracing::warn!(
            model = %child.name,
            orphans,
            "child rows did not match any parent row"
        );
    }

    Ok(())
}

fn to_row(model: &Model, mut data: Record) -> Row {
    for field in model.boolean_fields() {
        if let Some(value) = data.get_mut(&field.name) {
            *value = value.to_strict_bool();
        }
    }

    let id = model
        .instance_key()
        .map(|key| data.get(&key.name).cloned().unwrap_or_default())
        .filter(|id| !id.is_null());

    let foreign_key = model
        .parent_link
        .as_ref()
        .and_then(|link| data.get(&link.child_field).cloned())
        .filter(|value| !value.is_null());

    Row {
        data,
        id,
        foreign_key,
        ..Row::default()
    }
}
