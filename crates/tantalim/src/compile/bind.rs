use super::TableCache;

use std::sync::Arc;
use tantalim_core::{
    schema::{
        validate_code_name, Field, FieldDef, JoinColumn, JoinSource, Model, ModelDef, ModelName,
        OrderBy, ParentLink, ParentLinkDef, ResolvedColumn, ResolvedJoin, Step, StepDef, Table,
        TableRef,
    },
    Error, Result,
};
use tantalim_sql::filter;

/// Binds `def` and its children against the cached tables.
pub(super) fn model(cache: &TableCache, def: &ModelDef) -> Result<Model> {
    let name = def.display_name().to_string();
    let invalid = |message: String| Error::invalid_definition(&name, message);

    let Some(basis) = &def.basis_table else {
        return Err(invalid("basisTable is required".into()));
    };
    ModelName::parse(&name)?;

    let basis_table = table(cache, basis)?;

    // Table of each alias: `tables[0]` is the basis table, `tables[n]` the
    // table joined by step `n`.
    let mut tables = vec![basis_table.clone()];
    let mut steps: Vec<Step> = vec![];

    for step_def in &def.steps {
        let step = step(cache, &name, step_def, &steps, &tables)?;
        tables.push(table(cache, &step.join.table.name)?);
        steps.push(step);
    }

    let mut fields: Vec<Field> = vec![];
    for field_def in &def.fields {
        if fields.iter().any(|field| field.name == field_def.name) {
            return Err(invalid(format!("duplicate field `{}`", field_def.name)));
        }
        fields.push(field(&name, field_def, &steps, &tables)?);
    }

    let instance_key = basis_table.primary_key_column().and_then(|pk| {
        fields.iter().position(|field| {
            field.is_on_basis_table()
                && field
                    .column
                    .as_ref()
                    .is_some_and(|column| column.name == pk.name)
        })
    });

    let order_by = def
        .order_by
        .iter()
        .map(|order_by| {
            let bound = fields
                .iter()
                .any(|field| field.name == order_by.field_name && field.column.is_some());
            if !bound {
                return Err(invalid(format!(
                    "orderBy field `{}` is not a field with a column",
                    order_by.field_name
                )));
            }
            Ok(OrderBy {
                field: order_by.field_name.clone(),
                direction: order_by.direction,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let static_filter = match &def.filter {
        Some(text) => filter::parse(text, &fields)
            .map_err(|err| err.context(invalid("static filter".into())))?,
        None => None,
    };

    let mut children: Vec<Model> = vec![];
    for child_def in &def.children {
        let child = child(cache, &name, child_def, &fields)?;
        if children.iter().any(|existing| existing.name == child.name) {
            return Err(invalid(format!("duplicate child model `{}`", child.name)));
        }
        children.push(child);
    }

    Ok(Model {
        name: name.clone(),
        basis_table: TableRef {
            name: basis_table.name.clone(),
            storage_name: basis_table.storage_name.clone(),
        },
        steps,
        fields,
        instance_key,
        order_by,
        filter: static_filter,
        limit: def.limit,
        children,
        parent_link: None,
    })
}

fn table(cache: &TableCache, name: &str) -> Result<Arc<Table>> {
    cache.get(name).ok_or_else(|| Error::table_not_found(name))
}

fn step(
    cache: &TableCache,
    model: &str,
    def: &StepDef,
    steps: &[Step],
    tables: &[Arc<Table>],
) -> Result<Step> {
    let invalid = |message: String| Error::invalid_definition(model, message);

    validate_code_name(model, &def.name)?;
    if steps.iter().any(|step| step.name == def.name) {
        return Err(invalid(format!("duplicate step `{}`", def.name)));
    }

    let Some(join_name) = &def.join else {
        return Err(invalid(format!("step `{}` must define a join", def.name)));
    };

    let source_index = match &def.previous_step {
        Some(previous) => steps
            .iter()
            .find(|step| &step.name == previous)
            .map(|step| step.index)
            .ok_or_else(|| {
                invalid(format!(
                    "step `{}` follows `{previous}`, which is not declared before it",
                    def.name
                ))
            })?,
        None => 0,
    };
    let source = &tables[source_index];

    let Some(join) = source.join(join_name) else {
        return Err(invalid(format!(
            "step `{}` uses join `{join_name}`, which is not defined on table `{}`",
            def.name, source.name
        )));
    };
    let target = table(cache, &join.table)?;

    if join.columns.is_empty() {
        return Err(invalid(format!("join `{join_name}` has no columns")));
    }

    let columns = join
        .columns
        .iter()
        .map(|column| {
            let Some(to) = target.column(&column.to) else {
                return Err(invalid(format!(
                    "join `{join_name}` references column `{}`, which is not on table `{}`",
                    column.to, target.name
                )));
            };

            let from = match (&column.from_text, &column.from) {
                (Some(text), _) => JoinSource::Text(text.clone()),
                (None, Some(from)) => match source.column(from) {
                    Some(from) => JoinSource::Column {
                        step: source_index,
                        storage_name: from.storage_name.clone(),
                    },
                    None => {
                        return Err(invalid(format!(
                            "join `{join_name}` references column `{from}`, which is not on table `{}`",
                            source.name
                        )))
                    }
                },
                (None, None) => {
                    return Err(invalid(format!(
                        "join `{join_name}` column `{}` needs `from` or `fromText`",
                        column.to
                    )))
                }
            };

            Ok(JoinColumn {
                from,
                to: to.storage_name.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Step {
        name: def.name.clone(),
        index: steps.len() + 1,
        required: def.required,
        join: ResolvedJoin {
            name: join_name.clone(),
            table: TableRef {
                name: target.name.clone(),
                storage_name: target.storage_name.clone(),
            },
            columns,
        },
    })
}

fn field(model: &str, def: &FieldDef, steps: &[Step], tables: &[Arc<Table>]) -> Result<Field> {
    let invalid = |message: String| Error::invalid_definition(model, message);

    validate_code_name(model, &def.name)?;

    let step = match &def.step {
        Some(step_name) => steps
            .iter()
            .find(|step| &step.name == step_name)
            .map(|step| step.index)
            .ok_or_else(|| {
                invalid(format!(
                    "field `{}` references unknown step `{step_name}`",
                    def.name
                ))
            })?,
        None => 0,
    };
    let table = &tables[step];

    let column = match &def.basis_column {
        Some(column_name) => match table.column(column_name) {
            Some(column) => Some(column),
            None => {
                return Err(invalid(format!(
                    "field `{}` references column `{column_name}`, which is not on table `{}`",
                    def.name, table.name
                )))
            }
        },
        None => None,
    };

    if let Some(column) = column {
        if column.column_default.is_none() && column.legacy_default.is_some() {
            tracing::warn!(
                table = %table.name,
                column = %column.name,
                "`default` is deprecated, use `columnDefault`"
            );
        }
    }

    Ok(Field {
        name: def.name.clone(),
        column: column.map(|column| ResolvedColumn {
            name: column.name.clone(),
            storage_name: column.storage_name.clone(),
        }),
        step,
        updateable: def.updateable,
        required: def.required || column.is_some_and(|column| column.required),
        column_default: def
            .column_default
            .clone()
            .or_else(|| column.and_then(|column| column.effective_default().cloned())),
        data_type: def
            .data_type
            .or_else(|| column.and_then(|column| column.data_type)),
    })
}

fn child(
    cache: &TableCache,
    parent: &str,
    def: &ModelDef,
    parent_fields: &[Field],
) -> Result<Model> {
    let mut child = model(cache, def)?;
    let invalid = |message: String| Error::invalid_definition(&child.name, message);

    let link = match (&def.parent_link, def.foreign_keys.as_slice()) {
        (Some(link), _) => link,
        (None, [link]) => link,
        (None, []) => {
            return Err(invalid(format!(
                "child of `{parent}` must declare a parentLink"
            )))
        }
        (None, _) => {
            return Err(invalid(
                "only single-column parent links are supported".into(),
            ))
        }
    };
    let ParentLinkDef {
        parent_field,
        child_field,
    } = link;

    let parent_bound = parent_fields
        .iter()
        .any(|field| &field.name == parent_field && field.column.is_some());
    if !parent_bound {
        return Err(invalid(format!(
            "parentLink.parentField `{parent_field}` is not a field of `{parent}` with a column"
        )));
    }

    if child.field(child_field).and_then(Field::storage_name).is_none() {
        return Err(invalid(format!(
            "parentLink.childField `{child_field}` is not a field with a column"
        )));
    }

    child.parent_link = Some(ParentLink {
        parent_field: parent_field.clone(),
        child_field: child_field.clone(),
    });

    Ok(child)
}
