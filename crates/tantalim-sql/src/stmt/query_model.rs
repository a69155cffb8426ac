use super::*;

use tantalim_core::schema::{JoinSource, Model, Step};

/// Builds the `SELECT` for `model`.
///
/// `filter` is ANDed with the model's static filter. The model's limit, if
/// any, is paged by `page_number` (1-based).
pub fn query_model(model: &Model, filter: Filter, page_number: Option<u64>) -> Query {
    let items: Vec<_> = model
        .fields
        .iter()
        .filter_map(|field| {
            Some(SelectItem {
                expr: field.column_expr()?,
                alias: field.name.clone(),
            })
        })
        .collect();

    let returning = if items.is_empty() {
        Returning::Star
    } else {
        Returning::Items(items)
    };

    let source = SourceTable {
        table: model.basis_table.storage_name.clone(),
        joins: model.steps.iter().map(join).collect(),
    };

    let mut where_clause = Filter::from(model.filter.clone());
    if let Some(expr) = filter.expr {
        where_clause.add(expr);
    }

    let order_by: Vec<_> = model
        .order_by
        .iter()
        .filter_map(|order_by| {
            let expr = model.field(&order_by.field)?.column_expr()?;
            Some(OrderByExpr {
                expr,
                order: order_by.direction.is_desc().then_some(Direction::Desc),
            })
        })
        .collect();

    Query {
        body: Select {
            returning,
            source,
            filter: where_clause,
        },
        order_by: (!order_by.is_empty()).then_some(OrderBy { exprs: order_by }),
        limit: model
            .limit
            .filter(|limit| *limit > 0)
            .map(|limit| Limit::page(limit, page_number)),
    }
}

fn join(step: &Step) -> Join {
    let terms = step.join.columns.iter().map(|column| {
        let from = match &column.from {
            JoinSource::Column { step, storage_name } => Expr::column(*step, storage_name.clone()),
            JoinSource::Text(text) => Expr::literal(text.clone()),
        };

        Expr::eq(Expr::column(step.index, column.to.clone()), from)
    });

    Join {
        kind: if step.required {
            JoinKind::Inner
        } else {
            JoinKind::Left
        },
        table: step.join.table.storage_name.clone(),
        alias: step.index,
        // The compiler rejects joins with no columns
        on: Expr::and_from_vec(terms.collect()).unwrap_or_else(|| Expr::value(true)),
    }
}
