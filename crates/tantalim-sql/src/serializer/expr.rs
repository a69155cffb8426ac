use super::{value::Quoted, Comma, Delimited, Flavor, Ident, Params, TableAlias, ToSql};

use tantalim_core::stmt::{self, ExprFunc, IntervalUnit};

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        use stmt::Expr::*;

        match self {
            And(expr) => {
                fmt!(f, Delimited(&expr.operands, " AND "));
            }
            BinaryOp(expr) => {
                let lhs = &*expr.lhs;
                let rhs = &*expr.rhs;

                fmt!(f, lhs " " expr.op.as_str() " " rhs);
            }
            Column(expr) => {
                if let Some(table) = expr.table {
                    fmt!(f, TableAlias(table) ".");
                }
                fmt!(f, Ident(&expr.name));
            }
            Func(func) => func.to_sql(f),
            // An empty list matches nothing
            InList(expr) if expr.list.is_empty() => {
                fmt!(f, "1 = 0");
            }
            InList(expr) => {
                let lhs = &*expr.expr;
                let list = Comma(&expr.list);

                fmt!(f, lhs " IN (" list ")");
            }
            Like(expr) => {
                let lhs = &*expr.expr;
                let pattern = stmt::Value::from(expr.pattern.as_str());
                let pattern = &pattern;

                fmt!(f, lhs " LIKE " pattern);
            }
            Literal(text) => {
                fmt!(f, Quoted(text));
            }
            Value(value) => value.to_sql(f),
        }
    }
}

impl ToSql for &ExprFunc {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let ExprFunc::DateOffset(offset) = self else {
            return match f.serializer.flavor {
                Flavor::Mysql | Flavor::Postgresql => fmt!(f, "NOW()"),
                Flavor::Sqlite => fmt!(f, "datetime('now')"),
            };
        };

        let amount = offset.amount.unsigned_abs();
        let unit = offset.unit.as_str();
        let subtract = offset.amount < 0;

        match f.serializer.flavor {
            Flavor::Mysql => {
                let func = if subtract { "DATE_SUB" } else { "DATE_ADD" };
                fmt!(f, func "(NOW(), INTERVAL " amount " " unit ")");
            }
            Flavor::Postgresql => {
                let op = if subtract { " - " } else { " + " };
                fmt!(f, "NOW()" op "INTERVAL '" amount " " unit "'");
            }
            Flavor::Sqlite => {
                // SQLite has no week modifier
                let (amount, unit) = match offset.unit {
                    IntervalUnit::Week => (amount * 7, "days"),
                    IntervalUnit::Day => (amount, "days"),
                    IntervalUnit::Month => (amount, "months"),
                    IntervalUnit::Year => (amount, "years"),
                };
                let sign = if subtract { "-" } else { "+" };
                fmt!(f, "datetime('now', '" sign amount " " unit "')");
            }
        }
    }
}
