use super::{Comma, Ident, Params, TableAlias, ToSql};

use crate::stmt;

impl ToSql for &stmt::Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Query(stmt) => stmt.to_sql(f),
            stmt::Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let filter = &self.filter;

        fmt!(f, "DELETE FROM " Ident(&self.from) filter);
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let columns = Comma(self.columns.iter().map(Ident));
        let values = Comma(&self.values);

        fmt!(f, "INSERT INTO " Ident(&self.table) " (" columns ") VALUES (" values ")");
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let assignments = Comma(&self.assignments);
        let filter = &self.filter;

        fmt!(f, "UPDATE " Ident(&self.table) " SET " assignments filter);
    }
}

impl ToSql for &stmt::Assignment {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let expr = &self.expr;

        fmt!(f, Ident(&self.column) " = " expr);
    }
}

impl ToSql for &stmt::Query {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let body = &self.body;

        fmt!(f, body self.order_by.as_ref() self.limit.as_ref());
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let returning = &self.returning;
        let source = &self.source;
        let filter = &self.filter;

        fmt!(f, "SELECT " returning " FROM " source filter);
    }
}

impl ToSql for &stmt::Returning {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::Returning::Star => fmt!(f, "*"),
            stmt::Returning::Items(items) => fmt!(f, Comma(items)),
        }
    }
}

impl ToSql for &stmt::SelectItem {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, &self.expr " AS " Ident(&self.alias));
    }
}

impl ToSql for &stmt::SourceTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, Ident(&self.table) " AS " TableAlias(0));

        for join in &self.joins {
            fmt!(f, " " join);
        }
    }
}

impl ToSql for &stmt::Join {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let kind = match self.kind {
            stmt::JoinKind::Inner => "INNER JOIN ",
            stmt::JoinKind::Left => "LEFT JOIN ",
        };

        let on = &self.on;

        fmt!(f, kind Ident(&self.table) " AS " TableAlias(self.alias) " ON " on);
    }
}

/// Renders ` WHERE <expr>`, or nothing for an empty filter.
impl ToSql for &stmt::Filter {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        if let Some(expr) = &self.expr {
            fmt!(f, " WHERE " expr);
        }
    }
}

impl ToSql for &stmt::OrderBy {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        if !self.exprs.is_empty() {
            fmt!(f, " ORDER BY " Comma(&self.exprs));
        }
    }
}

impl ToSql for &stmt::OrderByExpr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, &self.expr);

        if let Some(order) = self.order {
            if order.is_desc() {
                fmt!(f, " DESC");
            } else {
                fmt!(f, " ASC");
            }
        }
    }
}

impl ToSql for &stmt::Limit {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, " LIMIT " self.limit);

        if let Some(offset) = self.offset {
            fmt!(f, " OFFSET " offset);
        }
    }
}
