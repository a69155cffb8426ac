use super::Expr;

/// A column reference.
///
/// In a `SELECT`, `table` is the alias index: `Some(0)` renders as `t0`, the
/// basis table, and `Some(n)` as the table joined by step `n`. Single-table
/// statements (`UPDATE`, `DELETE`) leave it unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprColumn {
    pub table: Option<usize>,

    /// Storage name of the column
    pub name: String,
}

impl Expr {
    /// A column qualified by the alias of step `table`.
    pub fn column(table: usize, name: impl Into<String>) -> Self {
        ExprColumn {
            table: Some(table),
            name: name.into(),
        }
        .into()
    }

    /// A column of the statement's only table.
    pub fn bare_column(name: impl Into<String>) -> Self {
        ExprColumn {
            table: None,
            name: name.into(),
        }
        .into()
    }

    pub fn as_column(&self) -> Option<&ExprColumn> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}
