use crate::stmt;

/// A statement for the driver to serialize and execute.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySql {
    pub stmt: stmt::Statement,
}

impl QuerySql {
    pub fn new(stmt: impl Into<stmt::Statement>) -> Self {
        Self { stmt: stmt.into() }
    }
}
