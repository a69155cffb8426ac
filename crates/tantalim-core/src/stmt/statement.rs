use super::{Delete, Insert, Query, Update};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Delete(Delete),
    Insert(Insert),
    Query(Query),
    Update(Update),
}

impl Statement {
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete(_))
    }

    /// Storage name of the table the statement reads from or writes to.
    pub fn table(&self) -> &str {
        match self {
            Self::Delete(stmt) => &stmt.from,
            Self::Insert(stmt) => &stmt.table,
            Self::Query(stmt) => &stmt.body.source.table,
            Self::Update(stmt) => &stmt.table,
        }
    }
}
