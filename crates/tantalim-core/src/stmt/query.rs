use super::{Limit, OrderBy, Select, Statement};

/// A `SELECT` with its ordering and pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub body: Select,
    pub order_by: Option<OrderBy>,
    pub limit: Option<Limit>,
}

impl Query {
    pub fn new(body: Select) -> Self {
        Self {
            body,
            order_by: None,
            limit: None,
        }
    }
}

impl From<Query> for Statement {
    fn from(src: Query) -> Self {
        Self::Query(src)
    }
}
