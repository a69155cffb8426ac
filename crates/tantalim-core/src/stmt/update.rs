use super::{Expr, Filter, Statement};

/// `UPDATE <table> SET <assignments> WHERE ...`
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Storage name of the updated table
    pub table: String,

    pub assignments: Vec<Assignment>,

    pub filter: Filter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Storage name of the assigned column
    pub column: String,

    pub expr: Expr,
}

impl From<Update> for Statement {
    fn from(src: Update) -> Self {
        Self::Update(src)
    }
}
