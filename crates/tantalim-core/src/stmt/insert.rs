use super::{Expr, Statement};

/// `INSERT INTO <table> (<columns>) VALUES (<values>)`
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Storage name of the target table
    pub table: String,

    /// Storage names of the written columns
    pub columns: Vec<String>,

    /// One expression per column, in the same order
    pub values: Vec<Expr>,
}

impl From<Insert> for Statement {
    fn from(src: Insert) -> Self {
        Self::Insert(src)
    }
}
