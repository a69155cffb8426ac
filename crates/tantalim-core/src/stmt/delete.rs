use super::{Filter, Statement};

/// `DELETE FROM <table> WHERE ...`
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Storage name of the table rows are deleted from.
    pub from: String,

    pub filter: Filter,
}

impl From<Delete> for Statement {
    fn from(src: Delete) -> Self {
        Self::Delete(src)
    }
}
