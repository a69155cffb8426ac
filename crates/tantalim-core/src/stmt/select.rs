use super::{Filter, Returning, SourceTable};

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub returning: Returning,
    pub source: SourceTable,
    pub filter: Filter,
}
