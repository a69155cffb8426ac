use super::Join;

/// `FROM <table> AS t0 [JOIN ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable {
    /// Storage name of the basis table, always aliased `t0`
    pub table: String,

    pub joins: Vec<Join>,
}
