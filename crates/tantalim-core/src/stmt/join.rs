use super::Expr;

/// A joined table inside a [`SourceTable`](super::SourceTable).
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,

    /// Storage name of the joined table
    pub table: String,

    /// Alias index; the table renders as `t<alias>`
    pub alias: usize,

    pub on: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}
