use super::*;

/// A SQL expression.
///
/// Only the expression forms the query builder and filter grammar produce are
/// represented: conjunctions, binary comparisons, column references, `IN`
/// lists, `LIKE` patterns, date functions, and values.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND a set of predicates
    And(ExprAnd),

    /// Binary comparison
    BinaryOp(ExprBinaryOp),

    /// Reference to a column, optionally qualified by a table alias
    Column(ExprColumn),

    /// Database function call
    Func(ExprFunc),

    /// `expr IN (list)`
    InList(ExprInList),

    /// `expr LIKE pattern`
    Like(ExprLike),

    /// Text literal rendered inline and single-quoted, never bound as a
    /// parameter. Used for constant-valued join columns.
    Literal(String),

    /// A value, bound as a parameter when serialized
    Value(Value),
}

impl Expr {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<u64> for Expr {
    fn from(value: u64) -> Self {
        Self::Value(value.into())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}
