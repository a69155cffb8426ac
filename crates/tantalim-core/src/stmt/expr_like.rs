use super::Expr;

/// `expr LIKE pattern`. The pattern already carries its `%` wildcards.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprLike {
    pub expr: Box<Expr>,
    pub pattern: String,
}

impl Expr {
    pub fn like(expr: impl Into<Self>, pattern: impl Into<String>) -> Self {
        ExprLike {
            expr: Box::new(expr.into()),
            pattern: pattern.into(),
        }
        .into()
    }

    pub fn begins_with(expr: impl Into<Self>, prefix: &str) -> Self {
        Expr::like(expr, format!("{prefix}%"))
    }

    pub fn ends_with(expr: impl Into<Self>, suffix: &str) -> Self {
        Expr::like(expr, format!("%{suffix}"))
    }

    pub fn contains(expr: impl Into<Self>, needle: &str) -> Self {
        Expr::like(expr, format!("%{needle}%"))
    }
}

impl From<ExprLike> for Expr {
    fn from(value: ExprLike) -> Self {
        Self::Like(value)
    }
}
