use super::Expr;

/// The `WHERE` clause of a statement.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Filter {
    pub expr: Option<Expr>,
}

impl Filter {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            expr: Some(expr.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expr.is_none()
    }

    /// ANDs `expr` into the filter.
    pub fn add(&mut self, expr: impl Into<Expr>) {
        let expr = expr.into();
        self.expr = Some(match self.expr.take() {
            Some(existing) => Expr::and(existing, expr),
            None => expr,
        });
    }
}

impl From<Option<Expr>> for Filter {
    fn from(expr: Option<Expr>) -> Self {
        Self { expr }
    }
}
