use super::Expr;

/// The projection of a `SELECT`.
#[derive(Debug, Clone, PartialEq)]
pub enum Returning {
    /// `SELECT *`
    Star,

    /// `SELECT expr AS alias, ...`
    Items(Vec<SelectItem>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: String,
}

impl Returning {
    /// Column aliases in projection order. Empty for `*`.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        let items: &[SelectItem] = match self {
            Self::Star => &[],
            Self::Items(items) => items,
        };
        items.iter().map(|item| item.alias.as_str())
    }
}
