use super::Expr;

/// Database-side functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprFunc {
    /// The current timestamp, `NOW()`
    Now,

    /// The current timestamp shifted by a signed interval
    DateOffset(FuncDateOffset),
}

/// `NOW()` plus `amount` units. A negative amount subtracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncDateOffset {
    pub amount: i64,
    pub unit: IntervalUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Day,
    Week,
    Month,
    Year,
}

impl IntervalUnit {
    /// SQL keyword for the unit, as used by `INTERVAL n <UNIT>`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
            Self::Year => "YEAR",
        }
    }
}

impl Expr {
    pub fn now() -> Self {
        Self::Func(ExprFunc::Now)
    }

    pub fn date_offset(amount: i64, unit: IntervalUnit) -> Self {
        Self::Func(ExprFunc::DateOffset(FuncDateOffset { amount, unit }))
    }
}

impl From<ExprFunc> for Expr {
    fn from(value: ExprFunc) -> Self {
        Self::Func(value)
    }
}
