//! Parser for the filter grammar accepted by the reader.
//!
//! ```text
//! filter := clause ((AND | OR) clause)*
//! clause := <field> <op> <value>
//! op     := = | IN | Contains | BeginsWith | EndsWith | > | < | Before | After
//! ```
//!
//! Operators and connectives are case-insensitive. `OR` currently joins its
//! clauses the same way `AND` does: every clause becomes one more predicate
//! in the conjunction.
//!
//! `Before`/`After` take `NOW` or a signed offset from now such as `-7D`,
//! `2 weeks`, or `1Y`.

use crate::stmt::{Expr, IntervalUnit};

use regex::Regex;
use std::sync::LazyLock;
use tantalim_core::{schema::Field, Error, Result};

static CONNECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s+(?:AND|OR)\s+(.+)$").expect("connective pattern")
});

static CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\S+)\s+(=|IN|CONTAINS|BEGINSWITH|ENDSWITH|>|<|BEFORE|AFTER)\s+(.+?)\s*$")
        .expect("clause pattern")
});

static OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?)(\d+)\s*([A-Za-z]+)$").expect("offset pattern"));

/// Parses `text` into a single predicate over `fields`.
///
/// Returns `None` for a blank filter.
pub fn parse(text: &str, fields: &[Field]) -> Result<Option<Expr>> {
    let mut predicates = vec![];
    let mut rest = text.trim();

    if rest.is_empty() {
        return Ok(None);
    }

    while let Some(captures) = CONNECTIVE.captures(rest) {
        let (_, [lhs, tail]) = captures.extract();
        predicates.push(parse_clause(lhs, fields)?);
        rest = tail;
    }
    predicates.push(parse_clause(rest, fields)?);

    tracing::trace!(filter = text, predicates = predicates.len(), "parsed filter");

    Ok(Expr::and_from_vec(predicates))
}

fn parse_clause(clause: &str, fields: &[Field]) -> Result<Expr> {
    let Some(captures) = CLAUSE.captures(clause) else {
        return Err(Error::invalid_filter(format!(
            "could not parse clause `{}`",
            clause.trim()
        )));
    };
    let (_, [name, op, value]) = captures.extract();

    let column = fields
        .iter()
        .find(|field| field.name == name)
        .and_then(|field| field.column_expr())
        .ok_or_else(|| Error::invalid_filter(format!("unknown field `{name}`")))?;

    Ok(match op.to_ascii_uppercase().as_str() {
        "=" => Expr::eq(column, value),
        "IN" => Expr::in_list(column, value.split(',').map(str::trim)),
        "CONTAINS" => Expr::contains(column, value),
        "BEGINSWITH" => Expr::begins_with(column, value),
        "ENDSWITH" => Expr::ends_with(column, value),
        "BEFORE" => Expr::lt(column, parse_date(value)?),
        "AFTER" => Expr::gt(column, parse_date(value)?),
        "<" => Expr::lt(column, value),
        _ => Expr::gt(column, value),
    })
}

fn parse_date(value: &str) -> Result<Expr> {
    if value.eq_ignore_ascii_case("NOW") {
        return Ok(Expr::now());
    }

    let Some(captures) = OFFSET.captures(value) else {
        return Err(Error::invalid_filter(format!(
            "expected NOW or an offset like `-7D`, found `{value}`"
        )));
    };
    let (_, [sign, amount, unit]) = captures.extract();

    let amount: i64 = amount
        .parse()
        .map_err(|_| Error::invalid_filter(format!("offset `{value}` is too large")))?;

    let unit = match unit.to_ascii_uppercase().as_str() {
        "D" | "DAY" | "DAYS" => IntervalUnit::Day,
        "W" | "WEEK" | "WEEKS" => IntervalUnit::Week,
        "M" | "MONTH" | "MONTHS" => IntervalUnit::Month,
        "Y" | "YR" | "YEAR" | "YEARS" => IntervalUnit::Year,
        _ => {
            return Err(Error::invalid_filter(format!(
                "unknown interval unit `{unit}`"
            )))
        }
    };

    let amount = if sign == "-" { -amount } else { amount };
    Ok(Expr::date_offset(amount, unit))
}
