use crate::{err, row::Record, Result};

#[derive(Debug, Clone)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone)]
pub enum Rows {
    /// Number of rows impacted by an `UPDATE` or `DELETE`
    Count(u64),

    /// Result of an `INSERT`
    Inserted {
        count: u64,

        /// Auto-increment key assigned by the database. `None` when the table
        /// has no auto-increment column.
        last_insert_id: Option<u64>,
    },

    /// Rows returned by a query, keyed by select alias
    Values(Vec<Record>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    /// A zero `last_insert_id` means none was assigned.
    pub fn inserted(count: u64, last_insert_id: u64) -> Self {
        Self {
            rows: Rows::Inserted {
                count,
                last_insert_id: (last_insert_id > 0).then_some(last_insert_id),
            },
        }
    }

    pub fn values(records: Vec<Record>) -> Self {
        Self {
            rows: Rows::Values(records),
        }
    }

    pub fn empty_values() -> Self {
        Self::values(vec![])
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    /// Rows affected by the statement.
    pub fn into_count(self) -> Result<u64> {
        match self {
            Self::Count(count) | Self::Inserted { count, .. } => Ok(count),
            Self::Values(records) => Err(err!(
                "expected a row count, driver returned {} records",
                records.len()
            )),
        }
    }

    pub fn into_values(self) -> Result<Vec<Record>> {
        match self {
            Self::Values(records) => Ok(records),
            other => Err(err!("expected records, driver returned {other:?}")),
        }
    }

    pub fn last_insert_id(&self) -> Option<u64> {
        match *self {
            Self::Inserted { last_insert_id, .. } => last_insert_id,
            _ => None,
        }
    }
}
