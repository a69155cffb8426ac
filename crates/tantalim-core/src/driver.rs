mod operation;
pub use operation::QuerySql;

mod response;
pub use response::{Response, Rows};

use crate::async_trait;

use std::fmt::Debug;

/// Executes statements against a database.
///
/// Drivers take `&self` so the reader and saver can issue sibling statements
/// concurrently; pooling is the driver's concern.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute a single statement
    async fn exec(&self, op: QuerySql) -> crate::Result<Response>;
}
