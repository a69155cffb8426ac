pub mod driver;
pub use driver::Driver;

mod error;
pub use error::{Error, IntoError};

pub mod row;
pub use row::{Record, Row, RowState};

pub mod schema;

pub mod stmt;

/// A Result type alias that uses Tantalim's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
