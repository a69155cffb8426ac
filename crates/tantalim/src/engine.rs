//! Runtime engines over compiled models.
//!
//! Both engines issue one statement at a time through the [`Driver`]. Sibling
//! work fans out with `futures` combinators; a row and its children are always
//! processed in order because children depend on the parent's key.
//!
//! [`Driver`]: tantalim_core::Driver

mod read;
pub(crate) use read::read;

mod save;
pub(crate) use save::save;
