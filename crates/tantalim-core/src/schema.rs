//! Table metadata, raw model definitions, and compiled models.
//!
//! Definitions ([`ModelDef`] and friends) are what callers deserialize from
//! JSON artifacts. The compiler turns them into a [`Model`], binding every
//! name to concrete table metadata.

mod def;
pub use def::{FieldDef, ModelDef, OrderByDef, ParentLinkDef, StepDef};

mod model;
pub use model::{
    Field, JoinColumn, JoinSource, Model, OrderBy, ParentLink, ResolvedColumn, ResolvedJoin, Step,
    TableRef,
};

mod name;
pub use name::{validate_code_name, ModelName};

mod table;
pub use table::{Column, ColumnDefault, DataType, Join, JoinColumnDef, Table};
