use super::{ColumnDefault, DataType};
use crate::stmt::Direction;

use serde::{Deserialize, Serialize};

/// A model as written in a JSON artifact, before any name is resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDef {
    /// Defaults to the basis table name when absent.
    #[serde(default)]
    pub name: Option<String>,

    /// Logical name of the table the model selects from.
    #[serde(default)]
    pub basis_table: Option<String>,

    #[serde(default)]
    pub steps: Vec<StepDef>,

    #[serde(default)]
    pub fields: Vec<FieldDef>,

    #[serde(default)]
    pub order_by: Vec<OrderByDef>,

    /// Static filter, in the same grammar as caller-supplied filters.
    #[serde(default)]
    pub filter: Option<String>,

    #[serde(default)]
    pub limit: Option<u64>,

    #[serde(default)]
    pub children: Vec<ModelDef>,

    #[serde(default)]
    pub parent_link: Option<ParentLinkDef>,

    /// Older spelling of `parent_link`.
    #[serde(default)]
    pub foreign_keys: Vec<ParentLinkDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDef {
    pub name: String,

    /// Name of a join declared on the source table.
    #[serde(default)]
    pub join: Option<String>,

    /// `INNER` join when set, `LEFT` join otherwise.
    #[serde(default)]
    pub required: bool,

    /// Step whose table this step joins from. Defaults to the basis table.
    #[serde(default)]
    pub previous_step: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,

    /// Logical column name on the basis table, or on `step`'s table.
    #[serde(default)]
    pub basis_column: Option<String>,

    #[serde(default)]
    pub step: Option<String>,

    #[serde(default = "default_true")]
    pub updateable: bool,

    #[serde(default)]
    pub required: bool,

    /// Overrides the column's default policy.
    #[serde(default)]
    pub column_default: Option<ColumnDefault>,

    /// Overrides the column's data type.
    #[serde(default)]
    pub data_type: Option<DataType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderByDef {
    pub field_name: String,

    #[serde(default)]
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentLinkDef {
    pub parent_field: String,
    pub child_field: String,
}

fn default_true() -> bool {
    true
}

impl ModelDef {
    /// Name the model is reported under before it is compiled.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.basis_table.as_deref())
            .unwrap_or("<unnamed>")
    }
}
