use serde::{Deserialize, Serialize};

/// Metadata describing a database table, as supplied by a table provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Logical name models refer to
    pub name: String,

    /// Name of the table in the database
    #[serde(alias = "dbName")]
    pub storage_name: String,

    #[serde(default)]
    pub columns: Vec<Column>,

    /// Logical name of the primary key column
    #[serde(default, alias = "primaryIndex")]
    pub primary_key: Option<String>,

    #[serde(default)]
    pub joins: Vec<Join>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,

    /// Name of the column in the database
    #[serde(alias = "dbName", alias = "colSql")]
    pub storage_name: String,

    /// Value policy applied by the saver when the row does not supply one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_default: Option<ColumnDefault>,

    /// Deprecated spelling of `column_default` found in older artifacts.
    #[serde(default, rename = "default", skip_serializing)]
    pub legacy_default: Option<ColumnDefault>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
}

impl Column {
    /// The column default, falling back to the deprecated `default` key.
    pub fn effective_default(&self) -> Option<&ColumnDefault> {
        self.column_default
            .as_ref()
            .or(self.legacy_default.as_ref())
    }
}

/// A named join from one table to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Join {
    pub name: String,

    /// Logical name of the target table
    pub table: String,

    #[serde(default)]
    pub columns: Vec<JoinColumnDef>,
}

/// One `ON` term of a join. Either `from` names a source column or
/// `fromText` supplies a constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinColumnDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_text: Option<String>,

    /// Logical name of the target table column
    pub to: String,
}

/// Hard default policies understood by the saver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnDefault {
    /// Copy the row's `tempID` into the column on insert
    Guid,

    /// Current timestamp on insert
    CreatedDate,

    /// Current timestamp on insert and update
    UpdatedDate,

    /// Any other policy; carried but not applied
    Other(String),
}

impl ColumnDefault {
    pub fn applies_on_insert(&self) -> bool {
        matches!(self, Self::Guid | Self::CreatedDate | Self::UpdatedDate)
    }

    pub fn applies_on_update(&self) -> bool {
        matches!(self, Self::UpdatedDate)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Guid => "GUID",
            Self::CreatedDate => "CreatedDate",
            Self::UpdatedDate => "UpdatedDate",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for ColumnDefault {
    fn from(src: String) -> Self {
        match src.as_str() {
            "GUID" | "Guid" | "guid" => Self::Guid,
            "CreatedDate" => Self::CreatedDate,
            "UpdatedDate" => Self::UpdatedDate,
            _ => Self::Other(src),
        }
    }
}

impl From<ColumnDefault> for String {
    fn from(src: ColumnDefault) -> Self {
        src.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    String,
    Integer,
    Decimal,
    Boolean,
    Date,
    DateTime,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn join(&self, name: &str) -> Option<&Join> {
        self.joins.iter().find(|join| join.name == name)
    }

    pub fn primary_key_column(&self) -> Option<&Column> {
        self.primary_key
            .as_deref()
            .and_then(|name| self.column(name))
    }
}
