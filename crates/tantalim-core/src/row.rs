use crate::stmt::Value;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column values of one row, keyed by field name.
pub type Record = IndexMap<String, Value>;

/// A node in a row tree, as returned by the reader and accepted by the saver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub data: Record,

    /// Value of the model's instance key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Value of the parent link's child field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<Value>,

    /// Pending mutation. Cleared once the saver applies it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<RowState>,

    /// Client-assigned identifier for rows that have no key yet
    #[serde(rename = "tempID", default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<Value>,

    /// Child rows, keyed by child model name
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<String, Vec<Row>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RowState {
    Inserted,
    Updated,
    Deleted,
}

impl Row {
    pub fn new(data: Record) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn with_state(mut self, state: RowState) -> Self {
        self.state = Some(state);
        self
    }

    /// Value of `field`, treating an absent entry as null.
    pub fn get(&self, field: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.data.get(field).unwrap_or(&NULL)
    }

    /// `id`, falling back to `tempID`. Used to identify rows in logs.
    pub fn label(&self) -> String {
        match (&self.id, &self.temp_id) {
            (Some(id), _) => format!("id={id}"),
            (None, Some(temp_id)) => format!("tempID={temp_id}"),
            (None, None) => "<new>".to_string(),
        }
    }
}

impl RowState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inserted => "INSERTED",
            Self::Updated => "UPDATED",
            Self::Deleted => "DELETED",
        }
    }
}
