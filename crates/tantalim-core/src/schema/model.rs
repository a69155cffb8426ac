use super::{ColumnDefault, DataType};
use crate::stmt::{Direction, Expr};

/// A compiled model: every table, join, and column reference is resolved.
///
/// Only the compiler builds these. Once built a model is immutable and is
/// shared by the reader and the saver.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,

    pub basis_table: TableRef,

    /// Joins, in declaration order. `steps[i].index == i + 1`.
    pub steps: Vec<Step>,

    pub fields: Vec<Field>,

    /// Index into `fields` of the field bound to the basis table's primary
    /// key, if any.
    pub instance_key: Option<usize>,

    pub order_by: Vec<OrderBy>,

    /// Static filter, already bound to columns.
    pub filter: Option<Expr>,

    pub limit: Option<u64>,

    pub children: Vec<Model>,

    /// Set on child models only.
    pub parent_link: Option<ParentLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub storage_name: String,
}

/// One join hop.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub name: String,

    /// Alias index of the joined table; the basis table is `0`.
    pub index: usize,

    pub required: bool,

    pub join: ResolvedJoin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedJoin {
    pub name: String,
    pub table: TableRef,
    pub columns: Vec<JoinColumn>,
}

/// `t<step>.<to> = <from>`
#[derive(Debug, Clone, PartialEq)]
pub struct JoinColumn {
    pub from: JoinSource,

    /// Storage name of the column on the joined table
    pub to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinSource {
    /// Column on the source step's table
    Column { step: usize, storage_name: String },

    /// Constant text
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,

    /// `None` when the field declares no basis column. Such fields are
    /// carried in row data but never read or written.
    pub column: Option<ResolvedColumn>,

    /// Alias index of the table the column lives on.
    pub step: usize,

    pub updateable: bool,

    pub required: bool,

    pub column_default: Option<ColumnDefault>,

    pub data_type: Option<DataType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub name: String,
    pub storage_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Correlates child rows to parent rows:
/// `parent.data[parent_field] == child.data[child_field]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLink {
    pub parent_field: String,
    pub child_field: String,
}

impl Model {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn instance_key(&self) -> Option<&Field> {
        self.instance_key.map(|index| &self.fields[index])
    }

    pub fn child(&self, name: &str) -> Option<&Model> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Fields whose values are collapsed to strict booleans on read.
    pub fn boolean_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| field.is_boolean())
    }
}

impl Field {
    pub fn is_boolean(&self) -> bool {
        self.data_type == Some(DataType::Boolean)
    }

    /// Fields on joined tables are read-only.
    pub fn is_on_basis_table(&self) -> bool {
        self.step == 0
    }

    /// Storage name of the bound column.
    pub fn storage_name(&self) -> Option<&str> {
        self.column.as_ref().map(|column| column.storage_name.as_str())
    }

    /// `t<step>.<column>`, when the field is bound to a column.
    pub fn column_expr(&self) -> Option<Expr> {
        self.column
            .as_ref()
            .map(|column| Expr::column(self.step, column.storage_name.clone()))
    }
}
