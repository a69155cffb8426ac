use super::Value;

/// A hashable, representation-independent identity for a [`Value`].
///
/// Integers compare equal regardless of signedness, and floats with no
/// fractional part compare equal to the matching integer. Used to correlate
/// parent keys with child foreign keys read back from the driver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Bool(bool),
    Int(i128),
    Float(u64),
    String(String),
    List(Vec<ValueKey>),
}

impl ValueKey {
    pub(super) fn from_value(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Null => return None,
            Value::Bool(v) => Self::Bool(*v),
            Value::I64(v) => Self::Int((*v).into()),
            Value::U64(v) => Self::Int((*v).into()),
            Value::F64(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => Self::Int(*v as i128),
            Value::F64(v) => Self::Float(v.to_bits()),
            Value::String(v) => Self::String(v.clone()),
            Value::List(items) => Self::List(items.iter().filter_map(Self::from_value).collect()),
        })
    }
}
