use mysql_async::prelude::ToValue;
use tantalim_core::stmt::Value as CoreValue;

/// Bridges tantalim values to and from `mysql_async` values.
#[derive(Debug)]
pub struct Value(CoreValue);

impl Value {
    pub fn into_inner(self) -> CoreValue {
        self.0
    }
}

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl ToValue for Value {
    fn to_value(&self) -> mysql_async::Value {
        match &self.0 {
            CoreValue::Null => mysql_async::Value::NULL,
            CoreValue::Bool(value) => value.to_value(),
            CoreValue::I64(value) => value.to_value(),
            CoreValue::U64(value) => value.to_value(),
            CoreValue::F64(value) => value.to_value(),
            CoreValue::String(value) => value.to_value(),
            // Lists are expanded into one placeholder per item by the
            // serializer, so one never reaches a single parameter.
            value @ CoreValue::List(_) => value.to_string().to_value(),
        }
    }
}

impl From<mysql_async::Value> for Value {
    fn from(value: mysql_async::Value) -> Self {
        use mysql_async::Value::*;

        Self(match value {
            NULL => CoreValue::Null,
            Bytes(bytes) => CoreValue::String(String::from_utf8_lossy(&bytes).into_owned()),
            Int(value) => CoreValue::I64(value),
            UInt(value) => CoreValue::U64(value),
            Float(value) => CoreValue::F64(value.into()),
            Double(value) => CoreValue::F64(value),
            Date(year, month, day, 0, 0, 0, 0) => {
                CoreValue::String(format!("{year:04}-{month:02}-{day:02}"))
            }
            Date(year, month, day, hour, minute, second, _) => CoreValue::String(format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            )),
            Time(negative, days, hours, minutes, seconds, _) => {
                let sign = if negative { "-" } else { "" };
                let hours = u32::from(hours) + days * 24;
                CoreValue::String(format!("{sign}{hours:02}:{minutes:02}:{seconds:02}"))
            }
        })
    }
}
