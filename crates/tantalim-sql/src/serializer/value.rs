use super::{Comma, Formatter, Params, ToSql};

use tantalim_core::stmt;

/// A single-quoted string literal.
pub(super) struct Quoted<'a>(pub(super) &'a str);

impl ToSql for Quoted<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push('\'');
        for c in self.0.chars() {
            if c == '\'' {
                f.dst.push('\'');
            }
            f.dst.push(c);
        }
        f.dst.push('\'');
    }
}

impl ToSql for &stmt::Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use stmt::Value::*;

        match self {
            List(values) => {
                let values = Comma(values);
                fmt!(f, "(" values ")");
            }
            value if !f.serializer.inline => {
                let placeholder = f.params.push(value);
                fmt!(f, placeholder)
            }
            Null => fmt!(f, "NULL"),
            Bool(true) => fmt!(f, "TRUE"),
            Bool(false) => fmt!(f, "FALSE"),
            I64(v) => fmt!(f, *v),
            U64(v) => fmt!(f, *v),
            F64(v) => f.dst.push_str(&v.to_string()),
            String(v) => fmt!(f, Quoted(v)),
        }
    }
}
