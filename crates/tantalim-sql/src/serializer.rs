#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::{Ident, TableAlias};

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod expr;
mod statement;
mod value;

use crate::stmt::Statement;

/// Serialize a statement to a SQL string
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,

    /// Render values as SQL literals instead of binding them as parameters.
    inline: bool,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    /// Serializes `stmt`, pushing every bound value onto `params` in
    /// placeholder order.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);
        ret
    }

    /// Serializes `stmt` with every value rendered inline as a literal.
    ///
    /// The output is meant for logs and assertions. Execute statements with
    /// [`Serializer::serialize`].
    pub fn serialize_inline(&self, stmt: &Statement) -> String {
        let inline = Serializer {
            inline: true,
            ..*self
        };
        let mut params: Vec<crate::stmt::Value> = Vec::new();
        inline.serialize(stmt, &mut params)
    }
}
