mod delete;
pub use delete::Delete;

mod direction;
pub use direction::Direction;

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_func;
pub use expr_func::{ExprFunc, FuncDateOffset, IntervalUnit};

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_like;
pub use expr_like::ExprLike;

mod filter;
pub use filter::Filter;

mod insert;
pub use insert::Insert;

mod join;
pub use join::{Join, JoinKind};

mod limit;
pub use limit::Limit;

mod op_binary;
pub use op_binary::BinaryOp;

mod order_by;
pub use order_by::{OrderBy, OrderByExpr};

mod query;
pub use query::Query;

mod returning;
pub use returning::{Returning, SelectItem};

mod select;
pub use select::Select;

mod source_table;
pub use source_table::SourceTable;

mod statement;
pub use statement::Statement;

mod update;
pub use update::{Assignment, Update};

mod value;
pub use value::Value;

mod value_key;
pub use value_key::ValueKey;
