pub mod ast_printer;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod token;
pub mod value;

pub use error::{Result, SubjsError};
pub use parser::parse;
pub use value::{AddExpr, CallExpr, Ident, MethodCallExpr, Value};
