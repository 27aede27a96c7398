//! The query front-end: a hand-rolled tokenizer and a single-pass parser that
//! turn one line of SQL-flavored input into a [`Query`].

pub mod parser;
pub mod token;

pub use parser::{FilterClause, ParseError, Parser, Query};
pub use token::{Token, Tokenizer};
