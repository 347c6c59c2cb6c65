//! Parser for the values found in a .tfvars file.
//!
//! The value language is a superset of plain literals (strings, numbers,
//! booleans, lists and maps) extended with function calls interpolated into
//! strings, such as `"${find_in_parent_folders()}"`. Interpolations nest, and
//! can be escaped by doubling the dollar sign: `"$${not_a_call()}"`.
//!
//! Parsing produces a typed abstract syntax tree which can be resolved by a
//! runtime, printed back as canonical source, etc.

pub mod ast;
pub mod error;
mod grammar;
mod parser;
pub mod raw;
pub mod source;
mod wrap;

pub use error::{Error, ErrorList, ParseError};
pub use parser::{parse, parse_raw, parse_value};
pub use wrap::wrap;
