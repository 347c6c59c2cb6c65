//! Resolution of parsed tfvars values.
//!
//! A parsed [`syntax::ast::Value`] is resolved into a native [`Value`] by
//! walking the tree and dispatching every interpolation to a
//! [`FunctionRegistry`] along with an execution context. The runtime itself
//! knows nothing about which functions exist or what the context holds.

mod macros;

pub mod args;
mod eval;
mod exceptions;
mod foreign;
mod registry;
pub mod table;
pub mod value;

// Re-export syntax crate.
pub mod syntax {
    pub use tfvars_syntax::*;
}

pub mod prelude {
    pub use crate::exceptions::Exception;
    pub use crate::registry::{FunctionRegistry, Functions};
    pub use crate::table::Table;
    pub use crate::value::Value;
}

pub use crate::{
    eval::{eval, resolve, Error, Resolver},
    exceptions::Exception,
    foreign::ForeignFn,
    registry::{FunctionRegistry, Functions},
    table::Table,
    value::Value,
};
