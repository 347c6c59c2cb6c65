//! The untyped parse tree produced by the grammar.
//!
//! Nodes here carry no semantic typing; [`crate::wrap`] validates their shape
//! and turns them into a typed [`crate::ast::Value`].

use crate::source::Span;

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Int(i64),
    Float(f64),
    Bool(bool),

    /// A run of literal characters. Quoted strings are split into several of
    /// these around escape sequences.
    Chars(String),

    /// The fragments of a quoted string, in order.
    Quoted(Vec<Node>),

    Array(Vec<Node>),

    /// The items of a map literal. Each should be a [`Node::Pair`].
    Map(Vec<Node>),

    Pair(Box<Node>, Box<Node>),

    /// A function call inside an interpolation. `args` should be a
    /// [`Node::List`].
    Call {
        name: String,
        args: Box<Node>,
    },

    /// A plain sequence of nodes.
    List(Vec<Node>),

    /// Text following a `${` that is not a function call.
    Invalid {
        text: String,
        span: Span,
    },
}

impl Node {
    /// Get the name of the shape of this node, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Int(_) => "int",
            Node::Float(_) => "float",
            Node::Bool(_) => "bool",
            Node::Chars(_) => "chars",
            Node::Quoted(_) => "quoted",
            Node::Array(_) => "array",
            Node::Map(_) => "map",
            Node::Pair(..) => "pair",
            Node::Call { .. } => "call",
            Node::List(_) => "list",
            Node::Invalid { .. } => "invalid interpolation",
        }
    }
}
