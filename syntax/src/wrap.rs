//! Normalizes the raw parse tree into the typed AST.

use crate::{
    ast::*,
    error::{Error, INTERPOLATION_SYNTAX},
    raw::Node,
};

/// Classify a raw node into a typed value.
pub fn wrap(node: Node) -> Result<Value, Error> {
    match node {
        Node::Int(v) => Ok(Value::Int(v)),
        Node::Float(v) => Ok(Value::Float(v)),
        Node::Bool(v) => Ok(Value::Bool(v)),
        Node::Quoted(fragments) => wrap_string(fragments).map(Value::String),

        // A bare identifier, used as a map key.
        Node::Chars(chars) => wrap_string(vec![Node::Chars(chars)]).map(Value::String),

        Node::Array(items) => items.into_iter()
            .map(wrap)
            .collect::<Result<_, _>>()
            .map(Value::Array),

        Node::Map(items) => items.into_iter()
            .map(wrap_pair)
            .collect::<Result<_, _>>()
            .map(Value::Map),

        node => Err(unexpected("int, float, bool, quoted, chars, array or map", &node)),
    }
}

/// Turn the fragments of a quoted string into a string, merging consecutive
/// runs of characters into a single fragment.
fn wrap_string(fragments: Vec<Node>) -> Result<InterpolatedString, Error> {
    let mut out = Vec::with_capacity(fragments.len());

    for fragment in fragments {
        out.push(match fragment {
            Node::Chars(chars) => Fragment::Chars(chars),
            Node::Call { name, args } => Fragment::Interpolation(wrap_call(name, *args)?),
            Node::Invalid { text, span } => return Err(Error::InvalidInterpolation {
                expected: INTERPOLATION_SYNTAX,
                actual: text,
                span,
            }),
            node => return Err(unexpected("chars or call", &node)),
        });
    }

    Ok(InterpolatedString::new(out))
}

fn wrap_call(name: String, args: Node) -> Result<Interpolation, Error> {
    let args = match args {
        Node::List(args) => args,
        node => return Err(unexpected("list", &node)),
    };

    Ok(Interpolation {
        function: name,
        args: args.into_iter().map(wrap).collect::<Result<_, _>>()?,
    })
}

fn wrap_pair(node: Node) -> Result<KeyValue, Error> {
    match node {
        Node::Pair(key, value) => Ok(KeyValue {
            key: wrap(*key)?,
            value: wrap(*value)?,
        }),
        node => Err(unexpected("pair", &node)),
    }
}

fn unexpected(expected: &'static str, node: &Node) -> Error {
    Error::UnexpectedShape {
        expected,
        actual: node.type_name(),
        value: format!("{:?}", node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Span;

    fn chars(s: &str) -> Node {
        Node::Chars(s.into())
    }

    #[test]
    fn character_fragments_are_merged() {
        let node = Node::Quoted(vec![
            chars("a"),
            chars("b"),
            Node::Call {
                name: "foo".into(),
                args: Box::new(Node::List(vec![])),
            },
            chars("c"),
            chars("d"),
        ]);

        assert_eq!(wrap(node).unwrap(), Value::string(vec![
            Fragment::Chars("ab".into()),
            Fragment::Interpolation(Interpolation::new("foo", vec![])),
            Fragment::Chars("cd".into()),
        ]));
    }

    #[test]
    fn bare_chars_become_a_string() {
        assert_eq!(wrap(chars("foo")).unwrap(), Value::chars("foo"));
    }

    #[test]
    fn call_args_must_be_a_list() {
        let node = Node::Quoted(vec![Node::Call {
            name: "foo".into(),
            args: Box::new(Node::Int(1)),
        }]);

        match wrap(node) {
            Err(Error::UnexpectedShape { expected, actual, .. }) => {
                assert_eq!(expected, "list");
                assert_eq!(actual, "int");
            }
            other => panic!("expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn map_items_must_be_pairs() {
        let error = wrap(Node::Map(vec![chars("foo")])).unwrap_err();

        assert!(error.is_shape());
    }

    #[test]
    fn string_fragments_must_be_chars_or_calls() {
        let error = wrap(Node::Quoted(vec![Node::Int(3)])).unwrap_err();

        assert!(error.is_shape());
    }

    #[test]
    fn top_level_list_is_rejected() {
        let error = wrap(Node::List(vec![])).unwrap_err();

        assert!(error.is_shape());
    }

    #[test]
    fn invalid_fragment_is_invalid_interpolation() {
        let node = Node::Quoted(vec![
            chars("x"),
            Node::Invalid {
                text: "${foo}".into(),
                span: Span::default(),
            },
        ]);

        match wrap(node) {
            Err(Error::InvalidInterpolation { expected, actual, .. }) => {
                assert_eq!(expected, INTERPOLATION_SYNTAX);
                assert_eq!(actual, "${foo}");
            }
            other => panic!("expected invalid interpolation, got {:?}", other),
        }
    }
}
