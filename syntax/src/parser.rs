//! The value parser.
//!
//! Parsing happens in two stages: the PEG grammar first produces an untyped
//! tree of [`Node`]s, which is then normalized into a typed [`Value`].
use crate::{
    ast::Value,
    error::*,
    grammar::{self, Rule},
    raw::Node,
    source::*,
    wrap::wrap,
};
use pest::iterators::Pair;

/// Parse a source file into a typed value.
pub fn parse(file: SourceFile) -> Result<Value, Error> {
    let node = parse_raw(&file)?;
    log::trace!("raw tree for {}: {:?}", file.name(), node);

    wrap(node)
}

/// Parse a named string into a typed value.
pub fn parse_value(source_name: impl Into<String>, text: impl Into<String>) -> Result<Value, Error> {
    parse(SourceFile::named(source_name, text))
}

/// Parse a source file into the untyped parse tree, without normalizing it.
pub fn parse_raw(file: &SourceFile) -> Result<Node, Error> {
    log::debug!("parsing value from {}", file.name());

    let pairs = grammar::parse(file.source())
        .map_err(|e| ParseError::from_pest(&e, file))?;

    let values = pairs
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .collect::<Vec<_>>();
    let actual = values.len();

    let [value]: [Pair<'_, Rule>; 1] = values.try_into()
        .map_err(|_| Error::UnexpectedLength {
            expected: 1,
            actual,
        })?;

    Builder { file }.node(value)
}

/// Builds raw nodes out of the pairs produced by the grammar.
struct Builder<'f> {
    file: &'f SourceFile,
}

impl Builder<'_> {
    fn node(&self, pair: Pair<'_, Rule>) -> Result<Node, Error> {
        match pair.as_rule() {
            Rule::int => match pair.as_str().parse() {
                Ok(v) => Ok(Node::Int(v)),
                Err(_) => Err(self.error(&pair, "integer literal out of range")),
            },
            Rule::float => match pair.as_str().parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Node::Float(v)),
                Ok(_) => Err(self.error(&pair, "float literal out of range")),
                Err(_) => Err(self.error(&pair, "invalid float literal")),
            },
            Rule::boolean => Ok(Node::Bool(pair.as_str() == "true")),
            Rule::ident => Ok(Node::Chars(pair.as_str().to_owned())),
            Rule::string => pair.into_inner()
                .map(|fragment| self.fragment(fragment))
                .collect::<Result<_, _>>()
                .map(Node::Quoted),
            Rule::array => pair.into_inner()
                .map(|item| self.node(item))
                .collect::<Result<_, _>>()
                .map(Node::Array),
            Rule::map => pair.into_inner()
                .map(|item| self.node(item))
                .collect::<Result<_, _>>()
                .map(Node::Map),
            Rule::pair => {
                let [key, value] = children(pair)?;

                Ok(Node::Pair(Box::new(self.node(key)?), Box::new(self.node(value)?)))
            }
            _ => Err(unexpected("value", pair)),
        }
    }

    fn fragment(&self, pair: Pair<'_, Rule>) -> Result<Node, Error> {
        match pair.as_rule() {
            // An escaped interpolation is kept verbatim, both dollar signs included.
            Rule::chars | Rule::dollars | Rule::escaped_interpolation => Ok(Node::Chars(pair.as_str().to_owned())),
            Rule::escape => Ok(Node::Chars(unescape(pair.as_str()))),
            Rule::interpolation => {
                let [call] = children(pair)?;
                self.call(call)
            }
            Rule::invalid_interpolation => Ok(Node::Invalid {
                text: pair.as_str().to_owned(),
                span: pair.as_span().into(),
            }),
            _ => Err(unexpected("string fragment", pair)),
        }
    }

    fn call(&self, pair: Pair<'_, Rule>) -> Result<Node, Error> {
        if pair.as_rule() != Rule::call {
            return Err(unexpected("call", pair));
        }

        let [name, args] = children(pair)?;
        log::trace!("parsed call to '{}'", name.as_str());

        Ok(Node::Call {
            name: name.as_str().to_owned(),
            args: Box::new(Node::List(args.into_inner()
                .map(|arg| self.node(arg))
                .collect::<Result<_, _>>()?)),
        })
    }

    fn error(&self, pair: &Pair<'_, Rule>, message: &str) -> Error {
        ParseError::new(message, pair.as_span().into(), self.file).into()
    }
}

/// Get exactly `N` children of a pair.
fn children<const N: usize>(pair: Pair<'_, Rule>) -> Result<[Pair<'_, Rule>; N], Error> {
    let children = pair.into_inner().collect::<Vec<_>>();
    let actual = children.len();

    children.try_into().map_err(|_| Error::UnexpectedLength {
        expected: N,
        actual,
    })
}

fn unexpected(expected: &'static str, pair: Pair<'_, Rule>) -> Error {
    Error::UnexpectedShape {
        expected,
        actual: "grammar rule",
        value: format!("{:?}({:?})", pair.as_rule(), pair.as_str()),
    }
}

fn unescape(escape: &str) -> String {
    match escape {
        "\\\"" => "\"".into(),
        "\\\\" => "\\".into(),
        "\\n" => "\n".into(),
        "\\r" => "\r".into(),
        "\\t" => "\t".into(),
        other => other.into(),
    }
}
