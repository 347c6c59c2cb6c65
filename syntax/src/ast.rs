//! Abstract syntax tree definitions for values in a .tfvars file.
//!
//! The tree is built once per parse and never mutated afterwards. Every node
//! exclusively owns its children.

use std::fmt;

/// A single value, such as a string, number, list or map.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    /// A quoted string, possibly containing interpolations.
    String(InterpolatedString),

    /// An integer literal.
    Int(i64),

    /// A floating point literal.
    Float(f64),

    /// A boolean literal.
    Bool(bool),

    /// A list literal, such as `[1, 2, 3]`.
    Array(Vec<Value>),

    /// A map literal, such as `{foo = "bar"}`.
    ///
    /// Keys can be any value, so a map is kept as a list of pairs in
    /// declaration order rather than an actual map.
    Map(Vec<KeyValue>),
}

impl Value {
    /// Create a string value from a list of fragments.
    pub fn string(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        Value::String(InterpolatedString::new(fragments))
    }

    /// Create a string value containing only literal characters.
    pub fn chars(chars: impl Into<String>) -> Self {
        Self::string(Some(Fragment::Chars(chars.into())))
    }

    /// Get the name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }
}

impl From<InterpolatedString> for Value {
    fn from(string: InterpolatedString) -> Self {
        Value::String(string)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::String(v) => v.fmt(f),
            Value::Int(v) => write!(f, "Int({})", v),
            Value::Float(v) => write!(f, "Float({:?})", v),
            Value::Bool(v) => write!(f, "Bool({})", v),
            Value::Array(items) => write!(f, "Array ").and_then(|_|
                f.debug_list().entries(items).finish()),
            Value::Map(pairs) => write!(f, "Map ").and_then(|_|
                f.debug_list().entries(pairs).finish()),
        }
    }
}

/// Prints the value back as canonical source text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::String(v) => v.fmt(f),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write_float(f, *v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(pairs) => {
                write!(f, "{{")?;
                for (i, pair) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} = {}", pair.key, pair.value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// A quoted string.
///
/// A string may mix plain characters and interpolations, as in
/// `"abc ${def()} ghi"`, so it is made up of a sequence of fragments that, when
/// resolved, stringified and concatenated in order, form the string value. An
/// empty sequence is the empty string.
///
/// Adjacent literal fragments are always merged, so two `Chars` fragments never
/// appear next to each other.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InterpolatedString(Vec<Fragment>);

impl InterpolatedString {
    /// Create a string from a sequence of fragments, merging adjacent literal
    /// fragments together. Running this over an already merged sequence
    /// returns it unchanged.
    pub fn new(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        let mut merged: Vec<Fragment> = Vec::new();

        for fragment in fragments {
            match fragment {
                Fragment::Chars(chars) if chars.is_empty() => {}
                Fragment::Chars(chars) => match merged.last_mut() {
                    Some(Fragment::Chars(prev)) => prev.push_str(&chars),
                    _ => merged.push(Fragment::Chars(chars)),
                },
                interpolation => merged.push(interpolation),
            }
        }

        Self(merged)
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.0
    }

    pub fn into_fragments(self) -> Vec<Fragment> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// If this string consists of exactly one interpolation, such as
    /// `"${foo()}"`, get it.
    pub fn single_interpolation(&self) -> Option<&Interpolation> {
        match self.0.as_slice() {
            [Fragment::Interpolation(interpolation)] => Some(interpolation),
            _ => None,
        }
    }
}

impl From<Vec<Fragment>> for InterpolatedString {
    fn from(fragments: Vec<Fragment>) -> Self {
        Self::new(fragments)
    }
}

impl fmt::Debug for InterpolatedString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "String ").and_then(|_|
            f.debug_list().entries(&self.0).finish())
    }
}

impl fmt::Display for InterpolatedString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"")?;

        for fragment in self.0.iter() {
            match fragment {
                Fragment::Chars(chars) => write_chars(f, chars)?,
                Fragment::Interpolation(interpolation) => write!(f, "{}", interpolation)?,
            }
        }

        write!(f, "\"")
    }
}

/// Floats always carry a decimal point, including in exponent form, since
/// `1e20` would read back as an integer followed by garbage.
fn write_float(f: &mut fmt::Formatter, value: f64) -> fmt::Result {
    let repr = format!("{:?}", value);

    match repr.find('e') {
        Some(e) if !repr[..e].contains('.') => write!(f, "{}.0{}", &repr[..e], &repr[e..]),
        _ => f.write_str(&repr),
    }
}

/// Write literal characters so that they read back as the same characters.
///
/// An escaped interpolation block `$${...}` is read verbatim, so it is written
/// verbatim too. A backslash in front of `${` is written as the unknown escape
/// `\$`, which reads back verbatim; `\\${` would read back as a backslash
/// followed by a live interpolation.
fn write_chars(f: &mut fmt::Formatter, chars: &str) -> fmt::Result {
    let mut rest = chars;

    while let Some(c) = rest.chars().next() {
        if rest.starts_with("$${") {
            if let Some(end) = rest.find('}') {
                if !rest[..end].contains('"') {
                    f.write_str(&rest[..=end])?;
                    rest = &rest[end + 1..];
                    continue;
                }
            }

            f.write_str("$$")?;
            rest = &rest[2..];
            continue;
        }

        if rest.starts_with("\\${") {
            f.write_str("\\$")?;
            rest = &rest[2..];
            continue;
        }

        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{}", c)?,
        }

        rest = &rest[c.len_utf8()..];
    }

    Ok(())
}

/// One piece of a string.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Fragment {
    /// A run of literal characters with no interpolation in it.
    Chars(String),

    /// An embedded function call, such as `${foo()}`.
    Interpolation(Interpolation),
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Fragment::Chars(v) => write!(f, "Chars({:?})", v),
            Fragment::Interpolation(v) => v.fmt(f),
        }
    }
}

/// An interpolation, which is a function call such as `${foo("bar", 42)}`.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Interpolation {
    /// Name of the function to call.
    pub function: String,

    /// Arguments to pass to the function. Arguments may contain interpolations
    /// of their own.
    pub args: Vec<Value>,
}

impl Interpolation {
    pub fn new(function: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            function: function.into(),
            args,
        }
    }
}

impl fmt::Debug for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Interpolation")
            .field("function", &self.function)
            .field("args", &self.args)
            .finish()
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "${{{}(", self.function)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")}}")
    }
}

/// A key/value pair in a map. Both the key and the value are full values; a
/// bare identifier key is stored as a single-fragment string.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KeyValue {
    pub key: Value,
    pub value: Value,
}

impl KeyValue {
    pub fn new(key: Value, value: Value) -> Self {
        Self { key, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Fragment {
        Fragment::Chars(s.into())
    }

    fn interp(name: &str) -> Fragment {
        Fragment::Interpolation(Interpolation::new(name, vec![]))
    }

    #[test]
    fn adjacent_chars_are_merged() {
        let string = InterpolatedString::new(vec![
            chars("f"),
            chars("o"),
            chars("o"),
            interp("bar"),
            chars("b"),
            chars("az"),
        ]);

        assert_eq!(string.fragments(), &[chars("foo"), interp("bar"), chars("baz")]);
    }

    #[test]
    fn merging_is_idempotent() {
        let string = InterpolatedString::new(vec![
            chars("a"),
            chars("b"),
            interp("x"),
            interp("y"),
            chars("c"),
        ]);
        let again = InterpolatedString::new(string.fragments().to_vec());

        assert_eq!(string, again);
    }

    #[test]
    fn empty_chars_are_dropped() {
        assert!(InterpolatedString::new(vec![chars("")]).is_empty());
        assert_eq!(Value::chars(""), Value::string(vec![]));
    }

    #[test]
    fn single_interpolation() {
        assert!(InterpolatedString::new(vec![interp("foo")]).single_interpolation().is_some());
        assert!(InterpolatedString::new(vec![chars("a"), interp("foo")]).single_interpolation().is_none());
        assert!(InterpolatedString::new(vec![interp("a"), interp("b")]).single_interpolation().is_none());
    }

    #[test]
    fn display_is_canonical_source() {
        let value = Value::Map(vec![
            KeyValue::new(Value::chars("foo"), Value::string(vec![
                chars("say \"hi\" "),
                Fragment::Interpolation(Interpolation::new("bar", vec![
                    Value::Int(-3),
                    Value::Float(1.0),
                    Value::Array(vec![Value::Bool(true)]),
                ])),
            ])),
        ]);

        assert_eq!(value.to_string(), r#"{"foo" = "say \"hi\" ${bar(-3, 1.0, [true])}"}"#);
    }
}
