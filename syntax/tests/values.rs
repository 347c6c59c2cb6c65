//! Checks the exact structure of parsed values, down to how string fragments
//! are merged.

use tfvars_syntax::{ast::*, error::*, parse_value};

fn chars(s: &str) -> Fragment {
    Fragment::Chars(s.into())
}

fn interp(function: &str, args: Vec<Value>) -> Fragment {
    Fragment::Interpolation(Interpolation::new(function, args))
}

fn str(fragments: Vec<Fragment>) -> Value {
    Value::string(fragments)
}

fn pair(key: Value, value: Value) -> KeyValue {
    KeyValue::new(key, value)
}

fn parse(text: &str) -> Value {
    match parse_value("test", text) {
        Ok(value) => value,
        Err(e) => panic!("failed to parse {:?}: {}", text, e),
    }
}

#[test]
fn plain_string() {
    assert_eq!(parse(r#""foo""#), str(vec![chars("foo")]));
}

#[test]
fn empty_string_has_no_fragments() {
    assert_eq!(parse(r#""""#), str(vec![]));
}

#[test]
fn escapes_are_merged_into_one_fragment() {
    assert_eq!(parse(r#""\"foo\"""#), str(vec![chars("\"foo\"")]));
    assert_eq!(parse(r#""a\tb\\c""#), str(vec![chars("a\tb\\c")]));
}

#[test]
fn unknown_escape_is_kept() {
    assert_eq!(parse(r#""a\qb""#), str(vec![chars("a\\qb")]));
}

#[test]
fn escaped_interpolation_is_literal() {
    assert_eq!(parse(r#""$${foo()}""#), str(vec![chars("$${foo()}")]));
}

#[test]
fn escaped_interpolation_ends_with_its_string() {
    assert_eq!(
        parse(r#"["$${a", "b}"]"#),
        Value::Array(vec![str(vec![chars("$${a")]), str(vec![chars("b}")])]),
    );
    assert_eq!(parse(r#""cost $${""#), str(vec![chars("cost $${")]));
}

#[test]
fn backslash_before_interpolation_prints_as_literal() {
    let value = parse(r#""\${foo()}""#);

    assert_eq!(value, str(vec![chars("\\${foo()}")]));
    assert_eq!(value.to_string(), r#""\${foo()}""#);
}

#[test]
fn floats_print_with_a_decimal_point() {
    assert_eq!(parse("1.0e20").to_string(), "1.0e20");
    assert_eq!(parse("0.00001").to_string(), "1.0e-5");
    assert_eq!(parse("2.5").to_string(), "2.5");
}

#[test]
fn fragments_alternate() {
    assert_eq!(
        parse(r#""foo${bar()}baz${blah()}abc""#),
        str(vec![
            chars("foo"),
            interp("bar", vec![]),
            chars("baz"),
            interp("blah", vec![]),
            chars("abc"),
        ]),
    );
}

#[test]
fn adjacent_interpolations_stay_separate() {
    assert_eq!(
        parse(r#""${a()}${b()}""#),
        str(vec![interp("a", vec![]), interp("b", vec![])]),
    );
}

#[test]
fn interpolation_with_multiple_arg_types() {
    assert_eq!(
        parse(r#""${foo("bar", 99999, 0.333333333, true, [42.0])}""#),
        str(vec![interp("foo", vec![
            str(vec![chars("bar")]),
            Value::Int(99999),
            Value::Float(0.333333333),
            Value::Bool(true),
            Value::Array(vec![Value::Float(42.0)]),
        ])]),
    );
}

#[test]
fn nested_interpolations() {
    assert_eq!(
        parse(r#""${foo("abc${bar("baz")}def")}""#),
        str(vec![interp("foo", vec![
            str(vec![chars("abc"), interp("bar", vec![str(vec![chars("baz")])]), chars("def")]),
        ])]),
    );
}

#[test]
fn map_keys_are_strings() {
    assert_eq!(
        parse(r#"{foo = "bar", baz = 1.0, blah = true}"#),
        Value::Map(vec![
            pair(str(vec![chars("foo")]), str(vec![chars("bar")])),
            pair(str(vec![chars("baz")]), Value::Float(1.0)),
            pair(str(vec![chars("blah")]), Value::Bool(true)),
        ]),
    );
}

#[test]
fn duplicate_map_keys_are_kept_in_order() {
    assert_eq!(
        parse("{a = 1, a = 2}"),
        Value::Map(vec![
            pair(Value::chars("a"), Value::Int(1)),
            pair(Value::chars("a"), Value::Int(2)),
        ]),
    );
}

#[test]
fn commas_are_optional() {
    assert_eq!(parse("[1 2 3]"), parse("[1, 2, 3]"));
    assert_eq!(parse("{a = 1 b = 2}"), parse("{a = 1, b = 2}"));
}

#[test]
fn not_a_function_call() {
    match parse_value("test", r#""${foo}""#) {
        Err(Error::InvalidInterpolation { expected, actual, span }) => {
            assert_eq!(expected, INTERPOLATION_SYNTAX);
            assert_eq!(actual, "${foo}");
            assert_eq!(span.start.column, 2);
        }
        other => panic!("expected invalid interpolation, got {:?}", other),
    }
}

#[test]
fn syntax_errors_carry_a_position() {
    match parse_value("vars.tfvars", "[1, 2,\n  3") {
        Err(Error::Syntax(errors)) => {
            let first = errors.first();

            assert_eq!(first.source_name, "vars.tfvars");
            assert_eq!(first.span.start.line, 2);
            assert!(errors.to_string().starts_with("vars.tfvars:2:"));
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}
