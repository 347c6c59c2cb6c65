//! Helpers for native functions to validate the arguments they are called with.

use crate::{prelude::*, throw};

/// Check that a function got between `min` and `max` arguments, inclusive.
pub fn expect_arity(function: &str, args: &[Value], min: usize, max: usize) -> Result<(), Exception> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }

    if min == max {
        throw!("function '{}' expects {} argument(s) but got {}", function, min, args.len())
    } else {
        throw!("function '{}' expects {} to {} arguments but got {}", function, min, max, args.len())
    }
}

/// Get a required string argument.
pub fn string_arg<'a>(function: &str, args: &'a [Value], index: usize) -> Result<&'a str, Exception> {
    match optional_string_arg(function, args, index)? {
        Some(string) => Ok(string),
        None => throw!("function '{}' is missing argument {}", function, index + 1),
    }
}

/// Get a string argument, or `None` if it was not given.
pub fn optional_string_arg<'a>(function: &str, args: &'a [Value], index: usize) -> Result<Option<&'a str>, Exception> {
    match args.get(index) {
        None => Ok(None),
        Some(Value::String(string)) => Ok(Some(string)),
        Some(value) => throw!(
            "function '{}' expects argument {} to be a string but got {}",
            function,
            index + 1,
            value.type_name(),
        ),
    }
}
