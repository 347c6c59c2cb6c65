//! This module contains the core logic of the resolver.

use crate::{
    prelude::*,
    syntax::{self, ast},
    throw,
};

/// Any error that can occur evaluating source text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("error parsing: {0}")]
    Parse(#[from] syntax::Error),

    #[error(transparent)]
    Exception(#[from] Exception),
}

/// Parse source text and resolve it in one go.
pub fn eval<C, R>(source_name: &str, text: &str, context: &C, registry: &R) -> Result<Value, Error>
where
    C: ?Sized,
    R: FunctionRegistry<C> + ?Sized,
{
    let value = syntax::parse_value(source_name, text)?;

    Ok(resolve(&value, context, registry)?)
}

/// Resolve a parsed value into a native value, executing any interpolations
/// it contains.
pub fn resolve<C, R>(value: &ast::Value, context: &C, registry: &R) -> Result<Value, Exception>
where
    C: ?Sized,
    R: FunctionRegistry<C> + ?Sized,
{
    Resolver::new(context, registry).resolve(value)
}

/// Walks a value tree depth-first, dispatching interpolations to a function
/// registry.
///
/// Siblings are always resolved strictly in order, and resolution stops at the
/// first error; the functions called may have side effects whose order
/// matters to the caller.
pub struct Resolver<'r, C: ?Sized, R: ?Sized> {
    context: &'r C,
    registry: &'r R,
}

impl<'r, C, R> Resolver<'r, C, R>
where
    C: ?Sized,
    R: FunctionRegistry<C> + ?Sized,
{
    pub fn new(context: &'r C, registry: &'r R) -> Self {
        Self {
            context,
            registry,
        }
    }

    pub fn resolve(&self, value: &ast::Value) -> Result<Value, Exception> {
        match value {
            ast::Value::String(string) => self.resolve_string(string),
            ast::Value::Int(number) => Ok(Value::Int(*number)),
            ast::Value::Float(number) => Ok(Value::Float(*number)),
            ast::Value::Bool(value) => Ok(Value::Bool(*value)),
            ast::Value::Array(items) => self.resolve_array(items),
            ast::Value::Map(pairs) => self.resolve_map(pairs),
        }
    }

    fn resolve_string(&self, string: &ast::InterpolatedString) -> Result<Value, Exception> {
        // A string made of a single interpolation returns whatever the function
        // returned, which lets a value be declared as "${f()}" and still be a
        // list or map.
        if let Some(interpolation) = string.single_interpolation() {
            return self.resolve_interpolation(interpolation);
        }

        let mut rendered = String::new();

        for fragment in string.fragments() {
            match self.resolve_fragment(fragment)? {
                Value::String(part) => rendered.push_str(&part),
                value => rendered.push_str(&value.to_string()),
            }
        }

        Ok(Value::String(rendered))
    }

    fn resolve_fragment(&self, fragment: &ast::Fragment) -> Result<Value, Exception> {
        match fragment {
            ast::Fragment::Chars(chars) => Ok(Value::String(chars.clone())),
            ast::Fragment::Interpolation(interpolation) => self.resolve_interpolation(interpolation),
        }
    }

    fn resolve_array(&self, items: &[ast::Value]) -> Result<Value, Exception> {
        let mut values = Vec::with_capacity(items.len());

        for item in items {
            values.push(self.resolve(item)?);
        }

        Ok(Value::List(values))
    }

    fn resolve_map(&self, pairs: &[ast::KeyValue]) -> Result<Value, Exception> {
        let mut table = Table::new();

        for pair in pairs {
            // Only strings are keys, so `1` and `"1"` can never collide.
            let key = match self.resolve(&pair.key)? {
                Value::String(key) => key,
                key => throw!("map key must be a string but got {} {:?}", key.type_name(), key),
            };
            let value = self.resolve(&pair.value)?;

            // Later keys win.
            if table.set(key.as_str(), value).is_some() {
                log::debug!("duplicate map key '{}' overwrites earlier value", key);
            }
        }

        Ok(Value::Map(table))
    }

    fn resolve_interpolation(&self, interpolation: &ast::Interpolation) -> Result<Value, Exception> {
        let mut args = Vec::with_capacity(interpolation.args.len());

        for arg in interpolation.args.iter() {
            args.push(self.resolve(arg)?);
        }

        log::trace!("calling {}({:?})", interpolation.function, args);

        self.registry.call(&interpolation.function, args, self.context)
    }
}
