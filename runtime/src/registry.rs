//! The function registry interpolations are dispatched to.

use crate::{foreign::ForeignFn, prelude::*, throw};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Dispatches interpolation calls by name.
///
/// A registry owns the knowledge of which functions exist. Unknown names,
/// wrong arity and wrong argument types are all reported by the registry as an
/// exception, which the resolver propagates unchanged.
pub trait FunctionRegistry<C: ?Sized> {
    /// Invoke the function `name` with already resolved arguments.
    fn call(&self, name: &str, args: Vec<Value>, context: &C) -> Result<Value, Exception>;
}

impl<C: ?Sized, R: FunctionRegistry<C> + ?Sized> FunctionRegistry<C> for &R {
    fn call(&self, name: &str, args: Vec<Value>, context: &C) -> Result<Value, Exception> {
        (**self).call(name, args, context)
    }
}

impl<C: ?Sized, R: FunctionRegistry<C> + ?Sized> FunctionRegistry<C> for Box<R> {
    fn call(&self, name: &str, args: Vec<Value>, context: &C) -> Result<Value, Exception> {
        (**self).call(name, args, context)
    }
}

impl<C: ?Sized, R: FunctionRegistry<C> + ?Sized> FunctionRegistry<C> for Arc<R> {
    fn call(&self, name: &str, args: Vec<Value>, context: &C) -> Result<Value, Exception> {
        (**self).call(name, args, context)
    }
}

/// A table of named native functions.
pub struct Functions<C: ?Sized> {
    table: BTreeMap<String, ForeignFn<C>>,
}

impl<C: ?Sized> Default for Functions<C> {
    fn default() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }
}

impl<C: ?Sized> Functions<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a native function under a name, replacing any function
    /// previously registered under it.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&C, Vec<Value>) -> Result<Value, Exception> + Send + Sync + 'static,
    {
        self.insert(name, ForeignFn::new(f));
        self
    }

    /// Builder form of [`Functions::register`].
    pub fn with<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&C, Vec<Value>) -> Result<Value, Exception> + Send + Sync + 'static,
    {
        self.register(name, f);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, function: ForeignFn<C>) -> Option<ForeignFn<C>> {
        self.table.insert(name.into(), function)
    }

    pub fn get(&self, name: &str) -> Option<&ForeignFn<C>> {
        self.table.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Names of all registered functions, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }
}

impl<C: ?Sized> Clone for Functions<C> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Functions<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl<C: ?Sized> FunctionRegistry<C> for Functions<C> {
    fn call(&self, name: &str, args: Vec<Value>, context: &C) -> Result<Value, Exception> {
        match self.table.get(name) {
            Some(function) => function.call(context, args),
            None => throw!("unknown function '{}'", name),
        }
    }
}
