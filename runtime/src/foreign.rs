use crate::prelude::*;
use std::{fmt, sync::Arc};

/// A native function that can be invoked from an interpolation, receiving the
/// execution context and the resolved arguments.
///
/// Foreign functions are reference counted and can be shared between threads.
pub struct ForeignFn<C: ?Sized>(Arc<dyn Fn(&C, Vec<Value>) -> Result<Value, Exception> + Send + Sync>);

impl<C: ?Sized> ForeignFn<C> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&C, Vec<Value>) -> Result<Value, Exception> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, context: &C, args: Vec<Value>) -> Result<Value, Exception> {
        (self.0)(context, args)
    }
}

impl<C: ?Sized> Clone for ForeignFn<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C: ?Sized> fmt::Debug for ForeignFn<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<native@{:p}>", Arc::as_ptr(&self.0) as *const ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_receives_context_and_args() {
        let f = ForeignFn::new(|prefix: &str, args: Vec<Value>| {
            Ok(Value::from(format!("{}{}", prefix, args.len())))
        });

        assert_eq!(f.call("n=", vec![Value::Int(1), Value::Int(2)]).unwrap(), Value::from("n=2"));
        assert_eq!(f.clone().call("", vec![]).unwrap(), Value::from("0"));
    }
}
