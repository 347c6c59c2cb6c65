use crate::value::Value;
use std::{error, fmt, io};

/// An exception thrown while resolving a value.
///
/// An exception is a value (typically a string) raised by an interpolation
/// function, or by a function registry that cannot dispatch a call. Exceptions
/// propagate unchanged to the caller of the resolver.
#[derive(Clone)]
pub struct Exception {
    message: Value,
    cause: Option<Box<Exception>>,
}

impl Exception {
    /// Create a new exception with a message.
    ///
    /// Usually the message is a string, but technically it could be any value type.
    pub fn new(message: impl Into<Value>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Create a new exception with a message and another exception that caused this one.
    pub fn with_cause(message: impl Into<Value>, cause: Exception) -> Self {
        Self {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Get the exception message.
    #[inline]
    pub fn message(&self) -> &Value {
        &self.message
    }

    /// Get the cause of the exception, if present.
    #[inline]
    pub fn cause(&self) -> Option<&Exception> {
        self.cause.as_deref()
    }
}

impl From<Value> for Exception {
    fn from(message: Value) -> Self {
        Self::new(message)
    }
}

impl From<&str> for Exception {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Exception {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<io::Error> for Exception {
    fn from(error: io::Error) -> Self {
        Self::new(error.to_string())
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)?;

        let mut cause = self.cause.as_ref();
        while let Some(c) = cause {
            write!(f, "\ncaused by: {}", c.message)?;
            cause = c.cause.as_ref();
        }

        Ok(())
    }
}

impl error::Error for Exception {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn error::Error + 'static))
    }
}
