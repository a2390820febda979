use std::{error, fmt, result};

/// Error enumerates over all possible errors that this package
/// shall return.
///
/// Each variant carries a `(prefix, message)` tuple, where prefix is the
/// `file:line` location that raised the error. Use the [err_at] macro to
/// compose them.
///
/// [err_at]: crate::err_at
#[derive(Clone, PartialEq)]
pub enum Error {
    /// Fatal case, the tree has broken one of the red-black rules. The
    /// engine is defective and the index must not be used any further.
    Fatal(String, String),
    /// Failed reading configuration from file.
    IOError(String, String),
    /// Supplied configuration cannot be parsed.
    InvalidInput(String, String),
}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            IOError(p, msg) => write!(f, "{} IOError: {}", p, msg),
            InvalidInput(p, msg) => write!(f, "{} InvalidInput: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}
