//! Package implement an in-memory, ordered key,value index using
//! [red-black tree][rbt].
//!
//! Unlike the textbook algorithm, that walks back up the tree to repair
//! the colors after every mutation, this index does all its re-balancing
//! on the way down. Insertion splits 4-nodes and resolves red-red links
//! while descending, deletion pushes a red node ahead of the descent so
//! that the node finally unlinked is always red. A single pass from the
//! root is sufficient for both operations.
//!
//! The index is a building block for higher level storage components.
//! It does not persist, it is not thread-safe and it does not iterate.
//! Mutations require `&mut` access, applications that want to share an
//! index across threads must wrap it within their own lock.
//!
//! **Duplicate keys**: inserting a key that is already present is a no-op,
//! the older value is retained. Removing a key that is not present is a
//! no-op as well.
//!
//! **Self check**: in debug builds, every mutation is followed by a full
//! walk of the tree to validate the red-black rules, refer to
//! [rbt::Config] for disabling it. A violation is a defect in the engine
//! and shall panic.
//!
//! [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

/// Short form to compose Error values.
///
/// Here are few possible ways:
///
/// ```ignore
/// use crate::Error;
/// err_at!(Fatal, msg: "consecutive reds at {:?}", key);
/// ```
///
/// ```ignore
/// use crate::Error;
/// err_at!(IOError, fs::read(file_path));
/// ```
///
/// ```ignore
/// use crate::Error;
/// err_at!(InvalidInput, toml::from_str(text), "config {:?}", file);
/// ```
#[macro_export]
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

mod error;
pub mod rbt;
pub mod util;

pub use crate::error::{Error, Result};
