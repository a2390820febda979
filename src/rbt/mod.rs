//! Module implement red-black tree with top-down, single pass,
//! insert and remove.

mod config;
mod depth;
mod index;
mod node;
mod rotate;
mod stats;
mod validate;
mod walk;

pub use config::{Config, DEFAULT_NAME};
pub use depth::Depth;
pub use index::Index;
pub use stats::Stats;
pub use validate::MAX_TREE_DEPTH;
