//! Core types - pure abstractions shared across the codebase.

mod path;

pub use path::{LogicalPath, ROOT_MARKER, encode_segments, normalize};
