//! balc_core: Core utilities shared by the balc front end.
//!
//! Provides text positions, line maps and the hash collections used
//! throughout the lexer and parser.

pub mod collections;
pub mod text;

// Re-export commonly used types
pub use collections::{FxHashMap, FxHashSet};
pub use text::{LineAndColumn, LineMap, TextPos, TextSpan};
