//! balc_syntax: The lossless concrete syntax tree.
//!
//! Defines the `SyntaxKind` enum, tokens with their minutiae, the generic
//! node/list containers the parser builds, and the `SyntaxTree` wrapper that
//! turns attached diagnostics into located ones.

pub mod factory;
pub mod node;
pub mod syntax_kind;
pub mod tree;
pub mod visitor;

// Re-export key types
pub use node::{Minutiae, Node, NodeList, SyntaxDiagnostic, SyntaxNode, Token};
pub use syntax_kind::SyntaxKind;
pub use tree::SyntaxTree;
pub use visitor::SyntaxVisitor;
