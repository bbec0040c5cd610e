//! balc_parser: Error-tolerant recursive descent parser.
//!
//! Turns the lexer's token stream into a lossless syntax tree. Malformed
//! input never aborts a parse: the recovery engine inserts missing tokens
//! or sets unexpected ones aside as invalid minutiae, so the tree always
//! renders back to the exact source text.

pub mod ambiguity;
pub mod context;
mod documentation;
pub mod options;
mod parser;
pub mod precedence;
pub mod recovery;

pub use context::ParserRuleContext;
pub use options::{OptionsError, ParserOptions};
pub use parser::Parser;
pub use recovery::{Action, ErrorHandler, Solution};

use balc_syntax::SyntaxTree;

/// Parse a whole module with the default options.
pub fn parse(source: &str) -> SyntaxTree {
    Parser::new(source).parse_compilation_unit()
}

/// Parse a whole module after checking `options`.
pub fn parse_with_options(source: &str, options: ParserOptions) -> Result<SyntaxTree, OptionsError> {
    options.validate()?;
    Ok(Parser::with_options(source, options).parse_compilation_unit())
}
