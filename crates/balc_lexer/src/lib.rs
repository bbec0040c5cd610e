//! balc_lexer: Lossless lexer and lookahead buffer.
//!
//! The lexer attaches whitespace and comments to tokens as minutiae so the
//! parser can build a tree that reproduces the source exactly. Lexing is
//! mode-driven; the parser switches modes through the `TokenReader`.

pub mod char_codes;
mod lexer;
mod reader;

pub use lexer::{Lexer, LexerMode, LexerSnapshot};
pub use reader::TokenReader;
