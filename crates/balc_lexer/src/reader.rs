//! A buffered token stream with arbitrary lookahead.

use std::collections::VecDeque;

use balc_syntax::{SyntaxKind, Token};

use crate::lexer::{Lexer, LexerMode, LexerSnapshot};

#[derive(Debug)]
struct Buffered {
    token: Token,
    /// Lexer state before this token was lexed.
    snapshot: LexerSnapshot,
}

/// Wraps the lexer with a lookahead buffer.
///
/// Mode switches discard the lookahead and re-lex it, since a token peeked
/// in one mode may lex differently in another.
pub struct TokenReader {
    lexer: Lexer,
    buffer: VecDeque<Buffered>,
    consumed: usize,
}

impl TokenReader {
    pub fn new(source: &str) -> Self {
        Self {
            lexer: Lexer::new(source),
            buffer: VecDeque::new(),
            consumed: 0,
        }
    }

    fn fill(&mut self, count: usize) {
        while self.buffer.len() < count {
            let snapshot = self.lexer.snapshot();
            let token = self.lexer.next_token();
            self.buffer.push_back(Buffered { token, snapshot });
        }
    }

    /// The next token, without consuming it.
    pub fn peek(&mut self) -> &Token {
        self.peek_n(1)
    }

    /// The n-th upcoming token, 1-based. Past the end this is `EofToken`.
    pub fn peek_n(&mut self, n: usize) -> &Token {
        let n = n.max(1);
        self.fill(n);
        &self.buffer[n - 1].token
    }

    pub fn peek_kind(&mut self) -> SyntaxKind {
        self.peek().kind
    }

    pub fn peek_kind_n(&mut self, n: usize) -> SyntaxKind {
        self.peek_n(n).kind
    }

    pub fn consume(&mut self) -> Token {
        self.fill(1);
        match self.buffer.pop_front() {
            Some(buffered) => {
                if buffered.token.kind != SyntaxKind::EofToken {
                    self.consumed += 1;
                }
                buffered.token
            }
            None => Token::new(SyntaxKind::EofToken, ""),
        }
    }

    /// Tokens consumed so far. Doubles as a position for progress checks.
    pub fn consumed_count(&self) -> usize {
        self.consumed
    }

    pub fn current_mode(&self) -> LexerMode {
        self.lexer.mode()
    }

    pub fn start_mode(&mut self, mode: LexerMode) {
        self.rewind();
        self.lexer.start_mode(mode);
    }

    pub fn end_mode(&mut self) {
        self.rewind();
        self.lexer.end_mode();
    }

    fn rewind(&mut self) {
        if let Some(first) = self.buffer.pop_front() {
            self.lexer.restore(first.snapshot);
        }
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_is_one_based() {
        let mut reader = TokenReader::new("a b c");
        assert_eq!(reader.peek_n(1).text, "a");
        assert_eq!(reader.peek_n(3).text, "c");
        assert_eq!(reader.consume().text, "a");
        assert_eq!(reader.peek().text, "b");
        assert_eq!(reader.consumed_count(), 1);
    }

    #[test]
    fn test_eof_repeats() {
        let mut reader = TokenReader::new("x");
        reader.consume();
        assert_eq!(reader.peek_kind_n(5), SyntaxKind::EofToken);
        reader.consume();
        assert_eq!(reader.consume().kind, SyntaxKind::EofToken);
        assert_eq!(reader.consumed_count(), 1);
    }

    #[test]
    fn test_mode_switch_relexes_lookahead() {
        let mut reader = TokenReader::new("import foo.'type as t;");
        assert_eq!(reader.consume().kind, SyntaxKind::ImportKeyword);
        // Peeked in default mode: `foo` is an identifier either way.
        assert_eq!(reader.peek_kind(), SyntaxKind::Identifier);
        reader.start_mode(LexerMode::Import);
        assert_eq!(reader.consume().text, "foo");
        reader.consume();
        assert_eq!(reader.consume().kind, SyntaxKind::Identifier);
        assert_eq!(reader.consume().kind, SyntaxKind::AsKeyword);
    }
}
