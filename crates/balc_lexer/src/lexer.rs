//! The lexer.
//!
//! Converts source text into tokens that carry their leading and trailing
//! minutiae. Leading minutiae hold everything after the previous token's
//! trailing minutiae; trailing minutiae stop after the first newline.

use balc_diagnostics::messages;
use balc_syntax::{Minutiae, SyntaxDiagnostic, SyntaxKind, Token};

use crate::char_codes::*;

/// How raw text is tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexerMode {
    Default,
    /// Module names after `import`: reserved words lex as identifiers.
    Import,
    /// Body of a backtick string/xml/raw template.
    Template,
    /// Body of a `re` template.
    Regex,
    /// Code inside `${ ... }` within a template, regex or prompt.
    Interpolation,
    /// Body of a `natural { ... }` expression.
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ModeFrame {
    mode: LexerMode,
    /// Open braces seen inside an interpolation.
    brace_depth: u32,
}

impl ModeFrame {
    fn new(mode: LexerMode) -> Self {
        Self {
            mode,
            brace_depth: 0,
        }
    }
}

/// Enough lexer state to re-lex from a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerSnapshot {
    pos: usize,
    modes: Vec<ModeFrame>,
}

/// Result of scanning the text of one token.
struct Scanned {
    kind: SyntaxKind,
    diagnostics: Vec<SyntaxDiagnostic>,
    /// Whether trailing minutiae may be attached.
    trailing: bool,
}

impl Scanned {
    fn of(kind: SyntaxKind) -> Self {
        Self {
            kind,
            diagnostics: Vec::new(),
            trailing: true,
        }
    }

    fn without_trailing(kind: SyntaxKind) -> Self {
        Self {
            trailing: false,
            ..Self::of(kind)
        }
    }

    fn with_diagnostics(kind: SyntaxKind, diagnostics: Vec<SyntaxDiagnostic>) -> Self {
        Self {
            diagnostics,
            ..Self::of(kind)
        }
    }
}

pub struct Lexer {
    text: Vec<char>,
    pos: usize,
    /// Never empty; the bottom frame is `Default`.
    modes: Vec<ModeFrame>,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            pos: 0,
            modes: vec![ModeFrame::new(LexerMode::Default)],
        }
    }

    pub fn mode(&self) -> LexerMode {
        self.modes
            .last()
            .map(|frame| frame.mode)
            .unwrap_or(LexerMode::Default)
    }

    pub fn start_mode(&mut self, mode: LexerMode) {
        self.modes.push(ModeFrame::new(mode));
    }

    /// Pop the current mode. The bottom `Default` mode is never popped.
    pub fn end_mode(&mut self) {
        if self.modes.len() > 1 {
            self.modes.pop();
        }
    }

    pub fn snapshot(&self) -> LexerSnapshot {
        LexerSnapshot {
            pos: self.pos,
            modes: self.modes.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: LexerSnapshot) {
        self.pos = snapshot.pos;
        self.modes = snapshot.modes;
    }

    /// Lex the next token in the current mode. At the end of input this
    /// keeps returning `EofToken`.
    pub fn next_token(&mut self) -> Token {
        match self.mode() {
            LexerMode::Template | LexerMode::Regex | LexerMode::Prompt => self.next_content_token(),
            LexerMode::Default | LexerMode::Import | LexerMode::Interpolation => {
                self.next_code_token()
            }
        }
    }

    // ========================================================================
    // Character access
    // ========================================================================

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    #[inline]
    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    #[inline]
    fn char_is(&self, offset: usize, ch: char) -> bool {
        self.peek_char_at(offset) == Some(ch)
    }

    #[inline]
    fn advance(&mut self) {
        if self.pos < self.text.len() {
            self.pos += 1;
        }
    }

    fn advance_by(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.text.len());
    }

    fn text_from(&self, start: usize) -> String {
        self.text[start..self.pos].iter().collect()
    }

    fn read_while(&mut self, predicate: fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek_char().map_or(false, predicate) {
            self.advance();
        }
        self.text_from(start)
    }

    fn current_frame_mut(&mut self) -> Option<&mut ModeFrame> {
        self.modes.last_mut()
    }

    // ========================================================================
    // Minutiae
    // ========================================================================

    fn read_newline(&mut self) -> String {
        let start = self.pos;
        if self.peek_char() == Some(CARRIAGE_RETURN) {
            self.advance();
        }
        if self.peek_char() == Some(LINE_FEED) {
            self.advance();
        }
        self.text_from(start)
    }

    fn read_comment(&mut self) -> String {
        self.read_while(|c| !is_line_break(c))
    }

    fn is_comment_start(&self) -> bool {
        self.peek_char() == Some(SLASH) && self.char_is(1, SLASH)
    }

    fn read_leading_minutiae(&mut self) -> Vec<Minutiae> {
        let mut minutiae = Vec::new();
        loop {
            match self.peek_char() {
                Some(c) if is_whitespace(c) => {
                    minutiae.push(Minutiae::Whitespace(self.read_while(is_whitespace)))
                }
                Some(c) if is_line_break(c) => minutiae.push(Minutiae::EndOfLine(self.read_newline())),
                Some(_) if self.is_comment_start() => {
                    minutiae.push(Minutiae::Comment(self.read_comment()))
                }
                _ => break,
            }
        }
        minutiae
    }

    fn read_trailing_minutiae(&mut self) -> Vec<Minutiae> {
        let mut minutiae = Vec::new();
        loop {
            match self.peek_char() {
                Some(c) if is_whitespace(c) => {
                    minutiae.push(Minutiae::Whitespace(self.read_while(is_whitespace)))
                }
                Some(_) if self.is_comment_start() => {
                    minutiae.push(Minutiae::Comment(self.read_comment()))
                }
                Some(c) if is_line_break(c) => {
                    minutiae.push(Minutiae::EndOfLine(self.read_newline()));
                    break;
                }
                _ => break,
            }
        }
        minutiae
    }

    // ========================================================================
    // Code modes
    // ========================================================================

    fn next_code_token(&mut self) -> Token {
        let leading = self.read_leading_minutiae();
        let start = self.pos;
        let scanned = self.scan_code_token();
        let text = self.text_from(start);
        let trailing = if scanned.trailing && scanned.kind != SyntaxKind::EofToken {
            self.read_trailing_minutiae()
        } else {
            Vec::new()
        };
        let mut token = Token::with_minutiae(scanned.kind, text, leading, trailing);
        token.diagnostics = scanned.diagnostics;
        token
    }

    fn scan_code_token(&mut self) -> Scanned {
        let Some(ch) = self.peek_char() else {
            return Scanned::without_trailing(SyntaxKind::EofToken);
        };
        match ch {
            DOUBLE_QUOTE => self.scan_string(),
            SINGLE_QUOTE if self.peek_char_at(1).map_or(false, is_identifier_part) => {
                self.advance();
                self.scan_identifier(true)
            }
            '0' if matches!(self.peek_char_at(1), Some('x' | 'X')) => self.scan_hex_number(),
            c if is_digit(c) => self.scan_number(),
            DOT if self.peek_char_at(1).map_or(false, is_digit) => self.scan_number(),
            c if is_identifier_start(c) || c == BACKSLASH => self.scan_identifier(false),
            HASH => self.scan_documentation_string(),
            BACKTICK => {
                // An opening backtick; template content follows immediately.
                self.advance();
                Scanned::without_trailing(SyntaxKind::BacktickToken)
            }
            OPEN_BRACE => {
                let kind = if self.char_is(1, '|') {
                    self.advance_by(2);
                    SyntaxKind::OpenBracePipeToken
                } else {
                    self.advance();
                    SyntaxKind::OpenBraceToken
                };
                if self.mode() == LexerMode::Interpolation {
                    if let Some(frame) = self.current_frame_mut() {
                        frame.brace_depth += 1;
                    }
                }
                Scanned::of(kind)
            }
            CLOSE_BRACE => {
                self.advance();
                if self.mode() == LexerMode::Interpolation {
                    let depth = self.modes.last().map_or(0, |frame| frame.brace_depth);
                    if depth == 0 {
                        // Back to template content; whitespace is content there.
                        self.end_mode();
                        return Scanned::without_trailing(SyntaxKind::CloseBraceToken);
                    }
                    if let Some(frame) = self.current_frame_mut() {
                        frame.brace_depth -= 1;
                    }
                }
                Scanned::of(SyntaxKind::CloseBraceToken)
            }
            _ => match self.scan_punctuation(ch) {
                Some(kind) => Scanned::of(kind),
                None => {
                    self.advance();
                    let text = ch.to_string();
                    Scanned::with_diagnostics(
                        SyntaxKind::InvalidToken,
                        vec![SyntaxDiagnostic::new(messages::ERROR_INVALID_CHARACTER, &[&text])],
                    )
                }
            },
        }
    }

    fn scan_punctuation(&mut self, ch: char) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        let next = self.peek_char_at(1);
        let next2 = self.peek_char_at(2);
        let next3 = self.peek_char_at(3);
        let (kind, len) = match ch {
            '(' => (OpenParenToken, 1),
            ')' => (CloseParenToken, 1),
            '[' => (OpenBracketToken, 1),
            ']' => (CloseBracketToken, 1),
            ';' => (SemicolonToken, 1),
            ',' => (CommaToken, 1),
            '@' => (AtToken, 1),
            '~' => (NegationToken, 1),
            ':' => (ColonToken, 1),
            '%' => (PercentToken, 1),
            '.' => match (next, next2) {
                (Some('.'), Some('.')) => (EllipsisToken, 3),
                (Some('.'), Some('<')) => (DoubleDotLtToken, 3),
                _ => (DotToken, 1),
            },
            '?' => match next {
                Some('.') => (OptionalChainingToken, 2),
                Some(':') => (ElvisToken, 2),
                _ => (QuestionMarkToken, 1),
            },
            '=' => match (next, next2) {
                (Some('='), Some('=')) => (TripleEqualToken, 3),
                (Some('='), _) => (DoubleEqualToken, 2),
                (Some('>'), _) => (RightDoubleArrowToken, 2),
                _ => (EqualToken, 1),
            },
            '!' => match (next, next2) {
                (Some('='), Some('=')) => (NotDoubleEqualToken, 3),
                (Some('='), _) => (NotEqualToken, 2),
                _ => (ExclamationMarkToken, 1),
            },
            '+' => match next {
                Some('=') => (PlusEqualToken, 2),
                _ => (PlusToken, 1),
            },
            '-' => match (next, next2) {
                (Some('>'), Some('>')) => (SyncSendToken, 3),
                (Some('>'), _) => (RightArrowToken, 2),
                (Some('='), _) => (MinusEqualToken, 2),
                _ => (MinusToken, 1),
            },
            '*' => match next {
                Some('=') => (AsteriskEqualToken, 2),
                _ => (AsteriskToken, 1),
            },
            '/' => match next {
                Some('=') => (SlashEqualToken, 2),
                _ => (SlashToken, 1),
            },
            '&' => match next {
                Some('&') => (LogicalAndToken, 2),
                Some('=') => (BitwiseAndEqualToken, 2),
                _ => (BitwiseAndToken, 1),
            },
            '|' => match next {
                Some('}') => (ClosePipeBraceToken, 2),
                Some('|') => (LogicalOrToken, 2),
                Some('=') => (PipeEqualToken, 2),
                _ => (PipeToken, 1),
            },
            '^' => match next {
                Some('=') => (BitwiseXorEqualToken, 2),
                _ => (BitwiseXorToken, 1),
            },
            '<' => match (next, next2) {
                (Some('<'), Some('=')) => (DoubleLtEqualToken, 3),
                (Some('<'), _) => (DoubleLtToken, 2),
                (Some('='), _) => (LtEqualToken, 2),
                (Some('-'), _) => (LeftArrowToken, 2),
                _ => (LtToken, 1),
            },
            // `>>` and `>>>` are assembled by the parser so that type
            // argument lists like `map<map<int>>` close correctly.
            '>' => match (next, next2, next3) {
                (Some('>'), Some('>'), Some('=')) => (TripleGtEqualToken, 4),
                (Some('>'), Some('='), _) => (DoubleGtEqualToken, 3),
                (Some('='), _, _) => (GtEqualToken, 2),
                _ => (GtToken, 1),
            },
            _ => return None,
        };
        self.advance_by(len);
        Some(kind)
    }

    fn scan_identifier(&mut self, quoted: bool) -> Scanned {
        let start = self.pos;
        loop {
            match self.peek_char() {
                Some(c) if is_identifier_part(c) => self.advance(),
                Some(BACKSLASH) if self.peek_char_at(1).map_or(false, |c| !is_line_break(c)) => {
                    self.advance_by(2)
                }
                _ => break,
            }
        }
        if quoted {
            return Scanned::of(SyntaxKind::Identifier);
        }
        let text = self.text_from(start);
        let keyword = SyntaxKind::keyword_from_text(&text);
        let kind = match (self.mode(), keyword) {
            (LexerMode::Import, Some(SyntaxKind::AsKeyword)) => SyntaxKind::AsKeyword,
            (LexerMode::Import, _) => SyntaxKind::Identifier,
            (_, Some(keyword)) => keyword,
            (_, None) => SyntaxKind::Identifier,
        };
        Scanned::of(kind)
    }

    fn skip_digits(&mut self) {
        while self.peek_char().map_or(false, is_digit) {
            self.advance();
        }
    }

    fn scan_hex_number(&mut self) -> Scanned {
        self.advance_by(2);
        let start = self.pos;
        while self.peek_char().map_or(false, is_hex_digit) {
            self.advance();
        }
        let mut diagnostics = Vec::new();
        if self.pos == start {
            diagnostics.push(SyntaxDiagnostic::new(messages::ERROR_MISSING_HEX_DIGIT, &[]));
        }
        Scanned::with_diagnostics(SyntaxKind::HexIntegerLiteralToken, diagnostics)
    }

    fn scan_number(&mut self) -> Scanned {
        let mut kind = SyntaxKind::DecimalIntegerLiteralToken;
        let mut diagnostics = Vec::new();
        self.skip_digits();
        if self.peek_char() == Some(DOT) && self.peek_char_at(1).map_or(false, is_digit) {
            kind = SyntaxKind::DecimalFloatingPointLiteralToken;
            self.advance();
            self.skip_digits();
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let sign = usize::from(matches!(self.peek_char_at(1), Some('+' | '-')));
            if self.peek_char_at(1 + sign).map_or(false, is_digit) {
                kind = SyntaxKind::DecimalFloatingPointLiteralToken;
                self.advance_by(1 + sign);
                self.skip_digits();
            } else if sign == 1 {
                self.advance_by(2);
                diagnostics.push(SyntaxDiagnostic::new(
                    messages::ERROR_MISSING_DIGIT_AFTER_EXPONENT,
                    &[],
                ));
            }
        }
        if matches!(self.peek_char(), Some('f' | 'F' | 'd' | 'D'))
            && !self.peek_char_at(1).map_or(false, is_identifier_part)
        {
            kind = SyntaxKind::DecimalFloatingPointLiteralToken;
            self.advance();
        }
        Scanned::with_diagnostics(kind, diagnostics)
    }

    fn scan_string(&mut self) -> Scanned {
        self.advance();
        let mut diagnostics = Vec::new();
        loop {
            match self.peek_char() {
                None => {
                    diagnostics.push(SyntaxDiagnostic::new(messages::ERROR_MISSING_DOUBLE_QUOTE, &[]));
                    break;
                }
                Some(c) if is_line_break(c) => {
                    diagnostics.push(SyntaxDiagnostic::new(messages::ERROR_MISSING_DOUBLE_QUOTE, &[]));
                    break;
                }
                Some(DOUBLE_QUOTE) => {
                    self.advance();
                    break;
                }
                Some(BACKSLASH) => {
                    self.advance();
                    self.scan_escape(&mut diagnostics);
                }
                Some(_) => self.advance(),
            }
        }
        Scanned::with_diagnostics(SyntaxKind::StringLiteralToken, diagnostics)
    }

    fn scan_escape(&mut self, diagnostics: &mut Vec<SyntaxDiagnostic>) {
        match self.peek_char() {
            Some('n' | 't' | 'r' | '\\' | '"' | '\'') => self.advance(),
            Some('u') if self.char_is(1, OPEN_BRACE) => {
                self.advance_by(2);
                let start = self.pos;
                while self.peek_char().map_or(false, is_hex_digit) {
                    self.advance();
                }
                if self.pos == start || self.peek_char() != Some(CLOSE_BRACE) {
                    diagnostics.push(SyntaxDiagnostic::new(
                        messages::ERROR_INVALID_ESCAPE_SEQUENCE,
                        &["\\u{"],
                    ));
                } else {
                    self.advance();
                }
            }
            Some(c) if !is_line_break(c) => {
                let text = format!("\\{}", c);
                diagnostics.push(SyntaxDiagnostic::new(messages::ERROR_INVALID_ESCAPE_SEQUENCE, &[&text]));
                self.advance();
            }
            _ => {}
        }
    }

    /// Consecutive `#` lines form one documentation string. The newline that
    /// ends the last line becomes trailing minutiae.
    fn scan_documentation_string(&mut self) -> Scanned {
        loop {
            while self.peek_char().map_or(false, |c| !is_line_break(c)) {
                self.advance();
            }
            let mut look = self.pos;
            if self.text.get(look) == Some(&CARRIAGE_RETURN) {
                look += 1;
            }
            if self.text.get(look) == Some(&LINE_FEED) {
                look += 1;
            }
            if look == self.pos {
                break;
            }
            while self.text.get(look).map_or(false, |c| is_whitespace(*c)) {
                look += 1;
            }
            if self.text.get(look) == Some(&HASH) {
                self.pos = look;
            } else {
                break;
            }
        }
        Scanned::of(SyntaxKind::DocumentationString)
    }

    // ========================================================================
    // Content modes
    // ========================================================================

    fn next_content_token(&mut self) -> Token {
        let mode = self.mode();
        let Some(ch) = self.peek_char() else {
            return Token::new(SyntaxKind::EofToken, "");
        };
        if ch == DOLLAR_SIGN && self.char_is(1, OPEN_BRACE) {
            self.advance_by(2);
            self.start_mode(LexerMode::Interpolation);
            return Token::new(SyntaxKind::InterpolationStartToken, "${");
        }
        match (mode, ch) {
            (LexerMode::Template | LexerMode::Regex, BACKTICK) | (LexerMode::Prompt, CLOSE_BRACE) => {
                let kind = if ch == BACKTICK {
                    SyntaxKind::BacktickToken
                } else {
                    SyntaxKind::CloseBraceToken
                };
                self.advance();
                let trailing = self.read_trailing_minutiae();
                Token::with_minutiae(kind, ch.to_string(), Vec::new(), trailing)
            }
            _ => {
                let start = self.pos;
                loop {
                    match self.peek_char() {
                        None => break,
                        Some(DOLLAR_SIGN) if self.char_is(1, OPEN_BRACE) => break,
                        Some(BACKTICK) if mode != LexerMode::Prompt => break,
                        Some(CLOSE_BRACE) if mode == LexerMode::Prompt => break,
                        Some(BACKSLASH) if mode != LexerMode::Template => self.advance_by(2),
                        Some(_) => self.advance(),
                    }
                }
                let kind = match mode {
                    LexerMode::Regex => SyntaxKind::RegexContent,
                    LexerMode::Prompt => SyntaxKind::PromptContent,
                    _ => SyntaxKind::TemplateString,
                };
                Token::new(kind, self.text_from(start))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            let kind = token.kind;
            out.push(kind);
            if kind == SyntaxKind::EofToken {
                break;
            }
        }
        out
    }

    #[test]
    fn test_gt_is_never_merged() {
        assert_eq!(
            kinds("a >> b"),
            vec![SyntaxKind::Identifier, SyntaxKind::GtToken, SyntaxKind::GtToken, SyntaxKind::Identifier, SyntaxKind::EofToken]
        );
        assert_eq!(kinds(">>>=")[0], SyntaxKind::TripleGtEqualToken);
    }

    #[test]
    fn test_range_after_integer() {
        assert_eq!(
            kinds("1...3"),
            vec![
                SyntaxKind::DecimalIntegerLiteralToken,
                SyntaxKind::EllipsisToken,
                SyntaxKind::DecimalIntegerLiteralToken,
                SyntaxKind::EofToken
            ]
        );
    }

    #[test]
    fn test_snapshot_restore() {
        let mut lexer = Lexer::new("a b");
        let snapshot = lexer.snapshot();
        let first = lexer.next_token();
        lexer.restore(snapshot);
        assert_eq!(lexer.next_token(), first);
    }

    #[test]
    fn test_interpolation_pops_on_close_brace() {
        let mut lexer = Lexer::new("x${ {a: 1} }y`");
        lexer.start_mode(LexerMode::Template);
        let mut seen = Vec::new();
        loop {
            let token = lexer.next_token();
            seen.push(token.kind);
            if matches!(token.kind, SyntaxKind::BacktickToken | SyntaxKind::EofToken) {
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                SyntaxKind::TemplateString,
                SyntaxKind::InterpolationStartToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::Identifier,
                SyntaxKind::ColonToken,
                SyntaxKind::DecimalIntegerLiteralToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::TemplateString,
                SyntaxKind::BacktickToken,
            ]
        );
        assert_eq!(lexer.mode(), LexerMode::Template);
    }
}
