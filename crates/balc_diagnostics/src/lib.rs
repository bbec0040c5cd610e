//! balc_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Syntax diagnostics are attached to tokens and nodes while parsing. This
//! crate defines the catalog of codes they refer to and the realised
//! `Diagnostic` form handed to downstream consumers.

use balc_core::text::{LineAndColumn, TextSpan};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Error,
    Warning,
    Hint,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Hint => write!(f, "hint"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// The printable identifier, e.g. `BCE0002`.
    pub fn id(&self) -> String {
        format!("BCE{:04}", self.code)
    }
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub file: Option<String>,
    pub span: Option<TextSpan>,
    /// Line and column of `span.start`, when known.
    pub position: Option<LineAndColumn>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            position: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a new diagnostic located at `span`.
    pub fn with_span(
        span: TextSpan,
        position: LineAndColumn,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            span: Some(span),
            position: Some(position),
            ..Self::new(message, args)
        }
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(position) = self.position {
                write!(f, ":{}", position)?;
            }
            write!(f, ": ")?;
        }
        write!(
            f,
            "{} BCE{:04}: {}",
            self.category, self.code, self.message_text
        )
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated for one syntax tree.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Codes in collection order, handy for assertions.
    pub fn codes(&self) -> Vec<u32> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }

}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
        ($code:expr, Hint, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Hint, message: $msg }
        };
    }

    // ========================================================================
    // Missing tokens and nodes (0000-0099)
    // ========================================================================
    pub const ERROR_MISSING_TOKEN: DiagnosticMessage = diag!(1, Error, "missing '{0}'");
    pub const ERROR_MISSING_SEMICOLON_TOKEN: DiagnosticMessage = diag!(2, Error, "missing semicolon token");
    pub const ERROR_MISSING_COLON_TOKEN: DiagnosticMessage = diag!(3, Error, "missing colon token");
    pub const ERROR_MISSING_OPEN_PAREN_TOKEN: DiagnosticMessage = diag!(4, Error, "missing open parenthesis token");
    pub const ERROR_MISSING_CLOSE_PAREN_TOKEN: DiagnosticMessage = diag!(5, Error, "missing close parenthesis token");
    pub const ERROR_MISSING_OPEN_BRACE_TOKEN: DiagnosticMessage = diag!(6, Error, "missing open brace token");
    pub const ERROR_MISSING_CLOSE_BRACE_TOKEN: DiagnosticMessage = diag!(7, Error, "missing close brace token");
    pub const ERROR_MISSING_OPEN_BRACKET_TOKEN: DiagnosticMessage = diag!(8, Error, "missing open bracket token");
    pub const ERROR_MISSING_CLOSE_BRACKET_TOKEN: DiagnosticMessage = diag!(9, Error, "missing close bracket token");
    pub const ERROR_MISSING_EQUAL_TOKEN: DiagnosticMessage = diag!(10, Error, "missing equal token");
    pub const ERROR_MISSING_COMMA_TOKEN: DiagnosticMessage = diag!(11, Error, "missing comma token");
    pub const ERROR_MISSING_IDENTIFIER: DiagnosticMessage = diag!(12, Error, "missing identifier");
    pub const ERROR_MISSING_TYPE_DESC: DiagnosticMessage = diag!(13, Error, "missing type descriptor");
    pub const ERROR_MISSING_EXPRESSION: DiagnosticMessage = diag!(14, Error, "missing expression");
    pub const ERROR_MISSING_BINDING_PATTERN: DiagnosticMessage = diag!(15, Error, "missing binding pattern");
    pub const ERROR_MISSING_GT_TOKEN: DiagnosticMessage = diag!(16, Error, "missing greater than token");
    pub const ERROR_MISSING_LT_TOKEN: DiagnosticMessage = diag!(17, Error, "missing less than token");
    pub const ERROR_MISSING_RIGHT_DOUBLE_ARROW_TOKEN: DiagnosticMessage = diag!(18, Error, "missing right double arrow token");
    pub const ERROR_MISSING_BACKTICK_TOKEN: DiagnosticMessage = diag!(19, Error, "missing backtick token");
    pub const ERROR_MISSING_KEYWORD: DiagnosticMessage = diag!(20, Error, "missing '{0}' keyword");
    pub const ERROR_MISSING_DOT_TOKEN: DiagnosticMessage = diag!(21, Error, "missing dot token");
    pub const ERROR_MISSING_CLOSE_BRACE_PIPE_TOKEN: DiagnosticMessage = diag!(22, Error, "missing close brace pipe token");
    pub const ERROR_MISSING_RIGHT_ARROW_TOKEN: DiagnosticMessage = diag!(23, Error, "missing right arrow token");
    pub const ERROR_MISSING_STRING_LITERAL: DiagnosticMessage = diag!(24, Error, "missing string literal");
    pub const ERROR_MISSING_MATCH_PATTERN: DiagnosticMessage = diag!(25, Error, "missing match pattern");
    pub const ERROR_MISSING_SELECT_CLAUSE: DiagnosticMessage = diag!(26, Error, "missing select clause");
    pub const ERROR_MISSING_QUESTION_MARK_TOKEN: DiagnosticMessage = diag!(27, Error, "missing question mark token");
    pub const ERROR_MISSING_ELLIPSIS_TOKEN: DiagnosticMessage = diag!(28, Error, "missing ellipsis token");
    pub const ERROR_MISSING_AT_TOKEN: DiagnosticMessage = diag!(29, Error, "missing at token");
    pub const ERROR_MISSING_SLASH_TOKEN: DiagnosticMessage = diag!(30, Error, "missing slash token");
    pub const ERROR_MISSING_DECIMAL_INTEGER_LITERAL: DiagnosticMessage = diag!(31, Error, "missing decimal integer literal");
    pub const ERROR_MISSING_FUNCTION_KEYWORD: DiagnosticMessage = diag!(32, Error, "missing function keyword");
    pub const ERROR_MISSING_EOF_TOKEN: DiagnosticMessage = diag!(33, Error, "missing end of file");

    // ========================================================================
    // Unexpected tokens and construct errors (0100-0199)
    // ========================================================================
    pub const ERROR_INVALID_TOKEN: DiagnosticMessage = diag!(100, Error, "invalid token '{0}'");
    pub const ERROR_DUPLICATE_QUALIFIER: DiagnosticMessage = diag!(101, Error, "duplicate qualifier '{0}'");
    pub const ERROR_QUALIFIER_NOT_ALLOWED: DiagnosticMessage = diag!(102, Error, "qualifier '{0}' not allowed here");
    pub const ERROR_NO_WHITESPACES_ALLOWED_IN_RIGHT_SHIFT_OP: DiagnosticMessage = diag!(103, Error, "no whitespaces allowed between >>");
    pub const ERROR_NO_WHITESPACES_ALLOWED_IN_UNSIGNED_RIGHT_SHIFT_OP: DiagnosticMessage = diag!(104, Error, "no whitespaces allowed between >>>");
    pub const ERROR_ACTION_NOT_ALLOWED_HERE: DiagnosticMessage = diag!(105, Error, "expression expected, found action");
    pub const ERROR_EXPRESSION_TOO_DEEPLY_NESTED: DiagnosticMessage = diag!(106, Error, "expression nesting exceeds the maximum depth of {0}");
    pub const ERROR_INVALID_QUALIFIED_NAME: DiagnosticMessage = diag!(107, Error, "no whitespaces allowed in a qualified name");
    pub const ERROR_REST_ARG_FOLLOWED_BY_ANOTHER_ARG: DiagnosticMessage = diag!(108, Error, "rest argument must be the last argument");
    pub const ERROR_INVALID_ARRAY_LENGTH: DiagnosticMessage = diag!(109, Error, "invalid array length");

    // ========================================================================
    // Lexer errors (0200-0299)
    // ========================================================================
    pub const ERROR_MISSING_DOUBLE_QUOTE: DiagnosticMessage = diag!(200, Error, "missing double quote");
    pub const ERROR_INVALID_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(201, Error, "invalid escape sequence '{0}'");
    pub const ERROR_MISSING_HEX_DIGIT: DiagnosticMessage = diag!(202, Error, "missing hex digit after '0x'");
    pub const ERROR_INVALID_CHARACTER: DiagnosticMessage = diag!(203, Error, "invalid character '{0}'");
    pub const ERROR_MISSING_DIGIT_AFTER_EXPONENT: DiagnosticMessage = diag!(204, Error, "missing digit after exponent indicator");

    // ========================================================================
    // Documentation warnings (0300-0399)
    // ========================================================================
    pub const WARNING_MISSING_PARAMETER_NAME: DiagnosticMessage = diag!(300, Warning, "missing parameter name");
    pub const WARNING_MISSING_HYPHEN_TOKEN: DiagnosticMessage = diag!(301, Warning, "missing hyphen token");
    pub const WARNING_MISSING_SINGLE_BACKTICK_TOKEN: DiagnosticMessage = diag!(302, Warning, "missing backtick token");
    pub const WARNING_MISSING_CODE_REFERENCE: DiagnosticMessage = diag!(303, Warning, "missing code reference");
    pub const WARNING_MISSING_DOUBLE_BACKTICK_TOKEN: DiagnosticMessage = diag!(304, Warning, "missing double backtick token");
    pub const WARNING_MISSING_TRIPLE_BACKTICK_TOKEN: DiagnosticMessage = diag!(305, Warning, "missing triple backtick token");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let result = format_message("invalid token '{0}'", &["$"]);
        assert_eq!(result, "invalid token '$'");
    }

    #[test]
    fn test_message_id() {
        assert_eq!(messages::ERROR_MISSING_SEMICOLON_TOKEN.id(), "BCE0002");
        assert_eq!(messages::ERROR_INVALID_TOKEN.id(), "BCE0100");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::with_span(
            TextSpan::new(4, 0),
            LineAndColumn { line: 0, column: 4 },
            &messages::ERROR_MISSING_SEMICOLON_TOKEN,
            &[],
        )
        .in_file("main.bal");
        assert_eq!(
            diag.to_string(),
            "main.bal:1:5: error BCE0002: missing semicolon token"
        );
    }

    #[test]
    fn test_diagnostic_collection() {
        let mut collection = DiagnosticCollection::new();
        assert!(collection.is_empty());

        collection.add(Diagnostic::new(&messages::WARNING_MISSING_HYPHEN_TOKEN, &[]));
        assert!(!collection.has_errors());

        collection.add(Diagnostic::new(&messages::ERROR_INVALID_TOKEN, &[")"]));
        assert!(collection.has_errors());
        assert_eq!(collection.error_count(), 1);
        assert_eq!(collection.codes(), vec![301, 100]);
    }
}
