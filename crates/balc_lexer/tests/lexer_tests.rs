//! Lexer integration tests.
//!
//! Covers token kinds, minutiae placement and the lossless property.

use balc_diagnostics::messages;
use balc_lexer::{Lexer, LexerMode, TokenReader};
use balc_syntax::{Minutiae, SyntaxKind, Token};

/// Helper: lex every token up to and including EOF.
fn lex_all(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == SyntaxKind::EofToken;
        tokens.push(token);
        if done {
            break;
        }
    }
    tokens
}

/// Helper: token kinds without the trailing EOF.
fn lex_kinds(source: &str) -> Vec<SyntaxKind> {
    let mut kinds: Vec<SyntaxKind> = lex_all(source).into_iter().map(|t| t.kind).collect();
    kinds.pop();
    kinds
}

fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let node: balc_syntax::SyntaxNode = token.clone().into();
        out.push_str(&node.render());
    }
    out
}

#[test]
fn test_empty_source() {
    let tokens = lex_all("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, SyntaxKind::EofToken);
}

#[test]
fn test_whitespace_only_lands_on_eof() {
    let tokens = lex_all("   \n\t  ");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].leading.len(), 3);
    assert_eq!(render(&tokens), "   \n\t  ");
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        lex_kinds("function foo returns int"),
        vec![
            SyntaxKind::FunctionKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::ReturnsKeyword,
            SyntaxKind::IntKeyword,
        ]
    );
}

#[test]
fn test_quoted_identifier() {
    let tokens = lex_all("'int");
    assert_eq!(tokens[0].kind, SyntaxKind::Identifier);
    assert_eq!(tokens[0].text, "'int");
}

#[test]
fn test_numeric_literals() {
    assert_eq!(lex_kinds("42"), vec![SyntaxKind::DecimalIntegerLiteralToken]);
    assert_eq!(lex_kinds("3.14"), vec![SyntaxKind::DecimalFloatingPointLiteralToken]);
    assert_eq!(lex_kinds("1e10"), vec![SyntaxKind::DecimalFloatingPointLiteralToken]);
    assert_eq!(lex_kinds("2.5d"), vec![SyntaxKind::DecimalFloatingPointLiteralToken]);
    assert_eq!(lex_kinds("0xFF"), vec![SyntaxKind::HexIntegerLiteralToken]);
}

#[test]
fn test_hex_without_digits() {
    let tokens = lex_all("0x");
    assert_eq!(tokens[0].kind, SyntaxKind::HexIntegerLiteralToken);
    assert_eq!(tokens[0].diagnostics[0].message, messages::ERROR_MISSING_HEX_DIGIT);
}

#[test]
fn test_string_literals() {
    let tokens = lex_all(r#""hello \"world\"""#);
    assert_eq!(tokens[0].kind, SyntaxKind::StringLiteralToken);
    assert!(tokens[0].diagnostics.is_empty());

    let tokens = lex_all("\"open\nx");
    assert_eq!(tokens[0].text, "\"open");
    assert_eq!(tokens[0].diagnostics[0].message, messages::ERROR_MISSING_DOUBLE_QUOTE);
    assert_eq!(tokens[1].text, "x");

    let tokens = lex_all(r#""\q""#);
    assert_eq!(tokens[0].diagnostics[0].message, messages::ERROR_INVALID_ESCAPE_SEQUENCE);
}

#[test]
fn test_punctuation_longest_match() {
    assert_eq!(
        lex_kinds("{| |} ?. ?: ... ..< === !== => -> ->> <- <<="),
        vec![
            SyntaxKind::OpenBracePipeToken,
            SyntaxKind::ClosePipeBraceToken,
            SyntaxKind::OptionalChainingToken,
            SyntaxKind::ElvisToken,
            SyntaxKind::EllipsisToken,
            SyntaxKind::DoubleDotLtToken,
            SyntaxKind::TripleEqualToken,
            SyntaxKind::NotDoubleEqualToken,
            SyntaxKind::RightDoubleArrowToken,
            SyntaxKind::RightArrowToken,
            SyntaxKind::SyncSendToken,
            SyntaxKind::LeftArrowToken,
            SyntaxKind::DoubleLtEqualToken,
        ]
    );
}

#[test]
fn test_greater_than_sequences() {
    assert_eq!(
        lex_kinds("a>>>b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::GtToken,
            SyntaxKind::GtToken,
            SyntaxKind::GtToken,
            SyntaxKind::Identifier,
        ]
    );
    assert_eq!(lex_kinds(">="), vec![SyntaxKind::GtEqualToken]);
    assert_eq!(lex_kinds(">>="), vec![SyntaxKind::DoubleGtEqualToken]);
}

#[test]
fn test_trailing_minutiae_stop_at_newline() {
    let tokens = lex_all("a // note\n  b");
    let a = &tokens[0];
    assert_eq!(a.trailing.len(), 3);
    assert!(a.has_trailing_newline());
    let b = &tokens[1];
    assert_eq!(b.leading, vec![Minutiae::Whitespace("  ".into())]);
}

#[test]
fn test_invalid_character() {
    let tokens = lex_all("a $ b");
    assert_eq!(tokens[1].kind, SyntaxKind::InvalidToken);
    assert_eq!(tokens[1].diagnostics[0].message, messages::ERROR_INVALID_CHARACTER);
    assert_eq!(tokens[2].text, "b");
}

#[test]
fn test_unknown_symbols_between_delimiters() {
    assert_eq!(
        lex_kinds("($)$[;]"),
        vec![
            SyntaxKind::OpenParenToken,
            SyntaxKind::InvalidToken,
            SyntaxKind::CloseParenToken,
            SyntaxKind::InvalidToken,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::SemicolonToken,
            SyntaxKind::CloseBracketToken,
        ]
    );
    let tokens = lex_all("a $ b");
    assert_eq!(render(&tokens), "a $ b");
}

#[test]
fn test_documentation_string_spans_lines() {
    let source = "# Adds.\n  # + a - first\nfunction";
    let tokens = lex_all(source);
    assert_eq!(tokens[0].kind, SyntaxKind::DocumentationString);
    assert_eq!(tokens[0].text, "# Adds.\n  # + a - first");
    assert!(tokens[0].has_trailing_newline());
    assert_eq!(tokens[1].kind, SyntaxKind::FunctionKeyword);
    assert_eq!(render(&tokens), source);
}

#[test]
fn test_import_mode_demotes_keywords() {
    let mut lexer = Lexer::new("ballerina/type as t");
    lexer.start_mode(LexerMode::Import);
    let kinds: Vec<SyntaxKind> = (0..5).map(|_| lexer.next_token().kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::SlashToken,
            SyntaxKind::Identifier,
            SyntaxKind::AsKeyword,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_template_content_keeps_whitespace() {
    let mut reader = TokenReader::new("`a ${ x } b` ;");
    assert_eq!(reader.consume().kind, SyntaxKind::BacktickToken);
    reader.start_mode(LexerMode::Template);
    let content = reader.consume();
    assert_eq!(content.kind, SyntaxKind::TemplateString);
    assert_eq!(content.text, "a ");
    assert_eq!(reader.consume().kind, SyntaxKind::InterpolationStartToken);
    assert_eq!(reader.consume().text, "x");
    assert_eq!(reader.consume().kind, SyntaxKind::CloseBraceToken);
    assert_eq!(reader.consume().text, " b");
    let close = reader.consume();
    assert_eq!(close.kind, SyntaxKind::BacktickToken);
    reader.end_mode();
    assert_eq!(reader.consume().kind, SyntaxKind::SemicolonToken);
    assert_eq!(close.trailing, vec![Minutiae::Whitespace(" ".into())]);
}

#[test]
fn test_regex_escapes_do_not_end_content() {
    let mut lexer = Lexer::new(r"a\`b`");
    lexer.start_mode(LexerMode::Regex);
    let content = lexer.next_token();
    assert_eq!(content.kind, SyntaxKind::RegexContent);
    assert_eq!(content.text, r"a\`b");
    assert_eq!(lexer.next_token().kind, SyntaxKind::BacktickToken);
}

#[test]
fn test_prompt_ends_at_close_brace() {
    let mut lexer = Lexer::new("Tell me ${n} jokes }\n");
    lexer.start_mode(LexerMode::Prompt);
    let kinds: Vec<SyntaxKind> = (0..6).map(|_| lexer.next_token().kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::PromptContent,
            SyntaxKind::InterpolationStartToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::PromptContent,
            SyntaxKind::CloseBraceToken,
        ]
    );
}

#[test]
fn test_lossless_on_mixed_source() {
    let source = "import ballerina/io;\r\n\n// comment\npublic function main() {\n\tint x = 0x1F + 2.5e3; // t\n  io:println(\"hi\\n\", x >>> 2);\n}\n";
    assert_eq!(render(&lex_all(source)), source);
}
