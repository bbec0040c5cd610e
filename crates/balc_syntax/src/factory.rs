//! Constructors for synthesised tokens and for invalid-node attachment.

use balc_diagnostics::{messages, DiagnosticMessage};

use crate::node::{Minutiae, SyntaxDiagnostic, SyntaxNode, Token};
use crate::syntax_kind::SyntaxKind;

/// The diagnostic reported when a token of `kind` had to be inserted.
pub fn missing_token_diagnostic(kind: SyntaxKind) -> SyntaxDiagnostic {
    let message = match kind {
        SyntaxKind::SemicolonToken => messages::ERROR_MISSING_SEMICOLON_TOKEN,
        SyntaxKind::ColonToken => messages::ERROR_MISSING_COLON_TOKEN,
        SyntaxKind::OpenParenToken => messages::ERROR_MISSING_OPEN_PAREN_TOKEN,
        SyntaxKind::CloseParenToken => messages::ERROR_MISSING_CLOSE_PAREN_TOKEN,
        SyntaxKind::OpenBraceToken => messages::ERROR_MISSING_OPEN_BRACE_TOKEN,
        SyntaxKind::CloseBraceToken => messages::ERROR_MISSING_CLOSE_BRACE_TOKEN,
        SyntaxKind::OpenBracketToken => messages::ERROR_MISSING_OPEN_BRACKET_TOKEN,
        SyntaxKind::CloseBracketToken => messages::ERROR_MISSING_CLOSE_BRACKET_TOKEN,
        SyntaxKind::EqualToken => messages::ERROR_MISSING_EQUAL_TOKEN,
        SyntaxKind::CommaToken => messages::ERROR_MISSING_COMMA_TOKEN,
        SyntaxKind::Identifier => messages::ERROR_MISSING_IDENTIFIER,
        SyntaxKind::GtToken => messages::ERROR_MISSING_GT_TOKEN,
        SyntaxKind::LtToken => messages::ERROR_MISSING_LT_TOKEN,
        SyntaxKind::RightDoubleArrowToken => messages::ERROR_MISSING_RIGHT_DOUBLE_ARROW_TOKEN,
        SyntaxKind::BacktickToken => messages::ERROR_MISSING_BACKTICK_TOKEN,
        SyntaxKind::DotToken => messages::ERROR_MISSING_DOT_TOKEN,
        SyntaxKind::ClosePipeBraceToken => messages::ERROR_MISSING_CLOSE_BRACE_PIPE_TOKEN,
        SyntaxKind::RightArrowToken => messages::ERROR_MISSING_RIGHT_ARROW_TOKEN,
        SyntaxKind::StringLiteralToken => messages::ERROR_MISSING_STRING_LITERAL,
        SyntaxKind::QuestionMarkToken => messages::ERROR_MISSING_QUESTION_MARK_TOKEN,
        SyntaxKind::EllipsisToken => messages::ERROR_MISSING_ELLIPSIS_TOKEN,
        SyntaxKind::AtToken => messages::ERROR_MISSING_AT_TOKEN,
        SyntaxKind::SlashToken => messages::ERROR_MISSING_SLASH_TOKEN,
        SyntaxKind::DecimalIntegerLiteralToken => messages::ERROR_MISSING_DECIMAL_INTEGER_LITERAL,
        SyntaxKind::FunctionKeyword => messages::ERROR_MISSING_FUNCTION_KEYWORD,
        SyntaxKind::EofToken => messages::ERROR_MISSING_EOF_TOKEN,
        kind if kind.is_keyword() => {
            let text = kind.fixed_text().unwrap_or("keyword");
            return SyntaxDiagnostic::new(messages::ERROR_MISSING_KEYWORD, &[text]);
        }
        kind => {
            let text = kind.fixed_text().unwrap_or("token");
            return SyntaxDiagnostic::new(messages::ERROR_MISSING_TOKEN, &[text]);
        }
    };
    SyntaxDiagnostic::new(message, &[])
}

/// A zero-width token of `kind` with the standard missing-token diagnostic.
pub fn missing_token(kind: SyntaxKind) -> Token {
    Token::missing(kind, missing_token_diagnostic(kind))
}

/// A zero-width token with a specific diagnostic, e.g. a missing identifier
/// that stands in for a whole type or expression.
pub fn missing_token_with(kind: SyntaxKind, message: DiagnosticMessage) -> Token {
    Token::missing(kind, SyntaxDiagnostic::new(message, &[]))
}

/// A missing simple name, used where an expression is required.
pub fn missing_expression() -> SyntaxNode {
    SyntaxNode::node(
        SyntaxKind::SimpleNameReference,
        vec![missing_token_with(SyntaxKind::Identifier, messages::ERROR_MISSING_EXPRESSION).into()],
    )
}

/// A missing type reference, used where a type descriptor is required.
pub fn missing_type_desc() -> SyntaxNode {
    SyntaxNode::node(
        SyntaxKind::SimpleNameReference,
        vec![missing_token_with(SyntaxKind::Identifier, messages::ERROR_MISSING_TYPE_DESC).into()],
    )
}

/// Mark a node as invalid: its first token gets the invalid-token
/// diagnostic, naming the node's text.
pub fn into_invalid_node(mut node: SyntaxNode, message: DiagnosticMessage) -> SyntaxNode {
    let text = node.render();
    let label = text.trim().to_string();
    if let Some(token) = node.first_token_mut() {
        token.add_diagnostic(SyntaxDiagnostic::new(message, &[&label]));
    }
    node
}

/// Prepend invalid nodes to the leading minutiae of `target`, in order.
pub fn prepend_invalid_nodes(target: &mut Token, invalid: Vec<SyntaxNode>) {
    if invalid.is_empty() {
        return;
    }
    let mut leading: Vec<Minutiae> = invalid
        .into_iter()
        .map(|node| Minutiae::InvalidNode(Box::new(node)))
        .collect();
    leading.append(&mut target.leading);
    target.leading = leading;
}

/// Append invalid nodes to the trailing minutiae of `target`, in order.
pub fn append_invalid_nodes(target: &mut Token, invalid: Vec<SyntaxNode>) {
    target.trailing.extend(
        invalid
            .into_iter()
            .map(|node| Minutiae::InvalidNode(Box::new(node))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_semicolon() {
        let token = missing_token(SyntaxKind::SemicolonToken);
        assert!(token.is_missing);
        assert_eq!(token.diagnostics[0].message, messages::ERROR_MISSING_SEMICOLON_TOKEN);
    }

    #[test]
    fn test_missing_keyword_names_the_keyword() {
        let diag = missing_token_diagnostic(SyntaxKind::ReturnsKeyword);
        assert_eq!(diag.message_text(), "missing 'returns' keyword");
    }

    #[test]
    fn test_missing_generic_punctuation() {
        let diag = missing_token_diagnostic(SyntaxKind::ElvisToken);
        assert_eq!(diag.message_text(), "missing '?:'");
    }

    #[test]
    fn test_prepend_keeps_order() {
        let mut target = Token::with_minutiae(
            SyntaxKind::SemicolonToken,
            ";",
            vec![Minutiae::Whitespace(" ".into())],
            vec![],
        );
        let a = into_invalid_node(Token::new(SyntaxKind::Identifier, "a").into(), messages::ERROR_INVALID_TOKEN);
        let b = into_invalid_node(Token::new(SyntaxKind::Identifier, "b").into(), messages::ERROR_INVALID_TOKEN);
        prepend_invalid_nodes(&mut target, vec![a, b]);
        let node: SyntaxNode = target.into();
        assert_eq!(node.render(), "ab ;");
        assert_eq!(node.diagnostics().len(), 2);
    }
}
