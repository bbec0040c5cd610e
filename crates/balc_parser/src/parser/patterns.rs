//! Binding patterns and match patterns.

use balc_diagnostics::messages;
use balc_syntax::factory::missing_token_with;
use balc_syntax::{SyntaxKind, SyntaxNode};

use super::types::is_literal_token;
use super::Parser;
use crate::context::ParserRuleContext;
use crate::recovery::Action;

pub(super) fn is_binding_pattern_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::ErrorKeyword
    )
}

fn is_list_binding_member_start(kind: SyntaxKind) -> bool {
    is_binding_pattern_start(kind) || kind == SyntaxKind::EllipsisToken
}

pub(super) fn is_match_pattern_start(kind: SyntaxKind) -> bool {
    is_literal_token(kind)
        || matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::VarKeyword
                | SyntaxKind::MinusToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::ErrorKeyword
        )
}

fn is_list_match_member_start(kind: SyntaxKind) -> bool {
    is_match_pattern_start(kind) || kind == SyntaxKind::EllipsisToken
}

impl Parser {
    // ========================================================================
    // Binding patterns
    // ========================================================================

    /// `T bp` or `var bp`.
    pub(super) fn parse_typed_binding_pattern(&mut self) -> SyntaxNode {
        let ty = if self.at(SyntaxKind::VarKeyword) {
            let var = self.consume_node();
            SyntaxNode::node(SyntaxKind::BuiltinSimpleTypeDesc, vec![var])
        } else {
            self.parse_type_descriptor()
        };
        let pattern = self.parse_binding_pattern();
        SyntaxNode::node(SyntaxKind::TypedBindingPattern, vec![ty, pattern])
    }

    pub(super) fn parse_binding_pattern(&mut self) -> SyntaxNode {
        self.nested(|p| {
            p.start_context(ParserRuleContext::BindingPattern);
            let pattern = p.parse_binding_pattern_inner();
            p.end_context();
            pattern
        })
    }

    fn parse_binding_pattern_inner(&mut self) -> SyntaxNode {
        loop {
            return match self.peek_kind() {
                SyntaxKind::Identifier => self.parse_capture_binding_pattern(),
                SyntaxKind::OpenBracketToken => self.parse_list_binding_pattern(),
                SyntaxKind::OpenBraceToken => self.parse_mapping_binding_pattern(),
                SyntaxKind::ErrorKeyword => self.parse_error_binding_pattern(),
                _ => match self.recover(None).action {
                    Action::Remove => continue,
                    _ => {
                        let name = missing_token_with(SyntaxKind::Identifier, messages::ERROR_MISSING_BINDING_PATTERN);
                        SyntaxNode::node(SyntaxKind::CaptureBindingPattern, vec![name.into()])
                    }
                },
            };
        }
    }

    /// `x`, or `_` which binds nothing.
    fn parse_capture_binding_pattern(&mut self) -> SyntaxNode {
        let name = self.consume();
        let kind = if name.text == "_" {
            SyntaxKind::WildcardBindingPattern
        } else {
            SyntaxKind::CaptureBindingPattern
        };
        SyntaxNode::node(kind, vec![name.into()])
    }

    fn parse_rest_binding_pattern(&mut self) -> SyntaxNode {
        let ellipsis = self.consume_node();
        let name = self.expect_node(SyntaxKind::Identifier);
        SyntaxNode::node(SyntaxKind::RestBindingPattern, vec![ellipsis, name])
    }

    fn parse_list_binding_pattern(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::ListBindingPattern);
        let open = self.consume_node();
        let members = self.parse_separated_list(
            SyntaxKind::CloseBracketToken,
            is_list_binding_member_start,
            |p| {
                if p.at(SyntaxKind::EllipsisToken) {
                    p.parse_rest_binding_pattern()
                } else {
                    p.parse_binding_pattern()
                }
            },
        );
        let close = self.expect_node(SyntaxKind::CloseBracketToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::ListBindingPattern, vec![open, members, close])
    }

    fn parse_mapping_binding_pattern(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::MappingBindingPattern);
        let open = self.consume_node();
        let fields = self.parse_separated_list(
            SyntaxKind::CloseBraceToken,
            |kind| matches!(kind, SyntaxKind::Identifier | SyntaxKind::EllipsisToken),
            |p| {
                if p.at(SyntaxKind::EllipsisToken) {
                    return p.parse_rest_binding_pattern();
                }
                let name = p.consume_node();
                let name = SyntaxNode::node(SyntaxKind::SimpleNameReference, vec![name]);
                let (colon, pattern) = match p.optional(SyntaxKind::ColonToken) {
                    Some(colon) => (colon.into(), p.parse_binding_pattern()),
                    None => (SyntaxNode::Empty, SyntaxNode::Empty),
                };
                SyntaxNode::node(SyntaxKind::FieldBindingPattern, vec![name, colon, pattern])
            },
        );
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::MappingBindingPattern, vec![open, fields, close])
    }

    /// `error(msg, cause, code = c)`, `error MyError(msg)`.
    fn parse_error_binding_pattern(&mut self) -> SyntaxNode {
        let error = self.consume_node();
        let ty = if self.at(SyntaxKind::Identifier) {
            self.parse_type_reference()
        } else {
            SyntaxNode::Empty
        };
        self.start_context(ParserRuleContext::ErrorBindingPattern);
        let open = self.expect_node(SyntaxKind::OpenParenToken);
        let args = self.parse_separated_list(
            SyntaxKind::CloseParenToken,
            is_list_binding_member_start,
            |p| match p.peek_kind() {
                SyntaxKind::EllipsisToken => p.parse_rest_binding_pattern(),
                SyntaxKind::Identifier if p.peek_kind_n(2) == SyntaxKind::EqualToken => {
                    let name = p.consume_node();
                    let equal = p.consume_node();
                    let pattern = p.parse_binding_pattern();
                    SyntaxNode::node(SyntaxKind::NamedArgBindingPattern, vec![name, equal, pattern])
                }
                _ => p.parse_binding_pattern(),
            },
        );
        let close = self.expect_node(SyntaxKind::CloseParenToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::ErrorBindingPattern, vec![error, ty, open, args, close])
    }

    // ========================================================================
    // Match patterns
    // ========================================================================

    pub(super) fn parse_match_pattern(&mut self) -> SyntaxNode {
        self.nested(|p| {
            p.start_context(ParserRuleContext::MatchPattern);
            let pattern = p.parse_match_pattern_inner();
            p.end_context();
            pattern
        })
    }

    fn parse_match_pattern_inner(&mut self) -> SyntaxNode {
        loop {
            let kind = self.peek_kind();
            return match kind {
                SyntaxKind::VarKeyword => {
                    let var = self.consume_node();
                    let ty = SyntaxNode::node(SyntaxKind::BuiltinSimpleTypeDesc, vec![var]);
                    let pattern = self.parse_binding_pattern();
                    SyntaxNode::node(SyntaxKind::TypedBindingPattern, vec![ty, pattern])
                }
                SyntaxKind::Identifier if self.peek().text == "_" => {
                    let underscore = self.consume_node();
                    SyntaxNode::node(SyntaxKind::WildcardBindingPattern, vec![underscore])
                }
                SyntaxKind::Identifier => self.parse_name_reference(),
                kind if is_literal_token(kind) => {
                    let literal = self.consume_node();
                    SyntaxNode::node(SyntaxKind::BasicLiteral, vec![literal])
                }
                SyntaxKind::MinusToken
                    if matches!(
                        self.peek_kind_n(2),
                        SyntaxKind::DecimalIntegerLiteralToken
                            | SyntaxKind::HexIntegerLiteralToken
                            | SyntaxKind::DecimalFloatingPointLiteralToken
                    ) =>
                {
                    let minus = self.consume_node();
                    let literal = self.consume_node();
                    let literal = SyntaxNode::node(SyntaxKind::BasicLiteral, vec![literal]);
                    SyntaxNode::node(SyntaxKind::UnaryExpression, vec![minus, literal])
                }
                SyntaxKind::OpenParenToken if self.peek_kind_n(2) == SyntaxKind::CloseParenToken => {
                    let open = self.consume_node();
                    let close = self.consume_node();
                    SyntaxNode::node(SyntaxKind::NilLiteral, vec![open, close])
                }
                SyntaxKind::OpenBracketToken => self.parse_list_match_pattern(),
                SyntaxKind::OpenBraceToken => self.parse_mapping_match_pattern(),
                SyntaxKind::ErrorKeyword => self.parse_error_match_pattern(),
                _ => match self.recover(None).action {
                    Action::Remove => continue,
                    _ => {
                        let name = missing_token_with(SyntaxKind::Identifier, messages::ERROR_MISSING_MATCH_PATTERN);
                        SyntaxNode::node(SyntaxKind::SimpleNameReference, vec![name.into()])
                    }
                },
            };
        }
    }

    /// `...var rest`.
    fn parse_rest_match_pattern(&mut self) -> SyntaxNode {
        let ellipsis = self.consume_node();
        let var = self.expect_node(SyntaxKind::VarKeyword);
        let name = self.expect_node(SyntaxKind::Identifier);
        SyntaxNode::node(SyntaxKind::RestMatchPattern, vec![ellipsis, var, name])
    }

    fn parse_list_match_pattern(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::ListBindingPattern);
        let open = self.consume_node();
        let members = self.parse_separated_list(
            SyntaxKind::CloseBracketToken,
            is_list_match_member_start,
            |p| {
                if p.at(SyntaxKind::EllipsisToken) {
                    p.parse_rest_match_pattern()
                } else {
                    p.parse_match_pattern()
                }
            },
        );
        let close = self.expect_node(SyntaxKind::CloseBracketToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::ListMatchPattern, vec![open, members, close])
    }

    fn parse_mapping_match_pattern(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::MappingBindingPattern);
        let open = self.consume_node();
        let fields = self.parse_separated_list(
            SyntaxKind::CloseBraceToken,
            |kind| matches!(kind, SyntaxKind::Identifier | SyntaxKind::EllipsisToken),
            |p| {
                if p.at(SyntaxKind::EllipsisToken) {
                    return p.parse_rest_match_pattern();
                }
                let name = p.consume_node();
                let colon = p.expect_node(SyntaxKind::ColonToken);
                let pattern = p.parse_match_pattern();
                SyntaxNode::node(SyntaxKind::FieldMatchPattern, vec![name, colon, pattern])
            },
        );
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::MappingMatchPattern, vec![open, fields, close])
    }

    fn parse_error_match_pattern(&mut self) -> SyntaxNode {
        let error = self.consume_node();
        let ty = if self.at(SyntaxKind::Identifier) {
            self.parse_type_reference()
        } else {
            SyntaxNode::Empty
        };
        self.start_context(ParserRuleContext::ErrorBindingPattern);
        let open = self.expect_node(SyntaxKind::OpenParenToken);
        let args = self.parse_separated_list(
            SyntaxKind::CloseParenToken,
            is_list_match_member_start,
            |p| match p.peek_kind() {
                SyntaxKind::EllipsisToken => p.parse_rest_match_pattern(),
                SyntaxKind::Identifier if p.peek_kind_n(2) == SyntaxKind::EqualToken => {
                    let name = p.consume_node();
                    let equal = p.consume_node();
                    let pattern = p.parse_match_pattern();
                    SyntaxNode::node(SyntaxKind::NamedArgMatchPattern, vec![name, equal, pattern])
                }
                _ => p.parse_match_pattern(),
            },
        );
        let close = self.expect_node(SyntaxKind::CloseParenToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::ErrorMatchPattern, vec![error, ty, open, args, close])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(source: &str) -> SyntaxNode {
        Parser::new(source).parse_binding_pattern()
    }

    fn pattern(source: &str) -> SyntaxNode {
        Parser::new(source).parse_match_pattern()
    }

    #[test]
    fn test_capture_and_wildcard() {
        assert_eq!(binding("x").kind(), SyntaxKind::CaptureBindingPattern);
        assert_eq!(binding("_").kind(), SyntaxKind::WildcardBindingPattern);
    }

    #[test]
    fn test_nested_list_binding_pattern() {
        let node = binding("[a, [b, c], ...rest]");
        assert_eq!(node.kind(), SyntaxKind::ListBindingPattern);
        let members = node.child(1);
        assert_eq!(members.child(2).kind(), SyntaxKind::ListBindingPattern);
        assert_eq!(members.child(4).kind(), SyntaxKind::RestBindingPattern);
    }

    #[test]
    fn test_mapping_binding_pattern_fields() {
        let node = binding("{name, age: a, ...others}");
        assert_eq!(node.kind(), SyntaxKind::MappingBindingPattern);
        let fields = node.child(1);
        assert_eq!(fields.child(0).kind(), SyntaxKind::FieldBindingPattern);
        assert!(fields.child(0).child(1).is_empty());
        assert_eq!(fields.child(2).child(2).kind(), SyntaxKind::CaptureBindingPattern);
    }

    #[test]
    fn test_error_binding_pattern_named_arg() {
        let node = binding("error(msg, code = c)");
        assert_eq!(node.kind(), SyntaxKind::ErrorBindingPattern);
        assert_eq!(node.child(3).child(2).kind(), SyntaxKind::NamedArgBindingPattern);
    }

    #[test]
    fn test_missing_binding_pattern() {
        let node = binding(";");
        assert_eq!(node.kind(), SyntaxKind::CaptureBindingPattern);
        assert_eq!(node.diagnostics()[0].code(), 15);
    }

    #[test]
    fn test_match_patterns() {
        assert_eq!(pattern("1").kind(), SyntaxKind::BasicLiteral);
        assert_eq!(pattern("-1").kind(), SyntaxKind::UnaryExpression);
        assert_eq!(pattern("()").kind(), SyntaxKind::NilLiteral);
        assert_eq!(pattern("var x").kind(), SyntaxKind::TypedBindingPattern);
        assert_eq!(pattern("_").kind(), SyntaxKind::WildcardBindingPattern);
        assert_eq!(pattern("[1, ...var r]").kind(), SyntaxKind::ListMatchPattern);
        assert_eq!(pattern("{a: 1}").kind(), SyntaxKind::MappingMatchPattern);
        assert_eq!(pattern("error(var m)").kind(), SyntaxKind::ErrorMatchPattern);
    }
}
