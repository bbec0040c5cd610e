//! Type descriptors.

use balc_syntax::factory::missing_type_desc;
use balc_syntax::{SyntaxKind, SyntaxNode};

use super::qualifiers::{FUNCTION_TYPE_QUALIFIERS, OBJECT_TYPE_QUALIFIERS};
use super::Parser;
use crate::context::ParserRuleContext;
use crate::recovery::Action;

/// Tokens that can begin a type descriptor.
pub(super) fn is_type_start(kind: SyntaxKind) -> bool {
    kind.is_type_keyword()
        || matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::RecordKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::DistinctKeyword
                | SyntaxKind::IsolatedKeyword
                | SyntaxKind::ClientKeyword
                | SyntaxKind::TransactionalKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::DecimalIntegerLiteralToken
                | SyntaxKind::HexIntegerLiteralToken
                | SyntaxKind::DecimalFloatingPointLiteralToken
                | SyntaxKind::StringLiteralToken
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::MinusToken
        )
}

/// Types that take an optional `<T>` parameter.
fn is_parameterized_type_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::MapKeyword
            | SyntaxKind::FutureKeyword
            | SyntaxKind::TypedescKeyword
            | SyntaxKind::XmlKeyword
            | SyntaxKind::ErrorKeyword
    )
}

pub(super) fn is_literal_token(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::DecimalIntegerLiteralToken
            | SyntaxKind::HexIntegerLiteralToken
            | SyntaxKind::DecimalFloatingPointLiteralToken
            | SyntaxKind::StringLiteralToken
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
    )
}

impl Parser {
    /// Parse a full type descriptor, unions included.
    pub(super) fn parse_type_descriptor(&mut self) -> SyntaxNode {
        self.nested(|p| {
            p.start_context(ParserRuleContext::TypeDescriptor);
            let ty = p.parse_union_type();
            p.end_context();
            ty
        })
    }

    fn parse_union_type(&mut self) -> SyntaxNode {
        let mut lhs = self.parse_intersection_type();
        while self.at(SyntaxKind::PipeToken) {
            let pipe = self.consume_node();
            let rhs = self.parse_intersection_type();
            lhs = SyntaxNode::node(SyntaxKind::UnionTypeDesc, vec![lhs, pipe, rhs]);
        }
        lhs
    }

    fn parse_intersection_type(&mut self) -> SyntaxNode {
        let mut lhs = self.parse_postfix_type();
        while self.at(SyntaxKind::BitwiseAndToken) {
            let amp = self.consume_node();
            let rhs = self.parse_postfix_type();
            lhs = SyntaxNode::node(SyntaxKind::IntersectionTypeDesc, vec![lhs, amp, rhs]);
        }
        lhs
    }

    /// A primary type followed by any number of `[n]` and `?` suffixes.
    pub(super) fn parse_postfix_type(&mut self) -> SyntaxNode {
        let primary = self.parse_type_primary();
        self.parse_type_suffixes(primary)
    }

    pub(super) fn parse_type_suffixes(&mut self, mut ty: SyntaxNode) -> SyntaxNode {
        loop {
            match self.peek_kind() {
                SyntaxKind::OpenBracketToken => ty = self.parse_array_dimension(ty),
                SyntaxKind::QuestionMarkToken => {
                    let question = self.consume_node();
                    ty = SyntaxNode::node(SyntaxKind::OptionalTypeDesc, vec![ty, question]);
                }
                _ => return ty,
            }
        }
    }

    fn parse_array_dimension(&mut self, member: SyntaxNode) -> SyntaxNode {
        let open = self.consume_node();
        let length = match self.peek_kind() {
            SyntaxKind::DecimalIntegerLiteralToken | SyntaxKind::HexIntegerLiteralToken => {
                let literal = self.consume_node();
                SyntaxNode::node(SyntaxKind::BasicLiteral, vec![literal])
            }
            SyntaxKind::AsteriskToken => self.consume_node(),
            SyntaxKind::Identifier => self.parse_type_reference(),
            _ => SyntaxNode::Empty,
        };
        let close = self.expect_node(SyntaxKind::CloseBracketToken);
        SyntaxNode::node(SyntaxKind::ArrayTypeDesc, vec![member, open, length, close])
    }

    fn parse_type_primary(&mut self) -> SyntaxNode {
        loop {
            let kind = self.peek_kind();
            match kind {
                SyntaxKind::StreamKeyword => return self.parse_stream_type(),
                SyntaxKind::TableKeyword => return self.parse_table_type(),
                kind if is_parameterized_type_keyword(kind) => return self.parse_parameterized_type(),
                kind if kind.is_type_keyword() || kind == SyntaxKind::ReadonlyKeyword => {
                    let keyword = self.consume_node();
                    return SyntaxNode::node(SyntaxKind::BuiltinSimpleTypeDesc, vec![keyword]);
                }
                SyntaxKind::Identifier => return self.parse_type_reference(),
                SyntaxKind::OpenParenToken => return self.parse_nil_or_parenthesised_type(),
                SyntaxKind::OpenBracketToken => return self.parse_tuple_type(),
                SyntaxKind::RecordKeyword => return self.parse_record_type(),
                SyntaxKind::DistinctKeyword => {
                    let distinct = self.consume_node();
                    let ty = self.parse_postfix_type();
                    return SyntaxNode::node(SyntaxKind::DistinctTypeDesc, vec![distinct, ty]);
                }
                SyntaxKind::ObjectKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::IsolatedKeyword
                | SyntaxKind::ClientKeyword
                | SyntaxKind::TransactionalKeyword => return self.parse_qualified_object_or_function_type(),
                kind if is_literal_token(kind) => {
                    let literal = self.consume_node();
                    let literal = SyntaxNode::node(SyntaxKind::BasicLiteral, vec![literal]);
                    return SyntaxNode::node(SyntaxKind::SingletonTypeDesc, vec![literal]);
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
                    let negated = SyntaxNode::node(SyntaxKind::UnaryExpression, vec![minus, literal]);
                    return SyntaxNode::node(SyntaxKind::SingletonTypeDesc, vec![negated]);
                }
                _ => match self.recover(None).action {
                    Action::Remove => continue,
                    _ => return missing_type_desc(),
                },
            }
        }
    }

    /// `name` or `module:name`.
    pub(super) fn parse_type_reference(&mut self) -> SyntaxNode {
        if self.is_qualified_name_ahead() {
            return self.parse_qualified_name();
        }
        let name = self.expect_node(SyntaxKind::Identifier);
        SyntaxNode::node(SyntaxKind::SimpleNameReference, vec![name])
    }

    /// `<T>`.
    pub(super) fn parse_type_parameter(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::TypeParameter);
        let lt = self.expect_node(SyntaxKind::LtToken);
        let ty = self.parse_type_descriptor();
        let gt = self.expect_node(SyntaxKind::GtToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::TypeParameter, vec![lt, ty, gt])
    }

    fn parse_optional_type_parameter(&mut self) -> SyntaxNode {
        if self.at(SyntaxKind::LtToken) {
            self.parse_type_parameter()
        } else {
            SyntaxNode::Empty
        }
    }

    fn parse_parameterized_type(&mut self) -> SyntaxNode {
        let keyword = self.consume_node();
        let parameter = if keyword.kind() == SyntaxKind::MapKeyword {
            self.parse_type_parameter()
        } else {
            self.parse_optional_type_parameter()
        };
        SyntaxNode::node(SyntaxKind::ParameterizedTypeDesc, vec![keyword, parameter])
    }

    fn parse_stream_type(&mut self) -> SyntaxNode {
        let stream = self.consume_node();
        if !self.at(SyntaxKind::LtToken) {
            return SyntaxNode::node(SyntaxKind::StreamTypeDesc, vec![stream, SyntaxNode::Empty]);
        }
        self.start_context(ParserRuleContext::TypeParameter);
        let lt = self.consume_node();
        let value = self.parse_type_descriptor();
        let (comma, completion) = match self.optional(SyntaxKind::CommaToken) {
            Some(comma) => (comma.into(), self.parse_type_descriptor()),
            None => (SyntaxNode::Empty, SyntaxNode::Empty),
        };
        let gt = self.expect_node(SyntaxKind::GtToken);
        self.end_context();
        let params = SyntaxNode::node(SyntaxKind::StreamTypeParams, vec![lt, value, comma, completion, gt]);
        SyntaxNode::node(SyntaxKind::StreamTypeDesc, vec![stream, params])
    }

    fn parse_table_type(&mut self) -> SyntaxNode {
        let table = self.consume_node();
        let row = self.parse_type_parameter();
        let key = if self.at(SyntaxKind::KeyKeyword) {
            self.parse_key_specifier()
        } else {
            SyntaxNode::Empty
        };
        SyntaxNode::node(SyntaxKind::TableTypeDesc, vec![table, row, key])
    }

    /// `key(a, b)`.
    pub(super) fn parse_key_specifier(&mut self) -> SyntaxNode {
        let key = self.consume_node();
        self.start_context(ParserRuleContext::ArgumentList);
        let open = self.expect_node(SyntaxKind::OpenParenToken);
        let names = self.parse_separated_list(
            SyntaxKind::CloseParenToken,
            |kind| kind == SyntaxKind::Identifier,
            |p| p.consume_node(),
        );
        let close = self.expect_node(SyntaxKind::CloseParenToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::KeySpecifier, vec![key, open, names, close])
    }

    fn parse_nil_or_parenthesised_type(&mut self) -> SyntaxNode {
        let open = self.consume_node();
        if self.at(SyntaxKind::CloseParenToken) {
            let close = self.consume_node();
            return SyntaxNode::node(SyntaxKind::NilTypeDesc, vec![open, close]);
        }
        self.start_context(ParserRuleContext::BracedExpression);
        let ty = self.parse_type_descriptor();
        let close = self.expect_node(SyntaxKind::CloseParenToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::ParenthesisedTypeDesc, vec![open, ty, close])
    }

    fn parse_tuple_type(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::TupleType);
        let open = self.consume_node();
        let members = self.parse_separated_list(SyntaxKind::CloseBracketToken, is_type_start, |p| {
            let ty = p.parse_type_descriptor();
            match p.optional(SyntaxKind::EllipsisToken) {
                Some(ellipsis) => SyntaxNode::node(SyntaxKind::RestDescriptor, vec![ty, ellipsis.into()]),
                None => ty,
            }
        });
        let close = self.expect_node(SyntaxKind::CloseBracketToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::TupleTypeDesc, vec![open, members, close])
    }

    fn parse_record_type(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::RecordType);
        let record = self.consume_node();
        let (open, close_kind) = if self.at(SyntaxKind::OpenBracePipeToken) {
            (self.consume_node(), SyntaxKind::ClosePipeBraceToken)
        } else {
            (self.expect_node(SyntaxKind::OpenBraceToken), SyntaxKind::CloseBraceToken)
        };
        let fields = self.parse_list_until(
            |kind| matches!(kind, SyntaxKind::CloseBraceToken | SyntaxKind::ClosePipeBraceToken),
            |p| {
                let kind = p.peek_kind();
                is_type_start(kind)
                    || matches!(
                        kind,
                        SyntaxKind::AsteriskToken | SyntaxKind::AtToken | SyntaxKind::DocumentationString
                    )
            },
            |p| p.parse_record_field(),
        );
        let close = self.expect_node(close_kind);
        self.end_context();
        SyntaxNode::node(SyntaxKind::RecordTypeDesc, vec![record, open, fields, close])
    }

    fn parse_record_field(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::RecordField);
        let node = if self.at(SyntaxKind::AsteriskToken) {
            let asterisk = self.consume_node();
            let ty = self.parse_type_descriptor();
            let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
            SyntaxNode::node(SyntaxKind::TypeReference, vec![asterisk, ty, semicolon])
        } else {
            let metadata = self.parse_optional_metadata();
            let readonly = if self.at(SyntaxKind::ReadonlyKeyword) && is_type_start(self.peek_kind_n(2)) {
                self.consume_node()
            } else {
                SyntaxNode::Empty
            };
            let ty = self.parse_type_descriptor();
            if self.at(SyntaxKind::EllipsisToken) {
                let ellipsis = self.consume_node();
                let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
                SyntaxNode::node(SyntaxKind::RecordRestDescriptor, vec![ty, ellipsis, semicolon])
            } else {
                let name = self.expect_node(SyntaxKind::Identifier);
                if self.at(SyntaxKind::EqualToken) {
                    let equal = self.consume_node();
                    let default = self.parse_expression();
                    let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
                    SyntaxNode::node(
                        SyntaxKind::RecordFieldWithDefault,
                        vec![metadata, readonly, ty, name, equal, default, semicolon],
                    )
                } else {
                    let question = self.optional_node(SyntaxKind::QuestionMarkToken);
                    let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
                    SyntaxNode::node(
                        SyntaxKind::RecordField,
                        vec![metadata, readonly, ty, name, question, semicolon],
                    )
                }
            }
        };
        self.end_context();
        node
    }

    /// Object and function types, with their leading qualifiers.
    fn parse_qualified_object_or_function_type(&mut self) -> SyntaxNode {
        let qualifiers = self.parse_qualifiers();
        if self.at(SyntaxKind::ObjectKeyword) {
            let qualifiers = self.validate_qualifiers(qualifiers, OBJECT_TYPE_QUALIFIERS);
            self.parse_object_type(qualifiers)
        } else {
            let qualifiers = self.validate_qualifiers(qualifiers, FUNCTION_TYPE_QUALIFIERS);
            self.parse_function_type(qualifiers)
        }
    }

    pub(super) fn parse_object_type(&mut self, qualifiers: SyntaxNode) -> SyntaxNode {
        self.start_context(ParserRuleContext::ObjectType);
        let object = self.expect_node(SyntaxKind::ObjectKeyword);
        let open = self.expect_node(SyntaxKind::OpenBraceToken);
        let members = self.parse_object_members(true);
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::ObjectTypeDesc, vec![qualifiers, object, open, members, close])
    }

    /// `function` or `function (params) returns T`.
    pub(super) fn parse_function_type(&mut self, qualifiers: SyntaxNode) -> SyntaxNode {
        let function = self.expect_node(SyntaxKind::FunctionKeyword);
        let signature = if self.at(SyntaxKind::OpenParenToken) {
            self.parse_function_signature()
        } else {
            SyntaxNode::Empty
        };
        SyntaxNode::node(SyntaxKind::FunctionTypeDesc, vec![qualifiers, function, signature])
    }
}
