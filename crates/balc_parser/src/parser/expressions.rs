//! Expressions and actions.
//!
//! Operator precedence parsing: a terminal, then a loop that folds in
//! infix and postfix operators tighter than the level the caller is at.
//! The same routine serves three callers:
//!
//! - plain expressions, where actions are rejected,
//! - action-or-expression positions (statement right-hand sides),
//! - statement starts, where the text may still turn out to be a type
//!   (`type_or_expr`) and a few type-only forms are let through.

use balc_diagnostics::messages;
use balc_lexer::LexerMode;
use balc_syntax::factory::{into_invalid_node, missing_expression, prepend_invalid_nodes};
use balc_syntax::{SyntaxDiagnostic, SyntaxKind, SyntaxNode, Token};
use tracing::{debug, trace};

use super::qualifiers::{FUNCTION_TYPE_QUALIFIERS, OBJECT_TYPE_QUALIFIERS};
use super::types::{is_literal_token, is_type_start};
use super::Parser;
use crate::ambiguity::{get_expression, get_type_desc_from_expr, is_type_convertible};
use crate::context::ParserRuleContext;
use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::recovery::Action;

/// Tokens that can begin an expression or action.
pub(super) fn is_expression_start(kind: SyntaxKind) -> bool {
    is_literal_token(kind)
        || kind.is_type_keyword()
        || matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::MinusToken
                | SyntaxKind::PlusToken
                | SyntaxKind::ExclamationMarkToken
                | SyntaxKind::NegationToken
                | SyntaxKind::LtToken
                | SyntaxKind::TypeofKeyword
                | SyntaxKind::CheckKeyword
                | SyntaxKind::CheckpanicKeyword
                | SyntaxKind::TrapKeyword
                | SyntaxKind::BacktickToken
                | SyntaxKind::ReKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::FromKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::IsolatedKeyword
                | SyntaxKind::TransactionalKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::ClientKeyword
                | SyntaxKind::NaturalKeyword
                | SyntaxKind::AtToken
                | SyntaxKind::LeftArrowToken
                | SyntaxKind::WaitKeyword
                | SyntaxKind::StartKeyword
                | SyntaxKind::FlushKeyword
                | SyntaxKind::CommitKeyword
        )
}

fn is_list_member_start(kind: SyntaxKind) -> bool {
    is_expression_start(kind) || kind == SyntaxKind::EllipsisToken
}

fn is_argument_start(kind: SyntaxKind) -> bool {
    is_list_member_start(kind)
}

fn is_mapping_field_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::StringLiteralToken
            | SyntaxKind::EllipsisToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::ReadonlyKeyword
    )
}

pub(super) fn is_let_var_decl_start(kind: SyntaxKind) -> bool {
    is_type_start(kind) || matches!(kind, SyntaxKind::VarKeyword | SyntaxKind::AtToken)
}

fn is_name_reference(node: &SyntaxNode) -> bool {
    matches!(
        node.kind(),
        SyntaxKind::SimpleNameReference | SyntaxKind::QualifiedNameReference
    )
}

/// `a:b` split back into `a`, `:` and `b`, for the middle of `c ? a:b`.
fn split_qualified_name(node: SyntaxNode) -> (SyntaxNode, SyntaxNode, SyntaxNode) {
    let mut parts = node.into_children().into_iter();
    let module = parts.next().unwrap_or(SyntaxNode::Empty);
    let colon = parts.next().unwrap_or(SyntaxNode::Empty);
    let name = parts.next().unwrap_or(SyntaxNode::Empty);
    (
        SyntaxNode::node(SyntaxKind::SimpleNameReference, vec![module]),
        colon,
        SyntaxNode::node(SyntaxKind::SimpleNameReference, vec![name]),
    )
}

impl Parser {
    // ========================================================================
    // Entry points into the precedence parser
    // ========================================================================

    /// An expression where actions are not allowed.
    pub(super) fn parse_expression(&mut self) -> SyntaxNode {
        self.parse_expression_with(OperatorPrecedence::Default, false, false)
    }

    pub(super) fn parse_action_or_expression(&mut self) -> SyntaxNode {
        self.parse_expression_with(OperatorPrecedence::Default, true, false)
    }

    /// Statement start: the result may be converted to a type later.
    pub(super) fn parse_type_or_expression(&mut self) -> SyntaxNode {
        self.parse_expression_with(OperatorPrecedence::Default, true, true)
    }

    pub(super) fn parse_expression_with(
        &mut self,
        precedence: OperatorPrecedence,
        allow_actions: bool,
        type_or_expr: bool,
    ) -> SyntaxNode {
        self.nested(|p| {
            let lhs = p.parse_terminal(allow_actions, type_or_expr);
            let lhs = p.check_action(lhs, allow_actions);
            p.parse_expression_rhs(precedence, lhs, allow_actions, type_or_expr)
        })
    }

    /// Fold operators tighter than `precedence` onto `lhs`.
    pub(super) fn parse_expression_rhs(
        &mut self,
        precedence: OperatorPrecedence,
        mut lhs: SyntaxNode,
        allow_actions: bool,
        type_or_expr: bool,
    ) -> SyntaxNode {
        loop {
            let Some(op_precedence) = self.peek_operator_precedence(&lhs, type_or_expr) else {
                break;
            };
            if precedence.is_higher_than_or_equal(op_precedence) {
                break;
            }
            if op_precedence.is_action() && !allow_actions {
                // Left for the caller; `a -> b` can only be an action.
                break;
            }
            trace!(?op_precedence, "infix operator");
            let node = self.parse_operator(op_precedence, lhs, type_or_expr);
            lhs = self.check_action(node, allow_actions);
        }
        lhs
    }

    /// Precedence of the next token as an operator applied to `lhs`, or
    /// `None` if it does not continue the expression.
    fn peek_operator_precedence(
        &mut self,
        lhs: &SyntaxNode,
        type_or_expr: bool,
    ) -> Option<OperatorPrecedence> {
        let kind = self.peek_kind();
        match kind {
            SyntaxKind::OpenParenToken => is_name_reference(lhs).then_some(OperatorPrecedence::MemberAccess),
            SyntaxKind::ExclamationMarkToken => {
                (self.peek_kind_n(2) == SyntaxKind::IsKeyword).then_some(OperatorPrecedence::BinaryCompare)
            }
            SyntaxKind::SlashToken if self.is_xml_step_ahead() => Some(OperatorPrecedence::MemberAccess),
            SyntaxKind::GtToken if self.peek_kind_n(2) == SyntaxKind::GtToken => Some(OperatorPrecedence::Shift),
            SyntaxKind::EllipsisToken if type_or_expr && self.is_rest_descriptor_ahead(lhs) => {
                Some(OperatorPrecedence::MemberAccess)
            }
            _ => get_binary_operator_precedence(kind),
        }
    }

    fn is_xml_step_ahead(&mut self) -> bool {
        self.peek_kind_n(2) == SyntaxKind::LtToken && !self.peek().has_trailing_minutiae()
    }

    fn is_rest_descriptor_ahead(&mut self, lhs: &SyntaxNode) -> bool {
        matches!(
            self.peek_kind_n(2),
            SyntaxKind::CommaToken | SyntaxKind::CloseBracketToken
        ) && is_type_convertible(lhs)
    }

    /// An action where only an expression may appear is kept in the tree
    /// as invalid minutiae of a missing name.
    fn check_action(&mut self, node: SyntaxNode, allow_actions: bool) -> SyntaxNode {
        if allow_actions || !node.kind().is_action() {
            return node;
        }
        debug!(kind = ?node.kind(), "action not allowed here");
        let mut name = Token::missing(
            SyntaxKind::Identifier,
            SyntaxDiagnostic::new(messages::ERROR_ACTION_NOT_ALLOWED_HERE, &[]),
        );
        prepend_invalid_nodes(&mut name, vec![node]);
        SyntaxNode::node(SyntaxKind::SimpleNameReference, vec![name.into()])
    }

    // ========================================================================
    // Operators
    // ========================================================================

    fn parse_operator(
        &mut self,
        op_precedence: OperatorPrecedence,
        lhs: SyntaxNode,
        type_or_expr: bool,
    ) -> SyntaxNode {
        match self.peek_kind() {
            SyntaxKind::DotToken => self.parse_field_access_or_method_call(lhs),
            SyntaxKind::OptionalChainingToken => {
                let op = self.consume_node();
                let name = self.parse_field_name();
                SyntaxNode::node(SyntaxKind::OptionalFieldAccess, vec![lhs, op, name])
            }
            SyntaxKind::OpenBracketToken => self.parse_member_access(lhs, type_or_expr),
            SyntaxKind::OpenParenToken => {
                let (open, args, close) = self.parse_call_arguments();
                SyntaxNode::node(SyntaxKind::FunctionCall, vec![lhs, open, args, close])
            }
            SyntaxKind::SlashToken if op_precedence == OperatorPrecedence::MemberAccess => {
                self.parse_xml_step(lhs)
            }
            SyntaxKind::ExclamationMarkToken | SyntaxKind::IsKeyword => self.parse_type_test(lhs),
            SyntaxKind::QuestionMarkToken => self.parse_conditional_or_optional_type(lhs, type_or_expr),
            SyntaxKind::ElvisToken => {
                let op = self.consume_node();
                let rhs = self.parse_expression_with(OperatorPrecedence::Elvis.looser(), false, type_or_expr);
                SyntaxNode::node(SyntaxKind::BinaryExpression, vec![lhs, op, rhs])
            }
            SyntaxKind::RightArrowToken => self.parse_remote_call_or_send(lhs),
            SyntaxKind::SyncSendToken => {
                let op = self.consume_node();
                let peer = self.expect_node(SyntaxKind::Identifier);
                SyntaxNode::node(SyntaxKind::SyncSendAction, vec![lhs, op, peer])
            }
            SyntaxKind::EllipsisToken if op_precedence == OperatorPrecedence::MemberAccess => {
                let ty = get_type_desc_from_expr(lhs);
                let ellipsis = self.consume_node();
                SyntaxNode::node(SyntaxKind::RestDescriptor, vec![ty, ellipsis])
            }
            SyntaxKind::GtToken if op_precedence == OperatorPrecedence::Shift => {
                let op = self.parse_shift_operator();
                let rhs = self.parse_expression_with(OperatorPrecedence::Shift, false, type_or_expr);
                SyntaxNode::node(SyntaxKind::BinaryExpression, vec![lhs, op, rhs])
            }
            _ => {
                let op = self.consume_node();
                let type_operator = matches!(op.kind(), SyntaxKind::PipeToken | SyntaxKind::BitwiseAndToken);
                let lhs = if lhs.kind() == SyntaxKind::AmbiguousCollection && !(type_or_expr && type_operator) {
                    get_expression(lhs)
                } else {
                    lhs
                };
                let rhs = self.parse_expression_with(op_precedence, false, type_or_expr);
                SyntaxNode::node(SyntaxKind::BinaryExpression, vec![lhs, op, rhs])
            }
        }
    }

    /// `>>` and `>>>` arrive as separate `>` tokens; they must be adjacent.
    fn parse_shift_operator(&mut self) -> SyntaxNode {
        let mut parts = vec![self.consume(), self.consume()];
        if self.at(SyntaxKind::GtToken) {
            parts.push(self.consume());
        }
        let spaced = parts
            .windows(2)
            .any(|pair| pair[0].has_trailing_minutiae() || pair[1].has_leading_minutiae());
        let (kind, message) = if parts.len() == 3 {
            (
                SyntaxKind::TripleGtToken,
                messages::ERROR_NO_WHITESPACES_ALLOWED_IN_UNSIGNED_RIGHT_SHIFT_OP,
            )
        } else {
            (
                SyntaxKind::DoubleGtToken,
                messages::ERROR_NO_WHITESPACES_ALLOWED_IN_RIGHT_SHIFT_OP,
            )
        };
        let mut op = SyntaxNode::node(kind, parts.into_iter().map(SyntaxNode::from).collect());
        if spaced {
            op.add_diagnostic(SyntaxDiagnostic::new(message, &[]));
        }
        op
    }

    /// Field names may be keywords: `xs.map(f)`, `s.join(",")`.
    fn parse_field_name(&mut self) -> SyntaxNode {
        if self.peek_kind().is_keyword() {
            return self.consume().with_kind(SyntaxKind::Identifier).into();
        }
        self.expect_node(SyntaxKind::Identifier)
    }

    fn parse_field_access_or_method_call(&mut self, lhs: SyntaxNode) -> SyntaxNode {
        let dot = self.consume_node();
        let name = self.parse_field_name();
        if self.at(SyntaxKind::OpenParenToken) {
            let (open, args, close) = self.parse_call_arguments();
            return SyntaxNode::node(SyntaxKind::MethodCall, vec![lhs, dot, name, open, args, close]);
        }
        SyntaxNode::node(SyntaxKind::FieldAccess, vec![lhs, dot, name])
    }

    /// `x[k]`. When the statement may be a declaration, `T[]` and `T[*]`
    /// are accepted too and sorted out by the caller.
    fn parse_member_access(&mut self, lhs: SyntaxNode, type_or_expr: bool) -> SyntaxNode {
        self.start_context(ParserRuleContext::ListConstructor);
        let open = self.consume_node();
        let keys = if type_or_expr && self.at(SyntaxKind::CloseBracketToken) {
            SyntaxNode::empty_list()
        } else if type_or_expr
            && self.at(SyntaxKind::AsteriskToken)
            && self.peek_kind_n(2) == SyntaxKind::CloseBracketToken
        {
            SyntaxNode::list(vec![self.consume_node()])
        } else {
            let keys = self.parse_separated_list(SyntaxKind::CloseBracketToken, is_expression_start, |p| {
                p.parse_expression_with(OperatorPrecedence::Default, false, type_or_expr)
            });
            if keys.children().is_empty() {
                SyntaxNode::list(vec![missing_expression()])
            } else {
                keys
            }
        };
        let close = self.expect_node(SyntaxKind::CloseBracketToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::IndexedExpression, vec![lhs, open, keys, close])
    }

    fn parse_xml_step(&mut self, lhs: SyntaxNode) -> SyntaxNode {
        let slash = self.consume_node();
        let lt = self.consume_node();
        let name = if self.at(SyntaxKind::AsteriskToken) {
            self.consume_node()
        } else {
            self.parse_name_reference()
        };
        let gt = self.expect_node(SyntaxKind::GtToken);
        SyntaxNode::node(SyntaxKind::XmlStepExpression, vec![lhs, slash, lt, name, gt])
    }

    /// `x is T`, `x !is T`.
    fn parse_type_test(&mut self, lhs: SyntaxNode) -> SyntaxNode {
        let negation = self.optional_node(SyntaxKind::ExclamationMarkToken);
        let is = self.expect_node(SyntaxKind::IsKeyword);
        let ty = self.parse_type_descriptor();
        SyntaxNode::node(SyntaxKind::TypeTestExpression, vec![lhs, negation, is, ty])
    }

    fn parse_conditional_or_optional_type(&mut self, lhs: SyntaxNode, type_or_expr: bool) -> SyntaxNode {
        if type_or_expr && self.is_optional_type_ahead() && is_type_convertible(&lhs) {
            let ty = get_type_desc_from_expr(lhs);
            let question = self.consume_node();
            return SyntaxNode::node(SyntaxKind::OptionalTypeDesc, vec![ty, question]);
        }
        let question = self.consume_node();
        let mut middle = self.parse_expression_with(OperatorPrecedence::AnonFuncOrLet, false, false);
        let (colon, otherwise) = if !self.at(SyntaxKind::ColonToken)
            && middle.kind() == SyntaxKind::QualifiedNameReference
        {
            let (module, colon, name) = split_qualified_name(middle);
            middle = module;
            (colon, name)
        } else {
            let colon = self.expect_node(SyntaxKind::ColonToken);
            let otherwise = self.parse_expression_with(OperatorPrecedence::AnonFuncOrLet, false, false);
            (colon, otherwise)
        };
        SyntaxNode::node(
            SyntaxKind::ConditionalExpression,
            vec![lhs, question, middle, colon, otherwise],
        )
    }

    /// `T?` followed by something that cannot continue a conditional.
    fn is_optional_type_ahead(&mut self) -> bool {
        match self.peek_kind_n(2) {
            SyntaxKind::CommaToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::EllipsisToken
            | SyntaxKind::PipeToken
            | SyntaxKind::BitwiseAndToken => true,
            SyntaxKind::OpenBracketToken => self.peek_kind_n(3) == SyntaxKind::CloseBracketToken,
            SyntaxKind::Identifier => matches!(
                self.peek_kind_n(3),
                SyntaxKind::EqualToken | SyntaxKind::SemicolonToken | SyntaxKind::InKeyword
            ),
            _ => false,
        }
    }

    /// `a->b(...)`, `a->/path.get(...)` or `a -> w`.
    fn parse_remote_call_or_send(&mut self, lhs: SyntaxNode) -> SyntaxNode {
        let arrow = self.consume_node();
        if self.at(SyntaxKind::SlashToken) {
            return self.parse_client_resource_access(lhs, arrow);
        }
        let name = self.expect_node(SyntaxKind::Identifier);
        if self.at(SyntaxKind::OpenParenToken) {
            let (open, args, close) = self.parse_call_arguments();
            return SyntaxNode::node(
                SyntaxKind::RemoteMethodCallAction,
                vec![lhs, arrow, name, open, args, close],
            );
        }
        SyntaxNode::node(SyntaxKind::AsyncSendAction, vec![lhs, arrow, name])
    }

    fn parse_client_resource_access(&mut self, lhs: SyntaxNode, arrow: SyntaxNode) -> SyntaxNode {
        let slash = self.consume_node();
        let mut segments = Vec::new();
        loop {
            match self.peek_kind() {
                SyntaxKind::Identifier => segments.push(self.consume_node()),
                SyntaxKind::OpenBracketToken => {
                    self.start_context(ParserRuleContext::ListConstructor);
                    let open = self.consume_node();
                    let expr = self.parse_expression();
                    let close = self.expect_node(SyntaxKind::CloseBracketToken);
                    self.end_context();
                    segments.push(SyntaxNode::list(vec![open, expr, close]));
                }
                _ => break,
            }
            if !self.at(SyntaxKind::SlashToken) {
                break;
            }
            segments.push(self.consume_node());
        }
        let (dot, method) = if self.at(SyntaxKind::DotToken) {
            let dot = self.consume_node();
            (dot, self.expect_node(SyntaxKind::Identifier))
        } else {
            (SyntaxNode::Empty, SyntaxNode::Empty)
        };
        let args = if self.at(SyntaxKind::OpenParenToken) {
            self.parse_paren_arg_list()
        } else {
            SyntaxNode::Empty
        };
        SyntaxNode::node(
            SyntaxKind::ClientResourceAccessAction,
            vec![lhs, arrow, slash, SyntaxNode::list(segments), dot, method, args],
        )
    }

    // ========================================================================
    // Arguments
    // ========================================================================

    /// `( args )` as three nodes, for embedding in a call node.
    fn parse_call_arguments(&mut self) -> (SyntaxNode, SyntaxNode, SyntaxNode) {
        self.start_context(ParserRuleContext::ArgumentList);
        let open = self.expect_node(SyntaxKind::OpenParenToken);
        let args = self.parse_separated_list(SyntaxKind::CloseParenToken, is_argument_start, |p| {
            p.parse_argument()
        });
        let close = self.expect_node(SyntaxKind::CloseParenToken);
        self.end_context();
        (open, check_rest_argument_order(args), close)
    }

    pub(super) fn parse_paren_arg_list(&mut self) -> SyntaxNode {
        let (open, args, close) = self.parse_call_arguments();
        SyntaxNode::node(SyntaxKind::ParenthesizedArgList, vec![open, args, close])
    }

    fn parse_argument(&mut self) -> SyntaxNode {
        match self.peek_kind() {
            SyntaxKind::EllipsisToken => {
                let ellipsis = self.consume_node();
                let expr = self.parse_expression();
                SyntaxNode::node(SyntaxKind::RestArg, vec![ellipsis, expr])
            }
            SyntaxKind::Identifier if self.peek_kind_n(2) == SyntaxKind::EqualToken => {
                let name = self.consume_node();
                let equal = self.consume_node();
                let expr = self.parse_expression();
                SyntaxNode::node(SyntaxKind::NamedArg, vec![name, equal, expr])
            }
            _ => {
                let expr = self.parse_expression();
                SyntaxNode::node(SyntaxKind::PositionalArg, vec![expr])
            }
        }
    }

    // ========================================================================
    // Terminals
    // ========================================================================

    fn parse_terminal(&mut self, allow_actions: bool, type_or_expr: bool) -> SyntaxNode {
        loop {
            let kind = self.peek_kind();
            return match kind {
                kind if is_literal_token(kind) => {
                    let literal = self.consume_node();
                    SyntaxNode::node(SyntaxKind::BasicLiteral, vec![literal])
                }
                SyntaxKind::Identifier => self.parse_name_or_implicit_function(),
                SyntaxKind::OpenParenToken => self.parse_paren_expression(allow_actions, type_or_expr),
                SyntaxKind::OpenBracketToken if type_or_expr => self.parse_ambiguous_collection(),
                SyntaxKind::OpenBracketToken => self.parse_list_constructor(),
                SyntaxKind::OpenBraceToken => self.parse_mapping_constructor(),
                SyntaxKind::MinusToken
                | SyntaxKind::PlusToken
                | SyntaxKind::ExclamationMarkToken
                | SyntaxKind::NegationToken => {
                    let op = self.consume_node();
                    let operand = self.parse_expression_with(OperatorPrecedence::Unary, false, type_or_expr);
                    SyntaxNode::node(SyntaxKind::UnaryExpression, vec![op, operand])
                }
                SyntaxKind::LtToken => self.parse_type_cast(),
                SyntaxKind::TypeofKeyword => {
                    let typeof_kw = self.consume_node();
                    let operand = self.parse_expression_with(OperatorPrecedence::Unary, false, false);
                    SyntaxNode::node(SyntaxKind::TypeofExpression, vec![typeof_kw, operand])
                }
                SyntaxKind::CheckKeyword | SyntaxKind::CheckpanicKeyword => self.parse_checking(
                    allow_actions,
                    SyntaxKind::CheckExpression,
                    SyntaxKind::CheckAction,
                ),
                SyntaxKind::TrapKeyword => {
                    self.parse_checking(allow_actions, SyntaxKind::TrapExpression, SyntaxKind::TrapAction)
                }
                SyntaxKind::BacktickToken => self.parse_template_expression(),
                SyntaxKind::StringKeyword | SyntaxKind::XmlKeyword | SyntaxKind::ReKeyword
                    if self.peek_kind_n(2) == SyntaxKind::BacktickToken =>
                {
                    self.parse_template_expression()
                }
                SyntaxKind::NewKeyword => self.parse_new_expression(),
                SyntaxKind::FromKeyword => self.parse_query(allow_actions),
                SyntaxKind::LetKeyword => self.parse_let_expression(),
                SyntaxKind::FunctionKeyword => self.parse_anon_function_or_type(SyntaxNode::empty_list(), type_or_expr),
                SyntaxKind::IsolatedKeyword
                | SyntaxKind::TransactionalKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::ClientKeyword
                | SyntaxKind::ServiceKeyword
                    if self.is_qualified_function_or_object_ahead() =>
                {
                    self.parse_qualified_function_or_object(SyntaxNode::empty_list(), type_or_expr)
                }
                SyntaxKind::ErrorKeyword if self.is_error_constructor_ahead() => self.parse_error_constructor(),
                SyntaxKind::NaturalKeyword => self.parse_natural_expression(),
                SyntaxKind::ConstKeyword if self.peek_kind_n(2) == SyntaxKind::NaturalKeyword => {
                    self.parse_natural_expression()
                }
                SyntaxKind::AtToken => match self.parse_annotated_expression(type_or_expr) {
                    Some(node) => node,
                    None => continue,
                },
                SyntaxKind::LeftArrowToken => {
                    let arrow = self.consume_node();
                    let peer = self.expect_node(SyntaxKind::Identifier);
                    SyntaxNode::node(SyntaxKind::ReceiveAction, vec![arrow, peer])
                }
                SyntaxKind::WaitKeyword => {
                    let wait = self.consume_node();
                    let future = self.parse_expression_with(OperatorPrecedence::LogicalAnd, false, false);
                    SyntaxNode::node(SyntaxKind::WaitAction, vec![wait, future])
                }
                SyntaxKind::StartKeyword => self.parse_start_action(SyntaxNode::empty_list()),
                SyntaxKind::FlushKeyword => {
                    let flush = self.consume_node();
                    let peer = self.optional_node(SyntaxKind::Identifier);
                    SyntaxNode::node(SyntaxKind::FlushAction, vec![flush, peer])
                }
                SyntaxKind::CommitKeyword => {
                    let commit = self.consume_node();
                    SyntaxNode::node(SyntaxKind::CommitAction, vec![commit])
                }
                kind if kind.is_type_keyword() && self.is_qualified_name_ahead() => self.parse_qualified_name(),
                kind if kind.is_type_keyword()
                    || matches!(
                        kind,
                        SyntaxKind::RecordKeyword | SyntaxKind::DistinctKeyword | SyntaxKind::ReadonlyKeyword
                    ) =>
                {
                    self.parse_postfix_type()
                }
                _ => match self.recover_in(ParserRuleContext::Expression, None).action {
                    Action::Remove => continue,
                    _ => missing_expression(),
                },
            };
        }
    }

    fn parse_name_or_implicit_function(&mut self) -> SyntaxNode {
        if self.peek_kind_n(2) == SyntaxKind::RightDoubleArrowToken
            && self.current_context() != ParserRuleContext::MatchClause
        {
            let param = self.consume_node();
            let param = SyntaxNode::node(SyntaxKind::SimpleNameReference, vec![param]);
            return self.parse_implicit_function_body(param);
        }
        self.parse_name_reference()
    }

    fn parse_implicit_function_body(&mut self, params: SyntaxNode) -> SyntaxNode {
        let arrow = self.expect_node(SyntaxKind::RightDoubleArrowToken);
        let body = self.parse_expression_with(OperatorPrecedence::RemoteCallAction, false, false);
        SyntaxNode::node(SyntaxKind::ImplicitAnonymousFunction, vec![params, arrow, body])
    }

    /// `name` or `module:name`.
    pub(super) fn parse_name_reference(&mut self) -> SyntaxNode {
        if self.is_qualified_name_ahead() {
            return self.parse_qualified_name();
        }
        let name = self.expect_node(SyntaxKind::Identifier);
        SyntaxNode::node(SyntaxKind::SimpleNameReference, vec![name])
    }

    /// `a:b` written without whitespace around the colon.
    pub(super) fn is_qualified_name_ahead(&mut self) -> bool {
        let first = self.peek_kind();
        if first != SyntaxKind::Identifier && !first.is_type_keyword() {
            return false;
        }
        if self.peek_kind_n(2) != SyntaxKind::ColonToken || self.peek_kind_n(3) != SyntaxKind::Identifier {
            return false;
        }
        if self.peek().has_trailing_minutiae() {
            return false;
        }
        let colon = self.peek_n(2);
        !colon.has_leading_minutiae() && !colon.has_trailing_minutiae()
    }

    pub(super) fn parse_qualified_name(&mut self) -> SyntaxNode {
        let module = self.consume_node();
        let colon = self.consume_node();
        let name = self.consume_node();
        SyntaxNode::node(SyntaxKind::QualifiedNameReference, vec![module, colon, name])
    }

    /// `()`, `(x, y) => ...` or `(e)`.
    fn parse_paren_expression(&mut self, allow_actions: bool, type_or_expr: bool) -> SyntaxNode {
        if self.is_infer_param_list_ahead() {
            let params = self.parse_infer_param_list();
            return self.parse_implicit_function_body(params);
        }
        self.start_context(ParserRuleContext::BracedExpression);
        let open = self.consume_node();
        if self.at(SyntaxKind::CloseParenToken) {
            let close = self.consume_node();
            self.end_context();
            return SyntaxNode::node(SyntaxKind::NilLiteral, vec![open, close]);
        }
        let inner = self.parse_expression_with(OperatorPrecedence::Default, allow_actions, type_or_expr);
        let close = self.expect_node(SyntaxKind::CloseParenToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::BracedExpression, vec![open, inner, close])
    }

    /// `(a, b) =>` or `() =>`.
    fn is_infer_param_list_ahead(&mut self) -> bool {
        let mut n = 2;
        loop {
            match self.peek_kind_n(n) {
                SyntaxKind::CloseParenToken => {
                    return self.peek_kind_n(n + 1) == SyntaxKind::RightDoubleArrowToken;
                }
                SyntaxKind::Identifier => {}
                _ => return false,
            }
            match self.peek_kind_n(n + 1) {
                SyntaxKind::CommaToken => n += 2,
                SyntaxKind::CloseParenToken => n += 1,
                _ => return false,
            }
        }
    }

    fn parse_infer_param_list(&mut self) -> SyntaxNode {
        let open = self.consume_node();
        let params = self.parse_separated_list(
            SyntaxKind::CloseParenToken,
            |kind| kind == SyntaxKind::Identifier,
            |p| {
                let name = p.consume_node();
                SyntaxNode::node(SyntaxKind::SimpleNameReference, vec![name])
            },
        );
        let close = self.expect_node(SyntaxKind::CloseParenToken);
        SyntaxNode::node(SyntaxKind::InferParamList, vec![open, params, close])
    }

    fn parse_list_constructor(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::ListConstructor);
        let open = self.consume_node();
        let members = self.parse_separated_list(SyntaxKind::CloseBracketToken, is_list_member_start, |p| {
            p.parse_list_member(false)
        });
        let close = self.expect_node(SyntaxKind::CloseBracketToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::ListConstructor, vec![open, members, close])
    }

    /// `[...]` where a tuple type, a list constructor or a list binding
    /// pattern may start. Members are parsed as types-or-expressions and the
    /// whole is resolved by the caller.
    fn parse_ambiguous_collection(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::AmbiguousList);
        let open = self.consume_node();
        let members = self.parse_separated_list(
            SyntaxKind::CloseBracketToken,
            |kind| is_list_member_start(kind) || is_type_start(kind),
            |p| p.parse_list_member(true),
        );
        let close = self.expect_node(SyntaxKind::CloseBracketToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::AmbiguousCollection, vec![open, members, close])
    }

    pub(super) fn parse_list_member(&mut self, type_or_expr: bool) -> SyntaxNode {
        if self.at(SyntaxKind::EllipsisToken) {
            let ellipsis = self.consume_node();
            let expr = self.parse_expression_with(OperatorPrecedence::Default, false, type_or_expr);
            return SyntaxNode::node(SyntaxKind::SpreadMember, vec![ellipsis, expr]);
        }
        self.parse_expression_with(OperatorPrecedence::Default, false, type_or_expr)
    }

    pub(super) fn parse_mapping_constructor(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::MappingConstructor);
        let open = self.expect_node(SyntaxKind::OpenBraceToken);
        let fields = self.parse_separated_list(SyntaxKind::CloseBraceToken, is_mapping_field_start, |p| {
            p.parse_mapping_field()
        });
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::MappingConstructor, vec![open, fields, close])
    }

    fn parse_mapping_field(&mut self) -> SyntaxNode {
        match self.peek_kind() {
            SyntaxKind::EllipsisToken => {
                let ellipsis = self.consume_node();
                let expr = self.parse_expression();
                SyntaxNode::node(SyntaxKind::SpreadField, vec![ellipsis, expr])
            }
            SyntaxKind::OpenBracketToken => {
                let open = self.consume_node();
                let key = self.parse_expression();
                let close = self.expect_node(SyntaxKind::CloseBracketToken);
                let colon = self.expect_node(SyntaxKind::ColonToken);
                let value = self.parse_expression();
                SyntaxNode::node(SyntaxKind::ComputedNameField, vec![open, key, close, colon, value])
            }
            _ => {
                let readonly = if self.at(SyntaxKind::ReadonlyKeyword) {
                    self.consume_node()
                } else {
                    SyntaxNode::Empty
                };
                let key = if self.at(SyntaxKind::StringLiteralToken) {
                    self.consume_node()
                } else {
                    self.expect_node(SyntaxKind::Identifier)
                };
                let (colon, value) = match self.optional(SyntaxKind::ColonToken) {
                    Some(colon) => (colon.into(), self.parse_expression()),
                    None => (SyntaxNode::Empty, SyntaxNode::Empty),
                };
                SyntaxNode::node(SyntaxKind::SpecificField, vec![readonly, key, colon, value])
            }
        }
    }

    /// `<T> e`, `<@a T> e`, `<@a> e`.
    fn parse_type_cast(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::TypeCast);
        let lt = self.consume_node();
        let annotations = self.parse_annotations();
        let ty = if self.at(SyntaxKind::GtToken) {
            SyntaxNode::Empty
        } else {
            self.parse_type_descriptor()
        };
        let gt = self.expect_node(SyntaxKind::GtToken);
        self.end_context();
        let operand = self.parse_expression_with(OperatorPrecedence::Unary, false, false);
        let param = SyntaxNode::node(SyntaxKind::TypeCastParam, vec![annotations, ty]);
        SyntaxNode::node(SyntaxKind::TypeCastExpression, vec![lt, param, gt, operand])
    }

    /// `check e`, `checkpanic e`, `trap e`. When actions are allowed the
    /// operand may be one: `check c->get()`.
    fn parse_checking(
        &mut self,
        allow_actions: bool,
        expression_kind: SyntaxKind,
        action_kind: SyntaxKind,
    ) -> SyntaxNode {
        let keyword = self.consume_node();
        let mut operand = self.parse_expression_with(OperatorPrecedence::Unary, allow_actions, false);
        if allow_actions
            && matches!(
                self.peek_kind(),
                SyntaxKind::RightArrowToken | SyntaxKind::SyncSendToken
            )
        {
            operand = self.parse_expression_rhs(OperatorPrecedence::Action, operand, true, false);
        }
        let kind = if operand.kind().is_action() {
            action_kind
        } else {
            expression_kind
        };
        SyntaxNode::node(kind, vec![keyword, operand])
    }

    // ========================================================================
    // Templates and prompts
    // ========================================================================

    fn parse_template_expression(&mut self) -> SyntaxNode {
        let (kind, keyword, mode) = match self.peek_kind() {
            SyntaxKind::StringKeyword => (
                SyntaxKind::StringTemplateExpression,
                self.consume_node(),
                LexerMode::Template,
            ),
            SyntaxKind::XmlKeyword => (
                SyntaxKind::XmlTemplateExpression,
                self.consume_node(),
                LexerMode::Template,
            ),
            SyntaxKind::ReKeyword => (
                SyntaxKind::RegexTemplateExpression,
                self.consume_node(),
                LexerMode::Regex,
            ),
            _ => (SyntaxKind::RawTemplateExpression, SyntaxNode::Empty, LexerMode::Template),
        };
        self.start_context(ParserRuleContext::Template);
        let open = self.expect_node(SyntaxKind::BacktickToken);
        self.start_mode(mode);
        let mut items = Vec::new();
        loop {
            match self.peek_kind() {
                SyntaxKind::TemplateString | SyntaxKind::RegexContent => items.push(self.consume_node()),
                SyntaxKind::InterpolationStartToken => items.push(self.parse_interpolation()),
                _ => break,
            }
        }
        let close = self.expect_node(SyntaxKind::BacktickToken);
        self.end_mode();
        self.end_context();
        SyntaxNode::node(kind, vec![keyword, open, SyntaxNode::list(items), close])
    }

    /// `${ e }`. The lexer enters interpolation mode on `${` and leaves it
    /// on the matching `}`; if that brace never comes the mode is popped
    /// here.
    fn parse_interpolation(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::Interpolation);
        let start = self.consume_node();
        let expr = self.parse_expression();
        let close = self.expect(SyntaxKind::CloseBraceToken);
        if close.is_missing && self.reader.current_mode() == LexerMode::Interpolation {
            self.end_mode();
        }
        self.end_context();
        SyntaxNode::node(SyntaxKind::Interpolation, vec![start, expr, close.into()])
    }

    /// `natural (args) { prompt }`, optionally `const natural`.
    fn parse_natural_expression(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::Natural);
        let const_kw = self.optional_node(SyntaxKind::ConstKeyword);
        let natural = self.expect_node(SyntaxKind::NaturalKeyword);
        let args = if self.at(SyntaxKind::OpenParenToken) {
            self.parse_paren_arg_list()
        } else {
            SyntaxNode::Empty
        };
        let open = self.expect(SyntaxKind::OpenBraceToken);
        let in_prompt = !open.is_missing;
        if in_prompt {
            self.start_mode(LexerMode::Prompt);
        }
        let mut items = Vec::new();
        while in_prompt {
            match self.peek_kind() {
                SyntaxKind::PromptContent => items.push(self.consume_node()),
                SyntaxKind::InterpolationStartToken => items.push(self.parse_interpolation()),
                _ => break,
            }
        }
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        if in_prompt {
            self.end_mode();
        }
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::NaturalExpression,
            vec![const_kw, natural, args, open.into(), SyntaxNode::list(items), close],
        )
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    fn parse_new_expression(&mut self) -> SyntaxNode {
        let new = self.consume_node();
        match self.peek_kind() {
            SyntaxKind::Identifier | SyntaxKind::StreamKeyword => {
                let ty = if self.at(SyntaxKind::Identifier) {
                    self.parse_type_reference()
                } else {
                    self.parse_postfix_type()
                };
                let args = self.parse_paren_arg_list();
                SyntaxNode::node(SyntaxKind::ExplicitNewExpression, vec![new, ty, args])
            }
            SyntaxKind::OpenParenToken => {
                let args = self.parse_paren_arg_list();
                SyntaxNode::node(SyntaxKind::ImplicitNewExpression, vec![new, args])
            }
            _ => SyntaxNode::node(SyntaxKind::ImplicitNewExpression, vec![new, SyntaxNode::Empty]),
        }
    }

    fn is_error_constructor_ahead(&mut self) -> bool {
        match self.peek_kind_n(2) {
            SyntaxKind::OpenParenToken => true,
            SyntaxKind::Identifier => {
                self.peek_kind_n(3) == SyntaxKind::OpenParenToken
                    || (self.peek_kind_n(3) == SyntaxKind::ColonToken
                        && self.peek_kind_n(5) == SyntaxKind::OpenParenToken)
            }
            _ => false,
        }
    }

    /// `error(msg, cause, k = v)`, `error MyError(msg)`.
    pub(super) fn parse_error_constructor(&mut self) -> SyntaxNode {
        let error = self.consume_node();
        let ty = if self.at(SyntaxKind::Identifier) {
            self.parse_type_reference()
        } else {
            SyntaxNode::Empty
        };
        let (open, args, close) = self.parse_call_arguments();
        SyntaxNode::node(SyntaxKind::ErrorConstructor, vec![error, ty, open, args, close])
    }

    /// Qualifiers followed by `function` or `object`.
    fn is_qualified_function_or_object_ahead(&mut self) -> bool {
        let mut n = 1;
        loop {
            match self.peek_kind_n(n) {
                SyntaxKind::IsolatedKeyword
                | SyntaxKind::TransactionalKeyword
                | SyntaxKind::ClientKeyword
                | SyntaxKind::ServiceKeyword => n += 1,
                SyntaxKind::FunctionKeyword | SyntaxKind::ObjectKeyword => return true,
                _ => return false,
            }
        }
    }

    fn parse_qualified_function_or_object(&mut self, annotations: SyntaxNode, type_or_expr: bool) -> SyntaxNode {
        let mut n = 1;
        while !matches!(
            self.peek_kind_n(n),
            SyntaxKind::FunctionKeyword | SyntaxKind::ObjectKeyword | SyntaxKind::EofToken
        ) {
            n += 1;
        }
        if self.peek_kind_n(n) == SyntaxKind::FunctionKeyword {
            return self.parse_anon_function_or_type(annotations, type_or_expr);
        }
        if type_or_expr && annotations.children().is_empty() {
            let qualifiers = self.parse_qualifiers();
            let qualifiers = self.validate_qualifiers(qualifiers, OBJECT_TYPE_QUALIFIERS);
            return self.parse_object_type(qualifiers);
        }
        self.parse_object_constructor(annotations)
    }

    /// `object { ... }` as a value.
    fn parse_object_constructor(&mut self, annotations: SyntaxNode) -> SyntaxNode {
        let qualifiers = self.parse_qualifiers();
        let qualifiers = self.validate_qualifiers(qualifiers, OBJECT_TYPE_QUALIFIERS);
        self.start_context(ParserRuleContext::ObjectConstructor);
        let object = self.expect_node(SyntaxKind::ObjectKeyword);
        let type_ref = if self.at(SyntaxKind::Identifier) {
            self.parse_type_reference()
        } else {
            SyntaxNode::Empty
        };
        let open = self.expect_node(SyntaxKind::OpenBraceToken);
        let members = self.parse_object_members(false);
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::ObjectConstructor,
            vec![annotations, qualifiers, object, type_ref, open, members, close],
        )
    }

    /// `function (params) returns T { ... }` or `=> e`. At a statement
    /// start a signature without a body is a function type instead.
    fn parse_anon_function_or_type(&mut self, annotations: SyntaxNode, type_or_expr: bool) -> SyntaxNode {
        let qualifiers = self.parse_qualifiers();
        let qualifiers = self.validate_qualifiers(qualifiers, FUNCTION_TYPE_QUALIFIERS);
        self.start_context(ParserRuleContext::AnonFunction);
        let function = self.expect_node(SyntaxKind::FunctionKeyword);
        let node = if type_or_expr && !self.at(SyntaxKind::OpenParenToken) {
            SyntaxNode::node(SyntaxKind::FunctionTypeDesc, vec![qualifiers, function, SyntaxNode::Empty])
        } else {
            let signature = self.parse_function_signature();
            let has_body = matches!(
                self.peek_kind(),
                SyntaxKind::OpenBraceToken | SyntaxKind::RightDoubleArrowToken
            );
            if type_or_expr && !has_body && annotations.children().is_empty() {
                SyntaxNode::node(SyntaxKind::FunctionTypeDesc, vec![qualifiers, function, signature])
            } else {
                let body = self.parse_anon_function_body();
                SyntaxNode::node(
                    SyntaxKind::ExplicitAnonymousFunction,
                    vec![annotations, qualifiers, function, signature, body],
                )
            }
        };
        self.end_context();
        node
    }

    fn parse_anon_function_body(&mut self) -> SyntaxNode {
        if self.at(SyntaxKind::RightDoubleArrowToken) {
            let arrow = self.consume_node();
            let expr = self.parse_expression();
            return SyntaxNode::node(
                SyntaxKind::ExpressionFunctionBody,
                vec![arrow, expr, SyntaxNode::Empty],
            );
        }
        self.parse_function_body_block()
    }

    /// Annotations in front of an expression: only `start`, anonymous
    /// functions and object constructors take them. Anywhere else they are
    /// attached as invalid nodes and `None` asks the caller to retry.
    fn parse_annotated_expression(&mut self, type_or_expr: bool) -> Option<SyntaxNode> {
        let annotations = self.parse_annotations();
        match self.peek_kind() {
            SyntaxKind::StartKeyword => Some(self.parse_start_action(annotations)),
            SyntaxKind::FunctionKeyword => Some(self.parse_anon_function_or_type(annotations, false)),
            SyntaxKind::IsolatedKeyword
            | SyntaxKind::TransactionalKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::ClientKeyword
            | SyntaxKind::ServiceKeyword
                if self.is_qualified_function_or_object_ahead() =>
            {
                Some(self.parse_qualified_function_or_object(annotations, type_or_expr))
            }
            _ => {
                let invalid = into_invalid_node(annotations, messages::ERROR_INVALID_TOKEN);
                self.attach_invalid_nodes(None, vec![invalid]);
                if self.peek_kind() == SyntaxKind::EofToken || !is_expression_start(self.peek_kind()) {
                    return Some(missing_expression());
                }
                None
            }
        }
    }

    fn parse_start_action(&mut self, annotations: SyntaxNode) -> SyntaxNode {
        let start = self.expect_node(SyntaxKind::StartKeyword);
        let call = self.parse_expression_with(OperatorPrecedence::Unary, false, false);
        SyntaxNode::node(SyntaxKind::StartAction, vec![annotations, start, call])
    }

    // ========================================================================
    // Let
    // ========================================================================

    fn parse_let_expression(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::LetExpression);
        let let_kw = self.consume_node();
        let decls = self.parse_separated_list(SyntaxKind::InKeyword, is_let_var_decl_start, |p| {
            p.parse_let_var_decl(false)
        });
        let in_kw = self.expect_node(SyntaxKind::InKeyword);
        self.end_context();
        let body = self.parse_expression_with(OperatorPrecedence::RemoteCallAction, false, false);
        SyntaxNode::node(SyntaxKind::LetExpression, vec![let_kw, decls, in_kw, body])
    }

    /// `T x = e`, with optional annotations.
    pub(super) fn parse_let_var_decl(&mut self, allow_actions: bool) -> SyntaxNode {
        let annotations = self.parse_annotations();
        let binding = self.parse_typed_binding_pattern();
        let equal = self.expect_node(SyntaxKind::EqualToken);
        let init = self.parse_expression_with(OperatorPrecedence::Default, allow_actions, false);
        SyntaxNode::node(SyntaxKind::LetVarDecl, vec![annotations, binding, equal, init])
    }
}

/// Any argument after a rest argument is reported.
fn check_rest_argument_order(args: SyntaxNode) -> SyntaxNode {
    let mut seen_rest = false;
    let items = args
        .into_children()
        .into_iter()
        .map(|mut arg| {
            let kind = arg.kind();
            if kind == SyntaxKind::CommaToken {
                return arg;
            }
            if seen_rest {
                arg.add_diagnostic(SyntaxDiagnostic::new(messages::ERROR_REST_ARG_FOLLOWED_BY_ANOTHER_ARG, &[]));
            }
            seen_rest |= kind == SyntaxKind::RestArg;
            arg
        })
        .collect();
    SyntaxNode::list(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(source: &str) -> SyntaxNode {
        Parser::new(source).parse_expression()
    }

    #[test]
    fn test_precedence_binds_tighter_operator_first() {
        let node = expr("a + b * c");
        assert_eq!(node.kind(), SyntaxKind::BinaryExpression);
        assert_eq!(node.child(2).kind(), SyntaxKind::BinaryExpression);
    }

    #[test]
    fn test_left_associative_additive() {
        let node = expr("a - b - c");
        assert_eq!(node.child(0).kind(), SyntaxKind::BinaryExpression);
    }

    #[test]
    fn test_shift_from_adjacent_gt_tokens() {
        let node = expr("a >> b");
        let op = node.child(1);
        assert_eq!(op.kind(), SyntaxKind::DoubleGtToken);
        assert!(op.diagnostics().is_empty());

        let node = expr("a > > b");
        let op = node.child(1);
        assert_eq!(op.kind(), SyntaxKind::DoubleGtToken);
        assert_eq!(op.diagnostics()[0].code(), 103);

        let node = expr("a >>> b");
        assert_eq!(node.child(1).kind(), SyntaxKind::TripleGtToken);
    }

    #[test]
    fn test_action_rejected_in_expression_position() {
        let node = expr("a->b()");
        assert_eq!(node.kind(), SyntaxKind::SimpleNameReference);
        assert_eq!(node.render(), "a");

        let node = expr("wait f");
        assert_eq!(node.kind(), SyntaxKind::SimpleNameReference);
        assert_eq!(node.render(), "wait f");
        let codes: Vec<u32> = node.diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![105]);
    }

    #[test]
    fn test_remote_call_action() {
        let node = Parser::new("c->get(1)").parse_action_or_expression();
        assert_eq!(node.kind(), SyntaxKind::RemoteMethodCallAction);
    }

    #[test]
    fn test_check_of_action_is_action() {
        let node = Parser::new("check c->get()").parse_action_or_expression();
        assert_eq!(node.kind(), SyntaxKind::CheckAction);
        let node = expr("check f()");
        assert_eq!(node.kind(), SyntaxKind::CheckExpression);
    }

    #[test]
    fn test_conditional_splits_qualified_middle() {
        let node = expr("c ? a:b");
        assert_eq!(node.kind(), SyntaxKind::ConditionalExpression);
        assert_eq!(node.child(2).kind(), SyntaxKind::SimpleNameReference);
        assert_eq!(node.render(), "c ? a:b");
    }

    #[test]
    fn test_qualified_name_needs_adjacent_colon() {
        assert_eq!(expr("io:println").kind(), SyntaxKind::QualifiedNameReference);
        assert_eq!(expr("int:MAX_VALUE").kind(), SyntaxKind::QualifiedNameReference);
    }

    #[test]
    fn test_implicit_anonymous_function() {
        assert_eq!(expr("x => x + 1").kind(), SyntaxKind::ImplicitAnonymousFunction);
        assert_eq!(expr("(x, y) => x + y").kind(), SyntaxKind::ImplicitAnonymousFunction);
        assert_eq!(expr("(x)").kind(), SyntaxKind::BracedExpression);
    }

    #[test]
    fn test_rest_argument_must_be_last() {
        let node = expr("f(...xs, 1)");
        let codes: Vec<u32> = node.diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![108]);
    }

    #[test]
    fn test_string_template_round_trips() {
        let source = "string `a ${b} c`";
        let node = expr(source);
        assert_eq!(node.kind(), SyntaxKind::StringTemplateExpression);
        assert_eq!(node.render(), source);
    }

    #[test]
    fn test_method_call_on_keyword_name() {
        let node = expr("xs.map(f)");
        assert_eq!(node.kind(), SyntaxKind::MethodCall);
    }
}
