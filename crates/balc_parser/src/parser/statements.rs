//! Statements.
//!
//! Most statements start with a keyword and are parsed directly. The rest
//! start with something that may be a type, an expression or a binding
//! pattern; those are parsed as a type-or-expression first and resolved by
//! the token that follows (`x`, `=`, `+=`, `;`).

use balc_syntax::{SyntaxKind, SyntaxNode};
use tracing::trace;

use super::expressions::is_expression_start;
use super::patterns::is_match_pattern_start;
use super::qualifiers::WORKER_QUALIFIERS;
use super::types::is_type_start;
use super::Parser;
use crate::ambiguity::{
    can_be_binding_pattern, get_binding_pattern, get_expression, get_type_desc_from_expr, is_definitely_type,
    is_type_convertible,
};
use crate::context::ParserRuleContext;

/// How far to look for the `}` closing a destructuring `{ ... } =`.
const DESTRUCTURE_SCAN_LIMIT: usize = 1024;

/// Statement keywords, plus the tokens that can begin a declaration or an
/// expression statement.
fn is_statement_start_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenBraceToken
            | SyntaxKind::VarKeyword
            | SyntaxKind::FinalKeyword
            | SyntaxKind::AtToken
            | SyntaxKind::DocumentationString
            | SyntaxKind::IfKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::ForeachKeyword
            | SyntaxKind::MatchKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::LockKeyword
            | SyntaxKind::TransactionKeyword
            | SyntaxKind::RetryKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::FailKeyword
            | SyntaxKind::PanicKeyword
            | SyntaxKind::RollbackKeyword
            | SyntaxKind::ForkKeyword
            | SyntaxKind::WorkerKeyword
            | SyntaxKind::TransactionalKeyword
    ) || is_expression_start(kind)
        || is_type_start(kind)
}

/// Calls, and `check` applied to a call.
fn is_call(node: &SyntaxNode) -> bool {
    match node.kind() {
        SyntaxKind::FunctionCall | SyntaxKind::MethodCall => true,
        SyntaxKind::CheckExpression => is_call(node.child(1)),
        _ => false,
    }
}

/// A left-hand side that destructures instead of assigning to a place.
fn is_destructure_target(lhs: &SyntaxNode) -> bool {
    match lhs.kind() {
        SyntaxKind::ListConstructor
        | SyntaxKind::AmbiguousCollection
        | SyntaxKind::MappingConstructor
        | SyntaxKind::ErrorConstructor => can_be_binding_pattern(lhs),
        SyntaxKind::SimpleNameReference => lhs.first_token().map_or(false, |token| token.text == "_"),
        _ => false,
    }
}

impl Parser {
    pub(super) fn is_statement_start(&mut self) -> bool {
        is_statement_start_kind(self.peek_kind())
    }

    /// Statements up to the closing `}` of the enclosing block.
    pub(super) fn parse_statements(&mut self) -> SyntaxNode {
        self.parse_list_until(
            |kind| kind == SyntaxKind::CloseBraceToken,
            |p| p.is_statement_start(),
            |p| p.parse_statement(),
        )
    }

    pub(super) fn parse_statement(&mut self) -> SyntaxNode {
        self.nested(|p| p.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> SyntaxNode {
        match self.peek_kind() {
            SyntaxKind::OpenBraceToken if self.is_mapping_destructure_ahead() => {
                self.parse_type_or_expression_statement()
            }
            SyntaxKind::OpenBraceToken => self.parse_block_statement(),
            SyntaxKind::VarKeyword | SyntaxKind::FinalKeyword => self.parse_local_var_decl(SyntaxNode::Empty),
            SyntaxKind::AtToken | SyntaxKind::DocumentationString => {
                let metadata = self.parse_optional_metadata();
                if self.is_worker_ahead() {
                    self.parse_named_worker(metadata)
                } else {
                    self.parse_local_var_decl(metadata)
                }
            }
            SyntaxKind::WorkerKeyword => self.parse_named_worker(SyntaxNode::Empty),
            SyntaxKind::TransactionalKeyword if self.is_worker_ahead() => {
                self.parse_named_worker(SyntaxNode::Empty)
            }
            SyntaxKind::IfKeyword => self.parse_if_else(),
            SyntaxKind::WhileKeyword => self.parse_while(),
            SyntaxKind::ForeachKeyword => self.parse_foreach(),
            SyntaxKind::MatchKeyword => self.parse_match(),
            SyntaxKind::DoKeyword => self.parse_keyword_block(ParserRuleContext::Do, SyntaxKind::DoStatement),
            SyntaxKind::LockKeyword => self.parse_keyword_block(ParserRuleContext::Lock, SyntaxKind::LockStatement),
            SyntaxKind::TransactionKeyword => self.parse_transaction(),
            SyntaxKind::RetryKeyword => self.parse_retry(),
            SyntaxKind::ReturnKeyword => self.parse_return(),
            SyntaxKind::BreakKeyword => self.parse_keyword_statement(SyntaxKind::BreakStatement),
            SyntaxKind::ContinueKeyword => self.parse_keyword_statement(SyntaxKind::ContinueStatement),
            SyntaxKind::FailKeyword => self.parse_keyword_expression_statement(SyntaxKind::FailStatement),
            SyntaxKind::PanicKeyword => self.parse_keyword_expression_statement(SyntaxKind::PanicStatement),
            SyntaxKind::RollbackKeyword => self.parse_return_like(SyntaxKind::RollbackStatement),
            SyntaxKind::ForkKeyword => self.parse_fork(),
            _ => self.parse_type_or_expression_statement(),
        }
    }

    /// `{ ... }`, with the braces required.
    pub(super) fn parse_block_statement(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::Block);
        let open = self.expect_node(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statements();
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::BlockStatement, vec![open, statements, close])
    }

    /// Whether the `{` at the cursor closes with `} =`, which makes it a
    /// mapping binding pattern rather than a block.
    fn is_mapping_destructure_ahead(&mut self) -> bool {
        let mut depth = 0usize;
        for n in 1..=DESTRUCTURE_SCAN_LIMIT {
            match self.peek_kind_n(n) {
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken => {
                    depth -= 1;
                    if depth == 0 {
                        return self.peek_kind_n(n + 1) == SyntaxKind::EqualToken;
                    }
                }
                SyntaxKind::SemicolonToken | SyntaxKind::EofToken => return false,
                _ => {}
            }
        }
        false
    }

    fn is_worker_ahead(&mut self) -> bool {
        match self.peek_kind() {
            SyntaxKind::WorkerKeyword => true,
            SyntaxKind::TransactionalKeyword => self.peek_kind_n(2) == SyntaxKind::WorkerKeyword,
            _ => false,
        }
    }

    // ========================================================================
    // Declarations and assignments
    // ========================================================================

    /// `[final] T bp [= e];` with the type given up front.
    fn parse_local_var_decl(&mut self, metadata: SyntaxNode) -> SyntaxNode {
        self.start_context(ParserRuleContext::VarDeclaration);
        let final_kw = self.optional_node(SyntaxKind::FinalKeyword);
        let binding = self.parse_typed_binding_pattern();
        let node = self.finish_local_var_decl(metadata, final_kw, binding);
        self.end_context();
        node
    }

    fn finish_local_var_decl(&mut self, metadata: SyntaxNode, final_kw: SyntaxNode, binding: SyntaxNode) -> SyntaxNode {
        let (equal, init) = if self.at_optional(SyntaxKind::EqualToken) {
            (self.consume_node(), self.parse_action_or_expression())
        } else {
            (SyntaxNode::Empty, SyntaxNode::Empty)
        };
        let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
        SyntaxNode::node(
            SyntaxKind::LocalVarDecl,
            vec![metadata, final_kw, binding, equal, init, semicolon],
        )
    }

    /// A statement whose first construct is a type, an expression or a
    /// binding pattern, decided by the token after it.
    fn parse_type_or_expression_statement(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::Statement);
        let lhs = self.parse_type_or_expression();
        let next = self.peek_kind();
        trace!(lhs = ?lhs.kind(), ?next, "resolving statement start");

        let declares = is_definitely_type(&lhs)
            || (matches!(
                next,
                SyntaxKind::Identifier
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::ErrorKeyword
            ) && is_type_convertible(&lhs));

        let node = if declares {
            self.switch_context(ParserRuleContext::VarDeclaration);
            let ty = get_type_desc_from_expr(lhs);
            let pattern = self.parse_binding_pattern();
            let binding = SyntaxNode::node(SyntaxKind::TypedBindingPattern, vec![ty, pattern]);
            self.finish_local_var_decl(SyntaxNode::Empty, SyntaxNode::Empty, binding)
        } else if next == SyntaxKind::EqualToken {
            self.switch_context(ParserRuleContext::Assignment);
            let target = if is_destructure_target(&lhs) {
                get_binding_pattern(lhs)
            } else {
                get_expression(lhs)
            };
            let equal = self.consume_node();
            let value = self.parse_action_or_expression();
            let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
            SyntaxNode::node(SyntaxKind::AssignmentStatement, vec![target, equal, value, semicolon])
        } else if next.is_compound_assignment() {
            self.switch_context(ParserRuleContext::Assignment);
            let target = get_expression(lhs);
            let op = self.consume_node();
            let value = self.parse_action_or_expression();
            let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
            SyntaxNode::node(SyntaxKind::CompoundAssignmentStatement, vec![target, op, value, semicolon])
        } else {
            let expr = get_expression(lhs);
            let kind = if is_call(&expr) {
                SyntaxKind::CallStatement
            } else if expr.kind().is_action() {
                SyntaxKind::ActionStatement
            } else {
                SyntaxKind::ExpressionStatement
            };
            let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
            SyntaxNode::node(kind, vec![expr, semicolon])
        };
        self.end_context();
        node
    }

    // ========================================================================
    // Compound statements
    // ========================================================================

    fn parse_if_else(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::IfElse);
        let if_kw = self.expect_node(SyntaxKind::IfKeyword);
        let condition = self.parse_expression();
        let body = self.parse_block_statement();
        let else_block = if self.at_optional(SyntaxKind::ElseKeyword) {
            let else_kw = self.consume_node();
            let alternative = if self.at(SyntaxKind::IfKeyword) {
                self.nested(|p| p.parse_if_else())
            } else {
                self.parse_block_statement()
            };
            SyntaxNode::node(SyntaxKind::ElseBlock, vec![else_kw, alternative])
        } else {
            SyntaxNode::Empty
        };
        self.end_context();
        SyntaxNode::node(SyntaxKind::IfElseStatement, vec![if_kw, condition, body, else_block])
    }

    fn parse_while(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::While);
        let while_kw = self.consume_node();
        let condition = self.parse_expression();
        let body = self.parse_block_statement();
        let on_fail = self.parse_optional_on_fail();
        self.end_context();
        SyntaxNode::node(SyntaxKind::WhileStatement, vec![while_kw, condition, body, on_fail])
    }

    fn parse_foreach(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::Foreach);
        let foreach = self.consume_node();
        let binding = self.parse_typed_binding_pattern();
        let in_kw = self.expect_node(SyntaxKind::InKeyword);
        let iterable = self.parse_action_or_expression();
        let body = self.parse_block_statement();
        let on_fail = self.parse_optional_on_fail();
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::ForeachStatement,
            vec![foreach, binding, in_kw, iterable, body, on_fail],
        )
    }

    fn parse_match(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::Match);
        let match_kw = self.consume_node();
        let subject = self.parse_action_or_expression();
        let open = self.expect_node(SyntaxKind::OpenBraceToken);
        let clauses = self.parse_list_until(
            |kind| kind == SyntaxKind::CloseBraceToken,
            |p| is_match_pattern_start(p.peek_kind()),
            |p| p.parse_match_clause(),
        );
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        let on_fail = self.parse_optional_on_fail();
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::MatchStatement,
            vec![match_kw, subject, open, clauses, close, on_fail],
        )
    }

    /// `p1 | p2 if guard => { ... }`.
    fn parse_match_clause(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::MatchClause);
        let mut patterns = vec![self.parse_match_pattern()];
        while self.at(SyntaxKind::PipeToken) {
            patterns.push(self.consume_node());
            patterns.push(self.parse_match_pattern());
        }
        let guard = if self.at(SyntaxKind::IfKeyword) {
            let if_kw = self.consume_node();
            let condition = self.parse_expression();
            SyntaxNode::node(SyntaxKind::MatchGuard, vec![if_kw, condition])
        } else {
            SyntaxNode::Empty
        };
        let arrow = self.expect_node(SyntaxKind::RightDoubleArrowToken);
        let body = self.parse_block_statement();
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::MatchClause,
            vec![SyntaxNode::list(patterns), guard, arrow, body],
        )
    }

    /// `do { }` and `lock { }`: a keyword, a block and an optional
    /// `on fail`.
    fn parse_keyword_block(&mut self, ctx: ParserRuleContext, kind: SyntaxKind) -> SyntaxNode {
        self.start_context(ctx);
        let keyword = self.consume_node();
        let body = self.parse_block_statement();
        let on_fail = self.parse_optional_on_fail();
        self.end_context();
        SyntaxNode::node(kind, vec![keyword, body, on_fail])
    }

    fn parse_transaction(&mut self) -> SyntaxNode {
        self.parse_keyword_block(ParserRuleContext::Transaction, SyntaxKind::TransactionStatement)
    }

    /// `retry<T>(args) { }` or `retry transaction { }`.
    fn parse_retry(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::Retry);
        let retry = self.consume_node();
        let type_param = if self.at(SyntaxKind::LtToken) {
            self.parse_type_parameter()
        } else {
            SyntaxNode::Empty
        };
        let args = if self.at(SyntaxKind::OpenParenToken) {
            self.parse_paren_arg_list()
        } else {
            SyntaxNode::Empty
        };
        let (body, on_fail) = if self.at(SyntaxKind::TransactionKeyword) {
            (self.parse_transaction(), SyntaxNode::Empty)
        } else {
            let body = self.parse_block_statement();
            (body, self.parse_optional_on_fail())
        };
        self.end_context();
        SyntaxNode::node(SyntaxKind::RetryStatement, vec![retry, type_param, args, body, on_fail])
    }

    /// `on fail [T e] { }` after a statement that can fail.
    fn parse_optional_on_fail(&mut self) -> SyntaxNode {
        if !(self.at(SyntaxKind::OnKeyword) && self.peek_kind_n(2) == SyntaxKind::FailKeyword) {
            return SyntaxNode::Empty;
        }
        self.start_context(ParserRuleContext::OnFail);
        let on = self.consume_node();
        let fail = self.consume_node();
        let binding = if self.at(SyntaxKind::OpenBraceToken) {
            SyntaxNode::Empty
        } else {
            self.parse_typed_binding_pattern()
        };
        let body = self.parse_block_statement();
        self.end_context();
        SyntaxNode::node(SyntaxKind::OnFailClause, vec![on, fail, binding, body])
    }

    // ========================================================================
    // Simple statements
    // ========================================================================

    fn parse_return(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::Return);
        let node = self.parse_return_like(SyntaxKind::ReturnStatement);
        self.end_context();
        node
    }

    /// `keyword [e];`
    fn parse_return_like(&mut self, kind: SyntaxKind) -> SyntaxNode {
        let keyword = self.consume_node();
        let value = if is_expression_start(self.peek_kind()) {
            self.parse_action_or_expression()
        } else {
            SyntaxNode::Empty
        };
        let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
        SyntaxNode::node(kind, vec![keyword, value, semicolon])
    }

    /// `break;` and `continue;`
    fn parse_keyword_statement(&mut self, kind: SyntaxKind) -> SyntaxNode {
        let keyword = self.consume_node();
        let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
        SyntaxNode::node(kind, vec![keyword, semicolon])
    }

    /// `fail e;` and `panic e;`
    fn parse_keyword_expression_statement(&mut self, kind: SyntaxKind) -> SyntaxNode {
        self.start_context(ParserRuleContext::Statement);
        let keyword = self.consume_node();
        let value = self.parse_expression();
        let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
        self.end_context();
        SyntaxNode::node(kind, vec![keyword, value, semicolon])
    }

    // ========================================================================
    // Workers
    // ========================================================================

    /// `[transactional] worker w [returns T] { } [on fail ...]`
    pub(super) fn parse_named_worker(&mut self, metadata: SyntaxNode) -> SyntaxNode {
        let qualifiers = self.parse_qualifiers();
        let qualifiers = self.validate_qualifiers(qualifiers, WORKER_QUALIFIERS);
        self.start_context(ParserRuleContext::NamedWorker);
        let worker = self.expect_node(SyntaxKind::WorkerKeyword);
        let name = self.expect_node(SyntaxKind::Identifier);
        let return_type = if self.at(SyntaxKind::ReturnsKeyword) {
            self.parse_return_type_descriptor()
        } else {
            SyntaxNode::Empty
        };
        let body = self.parse_block_statement();
        let on_fail = self.parse_optional_on_fail();
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::NamedWorkerDeclaration,
            vec![metadata, qualifiers, worker, name, return_type, body, on_fail],
        )
    }

    /// `fork { worker a { } worker b { } }`
    fn parse_fork(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::Fork);
        let fork = self.consume_node();
        let open = self.expect_node(SyntaxKind::OpenBraceToken);
        let workers = self.parse_list_until(
            |kind| kind == SyntaxKind::CloseBraceToken,
            |p| {
                matches!(
                    p.peek_kind(),
                    SyntaxKind::WorkerKeyword
                        | SyntaxKind::TransactionalKeyword
                        | SyntaxKind::AtToken
                        | SyntaxKind::DocumentationString
                )
            },
            |p| {
                let metadata = p.parse_optional_metadata();
                p.parse_named_worker(metadata)
            },
        );
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::ForkStatement, vec![fork, open, workers, close])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(source: &str) -> SyntaxNode {
        Parser::new(source).parse_statement()
    }

    #[test]
    fn test_local_var_decl_with_builtin_type() {
        let node = statement("int x = 1;");
        assert_eq!(node.kind(), SyntaxKind::LocalVarDecl);
        let binding = node.child(2);
        assert_eq!(binding.child(0).kind(), SyntaxKind::BuiltinSimpleTypeDesc);
        assert_eq!(binding.child(1).kind(), SyntaxKind::CaptureBindingPattern);
        assert!(!node.has_diagnostics());
    }

    #[test]
    fn test_user_type_decl_resolved_by_identifier() {
        let node = statement("Person p = getPerson();");
        assert_eq!(node.kind(), SyntaxKind::LocalVarDecl);
        assert_eq!(node.child(2).child(0).kind(), SyntaxKind::SimpleNameReference);
    }

    #[test]
    fn test_array_type_from_member_access() {
        let node = statement("int[] xs = [];");
        assert_eq!(node.kind(), SyntaxKind::LocalVarDecl);
        assert_eq!(node.child(2).child(0).kind(), SyntaxKind::ArrayTypeDesc);
    }

    #[test]
    fn test_union_of_names_becomes_type() {
        let node = statement("A|B v = f();");
        assert_eq!(node.child(2).child(0).kind(), SyntaxKind::UnionTypeDesc);
    }

    #[test]
    fn test_assignment_and_compound_assignment() {
        let node = statement("a.b = 2;");
        assert_eq!(node.kind(), SyntaxKind::AssignmentStatement);
        assert_eq!(node.child(0).kind(), SyntaxKind::FieldAccess);

        let node = statement("count += 1;");
        assert_eq!(node.kind(), SyntaxKind::CompoundAssignmentStatement);
    }

    #[test]
    fn test_wildcard_assignment() {
        let node = statement("_ = f();");
        assert_eq!(node.kind(), SyntaxKind::AssignmentStatement);
        assert_eq!(node.child(0).kind(), SyntaxKind::WildcardBindingPattern);
    }

    #[test]
    fn test_mapping_destructure_not_a_block() {
        let node = statement("{a, b: c} = m;");
        assert_eq!(node.kind(), SyntaxKind::AssignmentStatement);
        assert_eq!(node.child(0).kind(), SyntaxKind::MappingBindingPattern);

        let node = statement("{ a = 1; }");
        assert_eq!(node.kind(), SyntaxKind::BlockStatement);
    }

    #[test]
    fn test_call_and_action_statements() {
        assert_eq!(statement("f(1);").kind(), SyntaxKind::CallStatement);
        assert_eq!(statement("check obj.close();").kind(), SyntaxKind::CallStatement);
        assert_eq!(statement("c->get();").kind(), SyntaxKind::ActionStatement);
        assert_eq!(statement("a + b;").kind(), SyntaxKind::ExpressionStatement);
    }

    #[test]
    fn test_if_else_chain() {
        let node = statement("if a { } else if b { } else { }");
        assert_eq!(node.kind(), SyntaxKind::IfElseStatement);
        let else_block = node.child(3);
        assert_eq!(else_block.kind(), SyntaxKind::ElseBlock);
        assert_eq!(else_block.child(1).kind(), SyntaxKind::IfElseStatement);
    }

    #[test]
    fn test_match_with_guard_and_alternatives() {
        let node = statement("match x { 1 | 2 => { } var y if y > 3 => { } _ => { } }");
        assert_eq!(node.kind(), SyntaxKind::MatchStatement);
        let clauses = node.child(3);
        assert_eq!(clauses.children().len(), 3);
        assert_eq!(clauses.child(0).child(0).children().len(), 3);
        assert_eq!(clauses.child(1).child(1).kind(), SyntaxKind::MatchGuard);
        assert!(!node.has_diagnostics());
    }

    #[test]
    fn test_do_on_fail() {
        let node = statement("do { } on fail error e { }");
        assert_eq!(node.kind(), SyntaxKind::DoStatement);
        assert_eq!(node.child(2).kind(), SyntaxKind::OnFailClause);
    }

    #[test]
    fn test_retry_transaction() {
        let node = statement("retry<MyRetry>(3) transaction { commit; }");
        assert_eq!(node.kind(), SyntaxKind::RetryStatement);
        assert_eq!(node.child(3).kind(), SyntaxKind::TransactionStatement);
    }

    #[test]
    fn test_fork_with_workers() {
        let node = statement("fork { worker a { } worker b returns int { return 1; } }");
        assert_eq!(node.kind(), SyntaxKind::ForkStatement);
        assert_eq!(node.child(2).children().len(), 2);
        assert_eq!(node.child(2).child(1).child(4).kind(), SyntaxKind::ReturnTypeDescriptor);
    }

    #[test]
    fn test_missing_semicolon_inserted() {
        let node = statement("return a");
        assert_eq!(node.kind(), SyntaxKind::ReturnStatement);
        assert!(node.child(2).is_missing());
        assert_eq!(node.diagnostics()[0].code(), 2);
    }
}
