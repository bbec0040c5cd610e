//! Query expressions and query actions.

use balc_diagnostics::messages;
use balc_syntax::factory::{missing_expression, missing_token_with};
use balc_syntax::{SyntaxKind, SyntaxNode};

use super::Parser;
use crate::context::ParserRuleContext;
use crate::precedence::OperatorPrecedence;

impl Parser {
    pub(super) fn is_intermediate_clause_start(&mut self) -> bool {
        match self.peek_kind() {
            SyntaxKind::FromKeyword
            | SyntaxKind::WhereKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::JoinKeyword
            | SyntaxKind::LimitKeyword => true,
            SyntaxKind::OuterKeyword => self.peek_kind_n(2) == SyntaxKind::JoinKeyword,
            SyntaxKind::OrderKeyword => self.peek_kind_n(2) == SyntaxKind::ByKeyword,
            _ => false,
        }
    }

    /// `from ... select e`, `from ... collect e` or `from ... do { }`.
    pub(super) fn parse_query(&mut self, allow_actions: bool) -> SyntaxNode {
        self.start_context(ParserRuleContext::Query);
        let from = self.parse_from_clause(allow_actions);
        let mut clauses = Vec::new();
        while self.is_intermediate_clause_start() {
            clauses.push(self.parse_intermediate_clause(allow_actions));
        }
        let pipeline = SyntaxNode::node(SyntaxKind::QueryPipeline, vec![from, SyntaxNode::list(clauses)]);

        let node = match self.peek_kind() {
            SyntaxKind::DoKeyword => {
                let do_kw = self.consume_node();
                let block = self.parse_block_statement();
                let action = SyntaxNode::node(SyntaxKind::QueryAction, vec![pipeline, do_kw, block]);
                self.end_context();
                return action;
            }
            SyntaxKind::SelectKeyword | SyntaxKind::CollectKeyword => {
                let kind = if self.at(SyntaxKind::SelectKeyword) {
                    SyntaxKind::SelectClause
                } else {
                    SyntaxKind::CollectClause
                };
                let keyword = self.consume_node();
                let expr = self.parse_expression_with(OperatorPrecedence::Query, allow_actions, false);
                SyntaxNode::node(kind, vec![keyword, expr])
            }
            _ => {
                let select = missing_token_with(SyntaxKind::SelectKeyword, messages::ERROR_MISSING_SELECT_CLAUSE);
                SyntaxNode::node(SyntaxKind::SelectClause, vec![select.into(), missing_expression()])
            }
        };
        let on_conflict = if self.at(SyntaxKind::OnKeyword) && self.peek_kind_n(2) == SyntaxKind::ConflictKeyword {
            let on = self.consume_node();
            let conflict = self.consume_node();
            let expr = self.parse_expression_with(OperatorPrecedence::Query, false, false);
            SyntaxNode::node(SyntaxKind::OnConflictClause, vec![on, conflict, expr])
        } else {
            SyntaxNode::Empty
        };
        self.end_context();
        SyntaxNode::node(SyntaxKind::QueryExpression, vec![pipeline, node, on_conflict])
    }

    fn parse_from_clause(&mut self, allow_actions: bool) -> SyntaxNode {
        let from = self.expect_node(SyntaxKind::FromKeyword);
        let binding = self.parse_typed_binding_pattern();
        let in_kw = self.expect_node(SyntaxKind::InKeyword);
        let expr = self.parse_expression_with(OperatorPrecedence::Query, allow_actions, false);
        SyntaxNode::node(SyntaxKind::FromClause, vec![from, binding, in_kw, expr])
    }

    /// One clause between `from` and `select`.
    pub(super) fn parse_intermediate_clause(&mut self, allow_actions: bool) -> SyntaxNode {
        self.start_context(ParserRuleContext::QueryClause);
        let clause = match self.peek_kind() {
            SyntaxKind::FromKeyword => self.parse_from_clause(allow_actions),
            SyntaxKind::WhereKeyword => {
                let where_kw = self.consume_node();
                let expr = self.parse_expression_with(OperatorPrecedence::Query, allow_actions, false);
                SyntaxNode::node(SyntaxKind::WhereClause, vec![where_kw, expr])
            }
            SyntaxKind::LetKeyword => {
                let let_kw = self.consume_node();
                let mut decls = vec![self.parse_let_var_decl(allow_actions)];
                while self.at(SyntaxKind::CommaToken) {
                    decls.push(self.consume_node());
                    decls.push(self.parse_let_var_decl(allow_actions));
                }
                SyntaxNode::node(SyntaxKind::LetClause, vec![let_kw, SyntaxNode::list(decls)])
            }
            SyntaxKind::OuterKeyword | SyntaxKind::JoinKeyword => self.parse_join_clause(allow_actions),
            SyntaxKind::OrderKeyword => {
                let order = self.consume_node();
                let by = self.expect_node(SyntaxKind::ByKeyword);
                let mut keys = vec![self.parse_order_key(allow_actions)];
                while self.at(SyntaxKind::CommaToken) {
                    keys.push(self.consume_node());
                    keys.push(self.parse_order_key(allow_actions));
                }
                SyntaxNode::node(SyntaxKind::OrderByClause, vec![order, by, SyntaxNode::list(keys)])
            }
            _ => {
                let limit = self.expect_node(SyntaxKind::LimitKeyword);
                let expr = self.parse_expression_with(OperatorPrecedence::Query, allow_actions, false);
                SyntaxNode::node(SyntaxKind::LimitClause, vec![limit, expr])
            }
        };
        self.end_context();
        clause
    }

    /// `[outer] join T x in e on a equals b`.
    fn parse_join_clause(&mut self, allow_actions: bool) -> SyntaxNode {
        let outer = self.optional_node(SyntaxKind::OuterKeyword);
        let join = self.expect_node(SyntaxKind::JoinKeyword);
        let binding = self.parse_typed_binding_pattern();
        let in_kw = self.expect_node(SyntaxKind::InKeyword);
        let expr = self.parse_expression_with(OperatorPrecedence::Query, allow_actions, false);
        let on = self.expect_node(SyntaxKind::OnKeyword);
        let lhs = self.parse_expression_with(OperatorPrecedence::Query, allow_actions, false);
        let equals = self.expect_node(SyntaxKind::EqualsKeyword);
        let rhs = self.parse_expression_with(OperatorPrecedence::Query, allow_actions, false);
        let on_clause = SyntaxNode::node(SyntaxKind::OnClause, vec![on, lhs, equals, rhs]);
        SyntaxNode::node(SyntaxKind::JoinClause, vec![outer, join, binding, in_kw, expr, on_clause])
    }

    fn parse_order_key(&mut self, allow_actions: bool) -> SyntaxNode {
        let expr = self.parse_expression_with(OperatorPrecedence::Query, allow_actions, false);
        let direction = match self.peek_kind() {
            SyntaxKind::AscendingKeyword | SyntaxKind::DescendingKeyword => self.consume_node(),
            _ => SyntaxNode::Empty,
        };
        SyntaxNode::node(SyntaxKind::OrderKey, vec![expr, direction])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(source: &str) -> SyntaxNode {
        Parser::new(source).parse_action_or_expression()
    }

    #[test]
    fn test_select_query() {
        let node = query("from var x in xs where x > 1 let int y = x * 2 select y");
        assert_eq!(node.kind(), SyntaxKind::QueryExpression);
        let pipeline = node.child(0);
        assert_eq!(pipeline.child(0).kind(), SyntaxKind::FromClause);
        let clauses = pipeline.child(1);
        assert_eq!(clauses.child(0).kind(), SyntaxKind::WhereClause);
        assert_eq!(clauses.child(1).kind(), SyntaxKind::LetClause);
        assert_eq!(node.child(1).kind(), SyntaxKind::SelectClause);
    }

    #[test]
    fn test_join_and_order_by() {
        let node = query("from var a in xs join var b in ys on a.id equals b.id order by a.name descending select a");
        let clauses = node.child(0).child(1);
        assert_eq!(clauses.child(0).kind(), SyntaxKind::JoinClause);
        assert_eq!(clauses.child(1).kind(), SyntaxKind::OrderByClause);
    }

    #[test]
    fn test_query_action() {
        let node = query("from var x in xs do { f(x); }");
        assert_eq!(node.kind(), SyntaxKind::QueryAction);
    }

    #[test]
    fn test_query_action_rejected_in_expression() {
        let node = Parser::new("from var x in xs do { }").parse_expression();
        assert_eq!(node.kind(), SyntaxKind::SimpleNameReference);
        assert_eq!(node.diagnostics()[0].code(), 105);
    }

    #[test]
    fn test_missing_select_clause() {
        let node = query("from var x in xs");
        let codes: Vec<u32> = node.diagnostics().iter().map(|d| d.code()).collect();
        assert!(codes.contains(&26));
    }
}
