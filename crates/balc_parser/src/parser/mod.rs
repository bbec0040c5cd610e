//! The grammar driver.
//!
//! A recursive descent parser over a [`TokenReader`]. Each grammar rule lives
//! in one of the submodules as an `impl Parser` block; this module holds the
//! token plumbing shared by all of them, the recovery glue and the public
//! entry points.

mod declarations;
mod expressions;
mod patterns;
mod qualifiers;
mod query;
mod statements;
mod types;

use std::mem;

use balc_diagnostics::messages;
use balc_lexer::{LexerMode, TokenReader};
use balc_syntax::factory::{append_invalid_nodes, missing_token, prepend_invalid_nodes};
use balc_syntax::{SyntaxDiagnostic, SyntaxKind, SyntaxNode, SyntaxTree, Token};
use tracing::debug;

use crate::context::ParserRuleContext;
use crate::options::ParserOptions;
use crate::recovery::{Action, ErrorHandler, Lookahead, Solution};

/// Parses one source text.
///
/// A parser instance owns all mutable parse state: the token reader, the
/// context stack, the inserted-token slot and the invalid tokens waiting for
/// a home. Entry points consume the rest of the input, so each instance is
/// good for one parse.
pub struct Parser {
    reader: TokenReader,
    errors: ErrorHandler,
    options: ParserOptions,
    /// Token produced by an `Insert` solution, returned by the next consume.
    inserted_token: Option<Token>,
    /// Removed tokens, prepended to the leading minutiae of the next token
    /// that gets consumed.
    invalid_pending: Vec<SyntaxNode>,
    recursion_depth: u32,
    /// The last consumed token ended its line.
    after_newline: bool,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: &str, options: ParserOptions) -> Self {
        let source_len = source.chars().count();
        Self {
            reader: TokenReader::new(source),
            errors: ErrorHandler::new(&options, source_len),
            options,
            inserted_token: None,
            invalid_pending: Vec::new(),
            recursion_depth: 0,
            after_newline: true,
        }
    }

    /// Recovery decisions taken so far.
    pub fn recovery_steps(&self) -> u64 {
        self.errors.steps()
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn peek_kind(&mut self) -> SyntaxKind {
        match &self.inserted_token {
            Some(token) => token.kind,
            None => self.reader.peek_kind(),
        }
    }

    /// Kind of the n-th upcoming token, 1-based.
    fn peek_kind_n(&mut self, n: usize) -> SyntaxKind {
        match (&self.inserted_token, n) {
            (Some(token), 1) => token.kind,
            (Some(_), n) => self.reader.peek_kind_n(n - 1),
            (None, n) => self.reader.peek_kind_n(n),
        }
    }

    fn peek(&mut self) -> &Token {
        match self.inserted_token {
            Some(ref token) => token,
            None => self.reader.peek(),
        }
    }

    fn peek_n(&mut self, n: usize) -> &Token {
        match (&self.inserted_token, n) {
            (Some(token), 0 | 1) => token,
            (Some(_), n) => self.reader.peek_n(n - 1),
            (None, n) => self.reader.peek_n(n),
        }
    }

    /// Real tokens consumed so far.
    fn position(&self) -> usize {
        self.reader.consumed_count()
    }

    fn at(&mut self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    fn consume(&mut self) -> Token {
        let mut token = match self.inserted_token.take() {
            Some(token) => token,
            None => self.reader.consume(),
        };
        let pending = mem::take(&mut self.invalid_pending);
        prepend_invalid_nodes(&mut token, pending);
        if !token.is_missing {
            self.after_newline = token.has_trailing_newline();
        }
        token
    }

    fn consume_node(&mut self) -> SyntaxNode {
        self.consume().into()
    }

    /// Consume a token of `kind`, recovering if the next token is something
    /// else. Always returns a token of `kind`, possibly a missing one.
    fn expect(&mut self, kind: SyntaxKind) -> Token {
        let mut inserted = false;
        loop {
            if self.peek_kind() == kind {
                return self.consume();
            }
            if inserted {
                break;
            }
            let solution = self.recover(Some(kind));
            match solution.action {
                Action::Insert => {
                    self.inserted_token = solution.recovered;
                    inserted = true;
                }
                Action::Remove => {}
                Action::Keep => break,
            }
        }
        missing_token(kind)
    }

    fn expect_node(&mut self, kind: SyntaxKind) -> SyntaxNode {
        self.expect(kind).into()
    }

    fn optional(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.consume())
        } else {
            None
        }
    }

    /// Whether an optional clause starting with `kind` is next. A single
    /// stray token in front of the clause goes to recovery first, so the
    /// clause is not lost to it. Only a `Remove` is acted on: an optional
    /// clause never gets an inserted start.
    fn at_optional(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) && self.peek_kind_n(2) == kind {
            self.recover(Some(kind));
        }
        self.at(kind)
    }

    /// The token if present, `Empty` otherwise.
    fn optional_node(&mut self, kind: SyntaxKind) -> SyntaxNode {
        self.optional(kind).map_or(SyntaxNode::Empty, SyntaxNode::from)
    }

    fn start_mode(&mut self, mode: LexerMode) {
        self.reader.start_mode(mode);
    }

    fn end_mode(&mut self) {
        self.reader.end_mode();
    }

    // ========================================================================
    // Recovery glue
    // ========================================================================

    fn start_context(&mut self, ctx: ParserRuleContext) {
        self.errors.start_context(ctx);
    }

    fn end_context(&mut self) {
        self.errors.end_context();
    }

    fn switch_context(&mut self, ctx: ParserRuleContext) {
        self.errors.switch_context(ctx);
    }

    fn current_context(&self) -> ParserRuleContext {
        self.errors
            .current_context()
            .unwrap_or(ParserRuleContext::CompilationUnit)
    }

    /// Ask the recovery engine what to do with the next token. A `Remove`
    /// is carried out before returning.
    fn recover(&mut self, expected: Option<SyntaxKind>) -> Solution {
        let token = self.peek_kind();
        let next = self.peek_kind_n(2);
        let lookahead = Lookahead {
            token,
            next,
            position: self.position(),
            at_line_start: self.after_newline,
        };
        let is_completion = token == SyntaxKind::CloseBraceToken && self.errors.in_block();
        let ctx = self.current_context();
        let solution = self.errors.recover(ctx, expected, lookahead, is_completion);
        if solution.action == Action::Remove {
            self.remove_token();
        }
        solution
    }

    /// Recover as if `ctx` were the innermost context.
    fn recover_in(&mut self, ctx: ParserRuleContext, expected: Option<SyntaxKind>) -> Solution {
        self.start_context(ctx);
        let solution = self.recover(expected);
        self.end_context();
        solution
    }

    /// Move the next real token into the pending invalid list.
    fn remove_token(&mut self) {
        let mut token = self.reader.consume();
        if token.kind == SyntaxKind::EofToken {
            // Never swallow the end of input; hand it back as a synthetic
            // insertion of nothing.
            self.inserted_token = Some(token);
            return;
        }
        if token.diagnostics.is_empty() {
            let text = token.text.clone();
            token.add_diagnostic(SyntaxDiagnostic::new(messages::ERROR_INVALID_TOKEN, &[&text]));
        }
        self.after_newline = token.has_trailing_newline();
        self.invalid_pending.push(token.into());
    }

    /// Attach already-parsed nodes as invalid minutiae: to the end of
    /// `anchor` when there is one, otherwise in front of the next token.
    fn attach_invalid_nodes(&mut self, anchor: Option<&mut Token>, invalid: Vec<SyntaxNode>) {
        match anchor {
            Some(token) => append_invalid_nodes(token, invalid),
            None => self.invalid_pending.extend(invalid),
        }
    }

    // ========================================================================
    // Nesting limit
    // ========================================================================

    /// Run a recursive rule under the nesting limit. Past the limit nothing
    /// is consumed and a missing name reference with
    /// `ERROR_EXPRESSION_TOO_DEEPLY_NESTED` stands in for the construct.
    fn nested(&mut self, rule: impl FnOnce(&mut Self) -> SyntaxNode) -> SyntaxNode {
        if self.recursion_depth >= self.options.max_recursion_depth {
            debug!(depth = self.recursion_depth, "recursion limit reached");
            let reason = format!(
                "nesting exceeds {} levels",
                self.options.max_recursion_depth
            );
            let token = Token::missing(
                SyntaxKind::Identifier,
                SyntaxDiagnostic::new(messages::ERROR_EXPRESSION_TOO_DEEPLY_NESTED, &[&reason]),
            );
            return SyntaxNode::node(SyntaxKind::SimpleNameReference, vec![token.into()]);
        }
        self.recursion_depth += 1;
        let node = rule(self);
        self.recursion_depth -= 1;
        node
    }

    // ========================================================================
    // List helpers
    // ========================================================================

    /// Parse a comma separated list up to (not including) `close`. Elements
    /// are parsed only at tokens `is_start` accepts; separators sit at odd
    /// indices of the result.
    fn parse_separated_list(
        &mut self,
        close: SyntaxKind,
        is_start: fn(SyntaxKind) -> bool,
        mut parse_element: impl FnMut(&mut Self) -> SyntaxNode,
    ) -> SyntaxNode {
        let mut items: Vec<SyntaxNode> = Vec::new();
        let mut expect_separator = false;
        loop {
            let kind = self.peek_kind();
            if kind == close || kind == SyntaxKind::EofToken {
                break;
            }
            if expect_separator {
                if kind == SyntaxKind::CommaToken {
                    items.push(self.consume_node());
                    expect_separator = false;
                    continue;
                }
                if !is_start(kind) {
                    match self.recover(None).action {
                        Action::Remove => continue,
                        _ => break,
                    }
                }
                // An element right after an element: a comma is missing.
                let solution = self.recover(Some(SyntaxKind::CommaToken));
                match solution.action {
                    Action::Insert => {
                        self.inserted_token = solution.recovered;
                        items.push(self.consume_node());
                        expect_separator = false;
                    }
                    Action::Remove => {}
                    Action::Keep => break,
                }
                continue;
            }
            if !is_start(kind) {
                match self.recover(None).action {
                    Action::Remove => continue,
                    _ => break,
                }
            }
            let before = self.position();
            items.push(parse_element(self));
            expect_separator = true;
            if self.position() == before {
                break;
            }
        }
        SyntaxNode::list(items)
    }

    /// Parse elements until `is_end` holds or recovery keeps a token for an
    /// enclosing rule.
    fn parse_list_until(
        &mut self,
        is_end: fn(SyntaxKind) -> bool,
        is_start: impl Fn(&mut Self) -> bool,
        mut parse_element: impl FnMut(&mut Self) -> SyntaxNode,
    ) -> SyntaxNode {
        let mut items = Vec::new();
        loop {
            let kind = self.peek_kind();
            if kind == SyntaxKind::EofToken || is_end(kind) {
                break;
            }
            if !is_start(self) {
                match self.recover(None).action {
                    Action::Remove => continue,
                    _ => break,
                }
            }
            let before = self.position();
            items.push(parse_element(self));
            if self.position() == before {
                break;
            }
        }
        SyntaxNode::list(items)
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// Parse a whole module.
    pub fn parse_compilation_unit(&mut self) -> SyntaxTree {
        self.start_context(ParserRuleContext::CompilationUnit);
        let root = self.parse_module_part();
        self.end_context();
        self.finish(root)
    }

    pub fn parse_as_statement(&mut self) -> SyntaxTree {
        self.start_context(ParserRuleContext::FunctionBody);
        let root = if self.is_statement_start() {
            self.parse_statement()
        } else {
            SyntaxNode::Empty
        };
        self.end_context();
        self.finish(root)
    }

    pub fn parse_as_statement_list(&mut self) -> SyntaxTree {
        self.start_context(ParserRuleContext::FunctionBody);
        let root = self.parse_statements();
        self.end_context();
        self.finish(root)
    }

    pub fn parse_as_expression(&mut self) -> SyntaxTree {
        self.start_context(ParserRuleContext::Expression);
        let root = self.parse_action_or_expression();
        self.end_context();
        self.finish(root)
    }

    pub fn parse_as_module_member(&mut self) -> SyntaxTree {
        self.start_context(ParserRuleContext::CompilationUnit);
        let root = if self.at(SyntaxKind::ImportKeyword) {
            self.parse_import_declaration()
        } else if self.is_module_member_start() {
            self.parse_module_member()
        } else {
            SyntaxNode::Empty
        };
        self.end_context();
        self.finish(root)
    }

    pub fn parse_as_import_declaration(&mut self) -> SyntaxTree {
        self.start_context(ParserRuleContext::CompilationUnit);
        let root = self.parse_import_declaration();
        self.end_context();
        self.finish(root)
    }

    pub fn parse_as_type_descriptor(&mut self) -> SyntaxTree {
        self.start_context(ParserRuleContext::TypeDescriptor);
        let root = self.parse_type_descriptor();
        self.end_context();
        self.finish(root)
    }

    pub fn parse_as_binding_pattern(&mut self) -> SyntaxTree {
        self.start_context(ParserRuleContext::BindingPattern);
        let root = self.parse_binding_pattern();
        self.end_context();
        self.finish(root)
    }

    pub fn parse_as_function_body_block(&mut self) -> SyntaxTree {
        self.start_context(ParserRuleContext::FunctionDefinition);
        let root = self.parse_function_body_block();
        self.end_context();
        self.finish(root)
    }

    pub fn parse_as_object_member(&mut self) -> SyntaxTree {
        self.start_context(ParserRuleContext::ObjectMembers);
        let root = self.parse_object_member(false);
        self.end_context();
        self.finish(root)
    }

    pub fn parse_as_query_intermediate_clause(&mut self, allow_actions: bool) -> SyntaxTree {
        self.start_context(ParserRuleContext::Query);
        let root = if self.is_intermediate_clause_start() {
            self.parse_intermediate_clause(allow_actions)
        } else {
            SyntaxNode::Empty
        };
        self.end_context();
        self.finish(root)
    }

    pub fn parse_as_let_declaration(&mut self) -> SyntaxTree {
        self.start_context(ParserRuleContext::LetExpression);
        let root = self.parse_let_var_decl(false);
        self.end_context();
        self.finish(root)
    }

    pub fn parse_as_annotation(&mut self) -> SyntaxTree {
        self.start_context(ParserRuleContext::Annotation);
        let root = self.parse_annotation();
        self.end_context();
        self.finish(root)
    }

    /// Fold everything left in the input into the tree: unconsumed tokens
    /// and pending invalid tokens become trailing invalid minutiae of the
    /// root's last token, followed by the end-of-input trivia. A root
    /// without tokens is replaced by the end-of-input token.
    fn finish(&mut self, mut root: SyntaxNode) -> SyntaxTree {
        if let Some(token) = self.inserted_token.take() {
            if !token.is_missing && token.kind == SyntaxKind::EofToken {
                // Handed back by `remove_token`; it is still the real EOF.
                return self.finish_with_eof(root, token);
            }
        }
        let mut trailing = mem::take(&mut self.invalid_pending);
        let eof = loop {
            let mut token = self.reader.consume();
            if token.kind == SyntaxKind::EofToken {
                break token;
            }
            if token.diagnostics.is_empty() {
                let text = token.text.clone();
                token.add_diagnostic(SyntaxDiagnostic::new(messages::ERROR_INVALID_TOKEN, &[&text]));
            }
            trailing.push(token.into());
        };
        self.invalid_pending = trailing;
        if root.last_token().is_none() {
            root = SyntaxNode::Empty;
        }
        self.finish_with_eof(root, eof)
    }

    fn finish_with_eof(&mut self, root: SyntaxNode, mut eof: Token) -> SyntaxTree {
        let trailing = mem::take(&mut self.invalid_pending);
        let mut root = root;
        match root.last_token_mut() {
            Some(last) => {
                append_invalid_nodes(last, trailing);
                last.trailing.append(&mut eof.leading);
            }
            None => {
                prepend_invalid_nodes(&mut eof, trailing);
                root = eof.into();
            }
        }
        SyntaxTree::new(root)
    }
}
