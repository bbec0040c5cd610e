//! Error recovery engine.
//!
//! Every grammar rule that meets a token it cannot use asks the
//! [`ErrorHandler`] for a [`Solution`]. The handler looks at the context
//! stack and a declarative table of first and follow sets per context, then
//! decides whether to insert the expected token, remove the unexpected one,
//! or keep it for an enclosing rule.

use balc_core::collections::Counter;
use balc_syntax::factory::missing_token;
use balc_syntax::{SyntaxKind, Token};
use tracing::{debug, trace};

use crate::context::ParserRuleContext;
use crate::options::ParserOptions;

/// What the caller should do with the unexpected token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Act as if the expected token was present. The solution carries a
    /// zero-width missing token.
    Insert,
    /// Skip the token; it becomes invalid-node minutiae.
    Remove,
    /// Leave the token for an enclosing rule and end the current one.
    Keep,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub action: Action,
    pub ctx: ParserRuleContext,
    /// The expected token for `Insert`, the offending token otherwise.
    pub token_kind: SyntaxKind,
    /// The synthesised token for `Insert`.
    pub recovered: Option<Token>,
}

/// The tokens recovery looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookahead {
    pub token: SyntaxKind,
    pub next: SyntaxKind,
    /// Consumed-token count, used to detect repeated inserts in one place.
    pub position: usize,
    /// The previous token ended its line.
    pub at_line_start: bool,
}

/// First and follow sets of one context.
#[derive(Debug, Clone, Copy)]
pub struct ContextRule {
    pub first: &'static [SyntaxKind],
    pub follow: &'static [SyntaxKind],
}

impl ContextRule {
    const fn new(first: &'static [SyntaxKind], follow: &'static [SyntaxKind]) -> Self {
        Self { first, follow }
    }

    pub fn accepts(&self, kind: SyntaxKind) -> bool {
        self.first.contains(&kind) || self.follow.contains(&kind)
    }
}

// ============================================================================
// Token sets
// ============================================================================

use SyntaxKind as K;

pub(crate) const MODULE_MEMBER_START: &[SyntaxKind] = &[
    K::ImportKeyword,
    K::PublicKeyword,
    K::IsolatedKeyword,
    K::TransactionalKeyword,
    K::FunctionKeyword,
    K::TypeKeyword,
    K::ConstKeyword,
    K::FinalKeyword,
    K::ConfigurableKeyword,
    K::ListenerKeyword,
    K::EnumKeyword,
    K::ClassKeyword,
    K::ServiceKeyword,
    K::AnnotationKeyword,
    K::XmlnsKeyword,
    K::AtToken,
    K::DocumentationString,
];

pub(crate) const STATEMENT_START: &[SyntaxKind] = &[
    K::ReturnKeyword,
    K::IfKeyword,
    K::WhileKeyword,
    K::ForeachKeyword,
    K::MatchKeyword,
    K::DoKeyword,
    K::LockKeyword,
    K::FailKeyword,
    K::PanicKeyword,
    K::BreakKeyword,
    K::ContinueKeyword,
    K::TransactionKeyword,
    K::RetryKeyword,
    K::RollbackKeyword,
    K::WorkerKeyword,
    K::ForkKeyword,
    K::VarKeyword,
    K::FinalKeyword,
    K::CheckKeyword,
    K::CheckpanicKeyword,
    K::IntKeyword,
    K::FloatKeyword,
    K::DecimalKeyword,
    K::StringKeyword,
    K::BooleanKeyword,
    K::ByteKeyword,
    K::JsonKeyword,
    K::AnydataKeyword,
    K::AnyKeyword,
    K::MapKeyword,
];

const EXPRESSION_START: &[SyntaxKind] = &[
    K::Identifier,
    K::DecimalIntegerLiteralToken,
    K::HexIntegerLiteralToken,
    K::DecimalFloatingPointLiteralToken,
    K::StringLiteralToken,
    K::TrueKeyword,
    K::FalseKeyword,
    K::NullKeyword,
    K::OpenParenToken,
    K::OpenBracketToken,
    K::MinusToken,
    K::ExclamationMarkToken,
    K::NegationToken,
    K::BacktickToken,
    K::NewKeyword,
    K::FromKeyword,
    K::LetKeyword,
    K::TypeofKeyword,
    K::TrapKeyword,
];

const TYPE_FOLLOW: &[SyntaxKind] = &[
    K::Identifier,
    K::EqualToken,
    K::SemicolonToken,
    K::GtToken,
    K::CommaToken,
    K::CloseParenToken,
    K::CloseBracketToken,
    K::OpenBraceToken,
    K::CloseBraceToken,
];

const EXPRESSION_FOLLOW: &[SyntaxKind] = &[
    K::SemicolonToken,
    K::CloseParenToken,
    K::CloseBracketToken,
    K::CloseBraceToken,
    K::CommaToken,
];

const QUERY_CLAUSE_START: &[SyntaxKind] = &[
    K::FromKeyword,
    K::WhereKeyword,
    K::LetKeyword,
    K::JoinKeyword,
    K::OuterKeyword,
    K::OrderKeyword,
    K::LimitKeyword,
    K::SelectKeyword,
    K::CollectKeyword,
    K::DoKeyword,
    K::OnKeyword,
];

const BODY_START: &[SyntaxKind] = &[K::OpenBraceToken];
const NONE: &[SyntaxKind] = &[];

/// The recovery table: what can start each context and what may follow it.
pub fn context_rule(ctx: ParserRuleContext) -> ContextRule {
    use ParserRuleContext as C;
    match ctx {
        C::CompilationUnit => ContextRule::new(MODULE_MEMBER_START, &[K::EofToken]),
        C::ImportDeclaration => ContextRule::new(&[K::ImportKeyword], &[K::SemicolonToken, K::AsKeyword]),
        C::ModuleMember | C::Metadata => ContextRule::new(MODULE_MEMBER_START, NONE),
        C::Annotation => ContextRule::new(&[K::AtToken], NONE),
        C::FunctionDefinition => ContextRule::new(
            &[K::FunctionKeyword],
            &[K::OpenBraceToken, K::RightDoubleArrowToken],
        ),
        C::FunctionSignature => ContextRule::new(
            &[K::OpenParenToken],
            &[K::ReturnsKeyword, K::OpenBraceToken, K::RightDoubleArrowToken, K::EqualToken, K::SemicolonToken],
        ),
        C::ParameterList => ContextRule::new(NONE, &[K::CloseParenToken, K::CommaToken, K::ReturnsKeyword]),
        C::Parameter => ContextRule::new(&[K::AtToken], &[K::EqualToken, K::EllipsisToken]),
        C::ReturnType => ContextRule::new(&[K::ReturnsKeyword], &[K::OpenBraceToken, K::SemicolonToken]),
        C::FunctionBody | C::Block => ContextRule::new(STATEMENT_START, &[K::CloseBraceToken]),
        C::ExternalFunctionBody => ContextRule::new(&[K::EqualToken], &[K::ExternalKeyword, K::SemicolonToken]),
        C::TypeDefinition | C::ConstDeclaration | C::ListenerDeclaration | C::XmlnsDeclaration => {
            ContextRule::new(NONE, &[K::SemicolonToken, K::EqualToken])
        }
        C::ModuleVarDeclaration | C::VarDeclaration => {
            ContextRule::new(NONE, &[K::SemicolonToken, K::EqualToken])
        }
        C::AnnotationDeclaration => ContextRule::new(&[K::AnnotationKeyword], &[K::OnKeyword, K::SemicolonToken]),
        C::EnumDeclaration => ContextRule::new(&[K::EnumKeyword], &[K::CloseBraceToken, K::CommaToken]),
        C::ClassDefinition | C::ServiceDeclaration | C::ObjectType | C::ObjectConstructor => {
            ContextRule::new(BODY_START, &[K::OnKeyword])
        }
        C::ObjectMembers => ContextRule::new(
            &[K::FunctionKeyword, K::PublicKeyword, K::PrivateKeyword, K::RemoteKeyword, K::ResourceKeyword],
            &[K::CloseBraceToken],
        ),
        C::ObjectMember | C::RecordField => ContextRule::new(NONE, &[K::SemicolonToken]),
        C::Statement | C::Assignment | C::Return => ContextRule::new(NONE, &[K::SemicolonToken]),
        C::IfElse | C::While | C::Lock | C::Do | C::Transaction | C::Retry | C::OnFail | C::NamedWorker => {
            ContextRule::new(NONE, &[K::OpenBraceToken, K::ElseKeyword])
        }
        C::Foreach => ContextRule::new(NONE, &[K::InKeyword, K::OpenBraceToken]),
        C::Match => ContextRule::new(NONE, &[K::OpenBraceToken, K::CloseBraceToken]),
        C::MatchClause | C::MatchPattern => {
            ContextRule::new(NONE, &[K::RightDoubleArrowToken, K::PipeToken, K::IfKeyword])
        }
        C::Fork => ContextRule::new(&[K::WorkerKeyword], &[K::CloseBraceToken]),
        C::Expression | C::Action => ContextRule::new(EXPRESSION_START, EXPRESSION_FOLLOW),
        C::ArgumentList => ContextRule::new(NONE, &[K::CloseParenToken, K::CommaToken]),
        C::BracedExpression => ContextRule::new(NONE, &[K::CloseParenToken]),
        C::ListConstructor | C::TupleType | C::ListBindingPattern | C::AmbiguousList => {
            ContextRule::new(NONE, &[K::CloseBracketToken, K::CommaToken])
        }
        C::MappingConstructor | C::MappingBindingPattern => {
            ContextRule::new(NONE, &[K::CloseBraceToken, K::CommaToken])
        }
        C::ErrorBindingPattern => ContextRule::new(NONE, &[K::CloseParenToken, K::CommaToken]),
        C::RecordType => ContextRule::new(
            NONE,
            &[K::CloseBraceToken, K::ClosePipeBraceToken, K::SemicolonToken],
        ),
        C::TypeCast | C::TypeParameter => ContextRule::new(NONE, &[K::GtToken]),
        C::Template => ContextRule::new(NONE, &[K::BacktickToken]),
        C::Interpolation | C::Natural => ContextRule::new(NONE, &[K::CloseBraceToken]),
        C::LetExpression => ContextRule::new(NONE, &[K::InKeyword, K::CommaToken]),
        C::AnonFunction => ContextRule::new(NONE, &[K::OpenBraceToken, K::RightDoubleArrowToken]),
        C::Query | C::QueryClause => ContextRule::new(QUERY_CLAUSE_START, NONE),
        C::TypeDescriptor => ContextRule::new(NONE, TYPE_FOLLOW),
        C::BindingPattern => ContextRule::new(NONE, &[K::EqualToken, K::InKeyword, K::SemicolonToken]),
        C::Qualifiers => ContextRule::new(NONE, NONE),
    }
}

/// A single stray token: the rule cannot use it, but it can use the token
/// right after it. A token starting a line is left to the sync check, as
/// it more likely begins the next construct.
fn is_stray_token(rule: ContextRule, expected: Option<SyntaxKind>, lookahead: &Lookahead) -> bool {
    !lookahead.at_line_start
        && !rule.accepts(lookahead.token)
        && (Some(lookahead.next) == expected || rule.accepts(lookahead.next))
}

// ============================================================================
// Error handler
// ============================================================================

/// Owns the context stack and the recovery counters of one parse.
#[derive(Debug)]
pub struct ErrorHandler {
    ctx_stack: Vec<ParserRuleContext>,
    steps: u64,
    budget: u64,
    insert_fuel: u32,
    /// Inserts made in front of each token position.
    inserts: Counter<usize>,
}

impl ErrorHandler {
    pub fn new(options: &ParserOptions, source_len: usize) -> Self {
        Self {
            ctx_stack: Vec::new(),
            steps: 0,
            budget: options.step_budget(source_len),
            insert_fuel: options.max_inserts_per_token,
            inserts: Counter::new(),
        }
    }

    pub fn start_context(&mut self, ctx: ParserRuleContext) {
        trace!(ctx = %ctx, depth = self.ctx_stack.len(), "start context");
        self.ctx_stack.push(ctx);
    }

    pub fn end_context(&mut self) {
        if let Some(ctx) = self.ctx_stack.pop() {
            trace!(ctx = %ctx, depth = self.ctx_stack.len(), "end context");
        }
    }

    pub fn switch_context(&mut self, ctx: ParserRuleContext) {
        self.end_context();
        self.start_context(ctx);
    }

    pub fn current_context(&self) -> Option<ParserRuleContext> {
        self.ctx_stack.last().copied()
    }

    /// Whether a `}` would close some block-shaped construct on the stack.
    pub fn in_block(&self) -> bool {
        self.ctx_stack.iter().any(|ctx| ctx.is_block())
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn is_sync_token(&self, lookahead: &Lookahead) -> bool {
        if self.ctx_stack.iter().any(|ctx| context_rule(*ctx).accepts(lookahead.token)) {
            return true;
        }
        // An identifier that starts a line inside a block most likely starts
        // the next statement.
        lookahead.at_line_start
            && lookahead.token == SyntaxKind::Identifier
            && self
                .ctx_stack
                .iter()
                .any(|ctx| matches!(ctx, ParserRuleContext::Block | ParserRuleContext::FunctionBody))
    }

    /// Decide how to get past `lookahead.token` in `ctx`.
    ///
    /// `expected` is the token the rule wanted, or `None` when the rule was
    /// choosing between alternatives. `Insert` is only returned when a token
    /// is expected; `Keep` only when none is.
    pub fn recover(
        &mut self,
        ctx: ParserRuleContext,
        expected: Option<SyntaxKind>,
        lookahead: Lookahead,
        is_completion: bool,
    ) -> Solution {
        self.steps += 1;
        let resync = if expected.is_some() { Action::Insert } else { Action::Keep };

        let mut action = if lookahead.token == SyntaxKind::EofToken || is_completion {
            resync
        } else if self.steps > self.budget {
            debug!(ctx = %ctx, steps = self.steps, "recovery budget exhausted");
            Action::Remove
        } else if is_stray_token(context_rule(ctx), expected, &lookahead) {
            Action::Remove
        } else if self.is_sync_token(&lookahead) {
            resync
        } else {
            Action::Remove
        };

        if action == Action::Insert
            && lookahead.token != SyntaxKind::EofToken
            && self.inserts.bump(lookahead.position) > self.insert_fuel
        {
            debug!(ctx = %ctx, token = ?lookahead.token, "insert fuel exhausted");
            action = Action::Remove;
        }

        let solution = match (action, expected) {
            (Action::Insert, Some(kind)) => Solution {
                action,
                ctx,
                token_kind: kind,
                recovered: Some(missing_token(kind)),
            },
            _ => Solution {
                action,
                ctx,
                token_kind: lookahead.token,
                recovered: None,
            },
        };
        debug!(
            ctx = %ctx,
            token = ?lookahead.token,
            expected = ?expected,
            action = ?solution.action,
            "recovery"
        );
        solution
    }
}
