//! SyntaxKind enum - every token, minutiae and node kind in the tree.
//!
//! Kinds are grouped into contiguous sections so that category checks are
//! range comparisons. Keep new variants inside the section they belong to.

/// The kind of a syntax token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Special tokens
    // ========================================================================
    EofToken,
    InvalidToken,

    // ========================================================================
    // Minutiae
    // ========================================================================
    WhitespaceMinutiae,
    EndOfLineMinutiae,
    CommentMinutiae,
    InvalidNodeMinutiae,

    // ========================================================================
    // Identifier and literal tokens
    // ========================================================================
    Identifier,
    DecimalIntegerLiteralToken,
    HexIntegerLiteralToken,
    DecimalFloatingPointLiteralToken,
    StringLiteralToken,
    TemplateString,
    RegexContent,
    PromptContent,
    DocumentationString,

    // ========================================================================
    // Punctuation
    // ========================================================================
    OpenBraceToken,
    CloseBraceToken,
    OpenBracePipeToken,
    ClosePipeBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    SemicolonToken,
    CommaToken,
    DotToken,
    ColonToken,
    QuestionMarkToken,
    OptionalChainingToken,
    ElvisToken,
    EllipsisToken,
    DoubleDotLtToken,
    EqualToken,
    DoubleEqualToken,
    TripleEqualToken,
    NotEqualToken,
    NotDoubleEqualToken,
    ExclamationMarkToken,
    NegationToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    BitwiseAndToken,
    LogicalAndToken,
    PipeToken,
    LogicalOrToken,
    BitwiseXorToken,
    LtToken,
    LtEqualToken,
    GtToken,
    GtEqualToken,
    DoubleLtToken,
    RightArrowToken,
    SyncSendToken,
    LeftArrowToken,
    RightDoubleArrowToken,
    AtToken,
    HashToken,
    BacktickToken,
    InterpolationStartToken,

    // Compound assignment operators
    PlusEqualToken,
    MinusEqualToken,
    AsteriskEqualToken,
    SlashEqualToken,
    BitwiseAndEqualToken,
    PipeEqualToken,
    BitwiseXorEqualToken,
    DoubleLtEqualToken,
    DoubleGtEqualToken,
    TripleGtEqualToken,

    // Operators assembled by the parser from adjacent `>` tokens
    DoubleGtToken,
    TripleGtToken,

    // ========================================================================
    // Keywords
    // ========================================================================
    ImportKeyword,
    AsKeyword,
    PublicKeyword,
    PrivateKeyword,
    ExternalKeyword,
    FinalKeyword,
    FunctionKeyword,
    ReturnsKeyword,
    ReturnKeyword,
    TypeKeyword,
    RecordKeyword,
    ObjectKeyword,
    RemoteKeyword,
    ClientKeyword,
    ServiceKeyword,
    ResourceKeyword,
    ListenerKeyword,
    IsolatedKeyword,
    TransactionalKeyword,
    ReadonlyKeyword,
    DistinctKeyword,
    ConfigurableKeyword,
    ConstKeyword,
    AnnotationKeyword,
    OnKeyword,
    SourceKeyword,
    WorkerKeyword,
    ForkKeyword,
    IfKeyword,
    ElseKeyword,
    WhileKeyword,
    ForeachKeyword,
    InKeyword,
    BreakKeyword,
    ContinueKeyword,
    MatchKeyword,
    DoKeyword,
    FailKeyword,
    PanicKeyword,
    CheckKeyword,
    CheckpanicKeyword,
    TrapKeyword,
    LockKeyword,
    TransactionKeyword,
    RetryKeyword,
    CommitKeyword,
    RollbackKeyword,
    StartKeyword,
    WaitKeyword,
    FlushKeyword,
    NewKeyword,
    TypeofKeyword,
    IsKeyword,
    LetKeyword,
    FromKeyword,
    WhereKeyword,
    SelectKeyword,
    CollectKeyword,
    OrderKeyword,
    ByKeyword,
    AscendingKeyword,
    DescendingKeyword,
    LimitKeyword,
    JoinKeyword,
    EqualsKeyword,
    OuterKeyword,
    ConflictKeyword,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    VarKeyword,
    EnumKeyword,
    ClassKeyword,
    XmlnsKeyword,
    ReKeyword,
    NaturalKeyword,
    KeyKeyword,

    // Type keywords
    IntKeyword,
    FloatKeyword,
    DecimalKeyword,
    StringKeyword,
    BooleanKeyword,
    ByteKeyword,
    JsonKeyword,
    AnydataKeyword,
    AnyKeyword,
    NeverKeyword,
    ErrorKeyword,
    XmlKeyword,
    HandleKeyword,
    TypedescKeyword,
    MapKeyword,
    FutureKeyword,
    StreamKeyword,
    TableKeyword,

    // ========================================================================
    // Documentation tokens
    // ========================================================================
    DocumentationDescription,
    ParameterName,
    DeprecationLiteral,
    DoubleBacktickToken,
    TripleBacktickToken,
    CodeContent,
    BacktickContent,

    // ========================================================================
    // Module-level nodes
    // ========================================================================
    ModulePart,
    ImportDeclaration,
    ImportOrgName,
    ImportPrefix,
    FunctionDefinition,
    FunctionSignature,
    ReturnTypeDescriptor,
    RequiredParameter,
    DefaultableParameter,
    RestParameter,
    IncludedRecordParameter,
    FunctionBodyBlock,
    ExpressionFunctionBody,
    ExternalFunctionBody,
    TypeDefinition,
    ConstDeclaration,
    ModuleVarDeclaration,
    ListenerDeclaration,
    EnumDeclaration,
    EnumMember,
    ClassDefinition,
    ObjectField,
    ObjectMethodDefinition,
    MethodDeclaration,
    TypeReference,
    ServiceDeclaration,
    AnnotationDeclaration,
    XmlnsDeclaration,
    Metadata,
    Annotation,

    // Documentation nodes
    MarkdownDocumentation,
    MarkdownDocumentationLine,
    MarkdownReferenceDocumentationLine,
    MarkdownParameterDocumentationLine,
    MarkdownReturnParameterDocumentationLine,
    MarkdownDeprecationDocumentationLine,
    MarkdownCodeBlock,
    MarkdownCodeLine,
    InlineCodeReference,
    DocumentationReference,

    // ========================================================================
    // Statements
    // ========================================================================
    BlockStatement,
    LocalVarDecl,
    AssignmentStatement,
    CompoundAssignmentStatement,
    CallStatement,
    ActionStatement,
    ExpressionStatement,
    IfElseStatement,
    ElseBlock,
    WhileStatement,
    ForeachStatement,
    MatchStatement,
    MatchClause,
    MatchGuard,
    DoStatement,
    OnFailClause,
    LockStatement,
    FailStatement,
    PanicStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    TransactionStatement,
    RetryStatement,
    RollbackStatement,
    NamedWorkerDeclaration,
    ForkStatement,

    // ========================================================================
    // Binding patterns
    // ========================================================================
    TypedBindingPattern,
    CaptureBindingPattern,
    WildcardBindingPattern,
    ListBindingPattern,
    MappingBindingPattern,
    FieldBindingPattern,
    RestBindingPattern,
    ErrorBindingPattern,
    NamedArgBindingPattern,

    // Match patterns
    ListMatchPattern,
    MappingMatchPattern,
    FieldMatchPattern,
    RestMatchPattern,
    ErrorMatchPattern,
    NamedArgMatchPattern,

    // ========================================================================
    // Expressions
    // ========================================================================
    BasicLiteral,
    NilLiteral,
    SimpleNameReference,
    QualifiedNameReference,
    BracedExpression,
    BinaryExpression,
    UnaryExpression,
    TypeofExpression,
    CheckExpression,
    TypeCastExpression,
    TypeTestExpression,
    ConditionalExpression,
    FieldAccess,
    OptionalFieldAccess,
    IndexedExpression,
    FunctionCall,
    MethodCall,
    XmlStepExpression,
    ListConstructor,
    MappingConstructor,
    ErrorConstructor,
    ImplicitNewExpression,
    ExplicitNewExpression,
    ObjectConstructor,
    ExplicitAnonymousFunction,
    ImplicitAnonymousFunction,
    LetExpression,
    TrapExpression,
    StringTemplateExpression,
    XmlTemplateExpression,
    RegexTemplateExpression,
    RawTemplateExpression,
    NaturalExpression,
    QueryExpression,

    // Actions
    RemoteMethodCallAction,
    ClientResourceAccessAction,
    AsyncSendAction,
    SyncSendAction,
    ReceiveAction,
    WaitAction,
    StartAction,
    FlushAction,
    CommitAction,
    CheckAction,
    TrapAction,
    QueryAction,

    // Expression parts
    TypeCastParam,
    SpecificField,
    ComputedNameField,
    SpreadField,
    SpreadMember,
    ParenthesizedArgList,
    PositionalArg,
    NamedArg,
    RestArg,
    InferParamList,
    LetVarDecl,
    Interpolation,
    QueryPipeline,
    FromClause,
    WhereClause,
    LetClause,
    JoinClause,
    OnClause,
    OrderByClause,
    OrderKey,
    LimitClause,
    SelectClause,
    CollectClause,
    OnConflictClause,

    // ========================================================================
    // Type descriptors
    // ========================================================================
    BuiltinSimpleTypeDesc,
    NilTypeDesc,
    OptionalTypeDesc,
    ArrayTypeDesc,
    UnionTypeDesc,
    IntersectionTypeDesc,
    ParenthesisedTypeDesc,
    TupleTypeDesc,
    RecordTypeDesc,
    ObjectTypeDesc,
    FunctionTypeDesc,
    SingletonTypeDesc,
    ParameterizedTypeDesc,
    StreamTypeDesc,
    TableTypeDesc,
    DistinctTypeDesc,

    // Type descriptor parts
    RestDescriptor,
    RecordField,
    RecordFieldWithDefault,
    RecordRestDescriptor,
    TypeParameter,
    StreamTypeParams,
    KeySpecifier,

    // ========================================================================
    // Transient nodes
    // ========================================================================
    /// A bracketed or braced sequence whose interpretation is not yet known.
    AmbiguousCollection,
    /// Kind reported by `SyntaxNode::List`.
    List,
    /// Kind reported by `SyntaxNode::Empty`.
    Empty,
}

impl SyntaxKind {
    pub const FIRST_MINUTIAE: SyntaxKind = SyntaxKind::WhitespaceMinutiae;
    pub const LAST_MINUTIAE: SyntaxKind = SyntaxKind::InvalidNodeMinutiae;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::TripleGtToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::ImportKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::TableKeyword;
    pub const FIRST_TYPE_KEYWORD: SyntaxKind = SyntaxKind::IntKeyword;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::BacktickContent;
    pub const FIRST_STATEMENT: SyntaxKind = SyntaxKind::BlockStatement;
    pub const LAST_STATEMENT: SyntaxKind = SyntaxKind::ForkStatement;
    pub const FIRST_BINDING_PATTERN: SyntaxKind = SyntaxKind::TypedBindingPattern;
    pub const LAST_BINDING_PATTERN: SyntaxKind = SyntaxKind::NamedArgBindingPattern;
    pub const FIRST_EXPRESSION: SyntaxKind = SyntaxKind::BasicLiteral;
    pub const LAST_EXPRESSION: SyntaxKind = SyntaxKind::QueryExpression;
    pub const FIRST_ACTION: SyntaxKind = SyntaxKind::RemoteMethodCallAction;
    pub const LAST_ACTION: SyntaxKind = SyntaxKind::QueryAction;
    pub const FIRST_TYPE_DESC: SyntaxKind = SyntaxKind::BuiltinSimpleTypeDesc;
    pub const LAST_TYPE_DESC: SyntaxKind = SyntaxKind::DistinctTypeDesc;
}

impl SyntaxKind {
    #[inline]
    fn in_range(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        let v = self as u16;
        v >= first as u16 && v <= last as u16
    }

    /// Whether this kind is produced by the lexer (or assembled from lexed tokens).
    #[inline]
    pub fn is_token(self) -> bool {
        self.in_range(SyntaxKind::EofToken, SyntaxKind::LAST_TOKEN)
    }

    #[inline]
    pub fn is_minutiae(self) -> bool {
        self.in_range(SyntaxKind::FIRST_MINUTIAE, SyntaxKind::LAST_MINUTIAE)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self.in_range(SyntaxKind::FIRST_KEYWORD, SyntaxKind::LAST_KEYWORD)
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.in_range(SyntaxKind::FIRST_PUNCTUATION, SyntaxKind::LAST_PUNCTUATION)
    }

    /// Keywords that name a built-in type.
    #[inline]
    pub fn is_type_keyword(self) -> bool {
        self.in_range(SyntaxKind::FIRST_TYPE_KEYWORD, SyntaxKind::LAST_KEYWORD)
    }

    #[inline]
    pub fn is_statement(self) -> bool {
        self.in_range(SyntaxKind::FIRST_STATEMENT, SyntaxKind::LAST_STATEMENT)
    }

    #[inline]
    pub fn is_binding_pattern(self) -> bool {
        self.in_range(SyntaxKind::FIRST_BINDING_PATTERN, SyntaxKind::LAST_BINDING_PATTERN)
    }

    /// Expressions, including actions.
    #[inline]
    pub fn is_expression(self) -> bool {
        self.in_range(SyntaxKind::FIRST_EXPRESSION, SyntaxKind::LAST_ACTION)
    }

    #[inline]
    pub fn is_action(self) -> bool {
        self.in_range(SyntaxKind::FIRST_ACTION, SyntaxKind::LAST_ACTION)
    }

    #[inline]
    pub fn is_type_descriptor(self) -> bool {
        self.in_range(SyntaxKind::FIRST_TYPE_DESC, SyntaxKind::LAST_TYPE_DESC)
    }

    #[inline]
    pub fn is_compound_assignment(self) -> bool {
        self.in_range(SyntaxKind::PlusEqualToken, SyntaxKind::TripleGtEqualToken)
    }

    /// Tokens whose text is fixed by their kind.
    pub fn fixed_text(self) -> Option<&'static str> {
        if self.is_keyword() {
            return self.keyword_text();
        }
        let text = match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenBracePipeToken => "{|",
            SyntaxKind::ClosePipeBraceToken => "|}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::DotToken => ".",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::QuestionMarkToken => "?",
            SyntaxKind::OptionalChainingToken => "?.",
            SyntaxKind::ElvisToken => "?:",
            SyntaxKind::EllipsisToken => "...",
            SyntaxKind::DoubleDotLtToken => "..<",
            SyntaxKind::EqualToken => "=",
            SyntaxKind::DoubleEqualToken => "==",
            SyntaxKind::TripleEqualToken => "===",
            SyntaxKind::NotEqualToken => "!=",
            SyntaxKind::NotDoubleEqualToken => "!==",
            SyntaxKind::ExclamationMarkToken => "!",
            SyntaxKind::NegationToken => "~",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::BitwiseAndToken => "&",
            SyntaxKind::LogicalAndToken => "&&",
            SyntaxKind::PipeToken => "|",
            SyntaxKind::LogicalOrToken => "||",
            SyntaxKind::BitwiseXorToken => "^",
            SyntaxKind::LtToken => "<",
            SyntaxKind::LtEqualToken => "<=",
            SyntaxKind::GtToken => ">",
            SyntaxKind::GtEqualToken => ">=",
            SyntaxKind::DoubleLtToken => "<<",
            SyntaxKind::RightArrowToken => "->",
            SyntaxKind::SyncSendToken => "->>",
            SyntaxKind::LeftArrowToken => "<-",
            SyntaxKind::RightDoubleArrowToken => "=>",
            SyntaxKind::AtToken => "@",
            SyntaxKind::HashToken => "#",
            SyntaxKind::BacktickToken => "`",
            SyntaxKind::InterpolationStartToken => "${",
            SyntaxKind::PlusEqualToken => "+=",
            SyntaxKind::MinusEqualToken => "-=",
            SyntaxKind::AsteriskEqualToken => "*=",
            SyntaxKind::SlashEqualToken => "/=",
            SyntaxKind::BitwiseAndEqualToken => "&=",
            SyntaxKind::PipeEqualToken => "|=",
            SyntaxKind::BitwiseXorEqualToken => "^=",
            SyntaxKind::DoubleLtEqualToken => "<<=",
            SyntaxKind::DoubleGtEqualToken => ">>=",
            SyntaxKind::TripleGtEqualToken => ">>>=",
            SyntaxKind::DoubleGtToken => ">>",
            SyntaxKind::TripleGtToken => ">>>",
            SyntaxKind::DoubleBacktickToken => "``",
            SyntaxKind::TripleBacktickToken => "```",
            _ => return None,
        };
        Some(text)
    }

    fn keyword_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::ImportKeyword => "import",
            SyntaxKind::AsKeyword => "as",
            SyntaxKind::PublicKeyword => "public",
            SyntaxKind::PrivateKeyword => "private",
            SyntaxKind::ExternalKeyword => "external",
            SyntaxKind::FinalKeyword => "final",
            SyntaxKind::FunctionKeyword => "function",
            SyntaxKind::ReturnsKeyword => "returns",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::TypeKeyword => "type",
            SyntaxKind::RecordKeyword => "record",
            SyntaxKind::ObjectKeyword => "object",
            SyntaxKind::RemoteKeyword => "remote",
            SyntaxKind::ClientKeyword => "client",
            SyntaxKind::ServiceKeyword => "service",
            SyntaxKind::ResourceKeyword => "resource",
            SyntaxKind::ListenerKeyword => "listener",
            SyntaxKind::IsolatedKeyword => "isolated",
            SyntaxKind::TransactionalKeyword => "transactional",
            SyntaxKind::ReadonlyKeyword => "readonly",
            SyntaxKind::DistinctKeyword => "distinct",
            SyntaxKind::ConfigurableKeyword => "configurable",
            SyntaxKind::ConstKeyword => "const",
            SyntaxKind::AnnotationKeyword => "annotation",
            SyntaxKind::OnKeyword => "on",
            SyntaxKind::SourceKeyword => "source",
            SyntaxKind::WorkerKeyword => "worker",
            SyntaxKind::ForkKeyword => "fork",
            SyntaxKind::IfKeyword => "if",
            SyntaxKind::ElseKeyword => "else",
            SyntaxKind::WhileKeyword => "while",
            SyntaxKind::ForeachKeyword => "foreach",
            SyntaxKind::InKeyword => "in",
            SyntaxKind::BreakKeyword => "break",
            SyntaxKind::ContinueKeyword => "continue",
            SyntaxKind::MatchKeyword => "match",
            SyntaxKind::DoKeyword => "do",
            SyntaxKind::FailKeyword => "fail",
            SyntaxKind::PanicKeyword => "panic",
            SyntaxKind::CheckKeyword => "check",
            SyntaxKind::CheckpanicKeyword => "checkpanic",
            SyntaxKind::TrapKeyword => "trap",
            SyntaxKind::LockKeyword => "lock",
            SyntaxKind::TransactionKeyword => "transaction",
            SyntaxKind::RetryKeyword => "retry",
            SyntaxKind::CommitKeyword => "commit",
            SyntaxKind::RollbackKeyword => "rollback",
            SyntaxKind::StartKeyword => "start",
            SyntaxKind::WaitKeyword => "wait",
            SyntaxKind::FlushKeyword => "flush",
            SyntaxKind::NewKeyword => "new",
            SyntaxKind::TypeofKeyword => "typeof",
            SyntaxKind::IsKeyword => "is",
            SyntaxKind::LetKeyword => "let",
            SyntaxKind::FromKeyword => "from",
            SyntaxKind::WhereKeyword => "where",
            SyntaxKind::SelectKeyword => "select",
            SyntaxKind::CollectKeyword => "collect",
            SyntaxKind::OrderKeyword => "order",
            SyntaxKind::ByKeyword => "by",
            SyntaxKind::AscendingKeyword => "ascending",
            SyntaxKind::DescendingKeyword => "descending",
            SyntaxKind::LimitKeyword => "limit",
            SyntaxKind::JoinKeyword => "join",
            SyntaxKind::EqualsKeyword => "equals",
            SyntaxKind::OuterKeyword => "outer",
            SyntaxKind::ConflictKeyword => "conflict",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::NullKeyword => "null",
            SyntaxKind::VarKeyword => "var",
            SyntaxKind::EnumKeyword => "enum",
            SyntaxKind::ClassKeyword => "class",
            SyntaxKind::XmlnsKeyword => "xmlns",
            SyntaxKind::ReKeyword => "re",
            SyntaxKind::NaturalKeyword => "natural",
            SyntaxKind::KeyKeyword => "key",
            SyntaxKind::IntKeyword => "int",
            SyntaxKind::FloatKeyword => "float",
            SyntaxKind::DecimalKeyword => "decimal",
            SyntaxKind::StringKeyword => "string",
            SyntaxKind::BooleanKeyword => "boolean",
            SyntaxKind::ByteKeyword => "byte",
            SyntaxKind::JsonKeyword => "json",
            SyntaxKind::AnydataKeyword => "anydata",
            SyntaxKind::AnyKeyword => "any",
            SyntaxKind::NeverKeyword => "never",
            SyntaxKind::ErrorKeyword => "error",
            SyntaxKind::XmlKeyword => "xml",
            SyntaxKind::HandleKeyword => "handle",
            SyntaxKind::TypedescKeyword => "typedesc",
            SyntaxKind::MapKeyword => "map",
            SyntaxKind::FutureKeyword => "future",
            SyntaxKind::StreamKeyword => "stream",
            SyntaxKind::TableKeyword => "table",
            _ => return None,
        };
        Some(text)
    }

    /// Look up a reserved word.
    pub fn keyword_from_text(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "import" => SyntaxKind::ImportKeyword,
            "as" => SyntaxKind::AsKeyword,
            "public" => SyntaxKind::PublicKeyword,
            "private" => SyntaxKind::PrivateKeyword,
            "external" => SyntaxKind::ExternalKeyword,
            "final" => SyntaxKind::FinalKeyword,
            "function" => SyntaxKind::FunctionKeyword,
            "returns" => SyntaxKind::ReturnsKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "type" => SyntaxKind::TypeKeyword,
            "record" => SyntaxKind::RecordKeyword,
            "object" => SyntaxKind::ObjectKeyword,
            "remote" => SyntaxKind::RemoteKeyword,
            "client" => SyntaxKind::ClientKeyword,
            "service" => SyntaxKind::ServiceKeyword,
            "resource" => SyntaxKind::ResourceKeyword,
            "listener" => SyntaxKind::ListenerKeyword,
            "isolated" => SyntaxKind::IsolatedKeyword,
            "transactional" => SyntaxKind::TransactionalKeyword,
            "readonly" => SyntaxKind::ReadonlyKeyword,
            "distinct" => SyntaxKind::DistinctKeyword,
            "configurable" => SyntaxKind::ConfigurableKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "annotation" => SyntaxKind::AnnotationKeyword,
            "on" => SyntaxKind::OnKeyword,
            "source" => SyntaxKind::SourceKeyword,
            "worker" => SyntaxKind::WorkerKeyword,
            "fork" => SyntaxKind::ForkKeyword,
            "if" => SyntaxKind::IfKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "while" => SyntaxKind::WhileKeyword,
            "foreach" => SyntaxKind::ForeachKeyword,
            "in" => SyntaxKind::InKeyword,
            "break" => SyntaxKind::BreakKeyword,
            "continue" => SyntaxKind::ContinueKeyword,
            "match" => SyntaxKind::MatchKeyword,
            "do" => SyntaxKind::DoKeyword,
            "fail" => SyntaxKind::FailKeyword,
            "panic" => SyntaxKind::PanicKeyword,
            "check" => SyntaxKind::CheckKeyword,
            "checkpanic" => SyntaxKind::CheckpanicKeyword,
            "trap" => SyntaxKind::TrapKeyword,
            "lock" => SyntaxKind::LockKeyword,
            "transaction" => SyntaxKind::TransactionKeyword,
            "retry" => SyntaxKind::RetryKeyword,
            "commit" => SyntaxKind::CommitKeyword,
            "rollback" => SyntaxKind::RollbackKeyword,
            "start" => SyntaxKind::StartKeyword,
            "wait" => SyntaxKind::WaitKeyword,
            "flush" => SyntaxKind::FlushKeyword,
            "new" => SyntaxKind::NewKeyword,
            "typeof" => SyntaxKind::TypeofKeyword,
            "is" => SyntaxKind::IsKeyword,
            "let" => SyntaxKind::LetKeyword,
            "from" => SyntaxKind::FromKeyword,
            "where" => SyntaxKind::WhereKeyword,
            "select" => SyntaxKind::SelectKeyword,
            "collect" => SyntaxKind::CollectKeyword,
            "order" => SyntaxKind::OrderKeyword,
            "by" => SyntaxKind::ByKeyword,
            "ascending" => SyntaxKind::AscendingKeyword,
            "descending" => SyntaxKind::DescendingKeyword,
            "limit" => SyntaxKind::LimitKeyword,
            "join" => SyntaxKind::JoinKeyword,
            "equals" => SyntaxKind::EqualsKeyword,
            "outer" => SyntaxKind::OuterKeyword,
            "conflict" => SyntaxKind::ConflictKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "null" => SyntaxKind::NullKeyword,
            "var" => SyntaxKind::VarKeyword,
            "enum" => SyntaxKind::EnumKeyword,
            "class" => SyntaxKind::ClassKeyword,
            "xmlns" => SyntaxKind::XmlnsKeyword,
            "re" => SyntaxKind::ReKeyword,
            "natural" => SyntaxKind::NaturalKeyword,
            "key" => SyntaxKind::KeyKeyword,
            "int" => SyntaxKind::IntKeyword,
            "float" => SyntaxKind::FloatKeyword,
            "decimal" => SyntaxKind::DecimalKeyword,
            "string" => SyntaxKind::StringKeyword,
            "boolean" => SyntaxKind::BooleanKeyword,
            "byte" => SyntaxKind::ByteKeyword,
            "json" => SyntaxKind::JsonKeyword,
            "anydata" => SyntaxKind::AnydataKeyword,
            "any" => SyntaxKind::AnyKeyword,
            "never" => SyntaxKind::NeverKeyword,
            "error" => SyntaxKind::ErrorKeyword,
            "xml" => SyntaxKind::XmlKeyword,
            "handle" => SyntaxKind::HandleKeyword,
            "typedesc" => SyntaxKind::TypedescKeyword,
            "map" => SyntaxKind::MapKeyword,
            "future" => SyntaxKind::FutureKeyword,
            "stream" => SyntaxKind::StreamKeyword,
            "table" => SyntaxKind::TableKeyword,
            _ => return None,
        };
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(SyntaxKind::keyword_from_text("function"), Some(SyntaxKind::FunctionKeyword));
        assert_eq!(SyntaxKind::keyword_from_text("table"), Some(SyntaxKind::TableKeyword));
        assert_eq!(SyntaxKind::keyword_from_text("foo"), None);
        assert_eq!(SyntaxKind::keyword_from_text("Int"), None);
    }

    #[test]
    fn test_every_keyword_is_in_keyword_range() {
        let texts = [
            "import", "returns", "return", "checkpanic", "transaction", "descending", "conflict", "natural",
            "int", "anydata", "any", "typedesc", "table",
        ];
        for text in texts {
            let kind = SyntaxKind::keyword_from_text(text).unwrap();
            assert_eq!(kind.fixed_text(), Some(text));
            assert!(kind.is_keyword(), "{text} is outside the keyword section");
        }
    }

    #[test]
    fn test_categories() {
        assert!(SyntaxKind::IntKeyword.is_type_keyword());
        assert!(!SyntaxKind::IfKeyword.is_type_keyword());
        assert!(SyntaxKind::ReturnStatement.is_statement());
        assert!(SyntaxKind::ListBindingPattern.is_binding_pattern());
        assert!(SyntaxKind::RemoteMethodCallAction.is_expression());
        assert!(SyntaxKind::RemoteMethodCallAction.is_action());
        assert!(!SyntaxKind::BinaryExpression.is_action());
        assert!(SyntaxKind::TupleTypeDesc.is_type_descriptor());
        assert!(SyntaxKind::DoubleGtToken.is_punctuation());
        assert!(SyntaxKind::CommentMinutiae.is_minutiae());
        assert!(SyntaxKind::Identifier.is_token());
        assert!(!SyntaxKind::ModulePart.is_token());
    }

    #[test]
    fn test_fixed_text() {
        assert_eq!(SyntaxKind::ElvisToken.fixed_text(), Some("?:"));
        assert_eq!(SyntaxKind::TripleGtEqualToken.fixed_text(), Some(">>>="));
        assert_eq!(SyntaxKind::Identifier.fixed_text(), None);
    }
}
