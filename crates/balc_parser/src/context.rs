//! Grammar contexts pushed around each rule.
//!
//! The context stack is recovery state only. It never shows up in the tree.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserRuleContext {
    // Module level
    CompilationUnit,
    ImportDeclaration,
    ModuleMember,
    Metadata,
    Annotation,
    FunctionDefinition,
    FunctionSignature,
    ParameterList,
    Parameter,
    ReturnType,
    FunctionBody,
    ExternalFunctionBody,
    TypeDefinition,
    ConstDeclaration,
    ModuleVarDeclaration,
    ListenerDeclaration,
    EnumDeclaration,
    ClassDefinition,
    ObjectMembers,
    ObjectMember,
    ServiceDeclaration,
    AnnotationDeclaration,
    XmlnsDeclaration,

    // Statements
    Block,
    Statement,
    VarDeclaration,
    Assignment,
    IfElse,
    While,
    Foreach,
    Match,
    MatchClause,
    MatchPattern,
    Do,
    OnFail,
    Lock,
    Fork,
    NamedWorker,
    Transaction,
    Retry,
    Return,

    // Expressions and actions
    Expression,
    ArgumentList,
    BracedExpression,
    ListConstructor,
    MappingConstructor,
    TypeCast,
    Template,
    Interpolation,
    Natural,
    LetExpression,
    AnonFunction,
    ObjectConstructor,
    Query,
    QueryClause,
    Action,

    // Types
    TypeDescriptor,
    TypeParameter,
    TupleType,
    RecordType,
    RecordField,
    ObjectType,

    // Binding patterns
    BindingPattern,
    ListBindingPattern,
    MappingBindingPattern,
    ErrorBindingPattern,

    /// A `[ ... ]` at statement start whose meaning is not known yet.
    AmbiguousList,
    Qualifiers,
}

impl ParserRuleContext {
    /// Contexts whose construct is closed by `}`.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            ParserRuleContext::Block
                | ParserRuleContext::FunctionBody
                | ParserRuleContext::ObjectMembers
                | ParserRuleContext::Match
                | ParserRuleContext::MappingConstructor
                | ParserRuleContext::MappingBindingPattern
                | ParserRuleContext::RecordType
                | ParserRuleContext::EnumDeclaration
                | ParserRuleContext::Fork
                | ParserRuleContext::Natural
        )
    }
}

impl fmt::Display for ParserRuleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
