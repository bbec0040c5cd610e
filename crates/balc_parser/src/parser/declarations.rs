//! Module-level declarations, metadata, function signatures and bodies,
//! and class/object members.

use balc_diagnostics::messages;
use balc_lexer::LexerMode;
use balc_syntax::factory::into_invalid_node;
use balc_syntax::{SyntaxKind, SyntaxNode};
use tracing::debug;

use super::qualifiers::{
    CLASS_QUALIFIERS, FUNCTION_QUALIFIERS, MODULE_VAR_QUALIFIERS, OBJECT_MEMBER_QUALIFIERS, PUBLIC_ONLY,
    SERVICE_QUALIFIERS,
};
use super::types::is_type_start;
use super::Parser;
use crate::context::ParserRuleContext;
use crate::documentation::parse_documentation;
use crate::recovery::MODULE_MEMBER_START;

fn is_parameter_start(kind: SyntaxKind) -> bool {
    is_type_start(kind) || kind == SyntaxKind::AtToken
}

fn is_object_member_start_kind(kind: SyntaxKind) -> bool {
    is_type_start(kind)
        || matches!(
            kind,
            SyntaxKind::AsteriskToken
                | SyntaxKind::AtToken
                | SyntaxKind::DocumentationString
                | SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::RemoteKeyword
                | SyntaxKind::ResourceKeyword
                | SyntaxKind::FinalKeyword
        )
}

fn has_qualifier(qualifiers: &SyntaxNode, kind: SyntaxKind) -> bool {
    qualifiers.children().iter().any(|q| q.kind() == kind)
}

impl Parser {
    // ========================================================================
    // Module
    // ========================================================================

    /// Imports, then module members, up to the end of input.
    pub(super) fn parse_module_part(&mut self) -> SyntaxNode {
        let mut imports = Vec::new();
        while self.at(SyntaxKind::ImportKeyword) {
            imports.push(self.parse_import_declaration());
        }
        let members = self.parse_list_until(|_| false, |p| p.is_module_member_start(), |p| p.parse_module_member());
        SyntaxNode::node(SyntaxKind::ModulePart, vec![SyntaxNode::list(imports), members])
    }

    pub(super) fn is_module_member_start(&mut self) -> bool {
        let kind = self.peek_kind();
        MODULE_MEMBER_START.contains(&kind)
            || kind.is_type_keyword()
            || matches!(
                kind,
                SyntaxKind::Identifier
                    | SyntaxKind::RecordKeyword
                    | SyntaxKind::ObjectKeyword
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::DistinctKeyword
                    | SyntaxKind::ReadonlyKeyword
                    | SyntaxKind::ClientKeyword
                    | SyntaxKind::VarKeyword
            )
    }

    /// `import org/a.b as p;`. Module name parts are lexed in import mode,
    /// where reserved words are plain identifiers.
    pub(super) fn parse_import_declaration(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::ImportDeclaration);
        let import = self.expect_node(SyntaxKind::ImportKeyword);
        self.start_mode(LexerMode::Import);
        let org = if self.peek_kind_n(2) == SyntaxKind::SlashToken {
            let name = self.expect_node(SyntaxKind::Identifier);
            let slash = self.consume_node();
            SyntaxNode::node(SyntaxKind::ImportOrgName, vec![name, slash])
        } else {
            SyntaxNode::Empty
        };
        let mut parts = vec![self.expect_node(SyntaxKind::Identifier)];
        while self.at(SyntaxKind::DotToken) {
            parts.push(self.consume_node());
            parts.push(self.expect_node(SyntaxKind::Identifier));
        }
        let prefix = if self.at(SyntaxKind::AsKeyword) {
            let as_kw = self.consume_node();
            let name = self.expect_node(SyntaxKind::Identifier);
            SyntaxNode::node(SyntaxKind::ImportPrefix, vec![as_kw, name])
        } else {
            SyntaxNode::Empty
        };
        self.end_mode();
        let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::ImportDeclaration,
            vec![import, org, SyntaxNode::list(parts), prefix, semicolon],
        )
    }

    pub(super) fn parse_module_member(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::ModuleMember);
        let metadata = self.parse_optional_metadata();
        let qualifiers = self.parse_qualifiers();
        let node = match self.peek_kind() {
            SyntaxKind::ImportKeyword => {
                self.validate_qualifiers(qualifiers, &[]);
                self.discard_metadata(metadata);
                self.parse_import_declaration()
            }
            SyntaxKind::FunctionKeyword if self.peek_kind_n(2) == SyntaxKind::Identifier => {
                let qualifiers = self.validate_qualifiers(qualifiers, FUNCTION_QUALIFIERS);
                self.parse_function_definition(metadata, qualifiers)
            }
            SyntaxKind::TypeKeyword => {
                let qualifiers = self.validate_qualifiers(qualifiers, PUBLIC_ONLY);
                self.parse_type_definition(metadata, qualifiers)
            }
            SyntaxKind::ConstKeyword if self.peek_kind_n(2) == SyntaxKind::AnnotationKeyword => {
                let qualifiers = self.validate_qualifiers(qualifiers, PUBLIC_ONLY);
                self.parse_annotation_declaration(metadata, qualifiers)
            }
            SyntaxKind::ConstKeyword => {
                let qualifiers = self.validate_qualifiers(qualifiers, PUBLIC_ONLY);
                self.parse_named_initializer(
                    ParserRuleContext::ConstDeclaration,
                    SyntaxKind::ConstDeclaration,
                    metadata,
                    qualifiers,
                )
            }
            SyntaxKind::ListenerKeyword => {
                let qualifiers = self.validate_qualifiers(qualifiers, PUBLIC_ONLY);
                self.parse_named_initializer(
                    ParserRuleContext::ListenerDeclaration,
                    SyntaxKind::ListenerDeclaration,
                    metadata,
                    qualifiers,
                )
            }
            SyntaxKind::EnumKeyword => {
                let qualifiers = self.validate_qualifiers(qualifiers, PUBLIC_ONLY);
                self.parse_enum_declaration(metadata, qualifiers)
            }
            SyntaxKind::ClassKeyword => {
                let qualifiers = self.validate_qualifiers(qualifiers, CLASS_QUALIFIERS);
                self.parse_class_definition(metadata, qualifiers)
            }
            SyntaxKind::ServiceKeyword => {
                let qualifiers = self.validate_qualifiers(qualifiers, SERVICE_QUALIFIERS);
                self.parse_service_declaration(metadata, qualifiers)
            }
            SyntaxKind::AnnotationKeyword => {
                let qualifiers = self.validate_qualifiers(qualifiers, PUBLIC_ONLY);
                self.parse_annotation_declaration(metadata, qualifiers)
            }
            SyntaxKind::XmlnsKeyword => {
                self.validate_qualifiers(qualifiers, &[]);
                self.discard_metadata(metadata);
                self.parse_xmlns_declaration()
            }
            _ => {
                let qualifiers = self.validate_qualifiers(qualifiers, MODULE_VAR_QUALIFIERS);
                self.parse_module_var_decl(metadata, qualifiers)
            }
        };
        self.end_context();
        node
    }

    /// Metadata in front of a construct that takes none stays in the tree
    /// as invalid minutiae of the next token.
    fn discard_metadata(&mut self, metadata: SyntaxNode) {
        if metadata.is_empty() {
            return;
        }
        debug!("metadata not allowed here");
        let invalid = into_invalid_node(metadata, messages::ERROR_INVALID_TOKEN);
        self.attach_invalid_nodes(None, vec![invalid]);
    }

    fn parse_function_definition(&mut self, metadata: SyntaxNode, qualifiers: SyntaxNode) -> SyntaxNode {
        self.start_context(ParserRuleContext::FunctionDefinition);
        let function = self.expect_node(SyntaxKind::FunctionKeyword);
        let name = self.expect_node(SyntaxKind::Identifier);
        let signature = self.parse_function_signature();
        let body = self.parse_function_body();
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::FunctionDefinition,
            vec![metadata, qualifiers, function, name, signature, body],
        )
    }

    fn parse_type_definition(&mut self, metadata: SyntaxNode, qualifiers: SyntaxNode) -> SyntaxNode {
        self.start_context(ParserRuleContext::TypeDefinition);
        let type_kw = self.consume_node();
        let name = self.expect_node(SyntaxKind::Identifier);
        let ty = self.parse_type_descriptor();
        let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::TypeDefinition,
            vec![metadata, qualifiers, type_kw, name, ty, semicolon],
        )
    }

    /// `const [T] X = e;` and `listener [T] x = e;`
    fn parse_named_initializer(
        &mut self,
        ctx: ParserRuleContext,
        kind: SyntaxKind,
        metadata: SyntaxNode,
        qualifiers: SyntaxNode,
    ) -> SyntaxNode {
        self.start_context(ctx);
        let keyword = self.consume_node();
        let ty = if self.at(SyntaxKind::Identifier) && self.peek_kind_n(2) == SyntaxKind::EqualToken {
            SyntaxNode::Empty
        } else {
            self.parse_type_descriptor()
        };
        let name = self.expect_node(SyntaxKind::Identifier);
        let equal = self.expect_node(SyntaxKind::EqualToken);
        let init = self.parse_expression();
        let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
        self.end_context();
        SyntaxNode::node(
            kind,
            vec![metadata, qualifiers, keyword, ty, name, equal, init, semicolon],
        )
    }

    /// `[final|configurable|isolated] T x = e;`, where a configurable may
    /// be initialized with `?`.
    fn parse_module_var_decl(&mut self, metadata: SyntaxNode, qualifiers: SyntaxNode) -> SyntaxNode {
        self.start_context(ParserRuleContext::ModuleVarDeclaration);
        let binding = self.parse_typed_binding_pattern();
        let (equal, init) = match self.optional(SyntaxKind::EqualToken) {
            Some(equal) => {
                let init = if self.at(SyntaxKind::QuestionMarkToken) {
                    self.consume_node()
                } else {
                    self.parse_action_or_expression()
                };
                (equal.into(), init)
            }
            None => (SyntaxNode::Empty, SyntaxNode::Empty),
        };
        let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::ModuleVarDeclaration,
            vec![metadata, qualifiers, binding, equal, init, semicolon],
        )
    }

    fn parse_enum_declaration(&mut self, metadata: SyntaxNode, qualifiers: SyntaxNode) -> SyntaxNode {
        self.start_context(ParserRuleContext::EnumDeclaration);
        let enum_kw = self.consume_node();
        let name = self.expect_node(SyntaxKind::Identifier);
        let open = self.expect_node(SyntaxKind::OpenBraceToken);
        let members = self.parse_separated_list(
            SyntaxKind::CloseBraceToken,
            |kind| {
                matches!(
                    kind,
                    SyntaxKind::Identifier | SyntaxKind::AtToken | SyntaxKind::DocumentationString
                )
            },
            |p| p.parse_enum_member(),
        );
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::EnumDeclaration,
            vec![metadata, qualifiers, enum_kw, name, open, members, close],
        )
    }

    fn parse_enum_member(&mut self) -> SyntaxNode {
        let metadata = self.parse_optional_metadata();
        let name = self.expect_node(SyntaxKind::Identifier);
        let (equal, value) = match self.optional(SyntaxKind::EqualToken) {
            Some(equal) => (equal.into(), self.parse_expression()),
            None => (SyntaxNode::Empty, SyntaxNode::Empty),
        };
        SyntaxNode::node(SyntaxKind::EnumMember, vec![metadata, name, equal, value])
    }

    fn parse_class_definition(&mut self, metadata: SyntaxNode, qualifiers: SyntaxNode) -> SyntaxNode {
        self.start_context(ParserRuleContext::ClassDefinition);
        let class = self.consume_node();
        let name = self.expect_node(SyntaxKind::Identifier);
        let open = self.expect_node(SyntaxKind::OpenBraceToken);
        let members = self.parse_object_members(false);
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::ClassDefinition,
            vec![metadata, qualifiers, class, name, open, members, close],
        )
    }

    /// `service [T] [/path | "name"] on e1, e2 { members } [;]`
    fn parse_service_declaration(&mut self, metadata: SyntaxNode, qualifiers: SyntaxNode) -> SyntaxNode {
        self.start_context(ParserRuleContext::ServiceDeclaration);
        let service = self.expect_node(SyntaxKind::ServiceKeyword);
        let ty = if self.at(SyntaxKind::Identifier) {
            self.parse_type_descriptor()
        } else {
            SyntaxNode::Empty
        };
        let path = self.parse_service_path();
        let on = self.expect_node(SyntaxKind::OnKeyword);
        let mut listeners = vec![self.parse_expression()];
        while self.at(SyntaxKind::CommaToken) {
            listeners.push(self.consume_node());
            listeners.push(self.parse_expression());
        }
        let open = self.expect_node(SyntaxKind::OpenBraceToken);
        let members = self.parse_object_members(false);
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        let semicolon = self.optional_node(SyntaxKind::SemicolonToken);
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::ServiceDeclaration,
            vec![
                metadata,
                qualifiers,
                service,
                ty,
                path,
                on,
                SyntaxNode::list(listeners),
                open,
                members,
                close,
                semicolon,
            ],
        )
    }

    /// `/a/b` or a string literal in front of `on`.
    fn parse_service_path(&mut self) -> SyntaxNode {
        if self.at(SyntaxKind::StringLiteralToken) {
            return SyntaxNode::list(vec![self.consume_node()]);
        }
        let mut segments = Vec::new();
        loop {
            match self.peek_kind() {
                SyntaxKind::SlashToken | SyntaxKind::Identifier => segments.push(self.consume_node()),
                kind if kind.is_keyword() && kind != SyntaxKind::OnKeyword && !segments.is_empty() => {
                    segments.push(self.consume().with_kind(SyntaxKind::Identifier).into())
                }
                _ => break,
            }
        }
        SyntaxNode::list(segments)
    }

    /// `[const] annotation [T] name [on point, ...];`
    fn parse_annotation_declaration(&mut self, metadata: SyntaxNode, qualifiers: SyntaxNode) -> SyntaxNode {
        self.start_context(ParserRuleContext::AnnotationDeclaration);
        let const_kw = self.optional_node(SyntaxKind::ConstKeyword);
        let annotation = self.expect_node(SyntaxKind::AnnotationKeyword);
        let has_type = is_type_start(self.peek_kind())
            && !(self.at(SyntaxKind::Identifier)
                && matches!(
                    self.peek_kind_n(2),
                    SyntaxKind::OnKeyword | SyntaxKind::SemicolonToken
                ));
        let ty = if has_type {
            self.parse_type_descriptor()
        } else {
            SyntaxNode::Empty
        };
        let name = self.expect_node(SyntaxKind::Identifier);
        let on = self.optional_node(SyntaxKind::OnKeyword);
        let mut points = Vec::new();
        if !on.is_empty() {
            loop {
                let kind = self.peek_kind();
                if kind.is_keyword() || kind == SyntaxKind::Identifier || kind == SyntaxKind::CommaToken {
                    points.push(self.consume_node());
                } else {
                    break;
                }
            }
        }
        let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::AnnotationDeclaration,
            vec![
                metadata,
                qualifiers,
                const_kw,
                annotation,
                ty,
                name,
                on,
                SyntaxNode::list(points),
                semicolon,
            ],
        )
    }

    /// `xmlns "uri" [as prefix];`
    fn parse_xmlns_declaration(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::XmlnsDeclaration);
        let xmlns = self.consume_node();
        let namespace = self.parse_expression();
        let (as_kw, prefix) = match self.optional(SyntaxKind::AsKeyword) {
            Some(as_kw) => (as_kw.into(), self.expect_node(SyntaxKind::Identifier)),
            None => (SyntaxNode::Empty, SyntaxNode::Empty),
        };
        let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
        self.end_context();
        SyntaxNode::node(
            SyntaxKind::XmlnsDeclaration,
            vec![xmlns, namespace, as_kw, prefix, semicolon],
        )
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// A documentation string and annotations, or `Empty` when there are
    /// neither.
    pub(super) fn parse_optional_metadata(&mut self) -> SyntaxNode {
        let documentation = match self.optional(SyntaxKind::DocumentationString) {
            Some(token) => parse_documentation(token),
            None => SyntaxNode::Empty,
        };
        let annotations = self.parse_annotations();
        if documentation.is_empty() && annotations.children().is_empty() {
            return SyntaxNode::Empty;
        }
        SyntaxNode::node(SyntaxKind::Metadata, vec![documentation, annotations])
    }

    pub(super) fn parse_annotations(&mut self) -> SyntaxNode {
        let mut annotations = Vec::new();
        while self.at(SyntaxKind::AtToken) {
            annotations.push(self.parse_annotation());
        }
        SyntaxNode::list(annotations)
    }

    /// `@name` or `@name { ... }`.
    pub(super) fn parse_annotation(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::Annotation);
        let at = self.expect_node(SyntaxKind::AtToken);
        let name = self.parse_name_reference();
        let value = if self.at(SyntaxKind::OpenBraceToken) {
            self.parse_mapping_constructor()
        } else {
            SyntaxNode::Empty
        };
        self.end_context();
        SyntaxNode::node(SyntaxKind::Annotation, vec![at, name, value])
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// `(params) [returns T]`
    pub(super) fn parse_function_signature(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::FunctionSignature);
        let open = self.expect_node(SyntaxKind::OpenParenToken);
        self.start_context(ParserRuleContext::ParameterList);
        let params = self.parse_separated_list(SyntaxKind::CloseParenToken, is_parameter_start, |p| p.parse_parameter());
        self.end_context();
        let close = self.expect_node(SyntaxKind::CloseParenToken);
        let return_type = if self.at_optional(SyntaxKind::ReturnsKeyword) {
            self.parse_return_type_descriptor()
        } else {
            SyntaxNode::Empty
        };
        self.end_context();
        SyntaxNode::node(SyntaxKind::FunctionSignature, vec![open, params, close, return_type])
    }

    /// `T x`, `T x = e` or `T... x`. Names are optional so that function
    /// type descriptors parse with the same rule.
    fn parse_parameter(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::Parameter);
        let annotations = self.parse_annotations();
        let ty = self.parse_type_descriptor();
        let node = if self.at(SyntaxKind::EllipsisToken) {
            let ellipsis = self.consume_node();
            let name = self.optional_node(SyntaxKind::Identifier);
            SyntaxNode::node(SyntaxKind::RestParameter, vec![annotations, ty, ellipsis, name])
        } else {
            let name = self.optional_node(SyntaxKind::Identifier);
            match self.optional(SyntaxKind::EqualToken) {
                Some(equal) => {
                    let default = self.parse_expression();
                    SyntaxNode::node(
                        SyntaxKind::DefaultableParameter,
                        vec![annotations, ty, name, equal.into(), default],
                    )
                }
                None => SyntaxNode::node(SyntaxKind::RequiredParameter, vec![annotations, ty, name]),
            }
        };
        self.end_context();
        node
    }

    /// `returns @a T`
    pub(super) fn parse_return_type_descriptor(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::ReturnType);
        let returns = self.expect_node(SyntaxKind::ReturnsKeyword);
        let annotations = self.parse_annotations();
        let ty = self.parse_type_descriptor();
        self.end_context();
        SyntaxNode::node(SyntaxKind::ReturnTypeDescriptor, vec![returns, annotations, ty])
    }

    /// `{ ... }`, `=> e;` or `= external;`
    fn parse_function_body(&mut self) -> SyntaxNode {
        match self.peek_kind() {
            SyntaxKind::RightDoubleArrowToken => {
                let arrow = self.consume_node();
                let expr = self.parse_expression();
                let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
                SyntaxNode::node(SyntaxKind::ExpressionFunctionBody, vec![arrow, expr, semicolon])
            }
            SyntaxKind::EqualToken => {
                self.start_context(ParserRuleContext::ExternalFunctionBody);
                let equal = self.consume_node();
                let annotations = self.parse_annotations();
                let external = self.expect_node(SyntaxKind::ExternalKeyword);
                let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
                self.end_context();
                SyntaxNode::node(
                    SyntaxKind::ExternalFunctionBody,
                    vec![equal, annotations, external, semicolon],
                )
            }
            _ => self.parse_function_body_block(),
        }
    }

    pub(super) fn parse_function_body_block(&mut self) -> SyntaxNode {
        self.start_context(ParserRuleContext::FunctionBody);
        let open = self.expect_node(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statements();
        let close = self.expect_node(SyntaxKind::CloseBraceToken);
        self.end_context();
        SyntaxNode::node(SyntaxKind::FunctionBodyBlock, vec![open, statements, close])
    }

    // ========================================================================
    // Object members
    // ========================================================================

    /// Members of a class, object constructor, object type or service, up
    /// to the closing `}`. Object types declare methods without bodies.
    pub(super) fn parse_object_members(&mut self, is_type: bool) -> SyntaxNode {
        self.start_context(ParserRuleContext::ObjectMembers);
        let members = self.parse_list_until(
            |kind| kind == SyntaxKind::CloseBraceToken,
            |p| is_object_member_start_kind(p.peek_kind()),
            |p| p.parse_object_member(is_type),
        );
        self.end_context();
        members
    }

    pub(super) fn parse_object_member(&mut self, is_type: bool) -> SyntaxNode {
        self.start_context(ParserRuleContext::ObjectMember);
        let node = if self.at(SyntaxKind::AsteriskToken) {
            let asterisk = self.consume_node();
            let ty = self.parse_type_reference();
            let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
            SyntaxNode::node(SyntaxKind::TypeReference, vec![asterisk, ty, semicolon])
        } else {
            let metadata = self.parse_optional_metadata();
            let qualifiers = self.parse_qualifiers();
            let qualifiers = self.validate_qualifiers(qualifiers, OBJECT_MEMBER_QUALIFIERS);
            let is_method = self.at(SyntaxKind::FunctionKeyword)
                && (self.peek_kind_n(2) == SyntaxKind::Identifier || self.peek_kind_n(2).is_keyword());
            if is_method {
                self.parse_method(metadata, qualifiers, is_type)
            } else {
                self.parse_object_field(metadata, qualifiers, is_type)
            }
        };
        self.end_context();
        node
    }

    fn parse_method(&mut self, metadata: SyntaxNode, qualifiers: SyntaxNode, is_type: bool) -> SyntaxNode {
        let function = self.consume_node();
        let name = if self.peek_kind().is_keyword() {
            self.consume().with_kind(SyntaxKind::Identifier).into()
        } else {
            self.expect_node(SyntaxKind::Identifier)
        };
        let path = if has_qualifier(&qualifiers, SyntaxKind::ResourceKeyword) {
            self.parse_resource_path()
        } else {
            SyntaxNode::empty_list()
        };
        let signature = self.parse_function_signature();
        if self.at(SyntaxKind::SemicolonToken) || (is_type && !self.at(SyntaxKind::OpenBraceToken)) {
            let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
            return SyntaxNode::node(
                SyntaxKind::MethodDeclaration,
                vec![metadata, qualifiers, function, name, path, signature, semicolon],
            );
        }
        let body = self.parse_function_body();
        SyntaxNode::node(
            SyntaxKind::ObjectMethodDefinition,
            vec![metadata, qualifiers, function, name, path, signature, body],
        )
    }

    /// `users/[string id]/orders` or `.` after a resource accessor name.
    fn parse_resource_path(&mut self) -> SyntaxNode {
        let mut segments = Vec::new();
        loop {
            match self.peek_kind() {
                SyntaxKind::SlashToken | SyntaxKind::DotToken | SyntaxKind::Identifier => {
                    segments.push(self.consume_node())
                }
                SyntaxKind::OpenBracketToken => {
                    segments.push(self.consume_node());
                    segments.push(self.parse_type_descriptor());
                    if self.at(SyntaxKind::EllipsisToken) {
                        segments.push(self.consume_node());
                    }
                    segments.push(self.optional_node(SyntaxKind::Identifier));
                    segments.push(self.expect_node(SyntaxKind::CloseBracketToken));
                }
                kind if kind.is_keyword() && !segments.is_empty() => {
                    segments.push(self.consume().with_kind(SyntaxKind::Identifier).into())
                }
                _ => break,
            }
        }
        SyntaxNode::list(segments.into_iter().filter(|s| !s.is_empty()).collect())
    }

    /// `T name [= e];`. Object types take no initializers.
    fn parse_object_field(&mut self, metadata: SyntaxNode, qualifiers: SyntaxNode, is_type: bool) -> SyntaxNode {
        let ty = self.parse_type_descriptor();
        let name = self.expect_node(SyntaxKind::Identifier);
        let (equal, init) = match self.peek_kind() {
            SyntaxKind::EqualToken if !is_type => {
                let equal = self.consume_node();
                (equal, self.parse_action_or_expression())
            }
            _ => (SyntaxNode::Empty, SyntaxNode::Empty),
        };
        let semicolon = self.expect_node(SyntaxKind::SemicolonToken);
        SyntaxNode::node(
            SyntaxKind::ObjectField,
            vec![metadata, qualifiers, ty, name, equal, init, semicolon],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(source: &str) -> SyntaxNode {
        Parser::new(source).parse_module_part()
    }

    #[test]
    fn test_function_definition_shape() {
        let node = module("function f(int a) returns int { return a; }");
        let function = node.child(1).child(0);
        assert_eq!(function.kind(), SyntaxKind::FunctionDefinition);
        let signature = function.child(4);
        assert_eq!(signature.child(1).child(0).kind(), SyntaxKind::RequiredParameter);
        assert_eq!(signature.child(3).kind(), SyntaxKind::ReturnTypeDescriptor);
        let body = function.child(5);
        assert_eq!(body.kind(), SyntaxKind::FunctionBodyBlock);
        assert_eq!(body.child(1).child(0).kind(), SyntaxKind::ReturnStatement);
        assert!(!node.has_diagnostics());
    }

    #[test]
    fn test_imports_with_org_and_prefix() {
        let node = module("import ballerina/io;\nimport foo.bar as fb;\n");
        let imports = node.child(0);
        assert_eq!(imports.children().len(), 2);
        assert_eq!(imports.child(0).child(1).kind(), SyntaxKind::ImportOrgName);
        assert_eq!(imports.child(1).child(2).children().len(), 3);
        assert_eq!(imports.child(1).child(3).kind(), SyntaxKind::ImportPrefix);
    }

    #[test]
    fn test_module_level_declarations() {
        let source = "type Id int;\nconst MAX = 10;\nconfigurable int port = ?;\nlistener Lst l = new;\nenum Color { RED, GREEN = \"g\" }\n";
        let node = module(source);
        let kinds: Vec<SyntaxKind> = node.child(1).children().iter().map(SyntaxNode::kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::TypeDefinition,
                SyntaxKind::ConstDeclaration,
                SyntaxKind::ModuleVarDeclaration,
                SyntaxKind::ListenerDeclaration,
                SyntaxKind::EnumDeclaration,
            ]
        );
        assert!(!node.has_diagnostics());
    }

    #[test]
    fn test_class_with_members() {
        let source = "isolated client class C {\n    *T;\n    private int x = 0;\n    remote function get() returns int { return self.x; }\n}";
        let node = module(source);
        let class = node.child(1).child(0);
        assert_eq!(class.kind(), SyntaxKind::ClassDefinition);
        assert_eq!(class.child(1).children().len(), 2);
        let members = class.child(5);
        assert_eq!(members.child(0).kind(), SyntaxKind::TypeReference);
        assert_eq!(members.child(1).kind(), SyntaxKind::ObjectField);
        assert_eq!(members.child(2).kind(), SyntaxKind::ObjectMethodDefinition);
    }

    #[test]
    fn test_service_with_resource_path() {
        let source = "service /api on new Listener(8080) {\n    resource function get users/[string id]() { }\n}";
        let node = module(source);
        let service = node.child(1).child(0);
        assert_eq!(service.kind(), SyntaxKind::ServiceDeclaration);
        assert_eq!(service.child(4).children().len(), 2);
        let method = service.child(8).child(0);
        assert_eq!(method.kind(), SyntaxKind::ObjectMethodDefinition);
        assert_eq!(method.child(4).children().len(), 6);
    }

    #[test]
    fn test_annotation_declaration_and_metadata() {
        let source = "annotation Info info on function;\n@info { name: \"x\" }\nfunction g() => 1;";
        let node = module(source);
        let members = node.child(1);
        assert_eq!(members.child(0).kind(), SyntaxKind::AnnotationDeclaration);
        let function = members.child(1);
        assert_eq!(function.child(0).kind(), SyntaxKind::Metadata);
        assert_eq!(function.child(5).kind(), SyntaxKind::ExpressionFunctionBody);
    }

    #[test]
    fn test_external_function_body() {
        let node = module("function f() = external;");
        let function = node.child(1).child(0);
        assert_eq!(function.child(5).kind(), SyntaxKind::ExternalFunctionBody);
    }

    #[test]
    fn test_object_type_method_declaration() {
        let node = Parser::new("object { function f(); int x; }").parse_type_descriptor();
        assert_eq!(node.kind(), SyntaxKind::ObjectTypeDesc);
        assert_eq!(node.child(3).child(0).kind(), SyntaxKind::MethodDeclaration);
        assert_eq!(node.child(3).child(1).kind(), SyntaxKind::ObjectField);
    }

    #[test]
    fn test_qualifier_not_allowed_on_type() {
        let node = module("isolated type T int;");
        let def = node.child(1).child(0);
        assert_eq!(def.kind(), SyntaxKind::TypeDefinition);
        assert!(def.child(1).children().is_empty());
        assert_eq!(node.diagnostics()[0].code(), 102);
        assert_eq!(node.render(), "isolated type T int;");
    }
}
