//! Lossless syntax tree nodes.
//!
//! Every character of the source lives in exactly one place: a token's text,
//! one of its minutiae, or inside an invalid node attached as minutiae. The
//! tree owns its children by value; there are no parent pointers.

use std::fmt::Write as _;

use balc_diagnostics::{format_message, DiagnosticMessage};

use crate::syntax_kind::SyntaxKind;

/// A diagnostic attached to a token or node. Positions are derived later
/// from the tree, so only the message and its arguments are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxDiagnostic {
    pub message: DiagnosticMessage,
    pub args: Vec<String>,
}

impl SyntaxDiagnostic {
    pub fn new(message: DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            message,
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    pub fn code(&self) -> u32 {
        self.message.code
    }

    pub fn message_text(&self) -> String {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        format_message(self.message.message, &args)
    }
}

/// Trivia attached to the edge of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum Minutiae {
    Whitespace(String),
    EndOfLine(String),
    Comment(String),
    /// A token or node the parser could not place in the grammar.
    InvalidNode(Box<SyntaxNode>),
}

impl Minutiae {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Minutiae::Whitespace(_) => SyntaxKind::WhitespaceMinutiae,
            Minutiae::EndOfLine(_) => SyntaxKind::EndOfLineMinutiae,
            Minutiae::Comment(_) => SyntaxKind::CommentMinutiae,
            Minutiae::InvalidNode(_) => SyntaxKind::InvalidNodeMinutiae,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Minutiae::Whitespace(text) | Minutiae::EndOfLine(text) | Minutiae::Comment(text) => {
                text.len()
            }
            Minutiae::InvalidNode(node) => node.width(),
        }
    }

    pub fn is_invalid_node(&self) -> bool {
        matches!(self, Minutiae::InvalidNode(_))
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Minutiae::Whitespace(text) | Minutiae::EndOfLine(text) | Minutiae::Comment(text) => {
                out.push_str(text)
            }
            Minutiae::InvalidNode(node) => node.write_to(out),
        }
    }
}

/// A lexed (or synthesised) token with its surrounding trivia.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: String,
    pub leading: Vec<Minutiae>,
    pub trailing: Vec<Minutiae>,
    pub diagnostics: Vec<SyntaxDiagnostic>,
    /// Zero-width token inserted by error recovery.
    pub is_missing: bool,
}

impl Token {
    pub fn new(kind: SyntaxKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            leading: Vec::new(),
            trailing: Vec::new(),
            diagnostics: Vec::new(),
            is_missing: false,
        }
    }

    pub fn with_minutiae(
        kind: SyntaxKind,
        text: impl Into<String>,
        leading: Vec<Minutiae>,
        trailing: Vec<Minutiae>,
    ) -> Self {
        Self {
            leading,
            trailing,
            ..Self::new(kind, text)
        }
    }

    /// A zero-width token carrying the diagnostic that explains its absence.
    pub fn missing(kind: SyntaxKind, diagnostic: SyntaxDiagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
            is_missing: true,
            ..Self::new(kind, "")
        }
    }

    /// Width including leading and trailing minutiae.
    pub fn width(&self) -> usize {
        minutiae_width(&self.leading) + self.text.len() + minutiae_width(&self.trailing)
    }

    pub fn width_without_minutiae(&self) -> usize {
        self.text.len()
    }

    pub fn leading_width(&self) -> usize {
        minutiae_width(&self.leading)
    }

    pub fn has_leading_minutiae(&self) -> bool {
        !self.leading.is_empty()
    }

    pub fn has_trailing_minutiae(&self) -> bool {
        !self.trailing.is_empty()
    }

    /// Whether a newline terminates this token's trailing minutiae.
    pub fn has_trailing_newline(&self) -> bool {
        self.trailing
            .iter()
            .any(|m| matches!(m, Minutiae::EndOfLine(_)))
    }

    pub fn add_diagnostic(&mut self, diagnostic: SyntaxDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Re-tag a token while keeping its text and trivia, e.g. a keyword used
    /// as a name.
    pub fn with_kind(mut self, kind: SyntaxKind) -> Self {
        self.kind = kind;
        self
    }

    fn write_to(&self, out: &mut String) {
        for minutiae in &self.leading {
            minutiae.write_to(out);
        }
        out.push_str(&self.text);
        for minutiae in &self.trailing {
            minutiae.write_to(out);
        }
    }
}

fn minutiae_width(list: &[Minutiae]) -> usize {
    list.iter().map(Minutiae::width).sum()
}

/// An interior node. Child slots are positional per kind; absent optional
/// children are `SyntaxNode::Empty`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: SyntaxKind,
    pub children: Vec<SyntaxNode>,
    pub diagnostics: Vec<SyntaxDiagnostic>,
}

/// An ordered sequence of nodes. Separated lists keep their separators at
/// odd indices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeList {
    pub items: Vec<SyntaxNode>,
}

impl NodeList {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn from_items(items: Vec<SyntaxNode>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: SyntaxNode) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxNode> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SyntaxNode> {
        self.items.get(index)
    }

    /// Elements of a separated list, skipping separators.
    pub fn separated_elements(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.items.iter().step_by(2)
    }
}

/// A node in the concrete syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    Token(Token),
    Node(Box<Node>),
    List(NodeList),
    Empty,
}

impl From<Token> for SyntaxNode {
    fn from(token: Token) -> Self {
        SyntaxNode::Token(token)
    }
}

impl From<NodeList> for SyntaxNode {
    fn from(list: NodeList) -> Self {
        SyntaxNode::List(list)
    }
}

impl SyntaxNode {
    pub fn node(kind: SyntaxKind, children: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Node(Box::new(Node {
            kind,
            children,
            diagnostics: Vec::new(),
        }))
    }

    pub fn list(items: Vec<SyntaxNode>) -> Self {
        SyntaxNode::List(NodeList::from_items(items))
    }

    pub fn empty_list() -> Self {
        SyntaxNode::List(NodeList::new())
    }

    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxNode::Token(token) => token.kind,
            SyntaxNode::Node(node) => node.kind,
            SyntaxNode::List(_) => SyntaxKind::List,
            SyntaxNode::Empty => SyntaxKind::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SyntaxNode::Empty)
    }

    /// A token that was inserted by recovery, or a node made only of them.
    pub fn is_missing(&self) -> bool {
        match self {
            SyntaxNode::Token(token) => token.is_missing,
            SyntaxNode::Node(node) => {
                let mut tokens = Vec::new();
                collect_tokens(self, &mut tokens);
                !node.children.is_empty() && !tokens.is_empty() && tokens.iter().all(|t| t.is_missing)
            }
            SyntaxNode::List(_) | SyntaxNode::Empty => false,
        }
    }

    /// Children of a node or items of a list. Tokens and `Empty` have none.
    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Node(node) => &node.children,
            SyntaxNode::List(list) => &list.items,
            SyntaxNode::Token(_) | SyntaxNode::Empty => &[],
        }
    }

    /// Take ownership of the children, leaving the node kind behind.
    pub fn into_children(self) -> Vec<SyntaxNode> {
        match self {
            SyntaxNode::Node(node) => node.children,
            SyntaxNode::List(list) => list.items,
            SyntaxNode::Token(_) | SyntaxNode::Empty => Vec::new(),
        }
    }

    /// Child at a slot; `Empty` when the slot does not exist.
    pub fn child(&self, index: usize) -> &SyntaxNode {
        self.children().get(index).unwrap_or(&EMPTY)
    }

    pub fn add_diagnostic(&mut self, diagnostic: SyntaxDiagnostic) {
        if let SyntaxNode::Node(node) = self {
            node.diagnostics.push(diagnostic);
        } else if let Some(token) = self.first_token_mut() {
            token.add_diagnostic(diagnostic);
        }
    }

    pub fn width(&self) -> usize {
        match self {
            SyntaxNode::Token(token) => token.width(),
            _ => self.children().iter().map(SyntaxNode::width).sum(),
        }
    }

    /// Width without the first token's leading and the last token's
    /// trailing minutiae.
    pub fn width_without_minutiae(&self) -> usize {
        let leading = self.first_token().map(Token::leading_width).unwrap_or(0);
        let trailing = self
            .last_token()
            .map(|t| minutiae_width(&t.trailing))
            .unwrap_or(0);
        self.width().saturating_sub(leading + trailing)
    }

    pub fn has_trailing_minutiae(&self) -> bool {
        self.last_token()
            .map(Token::has_trailing_minutiae)
            .unwrap_or(false)
    }

    pub fn first_token(&self) -> Option<&Token> {
        match self {
            SyntaxNode::Token(token) => Some(token),
            SyntaxNode::Empty => None,
            _ => self.children().iter().find_map(SyntaxNode::first_token),
        }
    }

    pub fn last_token(&self) -> Option<&Token> {
        match self {
            SyntaxNode::Token(token) => Some(token),
            SyntaxNode::Empty => None,
            _ => self.children().iter().rev().find_map(SyntaxNode::last_token),
        }
    }

    pub fn first_token_mut(&mut self) -> Option<&mut Token> {
        match self {
            SyntaxNode::Token(token) => Some(token),
            SyntaxNode::Node(node) => node.children.iter_mut().find_map(SyntaxNode::first_token_mut),
            SyntaxNode::List(list) => list.items.iter_mut().find_map(SyntaxNode::first_token_mut),
            SyntaxNode::Empty => None,
        }
    }

    pub fn last_token_mut(&mut self) -> Option<&mut Token> {
        match self {
            SyntaxNode::Token(token) => Some(token),
            SyntaxNode::Node(node) => node
                .children
                .iter_mut()
                .rev()
                .find_map(SyntaxNode::last_token_mut),
            SyntaxNode::List(list) => list
                .items
                .iter_mut()
                .rev()
                .find_map(SyntaxNode::last_token_mut),
            SyntaxNode::Empty => None,
        }
    }

    /// All tokens in source order. Tokens inside invalid minutiae are not
    /// included.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut tokens = Vec::new();
        collect_tokens(self, &mut tokens);
        tokens
    }

    /// Reconstruct the exact source text this node covers.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.width());
        self.write_to(&mut out);
        out
    }

    /// Alias kept for tooling that expects the longer name.
    pub fn to_source_code(&self) -> String {
        self.render()
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        match self {
            SyntaxNode::Token(token) => token.write_to(out),
            SyntaxNode::Node(node) => {
                for child in &node.children {
                    child.write_to(out);
                }
            }
            SyntaxNode::List(list) => {
                for item in &list.items {
                    item.write_to(out);
                }
            }
            SyntaxNode::Empty => {}
        }
    }

    /// All diagnostics in this subtree in source order, including the ones
    /// carried by invalid nodes inside minutiae.
    pub fn diagnostics(&self) -> Vec<&SyntaxDiagnostic> {
        let mut out = Vec::new();
        collect_diagnostics(self, &mut out);
        out
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics().is_empty()
    }

    /// A compact structural dump: `(Kind child ...)` for nodes, the text for
    /// tokens, `<missing Kind>` for inserted tokens and `[...]` for lists.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        write_sexp(self, &mut out);
        out
    }
}

static EMPTY: SyntaxNode = SyntaxNode::Empty;

fn collect_tokens<'a>(node: &'a SyntaxNode, out: &mut Vec<&'a Token>) {
    match node {
        SyntaxNode::Token(token) => out.push(token),
        _ => {
            for child in node.children() {
                collect_tokens(child, out);
            }
        }
    }
}

fn collect_token_diagnostics<'a>(token: &'a Token, out: &mut Vec<&'a SyntaxDiagnostic>) {
    for minutiae in &token.leading {
        if let Minutiae::InvalidNode(node) = minutiae {
            collect_diagnostics(node, out);
        }
    }
    out.extend(token.diagnostics.iter());
    for minutiae in &token.trailing {
        if let Minutiae::InvalidNode(node) = minutiae {
            collect_diagnostics(node, out);
        }
    }
}

fn collect_diagnostics<'a>(node: &'a SyntaxNode, out: &mut Vec<&'a SyntaxDiagnostic>) {
    match node {
        SyntaxNode::Token(token) => collect_token_diagnostics(token, out),
        SyntaxNode::Node(inner) => {
            out.extend(inner.diagnostics.iter());
            for child in &inner.children {
                collect_diagnostics(child, out);
            }
        }
        SyntaxNode::List(list) => {
            for item in &list.items {
                collect_diagnostics(item, out);
            }
        }
        SyntaxNode::Empty => {}
    }
}

fn write_sexp(node: &SyntaxNode, out: &mut String) {
    match node {
        SyntaxNode::Token(token) if token.is_missing => {
            let _ = write!(out, "<missing {:?}>", token.kind);
        }
        SyntaxNode::Token(token) if token.kind == SyntaxKind::EofToken => out.push_str("EOF"),
        SyntaxNode::Token(token) => out.push_str(&token.text),
        SyntaxNode::Node(inner) => {
            let _ = write!(out, "({:?}", inner.kind);
            for child in inner.children.iter().filter(|c| !c.is_empty()) {
                out.push(' ');
                write_sexp(child, out);
            }
            out.push(')');
        }
        SyntaxNode::List(list) => {
            out.push('[');
            for (i, item) in list.items.iter().filter(|c| !c.is_empty()).enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_sexp(item, out);
            }
            out.push(']');
        }
        SyntaxNode::Empty => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balc_diagnostics::messages;

    fn ident(text: &str) -> Token {
        Token::new(SyntaxKind::Identifier, text)
    }

    fn spaced(kind: SyntaxKind, text: &str) -> Token {
        Token::with_minutiae(
            kind,
            text,
            vec![Minutiae::Whitespace(" ".into())],
            vec![Minutiae::Whitespace(" ".into())],
        )
    }

    #[test]
    fn test_render_and_width() {
        let node = SyntaxNode::node(
            SyntaxKind::BinaryExpression,
            vec![
                ident("a").into(),
                spaced(SyntaxKind::PlusToken, "+").into(),
                ident("b").into(),
            ],
        );
        assert_eq!(node.render(), "a + b");
        assert_eq!(node.width(), 5);
        assert_eq!(node.to_sexp(), "(BinaryExpression a + b)");
    }

    #[test]
    fn test_empty_node() {
        let empty = SyntaxNode::Empty;
        assert_eq!(empty.kind(), SyntaxKind::Empty);
        assert_eq!(empty.render(), "");
        assert_eq!(empty.width(), 0);
        assert!(empty.children().is_empty());
    }

    #[test]
    fn test_width_without_minutiae() {
        let node = SyntaxNode::node(
            SyntaxKind::BracedExpression,
            vec![
                spaced(SyntaxKind::OpenParenToken, "(").into(),
                ident("x").into(),
                spaced(SyntaxKind::CloseParenToken, ")").into(),
            ],
        );
        assert_eq!(node.width(), 7);
        assert_eq!(node.width_without_minutiae(), 5);
        assert!(node.has_trailing_minutiae());
    }

    #[test]
    fn test_invalid_node_minutiae_renders() {
        let mut semicolon = Token::new(SyntaxKind::SemicolonToken, ";");
        let junk = spaced(SyntaxKind::CloseParenToken, ")");
        semicolon
            .leading
            .push(Minutiae::InvalidNode(Box::new(junk.into())));
        semicolon.add_diagnostic(SyntaxDiagnostic::new(messages::ERROR_INVALID_TOKEN, &[")"]));
        let node: SyntaxNode = semicolon.into();
        assert_eq!(node.render(), " ) ;");
        assert_eq!(node.diagnostics().len(), 1);
        assert_eq!(node.diagnostics()[0].message_text(), "invalid token ')'");
    }

    #[test]
    fn test_missing_token() {
        let diag = SyntaxDiagnostic::new(messages::ERROR_MISSING_SEMICOLON_TOKEN, &[]);
        let node: SyntaxNode = Token::missing(SyntaxKind::SemicolonToken, diag).into();
        assert!(node.is_missing());
        assert_eq!(node.width(), 0);
        assert_eq!(node.to_sexp(), "<missing SemicolonToken>");
        assert_eq!(node.diagnostics()[0].code(), 2);
    }

    #[test]
    fn test_first_and_last_token_skip_empty() {
        let mut node = SyntaxNode::node(
            SyntaxKind::ReturnStatement,
            vec![
                SyntaxNode::Empty,
                Token::new(SyntaxKind::ReturnKeyword, "return").into(),
                SyntaxNode::empty_list(),
                SyntaxNode::Empty,
            ],
        );
        assert_eq!(node.first_token().map(|t| t.kind), Some(SyntaxKind::ReturnKeyword));
        assert_eq!(node.last_token().map(|t| t.kind), Some(SyntaxKind::ReturnKeyword));
        if let Some(token) = node.last_token_mut() {
            token.trailing.push(Minutiae::EndOfLine("\n".into()));
        }
        assert_eq!(node.render(), "return\n");
        assert_eq!(node.child(7), &SyntaxNode::Empty);
    }

    #[test]
    fn test_separated_elements() {
        let list = NodeList::from_items(vec![
            ident("a").into(),
            Token::new(SyntaxKind::CommaToken, ",").into(),
            ident("b").into(),
        ]);
        let names: Vec<String> = list.separated_elements().map(SyntaxNode::render).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
