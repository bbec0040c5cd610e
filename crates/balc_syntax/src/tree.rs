//! `SyntaxTree`: a parsed root plus located diagnostics.

use balc_core::text::{LineMap, TextSpan};
use balc_diagnostics::{Diagnostic, DiagnosticCollection};

use crate::node::{Minutiae, SyntaxNode, Token};
use crate::visitor::{walk_node, walk_token, SyntaxVisitor};

/// The result of one parse.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    root: SyntaxNode,
    file_name: Option<String>,
}

impl SyntaxTree {
    pub fn new(root: SyntaxNode) -> Self {
        Self {
            root,
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn into_root(self) -> SyntaxNode {
        self.root
    }

    pub fn to_source_code(&self) -> String {
        self.root.render()
    }

    pub fn has_diagnostics(&self) -> bool {
        self.root.has_diagnostics()
    }

    /// Whether any attached diagnostic is an error. Documentation warnings
    /// alone leave a tree error-free.
    pub fn has_errors(&self) -> bool {
        self.diagnostics().has_errors()
    }

    /// Realise every attached diagnostic with its absolute span.
    pub fn diagnostics(&self) -> DiagnosticCollection {
        let text = self.root.render();
        let mut collector = DiagnosticLocator {
            offset: 0,
            line_map: LineMap::new(&text),
            file_name: self.file_name.clone(),
            out: DiagnosticCollection::new(),
        };
        collector.visit_node(&self.root);
        collector.out
    }
}

/// Walks the tree keeping a running byte offset.
struct DiagnosticLocator {
    offset: u32,
    line_map: LineMap,
    file_name: Option<String>,
    out: DiagnosticCollection,
}

impl DiagnosticLocator {
    fn report(&mut self, span: TextSpan, diagnostics: &[crate::node::SyntaxDiagnostic]) {
        for diagnostic in diagnostics {
            let args: Vec<&str> = diagnostic.args.iter().map(String::as_str).collect();
            let position = self.line_map.line_and_column_of(span.start);
            let mut realised = Diagnostic::with_span(span, position, &diagnostic.message, &args);
            if let Some(file) = &self.file_name {
                realised = realised.in_file(file.clone());
            }
            self.out.add(realised);
        }
    }
}

impl SyntaxVisitor for DiagnosticLocator {
    fn visit_node(&mut self, node: &SyntaxNode) {
        if let SyntaxNode::Node(inner) = node {
            if !inner.diagnostics.is_empty() {
                let leading = node.first_token().map(Token::leading_width).unwrap_or(0) as u32;
                let start = self.offset + leading;
                let span = TextSpan::new(start, node.width_without_minutiae() as u32);
                self.report(span, &inner.diagnostics);
            }
        }
        walk_node(self, node);
    }

    fn visit_token(&mut self, token: &Token) {
        walk_token(self, token);
    }

    fn visit_token_text(&mut self, token: &Token) {
        let span = TextSpan::new(self.offset, token.text.len() as u32);
        self.report(span, &token.diagnostics);
        self.offset += token.text.len() as u32;
    }

    fn visit_minutiae(&mut self, minutiae: &Minutiae) {
        match minutiae {
            Minutiae::InvalidNode(node) => self.visit_node(node),
            other => self.offset += other.width() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::missing_token;
    use crate::node::{Minutiae, SyntaxDiagnostic};
    use crate::SyntaxKind;
    use balc_diagnostics::messages;

    #[test]
    fn test_diagnostic_spans() {
        let ret = Token::with_minutiae(
            SyntaxKind::ReturnKeyword,
            "return",
            vec![],
            vec![Minutiae::Whitespace(" ".into())],
        );
        let mut name = Token::new(SyntaxKind::Identifier, "a");
        name.trailing.push(Minutiae::Whitespace(" ".into()));
        name.trailing.push(Minutiae::InvalidNode(Box::new({
            let mut junk = Token::new(SyntaxKind::InvalidToken, "$");
            junk.add_diagnostic(SyntaxDiagnostic::new(messages::ERROR_INVALID_TOKEN, &["$"]));
            junk.into()
        })));
        let root = SyntaxNode::node(
            SyntaxKind::ReturnStatement,
            vec![ret.into(), name.into(), missing_token(SyntaxKind::SemicolonToken).into()],
        );
        let tree = SyntaxTree::new(root).with_file_name("main.bal");
        assert_eq!(tree.to_source_code(), "return a $");

        let diagnostics = tree.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        let invalid = &diagnostics.diagnostics()[0];
        assert_eq!(invalid.span, Some(TextSpan::new(9, 1)));
        let missing = &diagnostics.diagnostics()[1];
        assert_eq!(missing.span, Some(TextSpan::new(10, 0)));
        assert_eq!(missing.to_string(), "main.bal:1:11: error BCE0002: missing semicolon token");
    }
}
