//! Visitor for traversing the syntax tree, minutiae included.
//!
//! Default implementations walk into children, so an implementor overrides
//! only the hooks it cares about.

use crate::node::{Minutiae, SyntaxNode, Token};

pub trait SyntaxVisitor {
    fn visit_node(&mut self, node: &SyntaxNode) {
        walk_node(self, node);
    }

    fn visit_token(&mut self, token: &Token) {
        walk_token(self, token);
    }

    /// Called between a token's leading and trailing minutiae.
    fn visit_token_text(&mut self, _token: &Token) {}

    fn visit_minutiae(&mut self, minutiae: &Minutiae) {
        walk_minutiae(self, minutiae);
    }
}

pub fn walk_node<V: SyntaxVisitor + ?Sized>(visitor: &mut V, node: &SyntaxNode) {
    match node {
        SyntaxNode::Token(token) => visitor.visit_token(token),
        SyntaxNode::Node(_) | SyntaxNode::List(_) => {
            for child in node.children() {
                visitor.visit_node(child);
            }
        }
        SyntaxNode::Empty => {}
    }
}

pub fn walk_token<V: SyntaxVisitor + ?Sized>(visitor: &mut V, token: &Token) {
    for minutiae in &token.leading {
        visitor.visit_minutiae(minutiae);
    }
    visitor.visit_token_text(token);
    for minutiae in &token.trailing {
        visitor.visit_minutiae(minutiae);
    }
}

pub fn walk_minutiae<V: SyntaxVisitor + ?Sized>(visitor: &mut V, minutiae: &Minutiae) {
    if let Minutiae::InvalidNode(node) = minutiae {
        visitor.visit_node(node);
    }
}
