//! Qualifier collection and per-construct validation.
//!
//! Qualifiers are gathered without regard to what follows them. Once the
//! construct is known, `validate_qualifiers` keeps the allowed ones in the
//! tree and turns the rest into invalid minutiae on a neighbouring
//! qualifier, so the source text is never lost.

use balc_diagnostics::messages;
use balc_syntax::factory::{append_invalid_nodes, into_invalid_node, prepend_invalid_nodes};
use balc_syntax::{SyntaxKind, SyntaxNode, Token};
use tracing::debug;

use super::Parser;

pub(super) const FUNCTION_QUALIFIERS: &[SyntaxKind] = &[
    SyntaxKind::PublicKeyword,
    SyntaxKind::IsolatedKeyword,
    SyntaxKind::TransactionalKeyword,
];

pub(super) const PUBLIC_ONLY: &[SyntaxKind] = &[SyntaxKind::PublicKeyword];

pub(super) const CLASS_QUALIFIERS: &[SyntaxKind] = &[
    SyntaxKind::PublicKeyword,
    SyntaxKind::IsolatedKeyword,
    SyntaxKind::ClientKeyword,
    SyntaxKind::ReadonlyKeyword,
    SyntaxKind::DistinctKeyword,
    SyntaxKind::ServiceKeyword,
];

pub(super) const MODULE_VAR_QUALIFIERS: &[SyntaxKind] = &[
    SyntaxKind::PublicKeyword,
    SyntaxKind::FinalKeyword,
    SyntaxKind::ConfigurableKeyword,
    SyntaxKind::IsolatedKeyword,
];

pub(super) const OBJECT_MEMBER_QUALIFIERS: &[SyntaxKind] = &[
    SyntaxKind::PublicKeyword,
    SyntaxKind::PrivateKeyword,
    SyntaxKind::IsolatedKeyword,
    SyntaxKind::RemoteKeyword,
    SyntaxKind::ResourceKeyword,
    SyntaxKind::TransactionalKeyword,
    SyntaxKind::FinalKeyword,
];

pub(super) const SERVICE_QUALIFIERS: &[SyntaxKind] = &[SyntaxKind::IsolatedKeyword];

pub(super) const OBJECT_TYPE_QUALIFIERS: &[SyntaxKind] = &[
    SyntaxKind::IsolatedKeyword,
    SyntaxKind::ClientKeyword,
    SyntaxKind::ServiceKeyword,
];

pub(super) const FUNCTION_TYPE_QUALIFIERS: &[SyntaxKind] =
    &[SyntaxKind::IsolatedKeyword, SyntaxKind::TransactionalKeyword];

pub(super) const WORKER_QUALIFIERS: &[SyntaxKind] = &[SyntaxKind::TransactionalKeyword];

/// Keywords that are always qualifiers where they appear.
fn is_plain_qualifier(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::IsolatedKeyword
            | SyntaxKind::TransactionalKeyword
            | SyntaxKind::FinalKeyword
            | SyntaxKind::ConfigurableKeyword
            | SyntaxKind::RemoteKeyword
            | SyntaxKind::ResourceKeyword
    )
}

/// Keywords that qualify a class or object but mean something else
/// elsewhere (`readonly` the type, `service` the declaration, ...).
fn is_class_qualifier(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ReadonlyKeyword
            | SyntaxKind::DistinctKeyword
            | SyntaxKind::ServiceKeyword
            | SyntaxKind::ClientKeyword
    )
}

impl Parser {
    /// Collect the qualifier keywords at the current position.
    pub(super) fn parse_qualifiers(&mut self) -> Vec<Token> {
        let mut qualifiers = Vec::new();
        loop {
            let kind = self.peek_kind();
            let take = if is_plain_qualifier(kind) {
                true
            } else if is_class_qualifier(kind) {
                self.is_class_qualifier_chain_ahead()
            } else {
                false
            };
            if !take {
                return qualifiers;
            }
            qualifiers.push(self.consume());
        }
    }

    /// Whether the qualifier keywords starting at the next token end in
    /// `class` or `object`.
    fn is_class_qualifier_chain_ahead(&mut self) -> bool {
        let mut n = 2;
        loop {
            let kind = self.peek_kind_n(n);
            if is_plain_qualifier(kind) || is_class_qualifier(kind) {
                n += 1;
                continue;
            }
            return matches!(kind, SyntaxKind::ClassKeyword | SyntaxKind::ObjectKeyword);
        }
    }

    /// Keep the qualifiers `allowed` here, once each. Every other one is
    /// reported and attached as invalid minutiae: after the previous valid
    /// qualifier, before the first valid one, or in front of the next token
    /// when none is valid.
    pub(super) fn validate_qualifiers(
        &mut self,
        qualifiers: Vec<Token>,
        allowed: &[SyntaxKind],
    ) -> SyntaxNode {
        let mut valid: Vec<Token> = Vec::with_capacity(qualifiers.len());
        let mut orphans: Vec<SyntaxNode> = Vec::new();
        for qualifier in qualifiers {
            let message = if !allowed.contains(&qualifier.kind) {
                messages::ERROR_QUALIFIER_NOT_ALLOWED
            } else if valid.iter().any(|q| q.kind == qualifier.kind) {
                messages::ERROR_DUPLICATE_QUALIFIER
            } else {
                let mut qualifier = qualifier;
                prepend_invalid_nodes(&mut qualifier, std::mem::take(&mut orphans));
                valid.push(qualifier);
                continue;
            };
            debug!(qualifier = %qualifier.text, code = message.code, "invalid qualifier");
            let invalid = into_invalid_node(qualifier.into(), message);
            match valid.last_mut() {
                Some(previous) => append_invalid_nodes(previous, vec![invalid]),
                None => orphans.push(invalid),
            }
        }
        if !orphans.is_empty() {
            self.attach_invalid_nodes(None, orphans);
        }
        SyntaxNode::list(valid.into_iter().map(SyntaxNode::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validated(source: &str, allowed: &[SyntaxKind]) -> (Parser, SyntaxNode) {
        let mut parser = Parser::new(source);
        let qualifiers = parser.parse_qualifiers();
        let list = parser.validate_qualifiers(qualifiers, allowed);
        (parser, list)
    }

    #[test]
    fn test_collects_plain_qualifiers() {
        let mut parser = Parser::new("public isolated function f");
        let qualifiers = parser.parse_qualifiers();
        assert_eq!(qualifiers.len(), 2);
        assert_eq!(parser.peek_kind(), SyntaxKind::FunctionKeyword);
    }

    #[test]
    fn test_class_qualifiers_need_class() {
        let mut parser = Parser::new("readonly int x");
        assert!(parser.parse_qualifiers().is_empty());

        let mut parser = Parser::new("isolated readonly client class C");
        assert_eq!(parser.parse_qualifiers().len(), 3);
    }

    #[test]
    fn test_disallowed_qualifier_attached_to_previous() {
        let (_, list) = validated("public remote ", FUNCTION_QUALIFIERS);
        assert_eq!(list.children().len(), 1);
        assert_eq!(list.render(), "public remote ");
        let codes: Vec<u32> = list.diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![102]);
    }

    #[test]
    fn test_duplicate_qualifier() {
        let (_, list) = validated("isolated isolated ", FUNCTION_QUALIFIERS);
        assert_eq!(list.children().len(), 1);
        assert_eq!(list.diagnostics()[0].code(), 101);
        assert_eq!(list.diagnostics()[0].message_text(), "duplicate qualifier 'isolated'");
    }

    #[test]
    fn test_leading_invalid_goes_before_first_valid() {
        let (_, list) = validated("remote public ", FUNCTION_QUALIFIERS);
        assert_eq!(list.children().len(), 1);
        assert_eq!(list.render(), "remote public ");
    }

    #[test]
    fn test_all_invalid_go_to_pending() {
        let (parser, list) = validated("remote resource ", PUBLIC_ONLY);
        assert!(list.children().is_empty());
        assert_eq!(parser.invalid_pending.len(), 2);
    }
}
