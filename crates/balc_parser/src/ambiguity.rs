//! Reclassification of constructs parsed before their role was known.
//!
//! At a statement start `[a, b]` may be a list constructor, a tuple type or
//! a list binding pattern, and `a|b` a union type or a bitwise or. The
//! parser builds the expression form first and converts it once the next
//! token decides. Conversions keep every token, so the converted tree
//! renders to the same text.
//!
//! The `get_*` functions assume the caller checked convertibility with the
//! matching `is_*`/`can_*` predicate and panic on anything else.

use std::mem;

use balc_syntax::{SyntaxKind, SyntaxNode};

/// Rebuild an interior node with a new kind, mapping each child with its
/// slot index. Node diagnostics are kept.
fn rebuild(
    mut node: SyntaxNode,
    kind: SyntaxKind,
    mut f: impl FnMut(usize, SyntaxNode) -> SyntaxNode,
) -> SyntaxNode {
    match &mut node {
        SyntaxNode::Node(inner) => {
            inner.kind = kind;
            let children = mem::take(&mut inner.children);
            inner.children = children.into_iter().enumerate().map(|(i, c)| f(i, c)).collect();
        }
        SyntaxNode::List(list) => {
            let items = mem::take(&mut list.items);
            list.items = items.into_iter().enumerate().map(|(i, c)| f(i, c)).collect();
        }
        SyntaxNode::Token(_) | SyntaxNode::Empty => {}
    }
    node
}

/// Map the elements of a separated list, passing separators through.
fn map_elements(list: SyntaxNode, mut f: impl FnMut(SyntaxNode) -> SyntaxNode) -> SyntaxNode {
    rebuild(list, SyntaxKind::List, |_, item| {
        if item.kind() == SyntaxKind::CommaToken {
            item
        } else {
            f(item)
        }
    })
}

fn elements(list: &SyntaxNode) -> impl Iterator<Item = &SyntaxNode> {
    list.children().iter().step_by(2)
}

fn is_negated_literal(node: &SyntaxNode) -> bool {
    node.kind() == SyntaxKind::UnaryExpression
        && node.child(0).kind() == SyntaxKind::MinusToken
        && node.child(1).kind() == SyntaxKind::BasicLiteral
}

fn is_name_reference(node: &SyntaxNode) -> bool {
    matches!(
        node.kind(),
        SyntaxKind::SimpleNameReference | SyntaxKind::QualifiedNameReference
    )
}

// ============================================================================
// Types
// ============================================================================

/// Whether `node` can be read as a type descriptor.
pub fn is_type_convertible(node: &SyntaxNode) -> bool {
    let kind = node.kind();
    match kind {
        _ if kind.is_type_descriptor() => true,
        SyntaxKind::SimpleNameReference
        | SyntaxKind::QualifiedNameReference
        | SyntaxKind::RestDescriptor
        | SyntaxKind::BasicLiteral
        | SyntaxKind::NilLiteral => true,
        SyntaxKind::UnaryExpression => is_negated_literal(node),
        SyntaxKind::BracedExpression => is_type_convertible(node.child(1)),
        SyntaxKind::BinaryExpression => {
            matches!(
                node.child(1).kind(),
                SyntaxKind::PipeToken | SyntaxKind::BitwiseAndToken
            ) && is_type_convertible(node.child(0))
                && is_type_convertible(node.child(2))
        }
        SyntaxKind::IndexedExpression => {
            is_type_convertible(node.child(0)) && is_array_length(node.child(2))
        }
        SyntaxKind::AmbiguousCollection | SyntaxKind::ListConstructor => {
            elements(node.child(1)).all(is_type_convertible)
        }
        _ => false,
    }
}

/// `[]`, `[3]`, `[*]` or `[N]`.
fn is_array_length(keys: &SyntaxNode) -> bool {
    match keys.children() {
        [] => true,
        [key] => {
            matches!(
                key.kind(),
                SyntaxKind::BasicLiteral | SyntaxKind::AsteriskToken
            ) || is_name_reference(key)
        }
        _ => false,
    }
}

/// Whether `node` can only be a type: it converts to one and contains a
/// construct no expression has, such as `int`, `T[]` or `T?`.
pub fn is_definitely_type(node: &SyntaxNode) -> bool {
    is_type_convertible(node) && has_type_only_part(node)
}

/// Only meaningful for nodes that are type convertible, which makes every
/// child visited here convertible too.
fn has_type_only_part(node: &SyntaxNode) -> bool {
    let kind = node.kind();
    match kind {
        _ if kind.is_type_descriptor() => true,
        SyntaxKind::RestDescriptor => true,
        SyntaxKind::BracedExpression => has_type_only_part(node.child(1)),
        SyntaxKind::BinaryExpression => has_type_only_part(node.child(0)) || has_type_only_part(node.child(2)),
        SyntaxKind::IndexedExpression => {
            let keys = node.child(2);
            has_type_only_part(node.child(0))
                || keys.children().is_empty()
                || keys.child(0).kind() == SyntaxKind::AsteriskToken
        }
        SyntaxKind::AmbiguousCollection => elements(node.child(1)).any(has_type_only_part),
        _ => false,
    }
}

/// Read an expression-shaped node as a type descriptor.
///
/// # Panics
///
/// If `is_type_convertible(&node)` is false.
pub fn get_type_desc_from_expr(node: SyntaxNode) -> SyntaxNode {
    let kind = node.kind();
    match kind {
        _ if kind.is_type_descriptor() => node,
        SyntaxKind::SimpleNameReference | SyntaxKind::QualifiedNameReference | SyntaxKind::RestDescriptor => node,
        SyntaxKind::BasicLiteral => SyntaxNode::node(SyntaxKind::SingletonTypeDesc, vec![node]),
        SyntaxKind::UnaryExpression if is_negated_literal(&node) => {
            SyntaxNode::node(SyntaxKind::SingletonTypeDesc, vec![node])
        }
        SyntaxKind::NilLiteral => rebuild(node, SyntaxKind::NilTypeDesc, |_, c| c),
        SyntaxKind::BracedExpression => rebuild(node, SyntaxKind::ParenthesisedTypeDesc, |i, c| {
            if i == 1 {
                get_type_desc_from_expr(c)
            } else {
                c
            }
        }),
        SyntaxKind::BinaryExpression => {
            let type_kind = match node.child(1).kind() {
                SyntaxKind::PipeToken => SyntaxKind::UnionTypeDesc,
                SyntaxKind::BitwiseAndToken => SyntaxKind::IntersectionTypeDesc,
                op => panic!("operator {op:?} does not form a type descriptor"),
            };
            rebuild(node, type_kind, |i, c| if i == 1 { c } else { get_type_desc_from_expr(c) })
        }
        SyntaxKind::IndexedExpression => rebuild(node, SyntaxKind::ArrayTypeDesc, |i, c| match i {
            0 => get_type_desc_from_expr(c),
            2 => get_array_length(c),
            _ => c,
        }),
        SyntaxKind::AmbiguousCollection | SyntaxKind::ListConstructor => {
            rebuild(node, SyntaxKind::TupleTypeDesc, |i, c| {
                if i == 1 {
                    map_elements(c, get_type_desc_from_expr)
                } else {
                    c
                }
            })
        }
        _ => panic!("{kind:?} cannot be converted to a type descriptor"),
    }
}

fn get_array_length(keys: SyntaxNode) -> SyntaxNode {
    let mut keys = keys.into_children();
    match keys.len() {
        0 => SyntaxNode::Empty,
        1 => keys.remove(0),
        n => panic!("array dimension with {n} keys"),
    }
}

// ============================================================================
// Binding patterns
// ============================================================================

/// Whether `node` can be read as a binding pattern.
pub fn can_be_binding_pattern(node: &SyntaxNode) -> bool {
    let kind = node.kind();
    match kind {
        _ if kind.is_binding_pattern() => true,
        SyntaxKind::SimpleNameReference => true,
        SyntaxKind::ListConstructor | SyntaxKind::AmbiguousCollection => {
            elements(node.child(1)).all(|member| match member.kind() {
                SyntaxKind::SpreadMember => member.child(1).kind() == SyntaxKind::SimpleNameReference,
                _ => can_be_binding_pattern(member),
            })
        }
        SyntaxKind::MappingConstructor => elements(node.child(1)).all(|field| match field.kind() {
            SyntaxKind::SpecificField => {
                field.child(0).is_empty()
                    && field.child(1).kind() == SyntaxKind::Identifier
                    && (field.child(3).is_empty() || can_be_binding_pattern(field.child(3)))
            }
            SyntaxKind::SpreadField => field.child(1).kind() == SyntaxKind::SimpleNameReference,
            _ => false,
        }),
        SyntaxKind::ErrorConstructor => elements(node.child(3)).all(|arg| match arg.kind() {
            SyntaxKind::PositionalArg => can_be_binding_pattern(arg.child(0)),
            SyntaxKind::NamedArg => can_be_binding_pattern(arg.child(2)),
            SyntaxKind::RestArg => arg.child(1).kind() == SyntaxKind::SimpleNameReference,
            _ => false,
        }),
        _ => false,
    }
}

/// Read an expression-shaped node as a binding pattern.
///
/// # Panics
///
/// If `can_be_binding_pattern(&node)` is false.
pub fn get_binding_pattern(node: SyntaxNode) -> SyntaxNode {
    let kind = node.kind();
    match kind {
        _ if kind.is_binding_pattern() => node,
        SyntaxKind::SimpleNameReference => {
            let is_wildcard = node
                .first_token()
                .map_or(false, |token| token.text == "_");
            let pattern_kind = if is_wildcard {
                SyntaxKind::WildcardBindingPattern
            } else {
                SyntaxKind::CaptureBindingPattern
            };
            rebuild(node, pattern_kind, |_, c| c)
        }
        SyntaxKind::ListConstructor | SyntaxKind::AmbiguousCollection => {
            rebuild(node, SyntaxKind::ListBindingPattern, |i, c| {
                if i == 1 {
                    get_binding_patterns_list(c)
                } else {
                    c
                }
            })
        }
        SyntaxKind::SpreadMember | SyntaxKind::SpreadField => rest_binding_pattern(node),
        SyntaxKind::MappingConstructor => rebuild(node, SyntaxKind::MappingBindingPattern, |i, c| {
            if i == 1 {
                map_elements(c, field_binding_pattern)
            } else {
                c
            }
        }),
        SyntaxKind::ErrorConstructor => rebuild(node, SyntaxKind::ErrorBindingPattern, |i, c| {
            if i == 3 {
                map_elements(c, error_arg_binding_pattern)
            } else {
                c
            }
        }),
        _ => panic!("{kind:?} cannot be converted to a binding pattern"),
    }
}

/// Convert each element of a separated list to a binding pattern,
/// keeping the separators.
pub fn get_binding_patterns_list(list: SyntaxNode) -> SyntaxNode {
    map_elements(list, get_binding_pattern)
}

/// `...x` as a spread becomes `...x` as a rest pattern.
fn rest_binding_pattern(node: SyntaxNode) -> SyntaxNode {
    rebuild(node, SyntaxKind::RestBindingPattern, |i, c| {
        if i == 1 {
            name_token(c)
        } else {
            c
        }
    })
}

fn name_token(node: SyntaxNode) -> SyntaxNode {
    match node.kind() {
        SyntaxKind::SimpleNameReference => node.into_children().into_iter().next().unwrap_or(SyntaxNode::Empty),
        kind => panic!("{kind:?} is not a variable name"),
    }
}

/// `k: v` or `k` in a mapping constructor as a field binding pattern.
fn field_binding_pattern(field: SyntaxNode) -> SyntaxNode {
    match field.kind() {
        SyntaxKind::SpreadField => rest_binding_pattern(field),
        SyntaxKind::SpecificField => {
            let mut slots = field.into_children().into_iter();
            let _readonly = slots.next();
            let key = slots.next().unwrap_or(SyntaxNode::Empty);
            let colon = slots.next().unwrap_or(SyntaxNode::Empty);
            let value = match slots.next() {
                Some(SyntaxNode::Empty) | None => SyntaxNode::Empty,
                Some(value) => get_binding_pattern(value),
            };
            let name = SyntaxNode::node(SyntaxKind::SimpleNameReference, vec![key]);
            SyntaxNode::node(SyntaxKind::FieldBindingPattern, vec![name, colon, value])
        }
        kind => panic!("{kind:?} cannot be converted to a field binding pattern"),
    }
}

fn error_arg_binding_pattern(arg: SyntaxNode) -> SyntaxNode {
    match arg.kind() {
        SyntaxKind::PositionalArg => {
            let value = arg.into_children().into_iter().next().unwrap_or(SyntaxNode::Empty);
            get_binding_pattern(value)
        }
        SyntaxKind::NamedArg => rebuild(arg, SyntaxKind::NamedArgBindingPattern, |i, c| {
            if i == 2 {
                get_binding_pattern(c)
            } else {
                c
            }
        }),
        SyntaxKind::RestArg => rest_binding_pattern(arg),
        kind => panic!("{kind:?} cannot be converted to an error binding pattern argument"),
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Resolve every ambiguous collection in `node` to a list constructor.
///
/// # Panics
///
/// If `node` is a statement or a binding pattern.
pub fn get_expression(node: SyntaxNode) -> SyntaxNode {
    let kind = node.kind();
    if kind.is_statement() || kind.is_binding_pattern() {
        panic!("{kind:?} cannot be converted to an expression");
    }
    resolve_expression(node)
}

/// Convert each element of a separated list to an expression, keeping the
/// separators.
pub fn get_expression_list(list: SyntaxNode) -> SyntaxNode {
    map_elements(list, get_expression)
}

/// Only positions a statement-start parse can put a collection in are
/// visited; everything below a call or a constructor was parsed as a
/// plain expression already.
fn resolve_expression(node: SyntaxNode) -> SyntaxNode {
    match node.kind() {
        SyntaxKind::AmbiguousCollection => rebuild(node, SyntaxKind::ListConstructor, |i, c| {
            if i == 1 {
                get_expression_list(c)
            } else {
                c
            }
        }),
        SyntaxKind::SpreadMember => rebuild(node, SyntaxKind::SpreadMember, |_, c| resolve_expression(c)),
        kind @ (SyntaxKind::BinaryExpression
        | SyntaxKind::UnaryExpression
        | SyntaxKind::BracedExpression
        | SyntaxKind::IndexedExpression
        | SyntaxKind::FieldAccess
        | SyntaxKind::OptionalFieldAccess
        | SyntaxKind::MethodCall
        | SyntaxKind::TypeTestExpression
        | SyntaxKind::ConditionalExpression
        | SyntaxKind::List) => rebuild(node, kind, |_, c| resolve_expression(c)),
        _ => node,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balc_syntax::Token;

    fn token(kind: SyntaxKind, text: &str) -> SyntaxNode {
        Token::new(kind, text).into()
    }

    fn name(text: &str) -> SyntaxNode {
        SyntaxNode::node(SyntaxKind::SimpleNameReference, vec![token(SyntaxKind::Identifier, text)])
    }

    fn collection(members: Vec<SyntaxNode>) -> SyntaxNode {
        let mut items = Vec::new();
        for (i, member) in members.into_iter().enumerate() {
            if i > 0 {
                items.push(token(SyntaxKind::CommaToken, ","));
            }
            items.push(member);
        }
        SyntaxNode::node(
            SyntaxKind::AmbiguousCollection,
            vec![
                token(SyntaxKind::OpenBracketToken, "["),
                SyntaxNode::list(items),
                token(SyntaxKind::CloseBracketToken, "]"),
            ],
        )
    }

    #[test]
    fn test_collection_to_list_constructor() {
        let node = get_expression(collection(vec![name("a"), collection(vec![name("b")])]));
        assert_eq!(node.kind(), SyntaxKind::ListConstructor);
        assert_eq!(node.child(1).child(2).kind(), SyntaxKind::ListConstructor);
        assert_eq!(node.render(), "[a,[b]]");
    }

    #[test]
    fn test_collection_to_tuple_type() {
        let node = get_type_desc_from_expr(collection(vec![name("T"), name("U")]));
        assert_eq!(node.kind(), SyntaxKind::TupleTypeDesc);
        assert_eq!(node.child(1).child(0).kind(), SyntaxKind::SimpleNameReference);
    }

    #[test]
    fn test_collection_to_list_binding_pattern() {
        let node = get_binding_pattern(collection(vec![name("a"), name("_")]));
        assert_eq!(node.kind(), SyntaxKind::ListBindingPattern);
        assert_eq!(node.child(1).child(0).kind(), SyntaxKind::CaptureBindingPattern);
        assert_eq!(node.child(1).child(2).kind(), SyntaxKind::WildcardBindingPattern);
        assert_eq!(node.child(1).child(1).kind(), SyntaxKind::CommaToken);
    }

    #[test]
    fn test_literal_becomes_singleton() {
        let literal = SyntaxNode::node(
            SyntaxKind::BasicLiteral,
            vec![token(SyntaxKind::DecimalIntegerLiteralToken, "1")],
        );
        assert!(is_type_convertible(&literal));
        assert_eq!(get_type_desc_from_expr(literal).kind(), SyntaxKind::SingletonTypeDesc);
    }

    #[test]
    fn test_union_from_pipe() {
        let node = SyntaxNode::node(
            SyntaxKind::BinaryExpression,
            vec![name("A"), token(SyntaxKind::PipeToken, "|"), name("B")],
        );
        assert!(is_type_convertible(&node));
        assert!(!is_definitely_type(&node));
        assert_eq!(get_type_desc_from_expr(node).kind(), SyntaxKind::UnionTypeDesc);
    }

    #[test]
    fn test_call_is_not_convertible() {
        let call = SyntaxNode::node(
            SyntaxKind::FunctionCall,
            vec![
                name("f"),
                token(SyntaxKind::OpenParenToken, "("),
                SyntaxNode::empty_list(),
                token(SyntaxKind::CloseParenToken, ")"),
            ],
        );
        assert!(!is_type_convertible(&call));
        assert!(!can_be_binding_pattern(&call));
    }

    #[test]
    #[should_panic(expected = "cannot be converted to a type descriptor")]
    fn test_unsupported_type_conversion_panics() {
        let call = SyntaxNode::node(SyntaxKind::FunctionCall, vec![name("f")]);
        get_type_desc_from_expr(call);
    }

    #[test]
    #[should_panic(expected = "cannot be converted to a binding pattern")]
    fn test_unsupported_binding_pattern_conversion_panics() {
        get_binding_pattern(SyntaxNode::node(
            SyntaxKind::BasicLiteral,
            vec![token(SyntaxKind::DecimalIntegerLiteralToken, "1")],
        ));
    }

    #[test]
    #[should_panic(expected = "cannot be converted to an expression")]
    fn test_binding_pattern_to_expression_panics() {
        get_expression(SyntaxNode::node(
            SyntaxKind::CaptureBindingPattern,
            vec![token(SyntaxKind::Identifier, "x")],
        ));
    }
}
