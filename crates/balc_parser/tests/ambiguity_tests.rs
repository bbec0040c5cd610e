//! Ambiguity resolution tests.
//!
//! Bracketed and braced prefixes at statement start are parsed once and
//! reclassified by the token that follows them.

use balc_parser::ambiguity::{
    get_binding_pattern, get_expression, get_type_desc_from_expr, is_definitely_type, is_type_convertible,
};
use balc_parser::Parser;
use balc_syntax::{SyntaxKind, SyntaxNode, SyntaxTree};

fn statement(source: &str) -> SyntaxTree {
    Parser::new(source).parse_as_statement()
}

fn element_kinds(list: &SyntaxNode) -> Vec<SyntaxKind> {
    list.children()
        .iter()
        .map(SyntaxNode::kind)
        .filter(|kind| *kind != SyntaxKind::CommaToken)
        .collect()
}

#[test]
fn test_list_before_equal_is_binding_pattern() {
    let tree = statement("[a, b] = f();");
    let root = tree.root();
    assert_eq!(root.kind(), SyntaxKind::AssignmentStatement);
    let target = root.child(0);
    assert_eq!(target.kind(), SyntaxKind::ListBindingPattern);
    assert_eq!(
        element_kinds(target.child(1)),
        vec![SyntaxKind::CaptureBindingPattern, SyntaxKind::CaptureBindingPattern]
    );
    assert!(!tree.has_diagnostics());
}

#[test]
fn test_list_before_semicolon_is_list_constructor() {
    let tree = statement("[a, b];");
    let root = tree.root();
    assert_eq!(root.kind(), SyntaxKind::ExpressionStatement);
    let expr = root.child(0);
    assert_eq!(expr.kind(), SyntaxKind::ListConstructor);
    assert_eq!(
        element_kinds(expr.child(1)),
        vec![SyntaxKind::SimpleNameReference, SyntaxKind::SimpleNameReference]
    );
}

#[test]
fn test_list_before_identifier_is_tuple_type() {
    let tree = statement("[int, string] x = [1, \"s\"];");
    let root = tree.root();
    assert_eq!(root.kind(), SyntaxKind::LocalVarDecl);
    let binding = root.child(2);
    assert_eq!(binding.kind(), SyntaxKind::TypedBindingPattern);
    let tuple = binding.child(0);
    assert_eq!(tuple.kind(), SyntaxKind::TupleTypeDesc);
    assert_eq!(
        element_kinds(tuple.child(1)),
        vec![SyntaxKind::BuiltinSimpleTypeDesc, SyntaxKind::BuiltinSimpleTypeDesc]
    );
    assert_eq!(root.child(4).kind(), SyntaxKind::ListConstructor);
    assert!(!tree.has_diagnostics());
}

#[test]
fn test_nested_list_binding_pattern_with_rest() {
    let tree = statement("[a, [b, _], ...rest] = values;");
    let target = tree.root().child(0);
    assert_eq!(target.kind(), SyntaxKind::ListBindingPattern);
    assert_eq!(
        element_kinds(target.child(1)),
        vec![
            SyntaxKind::CaptureBindingPattern,
            SyntaxKind::ListBindingPattern,
            SyntaxKind::RestBindingPattern,
        ]
    );
    assert_eq!(
        element_kinds(target.child(1).child(2).child(1)),
        vec![SyntaxKind::CaptureBindingPattern, SyntaxKind::WildcardBindingPattern]
    );
}

#[test]
fn test_array_of_names_is_array_type() {
    let tree = statement("Person[2] people = [p1, p2];");
    let root = tree.root();
    assert_eq!(root.kind(), SyntaxKind::LocalVarDecl);
    assert_eq!(root.child(2).child(0).kind(), SyntaxKind::ArrayTypeDesc);
}

#[test]
fn test_member_access_stays_expression() {
    let tree = statement("people[2] = p;");
    let root = tree.root();
    assert_eq!(root.kind(), SyntaxKind::AssignmentStatement);
    assert_eq!(root.child(0).kind(), SyntaxKind::IndexedExpression);
}

#[test]
fn test_error_constructor_becomes_error_binding_pattern() {
    let tree = statement("error(msg, code = c) = f();");
    let root = tree.root();
    assert_eq!(root.kind(), SyntaxKind::AssignmentStatement);
    assert_eq!(root.child(0).kind(), SyntaxKind::ErrorBindingPattern);
}

#[test]
fn test_reclassification_preserves_text() {
    for source in [
        "[a, b] = f();",
        "[a, b];",
        "[int, string] x = [1, \"s\"];",
        "{name, age: years} = person;",
        "[int, string...] rest = [];",
    ] {
        let tree = statement(source);
        assert_eq!(tree.to_source_code(), source);
        assert!(!tree.has_diagnostics(), "{}: {:?}", source, tree.diagnostics().codes());
    }
}

#[test]
fn test_expression_with_type_parts_stays_expression() {
    let tree = statement("x() | int;");
    assert_eq!(tree.root().kind(), SyntaxKind::ExpressionStatement);
    assert_eq!(tree.root().child(0).kind(), SyntaxKind::BinaryExpression);
    assert_eq!(tree.to_source_code(), "x() | int;");

    let tree = statement("1 + 2 | int y;");
    assert_ne!(tree.root().kind(), SyntaxKind::LocalVarDecl);
    assert!(tree.has_diagnostics());
}

#[test]
fn test_unconvertible_statement_starts_are_parsed_as_expressions() {
    for source in [
        "f()[] x;",
        "a.b[] x = 1;",
        "[f(), int] x;",
        "[{a: 1}, int] x;",
        "[from var v in xs select v, int] x;",
        "[<int>a, int] x;",
        "[...a, int] x;",
        "[a is int, int] x;",
        "[a * b, int] x;",
        "[a - b, int] x;",
        "[1...3, int] x;",
        "[new C(), int] x;",
        "T[1, 2, 3] x;",
    ] {
        let tree = statement(source);
        assert_ne!(tree.root().kind(), SyntaxKind::LocalVarDecl, "{}", source);
        assert_eq!(tree.to_source_code(), source);
        assert!(tree.has_diagnostics(), "{}", source);

        let module = format!("function f() {{ {} }}", source);
        assert_eq!(balc_parser::parse(&module).to_source_code(), module);
    }
}

// ============================================================================
// Direct conversions
// ============================================================================

fn expr(source: &str) -> SyntaxNode {
    Parser::new(source).parse_as_expression().into_root()
}

#[test]
fn test_convert_expression_to_type() {
    let ty = get_type_desc_from_expr(expr("A|B"));
    assert_eq!(ty.kind(), SyntaxKind::UnionTypeDesc);
    assert_eq!(ty.render(), "A|B");

    let ty = get_type_desc_from_expr(expr("()"));
    assert_eq!(ty.kind(), SyntaxKind::NilTypeDesc);

    let ty = get_type_desc_from_expr(expr("\"on\""));
    assert_eq!(ty.kind(), SyntaxKind::SingletonTypeDesc);
}

#[test]
fn test_convert_expression_to_binding_pattern() {
    let bp = get_binding_pattern(expr("_"));
    assert_eq!(bp.kind(), SyntaxKind::WildcardBindingPattern);

    let bp = get_binding_pattern(expr("{a, b: c}"));
    assert_eq!(bp.kind(), SyntaxKind::MappingBindingPattern);
    assert_eq!(bp.render(), "{a, b: c}");
}

#[test]
fn test_expression_is_unchanged_by_get_expression() {
    let node = expr("a + b");
    let sexp = node.to_sexp();
    assert_eq!(get_expression(node).to_sexp(), sexp);
}

#[test]
fn test_type_parts_need_a_convertible_whole() {
    assert!(is_definitely_type(&expr("int|A")));
    assert!(!is_definitely_type(&expr("f()|int")));
    assert!(!is_definitely_type(&expr("a.b[]")));
    assert!(!is_type_convertible(&expr("T[1, 2]")));
}

#[test]
#[should_panic(expected = "cannot be converted to a type descriptor")]
fn test_call_cannot_become_type() {
    get_type_desc_from_expr(expr("f()"));
}

#[test]
#[should_panic(expected = "cannot be converted to a binding pattern")]
fn test_literal_cannot_become_binding_pattern() {
    get_binding_pattern(expr("1"));
}
