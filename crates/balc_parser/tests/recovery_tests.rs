//! Recovery integration tests.
//!
//! A broken input must produce the tree of the intended input, plus the
//! inserted missing tokens or the skipped tokens as invalid minutiae.

use balc_parser::{parse, Parser};
use balc_syntax::{Minutiae, SyntaxKind, SyntaxNode};

fn function(body: &str) -> String {
    format!("function f() {{\n{}\n}}\n", body)
}

/// Helper: structural dump of a whole module.
fn sexp(source: &str) -> String {
    parse(source).root().to_sexp()
}

fn codes(source: &str) -> Vec<u32> {
    parse(source).diagnostics().codes()
}

/// Collect the text of every invalid node hung on a token.
fn invalid_texts(node: &SyntaxNode, out: &mut Vec<String>) {
    for token in node.tokens() {
        for minutiae in token.leading.iter().chain(token.trailing.iter()) {
            if let Minutiae::InvalidNode(inner) = minutiae {
                out.push(inner.render().trim().to_string());
            }
        }
    }
}

// ============================================================================
// Deleted tokens
// ============================================================================

#[test]
fn test_missing_semicolon_between_statements() {
    let good = function("    int a = 1;\n    int b = 2;");
    let bad = function("    int a = 1\n    int b = 2;");
    assert_eq!(codes(&bad), vec![2]);
    assert_eq!(
        sexp(&bad).replacen("<missing SemicolonToken>", ";", 1),
        sexp(&good)
    );
    assert_eq!(parse(&bad).to_source_code(), bad);
}

#[test]
fn test_missing_close_paren() {
    let good = function("    foo(a, b);");
    let bad = function("    foo(a, b;");
    assert_eq!(codes(&bad), vec![5]);
    assert_eq!(
        sexp(&bad).replacen("<missing CloseParenToken>", ")", 1),
        sexp(&good)
    );
}

#[test]
fn test_missing_close_brace_at_end_of_input() {
    let source = "function f() {\n    return 1;\n";
    let tree = parse(source);
    assert_eq!(tree.diagnostics().codes(), vec![7]);
    assert_eq!(tree.to_source_code(), source);
}

#[test]
fn test_missing_expression_is_inserted() {
    let tree = Parser::new("int x = ;").parse_as_statement();
    assert_eq!(tree.root().kind(), SyntaxKind::LocalVarDecl);
    assert_eq!(tree.diagnostics().len(), 1);
    assert!(tree.root().child(4).is_missing());
    assert!(!tree.root().child(5).is_missing());
}

// ============================================================================
// Injected tokens
// ============================================================================

#[test]
fn test_stray_close_paren_is_removed() {
    let good = function("    return a;");
    let bad = function("    return a );");
    assert_eq!(sexp(&bad), sexp(&good));
    assert_eq!(codes(&bad), vec![100]);

    let tree = parse(&bad);
    let mut invalid = Vec::new();
    invalid_texts(tree.root(), &mut invalid);
    assert_eq!(invalid, vec![")".to_string()]);
    assert_eq!(tree.to_source_code(), bad);
}

#[test]
fn test_stray_token_before_return_type_is_removed() {
    let good = "function f(int a) returns int {\n    return a;\n}\n";
    let bad = "function f(int a) ) returns int {\n    return a;\n}\n";
    assert_eq!(sexp(bad), sexp(good));
    assert_eq!(codes(bad), vec![100]);

    let tree = parse(bad);
    let signature = tree.root().child(1).child(0).child(4);
    assert_eq!(signature.child(3).kind(), SyntaxKind::ReturnTypeDescriptor);
    assert_eq!(tree.to_source_code(), bad);
}

#[test]
fn test_stray_token_before_initializer_is_removed() {
    let good = function("    int b = a + 1;");
    let bad = function("    int b = = a + 1;");
    assert_eq!(sexp(&bad), sexp(&good));
    assert_eq!(codes(&bad), vec![100]);

    let tree = parse(&bad);
    let mut invalid = Vec::new();
    invalid_texts(tree.root(), &mut invalid);
    assert_eq!(invalid, vec!["=".to_string()]);
}

#[test]
fn test_stray_token_before_optional_clauses() {
    let good = function("    int b = 1;\n    if x { } else { }");
    let bad = function("    int b ) = 1;\n    if x { } ] else { }");
    assert_eq!(sexp(&bad), sexp(&good));
    assert_eq!(codes(&bad), vec![100, 100]);
    assert_eq!(parse(&bad).to_source_code(), bad);
}

#[test]
fn test_garbage_between_members_is_kept() {
    let good = "function f() { }\nfunction g() { }\n";
    let bad = "function f() { }\n$$\nfunction g() { }\n";
    let tree = parse(bad);
    assert_eq!(tree.root().to_sexp(), sexp(good));
    assert!(tree.has_diagnostics());
    assert_eq!(tree.to_source_code(), bad);
}

#[test]
fn test_unexpected_keyword_in_expression() {
    let source = function("    int x = 1 + import;");
    let tree = parse(&source);
    assert!(tree.has_diagnostics());
    assert_eq!(tree.to_source_code(), source);
}

// ============================================================================
// Block boundaries
// ============================================================================

#[test]
fn test_close_brace_ends_unfinished_statement() {
    let source = "function f() { if x { int a = } }";
    let tree = parse(source);
    let function = tree.root().child(1).child(0);
    assert_eq!(function.kind(), SyntaxKind::FunctionDefinition);
    assert!(!function.child(5).child(2).is_missing());
    assert_eq!(tree.to_source_code(), source);
}

#[test]
fn test_statement_at_line_start_resyncs() {
    let source = function("    x = 1\n    foo();");
    let tree = parse(&source);
    let body = tree.root().child(1).child(0).child(5);
    let kinds: Vec<SyntaxKind> = body.child(1).children().iter().map(SyntaxNode::kind).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::AssignmentStatement, SyntaxKind::CallStatement]
    );
    assert_eq!(tree.to_source_code(), source);
}

#[test]
fn test_recovery_steps_are_counted() {
    let mut parser = Parser::new("function f( { return }");
    let tree = parser.parse_compilation_unit();
    assert!(parser.recovery_steps() > 0);
    assert!(tree.has_diagnostics());
    assert_eq!(tree.to_source_code(), "function f( { return }");

    let mut parser = Parser::new("function f() { }");
    parser.parse_compilation_unit();
    assert_eq!(parser.recovery_steps(), 0);
}
