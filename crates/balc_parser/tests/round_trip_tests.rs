//! Round-trip tests: rendering a tree gives back the source, byte for byte.

use balc_parser::{parse, Parser};

fn assert_round_trip(source: &str) {
    let tree = parse(source);
    assert_eq!(tree.to_source_code(), source);
}

#[test]
fn test_comments_and_blank_lines() {
    assert_round_trip("// leading comment\n\n\nfunction f() {\n    // inside\n    int a = 1; // trailing\n}\n\n// end\n");
}

#[test]
fn test_crlf_line_endings() {
    assert_round_trip("function f() {\r\n    return 1;\r\n}\r\n");
}

#[test]
fn test_tabs_and_unicode_identifiers() {
    assert_round_trip("function f() {\n\tstring naïve = \"héllo wörld\";\n\tint 'type = 2;\n}\n");
}

#[test]
fn test_templates_and_literals() {
    assert_round_trip(
        "function f() {\n    string s = string `a ${b} c`;\n    xml x = xml `<a>${v}</a>`;\n    float d = 1.5e10;\n    int h = 0xFF;\n    () n = ();\n}\n",
    );
}

#[test]
fn test_documentation_and_annotations() {
    assert_round_trip(
        "# Does things.\n# ```\n# f();\n# ```\n# + a - the `int` input\n# + return - nothing\n# # Deprecated\n@deprecated\n@display { label: \"F\" }\npublic isolated function f(int a) { }\n",
    );
}

#[test]
fn test_records_objects_and_classes() {
    assert_round_trip(
        r#"type Person record {|
    readonly string name;
    int age?;
    string...;
|};

type Shape object {
    function area() returns float;
};

public isolated client class Client {
    private final string url;

    function init(string url) {
        self.url = url;
    }

    remote function get(string path) returns json|error {
        return check self.http->get(path);
    }
}
"#,
    );
}

#[test]
fn test_workers_and_transactions() {
    assert_round_trip(
        r#"function f() {
    worker w1 returns int {
        10 -> w2;
        return 1;
    }
    worker w2 {
        int v = <- w1;
    }
    transaction {
        check commit;
    } on fail error e {
        panic e;
    }
    lock {
        counter += 1;
    }
}
"#,
    );
}

#[test]
fn test_broken_input_keeps_every_character() {
    for source in [
        "function f( {",
        "}}}}",
        "import ;;",
        "type T record { int x",
        "function f() { x = [1, 2; }",
        "int x = 1 +",
        "public public public",
        "# unterminated `doc\nfunction f() {}",
        "string s = \"unterminated",
        "@",
    ] {
        assert_round_trip(source);
    }
}

#[test]
fn test_sub_grammar_round_trip() {
    let source = "  [a, {b}, ...c]  /* not a comment */ ";
    let tree = Parser::new(source).parse_as_binding_pattern();
    assert_eq!(tree.to_source_code(), source);

    let source = "record {| int x; |} & readonly trailing";
    let tree = Parser::new(source).parse_as_type_descriptor();
    assert_eq!(tree.to_source_code(), source);
}
