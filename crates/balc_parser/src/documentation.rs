//! Documentation strings.
//!
//! The lexer hands a run of `#` comment lines in front of a declaration
//! over as one `DocumentationString` token. This module splits it into
//! markdown lines: parameter lines (`# + x - text`), a deprecation marker,
//! fenced code blocks and description lines with backtick references.
//! Every character of the token ends up in some token or minutiae of the
//! result, so it renders back to the original text.

use balc_diagnostics::{messages, DiagnosticMessage};
use balc_syntax::factory::{missing_token, missing_token_with};
use balc_syntax::{Minutiae, SyntaxKind, SyntaxNode, Token};

/// Words that turn the backtick reference after them into a typed one.
const REFERENCE_KEYWORDS: &[&str] = &[
    "type",
    "service",
    "variable",
    "var",
    "annotation",
    "module",
    "function",
    "parameter",
    "const",
];

const FENCE: &str = "```";

/// One physical line of the documentation token.
#[derive(Debug, Clone, Copy)]
struct DocLine<'a> {
    indent: &'a str,
    /// From the `#` to the end of the line.
    body: &'a str,
    newline: &'a str,
}

fn split_lines(text: &str) -> Vec<DocLine<'_>> {
    text.split_inclusive('\n')
        .map(|piece| {
            let content = piece
                .strip_suffix("\r\n")
                .or_else(|| piece.strip_suffix('\n'))
                .unwrap_or(piece);
            let newline = &piece[content.len()..];
            let body = content.trim_start_matches([' ', '\t']);
            let indent = &content[..content.len() - body.len()];
            DocLine { indent, body, newline }
        })
        .collect()
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, f: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !f(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn spaces(&mut self) -> &'a str {
        self.take_while(|c| c == ' ' || c == '\t')
    }
}

fn with_space(mut token: Token, space: &str) -> Token {
    if !space.is_empty() {
        token.trailing.push(Minutiae::Whitespace(space.to_string()));
    }
    token
}

/// Give a finished line its indentation and line break.
fn finish_line(items: &mut [SyntaxNode], line: &DocLine<'_>) {
    if !line.indent.is_empty() {
        if let Some(first) = items.iter_mut().find_map(SyntaxNode::first_token_mut) {
            first.leading.push(Minutiae::Whitespace(line.indent.to_string()));
        }
    }
    if !line.newline.is_empty() {
        if let Some(last) = items.iter_mut().rev().find_map(SyntaxNode::last_token_mut) {
            last.trailing.push(Minutiae::EndOfLine(line.newline.to_string()));
        }
    }
}

/// The leading `#` and the blanks after it.
fn parse_hash(cursor: &mut Cursor<'_>) -> SyntaxNode {
    if !cursor.eat("#") {
        return missing_token(SyntaxKind::HashToken).into();
    }
    let space = cursor.spaces();
    with_space(Token::new(SyntaxKind::HashToken, "#"), space).into()
}

/// Parse the documentation token into a `MarkdownDocumentation` node.
pub(crate) fn parse_documentation(token: Token) -> SyntaxNode {
    let Token {
        text,
        leading,
        trailing,
        diagnostics,
        ..
    } = token;
    let lines = split_lines(&text);
    let mut nodes = Vec::with_capacity(lines.len());
    let mut index = 0;
    while index < lines.len() {
        let mut cursor = Cursor::new(lines[index].body);
        let _ = parse_hash(&mut cursor);
        if cursor.rest().starts_with(FENCE) {
            let (block, next) = parse_code_block(&lines, index);
            nodes.push(block);
            index = next;
        } else {
            nodes.push(parse_line(&lines[index]));
            index += 1;
        }
    }

    if let Some(first) = nodes.iter_mut().find_map(SyntaxNode::first_token_mut) {
        let mut all = leading;
        all.append(&mut first.leading);
        first.leading = all;
        first.diagnostics.extend(diagnostics);
    }
    if let Some(last) = nodes.iter_mut().rev().find_map(SyntaxNode::last_token_mut) {
        last.trailing.extend(trailing);
    }
    SyntaxNode::node(SyntaxKind::MarkdownDocumentation, vec![SyntaxNode::list(nodes)])
}

fn parse_line(line: &DocLine<'_>) -> SyntaxNode {
    let mut cursor = Cursor::new(line.body);
    let hash = parse_hash(&mut cursor);
    let rest = cursor.rest();
    let (kind, mut items) = if rest.starts_with('+') {
        parse_parameter_line(&mut cursor)
    } else if is_deprecation(rest) {
        let literal = rest.trim_end();
        let space = &rest[literal.len()..];
        let token = with_space(Token::new(SyntaxKind::DeprecationLiteral, literal), space);
        (SyntaxKind::MarkdownDeprecationDocumentationLine, vec![token.into()])
    } else {
        let (description, has_references) = parse_description(rest);
        let kind = if has_references {
            SyntaxKind::MarkdownReferenceDocumentationLine
        } else {
            SyntaxKind::MarkdownDocumentationLine
        };
        (kind, vec![SyntaxNode::list(description)])
    };
    items.insert(0, hash);
    finish_line(&mut items, line);
    SyntaxNode::node(kind, items)
}

/// `# Deprecated`, alone on its line.
fn is_deprecation(rest: &str) -> bool {
    rest.strip_prefix('#')
        .map(|after| after.trim() == "Deprecated")
        .unwrap_or(false)
}

/// `+ name - description`. A missing name or hyphen is inserted with a
/// warning.
fn parse_parameter_line(cursor: &mut Cursor<'_>) -> (SyntaxKind, Vec<SyntaxNode>) {
    cursor.eat("+");
    let space = cursor.spaces();
    let plus = with_space(Token::new(SyntaxKind::PlusToken, "+"), space);

    let name_text = cursor.take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '\\' | '\''));
    let name = if name_text.is_empty() {
        missing_token_with(SyntaxKind::ParameterName, messages::WARNING_MISSING_PARAMETER_NAME)
    } else {
        let space = cursor.spaces();
        with_space(Token::new(SyntaxKind::ParameterName, name_text), space)
    };
    let kind = if name_text == "return" {
        SyntaxKind::MarkdownReturnParameterDocumentationLine
    } else {
        SyntaxKind::MarkdownParameterDocumentationLine
    };

    let minus = if cursor.eat("-") {
        let space = cursor.spaces();
        with_space(Token::new(SyntaxKind::MinusToken, "-"), space)
    } else {
        missing_token_with(SyntaxKind::MinusToken, messages::WARNING_MISSING_HYPHEN_TOKEN)
    };
    let (description, _) = parse_description(cursor.rest());
    (
        kind,
        vec![plus.into(), name.into(), minus.into(), SyntaxNode::list(description)],
    )
}

fn missing_backtick_warning(kind: SyntaxKind) -> DiagnosticMessage {
    match kind {
        SyntaxKind::DoubleBacktickToken => messages::WARNING_MISSING_DOUBLE_BACKTICK_TOKEN,
        SyntaxKind::TripleBacktickToken => messages::WARNING_MISSING_TRIPLE_BACKTICK_TOKEN,
        _ => messages::WARNING_MISSING_SINGLE_BACKTICK_TOKEN,
    }
}

/// Split a description into plain text and backtick references. The
/// flag reports whether any reference was found.
fn parse_description(text: &str) -> (Vec<SyntaxNode>, bool) {
    let mut items = Vec::new();
    let mut start = 0;
    let mut has_references = false;
    while let Some(offset) = text[start..].find('`') {
        let tick = start + offset;
        let run = text[tick..].chars().take_while(|c| *c == '`').count();
        // A lone pair before a space that never closes is an empty single reference.
        let after = &text[tick + run..];
        let empty_pair = run == 2 && after.chars().next().map_or(true, char::is_whitespace) && !after.contains("``");
        let (open_kind, delimiter) = match run {
            _ if empty_pair => (SyntaxKind::BacktickToken, "`"),
            1 => (SyntaxKind::BacktickToken, "`"),
            2 => (SyntaxKind::DoubleBacktickToken, "``"),
            _ => (SyntaxKind::TripleBacktickToken, FENCE),
        };
        let content_start = tick + delimiter.len();
        let (content, close, end) = match text[content_start..].find(delimiter) {
            Some(len) => {
                let content = &text[content_start..content_start + len];
                let close = Token::new(open_kind, delimiter);
                (content, close, content_start + len + delimiter.len())
            }
            None => {
                let content = &text[content_start..];
                let close = missing_token_with(open_kind, missing_backtick_warning(open_kind));
                (content, close, text.len())
            }
        };
        let content = if content.is_empty() {
            missing_token_with(SyntaxKind::BacktickContent, messages::WARNING_MISSING_CODE_REFERENCE)
        } else {
            Token::new(SyntaxKind::BacktickContent, content)
        };
        let open = Token::new(open_kind, delimiter);

        let before = &text[start..tick];
        let keyword = if open_kind == SyntaxKind::BacktickToken {
            split_reference_keyword(before)
        } else {
            None
        };
        let reference = match keyword {
            Some((plain, word, gap)) => {
                push_description(&mut items, plain);
                let kind = SyntaxKind::keyword_from_text(word).unwrap_or(SyntaxKind::Identifier);
                let word = with_space(Token::new(kind, word), gap);
                SyntaxNode::node(
                    SyntaxKind::DocumentationReference,
                    vec![word.into(), open.into(), content.into(), close.into()],
                )
            }
            None => {
                push_description(&mut items, before);
                SyntaxNode::node(
                    SyntaxKind::InlineCodeReference,
                    vec![open.into(), content.into(), close.into()],
                )
            }
        };
        items.push(reference);
        has_references = true;
        start = end;
    }
    push_description(&mut items, &text[start..]);
    (items, has_references)
}

fn push_description(items: &mut Vec<SyntaxNode>, text: &str) {
    if !text.is_empty() {
        items.push(Token::new(SyntaxKind::DocumentationDescription, text).into());
    }
}

/// `"see function "` splits into `"see "`, `"function"` and `" "`.
fn split_reference_keyword(before: &str) -> Option<(&str, &str, &str)> {
    let trimmed = before.trim_end();
    let gap = &before[trimmed.len()..];
    if gap.is_empty() {
        return None;
    }
    let word_start = trimmed.rfind(char::is_whitespace).map_or(0, |i| i + 1);
    let word = &trimmed[word_start..];
    REFERENCE_KEYWORDS
        .contains(&word)
        .then(|| (&trimmed[..word_start], word, gap))
}

/// A fenced block from the opening fence line to the closing one, or to
/// the last line when the fence is never closed.
fn parse_code_block(lines: &[DocLine<'_>], start: usize) -> (SyntaxNode, usize) {
    let opening = &lines[start];
    let mut cursor = Cursor::new(opening.body);
    let hash = parse_hash(&mut cursor);
    cursor.eat(FENCE);
    let fence: SyntaxNode = Token::new(SyntaxKind::TripleBacktickToken, FENCE).into();
    let lang = match cursor.rest() {
        "" => SyntaxNode::Empty,
        rest => Token::new(SyntaxKind::CodeContent, rest).into(),
    };
    let mut open_items = vec![hash, fence, lang];
    finish_line(&mut open_items, opening);

    let mut code_lines = Vec::new();
    let mut close_items = None;
    let mut index = start + 1;
    while index < lines.len() {
        let line = &lines[index];
        index += 1;
        let mut cursor = Cursor::new(line.body);
        let hash = parse_hash(&mut cursor);
        let rest = cursor.rest();
        if rest.trim_end() == FENCE {
            let space = &rest[FENCE.len()..];
            let fence = with_space(Token::new(SyntaxKind::TripleBacktickToken, FENCE), space);
            let mut items = vec![hash, fence.into()];
            finish_line(&mut items, line);
            close_items = Some(items);
            break;
        }
        let content = if rest.is_empty() {
            SyntaxNode::Empty
        } else {
            Token::new(SyntaxKind::CodeContent, rest).into()
        };
        let mut items = vec![hash, content];
        finish_line(&mut items, line);
        code_lines.push(SyntaxNode::node(SyntaxKind::MarkdownCodeLine, items));
    }

    let close_items = close_items.unwrap_or_else(|| {
        let fence = missing_token_with(
            SyntaxKind::TripleBacktickToken,
            messages::WARNING_MISSING_TRIPLE_BACKTICK_TOKEN,
        );
        vec![SyntaxNode::Empty, fence.into()]
    });
    let mut children = open_items;
    children.push(SyntaxNode::list(code_lines));
    children.extend(close_items);
    (SyntaxNode::node(SyntaxKind::MarkdownCodeBlock, children), index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> SyntaxNode {
        parse_documentation(Token::new(SyntaxKind::DocumentationString, text))
    }

    fn lines(node: &SyntaxNode) -> &[SyntaxNode] {
        node.child(0).children()
    }

    #[test]
    fn test_renders_back_exactly() {
        let text = "# Adds two numbers.\n    # + a - first `int`\n    # + return - the sum\n    # # Deprecated";
        let node = doc(text);
        assert_eq!(node.render(), text);
        assert!(!node.has_diagnostics());
    }

    #[test]
    fn test_line_kinds() {
        let node = doc("# Text\n# + x - value\n# + return - result\n# # Deprecated");
        let kinds: Vec<SyntaxKind> = lines(&node).iter().map(SyntaxNode::kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::MarkdownDocumentationLine,
                SyntaxKind::MarkdownParameterDocumentationLine,
                SyntaxKind::MarkdownReturnParameterDocumentationLine,
                SyntaxKind::MarkdownDeprecationDocumentationLine,
            ]
        );
    }

    #[test]
    fn test_missing_parameter_name_and_hyphen() {
        let node = doc("# + - text\n# + y text");
        let codes: Vec<u32> = node.diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![300, 301]);
        assert_eq!(node.render(), "# + - text\n# + y text");
    }

    #[test]
    fn test_references() {
        let node = doc("# Calls function `foo` with ``a`b``.");
        let line = &lines(&node)[0];
        assert_eq!(line.kind(), SyntaxKind::MarkdownReferenceDocumentationLine);
        let items = line.child(1);
        assert_eq!(items.child(0).kind(), SyntaxKind::DocumentationDescription);
        assert_eq!(items.child(1).kind(), SyntaxKind::DocumentationReference);
        assert_eq!(items.child(1).child(0).kind(), SyntaxKind::FunctionKeyword);
        assert_eq!(items.child(3).kind(), SyntaxKind::InlineCodeReference);
        assert_eq!(node.render(), "# Calls function `foo` with ``a`b``.");
    }

    #[test]
    fn test_unclosed_and_empty_references() {
        let node = doc("# see `` and `open");
        let codes: Vec<u32> = node.diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![303, 302]);
        assert_eq!(node.render(), "# see `` and `open");

        let items = lines(&node)[0].child(1);
        let empty = items.child(1);
        assert_eq!(empty.kind(), SyntaxKind::InlineCodeReference);
        assert_eq!(empty.child(0).kind(), SyntaxKind::BacktickToken);
        assert!(empty.child(1).is_missing());
        assert!(!empty.child(2).is_missing());
    }

    #[test]
    fn test_unclosed_reference_warning_follows_backtick_count() {
        let double = doc("# see ``a`b`` and ``c``");
        assert!(double.diagnostics().is_empty());
        let items = lines(&double)[0].child(1);
        assert_eq!(items.child(1).render(), "``a`b``");
        assert_eq!(items.child(3).render(), "``c``");

        let double = doc("# see ``a`b");
        let codes: Vec<u32> = double.diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![304]);

        let triple = doc("# see ```a``` and ```b");
        let codes: Vec<u32> = triple.diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![305]);
        assert_eq!(triple.render(), "# see ```a``` and ```b");
    }

    #[test]
    fn test_code_block() {
        let text = "# Example:\n# ```ballerina\n# int x = 1;\n#\n# ```\n# done";
        let node = doc(text);
        let all = lines(&node);
        assert_eq!(all.len(), 3);
        let block = &all[1];
        assert_eq!(block.kind(), SyntaxKind::MarkdownCodeBlock);
        assert_eq!(block.child(2).kind(), SyntaxKind::CodeContent);
        assert_eq!(block.child(3).children().len(), 2);
        assert_eq!(block.child(5).kind(), SyntaxKind::TripleBacktickToken);
        assert_eq!(node.render(), text);
    }

    #[test]
    fn test_unclosed_code_block() {
        let node = doc("# ```\n# code");
        let block = &lines(&node)[0];
        assert!(block.child(5).is_missing());
        assert_eq!(node.diagnostics()[0].code(), 305);
    }

    #[test]
    fn test_token_minutiae_kept() {
        let token = Token::with_minutiae(
            SyntaxKind::DocumentationString,
            "# a",
            vec![Minutiae::Whitespace("  ".into())],
            vec![Minutiae::EndOfLine("\n".into())],
        );
        assert_eq!(parse_documentation(token).render(), "  # a\n");
    }
}
