//! Character constants and classification helpers used by the lexer.

use unicode_xid::UnicodeXID;

pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const SPACE: char = ' ';
pub const TAB: char = '\t';
pub const FORM_FEED: char = '\u{000C}';
pub const DOUBLE_QUOTE: char = '"';
pub const SINGLE_QUOTE: char = '\'';
pub const BACKSLASH: char = '\\';
pub const BACKTICK: char = '`';
pub const HASH: char = '#';
pub const DOLLAR_SIGN: char = '$';
pub const UNDERSCORE: char = '_';
pub const SLASH: char = '/';
pub const DOT: char = '.';
pub const OPEN_BRACE: char = '{';
pub const CLOSE_BRACE: char = '}';

#[inline]
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, SPACE | TAB | FORM_FEED)
}

#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, LINE_FEED | CARRIAGE_RETURN)
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

/// Start of an unquoted identifier.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == UNDERSCORE || (ch.is_ascii() && ch.is_ascii_alphabetic()) || (!ch.is_ascii() && ch.is_xid_start())
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == UNDERSCORE || (ch.is_ascii() && ch.is_ascii_alphanumeric()) || (!ch.is_ascii() && ch.is_xid_continue())
}
