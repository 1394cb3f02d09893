//! Regex patterns for scanning decoded PDF content.

use lazy_static::lazy_static;
use regex::Regex;

/// Whitespace class shared by the page marker and text normalization.
///
/// This is the ECMAScript `\s` set rather than Unicode `White_Space`: it
/// includes U+FEFF and excludes U+0085.
pub const WHITESPACE_CLASS: &str =
    r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

/// Character form of [`WHITESPACE_CLASS`].
pub fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

lazy_static! {
    // Text object: shortest span between BT and ET, across lines
    pub static ref TEXT_OBJECT: Regex = Regex::new(
        r"(?s)BT(.*?)ET"
    ).unwrap();

    // Literal string operand; does not cross a line terminator and does not
    // honor escaped parentheses when finding the closing boundary
    pub static ref LITERAL_STRING: Regex = Regex::new(
        r"\(([^\n\r\x{2028}\x{2029}]*?)\)"
    ).unwrap();

    // Page object marker; the trailing class rejects the /Pages tree node
    pub static ref PAGE_MARKER: Regex = Regex::new(
        &format!(r"/Type{}*/Page[^s]", WHITESPACE_CLASS)
    ).unwrap();
}
