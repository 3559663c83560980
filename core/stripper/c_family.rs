use once_cell::sync::Lazy;
use regex::Regex;

// `\z` lets an unterminated `/*` run to the end of the text.
static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?(?:\*/|\z)").expect("valid regex"));
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//.*").expect("valid regex"));

/// Removes every `/* ... */` span, shortest match first, newlines included.
///
/// Matching is lexical: markers inside string or character literals are
/// treated like any other. Removing a comment can splice a `/` and a `*`
/// together, so passes repeat until no opening marker is left.
///
/// Each pass rescans the whole text and removes one level of splicing, so k
/// nested splices (k slashes, `/*x*/`, then k copies of `*x*/`) cost
/// O(k * n). Ordinary source needs a single pass.
pub fn strip_block_comments(input: &str) -> String {
    let mut current = BLOCK_COMMENT.replace_all(input, "").into_owned();
    while BLOCK_COMMENT.is_match(&current) {
        current = BLOCK_COMMENT.replace_all(&current, "").into_owned();
    }
    current
}

/// Removes `//` through the end of its line. The newline stays.
pub fn strip_line_comments(input: &str) -> String {
    LINE_COMMENT.replace_all(input, "").into_owned()
}
