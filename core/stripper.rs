pub mod c_family;
pub mod common;

pub use c_family::{strip_block_comments, strip_line_comments};
pub use common::{
    collapse_blank_lines, finalize, normalize_line_endings, strip_trailing_whitespace,
};

/// Strips comments and excess blank lines from C/C++ source text.
///
/// The passes run in a fixed order and each one sees the previous one's
/// output: block comments, line comments, trailing whitespace, blank-line
/// runs, then whole-text trim plus a single trailing newline. Never fails;
/// any string in gives a string out.
pub fn transform(text: &str) -> String {
    let text = strip_block_comments(text);
    let text = strip_line_comments(&text);
    let text = strip_trailing_whitespace(&text);
    let text = collapse_blank_lines(&text);
    finalize(&text)
}
