use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)[ \t]+$").expect("valid regex"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").expect("valid regex"));
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").expect("valid regex"));

/// Turns `\r\n` and lone `\r` into `\n`, the way a text-mode read does.
pub fn normalize_line_endings(input: &str) -> String {
    LINE_BREAK.replace_all(input, "\n").into_owned()
}

/// Drops spaces and tabs at the end of every line.
pub fn strip_trailing_whitespace(input: &str) -> String {
    TRAILING_WHITESPACE.replace_all(input, "").into_owned()
}

/// Squeezes every run of blank lines (empty or whitespace-only) down to one
/// empty line. Indentation of the line after the run is kept.
pub fn collapse_blank_lines(input: &str) -> String {
    BLANK_RUN.replace_all(input, "\n\n").into_owned()
}

/// Trims the whole text and ends it with exactly one newline.
pub fn finalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 1);
    out.push_str(input.trim());
    out.push('\n');
    out
}
