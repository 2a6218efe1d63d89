use once_cell::sync::Lazy;
use regex::Regex;

const FALLBACK_SLUG: &str = "post";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\-\x{4e00}-\x{9fff}]+").unwrap());
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

/// Filesystem and URL safe form of a title. Never empty.
pub fn slugify(title: &str) -> String {
    let s = title.trim().to_lowercase();
    let s = WHITESPACE.replace_all(&s, "-");
    let s = DISALLOWED.replace_all(&s, "");
    let s = HYPHENS.replace_all(&s, "-");
    let s = s.trim_matches('-');
    if s.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        s.to_string()
    }
}
