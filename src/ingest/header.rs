use log::debug;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::metadata::PartialMetadata;

/// Headers are only read from this many leading lines, but stripped everywhere.
pub const HEADER_SCAN_LINES: usize = 8;

static HEADER_LINE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"^\s*(title|標題|category|分類|tags|標籤)\s*:\s*(.*)$")
        .case_insensitive(true)
        .build()
        .unwrap()
});

static H1_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\s+(.+?)\s*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderKey {
    Title,
    Category,
    Tags,
}

impl HeaderKey {
    fn from_label(label: &str) -> Option<HeaderKey> {
        match label.to_lowercase().as_str() {
            "title" | "標題" => Some(HeaderKey::Title),
            "category" | "分類" => Some(HeaderKey::Category),
            "tags" | "標籤" => Some(HeaderKey::Tags),
            _ => None,
        }
    }
}

fn header_line(line: &str) -> Option<(HeaderKey, &str)> {
    let caps = HEADER_LINE.captures(line)?;
    let key = HeaderKey::from_label(caps.get(1)?.as_str())?;
    Some((key, caps.get(2).map_or("", |m| m.as_str().trim())))
}

pub fn split_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extracts `Title:`/`Category:`/`Tags:` headers (and their Chinese aliases) from
/// the leading lines, and returns the body with every header line removed.
///
/// Without a title header, a leading `# heading` line becomes the title.
pub fn parse_header<'a>(lines: &[&'a str]) -> (PartialMetadata, Vec<&'a str>) {
    let mut meta = PartialMetadata::default();

    for line in lines.iter().take(HEADER_SCAN_LINES) {
        let Some((key, value)) = header_line(line) else {
            continue;
        };
        // `Title:` with nothing after it counts as no header at all
        if value.is_empty() {
            continue;
        }
        debug!("header {key:?}: {value}");
        match key {
            HeaderKey::Title => meta.title = Some(value.to_string()),
            HeaderKey::Category => meta.category = Some(value.to_string()),
            HeaderKey::Tags => meta.tags = Some(split_tags(value)),
        }
    }

    let mut remaining: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| header_line(line).is_none())
        .collect();

    if meta.title.is_none() {
        let heading = remaining
            .first()
            .and_then(|first| H1_LINE.captures(first))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string());
        if let Some(title) = heading {
            debug!("promoting heading to title: {title}");
            meta.title = Some(title);
            remaining.remove(0);
        }
    }

    (meta, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(s: &str) -> Vec<&str> {
        s.lines().collect()
    }

    #[test]
    fn extracts_headers_and_strips_them() {
        let input = lines("Title: Hello\nCategory: tech\nTags: rust, cli , ,blog\n\nBody text");
        let (meta, body) = parse_header(&input);
        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.category.as_deref(), Some("tech"));
        assert_eq!(
            meta.tags,
            Some(vec!["rust".to_string(), "cli".to_string(), "blog".to_string()])
        );
        assert_eq!(body, vec!["", "Body text"]);
    }

    #[test]
    fn accepts_chinese_aliases_case_insensitively() {
        let input = lines("標題: 東京之旅\n分類：ignored\nCATEGORY: travel\n標籤: 日本,旅行\nHello");
        let (meta, body) = parse_header(&input);
        assert_eq!(meta.title.as_deref(), Some("東京之旅"));
        assert_eq!(meta.category.as_deref(), Some("travel"));
        assert_eq!(
            meta.tags,
            Some(vec!["日本".to_string(), "旅行".to_string()])
        );
        // full-width colon is not a header separator
        assert_eq!(body, vec!["分類：ignored", "Hello"]);
    }

    #[test]
    fn headers_after_scan_window_are_stripped_but_ignored() {
        let mut input = vec!["line"; HEADER_SCAN_LINES];
        input.push("Title: Too late");
        input.push("tail");
        let (meta, body) = parse_header(&input);
        assert!(meta.title.is_none());
        assert_eq!(body.len(), HEADER_SCAN_LINES + 1);
        assert!(!body.contains(&"Title: Too late"));
    }

    #[test]
    fn promotes_leading_heading_to_title() {
        let input = lines("# My Post\nFirst paragraph");
        let (meta, body) = parse_header(&input);
        assert_eq!(meta.title.as_deref(), Some("My Post"));
        assert_eq!(body, vec!["First paragraph"]);
    }

    #[test]
    fn heading_is_kept_when_title_header_exists() {
        let input = lines("Title: Real\n# Heading\ntext");
        let (meta, body) = parse_header(&input);
        assert_eq!(meta.title.as_deref(), Some("Real"));
        assert_eq!(body, vec!["# Heading", "text"]);
    }

    #[test]
    fn heading_must_be_first_remaining_line() {
        let input = lines("\n# Heading");
        let (meta, body) = parse_header(&input);
        assert!(meta.title.is_none());
        assert_eq!(body, vec!["", "# Heading"]);
    }

    #[test]
    fn empty_title_header_still_allows_heading() {
        let input = lines("Title:\n# From heading\nbody");
        let (meta, body) = parse_header(&input);
        assert_eq!(meta.title.as_deref(), Some("From heading"));
        assert_eq!(body, vec!["body"]);
    }

    #[test]
    fn no_headers_leaves_body_untouched() {
        let input = lines("just text\nmore text");
        let (meta, body) = parse_header(&input);
        assert_eq!(meta, PartialMetadata::default());
        assert_eq!(body, input);
    }
}
