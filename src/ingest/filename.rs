use chrono::NaiveDate;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::metadata::PartialMetadata;

static DATE_ANYWHERE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4})[-_/.]?([0-9]{2})[-_/.]?([0-9]{2})").unwrap());
static DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}[-_/.]?[0-9]{2}[-_/.]?[0-9]{2}").unwrap());
static CATEGORY_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"__([^_]+?)__").unwrap());
static CATEGORY_SEGMENT_ALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"__[^_]+__").unwrap());
static EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.[^.]+$").unwrap());

/// Only the first date-looking run is considered; an impossible date yields `None`.
fn date_hint(name: &str) -> Option<NaiveDate> {
    let caps = DATE_ANYWHERE.captures(name)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day);
    if date.is_none() {
        debug!("ignoring invalid date {year:04}-{month:02}-{day:02} in {name:?}");
    }
    date
}

fn category_hint(name: &str) -> Option<String> {
    if let Some(caps) = CATEGORY_SEGMENT.captures(name) {
        return Some(caps[1].to_string());
    }
    let parts: Vec<&str> = name.split(['-', '_']).collect();
    if parts.len() >= 3 {
        Some(parts[1].to_string())
    } else {
        None
    }
}

fn title_hint(name: &str) -> Option<String> {
    let base = EXTENSION.replace(name, "");
    let base = DATE_PREFIX.replace(&base, "");
    let base = CATEGORY_SEGMENT_ALL.replace_all(&base, "");
    let base = base.trim_matches(['-', '_', ' ']);
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

/// Derives date, category and title hints from a draft's file name
/// (e.g. `2024-05-01__travel__my-trip.txt`).
pub fn parse_filename(name: &str) -> PartialMetadata {
    let meta = PartialMetadata {
        title: title_hint(name),
        category: category_hint(name),
        tags: None,
        date: date_hint(name),
    };
    debug!("filename hints for {name:?}: {meta:?}");
    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_hint_filename() {
        let meta = parse_filename("2024-05-01__travel__my-trip.txt");
        assert_eq!(meta.date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(meta.category.as_deref(), Some("travel"));
        assert_eq!(meta.title.as_deref(), Some("my-trip"));
        assert!(meta.tags.is_none());
    }

    #[test]
    fn compact_and_dotted_dates() {
        assert_eq!(
            parse_filename("20230102 notes.txt").date,
            NaiveDate::from_ymd_opt(2023, 1, 2)
        );
        assert_eq!(
            parse_filename("diary 2023.12.31.txt").date,
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
    }

    #[test]
    fn invalid_calendar_date_is_ignored() {
        let meta = parse_filename("2023-02-30-rant.txt");
        assert!(meta.date.is_none());
        // the prefix is still stripped from the title
        assert_eq!(meta.title.as_deref(), Some("rant"));
    }

    #[test]
    fn category_falls_back_to_second_segment() {
        assert_eq!(
            parse_filename("blog_rust_intro.txt").category.as_deref(),
            Some("rust")
        );
        assert!(parse_filename("hello-world.txt").category.is_none());
    }

    #[test]
    fn title_trims_separators() {
        assert_eq!(
            parse_filename("__misc__ - quick note_.txt").title.as_deref(),
            Some("quick note")
        );
        assert!(parse_filename("2024-01-01.txt").title.is_none());
    }
}
