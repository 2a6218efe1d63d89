use std::fs;

use chrono::NaiveDate;
use tempfile::TempDir;
use txtpost::{
    ingest::{self, render::parse_front_matter},
    Config,
};

fn setup() -> (TempDir, Config) {
    let tmp = TempDir::new().unwrap();
    let config = Config::new(tmp.path());
    fs::create_dir_all(&config.inbox_dir).unwrap();
    (tmp, config)
}

#[test]
fn header_title_and_filename_hints() {
    let (_tmp, config) = setup();
    let draft = config.inbox_dir.join("2024-05-01__travel__my-trip.txt");
    fs::write(&draft, "Title: 東京之旅\nHello world").unwrap();

    let report = ingest::run(&config, false).unwrap();
    assert!(report.is_success());
    assert_eq!(report.converted.len(), 1);

    let dest = config
        .posts_dir
        .join("travel")
        .join("2024")
        .join("05")
        .join("2024-05-01-東京之旅.md");
    assert_eq!(report.converted[0].destination, dest);

    let content = fs::read_to_string(&dest).unwrap();
    assert_eq!(
        content,
        "---\ntitle: \"東京之旅\"\ndate: 2024-05-01\ncategory: \"travel\"\ndraft: false\n---\n\nHello world\n"
    );

    assert!(!draft.exists());
    assert!(config
        .processed_dir
        .join("2024-05-01__travel__my-trip.txt")
        .exists());
}

#[test]
fn rendered_front_matter_matches_merged_metadata() {
    let (_tmp, config) = setup();
    let sub = config.inbox_dir.join("nested");
    fs::create_dir_all(&sub).unwrap();
    fs::write(
        sub.join("20231224 xmas.txt"),
        "Category: 生活\nTags: family, \"quoted\" , food\n\nDinner was great.",
    )
    .unwrap();

    let report = ingest::run(&config, false).unwrap();
    let converted = &report.converted[0];
    let parsed = parse_front_matter(&fs::read_to_string(&converted.destination).unwrap()).unwrap();

    assert_eq!(parsed, converted.metadata);
    assert_eq!(parsed.title, "xmas");
    assert_eq!(parsed.category, "生活");
    assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2023, 12, 24).unwrap());
    assert_eq!(parsed.tags, vec!["family", "\"quoted\"", "food"]);
    assert!(config.processed_dir.join("nested").join("20231224 xmas.txt").exists());
}

#[test]
fn leading_heading_becomes_title() {
    let (_tmp, config) = setup();
    fs::write(config.inbox_dir.join("scratch.txt"), "# My Post\nBody line\n").unwrap();

    let report = ingest::run(&config, false).unwrap();
    let converted = &report.converted[0];
    assert_eq!(converted.metadata.title, "My Post");
    let content = fs::read_to_string(&converted.destination).unwrap();
    assert!(content.ends_with("---\n\nBody line\n"));
    assert!(!content.contains("# My Post"));
    assert!(converted
        .destination
        .to_string_lossy()
        .ends_with("-my-post.md"));
}

#[test]
fn undated_draft_uses_today_in_utc_plus_8() {
    let (_tmp, config) = setup();
    fs::write(config.inbox_dir.join("undated.txt"), "no date anywhere").unwrap();

    let before = config.today();
    let report = ingest::run(&config, false).unwrap();
    let after = config.today();

    let date = report.converted[0].metadata.date;
    assert!(date == before || date == after);
    assert_eq!(report.converted[0].metadata.category, "uncategorized");
}

#[test]
fn same_destination_keeps_both_posts() {
    let (_tmp, config) = setup();
    fs::write(config.inbox_dir.join("2024-01-01-a.txt"), "Title: Same\nCategory: x\none").unwrap();
    fs::write(config.inbox_dir.join("2024-01-01-b.txt"), "Title: Same\nCategory: x\ntwo").unwrap();

    let report = ingest::run(&config, false).unwrap();
    assert_eq!(report.converted.len(), 2);
    let dir = config.posts_dir.join("x").join("2024").join("01");
    let first = fs::read_to_string(dir.join("2024-01-01-same.md")).unwrap();
    let second = fs::read_to_string(dir.join("2024-01-01-same-2.md")).unwrap();
    assert!(first.ends_with("one\n"));
    assert!(second.ends_with("two\n"));
}

#[test]
fn empty_inbox_converts_nothing() {
    let (_tmp, config) = setup();
    let report = ingest::run(&config, false).unwrap();
    assert!(report.converted.is_empty());
    assert!(report.is_success());
    assert!(config.processed_dir.is_dir());
    assert!(config.posts_dir.is_dir());
}
