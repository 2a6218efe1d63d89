use std::fmt::Write as _;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::RegexBuilder;

use crate::metadata::PostMetadata;

const FENCE: &str = "---";

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Renders the front-matter block (title, date, category, tags, draft) followed
/// by a blank line and the trimmed body.
pub fn render_post(meta: &PostMetadata, body: &[&str]) -> String {
    let mut out = String::new();
    out.push_str(FENCE);
    out.push('\n');
    let _ = writeln!(out, "title: {}", quote(&meta.title));
    let _ = writeln!(out, "date: {}", meta.date.format("%Y-%m-%d"));
    let _ = writeln!(out, "category: {}", quote(&meta.category));
    if !meta.tags.is_empty() {
        let tags: Vec<String> = meta.tags.iter().map(|t| quote(t)).collect();
        let _ = writeln!(out, "tags: [{}]", tags.join(", "));
    }
    out.push_str("draft: false\n");
    out.push_str(FENCE);
    out.push_str("\n\n");
    out.push_str(body.join("\n").trim());
    out.push('\n');
    out
}

/// Reads a double-quoted scalar starting at `s`, returning it and the unread rest.
fn take_quoted(s: &str) -> anyhow::Result<(String, &str)> {
    let Some(inner) = s.strip_prefix('"') else {
        bail!("expected a quoted value: {s}");
    };
    let mut value = String::new();
    let mut chars = inner.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => value.push(escaped),
                None => bail!("dangling escape in {s}"),
            },
            '"' => return Ok((value, &inner[i + 1..])),
            _ => value.push(c),
        }
    }
    bail!("unterminated quoted value: {s}")
}

fn unquote(s: &str) -> anyhow::Result<String> {
    let (value, rest) = take_quoted(s.trim())?;
    if !rest.trim().is_empty() {
        bail!("trailing characters after quoted value: {s}");
    }
    Ok(value)
}

fn parse_tag_list(s: &str) -> anyhow::Result<Vec<String>> {
    let s = s.trim();
    let Some(inner) = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
        bail!("tags must be a bracketed list: {s}");
    };
    let mut tags = vec![];
    let mut rest = inner.trim();
    while !rest.is_empty() {
        let (tag, after) = take_quoted(rest)?;
        tags.push(tag);
        rest = after.trim_start();
        rest = rest.strip_prefix(',').unwrap_or(rest).trim_start();
    }
    Ok(tags)
}

/// Parses the front matter written by [`render_post`] back into metadata.
pub fn parse_front_matter(content: &str) -> anyhow::Result<PostMetadata> {
    static BLOCK: Lazy<regex::Regex> = Lazy::new(|| {
        RegexBuilder::new(r"^---\r?\n(.*?)\r?\n---\r?\n")
            .dot_matches_new_line(true)
            .build()
            .unwrap()
    });

    let Some(caps) = BLOCK.captures(content) else {
        bail!("no front matter block");
    };

    let mut title = None;
    let mut date = None;
    let mut category = None;
    let mut tags = vec![];
    for line in caps[1].lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            bail!("Invalid header: {}", line);
        };
        match name.trim() {
            "title" => title = Some(unquote(value)?),
            "category" => category = Some(unquote(value)?),
            "tags" => tags = parse_tag_list(value)?,
            "date" => {
                date = Some(
                    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                        .context("Invalid date format")?,
                )
            }
            _ => {}
        }
    }

    Ok(PostMetadata {
        title: title.context("front matter has no title")?,
        category: category.context("front matter has no category")?,
        tags,
        date: date.context("front matter has no date")?,
    })
}
