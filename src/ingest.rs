use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    config::Config,
    metadata::PostMetadata,
    report::{BatchReport, Converted, Failed},
};

pub mod filename;
pub mod header;
pub mod place;
pub mod render;
pub mod slug;

const DRAFT_EXTENSION: &str = "txt";

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c-\x1e\x{85}\x{2028}\x{2029}]").unwrap());

/// Splits on every line boundary, lone `\r` included. A trailing break does
/// not produce an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = LINE_BREAK.split(text).collect();
    if lines.last().map_or(false, |l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// A draft with everything resolved, ready to be written.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub source: PathBuf,
    pub metadata: PostMetadata,
    pub destination: PathBuf,
    pub archived: PathBuf,
    pub content: String,
}

impl From<Conversion> for Converted {
    fn from(c: Conversion) -> Self {
        Converted {
            source: c.source,
            destination: c.destination,
            archived: c.archived,
            metadata: c.metadata,
        }
    }
}

fn is_draft(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == DRAFT_EXTENSION)
}

/// Every `*.txt` file below `inbox_dir`, in sorted path order.
pub fn find_drafts(inbox_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut drafts = vec![];

    let mut q = VecDeque::new();
    q.push_back(inbox_dir.to_path_buf());
    while let Some(dir) = q.pop_front() {
        for entry in std::fs::read_dir(&dir).with_context(|| format!("while reading {dir:?}"))? {
            let entry = entry?;
            let meta = entry.metadata()?;
            let path = entry.path();

            if meta.is_dir() {
                q.push_back(path);
            } else if meta.is_file() && is_draft(&path) {
                drafts.push(path);
            }
        }
    }

    drafts.sort();
    Ok(drafts)
}

/// Reads a draft and works out its metadata, rendered post and target paths.
/// Nothing is written.
pub fn prepare(config: &Config, draft: &Path) -> anyhow::Result<Conversion> {
    let bytes = std::fs::read(draft).with_context(|| format!("while reading {draft:?}"))?;
    let raw = String::from_utf8_lossy(&bytes);
    let lines = split_lines(&raw);

    let name = draft
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = draft
        .file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let (from_header, body) = header::parse_header(&lines);
    let from_filename = filename::parse_filename(&name);
    let metadata = PostMetadata::resolve(from_header, from_filename, &stem, config.today());
    debug!("{draft:?}: {metadata:?}");

    let destination = place::resolve_destination(&config.posts_dir, &metadata);
    let archived = place::archive_path(&config.inbox_dir, &config.processed_dir, draft)?;
    let content = render::render_post(&metadata, &body);

    Ok(Conversion {
        source: draft.to_path_buf(),
        metadata,
        destination,
        archived,
        content,
    })
}

/// Converts one draft: writes the post, then moves the draft into the archive.
pub fn convert_file(config: &Config, draft: &Path) -> anyhow::Result<Conversion> {
    let mut conversion = prepare(config, draft)?;
    place::write_post(&conversion.destination, &conversion.content)?;
    conversion.archived = place::archive_draft(&config.inbox_dir, &config.processed_dir, draft)?;
    info!("converted {:?} -> {:?}", conversion.source, conversion.destination);
    Ok(conversion)
}

pub fn ensure_dirs(config: &Config) -> anyhow::Result<()> {
    for dir in [&config.inbox_dir, &config.processed_dir, &config.posts_dir] {
        std::fs::create_dir_all(dir).with_context(|| format!("while creating {dir:?}"))?;
    }
    Ok(())
}

/// Converts every draft in the inbox. A draft that fails is recorded in the
/// report and does not stop the remaining ones.
pub fn run(config: &Config, dry_run: bool) -> anyhow::Result<BatchReport> {
    let mut report = BatchReport {
        dry_run,
        ..Default::default()
    };
    if !dry_run {
        ensure_dirs(config)?;
    } else if !config.inbox_dir.exists() {
        return Ok(report);
    }

    for draft in find_drafts(&config.inbox_dir)? {
        let result = if dry_run {
            prepare(config, &draft)
        } else {
            convert_file(config, &draft)
        };
        match result {
            Ok(conversion) => report.converted.push(conversion.into()),
            Err(e) => {
                warn!("failed to convert {draft:?}: {e:#}");
                report.failed.push(Failed {
                    source: draft,
                    error: format!("{e:#}"),
                });
            }
        }
    }

    Ok(report)
}
