use std::{
    fs::OpenOptions,
    io::Write,
    path::{Component, Path, PathBuf},
};

use anyhow::Context;
use log::{info, warn};

use crate::metadata::{PostMetadata, DEFAULT_CATEGORY};

use super::slug::slugify;

/// Relative directory for a category. Roots, drive prefixes, `.` and `..`
/// are dropped so the result always stays below the posts tree.
pub fn category_dir(category: &str) -> PathBuf {
    let dir: PathBuf = Path::new(category)
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    if dir.as_os_str().is_empty() {
        warn!("category {category:?} has no usable path segment, using {DEFAULT_CATEGORY:?}");
        PathBuf::from(DEFAULT_CATEGORY)
    } else {
        dir
    }
}

/// `posts_dir/<category>/<YYYY>/<MM>`
pub fn destination_dir(posts_dir: &Path, meta: &PostMetadata) -> PathBuf {
    posts_dir
        .join(category_dir(&meta.category))
        .join(meta.date.format("%Y").to_string())
        .join(meta.date.format("%m").to_string())
}

/// `<YYYY-MM-DD>-<slug>.md`
pub fn post_file_name(meta: &PostMetadata) -> String {
    format!("{}-{}.md", meta.date.format("%Y-%m-%d"), slugify(&meta.title))
}

/// Returns `path` if nothing is there yet, otherwise the first free
/// `<stem>-N.<ext>` beside it, starting at 2.
pub fn available_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().to_string());
    let mut n = 2u32;
    loop {
        let name = match &ext {
            Some(ext) => format!("{stem}-{n}.{ext}"),
            None => format!("{stem}-{n}"),
        };
        let candidate = path.with_file_name(name);
        if !candidate.exists() {
            warn!("{path:?} already exists, using {candidate:?}");
            return candidate;
        }
        n += 1;
    }
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("while creating directory {parent:?}"))?;
    }
    Ok(())
}

/// Where a post would land, taking existing files into account.
pub fn resolve_destination(posts_dir: &Path, meta: &PostMetadata) -> PathBuf {
    available_path(&destination_dir(posts_dir, meta).join(post_file_name(meta)))
}

/// Writes `content` as a new file. An existing post is never overwritten.
pub fn write_post(dest: &Path, content: &str) -> anyhow::Result<()> {
    ensure_parent(dest)?;
    let mut fd = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .with_context(|| format!("while creating {dest:?}"))?;
    fd.write_all(content.as_bytes())
        .with_context(|| format!("while writing {dest:?}"))?;
    Ok(())
}

/// Where a draft would be archived: its path relative to `inbox_dir`, under `processed_dir`.
pub fn archive_path(inbox_dir: &Path, processed_dir: &Path, draft: &Path) -> anyhow::Result<PathBuf> {
    let rel = draft
        .strip_prefix(inbox_dir)
        .with_context(|| format!("{draft:?} is not inside the inbox {inbox_dir:?}"))?;
    Ok(available_path(&processed_dir.join(rel)))
}

/// Moves the draft into the archive and returns its new location.
pub fn archive_draft(inbox_dir: &Path, processed_dir: &Path, draft: &Path) -> anyhow::Result<PathBuf> {
    let dest = archive_path(inbox_dir, processed_dir, draft)?;
    ensure_parent(&dest)?;
    fs_extra::file::move_file(draft, &dest, &fs_extra::file::CopyOptions::new())
        .with_context(|| format!("while moving {draft:?} to {dest:?}"))?;
    info!("archived {draft:?} -> {dest:?}");
    Ok(dest)
}
