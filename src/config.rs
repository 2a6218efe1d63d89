use std::path::{Path, PathBuf};

use anyhow::anyhow;
use chrono::{FixedOffset, NaiveDate, Offset, Utc};

pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;
pub const DEFAULT_COMMIT_MESSAGE: &str = "chore: add txt to inbox";

/// Directory layout and settings shared by the ingestor and the uploader.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    /// Pending drafts. Subdirectories are allowed.
    pub inbox_dir: PathBuf,
    /// Archive of converted drafts, mirroring `inbox_dir`.
    pub processed_dir: PathBuf,
    /// Output tree: `posts_dir/<category>/<YYYY>/<MM>/<date>-<slug>.md`
    pub posts_dir: PathBuf,

    /// Timezone used when a draft carries no date.
    pub utc_offset: FixedOffset,

    pub commit_message: String,
    /// `None` pushes to the branch's configured upstream.
    pub remote: Option<String>,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            inbox_dir: root.join("inbox"),
            processed_dir: root.join("processed"),
            posts_dir: root.join("src").join("content").join("posts"),
            root,
            utc_offset: offset_from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or_else(|_| Utc.fix()),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            remote: None,
        }
    }

    /// Relative paths are taken against `root`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn with_inbox_dir(mut self, dir: &Path) -> Self {
        self.inbox_dir = self.resolve(dir);
        self
    }

    pub fn with_processed_dir(mut self, dir: &Path) -> Self {
        self.processed_dir = self.resolve(dir);
        self
    }

    pub fn with_posts_dir(mut self, dir: &Path) -> Self {
        self.posts_dir = self.resolve(dir);
        self
    }

    pub fn with_utc_offset_hours(mut self, hours: i32) -> anyhow::Result<Self> {
        self.utc_offset = offset_from_hours(hours)?;
        Ok(self)
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }
}

fn offset_from_hours(hours: i32) -> anyhow::Result<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| anyhow!("UTC offset out of range: {hours} hours"))
}
