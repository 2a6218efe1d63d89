use std::{
    fs::OpenOptions,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::info;
use serde::Serialize;

use crate::metadata::PostMetadata;

#[derive(Serialize, Debug, Clone)]
pub struct Converted {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub archived: PathBuf,
    pub metadata: PostMetadata,
}

#[derive(Serialize, Debug, Clone)]
pub struct Failed {
    pub source: PathBuf,
    pub error: String,
}

/// Outcome of one ingestion batch. A failed draft stays in the inbox.
#[derive(Serialize, Debug, Default)]
pub struct BatchReport {
    pub dry_run: bool,
    pub converted: Vec<Converted>,
    pub failed: Vec<Failed>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub fn save_report(report_path: &Path, report: &BatchReport) -> anyhow::Result<()> {
    if let Some(parent) = report_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let fd = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(report_path)
        .with_context(|| format!("while opening report {report_path:?}"))?;
    let writer = BufWriter::new(fd);
    serde_json::to_writer_pretty(writer, report)?;
    info!("report written to {report_path:?}");

    Ok(())
}
