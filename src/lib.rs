//! Turns plain-text drafts dropped into `inbox/` into Markdown posts with
//! front matter under `src/content/posts/<category>/<YYYY>/<MM>/`, and copies
//! drafts into the inbox and pushes them.

pub mod cli;
pub mod config;
pub mod ingest;
pub mod metadata;
pub mod report;
pub mod upload;

pub use config::Config;
pub use metadata::{PartialMetadata, PostMetadata};
pub use report::BatchReport;
