use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::Context;
use log::{info, warn};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("`{command}` exited with status {code}")]
    Exit { command: String, code: i32 },
    #[error("could not run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl VcsError {
    /// Status the uploader should exit with.
    pub fn exit_code(&self) -> i32 {
        match self {
            VcsError::Exit { code, .. } => *code,
            VcsError::Spawn { .. } => 1,
        }
    }
}

pub trait VersionControl {
    fn run(&self, args: &[String]) -> Result<(), VcsError>;
}

/// Runs the `git` executable inside `workdir`.
#[derive(Debug, Clone)]
pub struct Git {
    pub workdir: PathBuf,
}

impl VersionControl for Git {
    fn run(&self, args: &[String]) -> Result<(), VcsError> {
        let command = format!("git {}", args.join(" "));
        println!("+ {command}");
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .status()
            .map_err(|source| VcsError::Spawn {
                command: command.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(VcsError::Exit {
                command,
                // killed by a signal
                code: status.code().unwrap_or(1),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Copied { source: PathBuf, destination: PathBuf },
    /// The source already is the inbox file; nothing is copied but it is still staged.
    InInbox(PathBuf),
    Skipped(PathBuf),
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn is_txt_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map_or(false, |ext| ext.to_string_lossy().eq_ignore_ascii_case("txt"))
}

/// Copies each `.txt` source into the inbox, replacing a file of the same name.
/// Missing and non-`.txt` paths are skipped.
pub fn copy_into_inbox(config: &Config, sources: &[PathBuf]) -> anyhow::Result<Vec<Placement>> {
    std::fs::create_dir_all(&config.inbox_dir)
        .with_context(|| format!("while creating {:?}", config.inbox_dir))?;

    let mut placements = vec![];
    for source in sources {
        let Some(name) = source.file_name().filter(|_| is_txt_file(source)) else {
            warn!("skipping {source:?}");
            placements.push(Placement::Skipped(source.clone()));
            continue;
        };
        let destination = config.inbox_dir.join(name);
        // copying a file onto itself would truncate it
        if same_file(source, &destination) {
            info!("{source:?} is already in the inbox");
            placements.push(Placement::InInbox(destination));
            continue;
        }
        let mut options = fs_extra::file::CopyOptions::new();
        options.overwrite = true;
        fs_extra::file::copy(source, &destination, &options)
            .with_context(|| format!("while copying {source:?} to {destination:?}"))?;
        info!("copied {source:?} -> {destination:?}");
        placements.push(Placement::Copied {
            source: source.clone(),
            destination,
        });
    }
    Ok(placements)
}

/// Stages the inbox, commits and pushes. Stops at the first failing command.
pub fn publish(config: &Config, vcs: &dyn VersionControl) -> Result<(), VcsError> {
    let inbox = config
        .inbox_dir
        .strip_prefix(&config.root)
        .unwrap_or(&config.inbox_dir)
        .to_string_lossy()
        .to_string();

    vcs.run(&["add".to_string(), inbox])?;
    vcs.run(&[
        "commit".to_string(),
        "-m".to_string(),
        config.commit_message.clone(),
    ])?;
    let mut push = vec!["push".to_string()];
    push.extend(config.remote.clone());
    vcs.run(&push)
}
