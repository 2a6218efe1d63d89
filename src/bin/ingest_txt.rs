use std::{path::PathBuf, process::ExitCode};

use clap::{command, Arg, ArgAction};
use txtpost::{cli, ingest, report::save_report};

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let matches = command!()
        .about("Converts .txt drafts in the inbox into Markdown posts")
        .args(&[
            cli::root_arg(),
            Arg::new("inbox")
                .long("inbox")
                .help("Directory of pending drafts [default: <root>/inbox]")
                .value_parser(clap::value_parser!(PathBuf)),
            Arg::new("processed")
                .long("processed")
                .help("Archive for converted drafts [default: <root>/processed]")
                .value_parser(clap::value_parser!(PathBuf)),
            Arg::new("posts")
                .long("posts")
                .help("Output tree [default: <root>/src/content/posts]")
                .value_parser(clap::value_parser!(PathBuf)),
            Arg::new("utc_offset")
                .long("utc-offset")
                .env("TXTPOST_UTC_OFFSET")
                .help("Hours from UTC used for undated drafts")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i32))
                .default_value("8"),
            Arg::new("dry_run")
                .long("dry-run")
                .help("Show what would be converted without touching any file")
                .action(ArgAction::SetTrue),
            Arg::new("report")
                .long("report")
                .help("Write a JSON report of the batch to this file")
                .value_parser(clap::value_parser!(PathBuf)),
        ])
        .get_matches();

    let mut config = cli::config_from_matches(&matches);
    if let Some(dir) = matches.get_one::<PathBuf>("inbox") {
        config = config.with_inbox_dir(dir);
    }
    if let Some(dir) = matches.get_one::<PathBuf>("processed") {
        config = config.with_processed_dir(dir);
    }
    if let Some(dir) = matches.get_one::<PathBuf>("posts") {
        config = config.with_posts_dir(dir);
    }
    if let Some(hours) = matches.get_one::<i32>("utc_offset") {
        config = config.with_utc_offset_hours(*hours)?;
    }
    let dry_run = matches.get_flag("dry_run");

    let report = ingest::run(&config, dry_run)?;

    let verb = if dry_run { "Would convert" } else { "Converted" };
    for c in &report.converted {
        println!("{verb} {} -> {}", c.source.display(), c.destination.display());
    }
    println!("Done. {} file(s) converted.", report.converted.len());
    if !report.is_success() {
        println!("{} file(s) failed.", report.failed.len());
        for f in &report.failed {
            println!("Failed {}: {}", f.source.display(), f.error);
        }
    }

    if let Some(path) = matches.get_one::<PathBuf>("report") {
        save_report(path, &report)?;
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
