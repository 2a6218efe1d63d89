use std::path::PathBuf;

use clap::{Arg, ArgMatches};

use crate::config::Config;

pub fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .env("TXTPOST_ROOT")
        .help("Repository root holding inbox/, processed/ and src/content/posts/")
        .value_parser(clap::value_parser!(PathBuf))
        .default_value(".")
}

/// Builds the base [`Config`] from `--root`.
pub fn config_from_matches(matches: &ArgMatches) -> Config {
    let root = matches
        .get_one::<PathBuf>("root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    Config::new(root)
}
