use std::{path::PathBuf, process::ExitCode};

use clap::{command, Arg, ArgAction};
use txtpost::{
    cli,
    upload::{copy_into_inbox, publish, Git, Placement},
};

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let mut cmd = command!()
        .about("Copies .txt drafts into the inbox, then commits and pushes them")
        .args(&[
            cli::root_arg(),
            Arg::new("files")
                .help("Draft files to upload")
                .value_parser(clap::value_parser!(PathBuf))
                .num_args(1..)
                .action(ArgAction::Append),
            Arg::new("message")
                .long("message")
                .short('m')
                .help("Commit message")
                .default_value(txtpost::config::DEFAULT_COMMIT_MESSAGE),
            Arg::new("remote")
                .long("remote")
                .help("Remote to push to [default: the branch upstream]"),
        ]);
    let usage = cmd.render_usage();
    let matches = cmd.get_matches_mut();

    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default();
    if files.is_empty() {
        println!("{usage}");
        return Ok(ExitCode::from(1));
    }

    let mut config = cli::config_from_matches(&matches);
    if let Some(message) = matches.get_one::<String>("message") {
        config.commit_message = message.clone();
    }
    config.remote = matches.get_one::<String>("remote").cloned();

    for placement in copy_into_inbox(&config, &files)? {
        match placement {
            Placement::Copied {
                source,
                destination,
            } => println!("Copied {} -> {}", source.display(), destination.display()),
            Placement::InInbox(path) => println!("Already in inbox: {}", path.display()),
            Placement::Skipped(source) => {
                println!("Skip non-existing or non-txt: {}", source.display())
            }
        }
    }

    let git = Git {
        workdir: config.root.clone(),
    };
    if let Err(e) = publish(&config, &git) {
        println!("Git command failed: {e}");
        return Ok(ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1)));
    }
    println!("Uploaded and pushed. CI will ingest automatically.");

    Ok(ExitCode::SUCCESS)
}
