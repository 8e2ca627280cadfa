//! relgrab - GitHub release artifact fetcher
//!
//! Scans the repositories reachable with a GitHub token for a release asset
//! matching this machine, and downloads it when exactly one matches.

use std::error::Error;
use std::process;

use clap::Parser;

use relgrab::cli::Args;
use relgrab::config;
use relgrab::fetcher;
use relgrab::finder::{self, Action};
use relgrab::github::{GithubClient, Visibility};
use relgrab::logging::{init_logger, log_error, log_info};
use relgrab::platform;

fn main() {
    init_logger();
    let args = Args::parse();

    if let Err(e) = run(args) {
        log_error(&e.to_string());
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let token = config::resolve_token(args.token.as_deref()).ok_or(
        "GitHub token not found. Please provide one via --token flag or GH_TOKEN env var.",
    )?;

    let platform = platform::detect()?;

    let visibility = if args.public {
        Visibility::OwnedPublic
    } else {
        Visibility::Private
    };

    let client = GithubClient::new(token);
    let pattern = args.pattern.unwrap_or_default();

    let candidates = finder::find_release_candidates(
        &client,
        &pattern,
        args.version.as_deref(),
        platform,
        visibility,
    )
    .map_err(|e| format!("error finding releases: {}", e))?;

    match finder::plan_action(&candidates) {
        Action::NoMatch => log_info("No matching release artifacts found for your platform."),
        Action::Download(candidate) => {
            log_info(&format!(
                "Found one matching artifact: {} in repo {}/{}. Downloading...",
                candidate.asset_name, candidate.repo_owner, candidate.repo_name
            ));
            fetcher::download_and_prepare(&client, candidate)
                .map_err(|e| format!("failed to download and prepare artifact: {}", e))?;
            log_info(&format!(
                "Success! Artifact '{}' is downloaded and executable.",
                candidate.asset_name
            ));
        }
        Action::List(lines) => {
            // Plain listing so the output stays scriptable.
            for line in lines {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
