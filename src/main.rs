//! repo-scout: recursive git repository status reporting.
//!
//! Scans a directory tree for git repositories, probes each one
//! concurrently, and prints a filterable, templated status line per
//! repository.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, Command as ClapCommand};

use repo_scout::core::{run_scan, ScanOptions};
use repo_scout::filter::Combine;
use repo_scout::render::{Template, DEFAULT_FORMAT};

#[tokio::main]
async fn main() -> Result<()> {
    // Probe failures are reported at warn level; they must reach stderr
    // even without RUST_LOG set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = ClapCommand::new("repo-scout")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recursively reports the status of every git repository below a directory")
        .arg(
            Arg::new("root")
                .value_name("PATH")
                .default_value(".")
                .help("Directory to scan"),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .short('f')
                .action(ArgAction::Append)
                .value_name("EXPR")
                .help("Attribute to filter for (sync state, modification flag, or 'remote'; prefix with 'no-' to negate)"),
        )
        .arg(
            Arg::new("or")
                .long("or")
                .action(ArgAction::SetTrue)
                .help("Combine filters with OR instead of AND"),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .short('s')
                .default_value("")
                .value_name("STRING")
                .help("String to search for in the rendered output line"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .default_value(DEFAULT_FORMAT)
                .value_name("TEMPLATE")
                .help("Output template; placeholders: {U} {A} {M} {R} {D} {S} {state} {path} {branch} {remote} {origin}"),
        )
        .arg(
            Arg::new("jobs")
                .long("jobs")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Number of concurrent repository probes"),
        )
        .arg(
            Arg::new("sequential")
                .long("sequential")
                .action(ArgAction::SetTrue)
                .help("Probe repositories one at a time"),
        )
        .get_matches();

    let root = PathBuf::from(
        matches
            .get_one::<String>("root")
            .expect("root has a default value"),
    );
    let filters: Vec<String> = matches
        .get_many::<String>("filter")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let combine = if matches.get_flag("or") {
        Combine::Any
    } else {
        Combine::All
    };
    let search = matches
        .get_one::<String>("search")
        .expect("search has a default value")
        .clone();
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default value");

    // Template problems surface before any probe is spawned
    let template = Template::parse(format)?;

    let options = ScanOptions {
        filters,
        combine,
        search,
        template,
        jobs: matches.get_one::<usize>("jobs").copied(),
        sequential: matches.get_flag("sequential"),
    };

    let mut stdout = io::stdout();
    let stats = run_scan(root, options, &mut stdout).await?;

    if stats.failures > 0 {
        eprintln!(
            "{} of {} repositories could not be read (see warnings above)",
            stats.failures, stats.repos
        );
        std::process::exit(1);
    }

    Ok(())
}
