use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

/// Command-line arguments for the assetpack tool
#[derive(Debug)]
pub struct Args {
    /// Enable verbose output
    pub verbose: bool,

    /// Path to the project root (directory containing the frontend and android trees)
    pub path: Option<PathBuf>,

    /// Path to alternative bundle manifest file
    pub manifest: Option<PathBuf>,

    /// Override for the staging directory location
    pub staging: Option<PathBuf>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        let matches = Command::new("assetpack")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Frontend resource bundling tool for the Android shell application")
            .arg(
                Arg::new("path")
                    .short('p')
                    .long("path")
                    .value_name("PATH")
                    .help("Path to the project root containing the frontend and android trees")
            )
            .arg(
                Arg::new("manifest")
                    .short('m')
                    .long("manifest")
                    .value_name("FILE")
                    .help("Path to alternative bundle manifest file (default: bundle.toml if present)")
            )
            .arg(
                Arg::new("staging")
                    .long("staging")
                    .value_name("DIR")
                    .help("Staging directory to assemble resources in before archiving")
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .action(ArgAction::SetTrue)
                    .help("Enable verbose output")
            )
            .get_matches();

        Self {
            verbose: matches.get_flag("verbose"),
            path: matches.get_one::<String>("path").map(PathBuf::from),
            manifest: matches.get_one::<String>("manifest").map(PathBuf::from),
            staging: matches.get_one::<String>("staging").map(PathBuf::from),
        }
    }
}
