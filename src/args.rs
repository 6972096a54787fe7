use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Clone, Debug, Parser)]
#[clap(infer_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Prepares the output directory and copies passthrough assets
    Build(ProjectArgs),

    /// Prints the resolved configuration
    Config(ProjectArgs),
}

#[derive(Clone, Debug, Parser)]
pub struct ProjectArgs {
    #[clap(default_value = ".")]
    pub directory: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_defaults_to_cwd() {
        let args = Args::parse_from(["sitecfg", "build"]);
        match args.command {
            Command::Build(a) => assert_eq!(a.directory, PathBuf::from(".")),
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn subcommands_can_be_abbreviated() {
        let args = Args::parse_from(["sitecfg", "conf", "site"]);
        match args.command {
            Command::Config(a) => assert_eq!(a.directory, PathBuf::from("site")),
            _ => panic!("expected config"),
        }
    }
}
