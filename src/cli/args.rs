//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Reconcile locale catalogs with the keys used in source (`--fix` patches them)
//! - `init`: Initialize the tagi18n configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.args.verbose,
            Some(Command::Init) | None => false,
        }
    }

    pub fn no_color(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.args.no_color,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Source directory to scan (overrides config file)
    #[arg(long, alias = "root-dir", short = 'r')]
    pub src_dir: Option<PathBuf>,

    /// Directory with one <locale>.json catalog per locale (overrides config file)
    #[arg(long, short = 'c')]
    pub config_dir: Option<PathBuf>,

    /// Default locale: its source text is the translation (overrides config file)
    #[arg(long = "default", value_name = "LOCALE")]
    pub default_locale: Option<String>,

    /// Patch the catalogs instead of only reporting
    #[arg(long, short = 'f')]
    pub fix: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check locale catalogs against the translation keys used in source
    Check(CheckCommand),
    /// Initialize a new .tagi18nrc.json configuration file
    Init,
}
