use crate::release::BumpLevel;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "verbump",
    about = "Read and bump the version assignment of a project manifest",
    version,
    author
)]
pub struct Cli {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    pub path: String,

    /// Manifest file relative to the project directory
    #[arg(short, long, default_value = "pyproject.toml", global = true)]
    pub file: String,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the current version (0.0.0 when the manifest has none)
    Read {
        /// Print a JSON object instead of the bare version
        #[arg(long)]
        json: bool,
    },

    /// Write an exact version into the manifest
    Set {
        /// New version, written verbatim
        #[arg(value_name = "VERSION")]
        version: String,

        /// Show the change without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Compute the next version and write it into the manifest
    Bump {
        /// Part of the version to increment
        #[arg(value_enum)]
        level: Level,

        /// Pre-release identifier used by `pre`
        #[arg(long, value_name = "ID", default_value = crate::release::DEFAULT_PRE_ID)]
        pre_id: String,

        /// Show the change without writing it
        #[arg(long)]
        dry_run: bool,

        /// Commit the manifest change to Git
        #[arg(long)]
        commit: bool,

        /// Create a v<version> tag (implies --commit)
        #[arg(long)]
        tag: bool,
    },

    /// Replace a template project's name and description
    Configure {
        /// Project name for [project] and [tool.poetry]
        #[arg(long)]
        name: String,

        /// One-line project description
        #[arg(long)]
        description: String,

        /// Leave README.md and CHANGELOG.md as they are
        #[arg(long)]
        keep_docs: bool,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Major,
    Minor,
    Patch,
    Pre,
}

impl From<Level> for BumpLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Major => BumpLevel::Major,
            Level::Minor => BumpLevel::Minor,
            Level::Patch => BumpLevel::Patch,
            Level::Pre => BumpLevel::Pre,
        }
    }
}
