//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// extidx - Resolve extension packages from an extension index
#[derive(Parser, Debug)]
#[command(name = "extidx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub host: HostArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options describing the host extensions are resolved for.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct HostArgs {
    /// Config file (default: $EXTIDX_CONFIG_DIR/config.toml or ~/.extidx/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Host version used for compatibility checks
    #[arg(long, global = true, env = "EXTIDX_HOST_VERSION", value_name = "VERSION")]
    pub host_version: Option<String>,

    /// Mirror root that hosts extension artifacts (overrides [cloud] mirror_endpoint)
    #[arg(long, global = true, value_name = "URL")]
    pub mirror: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Find the download URL and digest for an extension
    ///
    /// Examples:
    ///   extidx resolve alias                      # Latest compatible release
    ///   extidx resolve alias --current 0.5.1      # Only if newer than 0.5.1
    ///   extidx resolve alias --target-version 0.5.0  # Exactly 0.5.0
    Resolve {
        /// Extension name
        name: String,

        /// Installed version; only newer releases are considered
        #[arg(long, value_name = "VERSION")]
        current: Option<String>,

        /// Exact version to resolve
        #[arg(long = "target-version", value_name = "VERSION")]
        target: Option<String>,

        /// Index location (path or file:// URL). Required unless
        /// `[extension] index_url` is configured
        #[arg(long, value_name = "URL")]
        index: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the project home page of an extension
    ///
    /// The index is read from `[extension] index_url`.
    ProjectUrl {
        /// Extension name
        name: String,
    },

    /// List every published release of an extension
    Versions {
        /// Extension name
        name: String,

        /// Index location (path or file:// URL). Required unless
        /// `[extension] index_url` is configured
        #[arg(long, value_name = "URL")]
        index: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
