//! Command-line interface definitions.

use assetmark::config::CONFIG_FILE;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Content-addressed asset urls and stylesheet compilation
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: assetmark.toml)
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Content root that `~` maps to (overrides `url.content_root`)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Mount prefix (overrides `url.prefix`)
    #[arg(short, long, global = true)]
    pub prefix: Option<String>,

    /// Rewrite base (overrides `url.base`)
    #[arg(short, long, global = true)]
    pub base: Option<String>,

    /// Leave content digests out of urls
    #[arg(long, global = true)]
    pub no_hash: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print content-hashed urls for raw files
    #[command(visible_alias = "f")]
    File {
        /// Application relative paths (`~/css/site.css`)
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<String>,
    },

    /// Print unhashed urls for files cached by another layer
    Cached {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<String>,
    },

    /// Print urls for already resolved application paths
    Absolute {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<String>,
    },

    /// Print the debug-mode url of a single asset
    #[command(visible_alias = "a")]
    Asset {
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Print the url of a bundle from its own url path
    Bundle {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Compile a stylesheet and inline its imports
    #[command(visible_alias = "c")]
    Compile {
        #[arg(value_name = "PATH")]
        path: String,

        /// Minify the output (overrides `compile.minify`)
        #[arg(short, long)]
        minify: bool,

        /// Print `{ output, imports }` as JSON
        #[arg(long)]
        json: bool,
    },
}
