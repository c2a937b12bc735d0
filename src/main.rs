//! assetmark - content-addressed asset urls and stylesheet compilation.

mod cli;

use anyhow::{Context, Result};
use assetmark::logger;
use clap::{ColorChoice, Parser};
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to get current working directory")?;
    let config = cli::load_config(&cli, &cwd)?;
    cli::run(&cli, &config, &mut std::io::stdout().lock())
}
