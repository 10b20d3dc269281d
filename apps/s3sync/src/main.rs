//! s3sync binary entry point.
//! Resolves the configuration and prints the sync plan or a diagnostic.

use clap::Parser;
use owo_colors::OwoColorize;
use s3sync::cli::Cli;
use s3sync::{config, logging, output, resolve};

fn main() {
    let cli = Cli::parse();
    let format = cli.output.clone();

    let (file_opts, config_path) =
        match config::load_layered(cli.config.as_deref(), &cli.config_dir) {
            Ok(loaded) => loaded,
            Err(e) => fail(&e),
        };
    let raw = cli.overlay(file_opts);

    if let Err(e) = logging::init(raw.debug) {
        eprintln!(
            "{} failed to initialise logging: {}",
            "⚠️  warning:".yellow().bold(),
            e
        );
    }
    match &config_path {
        Some(p) => tracing::debug!(path = %p.display(), "loaded config file"),
        None => tracing::debug!("no s3sync.{{toml,yaml}} found; using defaults"),
    }

    match resolve(raw) {
        Ok(cfg) => output::print_plan(&cfg, &format),
        Err(e) => fail(&e),
    }
}

fn fail(e: &s3sync::ConfigError) -> ! {
    eprintln!("{} {}", "❌ error:".red().bold(), e);
    std::process::exit(2);
}
