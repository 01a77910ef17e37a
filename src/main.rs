//! Binary entrypoint for the progressive-stash CLI.
//!
//! Commands:
//! - `apply --database <dir> [--output <dir>]` - patch a database directory
//! - `preview` - print the stages, stash templates and crafts the config generates
//! - `init [--force]` - write the default configuration
//!
//! See the library crate docs for module-level details: `progressive_stash::`.
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use progressive_stash::config::ModConfig;
use progressive_stash::database::DatabaseTables;
use progressive_stash::lifecycle::ProgressiveStashMod;
use progressive_stash::patch::{SecureContainersController, StashBuilder};

#[derive(Parser)]
#[command(name = "progressive-stash")]
#[command(about = "Progressive stash tiers and secure container tweaks for a hideout database")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config/config.json", global = true)]
    config: PathBuf,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Patch a database directory
    Apply {
        /// Database directory (contains hideout/, templates/, locales/)
        #[arg(short, long)]
        database: PathBuf,

        /// Write the patched tables here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print what the configuration generates, without a database
    Preview,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Apply { database, output } => {
            let config = ModConfig::load(&cli.config)?;
            init_logging(Some(&config), cli.verbose);

            let patcher = ProgressiveStashMod::from_config(config);
            let mut tables = DatabaseTables::load(&database)?;
            let report = patcher.delayed_load(&mut tables);

            let target = output.unwrap_or(database);
            tables.save(&target)?;
            info!(
                "{} stashes created, {} crafts injected, {} containers resized, profile created: {}",
                report.stashes_created,
                report.crafts_injected,
                report.containers_tweaked,
                report.profile_created
            );
            info!("Patched database written to {}", target.display());
        }
        Commands::Preview => {
            let config = ModConfig::load(&cli.config)?;
            init_logging(Some(&config), cli.verbose);

            let stashes = StashBuilder::new(&config);
            let containers = SecureContainersController::new(&config);
            let payload = serde_json::json!({
                "stages": stashes.generate_stages(),
                "items": stashes.generate_items(),
                "crafts": containers.generate_crafts(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Commands::Init { force } => {
            init_logging(None, cli.verbose);
            if cli.config.exists() && !force {
                bail!(
                    "{} already exists, pass --force to overwrite it",
                    cli.config.display()
                );
            }
            ModConfig::create_default(&cli.config)?;
            info!("Configuration file created at {}", cli.config.display());
        }
    }

    Ok(())
}

fn init_logging(config: Option<&ModConfig>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity and the config debug flag both raise the level
    let debug = config.map(|cfg| cfg.debug).unwrap_or(false);
    let base_level = match verbosity {
        0 if debug => log::LevelFilter::Debug,
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
            record.level(),
            record.args()
        )
    });
    let _ = builder.try_init();
}
