use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use inkpress::config::Config;
use inkpress::lastmod::build_lastmod_map;
use inkpress::logger::configure_logger;
use inkpress::server::server_run;
use inkpress::site::Site;
use inkpress::text_utils::format_iso_millis;
use inkpress::validate::validate_posts;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "inkpress.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generates the site into the output directory
    Build {
        /// Overrides paths.output_dir
        #[arg(short, long)]
        output_dir: Option<String>,
    },
    /// Generates the site and serves it over HTTP
    Serve,
    /// Checks post descriptions, exits with 1 on errors
    Validate,
    /// Prints the lastmod date of every post URL
    Lastmod,
}

fn build(config: Config, output_dir: Option<String>) -> Result<()> {
    let output_dir = output_dir.map(PathBuf::from).unwrap_or_else(|| config.paths.output_dir.clone());
    let site = Site::load(config)?;
    let routes = site.generate(Utc::now())?;
    routes.write_to(&output_dir)
}

async fn serve(config: Config) -> Result<()> {
    let site = Site::load(config)?;
    let routes = site.generate(Utc::now())?;
    info!("Listening on {}:{}", site.config.server.address, site.config.server.port);
    server_run(&site.config, routes).await?;
    Ok(())
}

fn validate(config: &Config) -> Result<bool> {
    let report = validate_posts(&config.paths.posts_dir, &config.validation)?;
    report.log();
    Ok(!report.has_errors())
}

fn lastmod(config: &Config) {
    let map = build_lastmod_map(&config.paths.posts_dir, &config.site.website);
    for (url, date) in map {
        println!("{}\t{}", url, format_iso_millis(&date));
    }
}

#[ntex::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run inkpress --help");
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting inkpress =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");

    match args.command {
        Command::Build { output_dir } => build(config, output_dir)?,
        Command::Serve => serve(config).await?,
        Command::Validate => {
            if !validate(&config)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Lastmod => lastmod(&config),
    }

    Ok(ExitCode::SUCCESS)
}
