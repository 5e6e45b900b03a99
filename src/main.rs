use std::process::{Command as Process, ExitCode};

use chrono::{Local, Timelike};
use clap::Parser;
use log::LevelFilter;

mod app;
mod cli;
mod codes;
mod config;
mod errors;
mod provider;
mod units;
mod weather;

use crate::app::DisplayPayload;
use crate::cli::{Args, Command};
use crate::config::Config;
use crate::errors::WxError;

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPENER: &str = "xdg-open";

/// Logs go to stderr; stdout carries nothing but the payload.
fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

fn build_payload(config: &Config) -> Result<DisplayPayload, WxError> {
    let source = provider::from_config(config)?;
    let report = source.fetch()?;
    log::info!(
        "fetched {} day(s) for {:?} from {:?}",
        report.days.len(),
        report.area_name,
        config.provider
    );
    let now_hour = Local::now().hour() as u8;
    Ok(app::render(&report, now_hour, &config.render_options()))
}

/// Never fails: any error becomes the `Err` payload.
fn payload_json(config: Result<Config, WxError>) -> String {
    config
        .and_then(|config| build_payload(&config))
        .unwrap_or_else(|err| {
            log::error!("{err}");
            DisplayPayload::error(err)
        })
        .to_json()
}

/// Resolves the provider page for the location, falling back to a web search.
fn page_url(config: &Config) -> String {
    match provider::from_config(config).and_then(|source| source.page_url()) {
        Ok(url) => url,
        Err(err) => {
            log::warn!("could not resolve provider page, opening a search instead: {err}");
            provider::search_url(&config.search_term())
        }
    }
}

fn open_in_browser(url: &str) -> Result<(), WxError> {
    log::info!("opening {url}");
    Process::new(OPENER)
        .arg(url)
        .spawn()
        .map(|_| ())
        .map_err(|e| WxError::Launch(format!("{OPENER}: {e}")))
}

fn open_page(config: Result<Config, WxError>) -> ExitCode {
    let config = config.unwrap_or_else(|err| {
        log::warn!("{err}, using default settings");
        Config::default()
    });
    match open_in_browser(&page_url(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = config::load_config(args.config.as_deref())
        .map(|config| config.with_overrides(args.location.clone(), args.provider));
    let level = config.as_ref().map_or(LevelFilter::Warn, |c| c.log_level);
    init_logging(level);

    match args.command {
        Some(Command::Open) => open_page(config),
        None => {
            println!("{}", payload_json(config));
            ExitCode::SUCCESS
        }
    }
}
