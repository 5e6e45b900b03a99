use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::{Parser, Subcommand};

use crate::config::Provider;

const ABOUT: &str = "Weather module for Waybar";

const LONG_ABOUT: &str = "
Fetches current conditions and the forecast from wttr.in, Open-Meteo or OpenWeatherMap and prints
one line of JSON (text, tooltip, class) for a Waybar custom module.

Settings are read from $XDG_CONFIG_HOME/wxbar/config.toml when present. The OpenWeatherMap key may
also be given in the WXBAR_API_KEY environment variable. Any failure still prints valid JSON with
the text \"Err\" and the error in the tooltip.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, help = "Path to the config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Location override (e.g. \"Chengdu\" or \"成华,成都\")")]
    pub location: Option<String>,

    #[arg(short, long, value_enum, help = "Weather provider override")]
    pub provider: Option<Provider>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open the provider's page for the location in the default browser
    Open,
}
