use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use clockface::app::{self, ClockHost, Showing, WindowOptions};
use clockface::config::{load_typeface, AppConfig};
use clockface::logging::init_logging;

/// Analog clock with two switchable faces.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Window title
    #[arg(long)]
    title: Option<String>,
    /// TrueType/OpenType font used for the numerals
    #[arg(long)]
    font: Option<PathBuf>,
    /// Start with the secondary clock visible
    #[arg(long)]
    secondary: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = args.config.as_deref().map(AppConfig::load);
    let config = match &loaded {
        Some(Ok(config)) => config.clone(),
        _ => AppConfig::default(),
    };

    init_logging(config.logging.to_logging_config());

    if let Some(Err(err)) = &loaded {
        log::warn!("{err}; continuing with default settings");
    }

    let typeface = load_typeface(args.font.as_deref().or(config.font.as_deref()));

    let mut host = ClockHost::new(
        config.primary.resolve(),
        config.secondary.resolve(),
        config.window.background_color(),
    );
    if args.secondary || config.window.start_with_secondary {
        host.set_showing(Showing::Secondary);
    }

    let options = WindowOptions {
        title: args.title.unwrap_or_else(|| config.window.title.clone()),
        width: config.window.width,
        height: config.window.height,
    };

    app::run(options, host, typeface)
}
