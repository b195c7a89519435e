//! Command wifiqr generates a WiFi QR code for a network.

use std::fs::{self, File};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use miette::Diagnostic;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use wifiqr::helper;
use wifiqr::{Authentication, Config, Image, RecoveryLevel};

/// Generate a WiFi QR code that phones can scan to join a network.
#[derive(Debug, Parser)]
#[command(name = "wifiqr", version, about)]
struct Cli {
    /// Network name.
    #[arg(short, long, env = "WIFIQR_SSID")]
    ssid: Option<String>,

    /// Network password. Required for WEP and WPA, forbidden for open networks.
    #[arg(short, long, env = "WIFIQR_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Authentication type: none, wep or wpa.
    #[arg(short, long, value_name = "TYPE")]
    auth: Option<Authentication>,

    /// Mark the network as hidden.
    #[arg(long)]
    hidden: bool,

    /// QR recovery level: low, medium, high or highest.
    #[arg(short, long, value_name = "LEVEL")]
    recovery: Option<RecoveryLevel>,

    /// TOML file describing the network. Flags override its values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// Write to FILE instead of standard output.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Text on a terminal, PNG otherwise (or by output file extension).
    Auto,
    /// Unicode block characters.
    Text,
    Png,
    Svg,
    /// The raw WIFI: payload string.
    Payload,
}

#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error("failed to read config file {path}")]
    #[diagnostic(code(wifiqr::config_read))]
    ReadConfig {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}")]
    #[diagnostic(code(wifiqr::config_parse))]
    ParseConfig {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Wifi(#[from] wifiqr::Error),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Wifi(err.into())
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let cfg = build_config(&cli)?;
    tracing::info!(
        ssid = %cfg.ssid,
        authentication = %cfg.authentication,
        hidden = cfg.hidden,
        "generating WiFi QR code"
    );

    let img = wifiqr::new(&cfg)?;
    let format = resolve_format(cli.format, cli.output.as_deref());
    tracing::debug!(?format, output = ?cli.output, "writing QR code");

    match &cli.output {
        Some(path) => write_file(&img, format, path),
        None => write_stdout(&img, format),
    }
}

/// Merges the optional config file with command-line flags.
fn build_config(cli: &Cli) -> Result<Config, CliError> {
    let mut cfg = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    if let Some(ssid) = &cli.ssid {
        cfg.ssid.clone_from(ssid);
    }
    if let Some(password) = &cli.password {
        cfg.password.clone_from(password);
    }
    if let Some(auth) = cli.auth {
        cfg.authentication = auth;
    }
    if cli.hidden {
        cfg.hidden = true;
    }
    if let Some(level) = cli.recovery {
        cfg.recovery_level = level;
    }

    Ok(cfg)
}

fn load_config(path: &Path) -> Result<Config, CliError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: display.clone(),
        source,
    })?;

    toml::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: display,
        source,
    })
}

fn resolve_format(format: Format, output: Option<&Path>) -> Format {
    if format != Format::Auto {
        return format;
    }

    match output {
        Some(path) => {
            let ext = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_ascii_lowercase);
            match ext.as_deref() {
                Some("svg") => Format::Svg,
                Some("txt") => Format::Text,
                _ => Format::Png,
            }
        }
        None if io::stdout().is_terminal() => Format::Text,
        None => Format::Png,
    }
}

fn write_stdout(img: &Image, format: Format) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    match format {
        Format::Png | Format::Auto => helper::write_png(img, &mut stdout)?,
        Format::Text => write!(stdout, "{img}")?,
        Format::Svg => writeln!(stdout, "{}", img.to_svg())?,
        Format::Payload => writeln!(stdout, "{}", img.payload())?,
    }
    stdout.flush()?;
    Ok(())
}

fn write_file(img: &Image, format: Format, path: &Path) -> Result<(), CliError> {
    match format {
        Format::Png | Format::Auto => helper::write_png(img, File::create(path)?)?,
        Format::Svg => helper::save_svg(img, path)?,
        Format::Text => fs::write(path, img.to_text())?,
        Format::Payload => fs::write(path, format!("{}\n", img.payload()))?,
    }
    tracing::info!(path = %path.display(), "wrote QR code");
    Ok(())
}
