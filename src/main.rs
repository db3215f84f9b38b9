//! passgen - terminal password generator
//!
//! Runs the generator form in the terminal (ratatui) by default, or prints a
//! single password with the `gen` subcommand.

mod clipboard;
mod config;
mod core;
mod data;
mod frontend;

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use frontend::Frontend;
use std::path::PathBuf;
use std::time::Duration;

#[derive(ClapParser)]
#[command(name = "passgen")]
#[command(about = "Terminal password generator", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.passgen)
    /// Can also be set via PASSGEN_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one password and exit
    ///
    /// Starts from the configured defaults. Each class can be forced on or
    /// off with its flag pair.
    Gen {
        /// Length of the generated password (4-32)
        #[arg(short, long)]
        length: Option<usize>,

        /// Include lowercase letters (a-z)
        #[arg(long, conflicts_with = "no_lowercase")]
        lowercase: bool,
        /// Exclude lowercase letters
        #[arg(long)]
        no_lowercase: bool,

        /// Include uppercase letters (A-Z)
        #[arg(long, conflicts_with = "no_uppercase")]
        uppercase: bool,
        /// Exclude uppercase letters
        #[arg(long)]
        no_uppercase: bool,

        /// Include digits (0-9)
        #[arg(long, conflicts_with = "no_digits")]
        digits: bool,
        /// Exclude digits
        #[arg(long)]
        no_digits: bool,

        /// Include symbols (e.g. !@#$%)
        #[arg(long, conflicts_with = "no_symbols")]
        symbols: bool,
        /// Exclude symbols
        #[arg(long)]
        no_symbols: bool,

        /// Also copy the password to the clipboard
        #[arg(short, long)]
        copy: bool,
    },
}

/// Resolve an on/off flag pair against the configured default
fn flag_pair(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}

fn init_logging() -> Result<()> {
    // TUI apps can't log to stdout, so we write to a file
    let log_path = config::Config::log_path()?;
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)
            .context(format!("Failed to create data directory {:?}", dir))?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context(format!("Failed to open log file {:?}", log_path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set custom data directory before anything resolves paths
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DATA_DIR_ENV, data_dir);
    }

    // Initialize logging (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    init_logging()?;
    if let Ok(dir) = config::Config::base_dir() {
        tracing::info!("Using data directory {:?}", dir);
    }

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        config::Config::load_from_path(config_path)?
    } else {
        config::Config::load()?
    };

    match cli.command {
        Some(Commands::Gen {
            length,
            lowercase,
            no_lowercase,
            uppercase,
            no_uppercase,
            digits,
            no_digits,
            symbols,
            no_symbols,
            copy,
        }) => {
            let defaults = config.generator_config();
            let generator = data::GeneratorConfig {
                length: length.unwrap_or(defaults.length),
                include_lowercase: flag_pair(lowercase, no_lowercase, defaults.include_lowercase),
                include_uppercase: flag_pair(uppercase, no_uppercase, defaults.include_uppercase),
                include_digits: flag_pair(digits, no_digits, defaults.include_digits),
                include_symbols: flag_pair(symbols, no_symbols, defaults.include_symbols),
            };
            run_gen(generator, copy)
        }
        None => run_tui(config),
    }
}

/// Generate one password, treating an empty pool as an error
fn generate_password(generator: &data::GeneratorConfig) -> Result<String> {
    let password = core::generate(generator, &mut rand::thread_rng())?;
    if password.is_empty() {
        bail!("No character class enabled, nothing to generate");
    }
    Ok(password)
}

/// Print one password to stdout
fn run_gen(generator: data::GeneratorConfig, copy: bool) -> Result<()> {
    let password = generate_password(&generator)?;

    println!("{}", password);

    if copy {
        if let Err(e) = clipboard::copy(&password) {
            eprintln!("Failed to copy to clipboard: {:#}", e);
        }
    }

    Ok(())
}

/// TUI main loop
fn run_tui(config: config::Config) -> Result<()> {
    use core::AppCore;
    use frontend::{FrontendEvent, TuiFrontend};

    let mut app_core = AppCore::new(config);

    let mut frontend = TuiFrontend::new()?;
    frontend.set_poll_timeout(Duration::from_millis(app_core.config.ui.poll_timeout_ms));

    let (width, height) = frontend.size();
    tracing::info!("Starting form on a {}x{} terminal", width, height);

    // Main event loop
    while app_core.running {
        if app_core.needs_render {
            frontend.render(&app_core)?;
            app_core.needs_render = false;
        }

        // Poll for frontend events (keyboard, mouse, resize)
        for event in frontend.poll_events()? {
            match event {
                FrontendEvent::Key { code, modifiers } => {
                    app_core.handle_key(crossterm::event::KeyEvent::new(code, modifiers));
                }
                FrontendEvent::Mouse { kind, x, y, .. } => {
                    if let Some(hit) = frontend.mouse_hit(kind, x, y) {
                        app_core.handle_hit(hit);
                    }
                }
                FrontendEvent::Resize { width, height } => {
                    tracing::debug!("Terminal resized to {}x{}", width, height);
                    app_core.needs_render = true;
                }
            }
        }
    }

    frontend.cleanup()?;
    tracing::info!("Exiting");
    Ok(())
}
