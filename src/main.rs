use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use padbind::config::SessionConfig;
use padbind::mapping::engine::BindingSession;
use padbind::target::Target;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Löst Controller-Bindings für einen Emulator auf
#[derive(Parser, Debug)]
#[command(name = "padbind")]
#[command(version)]
#[command(about = "Resolves controller bindings for an emulator session", long_about = None)]
struct Cli {
    /// Session file (default: ~/.config/padbind/session.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Target emulator (dolphin, retroarch, pcsx2, model2)
    #[arg(short, long, value_name = "TARGET")]
    target: Option<Target>,

    /// Game mode, overrides the ROM filename tag
    #[arg(short, long, value_name = "MODE")]
    mode: Option<String>,

    /// ROM path; a `[tag]` in the filename selects the game mode
    #[arg(long, value_name = "PATH")]
    rom: Option<String>,

    /// Create a default session file if none exists
    #[arg(long)]
    init: bool,
}

fn main() -> Result<()> {
    setup()?;
    let cli = Cli::parse();

    let path = cli.config.unwrap_or_else(SessionConfig::default_path);
    if cli.init {
        SessionConfig::ensure_default(&path)?;
    }

    let mut config = SessionConfig::load(&path)?;
    if let Some(target) = cli.target {
        config.target = target;
    }
    if cli.mode.is_some() {
        config.mode = cli.mode;
    }
    if cli.rom.is_some() {
        config.rom = cli.rom;
    }
    config
        .validate()
        .map_err(|e| eyre!("Invalid session: {}", e))?;

    let session = BindingSession::prepare(
        config.session_options(),
        config.load_database(),
        config.load_catalog(),
    );
    let resolved = session.resolve(&config.devices);

    for failure in resolved.failures() {
        warn!("Player {} skipped: {}", failure.player_index, failure.error);
    }

    let mut entries: Vec<(String, String)> = Vec::new();
    resolved.write_to(&mut entries);
    for (path, value) in &entries {
        println!("{} = {}", path, value);
    }
    info!("Wrote {} bindings for {}", entries.len(), config.target);

    if resolved.devices().is_empty() && !config.devices.is_empty() {
        return Err(eyre!("No device could be resolved"));
    }
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

// Logs gehen nach stderr, stdout bleibt für die Bindings
fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .pretty()
        .init();
}
