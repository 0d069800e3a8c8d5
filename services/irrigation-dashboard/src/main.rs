//! Irrigation dashboard CLI
//!
//! Terminal front end for the irrigation monitoring dashboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use irrigation_dashboard::i18n::Language;
use irrigation_dashboard::{console_controller, load_config, Config, IrrigationCommand};
use tokio::io::{AsyncBufRead, BufReader};
use tracing::Level;

#[derive(Parser)]
#[command(name = "irrigation-dashboard")]
#[command(about = "Live dashboard for the plant irrigation system")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Irrigation server base URL (overrides config file)
    #[arg(long)]
    server_url: Option<String>,

    /// Display language: ar or fr (overrides config file)
    #[arg(long)]
    language: Option<Language>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow push events and user actions from a file or stdin
    Watch {
        /// JSON-lines event file (defaults to stdin)
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Send an irrigation command: start, stop or status
    Send { command: IrrigationCommand },

    /// Interpret a voice transcript and send the matching command
    Voice { transcript: String },

    /// Fetch and show the latest plant photo
    Image,

    /// Cache the dashboard assets and serve them cache-first
    Offline {
        /// Listen port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, server_url={:?}, language={:?}, log_level={:?}",
        args.config,
        args.server_url,
        args.language,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(server_url) = args.server_url {
        config.server.base_url = server_url;
    }
    if let Some(language) = args.language {
        config.language = language;
    }
    config.validate()?;

    match args.command {
        Commands::Watch { events } => {
            let input: Box<dyn AsyncBufRead + Unpin> = match events {
                Some(path) => {
                    tracing::debug!("Reading events from {:?}", path);
                    Box::new(BufReader::new(tokio::fs::File::open(path).await?))
                }
                None => Box::new(BufReader::new(tokio::io::stdin())),
            };
            irrigation_dashboard::watch(&config, input).await?;
        }
        Commands::Send { command } => {
            let mut controller = console_controller(&config);
            let request = controller.press_button(command);
            controller.complete(request).await;
        }
        Commands::Voice { transcript } => {
            let mut controller = console_controller(&config);
            controller.begin_listening();
            let request = controller.on_voice_result(&transcript);
            controller.on_voice_end();
            if let Some(request) = request {
                controller.complete(request).await;
            }
        }
        Commands::Image => {
            let mut controller = console_controller(&config);
            controller.refresh_latest_image().await;
        }
        Commands::Offline { port } => {
            if let Some(port) = port {
                config.offline_cache.port = port;
            }
            tracing::info!("Starting offline asset cache '{}'", config.offline_cache.name);
            irrigation_dashboard::serve_offline(&config).await?;
        }
    }

    Ok(())
}
