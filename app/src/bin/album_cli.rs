use api_client::{ApiClient, MediaKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_appender::rolling;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

#[path = "../config.rs"]
mod config;

const PASSWORD_ENV: &str = "ALBUMVIEW_PASSWORD";

#[derive(Parser)]
#[command(name = "album_cli", author, version, about = "Album server command line client")]
struct Cli {
    /// Override the album server URL, including any root path
    #[arg(long)]
    server_url: Option<String>,
    /// Username to sign in with
    #[arg(long)]
    username: Option<String>,
    /// Password to sign in with (falls back to ALBUMVIEW_PASSWORD)
    #[arg(long)]
    password: Option<String>,
    /// Override log level (e.g. info, debug)
    #[arg(long)]
    log_level: Option<String>,
    /// Directory for the rolling log file
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and print the session user
    Login,
    /// List all albums
    Albums,
    /// List the photos of an album in server order
    Contents {
        /// ID of the album
        album: String,
    },
    /// Print the URL of a photo artifact without contacting the server
    Url {
        /// thumbnail, preview or download
        kind: MediaKind,
        /// ID of the album
        album: String,
        /// Photo file name
        photo: String,
    },
    /// Sign out of the server
    Logout,
}

#[cfg_attr(feature = "trace-spans", tracing::instrument)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = config::AppConfigOverrides {
        server_url: cli.server_url.clone(),
        username: cli.username.clone(),
        log_level: cli.log_level.clone(),
        slideshow_speed_seconds: None,
        log_dir: cli.log_dir.clone(),
    };
    let cfg = config::AppConfig::load_from(cli.config.clone()).apply_overrides(&overrides);
    std::fs::create_dir_all(&cfg.log_dir)?;
    let file_appender = rolling::daily(&cfg.log_dir, "album_cli.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cfg.log_level.clone()))
        .with_writer(std::io::stderr.and(file_writer))
        .init();

    let client = ApiClient::new(&cfg.server_url)?;
    let password = cli
        .password
        .clone()
        .or_else(|| std::env::var(PASSWORD_ENV).ok());

    match cli.command {
        Commands::Url { kind, album, photo } => {
            println!("{}", client.media_url(kind, &album, &photo)?);
        }
        Commands::Login => {
            let user = sign_in(&client, cfg.username.as_deref(), password.as_deref()).await?;
            println!("Logged in as {}", user);
        }
        Commands::Albums => {
            sign_in(&client, cfg.username.as_deref(), password.as_deref()).await?;
            let albums = client.list_albums().await?;
            if albums.is_empty() {
                println!("No albums");
            }
            for album in albums {
                println!("{} (id: {})", album.title, album.id);
            }
        }
        Commands::Contents { album } => {
            sign_in(&client, cfg.username.as_deref(), password.as_deref()).await?;
            for photo in client.album_contents(&album).await? {
                println!("{}", photo);
            }
        }
        Commands::Logout => {
            sign_in(&client, cfg.username.as_deref(), password.as_deref()).await?;
            client.logout().await?;
            println!("Logged out");
        }
    }

    Ok(())
}

/// Every invocation is a fresh cookie jar, so commands that talk to the
/// server sign in first.
async fn sign_in(
    client: &ApiClient,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<String, Box<dyn std::error::Error>> {
    match (username, password) {
        (Some(username), Some(password)) => Ok(client.login(username, password).await?),
        _ => Err(format!("--username and --password (or {}) are required", PASSWORD_ENV).into()),
    }
}
