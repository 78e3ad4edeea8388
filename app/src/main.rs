//! Interactive terminal front end for the album viewer.

mod commands;
mod config;
mod render;
mod timers;

use api_client::ApiClient;
use clap::Parser;
use commands::Command;
use std::io::BufRead;
use std::path::PathBuf;
use timers::TimerDriver;
use tokio::sync::mpsc;
use tokio::task::LocalSet;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;
use ui::{Effect, TimerId, ViewMode, ViewStateMachine};

#[derive(Parser)]
#[command(name = "albumview", author, version, about = "Terminal album viewer")]
struct Cli {
    /// Override the album server URL, including any root path
    #[arg(long)]
    server_url: Option<String>,
    /// Username suggested on the login screen
    #[arg(long)]
    username: Option<String>,
    /// Override log level (e.g. info, debug)
    #[arg(long)]
    log_level: Option<String>,
    /// Initial slideshow speed in seconds
    #[arg(long)]
    speed: Option<u32>,
    /// Directory for the rolling log file
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the effective configuration back to the config file
    #[arg(long)]
    save_config: bool,
    /// Enable tokio console for debugging
    #[arg(long)]
    debug_console: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = config::AppConfigOverrides {
        server_url: cli.server_url.clone(),
        username: cli.username.clone(),
        log_level: cli.log_level.clone(),
        slideshow_speed_seconds: cli.speed,
        log_dir: cli.log_dir.clone(),
    };
    let cfg = config::AppConfig::load_from(cli.config.clone()).apply_overrides(&overrides);
    if cli.save_config {
        cfg.save_to(cli.config.clone())?;
    }
    let _guard = init_tracing(&cfg, cli.debug_console)?;

    let local = LocalSet::new();
    local.run_until(run(cfg)).await
}

fn init_tracing(
    cfg: &config::AppConfig,
    debug_console: bool,
) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&cfg.log_dir)?;
    let file_appender = rolling::daily(&cfg.log_dir, "albumview.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    if debug_console {
        #[cfg(feature = "tokio-console")]
        {
            use tracing_subscriber::prelude::*;
            tracing_subscriber::registry()
                .with(console_subscriber::spawn())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(file_writer)
                        .with_filter(EnvFilter::new(cfg.log_level.clone())),
                )
                .init();
            return Ok(guard);
        }
        #[cfg(not(feature = "tokio-console"))]
        eprintln!("Built without the tokio-console feature, ignoring --debug-console");
    }

    // stdout carries the rendered views
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cfg.log_level.clone()))
        .with_writer(std::io::stderr.with_max_level(tracing::Level::WARN).and(file_writer))
        .init();
    Ok(guard)
}

async fn run(cfg: config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::new(&cfg.server_url)?;
    tracing::info!(server = %cfg.server_url, "Starting album viewer");

    // Blocking stdin reads live on their own thread so quitting never waits on input.
    let (line_tx, mut line_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read input");
                    break;
                }
            }
        }
    });

    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let mut viewer = Viewer {
        view: ViewStateMachine::with_speed(client, cfg.slideshow_speed_seconds),
        timers: TimerDriver::new(tick_tx),
        username: cfg.username.clone(),
    };

    if let Err(e) = viewer.view.boot().await {
        println!("! {}", e);
    }
    viewer.flush();
    viewer.draw();

    loop {
        tokio::select! {
            line = line_rx.recv() => {
                let Some(line) = line else { break };
                match commands::parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => viewer.handle(command).await,
                    Ok(None) => {}
                    Err(e) => println!("! {} (try `help`)", e),
                }
            }
            Some(id) = tick_rx.recv() => viewer.tick(id),
        }
    }

    viewer.timers.shutdown();
    tracing::info!("Album viewer stopped");
    Ok(())
}

struct Viewer {
    view: ViewStateMachine<ApiClient>,
    timers: TimerDriver,
    username: Option<String>,
}

impl Viewer {
    async fn handle(&mut self, command: Command) {
        let result = match command {
            Command::Login { username, password } => self.view.login(&username, &password).await,
            Command::Logout => {
                self.view.logout().await;
                Ok(())
            }
            Command::Refresh => self.view.refresh_albums().await,
            Command::SelectAlbum { id, enter } => self.view.select_album(&id, enter).await,
            Command::Key(key) => {
                if !self.view.handle_key(key) {
                    tracing::debug!(?key, "Key not handled");
                }
                Ok(())
            }
            Command::Action(action) => {
                self.view.dispatch(action);
                Ok(())
            }
            Command::Url(kind) => {
                self.print_url(kind);
                return;
            }
            Command::Status => {
                match serde_json::to_string_pretty(&self.view.snapshot()) {
                    Ok(json) => println!("{}", json),
                    Err(e) => println!("! {}", e),
                }
                return;
            }
            Command::Help => {
                println!("{}", commands::HELP);
                return;
            }
            Command::Quit => return,
        };
        if let Err(e) = result {
            println!("! {}", e);
        }
        self.flush();
        self.draw();
    }

    fn tick(&mut self, id: TimerId) {
        let changed = self.view.on_timer(id);
        self.flush();
        if changed {
            self.draw();
        }
    }

    fn flush(&mut self) {
        for effect in self.view.drain_effects() {
            match effect {
                Effect::Timer(timer) => self.timers.apply(timer),
                Effect::Toast { message, duration } => {
                    tracing::trace!(?duration, "Toast");
                    println!("» {}", message);
                }
            }
        }
    }

    fn draw(&self) {
        let snap = self.view.snapshot();
        print!("{}", render::render(&snap));
        if snap.mode == ViewMode::Login {
            if let Some(user) = &self.username {
                println!("(last user: {})", user);
            }
        }
    }

    fn print_url(&self, kind: api_client::MediaKind) {
        let snap = self.view.snapshot();
        let photo = snap
            .slideshow
            .as_ref()
            .and_then(|s| s.photo.clone())
            .or_else(|| snap.quick_preview.as_ref().map(|q| q.photo.clone()))
            .or_else(|| snap.current_photo().map(str::to_string));
        match (snap.active_album, photo) {
            (Some(album), Some(photo)) => {
                match self.view.source().media_url(kind, &album.id, &photo) {
                    Ok(url) => println!("{}", url),
                    Err(e) => println!("! {}", e),
                }
            }
            _ => println!("! No photo selected"),
        }
    }
}
