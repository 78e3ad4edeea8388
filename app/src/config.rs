use config::{Environment, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
const DEFAULT_SLIDESHOW_SPEED: u32 = 7;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub server_url: String,
    pub username: Option<String>,
    pub log_level: String,
    pub slideshow_speed_seconds: u32,
    pub log_dir: PathBuf,
}

#[derive(Debug, Default)]
pub struct AppConfigOverrides {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub log_level: Option<String>,
    pub slideshow_speed_seconds: Option<u32>,
    pub log_dir: Option<PathBuf>,
}

fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".albumview")
}

pub fn default_config_path() -> PathBuf {
    app_dir().join("config")
}

impl AppConfig {
    /// Reads `path` (TOML, optional) and `ALBUMVIEW_*` variables on top of it.
    pub fn load_from(path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(default_config_path);
        let cfg = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("ALBUMVIEW"))
            .build()
            .unwrap_or_else(|e| {
                eprintln!("Ignoring unreadable config: {}", e);
                config::Config::default()
            });

        let server_url = cfg
            .get_string("server_url")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        let username = cfg.get_string("username").ok().filter(|u| !u.is_empty());
        let log_level = cfg
            .get_string("log_level")
            .unwrap_or_else(|_| "info".to_string());
        let slideshow_speed_seconds = cfg
            .get_int("slideshow_speed_seconds")
            .map(ui::clamp_speed)
            .unwrap_or(DEFAULT_SLIDESHOW_SPEED);
        let log_dir = cfg
            .get_string("log_dir")
            .map(PathBuf::from)
            .unwrap_or_else(|_| app_dir());

        Self {
            server_url: normalize_server_url(&server_url),
            username,
            log_level,
            slideshow_speed_seconds,
            log_dir,
        }
    }

    pub fn apply_overrides(mut self, ov: &AppConfigOverrides) -> Self {
        if let Some(url) = &ov.server_url {
            self.server_url = normalize_server_url(url);
        }
        if let Some(user) = &ov.username {
            self.username = Some(user.clone());
        }
        if let Some(l) = &ov.log_level {
            self.log_level = l.clone();
        }
        if let Some(s) = ov.slideshow_speed_seconds {
            self.slideshow_speed_seconds = ui::clamp_speed(s as i64);
        }
        if let Some(d) = &ov.log_dir {
            self.log_dir = d.clone();
        }
        self
    }

    pub fn save_to(&self, path: Option<PathBuf>) -> std::io::Result<()> {
        let path = path.unwrap_or_else(default_config_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = toml::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, data)
    }
}

/// Trailing slashes are dropped so endpoint paths join cleanly.
pub fn normalize_server_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
