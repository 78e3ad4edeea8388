//! API client module for the album server session API.

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionUser {
    username: String,
}

/// Media variants served by the album server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Thumbnail,
    Preview,
    Download,
}

impl MediaKind {
    fn route(self) -> &'static str {
        match self {
            MediaKind::Thumbnail => "thumbnails",
            MediaKind::Preview => "previews",
            MediaKind::Download => "download",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            MediaKind::Thumbnail => "thumbnail",
            MediaKind::Preview => "preview",
            MediaKind::Download => "download",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "thumbnail" | "thumb" => Ok(MediaKind::Thumbnail),
            "preview" => Ok(MediaKind::Preview),
            "download" | "full" => Ok(MediaKind::Download),
            other => Err(format!("unknown media kind: {}", other)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("Request Error: {0}")]
    RequestError(String),
    #[error("Not authenticated: {0}")]
    Unauthorized(String),
    #[error("Server Error ({status}): {detail}")]
    ServerError { status: u16, detail: String },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiClientError {
    /// Human readable detail as reported by the server, without the prefix.
    pub fn detail(&self) -> String {
        match self {
            ApiClientError::RequestError(msg)
            | ApiClientError::Unauthorized(msg)
            | ApiClientError::InvalidUrl(msg) => msg.clone(),
            ApiClientError::ServerError { detail, .. } => detail.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiClientError {
    fn from(e: reqwest::Error) -> Self {
        ApiClientError::RequestError(e.to_string())
    }
}

/// Session-cookie based client for the album server.
///
/// The server hands out an `albums_session` cookie on login; the client keeps
/// it in reqwest's cookie store so every later call is authenticated.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client rooted at `base_url`, e.g. `http://host:8080/albums`.
    pub fn new(base_url: &str) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(ApiClientError::from)?;
        Self::with_client(client, base_url)
    }

    /// Create a client reusing an existing reqwest client. Mainly used for testing.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ApiClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url =
            Url::parse(trimmed).map_err(|e| ApiClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(ApiClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build the URL of a media artifact. Album id and photo name are each
    /// encoded as a single path segment.
    pub fn media_url(&self, kind: MediaKind, album_id: &str, photo: &str) -> Result<String, ApiClientError> {
        self.endpoint(&[kind.route(), album_id, photo])
            .map(String::from)
    }

    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip_all))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiClientError> {
        let url = self.endpoint(&["login"])?;
        let response = self
            .client
            .post(url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let user: SessionUser = check(response).await?.json().await?;
        tracing::info!(username = %user.username, "Logged in");
        Ok(user.username)
    }

    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip_all))]
    pub async fn logout(&self) -> Result<(), ApiClientError> {
        let url = self.endpoint(&["logout"])?;
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body("{}")
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// Returns the signed-in username, or `Unauthorized` without a valid session.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip_all))]
    pub async fn me(&self) -> Result<String, ApiClientError> {
        let url = self.endpoint(&["me"])?;
        let response = self.client.get(url).send().await?;
        let user: SessionUser = check(response).await?.json().await?;
        Ok(user.username)
    }

    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip_all))]
    pub async fn list_albums(&self) -> Result<Vec<Album>, ApiClientError> {
        let url = self.endpoint(&["albums"])?;
        let response = self.client.get(url).send().await?;
        let albums: Vec<Album> = check(response).await?.json().await?;
        tracing::debug!(count = albums.len(), "Fetched album list");
        Ok(albums)
    }

    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self)))]
    pub async fn album_contents(&self, album_id: &str) -> Result<Vec<String>, ApiClientError> {
        let url = self.endpoint(&["album", album_id, "contents"])?;
        let response = self.client.get(url).send().await?;
        let photos: Vec<String> = check(response).await?.json().await?;
        tracing::debug!(album = album_id, count = photos.len(), "Fetched album contents");
        Ok(photos)
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = error_detail(&body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiClientError::Unauthorized(detail)),
        _ => Err(ApiClientError::ServerError {
            status: status.as_u16(),
            detail,
        }),
    }
}

/// Pull the `detail` field out of an error body, falling back to the body itself.
fn error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(serde_json::Value::String(_)) | Some(serde_json::Value::Null) | None => {
                Some(trimmed.to_string())
            }
            Some(other) => Some(other.to_string()),
        },
        _ => Some(trimmed.to_string()),
    }
}
