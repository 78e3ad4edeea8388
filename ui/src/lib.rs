//! View-state core of the album viewer.
//!
//! [`ViewStateMachine`] owns the album catalog and both overlay controllers
//! and is the single entry point for user input, timer ticks and session
//! events. Rendering is left to the caller, which redraws from
//! [`ViewStateMachine::snapshot`] after each call.

mod catalog;
pub mod index_cycle;
mod keys;
mod quick_preview;
mod slideshow;
mod snapshot;
#[cfg(test)]
mod test_support;
mod timer;
mod view_state;

pub use catalog::AlbumCatalog;
pub use keys::{Action, Key};
pub use quick_preview::QuickPreviewController;
pub use slideshow::{
    clamp_speed, ReturnTarget, SlideshowController, SlideshowTick, DEFAULT_SPEED_SECONDS,
    MAX_SPEED_SECONDS, MIN_SPEED_SECONDS, OVERLAY_HIDE_DELAY, SPEED_STEP_SECONDS,
};
pub use snapshot::{QuickPreviewView, SlideshowView, ViewSnapshot};
pub use timer::{Timer, TimerEffect, TimerId, TimerKind};
pub use view_state::{Effect, ViewMode, ViewStateMachine};

use api_client::{Album, ApiClient, ApiClientError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Login failed: {0}")]
    Auth(String),
    #[error("Remote Error: {0}")]
    Remote(String),
    #[error("Album not found: {0}")]
    NotFound(String),
}

impl ViewError {
    /// The message without the error kind prefix.
    pub fn detail(&self) -> String {
        match self {
            ViewError::Auth(msg) | ViewError::Remote(msg) | ViewError::NotFound(msg) => msg.clone(),
        }
    }
}

/// The remote calls the view core depends on.
///
/// Implemented for [`ApiClient`]; tests substitute an in-memory source.
#[allow(async_fn_in_trait)]
pub trait PhotoSource {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiClientError>;
    async fn logout(&self) -> Result<(), ApiClientError>;
    /// Username of the current session.
    async fn current_user(&self) -> Result<String, ApiClientError>;
    async fn list_albums(&self) -> Result<Vec<Album>, ApiClientError>;
    async fn album_contents(&self, album_id: &str) -> Result<Vec<String>, ApiClientError>;
}

impl PhotoSource for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiClientError> {
        ApiClient::login(self, username, password).await
    }

    async fn logout(&self) -> Result<(), ApiClientError> {
        ApiClient::logout(self).await
    }

    async fn current_user(&self) -> Result<String, ApiClientError> {
        self.me().await
    }

    async fn list_albums(&self) -> Result<Vec<Album>, ApiClientError> {
        ApiClient::list_albums(self).await
    }

    async fn album_contents(&self, album_id: &str) -> Result<Vec<String>, ApiClientError> {
        ApiClient::album_contents(self, album_id).await
    }
}
