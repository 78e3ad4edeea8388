//! Top-level coordinator of base views and overlays.

use crate::catalog::AlbumCatalog;
use crate::keys::{Action, Key};
use crate::quick_preview::QuickPreviewController;
use crate::slideshow::{
    ReturnTarget, SlideshowController, SlideshowTick, DEFAULT_SPEED_SECONDS, SPEED_STEP_SECONDS,
};
use crate::snapshot::{QuickPreviewView, SlideshowView, ViewSnapshot};
use crate::timer::{TimerEffect, TimerId};
use crate::{PhotoSource, ViewError};
use serde::Serialize;
use std::time::Duration;

const TOGGLE_TOAST_DURATION: Duration = Duration::from_millis(900);
const SPEED_TOAST_DURATION: Duration = Duration::from_millis(1100);

/// Exclusive base layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewMode {
    Login,
    Top,
    Album,
}

/// Side effects the runtime has to carry out after a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Timer(TimerEffect),
    Toast { message: String, duration: Duration },
}

pub struct ViewStateMachine<S> {
    source: S,
    mode: ViewMode,
    catalog: AlbumCatalog,
    quick: QuickPreviewController,
    slideshow: SlideshowController,
    album_list_hidden: bool,
    username: Option<String>,
    login_error: Option<String>,
    effects: Vec<Effect>,
}

impl<S: PhotoSource> ViewStateMachine<S> {
    pub fn new(source: S) -> Self {
        Self::with_speed(source, DEFAULT_SPEED_SECONDS)
    }

    /// Starts on the login screen with the given initial slideshow speed.
    pub fn with_speed(source: S, speed_seconds: u32) -> Self {
        Self {
            source,
            mode: ViewMode::Login,
            catalog: AlbumCatalog::new(),
            quick: QuickPreviewController::new(),
            slideshow: SlideshowController::new(speed_seconds),
            album_list_hidden: false,
            username: None,
            login_error: None,
            effects: Vec::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn catalog(&self) -> &AlbumCatalog {
        &self.catalog
    }

    pub fn quick_preview(&self) -> &QuickPreviewController {
        &self.quick
    }

    pub fn slideshow(&self) -> &SlideshowController {
        &self.slideshow
    }

    /// Effects accumulated since the last drain, in order.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let quick_preview = self.quick.index().and_then(|index| {
            self.catalog.photo(index).map(|photo| QuickPreviewView {
                index,
                photo: photo.to_string(),
            })
        });
        let slideshow = self.slideshow.is_open().then(|| SlideshowView {
            playing: self.slideshow.is_playing(),
            speed_seconds: self.slideshow.speed_seconds(),
            controls_visible: self.slideshow.controls_visible(),
            return_target: self.slideshow.return_target(),
            photo: self.catalog.current_photo().map(str::to_string),
        });
        ViewSnapshot {
            mode: self.mode,
            username: self.username.clone(),
            login_error: self.login_error.clone(),
            albums: self.catalog.albums().to_vec(),
            album_list_hidden: self.album_list_hidden,
            active_album: self.catalog.active_album().cloned(),
            photos: self.catalog.photos().to_vec(),
            cursor: self.catalog.cursor(),
            quick_preview,
            slideshow,
        }
    }

    /// Resumes an existing session, or shows the login form without one.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip_all))]
    pub async fn boot(&mut self) -> Result<(), ViewError> {
        match self.source.current_user().await {
            Ok(user) => self.enter_app(user).await,
            Err(e) => {
                tracing::debug!(error = %e, "No active session");
                self.show_login(None);
                Ok(())
            }
        }
    }

    /// A rejected login keeps the login screen up with the server's message,
    /// as does a failure to load the albums right after signing in.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip_all))]
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ViewError> {
        match self.source.login(username, password).await {
            Ok(user) => {
                let result = self.enter_app(user).await;
                if let Err(e) = &result {
                    // a half-loaded session goes back to the login form
                    tracing::warn!(error = %e, "Loading albums after login failed");
                    self.username = None;
                    self.catalog.clear();
                    self.show_login(Some(e.detail()));
                }
                result
            }
            Err(e) => {
                let mut message = e.detail();
                if message.is_empty() {
                    message = "Login failed".to_string();
                }
                tracing::warn!(username, error = %message, "Login rejected");
                self.show_login(Some(message.clone()));
                Err(ViewError::Auth(message))
            }
        }
    }

    /// Always ends on the login screen, even if the server call fails.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip_all))]
    pub async fn logout(&mut self) {
        if let Err(e) = self.source.logout().await {
            tracing::warn!(error = %e, "Logout request failed");
        }
        self.username = None;
        self.catalog.clear();
        self.show_login(None);
    }

    async fn enter_app(&mut self, user: String) -> Result<(), ViewError> {
        tracing::info!(username = %user, "Session active");
        self.username = Some(user);
        self.login_error = None;
        self.show_top();
        self.refresh_albums().await?;
        let first = self.catalog.albums().first().map(|a| a.id.clone());
        if let Some(id) = first {
            self.select_album(&id, false).await?;
        }
        Ok(())
    }

    /// Ignored on the login screen, where there is no session to list with.
    pub async fn refresh_albums(&mut self) -> Result<(), ViewError> {
        if self.mode == ViewMode::Login {
            tracing::debug!("Ignoring album refresh on login screen");
            return Ok(());
        }
        self.catalog.load_albums(&self.source).await?;
        Ok(())
    }

    /// Single click (`enter_album_view == false`) keeps the current view;
    /// double click switches to the album view. Open overlays are closed
    /// before the collection is replaced.
    pub async fn select_album(&mut self, album_id: &str, enter_album_view: bool) -> Result<(), ViewError> {
        if self.mode == ViewMode::Login {
            tracing::debug!(album = album_id, "Ignoring album selection on login screen");
            return Ok(());
        }
        if !self.catalog.contains(album_id) {
            tracing::warn!(album = album_id, "Selected album is not in the catalog");
            return Err(ViewError::NotFound(album_id.to_string()));
        }
        self.close_overlays();
        self.catalog.select_album(&self.source, album_id).await?;
        if enter_album_view {
            self.show_album();
        }
        Ok(())
    }

    /// Returns `true` if the key was consumed by the active layer.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match self.resolve_key(key) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Maps a key to an action for the innermost active layer only.
    pub fn resolve_key(&self, key: Key) -> Option<Action> {
        if self.mode == ViewMode::Login {
            return None;
        }
        if self.slideshow.is_open() {
            return match key {
                Key::Escape => Some(Action::CloseSlideshow),
                Key::ArrowLeft => Some(Action::SlidePrev),
                Key::ArrowRight => Some(Action::SlideNext),
                Key::Space => Some(Action::TogglePlaying),
                Key::Char('[') => Some(Action::AdjustSpeed(-SPEED_STEP_SECONDS)),
                Key::Char(']') => Some(Action::AdjustSpeed(SPEED_STEP_SECONDS)),
                _ => None,
            };
        }
        if self.quick.is_open() {
            return match key {
                Key::Escape => Some(Action::CloseQuickPreview),
                Key::ArrowLeft => Some(Action::QuickPrev),
                Key::ArrowRight => Some(Action::QuickNext),
                Key::Enter => Some(Action::PromoteQuickPreview),
                _ => None,
            };
        }
        if self.mode == ViewMode::Album {
            return match key {
                Key::Escape => Some(Action::Back),
                Key::ArrowLeft => Some(Action::PrevPhoto),
                Key::ArrowRight => Some(Action::NextPhoto),
                _ => None,
            };
        }
        None
    }

    pub fn dispatch(&mut self, action: Action) {
        if self.mode == ViewMode::Login {
            tracing::debug!(?action, "Ignoring action on login screen");
            return;
        }
        tracing::debug!(?action, mode = ?self.mode, "Dispatch");
        let len = self.catalog.len();
        match action {
            Action::OpenQuickPreview(index) => self.open_quick_preview(index),
            Action::CloseQuickPreview => {
                self.quick.close();
            }
            Action::QuickPrev => self.quick.prev(len),
            Action::QuickNext => self.quick.next(len),
            Action::PromoteQuickPreview => {
                if let Some(index) = self.quick.promote() {
                    self.show_album();
                    if let Ok(index) = i64::try_from(index) {
                        self.catalog.set_cursor(index);
                    }
                }
            }
            Action::SetCursor(index) => {
                if self.mode == ViewMode::Album {
                    match i64::try_from(index) {
                        Ok(index) => {
                            self.catalog.set_cursor(index);
                        }
                        Err(_) => tracing::debug!(index, "Ignoring out of range cursor"),
                    }
                }
            }
            Action::PrevPhoto | Action::NextPhoto => {
                if self.mode == ViewMode::Album {
                    let delta = if action == Action::PrevPhoto { -1 } else { 1 };
                    self.catalog.step_cursor(delta);
                }
            }
            Action::Back => {
                if self.mode == ViewMode::Album {
                    self.show_top();
                }
            }
            Action::Play => self.play(),
            Action::CloseSlideshow => self.close_slideshow(),
            Action::SlidePrev | Action::SlideNext => {
                if self.slideshow.is_open() {
                    let delta = if action == Action::SlidePrev { -1 } else { 1 };
                    self.catalog.step_cursor(delta);
                }
            }
            Action::TogglePlaying => {
                if self.slideshow.is_open() {
                    let playing = self.slideshow.toggle_playing();
                    let message = if playing { "Playing" } else { "Paused" };
                    self.toast(message.to_string(), TOGGLE_TOAST_DURATION);
                    self.slideshow.register_activity();
                }
            }
            Action::AdjustSpeed(delta) => {
                if self.slideshow.is_open() {
                    let speed = self.slideshow.adjust_speed(delta);
                    self.toast(format!("Speed: {}s", speed), SPEED_TOAST_DURATION);
                    self.slideshow.register_activity();
                }
            }
            Action::SlideshowActivity => self.slideshow.register_activity(),
            Action::ToggleAlbumList => {
                self.album_list_hidden = !self.album_list_hidden;
            }
        }
        self.collect_timer_effects();
    }

    /// Feeds a timer tick back in. Ticks from cancelled or replaced timers
    /// are discarded; returns whether anything changed.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        let changed = match self.slideshow.on_timer(id) {
            Some(SlideshowTick::Advance) => self.catalog.step_cursor(1).is_some(),
            Some(SlideshowTick::HideControls) => true,
            None => {
                tracing::trace!(?id, "Discarding stale timer tick");
                false
            }
        };
        self.collect_timer_effects();
        changed
    }

    fn open_quick_preview(&mut self, index: usize) {
        if self.mode != ViewMode::Top {
            return;
        }
        if self.catalog.is_empty() {
            return;
        }
        self.slideshow.close();
        self.quick.open(index, self.catalog.len());
    }

    fn play(&mut self) {
        let target = match self.mode {
            ViewMode::Top => ReturnTarget::Top,
            ViewMode::Album => ReturnTarget::Album,
            ViewMode::Login => return,
        };
        if self.catalog.active_album().is_none() || self.catalog.is_empty() {
            tracing::debug!("Nothing to play");
            return;
        }
        if target == ReturnTarget::Top {
            self.catalog.set_cursor(0);
        }
        self.quick.close();
        self.slideshow.open(target);
    }

    /// Only the base view changes; the quick preview is left as it is.
    fn close_slideshow(&mut self) {
        if let Some(target) = self.slideshow.close() {
            self.mode = match target {
                ReturnTarget::Top => ViewMode::Top,
                ReturnTarget::Album => ViewMode::Album,
            };
        }
    }

    fn show_top(&mut self) {
        self.mode = ViewMode::Top;
        self.close_overlays();
    }

    fn show_album(&mut self) {
        self.mode = ViewMode::Album;
        self.close_overlays();
    }

    fn show_login(&mut self, error: Option<String>) {
        self.close_overlays();
        self.mode = ViewMode::Login;
        self.login_error = error;
    }

    fn close_overlays(&mut self) {
        self.quick.close();
        self.slideshow.close();
        self.collect_timer_effects();
    }

    fn toast(&mut self, message: String, duration: Duration) {
        self.effects.push(Effect::Toast { message, duration });
    }

    fn collect_timer_effects(&mut self) {
        self.effects
            .extend(self.slideshow.drain_effects().into_iter().map(Effect::Timer));
    }
}
