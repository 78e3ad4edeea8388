//! Album list, active album and its photos.

use crate::index_cycle;
use crate::{PhotoSource, ViewError};
use api_client::Album;

/// Owns the fetched albums and the photo collection of the active album,
/// together with the album-view cursor that indexes into it.
#[derive(Debug, Default)]
pub struct AlbumCatalog {
    albums: Vec<Album>,
    active: Option<Album>,
    photos: Vec<String>,
    cursor: usize,
}

impl AlbumCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn active_album(&self) -> Option<&Album> {
        self.active.as_ref()
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn contains(&self, album_id: &str) -> bool {
        self.albums.iter().any(|a| a.id == album_id)
    }

    /// Cursor into the active collection; `None` while it is empty.
    pub fn cursor(&self) -> Option<usize> {
        (!self.photos.is_empty()).then_some(self.cursor)
    }

    pub fn photo(&self, index: usize) -> Option<&str> {
        self.photos.get(index).map(String::as_str)
    }

    pub fn current_photo(&self) -> Option<&str> {
        self.cursor().and_then(|i| self.photo(i))
    }

    /// Replaces the album list. The active album is left alone.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip_all))]
    pub async fn load_albums<S: PhotoSource>(&mut self, source: &S) -> Result<&[Album], ViewError> {
        let albums = source
            .list_albums()
            .await
            .map_err(|e| ViewError::Remote(e.detail()))?;
        tracing::info!("Loaded {} albums", albums.len());
        self.albums = albums;
        Ok(&self.albums)
    }

    /// Makes `album_id` the active album and fetches its photos.
    ///
    /// On failure the previous album, photos and cursor stay in place.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self, source)))]
    pub async fn select_album<S: PhotoSource>(
        &mut self,
        source: &S,
        album_id: &str,
    ) -> Result<&[String], ViewError> {
        let album = self
            .albums
            .iter()
            .find(|a| a.id == album_id)
            .cloned()
            .ok_or_else(|| ViewError::NotFound(album_id.to_string()))?;
        let photos = source.album_contents(&album.id).await.map_err(|e| {
            tracing::error!(album = %album.id, error = %e, "Failed to fetch album contents");
            ViewError::Remote(e.detail())
        })?;
        tracing::debug!(album = %album.id, photos = photos.len(), "Album selected");
        self.active = Some(album);
        self.photos = photos;
        self.cursor = 0;
        Ok(&self.photos)
    }

    /// Absolute jump, wrapped into range. No-op on an empty collection.
    pub fn set_cursor(&mut self, index: i64) -> Option<usize> {
        let cursor = index_cycle::jump(index, self.photos.len())?;
        self.cursor = cursor;
        Some(cursor)
    }

    pub fn step_cursor(&mut self, delta: i64) -> Option<usize> {
        let cursor = index_cycle::step(self.cursor, delta, self.photos.len())?;
        self.cursor = cursor;
        Some(cursor)
    }

    /// Forgets everything, used when the session ends.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
