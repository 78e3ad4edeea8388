use crate::PhotoSource;
use api_client::{Album, ApiClientError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory album server. Albums listed without contents fail to load.
pub(crate) struct FakeSource {
    albums: Vec<Album>,
    contents: HashMap<String, Vec<String>>,
    password: String,
    session: RefCell<Option<String>>,
    fail_albums: bool,
    fail_logout: bool,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            albums: Vec::new(),
            contents: HashMap::new(),
            password: "secret".into(),
            session: RefCell::new(None),
            fail_albums: false,
            fail_logout: false,
        }
    }

    pub fn with_album(mut self, id: &str, photos: &[&str]) -> Self {
        self = self.with_listed_album(id);
        self.contents
            .insert(id.to_string(), photos.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn with_listed_album(mut self, id: &str) -> Self {
        self.albums.push(Album {
            id: id.to_string(),
            title: id.to_uppercase(),
        });
        self
    }

    pub fn with_session(self, user: &str) -> Self {
        *self.session.borrow_mut() = Some(user.to_string());
        self
    }

    pub fn failing_albums(mut self) -> Self {
        self.fail_albums = true;
        self
    }

    pub fn failing_logout(mut self) -> Self {
        self.fail_logout = true;
        self
    }

    pub fn session(&self) -> Option<String> {
        self.session.borrow().clone()
    }
}

impl PhotoSource for FakeSource {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiClientError> {
        if password != self.password {
            return Err(ApiClientError::Unauthorized("Invalid username/password".into()));
        }
        *self.session.borrow_mut() = Some(username.to_string());
        Ok(username.to_string())
    }

    async fn logout(&self) -> Result<(), ApiClientError> {
        *self.session.borrow_mut() = None;
        if self.fail_logout {
            return Err(ApiClientError::RequestError("connection reset".into()));
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<String, ApiClientError> {
        self.session
            .borrow()
            .clone()
            .ok_or_else(|| ApiClientError::Unauthorized("Not authenticated".into()))
    }

    async fn list_albums(&self) -> Result<Vec<Album>, ApiClientError> {
        if self.fail_albums {
            return Err(ApiClientError::ServerError {
                status: 500,
                detail: "albums unavailable".into(),
            });
        }
        Ok(self.albums.clone())
    }

    async fn album_contents(&self, album_id: &str) -> Result<Vec<String>, ApiClientError> {
        self.contents
            .get(album_id)
            .cloned()
            .ok_or_else(|| ApiClientError::ServerError {
                status: 404,
                detail: "Album not found".into(),
            })
    }
}
