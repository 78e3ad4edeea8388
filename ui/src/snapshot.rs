//! Immutable projection of the view state handed to the render layer.

use crate::slideshow::ReturnTarget;
use crate::view_state::ViewMode;
use api_client::Album;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub mode: ViewMode,
    pub username: Option<String>,
    pub login_error: Option<String>,
    pub albums: Vec<Album>,
    pub album_list_hidden: bool,
    pub active_album: Option<Album>,
    pub photos: Vec<String>,
    /// Album-view cursor, shared with the slideshow.
    pub cursor: Option<usize>,
    pub quick_preview: Option<QuickPreviewView>,
    pub slideshow: Option<SlideshowView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickPreviewView {
    pub index: usize,
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideshowView {
    pub playing: bool,
    pub speed_seconds: u32,
    pub controls_visible: bool,
    pub return_target: ReturnTarget,
    pub photo: Option<String>,
}

impl ViewSnapshot {
    pub fn current_photo(&self) -> Option<&str> {
        self.cursor
            .and_then(|i| self.photos.get(i))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let snap = ViewSnapshot {
            mode: ViewMode::Album,
            username: Some("alice".into()),
            login_error: None,
            albums: Vec::new(),
            album_list_hidden: false,
            active_album: None,
            photos: vec!["a.jpg".into(), "b.jpg".into()],
            cursor: Some(1),
            quick_preview: None,
            slideshow: Some(SlideshowView {
                playing: true,
                speed_seconds: 7,
                controls_visible: false,
                return_target: ReturnTarget::Top,
                photo: Some("b.jpg".into()),
            }),
        };
        assert_eq!(snap.current_photo(), Some("b.jpg"));
        let value = serde_json::to_value(&snap).unwrap();
        assert_eq!(value["mode"], "Album");
        assert_eq!(value["cursor"], 1);
        assert_eq!(value["slideshow"]["return_target"], "Top");
        assert!(value["quick_preview"].is_null());
    }
}
