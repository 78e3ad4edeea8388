//! Keyboard keys and the user actions they resolve to.

/// Keys the viewer reacts to; everything else arrives as `Char` or is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Char(char),
}

impl Key {
    /// Parses a DOM-style key name (`"Escape"`, `"ArrowLeft"`, `" "`, `"["`).
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "Escape" | "Esc" => Some(Key::Escape),
            "ArrowLeft" | "Left" => Some(Key::ArrowLeft),
            "ArrowRight" | "Right" => Some(Key::ArrowRight),
            "Enter" => Some(Key::Enter),
            " " | "Space" | "Spacebar" => Some(Key::Space),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// Everything a user can do to the viewer apart from the session calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Click on a photo of the top-view thumbnail grid.
    OpenQuickPreview(usize),
    CloseQuickPreview,
    QuickPrev,
    QuickNext,
    /// Enter or double-click on the preview image.
    PromoteQuickPreview,
    /// Click on the album-view thumbnail strip.
    SetCursor(usize),
    PrevPhoto,
    NextPhoto,
    Back,
    Play,
    CloseSlideshow,
    SlidePrev,
    SlideNext,
    TogglePlaying,
    AdjustSpeed(i32),
    /// Pointer movement over the slideshow surface.
    SlideshowActivity,
    ToggleAlbumList,
}
