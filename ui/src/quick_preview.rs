//! Lightweight preview overlay shown over the top view.

use crate::index_cycle;

#[derive(Debug, Default)]
pub struct QuickPreviewController {
    open: bool,
    index: usize,
}

impl QuickPreviewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the previewed photo while open.
    pub fn index(&self) -> Option<usize> {
        self.open.then_some(self.index)
    }

    /// Opens at `at`. There is nothing to show in an empty album, so this
    /// returns `false` and stays closed.
    pub fn open(&mut self, at: usize, len: usize) -> bool {
        let Ok(at) = i64::try_from(at) else {
            return false;
        };
        let Some(index) = index_cycle::jump(at, len) else {
            return false;
        };
        self.open = true;
        self.index = index;
        true
    }

    /// Returns whether the preview was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn next(&mut self, len: usize) {
        self.step(1, len);
    }

    pub fn prev(&mut self, len: usize) {
        self.step(-1, len);
    }

    fn step(&mut self, delta: i64, len: usize) {
        if !self.open {
            return;
        }
        if let Some(index) = index_cycle::step(self.index, delta, len) {
            self.index = index;
        }
    }

    /// Closes the preview and yields its index as the new album cursor.
    pub fn promote(&mut self) -> Option<usize> {
        let index = self.index()?;
        self.open = false;
        Some(index)
    }
}
