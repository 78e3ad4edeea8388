//! Plain-text rendering of a [`ViewSnapshot`].

use std::fmt::Write;
use ui::{ReturnTarget, ViewMode, ViewSnapshot};

pub fn render(snap: &ViewSnapshot) -> String {
    let mut out = String::new();
    match snap.mode {
        ViewMode::Login => {
            out.push_str("== Sign in ==\n");
            if let Some(err) = &snap.login_error {
                let _ = writeln!(out, "! {}", err);
            }
            out.push_str("login <user> <password>\n");
            return out;
        }
        ViewMode::Top => render_top(snap, &mut out),
        ViewMode::Album => render_album(snap, &mut out),
    }
    if let Some(preview) = &snap.quick_preview {
        let _ = writeln!(
            out,
            "[preview {}/{}] {}",
            preview.index + 1,
            snap.photos.len(),
            preview.photo
        );
    }
    if let Some(show) = &snap.slideshow {
        let state = if show.playing { "playing" } else { "paused" };
        let _ = write!(
            out,
            "[slideshow {} {}s] {}",
            state,
            show.speed_seconds,
            show.photo.as_deref().unwrap_or("-")
        );
        if show.controls_visible {
            let back = match show.return_target {
                ReturnTarget::Top => "top",
                ReturnTarget::Album => "album",
            };
            let _ = write!(out, "  (left/right, space, [ ], esc -> {})", back);
        }
        out.push('\n');
    }
    out
}

fn render_top(snap: &ViewSnapshot, out: &mut String) {
    let _ = writeln!(
        out,
        "== Albums == {}",
        snap.username.as_deref().unwrap_or_default()
    );
    if !snap.album_list_hidden {
        for album in &snap.albums {
            let marker = match &snap.active_album {
                Some(active) if active.id == album.id => '*',
                _ => ' ',
            };
            let _ = writeln!(out, "{} {} ({})", marker, album.title, album.id);
        }
    }
    if let Some(active) = &snap.active_album {
        let _ = writeln!(out, "-- {} ({} photos)", active.title, snap.photos.len());
        for (i, photo) in snap.photos.iter().enumerate() {
            let _ = writeln!(out, "  {:>3} {}", i, photo);
        }
    }
}

fn render_album(snap: &ViewSnapshot, out: &mut String) {
    let title = snap
        .active_album
        .as_ref()
        .map(|a| a.title.as_str())
        .unwrap_or_default();
    match (snap.cursor, snap.current_photo()) {
        (Some(cursor), Some(photo)) => {
            let _ = writeln!(
                out,
                "== {} == {}/{} {}",
                title,
                cursor + 1,
                snap.photos.len(),
                photo
            );
        }
        _ => {
            let _ = writeln!(out, "== {} == (empty)", title);
        }
    }
}
