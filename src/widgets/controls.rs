//! Small page controls: contact form, back-to-top button, nav highlight and
//! the preloader.

use serde::{Deserialize, Serialize};

pub const CONTACT_CONFIRMATION: &str = "Thanks for your message! I'll get back to you as soon as possible.";

/// The contact form never sends anything: a submission only yields the
/// confirmation text, after which the fields are cleared.
pub fn submit_contact() -> &'static str {
    CONTACT_CONFIRMATION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackToTopOptions {
    /// Scroll offset in px past which the button shows.
    pub threshold: f64,
}

impl Default for BackToTopOptions {
    fn default() -> Self {
        Self { threshold: 500.0 }
    }
}

#[derive(Debug, Clone)]
pub struct BackToTop {
    threshold: f64,
    visible: bool,
}

impl BackToTop {
    pub fn new(options: &BackToTopOptions) -> Self {
        Self {
            threshold: options.threshold,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the new visibility when it flipped.
    pub fn scrolled(&mut self, scroll_y: f64) -> Option<bool> {
        let visible = scroll_y > self.threshold;
        (visible != self.visible).then(|| {
            self.visible = visible;
            visible
        })
    }
}

/// Last segment of a location path, the way nav links are written.
pub fn current_page(pathname: &str) -> &str {
    pathname.rsplit('/').next().unwrap_or("")
}

/// Whether a nav link's `href` points at the current page.
pub fn is_current(href: Option<&str>, pathname: &str) -> bool {
    href == Some(current_page(pathname))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloaderOptions {
    /// Time between fading the preloader and removing it.
    pub remove_after_ms: u32,
}

impl Default for PreloaderOptions {
    fn default() -> Self {
        Self { remove_after_ms: 800 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloaderState {
    Waiting,
    Fading,
    Removed,
}

/// Overlay shown until the window finishes loading.
#[derive(Debug, Clone)]
pub struct Preloader {
    state: PreloaderState,
    remove_after: f64,
    elapsed: f64,
}

impl Preloader {
    pub fn new(options: &PreloaderOptions) -> Self {
        Self {
            state: PreloaderState::Waiting,
            remove_after: f64::from(options.remove_after_ms) / 1000.0,
            elapsed: 0.0,
        }
    }

    pub fn state(&self) -> PreloaderState {
        self.state
    }

    pub fn loaded(&mut self) {
        if self.state == PreloaderState::Waiting {
            self.state = PreloaderState::Fading;
        }
    }

    /// Returns true on the tick the element should be removed.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.state != PreloaderState::Fading {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.remove_after {
            self.state = PreloaderState::Removed;
            return true;
        }
        false
    }
}
