//! UI State - Focus, section, and interaction state
//!
//! This module contains UI state that is independent of rendering.
//! The TUI frontend reads from these structures.

use std::time::{Duration, Instant};

/// Top-level page section shown in the body area
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Hero,
    Services,
    Projects,
    Contact,
    Admin,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Hero,
        Section::Services,
        Section::Projects,
        Section::Contact,
        Section::Admin,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::Services => "Services",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
            Section::Admin => "Admin",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Input mode for the application
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Section navigation and gallery controls
    Normal,
    /// Lightbox overlay has the keyboard
    Lightbox,
    /// Category filter popup is open
    FilterMenu,
    /// Public contact form is focused
    ContactForm,
    /// Admin login form is open
    LoginForm,
    /// Project create/edit form is open
    ProjectForm,
    /// Reply form for a contact message is open
    ResponseForm,
    /// Waiting for y/n on a project delete
    ConfirmDelete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// Transient status-bar notification
#[derive(Clone, Debug)]
pub struct Toast {
    pub level: ToastLevel,
    pub text: String,
    pub expires_at: Instant,
}

/// Application UI state
#[derive(Clone, Debug)]
pub struct UiState {
    /// Section shown in the body
    pub section: Section,

    /// Current input mode
    pub input_mode: InputMode,

    /// Current notification, if any
    pub toast: Option<Toast>,

    /// How long a toast stays visible
    pub toast_duration: Duration,

    /// Status bar text when no toast is shown
    pub status_text: String,
}

impl UiState {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            section: Section::Hero,
            input_mode: InputMode::Normal,
            toast: None,
            toast_duration,
            status_text: String::from("Ready"),
        }
    }

    pub fn notify(&mut self, level: ToastLevel, text: impl Into<String>, now: Instant) {
        self.toast = Some(Toast {
            level,
            text: text.into(),
            expires_at: now + self.toast_duration,
        });
    }

    /// Drop the toast once it has expired
    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_cycle_wraps() {
        assert_eq!(Section::Admin.next(), Section::Hero);
        assert_eq!(Section::Hero.previous(), Section::Admin);
        assert_eq!(Section::Services.next(), Section::Projects);
    }

    #[test]
    fn test_toast_expires() {
        let now = Instant::now();
        let mut ui = UiState::new(Duration::from_secs(2));
        ui.notify(ToastLevel::Success, "Saved", now);

        ui.expire_toast(now + Duration::from_secs(1));
        assert!(ui.toast.is_some());

        ui.expire_toast(now + Duration::from_secs(2));
        assert!(ui.toast.is_none());
    }
}
