//! TUI Frontend (ratatui-based)
//!
//! This module implements the Frontend trait using ratatui for terminal rendering.
//! It wraps crossterm for event handling and terminal management.

pub mod admin;
pub mod app;
pub mod carousel;
pub mod contact_form;
pub mod form_frame;
pub mod gallery;
pub mod lightbox;
pub mod login_form;
pub mod popup_menu;
pub mod project_form;
pub mod response_form;
pub mod sections;
pub mod widget_traits;

pub use app::{FormState, TuiFrontend};
