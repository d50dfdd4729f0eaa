//! Core business logic layer
//!
//! This module contains the carousel and lightbox state machines, the
//! gallery and admin state built on them, and the request plumbing.
//! NO imports from frontend/ or rendering code.
//! Core updates data structures in the data layer, frontends read and render.

pub mod admin;
pub mod app_core;
pub mod carousel;
pub mod gallery;
pub mod input_router;
pub mod lightbox;
pub mod tasks;

pub use app_core::AppCore;
