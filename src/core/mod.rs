//! Core algorithms – scroll progress, panel visibility, frame cache and
//! loading, and the page's static content.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Shared types are `Send + Sync` so the loader can run on other tasks.

pub mod content;
pub mod document;
pub mod frames;
pub mod loader;
pub mod math;
pub mod panels;
pub mod progress;
pub mod surface;
