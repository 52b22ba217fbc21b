//! Application orchestration: the scroll animator, background frame
//! loading, page state, and input handling.

pub mod animator;
pub mod event;
pub mod frame_runtime;
pub mod handler;
pub mod state;
