//! Application orchestration: state management, event loop, and input handling.

pub mod demo;
pub mod event;
pub mod handler;
pub mod state;
