//! Core algorithms – the tab forest, its linearization onto a flat tab strip,
//! and indentation.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The host
//! widget is reached only through the [`host::HostList`] trait.

pub mod error;
pub mod host;
pub mod layout;
pub mod linear;
pub mod manager;
pub mod tree;
