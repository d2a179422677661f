//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer reads the tab manager and turns the flat strip into cells on
//! the terminal.  It never mutates the forest.

pub mod content;
pub mod layout;
pub mod tab_strip;
pub mod theme;
