//! Tab error types

use thiserror::Error;

use crate::core::tree::TabId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(TabId),

    #[error("Tab {0} has no slot in the tab strip")]
    NotVisible(TabId),

    #[error("Tab tree is inconsistent: {0}")]
    Corrupted(String),
}

pub type Result<T> = std::result::Result<T, TabError>;
