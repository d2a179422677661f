//! Hierarchical tabs on top of a flat tab strip.
//!
//! [`core::manager::TabManager`] keeps a forest of tabs and mirrors its
//! visible part, in pre-order, onto any host implementing
//! [`core::host::HostList`].

pub mod core;

pub use crate::core::error::{Result, TabError};
pub use crate::core::host::{FlatList, HostList};
pub use crate::core::layout::{Affordance, IndentConfig, Orientation, TabRect};
pub use crate::core::manager::TabManager;
pub use crate::core::tree::{TabId, TabNode, TabPayload, TabTree};
