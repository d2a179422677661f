//! The host widget seam.
//!
//! A host only understands a flat, index-addressed list of tabs.  Each
//! concrete toolkit binding implements [`HostList`] once; the
//! [`TabManager`](crate::core::manager::TabManager) drives it.

use crate::core::layout::Orientation;
use crate::core::tree::{TabId, TabPayload};

/// Capabilities the core needs from a flat tab strip.
pub trait HostList {
    /// Number of entries, managed or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert an entry for `tab`.  `index` is always within `0..=len()`.
    fn insert_at(&mut self, index: usize, tab: TabId, payload: &TabPayload);

    fn remove_at(&mut self, index: usize);

    /// Live index of the entry showing `tab`.
    fn index_of(&self, tab: TabId) -> Option<usize>;

    /// Tab shown by entry `index`; `None` for out-of-range or unmanaged entries.
    fn tab_at(&self, index: usize) -> Option<TabId>;

    /// Refresh the presentation of entry `index`.
    fn update_at(&mut self, index: usize, payload: &TabPayload);

    fn orientation(&self) -> Orientation;

    fn set_orientation(&mut self, orientation: Orientation);

    fn current_selection(&self) -> Option<TabId>;
}

// ───────────────────────────────────────── flat list ─────────

/// One entry of a [`FlatList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripEntry {
    /// `None` for raw entries added behind the manager's back.
    pub tab: Option<TabId>,
    pub title: String,
    pub icon: Option<String>,
    pub tooltip: Option<String>,
}

/// Vec-backed host list with a single selection, mirroring how a classic
/// tabbed pane behaves: removing the selected entry selects its successor,
/// or the new last entry.
#[derive(Debug, Clone, Default)]
pub struct FlatList {
    entries: Vec<StripEntry>,
    selected: Option<usize>,
    orientation: Orientation,
}

impl FlatList {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[StripEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Select entry `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = Some(index);
        }
    }

    pub fn select_next(&mut self) {
        if let Some(i) = self.selected {
            self.select(i + 1);
        } else if !self.entries.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some(i.saturating_sub(1));
        }
    }

    /// Insert an entry the tree knows nothing about.
    pub fn insert_unmanaged(&mut self, index: usize, title: impl Into<String>) {
        let entry = StripEntry {
            tab: None,
            title: title.into(),
            icon: None,
            tooltip: None,
        };
        self.insert_entry(index, entry);
    }

    fn insert_entry(&mut self, index: usize, entry: StripEntry) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry);
        match self.selected {
            None => self.selected = Some(index),
            Some(s) if s >= index => self.selected = Some(s + 1),
            Some(_) => {}
        }
    }
}

impl HostList for FlatList {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert_at(&mut self, index: usize, tab: TabId, payload: &TabPayload) {
        self.insert_entry(
            index,
            StripEntry {
                tab: Some(tab),
                title: payload.title.clone(),
                icon: payload.icon.clone(),
                tooltip: payload.tooltip.clone(),
            },
        );
    }

    fn remove_at(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        self.entries.remove(index);
        self.selected = match self.selected {
            _ if self.entries.is_empty() => None,
            Some(s) if s > index => Some(s - 1),
            Some(s) => Some(s.min(self.entries.len() - 1)),
            None => None,
        };
    }

    fn index_of(&self, tab: TabId) -> Option<usize> {
        self.entries.iter().position(|e| e.tab == Some(tab))
    }

    fn tab_at(&self, index: usize) -> Option<TabId> {
        self.entries.get(index).and_then(|e| e.tab)
    }

    fn update_at(&mut self, index: usize, payload: &TabPayload) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.title = payload.title.clone();
            entry.icon = payload.icon.clone();
            entry.tooltip = payload.tooltip.clone();
        }
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    fn current_selection(&self) -> Option<TabId> {
        self.selected.and_then(|i| self.tab_at(i))
    }
}
