//! In-memory forest of tab nodes.
//!
//! The [`TabNode`] is the fundamental unit – it holds the presentation payload
//! of a single tab and links to its parent and children via [`TabId`] handles
//! into an arena (the [`TabTree`] struct).  Ownership flows strictly from a
//! parent's `children` vector; `parent` is a plain handle and never keeps a
//! node alive.

use std::fmt;

use crate::core::error::{Result, TabError};

// ───────────────────────────────────────── payload ───────────

/// Presentation data carried by a tab.  The core never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabPayload {
    pub title: String,
    pub icon: Option<String>,
    pub tooltip: Option<String>,
    /// Handle of whatever content the host shows when the tab is selected.
    pub content: Option<String>,
}

impl TabPayload {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

// ───────────────────────────────────────── tab node ──────────

/// Stable handle of a tab.  Slots are never recycled, so a handle stays
/// unambiguous even after the tab it named has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(usize);

impl TabId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single node in the arena-allocated forest.
#[derive(Debug, Clone)]
pub struct TabNode {
    pub payload: TabPayload,
    pub parent: Option<TabId>,
    pub children: Vec<TabId>,
    /// Whether the node hides its descendants from the flat list.
    pub collapsed: bool,
    /// Depth from the forest (0 = root).
    pub depth: usize,
}

// ───────────────────────────────────────── arena forest ──────

/// Arena-backed forest of tabs.
#[derive(Debug, Clone, Default)]
pub struct TabTree {
    slots: Vec<Option<TabNode>>,
    roots: Vec<TabId>,
}

/// What [`TabTree::detach`] did with the removed node's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detached {
    pub payload: TabPayload,
    /// First child, now occupying the removed node's position.
    pub promoted: Option<TabId>,
}

impl TabTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered roots of the forest.
    pub fn roots(&self) -> &[TabId] {
        &self.roots
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: TabId) -> Option<&TabNode> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut TabNode> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Like [`get`](Self::get) but as an error for use with `?`.
    pub fn node(&self, id: TabId) -> Result<&TabNode> {
        self.get(id).ok_or(TabError::NotFound(id))
    }

    /// Number of live tabs.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn alloc(&mut self, node: TabNode) -> TabId {
        let id = TabId(self.slots.len());
        self.slots.push(Some(node));
        id
    }

    /// Insert a new root at forest position `position` (clamped to the end).
    pub fn insert_root(&mut self, position: usize, payload: TabPayload) -> TabId {
        let id = self.alloc(TabNode {
            payload,
            parent: None,
            children: Vec::new(),
            collapsed: false,
            depth: 0,
        });
        let position = position.min(self.roots.len());
        self.roots.insert(position, id);
        id
    }

    /// Append a new child under `parent` and return its [`TabId`].
    pub fn push_child(&mut self, parent: TabId, payload: TabPayload) -> Result<TabId> {
        let depth = self.node(parent)?.depth + 1;
        let id = self.alloc(TabNode {
            payload,
            parent: Some(parent),
            children: Vec::new(),
            collapsed: false,
            depth,
        });
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// The sibling sequence `id` lives in: its parent's children, or the roots.
    pub fn siblings(&self, id: TabId) -> Result<&[TabId]> {
        match self.node(id)?.parent {
            Some(parent) => Ok(&self.node(parent)?.children),
            None => Ok(&self.roots),
        }
    }

    /// Ancestors of `id`, outermost first.
    pub fn ancestors(&self, id: TabId) -> Vec<TabId> {
        let mut chain = Vec::new();
        let mut cursor = self.get(id).and_then(|n| n.parent);
        while let Some(p) = cursor {
            chain.push(p);
            cursor = self.get(p).and_then(|n| n.parent);
        }
        chain.reverse();
        chain
    }

    /// Remove `id` from the forest.  A node with children is replaced by its
    /// first child, which adopts the remaining children after its own.
    pub fn detach(&mut self, id: TabId) -> Result<Detached> {
        let node = self.node(id)?;
        let parent = node.parent;
        let depth = node.depth;
        let children = node.children.clone();

        let siblings = match parent {
            Some(p) => &mut self.get_mut(p).ok_or(TabError::NotFound(p))?.children,
            None => &mut self.roots,
        };
        let position = siblings
            .iter()
            .position(|&s| s == id)
            .ok_or_else(|| TabError::Corrupted(format!("{id} missing from its sibling list")))?;

        let promoted = match children.split_first() {
            None => {
                siblings.remove(position);
                None
            }
            Some((&first, rest)) => {
                siblings[position] = first;
                for &adopted in rest {
                    if let Some(n) = self.get_mut(adopted) {
                        n.parent = Some(first);
                    }
                }
                if let Some(n) = self.get_mut(first) {
                    n.parent = parent;
                    n.collapsed = false;
                    n.children.extend_from_slice(rest);
                }
                self.set_depth(first, depth);
                Some(first)
            }
        };

        let removed = self.slots[id.0]
            .take()
            .ok_or(TabError::NotFound(id))?;
        Ok(Detached {
            payload: removed.payload,
            promoted,
        })
    }

    /// Assign `depth` to `id` and recompute its whole subtree top-down.
    fn set_depth(&mut self, id: TabId, depth: usize) {
        let mut stack = vec![(id, depth)];
        while let Some((current, d)) = stack.pop() {
            if let Some(n) = self.get_mut(current) {
                n.depth = d;
                stack.extend(n.children.iter().map(|&c| (c, d + 1)));
            }
        }
    }

    /// Whether `id` occupies a slot in the flat list: every ancestor must be
    /// expanded, unless `flatten` ignores collapse flags altogether.
    pub fn is_visible(&self, id: TabId, flatten: bool) -> bool {
        self.contains(id)
            && (flatten
                || self
                    .ancestors(id)
                    .iter()
                    .all(|&a| self.get(a).is_some_and(|n| !n.collapsed)))
    }

    /// Pre-order walk of the visible set.  This is the order the host list
    /// must present.
    pub fn visible_order(&self, flatten: bool) -> Vec<TabId> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.collect_visible(root, flatten, &mut out);
        }
        out
    }

    fn collect_visible(&self, id: TabId, flatten: bool, out: &mut Vec<TabId>) {
        out.push(id);
        let Some(node) = self.get(id) else { return };
        if flatten || !node.collapsed {
            for &child in &node.children {
                self.collect_visible(child, flatten, out);
            }
        }
    }

    /// Check parent/child links and depths across the whole forest.
    pub fn check_structure(&self) -> Result<()> {
        let mut seen = vec![false; self.slots.len()];
        let mut stack: Vec<(TabId, Option<TabId>, usize)> =
            self.roots.iter().rev().map(|&r| (r, None, 0)).collect();

        while let Some((id, parent, depth)) = stack.pop() {
            let node = self
                .get(id)
                .ok_or_else(|| TabError::Corrupted(format!("dangling reference to {id}")))?;
            if std::mem::replace(&mut seen[id.0], true) {
                return Err(TabError::Corrupted(format!("{id} is linked twice")));
            }
            if node.parent != parent {
                return Err(TabError::Corrupted(format!(
                    "{id} points at parent {:?}, but is listed under {:?}",
                    node.parent, parent
                )));
            }
            if node.depth != depth {
                return Err(TabError::Corrupted(format!(
                    "{id} has depth {}, expected {depth}",
                    node.depth
                )));
            }
            stack.extend(node.children.iter().rev().map(|&c| (c, Some(id), depth + 1)));
        }

        if let Some(orphan) = (0..self.slots.len()).find(|&i| self.slots[i].is_some() && !seen[i]) {
            return Err(TabError::Corrupted(format!(
                "{} is alive but unreachable",
                TabId(orphan)
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(t: &str) -> TabPayload {
        TabPayload::titled(t)
    }

    #[test]
    fn test_child_depths_follow_parents() {
        let mut tree = TabTree::new();
        let a = tree.insert_root(0, titled("A"));
        let a1 = tree.push_child(a, titled("A1")).unwrap();
        let a1a = tree.push_child(a1, titled("A1a")).unwrap();

        assert_eq!(tree.get(a).unwrap().depth, 0);
        assert_eq!(tree.get(a1).unwrap().depth, 1);
        assert_eq!(tree.get(a1a).unwrap().depth, 2);
        assert_eq!(tree.ancestors(a1a), vec![a, a1]);
        tree.check_structure().unwrap();
    }

    #[test]
    fn test_insert_root_clamps_position() {
        let mut tree = TabTree::new();
        let a = tree.insert_root(0, titled("A"));
        let b = tree.insert_root(99, titled("B"));
        let c = tree.insert_root(1, titled("C"));
        assert_eq!(tree.roots(), &[a, c, b]);
    }

    #[test]
    fn test_detach_promotes_first_child() {
        let mut tree = TabTree::new();
        let p = tree.insert_root(0, titled("P"));
        let n = tree.push_child(p, titled("N")).unwrap();
        let c1 = tree.push_child(n, titled("c1")).unwrap();
        let c2 = tree.push_child(n, titled("c2")).unwrap();
        let c3 = tree.push_child(n, titled("c3")).unwrap();
        let g = tree.push_child(c1, titled("g")).unwrap();
        let g2 = tree.push_child(c2, titled("g2")).unwrap();

        let detached = tree.detach(n).unwrap();
        assert_eq!(detached.payload.title, "N");
        assert_eq!(detached.promoted, Some(c1));

        assert_eq!(tree.get(p).unwrap().children, vec![c1]);
        let promoted = tree.get(c1).unwrap();
        assert_eq!(promoted.parent, Some(p));
        assert_eq!(promoted.depth, 1);
        assert_eq!(promoted.children, vec![g, c2, c3]);
        assert_eq!(tree.get(c2).unwrap().children, vec![g2]);
        assert_eq!(tree.get(g2).unwrap().depth, 3);
        assert!(!tree.contains(n));
        tree.check_structure().unwrap();
    }

    #[test]
    fn test_detach_leaf_root() {
        let mut tree = TabTree::new();
        let a = tree.insert_root(0, titled("A"));
        let b = tree.insert_root(1, titled("B"));
        let detached = tree.detach(a).unwrap();
        assert_eq!(detached.promoted, None);
        assert_eq!(tree.roots(), &[b]);
        assert!(matches!(tree.detach(a), Err(TabError::NotFound(id)) if id == a));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut tree = TabTree::new();
        let a = tree.insert_root(0, titled("A"));
        tree.detach(a).unwrap();
        let b = tree.insert_root(0, titled("B"));
        assert_ne!(a, b);
        assert!(tree.get(a).is_none());
    }

    #[test]
    fn test_visible_order_respects_collapse() {
        let mut tree = TabTree::new();
        let a = tree.insert_root(0, titled("A"));
        let a1 = tree.push_child(a, titled("A1")).unwrap();
        let a1a = tree.push_child(a1, titled("A1a")).unwrap();
        let b = tree.insert_root(1, titled("B"));

        assert_eq!(tree.visible_order(false), vec![a, a1, a1a, b]);
        tree.get_mut(a1).unwrap().collapsed = true;
        assert_eq!(tree.visible_order(false), vec![a, a1, b]);
        assert!(!tree.is_visible(a1a, false));
        assert_eq!(tree.visible_order(true), vec![a, a1, a1a, b]);
        assert!(tree.is_visible(a1a, true));
    }

    #[test]
    fn test_check_structure_flags_bad_depth() {
        let mut tree = TabTree::new();
        let a = tree.insert_root(0, titled("A"));
        let a1 = tree.push_child(a, titled("A1")).unwrap();
        tree.get_mut(a1).unwrap().depth = 5;
        assert!(matches!(tree.check_structure(), Err(TabError::Corrupted(_))));
    }

    #[test]
    fn test_is_empty_tracks_live_tabs() {
        let mut tree = TabTree::new();
        assert!(tree.is_empty());
        let a = tree.insert_root(0, titled("A"));
        let a1 = tree.push_child(a, titled("A1")).unwrap();
        tree.detach(a).unwrap();
        assert!(!tree.is_empty());
        tree.detach(a1).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }
}
