//! Tab Manager
//!
//! Owns the tab forest together with the host list it mirrors.  Every public
//! operation validates first and mutates second, so a failed call leaves both
//! the forest and the host untouched.

use crate::core::error::{Result, TabError};
use crate::core::host::{FlatList, HostList};
use crate::core::layout::{Affordance, IndentConfig, Orientation, TabRect};
use crate::core::linear;
use crate::core::tree::{TabId, TabNode, TabPayload, TabTree};

pub struct TabManager<H: HostList> {
    tree: TabTree,
    host: H,
    indent: IndentConfig,
}

impl<H: HostList> TabManager<H> {
    pub fn new(host: H, indent: IndentConfig) -> Self {
        Self {
            tree: TabTree::new(),
            host,
            indent,
        }
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn tree(&self) -> &TabTree {
        &self.tree
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn tab(&self, id: TabId) -> Option<&TabNode> {
        self.tree.get(id)
    }

    pub fn indent(&self) -> IndentConfig {
        self.indent
    }

    pub fn set_tab_indent(&mut self, indent: u16) {
        self.indent.tab_indent = indent;
    }

    pub fn set_header_indent(&mut self, indent: u16) {
        self.indent.header_indent = indent;
    }

    pub fn orientation(&self) -> Orientation {
        self.host.orientation()
    }

    fn flatten(&self) -> bool {
        self.host.orientation() == Orientation::Flowed
    }

    /// Tab shown by host entry `index`, if the entry is managed.
    pub fn tab_for_entry(&self, index: usize) -> Option<TabId> {
        self.host.tab_at(index).filter(|&id| self.tree.contains(id))
    }

    /// Tab behind the host's current selection.
    pub fn active_tab(&self) -> Option<TabId> {
        self.host
            .current_selection()
            .filter(|&id| self.tree.contains(id))
    }

    /// Tabs in host order, as the pre-order walk of the visible set.
    pub fn visible_tabs(&self) -> Vec<TabId> {
        self.tree.visible_order(self.flatten())
    }

    // ── insertion ───────────────────────────────────────────────

    /// Append a new root at the end of the forest and the host list.
    pub fn add_root(&mut self, payload: TabPayload) -> Result<TabId> {
        let position = self.tree.roots().len();
        self.add_root_at(position, payload)
    }

    /// Insert a new root at forest position `position`.
    pub fn add_root_at(&mut self, position: usize, payload: TabPayload) -> Result<TabId> {
        self.preflight()?;
        let index = match self.tree.roots().get(position) {
            Some(&displaced) => self
                .host
                .index_of(displaced)
                .ok_or(TabError::NotVisible(displaced))?,
            None => self.host.len(),
        };

        let id = self.tree.insert_root(position, payload);
        self.show(index, id);
        tracing::debug!(tab = %id, index, "added root tab");
        self.debug_verify();
        Ok(id)
    }

    /// Append a child under `parent`, expanding `parent` (and any collapsed
    /// ancestor) so the new tab is never hidden.
    pub fn add_child(&mut self, parent: TabId, payload: TabPayload) -> Result<TabId> {
        self.tree.node(parent)?;
        self.preflight()?;

        let flatten = self.flatten();
        let mut chain = self.tree.ancestors(parent);
        chain.push(parent);
        self.check_reachable(&chain, flatten)?;

        for &tab in &chain {
            self.expand_node(tab);
        }

        let index = linear::child_insert_index(&self.tree, &self.host, parent, flatten)
            .ok_or(TabError::NotVisible(parent))?;
        let id = self.tree.push_child(parent, payload)?;
        self.show(index, id);
        tracing::debug!(tab = %id, parent = %parent, index, "added child tab");
        self.debug_verify();
        Ok(id)
    }

    /// Every tab of `chain` (outermost first) that is visible now, and the
    /// last visible descendant of an expanded tail, must be in the host.
    /// Expanding the chain reveals the rest from there.
    fn check_reachable(&self, chain: &[TabId], flatten: bool) -> Result<()> {
        for &tab in chain {
            if self.tree.is_visible(tab, flatten) && self.host.index_of(tab).is_none() {
                return Err(TabError::NotVisible(tab));
            }
        }
        let Some(&tail) = chain.last() else { return Ok(()) };
        let expanded = flatten || self.tree.get(tail).is_some_and(|n| !n.collapsed);
        if expanded && self.tree.is_visible(tail, flatten) {
            let last = linear::last_visible_descendant(&self.tree, tail, flatten);
            if self.host.index_of(last).is_none() {
                return Err(TabError::NotVisible(last));
            }
        }
        Ok(())
    }

    /// Add a tab next to `anchor`: a root when `anchor` is a root, otherwise
    /// the last child of `anchor`'s parent.
    pub fn add_sibling(&mut self, anchor: TabId, payload: TabPayload) -> Result<TabId> {
        match self.tree.node(anchor)?.parent {
            Some(parent) => self.add_child(parent, payload),
            None => self.add_root(payload),
        }
    }

    fn show(&mut self, index: usize, id: TabId) {
        if let Some(node) = self.tree.get(id) {
            self.host.insert_at(index, id, &node.payload);
        }
    }

    // ── removal ─────────────────────────────────────────────────

    /// Remove `id`.  If it has children, the first child is promoted into its
    /// place and adopts the others.  Returns the removed tab's payload.
    pub fn remove(&mut self, id: TabId) -> Result<TabPayload> {
        if let Err(err) = self.tree.node(id) {
            tracing::warn!(tab = %id, "remove of unknown tab");
            return Err(err);
        }
        self.preflight()?;

        let flatten = self.flatten();
        let slot = self.host.index_of(id);
        if slot.is_some() {
            linear::conceal_subtree(&self.tree, &mut self.host, id);
            if let Some(index) = self.host.index_of(id) {
                self.host.remove_at(index);
            }
        }

        let detached = self.tree.detach(id)?;

        if let (Some(index), Some(promoted)) = (slot, detached.promoted) {
            self.show(index, promoted);
            linear::reveal_subtree(&self.tree, &mut self.host, promoted, index + 1, flatten);
        }

        tracing::debug!(tab = %id, promoted = ?detached.promoted, slot = ?slot, "removed tab");
        self.debug_verify();
        Ok(detached.payload)
    }

    // ── collapse / expand ───────────────────────────────────────

    /// Hide the descendants of `id`.  Their own collapse flags are kept, so a
    /// later [`expand`](Self::expand) brings back exactly what was shown.
    pub fn collapse(&mut self, id: TabId) -> Result<()> {
        self.tree.node(id)?;
        self.preflight()?;

        let flatten = self.flatten();
        if let Some(node) = self.tree.get_mut(id) {
            node.collapsed = true;
        }
        if !flatten && self.host.index_of(id).is_some() {
            let removed = linear::conceal_subtree(&self.tree, &mut self.host, id);
            tracing::debug!(tab = %id, removed, "collapsed tab");
        }
        self.debug_verify();
        Ok(())
    }

    /// Show the children of `id` again.  Children that were collapsed stay
    /// collapsed.
    pub fn expand(&mut self, id: TabId) -> Result<()> {
        self.tree.node(id)?;
        self.preflight()?;
        self.expand_node(id);
        self.debug_verify();
        Ok(())
    }

    pub fn toggle(&mut self, id: TabId) -> Result<()> {
        if self.tree.node(id)?.collapsed {
            self.expand(id)
        } else {
            self.collapse(id)
        }
    }

    pub fn is_collapsed(&self, id: TabId) -> Option<bool> {
        self.tree.get(id).map(|n| n.collapsed)
    }

    fn expand_node(&mut self, id: TabId) {
        let Some(node) = self.tree.get_mut(id) else { return };
        if !node.collapsed {
            return;
        }
        node.collapsed = false;

        let flatten = self.flatten();
        if flatten {
            return;
        }
        if let Some(index) = self.host.index_of(id) {
            let end = linear::reveal_subtree(&self.tree, &mut self.host, id, index + 1, false);
            tracing::debug!(tab = %id, inserted = end - index - 1, "expanded tab");
        }
    }

    // ── orientation ─────────────────────────────────────────────

    /// React to the host switching orientation.  Flowed shows every tab
    /// without touching the stored collapse flags; stacked re-applies them.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<()> {
        self.preflight()?;
        self.host.set_orientation(orientation);

        let roots = self.tree.roots().to_vec();
        match orientation {
            Orientation::Flowed => {
                for root in roots {
                    if let Some(index) = self.host.index_of(root) {
                        linear::reveal_subtree(&self.tree, &mut self.host, root, index + 1, true);
                    }
                }
            }
            Orientation::Stacked => {
                for root in roots {
                    linear::restore_hierarchy(&self.tree, &mut self.host, root);
                }
            }
        }
        tracing::debug!(%orientation, entries = self.host.len(), "orientation changed");
        self.debug_verify();
        Ok(())
    }

    // ── presentation ────────────────────────────────────────────

    pub fn payload(&self, id: TabId) -> Option<&TabPayload> {
        self.tree.get(id).map(|n| &n.payload)
    }

    pub fn set_title(&mut self, id: TabId, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        self.update_payload(id, |p| p.title = title)
    }

    pub fn set_icon(&mut self, id: TabId, icon: Option<String>) -> Result<()> {
        self.update_payload(id, |p| p.icon = icon)
    }

    pub fn set_tooltip(&mut self, id: TabId, tooltip: Option<String>) -> Result<()> {
        self.update_payload(id, |p| p.tooltip = tooltip)
    }

    pub fn set_content(&mut self, id: TabId, content: Option<String>) -> Result<()> {
        self.update_payload(id, |p| p.content = content)
    }

    fn update_payload(&mut self, id: TabId, edit: impl FnOnce(&mut TabPayload)) -> Result<()> {
        let node = self.tree.get_mut(id).ok_or(TabError::NotFound(id))?;
        edit(&mut node.payload);
        if let Some(index) = self.host.index_of(id) {
            self.host.update_at(index, &node.payload);
        }
        Ok(())
    }

    // ── layout ──────────────────────────────────────────────────

    /// Indent the allocated rectangles of the host entries; `rects[i]` belongs
    /// to entry `i`.  Unmanaged entries are left as they are.
    pub fn indent_rects(&self, rects: &mut [TabRect]) {
        let orientation = self.orientation();
        for (index, rect) in rects.iter_mut().enumerate() {
            if let Some(depth) = self.entry_depth(index) {
                *rect = rect.indented(self.indent.tab_offset(depth, orientation));
            }
        }
    }

    /// Offset of the header content of entry `index`, if it is managed.
    pub fn header_indent(&self, index: usize) -> Option<u16> {
        self.entry_depth(index)
            .map(|depth| self.indent.header_offset(depth, self.orientation()))
    }

    /// Collapse toggle state of entry `index`, if it is managed.
    pub fn affordance(&self, index: usize) -> Option<Affordance> {
        let node = self.tree.get(self.tab_for_entry(index)?)?;
        Some(Affordance::for_tab(
            !node.children.is_empty(),
            node.collapsed,
            self.orientation(),
        ))
    }

    fn entry_depth(&self, index: usize) -> Option<usize> {
        self.tree.get(self.tab_for_entry(index)?).map(|n| n.depth)
    }

    // ── consistency ─────────────────────────────────────────────

    /// Check the forest's links and depths, and that the managed host entries
    /// are exactly the pre-order walk of the visible set.
    pub fn verify(&self) -> Result<()> {
        self.tree.check_structure()?;
        let expected = self.visible_tabs();
        let actual = linear::managed_entries(&self.host);
        if expected != actual {
            return Err(TabError::Corrupted(format!(
                "host shows {actual:?}, forest expects {expected:?}"
            )));
        }
        Ok(())
    }

    /// Structural check run before any host mutation in debug builds.
    fn preflight(&self) -> Result<()> {
        #[cfg(debug_assertions)]
        {
            if let Err(err) = self.tree.check_structure() {
                tracing::warn!(%err, "refusing to touch the tab strip");
                return Err(err);
            }
        }
        Ok(())
    }

    fn debug_verify(&self) {
        #[cfg(debug_assertions)]
        {
            if let Err(err) = self.verify() {
                debug_assert!(false, "{err}");
            }
        }
    }
}

/// Selection and unmanaged entries of the built-in list.  Managed entries
/// are only ever changed by the manager itself.
impl TabManager<FlatList> {
    pub fn select(&mut self, index: usize) {
        self.host.select(index);
    }

    pub fn select_next(&mut self) {
        self.host.select_next();
    }

    pub fn select_prev(&mut self) {
        self.host.select_prev();
    }

    /// Add a raw entry the forest does not track.
    pub fn insert_unmanaged(&mut self, index: usize, title: impl Into<String>) {
        self.host.insert_unmanaged(index, title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> TabManager<FlatList> {
        TabManager::new(FlatList::new(Orientation::Stacked), IndentConfig::uniform(10))
    }

    fn titled(t: &str) -> TabPayload {
        TabPayload::titled(t)
    }

    fn titles(m: &TabManager<FlatList>) -> Vec<String> {
        m.host().entries().iter().map(|e| e.title.clone()).collect()
    }

    /// Roots A, B; A -> A1 -> A1a.
    fn scenario() -> (TabManager<FlatList>, [TabId; 4]) {
        let mut m = manager();
        let a = m.add_root(titled("A")).unwrap();
        let b = m.add_root(titled("B")).unwrap();
        let a1 = m.add_child(a, titled("A1")).unwrap();
        let a1a = m.add_child(a1, titled("A1a")).unwrap();
        (m, [a, a1, a1a, b])
    }

    #[test]
    fn test_scenario_linear_order() {
        let (mut m, [a, a1, _, _]) = scenario();
        assert_eq!(titles(&m), ["A", "A1", "A1a", "B"]);

        m.collapse(a1).unwrap();
        assert_eq!(titles(&m), ["A", "A1", "B"]);

        m.expand(a1).unwrap();
        m.remove(a1).unwrap();
        assert_eq!(titles(&m), ["A", "A1a", "B"]);
        let a_children = &m.tab(a).unwrap().children;
        assert_eq!(a_children.len(), 1);
        assert_eq!(m.tab(a_children[0]).unwrap().depth, 1);
        m.verify().unwrap();
    }

    #[test]
    fn test_add_child_lands_after_visible_descendants() {
        let mut m = manager();
        let root = m.add_root(titled("R")).unwrap();
        let p = m.add_root(titled("P")).unwrap();
        let c1 = m.add_child(p, titled("c1")).unwrap();
        m.add_child(c1, titled("g1")).unwrap();
        let c2 = m.add_child(p, titled("c2")).unwrap();
        m.add_child(c2, titled("g2")).unwrap();
        m.add_root(titled("Z")).unwrap();

        let parent_index = m.host().index_of(p).unwrap();
        let new = m.add_child(p, titled("new")).unwrap();
        assert_eq!(m.host().index_of(new), Some(parent_index + 4 + 1));
        assert_eq!(titles(&m), ["R", "P", "c1", "g1", "c2", "g2", "new", "Z"]);
        assert_eq!(m.host().index_of(root), Some(0));
    }

    #[test]
    fn test_add_child_expands_collapsed_parent() {
        let (mut m, [a, a1, a1a, _]) = scenario();
        m.collapse(a).unwrap();
        assert_eq!(titles(&m), ["A", "B"]);

        m.add_child(a1a, titled("deep")).unwrap();
        assert_eq!(m.is_collapsed(a), Some(false));
        assert_eq!(m.is_collapsed(a1), Some(false));
        assert_eq!(titles(&m), ["A", "A1", "A1a", "deep", "B"]);
    }

    #[test]
    fn test_add_sibling_of_root_and_child() {
        let (mut m, [a, a1, _, _]) = scenario();
        let s = m.add_sibling(a1, titled("A2")).unwrap();
        assert_eq!(m.tab(s).unwrap().parent, Some(a));
        let r = m.add_sibling(a, titled("C")).unwrap();
        assert_eq!(m.tab(r).unwrap().parent, None);
        assert_eq!(titles(&m), ["A", "A1", "A1a", "A2", "B", "C"]);
    }

    #[test]
    fn test_add_root_at_position() {
        let (mut m, _) = scenario();
        m.add_root_at(1, titled("mid")).unwrap();
        m.add_root_at(0, titled("first")).unwrap();
        assert_eq!(titles(&m), ["first", "A", "A1", "A1a", "mid", "B"]);
    }

    #[test]
    fn test_promotion_regroups_children() {
        let mut m = manager();
        let n = m.add_root(titled("N")).unwrap();
        let c1 = m.add_child(n, titled("c1")).unwrap();
        let c2 = m.add_child(n, titled("c2")).unwrap();
        let c3 = m.add_child(n, titled("c3")).unwrap();
        let own = m.add_child(c1, titled("own")).unwrap();
        let g2 = m.add_child(c2, titled("g2")).unwrap();
        m.add_root(titled("after")).unwrap();

        m.remove(n).unwrap();
        let promoted = m.tab(c1).unwrap();
        assert_eq!(promoted.parent, None);
        assert_eq!(promoted.depth, 0);
        assert_eq!(promoted.children, vec![own, c2, c3]);
        assert_eq!(m.tab(g2).unwrap().parent, Some(c2));
        assert_eq!(m.tab(g2).unwrap().depth, 2);
        assert_eq!(m.tree().roots()[0], c1);
        assert_eq!(titles(&m), ["c1", "own", "c2", "g2", "c3", "after"]);
    }

    #[test]
    fn test_remove_collapsed_node_reveals_promoted_subtree() {
        let (mut m, [a, a1, _, _]) = scenario();
        m.collapse(a).unwrap();
        m.remove(a).unwrap();
        assert_eq!(m.tree().roots()[0], a1);
        assert_eq!(titles(&m), ["A1", "A1a", "B"]);
    }

    #[test]
    fn test_remove_hidden_node_leaves_host_alone() {
        let (mut m, [a, a1, a1a, _]) = scenario();
        m.collapse(a).unwrap();
        let before = titles(&m);
        m.remove(a1).unwrap();
        assert_eq!(titles(&m), before);
        assert_eq!(m.tab(a1a).unwrap().parent, Some(a));
        m.expand(a).unwrap();
        assert_eq!(titles(&m), ["A", "A1a", "B"]);
    }

    #[test]
    fn test_remove_unknown_is_reported() {
        let (mut m, [_, a1, _, _]) = scenario();
        m.remove(a1).unwrap();
        let before = titles(&m);
        assert_eq!(m.remove(a1), Err(TabError::NotFound(a1)));
        assert_eq!(titles(&m), before);
    }

    #[test]
    fn test_collapse_expand_round_trip() {
        let (mut m, [a, a1, _, _]) = scenario();
        m.collapse(a1).unwrap();
        let inner_collapsed = titles(&m);
        m.collapse(a).unwrap();
        assert_eq!(titles(&m), ["A", "B"]);
        m.expand(a).unwrap();
        assert_eq!(titles(&m), inner_collapsed);

        m.expand(a1).unwrap();
        let full = titles(&m);
        m.collapse(a).unwrap();
        m.expand(a).unwrap();
        assert_eq!(titles(&m), full);
    }

    #[test]
    fn test_expand_is_idempotent() {
        let (mut m, [a, ..]) = scenario();
        m.collapse(a).unwrap();
        m.expand(a).unwrap();
        let once = titles(&m);
        m.expand(a).unwrap();
        assert_eq!(titles(&m), once);
    }

    #[test]
    fn test_toggle_flips_state() {
        let (mut m, [a, ..]) = scenario();
        m.toggle(a).unwrap();
        assert_eq!(m.is_collapsed(a), Some(true));
        m.toggle(a).unwrap();
        assert_eq!(m.is_collapsed(a), Some(false));
    }

    #[test]
    fn test_orientation_round_trip() {
        let (mut m, [_, a1, _, b]) = scenario();
        m.add_child(b, titled("B1")).unwrap();
        m.collapse(a1).unwrap();
        m.collapse(b).unwrap();
        let stacked = titles(&m);

        m.set_orientation(Orientation::Flowed).unwrap();
        assert_eq!(titles(&m), ["A", "A1", "A1a", "B", "B1"]);
        assert_eq!(m.is_collapsed(a1), Some(true));

        m.set_orientation(Orientation::Stacked).unwrap();
        assert_eq!(titles(&m), stacked);
        m.verify().unwrap();
    }

    #[test]
    fn test_flowed_collapse_only_records_flag() {
        let (mut m, [a, ..]) = scenario();
        m.set_orientation(Orientation::Flowed).unwrap();
        m.collapse(a).unwrap();
        assert_eq!(titles(&m), ["A", "A1", "A1a", "B"]);
        m.set_orientation(Orientation::Stacked).unwrap();
        assert_eq!(titles(&m), ["A", "B"]);
    }

    #[test]
    fn test_flowed_add_child_counts_every_descendant() {
        let (mut m, [a, a1, ..]) = scenario();
        m.collapse(a1).unwrap();
        m.set_orientation(Orientation::Flowed).unwrap();
        m.add_child(a, titled("A2")).unwrap();
        assert_eq!(titles(&m), ["A", "A1", "A1a", "A2", "B"]);
    }

    #[test]
    fn test_indent_rects_by_depth() {
        let (mut m, _) = scenario();
        m.insert_unmanaged(4, "raw");
        let mut rects = vec![TabRect::new(0, 0, 100, 1); 5];
        m.indent_rects(&mut rects);
        let xs: Vec<u16> = rects.iter().map(|r| r.x).collect();
        assert_eq!(xs, [0, 10, 20, 0, 0]);
        assert_eq!(rects[2].width, 80);
        assert_eq!(m.header_indent(2), Some(20));
        assert_eq!(m.header_indent(4), None);
        assert_eq!(m.tab_for_entry(4), None);
        m.verify().unwrap();

        m.set_orientation(Orientation::Flowed).unwrap();
        let mut rects = vec![TabRect::new(0, 0, 100, 1); 5];
        m.indent_rects(&mut rects);
        assert!(rects.iter().all(|r| r.x == 0));
    }

    #[test]
    fn test_affordance_tracks_children() {
        let (mut m, [a, a1, a1a, _]) = scenario();
        let index_of = |m: &TabManager<FlatList>, id: TabId| m.host().index_of(id).unwrap();
        assert_eq!(m.affordance(index_of(&m, a1)), Some(Affordance::Expanded));
        assert_eq!(m.affordance(index_of(&m, a1a)), Some(Affordance::Blank));

        m.collapse(a1).unwrap();
        assert_eq!(m.affordance(index_of(&m, a1)), Some(Affordance::Collapsed));

        m.expand(a1).unwrap();
        m.remove(a1a).unwrap();
        assert_eq!(m.affordance(index_of(&m, a1)), Some(Affordance::Blank));

        m.set_orientation(Orientation::Flowed).unwrap();
        assert_eq!(m.affordance(index_of(&m, a)), Some(Affordance::Blank));
    }

    #[test]
    fn test_set_title_refreshes_host() {
        let (mut m, [_, a1, a1a, _]) = scenario();
        m.set_title(a1, "renamed").unwrap();
        assert_eq!(titles(&m)[1], "renamed");

        m.collapse(a1).unwrap();
        m.set_tooltip(a1a, Some("hidden".into())).unwrap();
        assert_eq!(m.payload(a1a).unwrap().tooltip.as_deref(), Some("hidden"));
        m.expand(a1).unwrap();
        assert_eq!(m.host().entries()[2].tooltip.as_deref(), Some("hidden"));
    }

    #[test]
    fn test_active_tab_follows_selection() {
        let (mut m, [_, a1, a1a, b]) = scenario();
        let index = m.host().index_of(a1).unwrap();
        m.select(index);
        assert_eq!(m.active_tab(), Some(a1));
        m.remove(a1).unwrap();
        // Removing the selected entry hands the selection to the entry that
        // slid into its slot; the promoted tab is inserted afterwards.
        assert_eq!(m.active_tab(), Some(b));
        assert_eq!(m.host().index_of(a1a), Some(index));
    }

    #[test]
    fn test_add_child_after_unmanaged_entry_keeps_sibling_order() {
        let mut m = manager();
        let a = m.add_root(titled("A")).unwrap();
        let a1 = m.add_child(a, titled("A1")).unwrap();
        m.insert_unmanaged(1, "raw");

        let a2 = m.add_child(a, titled("A2")).unwrap();
        assert_eq!(titles(&m), ["A", "raw", "A1", "A2"]);
        assert_eq!(m.visible_tabs(), vec![a, a1, a2]);
        m.verify().unwrap();

        m.collapse(a).unwrap();
        assert_eq!(titles(&m), ["A", "raw"]);
        m.expand(a).unwrap();
        assert_eq!(titles(&m), ["A", "A1", "A2", "raw"]);
        m.verify().unwrap();
    }

    #[test]
    fn test_failed_add_child_leaves_flags_alone() {
        let mut m = manager();
        let a = m.add_root(titled("A")).unwrap();
        let a1 = m.add_child(a, titled("A1")).unwrap();
        m.collapse(a).unwrap();
        // Drop A from the host behind the manager's back.
        m.host.remove_at(0);

        assert_eq!(m.add_child(a1, titled("x")), Err(TabError::NotVisible(a)));
        assert_eq!(m.is_collapsed(a), Some(true));
        assert_eq!(m.tree().len(), 2);
        assert!(m.host().is_empty());
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_corrupted_forest_is_refused_before_host_changes() {
        let (mut m, [a, a1, a1a, _]) = scenario();
        let before = m.host().entries().to_vec();
        m.tree.get_mut(a1a).unwrap().depth = 7;

        assert!(matches!(m.add_root(titled("C")), Err(TabError::Corrupted(_))));
        assert!(matches!(m.add_child(a, titled("A2")), Err(TabError::Corrupted(_))));
        assert!(matches!(m.remove(a1), Err(TabError::Corrupted(_))));
        assert!(matches!(m.collapse(a), Err(TabError::Corrupted(_))));
        assert!(matches!(
            m.set_orientation(Orientation::Flowed),
            Err(TabError::Corrupted(_))
        ));

        assert_eq!(m.host().entries(), before.as_slice());
        assert_eq!(m.tree().len(), 4);
        assert_eq!(m.is_collapsed(a), Some(false));
    }
}
