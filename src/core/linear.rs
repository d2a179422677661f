//! Linearization of the forest onto the host's flat list.
//!
//! Every function here keeps the managed host entries a pre-order walk of the
//! visible set.  Removals always ask the host for the live index right before
//! removing, since each removal shifts everything after it.

use crate::core::host::HostList;
use crate::core::tree::{TabId, TabTree};

/// Last tab of the visible subtree rooted at `id`, in pre-order, or `id`
/// itself when nothing below it is shown.  A collapsed node hides its
/// descendants unless `flatten` is set.
pub fn last_visible_descendant(tree: &TabTree, id: TabId, flatten: bool) -> TabId {
    let mut last = id;
    while let Some(node) = tree.get(last) {
        if node.collapsed && !flatten {
            break;
        }
        match node.children.last() {
            Some(&child) => last = child,
            None => break,
        }
    }
    last
}

/// Host index right after the last visible descendant of `parent`, where a
/// newly appended child belongs.  Looked up live, so unmanaged entries
/// inside the parent's range do not shift it.  `None` when that descendant
/// is not in the host.
pub fn child_insert_index<H: HostList>(tree: &TabTree, host: &H, parent: TabId, flatten: bool) -> Option<usize> {
    let last = last_visible_descendant(tree, parent, flatten);
    host.index_of(last).map(|index| index + 1)
}

/// Insert the missing visible descendants of `id` starting at `cursor`
/// (normally the slot right after `id`).  Entries already present are
/// skipped, so this serves both a plain expand and a deep reveal.
///
/// Returns the index following the last slot of the subtree.
pub fn reveal_subtree<H: HostList>(
    tree: &TabTree,
    host: &mut H,
    id: TabId,
    mut cursor: usize,
    flatten: bool,
) -> usize {
    let Some(node) = tree.get(id) else { return cursor };
    for &child in &node.children {
        match host.index_of(child) {
            Some(index) => cursor = index + 1,
            None => {
                if let Some(c) = tree.get(child) {
                    host.insert_at(cursor, child, &c.payload);
                    cursor = host.index_of(child).map_or(cursor + 1, |index| index + 1);
                }
            }
        }
        let descend = flatten || tree.get(child).is_some_and(|c| !c.collapsed);
        if descend {
            cursor = reveal_subtree(tree, host, child, cursor, flatten);
        }
    }
    cursor
}

/// Remove every descendant of `id` from the host, deepest first.
/// Returns how many slots were removed.
pub fn conceal_subtree<H: HostList>(tree: &TabTree, host: &mut H, id: TabId) -> usize {
    let Some(node) = tree.get(id) else { return 0 };
    let mut removed = 0;
    for &child in &node.children {
        if host.index_of(child).is_none() {
            continue;
        }
        removed += conceal_subtree(tree, host, child);
        if let Some(index) = host.index_of(child) {
            host.remove_at(index);
            removed += 1;
        }
    }
    removed
}

/// Bring the descendants of `id` in line with their stored collapse flags:
/// below a collapsed node nothing may remain in the host.
pub fn restore_hierarchy<H: HostList>(tree: &TabTree, host: &mut H, id: TabId) {
    let Some(node) = tree.get(id) else { return };
    if node.collapsed {
        conceal_subtree(tree, host, id);
        return;
    }
    for &child in &node.children {
        restore_hierarchy(tree, host, child);
    }
}

/// Tabs shown by the host, in order, skipping unmanaged entries.
pub fn managed_entries<H: HostList>(host: &H) -> Vec<TabId> {
    (0..host.len()).filter_map(|i| host.tab_at(i)).collect()
}
