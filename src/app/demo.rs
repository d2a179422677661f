//! Sample forest shown on startup, and the payloads of interactively created
//! tabs.

use htabs::core::error::Result;
use htabs::core::host::HostList;
use htabs::core::manager::TabManager;
use htabs::core::tree::{TabId, TabPayload};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Glyphs standing in for tab icons.
pub const ICONS: &[&str] = &["●", "◆", "■", "▲", "◉", "◈", "✦", "○", "★"];

pub fn payload(title: impl Into<String>, icon_index: usize) -> TabPayload {
    let title = title.into();
    TabPayload::titled(title.clone())
        .with_icon(ICONS[icon_index % ICONS.len()])
        .with_content(format!("Contents of {title}"))
}

/// Build `count` tabs.  Tab `i` becomes a root 30% of the time (or when it
/// draws itself as parent); otherwise it is a child of a random earlier tab.
pub fn seed_forest<H: HostList>(tabs: &mut TabManager<H>, count: usize, seed: u64) -> Result<Vec<TabId>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut created: Vec<TabId> = Vec::with_capacity(count);

    for i in 0..count {
        let root = rng.gen_bool(0.3);
        let parent = rng.gen_range(0..=i);
        let id = if root || parent == i {
            tabs.add_root(payload(format!("Tab {i}"), i))?
        } else {
            let title = format!("Tab {i} [child of {parent}]");
            tabs.add_child(created[parent], payload(title, i))?
        };
        created.push(id);
    }

    tracing::debug!(count, seed, roots = tabs.tree().roots().len(), "seeded sample forest");
    Ok(created)
}
