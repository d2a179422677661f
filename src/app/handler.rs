//! Input handling: maps key/mouse events to tab operations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use htabs::core::error::TabError;
use htabs::core::host::HostList;
use htabs::core::layout::Orientation;
use htabs::core::tree::TabId;

use crate::config::Action;
use crate::ui::layout::AppLayout;
use crate::ui::tab_strip::{self, StripHit};

use super::demo;
use super::state::AppState;

/// Icon slots handed to interactively created tabs, like the sample forest.
const NEW_TAB_ICON: usize = 7;
const NEW_SIBLING_ICON: usize = 3;
const NEW_CHILD_ICON: usize = 6;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Home => {
            state.tabs.select(0);
            return;
        }
        KeyCode::End => {
            let last = state.tabs.host().len().saturating_sub(1);
            state.tabs.select(last);
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    apply(state, action);
}

fn apply(state: &mut AppState, action: Action) {
    match action {
        Action::Quit => state.should_quit = true,
        Action::SelectPrev => {
            state.tabs.select_prev();
            report_selection(state);
        }
        Action::SelectNext => {
            state.tabs.select_next();
            report_selection(state);
        }
        Action::NewTab => {
            let result = state.tabs.add_root(demo::payload("New Tab", NEW_TAB_ICON));
            finish_add(state, result, "New tab added");
        }
        Action::NewSibling => {
            let Some((anchor, title)) = active(state) else {
                return;
            };
            let payload = demo::payload(format!("New sibling added by {title}"), NEW_SIBLING_ICON);
            let result = state.tabs.add_sibling(anchor, payload);
            finish_add(state, result, "New sibling added");
        }
        Action::NewChild => {
            let Some((parent, title)) = active(state) else {
                return;
            };
            let title = format!("New Child Tab added by {title}");
            let payload = demo::payload(title.clone(), NEW_CHILD_ICON).with_tooltip(title);
            let result = state.tabs.add_child(parent, payload);
            finish_add(state, result, "New child added");
        }
        Action::CloseTab => {
            let Some((id, _)) = active(state) else {
                return;
            };
            match state.tabs.remove(id) {
                Ok(_) => report_selection(state),
                Err(err) => report_error(state, err),
            }
        }
        Action::ToggleCollapse => {
            if let Some((id, _)) = active(state) {
                toggle(state, id);
            }
        }
        Action::ToggleOrientation => {
            let next = state.tabs.orientation().toggled();
            if let Err(err) = state.tabs.set_orientation(next) {
                report_error(state, err);
                return;
            }
            state.config.orientation = next;
            if let Err(err) = state.config.save() {
                tracing::warn!(%err, "could not persist tab placement");
            }
            state.strip_state.offset = 0;
            state.status_message = Some(format!("Tab placement: {next}"));
        }
    }
}

/// The selected tab and its title.
fn active(state: &mut AppState) -> Option<(TabId, String)> {
    let found = state
        .tabs
        .active_tab()
        .zip(state.active_title());
    if found.is_none() {
        state.status_message = Some("no tab selected".into());
    }
    found
}

fn finish_add(state: &mut AppState, result: Result<TabId, TabError>, message: &str) {
    match result {
        Ok(id) => {
            if let Some(index) = state.tabs.host().index_of(id) {
                state.tabs.select(index);
            }
            state.status_message = Some(message.to_string());
        }
        Err(err) => report_error(state, err),
    }
}

fn toggle(state: &mut AppState, id: TabId) {
    let has_children = state.tabs.tab(id).is_some_and(|n| !n.children.is_empty());
    if !has_children || state.tabs.orientation() != Orientation::Stacked {
        return;
    }
    if let Err(err) = state.tabs.toggle(id) {
        report_error(state, err);
    }
}

fn report_selection(state: &mut AppState) {
    state.status_message = Some(
        state
            .active_title()
            .unwrap_or_else(|| "no more tabs".to_string()),
    );
}

fn report_error(state: &mut AppState, err: TabError) {
    tracing::warn!(%err, "tab operation failed");
    state.status_message = Some(err.to_string());
}

// ── mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = AppLayout::from_area(
        state.terminal_area,
        state.tabs.orientation(),
        state.config.tab_bar_width,
    );

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let hit = tab_strip::hit_test(
                &state.tabs,
                &state.strip_state,
                layout.strip_area,
                mouse.column,
                mouse.row,
            );
            match hit {
                Some(StripHit::Select(index)) => {
                    state.tabs.select(index);
                    report_selection(state);
                }
                Some(StripHit::Toggle(index)) => {
                    if let Some(id) = state.tabs.tab_for_entry(index) {
                        toggle(state, id);
                    }
                }
                None => {}
            }
        }
        MouseEventKind::ScrollDown => {
            state.tabs.select_next();
        }
        MouseEventKind::ScrollUp => {
            state.tabs.select_prev();
        }
        _ => {}
    }
}
