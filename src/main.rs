//! Terminal demo of hierarchical tabs.
//!
//! Seeds a random forest of tabs and shows it either as an indented sidebar
//! (stacked) or as a single flat row across the top (flowed).

mod app;
mod config;
mod ui;

use std::io::{self, stderr};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use htabs::core::layout::Orientation;
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};

use crate::app::{
    demo,
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::ui::{
    content::ContentPane,
    layout::AppLayout,
    tab_strip::{strip_block, TabStrip},
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Hierarchical tabs on a flat tab strip")]
struct Cli {
    /// Tab placement: `stacked` (sidebar) or `flowed` (top row).
    /// Defaults to the value in the config file.
    #[arg(long)]
    orientation: Option<Orientation>,

    /// Number of tabs in the sample forest.
    #[arg(long, default_value_t = 15)]
    tabs: usize,

    /// Seed for the sample forest.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Columns each nesting level shifts the tab highlight.
    #[arg(long)]
    tab_indent: Option<u16>,

    /// Columns each nesting level shifts the tab title.
    #[arg(long)]
    header_indent: Option<u16>,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── build initial forest ──────────────────────────────────
    let mut user_config = config::AppConfig::load();
    if let Some(orientation) = cli.orientation {
        user_config.orientation = orientation;
    }
    if let Some(indent) = cli.tab_indent {
        user_config.tab_indent = indent;
    }
    if let Some(indent) = cli.header_indent {
        user_config.header_indent = indent;
    }

    let mut state = AppState::new(user_config);
    demo::seed_forest(&mut state.tabs, cli.tabs, cli.seed)?;
    state.tabs.select(0);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(Duration::from_millis(100));

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            let orientation = state.tabs.orientation();
            let layout =
                AppLayout::from_area(frame.area(), orientation, state.config.tab_bar_width);

            let strip = TabStrip::new(&state.tabs).block(strip_block(orientation));
            frame.render_stateful_widget(strip, layout.strip_area, &mut state.strip_state);

            frame.render_widget(ContentPane { tabs: &state.tabs }, layout.content_area);

            let hint = state.config.status_bar_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
            AppEvent::Resize(_, _) | AppEvent::Tick => {}
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
