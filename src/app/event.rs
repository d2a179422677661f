//! Terminal event pump.
//!
//! A blocking task polls crossterm and forwards the events the tab strip cares
//! about over a channel, so the main loop only ever awaits the receiver.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// Events consumed by the application loop.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Nothing happened within the poll interval.
    Tick,
}

impl AppEvent {
    fn from_terminal(ev: Event) -> Option<Self> {
        match ev {
            // Windows reports releases too; only presses drive actions.
            Event::Key(k) if k.kind == KeyEventKind::Press => Some(Self::Key(k)),
            Event::Mouse(m) => Some(Self::Mouse(m)),
            Event::Resize(w, h) => Some(Self::Resize(w, h)),
            _ => None,
        }
    }
}

/// Start the event pump.  It stops once the receiver is dropped.
pub fn spawn_event_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let next = match event::poll(poll_interval) {
            Ok(true) => match event::read() {
                Ok(ev) => AppEvent::from_terminal(ev),
                Err(err) => {
                    tracing::warn!(%err, "terminal read failed");
                    None
                }
            },
            Ok(false) => Some(AppEvent::Tick),
            Err(err) => {
                tracing::warn!(%err, "terminal poll failed");
                break;
            }
        };
        if let Some(ev) = next {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    rx
}
