//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task
//! that forwards them over a channel so the main loop stays non-blocking.
//! The poll timeout doubles as the frame tick: when no input arrives
//! within one frame interval, a `Tick` is sent so the pacer still gets a
//! chance to drain pending recomputes.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Spawns a background task that polls the terminal for events and sends
/// them through the returned channel.  `frame_interval` is both the poll
/// timeout and the idle tick rate.
pub fn spawn_event_reader(frame_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let has_event = event::poll(frame_interval).unwrap_or(false);
            if has_event {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => AppEvent::Key(k),
                        CtEvent::Mouse(m) => AppEvent::Mouse(m),
                        CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                        _ => continue,
                    };
                    if tx.send(app_event).is_err() {
                        break; // receiver dropped
                    }
                }
            } else {
                // Quiet frame — still tick so animations and the pacer run.
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        }
    });

    rx
}
