//! Event plumbing between the terminal and the drill.
//!
//! The game only changes on key presses, so sources block until something
//! arrives and there is no tick. A source that can no longer produce input
//! reports `Closed`, which ends the session.

use std::sync::mpsc::Receiver;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{debug, warn};

use crate::app::App;
use crate::keymap::{map_key, Command};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrillEvent {
    Key(KeyEvent),
    Resize,
    /// No more input will ever arrive
    Closed,
}

pub trait DrillEventSource {
    /// Block until the next event the drill cares about.
    fn next_event(&mut self) -> DrillEvent;
}

/// Reads the real terminal on the calling thread
#[derive(Debug, Default)]
pub struct CrosstermEventSource;

impl DrillEventSource for CrosstermEventSource {
    fn next_event(&mut self) -> DrillEvent {
        loop {
            match event::read() {
                // Windows reports releases too; only presses drive the game
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    return DrillEvent::Key(key)
                }
                Ok(Event::Resize(_, _)) => return DrillEvent::Resize,
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "terminal input failed");
                    return DrillEvent::Closed;
                }
            }
        }
    }
}

/// Events fed through a channel, e.g. from tests or another thread.
/// Once every sender is gone and the queue is drained it reports `Closed`.
pub struct ChannelEventSource {
    rx: Receiver<DrillEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<DrillEvent>) -> Self {
        Self { rx }
    }
}

impl DrillEventSource for ChannelEventSource {
    fn next_event(&mut self) -> DrillEvent {
        self.rx.recv().unwrap_or(DrillEvent::Closed)
    }
}

/// What the loop should do after one step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Idle,
    Quit,
}

/// Pulls one event at a time and applies it to the app
pub struct Runner<E: DrillEventSource> {
    events: E,
}

impl<E: DrillEventSource> Runner<E> {
    pub fn new(events: E) -> Self {
        Self { events }
    }

    pub fn step(&mut self, app: &mut App) -> Flow {
        match self.events.next_event() {
            DrillEvent::Closed => {
                debug!("event source closed");
                Flow::Quit
            }
            DrillEvent::Resize => Flow::Redraw,
            DrillEvent::Key(key) => match map_key(&app.view(), key) {
                Some(Command::Quit) => Flow::Quit,
                Some(Command::Dispatch(action)) => {
                    app.dispatch(action);
                    Flow::Redraw
                }
                None => Flow::Idle,
            },
        }
    }
}
