//! Event types and the main event loop driver.
//!
//! This module defines the [`Event`] enum (keyboard input, ticks, and results
//! coming back from background fetches) and the [`EventHandler`], which runs
//! a background task that polls crossterm for key events and emits periodic
//! [`Event::Tick`]s. The main loop receives events via [`EventHandler::next`];
//! spawned fetch tasks send events via [`EventHandler::tx`].

use crate::dashboard::Stage;
use crate::models::{Coordinates, Location};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::error;

/// Events processed by the application event loop.
///
/// Results from background work carry the generation (or request id) they
/// were started under, so [`App`](crate::app::App) can drop anything that
/// belongs to a superseded request.
#[derive(Debug)]
pub enum Event {
    /// Periodic tick used for the search debounce and tab reveal delay.
    Tick,
    /// User key press from the terminal.
    Input(KeyEvent),
    /// Geolocation finished for the current-location route.
    Located { generation: u64, at: Coordinates },
    /// One step of the weather chain completed.
    Weather { generation: u64, stage: Stage },
    /// The weather chain completed every step.
    WeatherDone { generation: u64 },
    /// The weather chain stopped on an error; payload is the message.
    WeatherFailed { generation: u64, message: String },
    /// Reverse geocoding produced a place label.
    PlaceResolved { generation: u64, name: String },
    /// Geocoding results for search request `id`.
    SearchResults {
        id: u64,
        results: Result<Vec<Location>, String>,
    },
}

/// Multiplexes terminal input and ticks into a single event stream.
///
/// Holds an unbounded channel: the sender ([`tx`](EventHandler::tx)) can be
/// cloned and given to fetch tasks, while the receiver is consumed by
/// [`next`](EventHandler::next) in the main loop.
pub struct EventHandler {
    /// Sender for posting events from background tasks.
    pub tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Creates a new event handler and spawns the input/tick task.
    ///
    /// The spawned task polls crossterm with a timeout of `tick_rate_ms`;
    /// when a key is pressed it sends [`Event::Input`], and when the tick
    /// interval elapses it sends [`Event::Tick`]. If reading the terminal
    /// fails the task logs the error and stops.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        tokio::spawn(async move {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::from_secs(0));
                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if event_tx.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!("Terminal read failed: {}", e);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        error!("Terminal poll failed: {}", e);
                        break;
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    if event_tx.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { tx, rx }
    }

    /// Receives the next event from the channel.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
