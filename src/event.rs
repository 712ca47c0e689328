use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use crate::system::snapshot::Snapshot;

/// Why a refresh was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshCause {
    Startup,
    Poll,
    AfterKill,
    Manual,
}

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Refresh(RefreshCause),
    Snapshot(Option<Snapshot>),
}

pub type EventSender = mpsc::UnboundedSender<Event>;

/// Owns the single event queue the UI loop drains. Terminal input is pumped
/// into it by a background task; timers and fetch completions push into it
/// through [`EventHandler::sender`].
pub struct EventHandler {
    tx: EventSender,
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let input_tx = tx.clone();

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            while let Some(maybe_event) = reader.next().await {
                let evt = match maybe_event {
                    Ok(evt) => evt,
                    Err(e) => {
                        tracing::error!(error = %e, "terminal input stream failed");
                        break;
                    }
                };
                let mapped = match evt {
                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                    CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                    _ => None,
                };
                if let Some(e) = mapped
                    && input_tx.send(e).is_err()
                {
                    break;
                }
            }
        });

        Self {
            tx,
            rx,
            _task: task,
        }
    }

    pub fn sender(&self) -> EventSender {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Timer side of the refresh cycle. Neither the one-shot delays nor the
/// polling interval can be cancelled; they end when the event queue closes.
#[derive(Clone, Debug)]
pub struct RefreshTimer {
    tx: EventSender,
}

impl RefreshTimer {
    pub fn new(tx: EventSender) -> Self {
        Self { tx }
    }

    /// Emits one `Refresh(cause)` after `delay`.
    pub fn schedule_once(&self, delay: Duration, cause: RefreshCause) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Event::Refresh(cause));
        });
    }

    /// Emits `Refresh(Poll)` every `period`, first one a full period from now.
    pub fn arm_interval(&self, period: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                if tx.send(Event::Refresh(RefreshCause::Poll)).is_err() {
                    break;
                }
            }
        });
    }

    pub fn sender(&self) -> &EventSender {
        &self.tx
    }
}
