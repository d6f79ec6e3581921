use clarity_deployer::wallet::SessionStorage;
use clarity_deployer::AppResult;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::mpsc;

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Quit,
    // Async operation results
    WalletConnected { result: AppResult<Option<SessionStorage>> },
    DeployFinished { result: AppResult<Value> },
}

/// Translate a terminal event. Only key presses matter; releases, repeats,
/// mouse and resize events are dropped (resizes redraw on the next tick).
fn from_terminal(event: CrosstermEvent) -> Option<AppEvent> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        _ => None,
    }
}

/// Merges terminal input, the UI tick and async results into one queue.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(pump_terminal(tx.clone(), tick));
        Self { rx, tx }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    /// Sender for spawned tasks to report their results on
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }
}

/// Runs until the receiving side is dropped. A broken terminal stream ends
/// the app.
async fn pump_terminal(tx: mpsc::UnboundedSender<AppEvent>, tick: Duration) {
    let mut reader = EventStream::new();
    let mut ticker = tokio::time::interval(tick);

    loop {
        let event = tokio::select! {
            _ = ticker.tick() => Some(AppEvent::Tick),
            next = reader.next().fuse() => match next {
                Some(Ok(event)) => from_terminal(event),
                Some(Err(_)) | None => Some(AppEvent::Quit),
            },
        };

        if let Some(event) = event {
            let quit = matches!(event, AppEvent::Quit);
            if tx.send(event).is_err() || quit {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key_with_kind(kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char('d'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn only_key_presses_reach_the_app() {
        assert!(matches!(
            from_terminal(key_with_kind(KeyEventKind::Press)),
            Some(AppEvent::Key(k)) if k.code == KeyCode::Char('d')
        ));
        assert!(from_terminal(key_with_kind(KeyEventKind::Release)).is_none());
        assert!(from_terminal(key_with_kind(KeyEventKind::Repeat)).is_none());
        assert!(from_terminal(CrosstermEvent::Resize(80, 24)).is_none());
        assert!(from_terminal(CrosstermEvent::FocusGained).is_none());
    }
}
