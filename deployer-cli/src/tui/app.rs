use std::sync::Arc;

use clarity_deployer::deploy::request_deployment;
use clarity_deployer::wallet::{ConnectionTracker, WalletConnector};
use clarity_deployer::{AppConfig, ClarityVersion, ContractDraft, DeploymentSubmitter};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::tui::event::AppEvent;
use crate::tui::input::{EditField, InputMode};
use crate::tui::widgets::Spinner;

/// Main application state
pub struct App {
    pub config: AppConfig,
    connector: Arc<dyn WalletConnector>,
    pub tracker: ConnectionTracker,
    pub draft: ContractDraft,
    pub submitter: DeploymentSubmitter,
    pub input_mode: InputMode,
    pub edit_field: EditField,
    pub connecting: bool,
    /// Ticks left before the "Copied!" badge disappears
    pub copied_ticks: u32,
    pub spinner: Spinner,
    pub status_message: Option<(String, bool)>, // (message, is_error)
    pub should_quit: bool,
    pub tx: Option<mpsc::UnboundedSender<AppEvent>>,
    /// Background disconnect a later connect must wait for
    pending_disconnect: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(config: AppConfig, connector: Arc<dyn WalletConnector>) -> Self {
        let mut tracker = ConnectionTracker::new();
        tracker.check_existing_session(connector.as_ref());
        let draft = ContractDraft::new(config.ui.default_version);

        Self {
            config,
            connector,
            tracker,
            draft,
            submitter: DeploymentSubmitter::new(),
            input_mode: InputMode::Normal,
            edit_field: EditField::Name,
            connecting: false,
            copied_ticks: 0,
            spinner: Spinner::new(String::new()),
            status_message: None,
            should_quit: false,
            tx: None,
            pending_disconnect: None,
        }
    }

    pub fn set_sender(&mut self, tx: mpsc::UnboundedSender<AppEvent>) {
        self.tx = Some(tx);
    }

    /// Handle an event; returns false once the app should exit.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Quit => {
                self.should_quit = true;
                false
            }
            AppEvent::Key(key) => {
                // Ctrl-C always quits
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    self.should_quit = true;
                    return false;
                }
                self.handle_key(key);
                !self.should_quit
            }
            AppEvent::Tick => {
                self.spinner.tick();
                self.copied_ticks = self.copied_ticks.saturating_sub(1);
                true
            }
            AppEvent::WalletConnected { result } => {
                self.connecting = false;
                match result {
                    Ok(storage) => {
                        self.tracker.mark_connected(storage);
                        self.status_message = None;
                    }
                    Err(e) => {
                        error!("Error connecting wallet: {}", e);
                        self.status_message = Some((format!("Error: {}", e), true));
                    }
                }
                self.sync_spinner();
                true
            }
            AppEvent::DeployFinished { result } => {
                self.submitter.finish(result, &mut self.draft);
                if !self.tracker.is_connected() {
                    debug!("Deployment resolved after disconnect; dropping its status");
                    self.submitter.reset();
                }
                self.sync_spinner();
                true
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Insert => self.handle_insert_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if !self.tracker.is_connected() {
            if key.code == KeyCode::Char('c') {
                self.connect_wallet();
            }
            return;
        }

        match key.code {
            KeyCode::Char('x') => self.disconnect_wallet(),
            KeyCode::Char('y') => self.copy_address(),
            KeyCode::Tab | KeyCode::BackTab => {
                let next = self.draft.version.toggle();
                self.draft.select_version(next);
            }
            KeyCode::Char('1') => self.draft.select_version(ClarityVersion::V2),
            KeyCode::Char('2') => self.draft.select_version(ClarityVersion::V3),
            KeyCode::Char('n') => self.start_editing(EditField::Name),
            KeyCode::Char('e') => self.start_editing(EditField::Source),
            KeyCode::Char('N') => self.draft.clear_name(),
            KeyCode::Char('E') => self.draft.clear_source(),
            KeyCode::Char('d') => self.start_deploy(),
            KeyCode::Char('t') => self.copy_transaction_id(),
            _ => {}
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) {
        let field = match self.edit_field {
            EditField::Name => &mut self.draft.name,
            EditField::Source => &mut self.draft.source,
        };

        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => match self.edit_field {
                EditField::Name => self.input_mode = InputMode::Normal,
                EditField::Source => field.push('\n'),
            },
            KeyCode::Tab if self.edit_field == EditField::Source => field.push_str("  "),
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Char(c) => field.push(c),
            _ => {}
        }
    }

    fn start_editing(&mut self, field: EditField) {
        self.edit_field = field;
        self.input_mode = InputMode::Insert;
    }

    /// Deploy control is enabled for a connected session with both fields
    /// filled in and no attempt in flight.
    pub fn can_deploy(&self) -> bool {
        self.tracker.session().is_ready()
            && self.draft.is_submittable()
            && !self.submitter.in_progress()
    }

    fn connect_wallet(&mut self) {
        if self.connecting {
            return;
        }
        let Some(tx) = self.tx.clone() else {
            warn!("Event channel not ready; ignoring connect");
            return;
        };

        self.connecting = true;
        self.status_message = None;
        self.spinner.set_message("Waiting for wallet approval...");
        self.sync_spinner();

        let pending = self.pending_disconnect.take();
        let connector = Arc::clone(&self.connector);
        tokio::spawn(async move {
            // The old session must be gone before the new one is saved
            if let Some(pending) = pending {
                let _ = pending.await;
            }
            let result = connector
                .connect()
                .await
                .map(|()| connector.get_local_storage());
            let _ = tx.send(AppEvent::WalletConnected { result });
        });
    }

    fn disconnect_wallet(&mut self) {
        self.tracker.clear();
        self.copied_ticks = 0;
        self.submitter.reset();

        let connector = Arc::clone(&self.connector);
        self.pending_disconnect = Some(tokio::spawn(async move {
            if let Err(e) = connector.disconnect().await {
                warn!("Wallet disconnect reported an error: {}", e);
            }
        }));
    }

    fn start_deploy(&mut self) {
        if !self.can_deploy() {
            debug!("Deploy control is disabled");
            return;
        }
        let Some(tx) = self.tx.clone() else {
            warn!("Event channel not ready; ignoring deploy");
            return;
        };

        let params = match self.submitter.begin(self.tracker.session(), &self.draft) {
            Ok(params) => params,
            // The submitter already holds the failure status
            Err(_) => return,
        };

        self.spinner.set_message("Waiting for wallet confirmation...");
        self.sync_spinner();

        let connector = Arc::clone(&self.connector);
        tokio::spawn(async move {
            let result = request_deployment(connector.as_ref(), &params).await;
            let _ = tx.send(AppEvent::DeployFinished { result });
        });
    }

    fn copy_address(&mut self) {
        let Some(address) = self.tracker.address().map(str::to_string) else {
            self.status_message = Some(("No address to copy".to_string(), true));
            return;
        };
        match copy_to_clipboard(address) {
            Ok(()) => self.copied_ticks = self.config.ui.copied_badge_ticks(),
            Err(e) => self.status_message = Some((e, true)),
        }
    }

    fn copy_transaction_id(&mut self) {
        let Some(txid) = self.submitter.transaction_id().map(str::to_string) else {
            return;
        };
        match copy_to_clipboard(txid) {
            Ok(()) => {
                self.status_message =
                    Some(("Transaction ID copied to clipboard".to_string(), false));
            }
            Err(e) => self.status_message = Some((e, true)),
        }
    }

    fn sync_spinner(&mut self) {
        if self.connecting || self.submitter.in_progress() {
            self.spinner.start();
        } else {
            self.spinner.stop();
        }
    }
}

fn copy_to_clipboard(text: String) -> Result<(), String> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| format!("Clipboard unavailable: {}", e))?;
    clipboard
        .set_text(text)
        .map_err(|e| format!("Clipboard write failed: {}", e))
}
