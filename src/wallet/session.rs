use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::AppResult;
use crate::wallet::connector::WalletConnector;

/// Session as persisted by the connector:
/// `{"addresses": {"stx": [{"address": ...}], "btc": [...]}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStorage {
    #[serde(default)]
    pub addresses: SessionAddresses,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAddresses {
    #[serde(default)]
    pub stx: Vec<StoredAddress>,
    #[serde(default)]
    pub btc: Vec<StoredAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAddress {
    pub address: String,
}

impl SessionStorage {
    /// Parse an arbitrary JSON payload. Anything that does not match the
    /// expected shape yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(storage) => Some(storage),
            Err(e) => {
                debug!("Ignoring malformed session payload: {}", e);
                None
            }
        }
    }

    pub fn with_stx(address: impl Into<String>) -> Self {
        Self {
            addresses: SessionAddresses {
                stx: vec![StoredAddress {
                    address: address.into(),
                }],
                btc: Vec::new(),
            },
        }
    }

    /// Only the first STX account is ever used.
    pub fn first_stx_address(&self) -> Option<&str> {
        self.addresses
            .stx
            .first()
            .map(|a| a.address.as_str())
            .filter(|a| !a.is_empty())
    }

    pub fn has_addresses(&self) -> bool {
        !self.addresses.stx.is_empty() || !self.addresses.btc.is_empty()
    }
}

/// What the deployer knows about the wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub connected: bool,
    pub address: Option<String>,
}

impl WalletSession {
    /// Connected and an account address is known.
    pub fn is_ready(&self) -> bool {
        self.connected && self.address.is_some()
    }
}

/// Tracks the connection state on behalf of the UI.
#[derive(Debug, Default)]
pub struct ConnectionTracker {
    session: WalletSession,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn is_connected(&self) -> bool {
        self.session.connected
    }

    pub fn address(&self) -> Option<&str> {
        self.session.address.as_deref()
    }

    /// Pick up a session that was authorized in an earlier run. No session is
    /// a normal state.
    pub fn check_existing_session(&mut self, connector: &dyn WalletConnector) {
        let connected = connector.is_connected();
        self.session.connected = connected;
        if connected {
            if let Some(address) = connector
                .get_local_storage()
                .as_ref()
                .and_then(SessionStorage::first_stx_address)
            {
                self.session.address = Some(address.to_string());
            }
            info!("Restored wallet session (address: {:?})", self.session.address);
        } else {
            debug!("No existing wallet session");
        }
    }

    /// Interactive connect. A failure is logged and handed back so the caller
    /// can show it; the tracker stays disconnected.
    pub async fn connect_wallet(&mut self, connector: &dyn WalletConnector) -> AppResult<()> {
        match connector.connect().await {
            Ok(()) => {
                self.mark_connected(connector.get_local_storage());
                Ok(())
            }
            Err(e) => {
                error!("Error connecting wallet: {}", e);
                Err(e)
            }
        }
    }

    /// Record a successful connect whose session has already been read.
    pub fn mark_connected(&mut self, storage: Option<SessionStorage>) {
        self.session.connected = true;
        if let Some(address) = storage.as_ref().and_then(SessionStorage::first_stx_address) {
            self.session.address = Some(address.to_string());
        }
        info!("Wallet connected (address: {:?})", self.session.address);
    }

    pub async fn disconnect_wallet(&mut self, connector: &dyn WalletConnector) {
        if let Err(e) = connector.disconnect().await {
            warn!("Wallet disconnect reported an error: {}", e);
        }
        self.clear();
    }

    /// Drop local state without waiting on the connector.
    pub fn clear(&mut self) {
        self.session = WalletSession::default();
        info!("Wallet disconnected");
    }
}

/// `SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7` -> `SP2J6Z...9EJ7`
pub fn truncate_middle(value: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= head + tail {
        return value.to_string();
    }
    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{}...{}", start, end)
}
