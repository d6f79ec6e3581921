//! JSON-RPC client for a local wallet bridge.

use async_trait::async_trait;
use clarity_deployer_types::{
    GetAddressesResult, JsonRpcRequest, JsonRpcResponse, METHOD_GET_ADDRESSES,
};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::{AppConfig, ConnectorConfig};
use crate::error::{AppError, AppResult};
use crate::wallet::connector::WalletConnector;
use crate::wallet::session::{SessionAddresses, SessionStorage, StoredAddress};
use crate::wallet::store::SessionStore;

/// Wallet connector that forwards every call to a JSON-RPC bridge over HTTP.
///
/// `connect` asks the wallet for its addresses and persists them, the same way
/// browser connectors keep their session in local storage.
pub struct BridgeConnector {
    http: Client,
    endpoint: String,
    store: SessionStore,
}

impl std::fmt::Debug for BridgeConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConnector")
            .field("endpoint", &self.endpoint)
            .field("session", &self.store.path())
            .finish_non_exhaustive()
    }
}

impl BridgeConnector {
    pub fn new(config: &ConnectorConfig, store: SessionStore) -> AppResult<Self> {
        // No request timeout: a deployment waits for the user in the wallet.
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            store,
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(&config.connector, SessionStore::from_config(config)?)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    async fn call(&self, method: &str, params: Value) -> AppResult<Value> {
        let request = JsonRpcRequest::new(Uuid::new_v4().to_string(), method, params);
        debug!("Calling wallet bridge: {} ({})", method, request.id);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Wallet bridge unreachable at {}: {}", self.endpoint, e);
                AppError::Http(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Wallet bridge returned {}: {}", status, body);
            return Err(AppError::bridge(format!("bridge returned {}: {}", status, body)));
        }

        let body: JsonRpcResponse = response.json().await?;
        if let Some(err) = body.error {
            debug!("Wallet answered {} with error {}: {}", method, err.code, err.message);
            return Err(AppError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        Ok(body.result.unwrap_or(Value::Null))
    }
}

/// Split a `getAddresses` result into the persisted session shape.
pub fn session_from_addresses(result: GetAddressesResult) -> SessionStorage {
    let mut addresses = SessionAddresses::default();
    for entry in result.addresses {
        let stored = StoredAddress {
            address: entry.address.clone(),
        };
        if entry.is_stx() {
            addresses.stx.push(stored);
        } else {
            addresses.btc.push(stored);
        }
    }
    SessionStorage { addresses }
}

#[async_trait]
impl WalletConnector for BridgeConnector {
    async fn connect(&self) -> AppResult<()> {
        let result = self.call(METHOD_GET_ADDRESSES, json!({})).await?;
        let result: GetAddressesResult = serde_json::from_value(result)?;
        let storage = session_from_addresses(result);

        if storage.first_stx_address().is_none() {
            return Err(AppError::bridge("wallet returned no STX address"));
        }

        self.store.save(&storage)?;
        info!("Wallet session saved to {}", self.store.path().display());
        Ok(())
    }

    async fn disconnect(&self) -> AppResult<()> {
        self.store.clear()
    }

    fn is_connected(&self) -> bool {
        self.store
            .load()
            .map(|storage| storage.has_addresses())
            .unwrap_or(false)
    }

    fn get_local_storage(&self) -> Option<SessionStorage> {
        self.store.load()
    }

    async fn request(&self, method: &str, params: Value) -> AppResult<Value> {
        self.call(method, params).await
    }
}
