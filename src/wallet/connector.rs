use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppResult;
use crate::wallet::session::SessionStorage;

/// External wallet connector.
///
/// Key management, signing and broadcast all happen behind this trait; the
/// deployer only asks for a session and forwards one request per deployment.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Interactive authorization. Resolves once the user approves or rejects
    /// in the wallet's own UI.
    async fn connect(&self) -> AppResult<()>;

    /// Forget the session. Callers clear their local state whatever this returns.
    async fn disconnect(&self) -> AppResult<()>;

    /// Local query of the connector's session state.
    fn is_connected(&self) -> bool;

    /// Persisted session, if any.
    fn get_local_storage(&self) -> Option<SessionStorage>;

    /// Generic RPC call forwarded to the wallet.
    async fn request(&self, method: &str, params: Value) -> AppResult<Value>;
}
