//! Wallet connection: the connector seam, its JSON-RPC bridge implementation,
//! the persisted session and the connection tracker the UI reads from.

pub mod bridge;
pub mod connector;
pub mod session;
pub mod store;

pub use bridge::BridgeConnector;
pub use connector::WalletConnector;
pub use session::{truncate_middle, ConnectionTracker, SessionAddresses, SessionStorage, StoredAddress, WalletSession};
pub use store::SessionStore;
