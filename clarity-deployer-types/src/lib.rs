//! JSON-RPC definitions for the Stacks wallet bridge.
//!
//! This crate contains the request/response envelopes and the method payloads
//! exchanged with a wallet connector. Field names follow the wallet RPC
//! conventions (camelCase), not Rust naming.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Deploys a Clarity contract from the connected STX account.
pub const METHOD_DEPLOY_CONTRACT: &str = "stx_deployContract";

/// Interactive account authorization. Returns every address the wallet exposes.
pub const METHOD_GET_ADDRESSES: &str = "getAddresses";

/// Network every deployment is sent to.
pub const TARGET_NETWORK: &str = "testnet";

/// Symbol used by wallets to tag Stacks addresses in `getAddresses` results.
pub const STX_SYMBOL: &str = "STX";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(id: impl Into<String>, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// Either `result` or `error` is set on a well-formed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id: Some(id),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Parameters of `stx_deployContract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployContractParams {
    pub name: String,
    pub clarity_code: String,
    /// "2" or "3"
    pub clarity_version: String,
    pub network: String,
}

/// Result of `stx_deployContract`. Wallets omit `txid` when nothing was broadcast.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployContractResult {
    #[serde(default)]
    pub txid: Option<String>,
}

/// Result of `getAddresses`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetAddressesResult {
    #[serde(default)]
    pub addresses: Vec<AddressEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressEntry {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl AddressEntry {
    /// Entries without a symbol are treated as STX; Stacks addresses start with `S`.
    pub fn is_stx(&self) -> bool {
        match self.symbol.as_deref() {
            Some(symbol) => symbol.eq_ignore_ascii_case(STX_SYMBOL),
            None => self.address.starts_with('S'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deploy_params_use_wallet_field_names() {
        let params = DeployContractParams {
            name: "counter".to_string(),
            clarity_code: "(define-data-var n int 0)".to_string(),
            clarity_version: "3".to_string(),
            network: TARGET_NETWORK.to_string(),
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "counter",
                "clarityCode": "(define-data-var n int 0)",
                "clarityVersion": "3",
                "network": "testnet"
            })
        );
    }

    #[test]
    fn deploy_result_without_txid() {
        let result: DeployContractResult = serde_json::from_value(json!({})).unwrap();
        assert!(result.txid.is_none());
    }

    #[test]
    fn error_response_parses() {
        let resp: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "1",
            "error": { "code": 4001, "message": "User rejected request" }
        }))
        .unwrap();
        assert!(resp.result.is_none());
        assert_eq!(resp.error.unwrap().message, "User rejected request");
    }

    #[test]
    fn address_symbol_detection() {
        let stx = AddressEntry {
            address: "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM".to_string(),
            symbol: None,
            public_key: None,
        };
        let btc = AddressEntry {
            address: "tb1qxyz".to_string(),
            symbol: Some("BTC".to_string()),
            public_key: None,
        };
        assert!(stx.is_stx());
        assert!(!btc.is_stx());
    }
}
