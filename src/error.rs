use thiserror::Error;

/// Application-wide error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Error object returned by the wallet. Displays the wallet's own message
    /// so it can be shown verbatim.
    #[error("{message}")]
    Rpc { code: i64, message: String },

    #[error("Wallet bridge error: {0}")]
    Bridge(String),

    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("Contract name is required")]
    MissingContractName,

    #[error("Contract code is required")]
    MissingContractCode,

    #[error("Deployment failed - no transaction ID received")]
    MissingTransactionId,

    #[error("A deployment is already awaiting wallet confirmation")]
    DeploymentInProgress,

    #[error("Could not find a config directory")]
    NoConfigDir,
}

impl AppError {
    pub fn bridge<S: Into<String>>(msg: S) -> Self {
        Self::Bridge(msg.into())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_error_displays_wallet_message() {
        let err = AppError::Rpc {
            code: 4001,
            message: "User rejected request".to_string(),
        };
        assert_eq!(err.to_string(), "User rejected request");
    }
}
