//! Deployment submitter.
//!
//! One attempt moves through `Idle -> Validating -> AwaitingConfirmation ->
//! Completed`. The phase is the single source of truth: "in progress" and the
//! status banner are both derived from it, so a finished attempt can never
//! still look busy.
//!
//! The split between [`DeploymentSubmitter::begin`] and
//! [`DeploymentSubmitter::finish`] lets an event loop keep drawing while the
//! wallet request is in flight. [`DeploymentSubmitter::deploy`] runs the whole
//! attempt inline.

use clarity_deployer_types::{
    DeployContractParams, DeployContractResult, METHOD_DEPLOY_CONTRACT, TARGET_NETWORK,
};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::draft::ContractDraft;
use crate::error::{AppError, AppResult};
use crate::wallet::{WalletConnector, WalletSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Success { txid: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeployPhase {
    #[default]
    Idle,
    Validating,
    AwaitingConfirmation { params: DeployContractParams },
    Completed(DeployOutcome),
}

#[derive(Debug, Default)]
pub struct DeploymentSubmitter {
    phase: DeployPhase,
}

/// Build the `stx_deployContract` parameters for a draft.
pub fn deploy_params(draft: &ContractDraft) -> DeployContractParams {
    DeployContractParams {
        name: draft.name.clone(),
        clarity_code: draft.source.clone(),
        clarity_version: draft.version.as_param().to_string(),
        network: TARGET_NETWORK.to_string(),
    }
}

/// Send one `stx_deployContract` request through the connector.
pub async fn request_deployment(
    connector: &dyn WalletConnector,
    params: &DeployContractParams,
) -> AppResult<Value> {
    let params = serde_json::to_value(params)?;
    connector.request(METHOD_DEPLOY_CONTRACT, params).await
}

/// Extract the transaction id from a wallet response.
fn transaction_id(response: Value) -> AppResult<String> {
    let result: DeployContractResult =
        serde_json::from_value(response).map_err(|_| AppError::MissingTransactionId)?;
    match result.txid {
        Some(txid) if !txid.trim().is_empty() => Ok(txid),
        _ => Err(AppError::MissingTransactionId),
    }
}

/// Every failed attempt reads "Error: <reason>".
fn failure(err: &AppError) -> DeployOutcome {
    DeployOutcome::Failed {
        message: format!("Error: {}", err),
    }
}

fn check_preconditions(session: &WalletSession, draft: &ContractDraft) -> AppResult<()> {
    if !session.is_ready() {
        return Err(AppError::WalletNotConnected);
    }
    if draft.name_is_blank() {
        return Err(AppError::MissingContractName);
    }
    if draft.source_is_blank() {
        return Err(AppError::MissingContractCode);
    }
    Ok(())
}

impl DeploymentSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DeployPhase {
        &self.phase
    }

    /// True from `begin` until `finish`.
    pub fn in_progress(&self) -> bool {
        matches!(
            self.phase,
            DeployPhase::Validating | DeployPhase::AwaitingConfirmation { .. }
        )
    }

    /// Text for the status banner. `None` before the first attempt.
    pub fn status_message(&self) -> Option<String> {
        match &self.phase {
            DeployPhase::Idle => None,
            DeployPhase::Validating => Some("Preparing deployment...".to_string()),
            DeployPhase::AwaitingConfirmation { .. } => {
                Some("Waiting for wallet confirmation...".to_string())
            }
            DeployPhase::Completed(DeployOutcome::Success { txid }) => {
                Some(format!("Deployment successful! TX ID: {}", txid))
            }
            DeployPhase::Completed(DeployOutcome::Failed { message }) => Some(message.clone()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.phase, DeployPhase::Completed(DeployOutcome::Failed { .. }))
    }

    /// Transaction id of the last successful attempt, for copying.
    pub fn transaction_id(&self) -> Option<&str> {
        match &self.phase {
            DeployPhase::Completed(DeployOutcome::Success { txid }) => Some(txid),
            _ => None,
        }
    }

    /// Validate and move to `AwaitingConfirmation`.
    ///
    /// Returns the parameters the caller must send with `stx_deployContract`.
    /// On a failed precondition the attempt is already completed and no
    /// request must be made. Refuses to start while another attempt is in flight.
    pub fn begin(
        &mut self,
        session: &WalletSession,
        draft: &ContractDraft,
    ) -> AppResult<DeployContractParams> {
        if self.in_progress() {
            warn!("Deploy triggered while an attempt is in flight");
            return Err(AppError::DeploymentInProgress);
        }

        self.phase = DeployPhase::Validating;
        if let Err(e) = check_preconditions(session, draft) {
            debug!("Deployment rejected before submission: {}", e);
            self.fail(&e);
            return Err(e);
        }

        let params = deploy_params(draft);
        info!(
            "Requesting deployment of '{}' (Clarity {}, {} chars) on {}",
            params.name,
            params.clarity_version,
            draft.source_char_count(),
            params.network
        );
        self.phase = DeployPhase::AwaitingConfirmation {
            params: params.clone(),
        };
        Ok(params)
    }

    /// Apply the wallet's answer. Always leaves the attempt completed; the
    /// draft is cleared only on success.
    pub fn finish(
        &mut self,
        response: AppResult<Value>,
        draft: &mut ContractDraft,
    ) -> DeployOutcome {
        if !matches!(self.phase, DeployPhase::AwaitingConfirmation { .. }) {
            warn!("Deployment result arrived with no request awaiting confirmation");
        }

        let outcome = match response.and_then(transaction_id) {
            Ok(txid) => {
                info!("Deployment broadcast: {}", txid);
                draft.reset_after_success();
                DeployOutcome::Success { txid }
            }
            Err(e) => {
                error!("Deployment failed: {}", e);
                failure(&e)
            }
        };
        self.phase = DeployPhase::Completed(outcome.clone());
        outcome
    }

    /// Run one full attempt against the connector.
    pub async fn deploy(
        &mut self,
        session: &WalletSession,
        draft: &mut ContractDraft,
        connector: &dyn WalletConnector,
    ) -> DeployOutcome {
        let params = match self.begin(session, draft) {
            Ok(params) => params,
            Err(e) => return failure(&e),
        };

        let response = request_deployment(connector, &params).await;
        self.finish(response, draft)
    }

    /// Forget the last outcome.
    pub fn reset(&mut self) {
        if !self.in_progress() {
            self.phase = DeployPhase::Idle;
        }
    }

    fn fail(&mut self, err: &AppError) {
        self.phase = DeployPhase::Completed(failure(err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::ClarityVersion;
    use crate::wallet::SessionStorage;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::Mutex;

    const ADDR: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

    /// Connector that records requests and replies with a canned answer.
    struct ScriptedConnector {
        reply: Mutex<Option<AppResult<Value>>>,
        requests: Mutex<Vec<(String, Value)>>,
    }

    impl ScriptedConnector {
        fn replying(reply: AppResult<Value>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl WalletConnector for ScriptedConnector {
        async fn connect(&self) -> AppResult<()> {
            Ok(())
        }

        async fn disconnect(&self) -> AppResult<()> {
            Ok(())
        }

        fn is_connected(&self) -> bool {
            true
        }

        fn get_local_storage(&self) -> Option<SessionStorage> {
            Some(SessionStorage::with_stx(ADDR))
        }

        async fn request(&self, method: &str, params: Value) -> AppResult<Value> {
            self.requests.lock().unwrap().push((method.to_string(), params));
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(json!({ "txid": "0xdefault" })))
        }
    }

    fn connected() -> WalletSession {
        WalletSession {
            connected: true,
            address: Some(ADDR.to_string()),
        }
    }

    fn filled_draft(version: ClarityVersion) -> ContractDraft {
        let mut draft = ContractDraft::new(version);
        draft.set_name("counter");
        draft.set_source("(define-data-var count int 0)");
        draft
    }

    #[tokio::test]
    async fn disconnected_wallet_issues_no_request() {
        let connector = ScriptedConnector::replying(Ok(json!({ "txid": "0xabc" })));
        let mut submitter = DeploymentSubmitter::new();
        let mut draft = filled_draft(ClarityVersion::V2);

        let outcome = submitter
            .deploy(&WalletSession::default(), &mut draft, &connector)
            .await;

        assert_eq!(connector.request_count(), 0);
        assert_eq!(
            outcome,
            DeployOutcome::Failed {
                message: "Error: Wallet not connected".to_string()
            }
        );
        assert!(submitter.status_message().unwrap().contains("Wallet"));
        assert!(!submitter.in_progress());
    }

    #[tokio::test]
    async fn each_guard_has_its_own_message() {
        let connector = ScriptedConnector::replying(Ok(json!({ "txid": "0xabc" })));
        let mut submitter = DeploymentSubmitter::new();

        let mut draft = filled_draft(ClarityVersion::V2);
        draft.clear_name();
        submitter.deploy(&connected(), &mut draft, &connector).await;
        assert_eq!(
            submitter.status_message().unwrap(),
            "Error: Contract name is required"
        );

        let mut draft = filled_draft(ClarityVersion::V2);
        draft.set_source("   \n\t");
        submitter.deploy(&connected(), &mut draft, &connector).await;
        assert_eq!(
            submitter.status_message().unwrap(),
            "Error: Contract code is required"
        );
        assert_eq!(connector.request_count(), 0);
    }

    #[tokio::test]
    async fn success_embeds_txid_and_clears_draft() {
        let connector = ScriptedConnector::replying(Ok(json!({ "txid": "0xfeed" })));
        let mut submitter = DeploymentSubmitter::new();
        let mut draft = filled_draft(ClarityVersion::V3);

        let outcome = submitter.deploy(&connected(), &mut draft, &connector).await;

        assert_eq!(
            outcome,
            DeployOutcome::Success {
                txid: "0xfeed".to_string()
            }
        );
        assert_eq!(
            submitter.status_message().unwrap(),
            "Deployment successful! TX ID: 0xfeed"
        );
        assert_eq!(submitter.transaction_id(), Some("0xfeed"));
        assert!(draft.name.is_empty());
        assert!(draft.source.is_empty());
        assert_eq!(draft.version, ClarityVersion::V3);
    }

    #[tokio::test]
    async fn request_carries_draft_and_network() {
        let connector = ScriptedConnector::replying(Ok(json!({ "txid": "0x1" })));
        let mut submitter = DeploymentSubmitter::new();
        let mut draft = filled_draft(ClarityVersion::V3);

        submitter.deploy(&connected(), &mut draft, &connector).await;

        let requests = connector.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (method, params) = &requests[0];
        assert_eq!(method, "stx_deployContract");
        assert_eq!(
            params,
            &json!({
                "name": "counter",
                "clarityCode": "(define-data-var count int 0)",
                "clarityVersion": "3",
                "network": "testnet"
            })
        );
    }

    #[tokio::test]
    async fn missing_txid_keeps_draft() {
        let connector = ScriptedConnector::replying(Ok(json!({ "transaction": "0x00" })));
        let mut submitter = DeploymentSubmitter::new();
        let mut draft = filled_draft(ClarityVersion::V2);

        submitter.deploy(&connected(), &mut draft, &connector).await;

        assert!(submitter.is_error());
        assert_eq!(
            submitter.status_message().unwrap(),
            "Error: Deployment failed - no transaction ID received"
        );
        assert_eq!(draft.name, "counter");
        assert!(!draft.source.is_empty());
    }

    #[tokio::test]
    async fn null_response_is_missing_txid() {
        let connector = ScriptedConnector::replying(Ok(Value::Null));
        let mut submitter = DeploymentSubmitter::new();
        let mut draft = filled_draft(ClarityVersion::V2);

        submitter.deploy(&connected(), &mut draft, &connector).await;
        assert_eq!(
            submitter.status_message().unwrap(),
            "Error: Deployment failed - no transaction ID received"
        );
    }

    #[tokio::test]
    async fn rejection_message_is_prefixed() {
        let connector = ScriptedConnector::replying(Err(AppError::Rpc {
            code: 4001,
            message: "User rejected request".to_string(),
        }));
        let mut submitter = DeploymentSubmitter::new();
        let mut draft = filled_draft(ClarityVersion::V2);

        submitter.deploy(&connected(), &mut draft, &connector).await;

        assert_eq!(
            submitter.status_message().unwrap(),
            "Error: User rejected request"
        );
        assert_eq!(draft.name, "counter");
    }

    #[test]
    fn in_progress_spans_begin_to_finish() {
        let mut submitter = DeploymentSubmitter::new();
        let mut draft = filled_draft(ClarityVersion::V2);
        assert!(!submitter.in_progress());

        let params = submitter.begin(&connected(), &draft).unwrap();
        assert_eq!(params.clarity_version, "2");
        assert!(submitter.in_progress());
        assert_eq!(
            submitter.status_message().unwrap(),
            "Waiting for wallet confirmation..."
        );

        submitter.finish(Ok(json!({ "txid": "0x2" })), &mut draft);
        assert!(!submitter.in_progress());
    }

    #[test]
    fn second_begin_is_refused_while_awaiting() {
        let mut submitter = DeploymentSubmitter::new();
        let draft = filled_draft(ClarityVersion::V2);
        submitter.begin(&connected(), &draft).unwrap();

        let err = submitter.begin(&connected(), &draft).unwrap_err();
        assert!(matches!(err, AppError::DeploymentInProgress));
        assert!(matches!(
            submitter.phase(),
            DeployPhase::AwaitingConfirmation { .. }
        ));
    }

    #[test]
    fn next_attempt_overwrites_previous_outcome() {
        let mut submitter = DeploymentSubmitter::new();
        let mut draft = filled_draft(ClarityVersion::V2);

        submitter.begin(&connected(), &draft).unwrap();
        submitter.finish(
            Err(AppError::Rpc {
                code: -32000,
                message: "insufficient funds".to_string(),
            }),
            &mut draft,
        );
        assert!(submitter.is_error());

        submitter.begin(&connected(), &draft).unwrap();
        submitter.finish(Ok(json!({ "txid": "0x3" })), &mut draft);
        assert!(!submitter.is_error());
        assert_eq!(submitter.transaction_id(), Some("0x3"));
    }

    #[test]
    fn version_tab_maps_to_param() {
        for (version, expected) in [(ClarityVersion::V2, "2"), (ClarityVersion::V3, "3")] {
            let params = deploy_params(&filled_draft(version));
            assert_eq!(params.clarity_version, expected);
            assert_eq!(params.network, "testnet");
        }
    }

    proptest! {
        #[test]
        fn blank_fields_never_reach_the_wallet(
            name in "[ \t\n]{0,6}",
            source in "[ \t\n]{0,6}",
            fill_name in any::<bool>(),
        ) {
            let mut draft = ContractDraft::default();
            // at least one of the two fields is blank
            if fill_name {
                draft.set_name("counter");
            } else {
                draft.set_name(name);
            }
            draft.set_source(source);

            let connector = ScriptedConnector::replying(Ok(json!({ "txid": "0x9" })));
            let mut submitter = DeploymentSubmitter::new();
            let outcome = tokio_test::block_on(submitter.deploy(&connected(), &mut draft, &connector));

            prop_assert_eq!(connector.request_count(), 0);
            prop_assert!(matches!(outcome, DeployOutcome::Failed { .. }), "expected DeployOutcome::Failed");
            prop_assert!(!submitter.in_progress());
        }
    }
}
