pub mod config;
pub mod deploy;
pub mod draft;
pub mod error;
pub mod wallet;

pub use config::AppConfig;
pub use deploy::{DeployOutcome, DeployPhase, DeploymentSubmitter};
pub use draft::{ClarityVersion, ContractDraft};
pub use error::{AppError, AppResult};
