//! Contract draft: the name and source the user is about to submit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Clarity language version tagged on a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClarityVersion {
    #[default]
    #[serde(alias = "2")]
    V2,
    #[serde(alias = "3")]
    V3,
}

impl ClarityVersion {
    pub const ALL: [ClarityVersion; 2] = [ClarityVersion::V2, ClarityVersion::V3];

    /// Value of the `clarityVersion` request parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::V2 => "2",
            Self::V3 => "3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::V2 => "Clarity v2",
            Self::V3 => "Clarity v3",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            Self::V2 => "Current",
            Self::V3 => "Latest",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::V2 => Self::V3,
            Self::V3 => Self::V2,
        }
    }
}

impl fmt::Display for ClarityVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short())
    }
}

impl FromStr for ClarityVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2" | "v2" => Ok(Self::V2),
            "3" | "v3" => Ok(Self::V3),
            other => Err(format!("unsupported Clarity version: {other} (expected 2 or 3)")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractDraft {
    pub name: String,
    pub source: String,
    pub version: ClarityVersion,
}

impl ContractDraft {
    pub fn new(version: ClarityVersion) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    pub fn select_version(&mut self, version: ClarityVersion) {
        self.version = version;
    }

    pub fn clear_name(&mut self) {
        self.name.clear();
    }

    pub fn clear_source(&mut self) {
        self.source.clear();
    }

    /// Character count shown next to the editor
    pub fn source_char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Editor placeholder for the selected tab
    pub fn placeholder(&self) -> String {
        format!(
            "(define-public (hello-world)\n  (ok \"Hello, Clarity {}!\"))",
            self.version.short()
        )
    }

    pub fn name_is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }

    pub fn source_is_blank(&self) -> bool {
        self.source.trim().is_empty()
    }

    /// Both fields filled in. Connection state is checked separately.
    pub fn is_submittable(&self) -> bool {
        !self.name_is_blank() && !self.source_is_blank()
    }

    /// Clears name and source after a successful deployment; the tab stays.
    pub fn reset_after_success(&mut self) {
        self.clear_name();
        self.clear_source();
    }
}
