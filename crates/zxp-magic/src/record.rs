use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// Shown when the backend claims success but sends no extension details.
pub const MISSING_RECORD_MESSAGE: &str =
    "Install reported success but returned no extension details.";

/// Backend-assigned identifier for an installed extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionId(String);

impl ExtensionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One host application an extension declares support for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCompatibility {
    #[serde(alias = "name")]
    pub host_name: String,
    #[serde(alias = "version")]
    pub host_version: String,
}

impl HostCompatibility {
    pub fn new(host_name: impl Into<String>, host_version: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            host_version: host_version.into(),
        }
    }

    /// `"All"` places no constraint on the host version.
    pub fn is_unconstrained(&self) -> bool {
        self.host_version.eq_ignore_ascii_case("all")
    }
}

/// Identity and metadata for one installed extension.
///
/// Records are produced by the backend only; the client treats them as
/// read-only snapshots and replaces them wholesale on every library refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    pub id: ExtensionId,
    pub name: String,
    pub version: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub author: Option<String>,
    /// Minimum host-runtime version the extension requires.
    #[serde(default, alias = "cep_version", deserialize_with = "empty_as_none")]
    pub cep_runtime_version: Option<String>,
    #[serde(default, alias = "host_list")]
    pub host_compatibility: Vec<HostCompatibility>,
    #[serde(default, deserialize_with = "empty_path_as_none")]
    pub install_path: Option<PathBuf>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub icon_path: Option<String>,
}

impl ExtensionRecord {
    /// Host names joined for compact display, e.g. `"Photoshop, Illustrator"`.
    pub fn hosts_label(&self) -> String {
        self.host_compatibility
            .iter()
            .map(|h| h.host_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Result of one install command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallOutcome {
    #[serde(alias = "success")]
    pub succeeded: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "extension")]
    pub record: Option<ExtensionRecord>,
}

impl InstallOutcome {
    pub fn success(record: ExtensionRecord) -> Self {
        Self {
            succeeded: true,
            message: String::new(),
            record: Some(record),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
            record: None,
        }
    }

    /// Collapse the outcome into the installed record or a displayable error.
    ///
    /// A success without a record counts as a failure.
    pub fn into_result(self) -> Result<ExtensionRecord, String> {
        match (self.succeeded, self.record) {
            (true, Some(record)) => Ok(record),
            (true, None) if self.message.trim().is_empty() => Err(MISSING_RECORD_MESSAGE.to_owned()),
            (_, _) => Err(self.message),
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn empty_path_as_none<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(empty_as_none(deserializer)?.map(PathBuf::from))
}
