use serde::{Deserialize, Serialize};

/// Installation guidance for a single operating system.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OsInstructions {
    pub summary: String,
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Docker guidance carries a preference flag and the reasoning behind it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DockerInstructions {
    pub summary: String,
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_preferred: bool,
    pub rationale: String,
}

/// Mobile guidance names both the host used to install and the target device.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MobileInstructions {
    pub summary: String,
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "hostOS")]
    pub host_os: String,
    #[serde(rename = "deviceOS")]
    pub device_os: String,
}

/// Per-repository installation instructions, keyed by platform. Every entry
/// is optional.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Instructions {
    #[serde(rename = "macOS", skip_serializing_if = "Option::is_none")]
    pub mac_os: Option<OsInstructions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<OsInstructions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux: Option<OsInstructions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker: Option<DockerInstructions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<MobileInstructions>,
}
