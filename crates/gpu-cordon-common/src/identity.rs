//! EC2 instance identity document
//!
//! The document is served by IMDS at
//! `/latest/dynamic/instance-identity/document` as camelCase JSON.

use serde::{Deserialize, Serialize};

/// Instance identity fields used to describe the faulty host in a case.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceIdentity {
    /// EC2 instance ID (e.g., "i-0123456789abcdef0")
    pub instance_id: String,
    /// Region the instance runs in
    pub region: String,
    /// Availability zone (e.g., "us-east-1a")
    pub availability_zone: String,
    /// Instance type (e.g., "p4d.24xlarge")
    pub instance_type: String,
    /// Owning AWS account
    pub account_id: String,
    /// AMI the instance was launched from
    pub image_id: String,
    /// Kernel ID, null for most HVM instances
    #[serde(default)]
    pub kernel_id: Option<String>,
}

impl InstanceIdentity {
    /// Parse an identity document as returned by IMDS.
    pub fn from_document(document: &str) -> serde_json::Result<Self> {
        serde_json::from_str(document)
    }

    /// Kernel ID, or an empty string when the instance has none
    pub fn kernel_id_or_empty(&self) -> &str {
        self.kernel_id.as_deref().unwrap_or("")
    }
}
