//! EC2 instance metadata service (IMDS) access

use anyhow::{Context, Result};
use aws_config::imds::Client;
use gpu_cordon_common::InstanceIdentity;
use thiserror::Error;
use tracing::debug;

/// Cheap path used to probe whether IMDS answers at all
const INSTANCE_ID_PATH: &str = "/latest/meta-data/instance-id";

/// Instance identity document path
const IDENTITY_DOCUMENT_PATH: &str = "/latest/dynamic/instance-identity/document";

/// IMDS errors that callers need to tell apart
#[derive(Debug, Error)]
pub enum MetadataError {
    /// IMDS did not answer the availability probe
    #[error("Cannot connect to EC2 instance metadata service")]
    Unavailable,

    /// IMDS answered with a document that does not parse
    #[error("Invalid instance identity document")]
    InvalidDocument(#[from] serde_json::Error),
}

/// IMDS client for reading this instance's identity
pub struct MetadataClient {
    client: Client,
}

impl MetadataClient {
    /// Create an IMDS client.
    ///
    /// Endpoint and mode come from the environment
    /// (`AWS_EC2_METADATA_SERVICE_ENDPOINT`, ...). Requests are attempted once.
    pub fn new() -> Self {
        Self {
            client: Client::builder().max_attempts(1).build(),
        }
    }

    /// Check whether IMDS is reachable
    pub async fn is_available(&self) -> bool {
        match self.client.get(INSTANCE_ID_PATH).await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "IMDS availability probe failed");
                false
            }
        }
    }

    /// Fetch and parse the instance identity document
    pub async fn instance_identity(&self) -> Result<InstanceIdentity> {
        let response = self
            .client
            .get(IDENTITY_DOCUMENT_PATH)
            .await
            .context("Failed to fetch instance identity document from IMDS")?;
        let document: &str = response.as_ref();

        let identity = InstanceIdentity::from_document(document).map_err(MetadataError::from)?;

        debug!(
            instance_id = %identity.instance_id,
            instance_type = %identity.instance_type,
            availability_zone = %identity.availability_zone,
            "Fetched instance identity"
        );

        Ok(identity)
    }
}

impl Default for MetadataClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for IMDS operations that can be mocked in tests.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait MetadataOperations: Send + Sync {
    /// Check whether IMDS is reachable
    async fn is_available(&self) -> bool;

    /// Fetch the instance identity document
    async fn instance_identity(&self) -> Result<InstanceIdentity>;
}

impl MetadataOperations for MetadataClient {
    async fn is_available(&self) -> bool {
        MetadataClient::is_available(self).await
    }

    async fn instance_identity(&self) -> Result<InstanceIdentity> {
        MetadataClient::instance_identity(self).await
    }
}
