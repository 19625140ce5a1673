//! AWS client modules
//!
//! This module provides wrappers around the AWS clients used to file a case:
//! - support: AWS Support API (attachment sets, cases, catalog)
//! - imds: EC2 instance metadata service

pub mod context;
pub mod error;
pub mod imds;
pub mod support;

pub use context::AwsContext;
pub use error::{AwsError, classify_anyhow_error, classify_aws_error};
pub use imds::{MetadataClient, MetadataError, MetadataOperations};
pub use support::{SupportClient, SupportOperations};

#[cfg(test)]
pub use imds::MockMetadataOperations;
#[cfg(test)]
pub use support::MockSupportOperations;
