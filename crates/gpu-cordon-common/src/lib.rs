//! gpu-cordon-common - Shared types for GPU host cordon requests
//!
//! This crate holds everything about a cordon request that does not need to
//! talk to AWS, so it stays free of AWS SDK dependencies.
//!
//! ## Modules
//!
//! - [`defaults`]: Default case settings and the case body template
//! - [`identity`]: EC2 instance identity document
//! - [`case_body`]: Case body rendering
//! - [`case_request`]: Case settings, the outbound case request and its validation
//! - [`catalog`]: Support service/severity catalog checks
//! - [`error`]: Typed validation and settings errors
//! - [`stage`]: Pipeline stages of a cordon request

pub mod case_body;
pub mod case_request;
pub mod catalog;
pub mod defaults;
pub mod error;
pub mod identity;
pub mod stage;

// Re-export commonly used types
pub use case_body::CaseBodyTemplate;
pub use case_request::{CaseRequest, CaseSettings};
pub use catalog::{CategoryEntry, ServiceEntry, SeverityEntry, SupportCatalog};
pub use error::{SettingsError, ValidationError};
pub use identity::InstanceIdentity;
pub use stage::Stage;
