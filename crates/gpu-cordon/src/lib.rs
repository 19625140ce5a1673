//! gpu-cordon - File AWS Support cases to cordon faulty GPU hosts
//!
//! This crate provides the `gpu-cordon` binary, which uploads local GPU
//! diagnostics as an attachment set, describes the running instance from
//! IMDS, and opens a support case asking AWS to take the host out of service.

pub mod attachments;
pub mod aws;
pub mod config;
pub mod workflow;

pub use workflow::{CordonOutcome, CordonRequester, DryRunReport};
