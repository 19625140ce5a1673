//! Configuration types for a cordon request

use crate::attachments::AttachmentNaming;
use anyhow::Result;
use gpu_cordon_common::CaseSettings;
use std::path::{Path, PathBuf};

/// AWS connection configuration
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Region of the AWS Support endpoint
    pub region: String,
    /// AWS profile name (overrides default credential resolution)
    pub aws_profile: Option<String>,
}

/// Workflow behavior switches
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// How uploaded logs are named
    pub attachment_naming: AttachmentNaming,
    /// Check codes against the support catalog before creating the case
    pub verify_codes: bool,
}

/// CLI overrides applied on top of the settings file
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub subject: Option<String>,
    pub cc_emails: Vec<String>,
    pub severity_code: Option<String>,
}

impl SettingsOverrides {
    /// Apply the overrides. A non-empty CC list replaces the configured one.
    pub fn apply(self, mut settings: CaseSettings) -> CaseSettings {
        if let Some(subject) = self.subject {
            settings.subject = subject;
        }
        if !self.cc_emails.is_empty() {
            settings.cc_emails = self.cc_emails;
        }
        if let Some(severity_code) = self.severity_code {
            settings.severity_code = severity_code;
        }
        settings
    }
}

/// Resolve case settings: defaults, then the settings file, then CLI overrides.
pub fn resolve_settings(
    settings_path: Option<&Path>,
    overrides: SettingsOverrides,
) -> Result<CaseSettings> {
    let settings = match settings_path {
        Some(path) => CaseSettings::load(path)?,
        None => CaseSettings::default(),
    };
    Ok(overrides.apply(settings))
}

/// Configuration for one cordon request
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub aws: AwsConfig,
    /// Log files to attach, in upload order
    pub log_paths: Vec<PathBuf>,
    pub settings: CaseSettings,
    pub options: RequestOptions,
    /// Validate everything without uploading or creating a case
    pub dry_run: bool,
}
