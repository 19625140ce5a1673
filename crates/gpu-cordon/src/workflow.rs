//! Cordon request workflow
//!
//! Runs the three steps of a cordon request in order:
//!
//! 1. read the diagnostic logs and upload them as an attachment set
//! 2. query IMDS and render the case body
//! 3. build, validate and submit the support case
//!
//! Each step runs once. A failure stops the request; an attachment set that
//! was already uploaded is left to expire on the AWS side.

use crate::attachments::read_log_files;
use crate::aws::{MetadataError, MetadataOperations, SupportOperations};
use crate::config::RequestOptions;
use anyhow::{Context, Result};
use gpu_cordon_common::{CaseBodyTemplate, CaseRequest, CaseSettings, Stage, SupportCatalog};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

/// Result of a successful cordon request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CordonOutcome {
    pub attachment_set_id: String,
    pub case_body: String,
    pub case_id: String,
}

/// A log that would have been attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentSummary {
    pub file_name: String,
    pub size: usize,
}

/// What a request would have sent, produced by [`CordonRequester::dry_run`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DryRunReport {
    pub attachments: Vec<AttachmentSummary>,
    pub request: CaseRequest,
}

/// Tracks the current stage and tags failures with it
#[derive(Debug, Default)]
struct StageTracker {
    stage: Stage,
}

impl StageTracker {
    fn advance(&mut self) {
        if let Some(next) = self.stage.next() {
            info!(from = %self.stage, to = %next, "Stage transition");
            self.stage = next;
        }
    }

    fn check<T>(&mut self, result: Result<T>) -> Result<T> {
        result.map_err(|e| {
            let failed_in = self.stage;
            error!(stage = %failed_in, error = %e, "Cordon request failed");
            self.stage = Stage::Failed;
            e.context(format!("Failed while {}", failed_in.description()))
        })
    }
}

/// Files cordon requests against a support backend and a metadata source.
pub struct CordonRequester<S, M> {
    support: S,
    metadata: M,
    settings: CaseSettings,
    template: CaseBodyTemplate,
    options: RequestOptions,
}

impl<S: SupportOperations, M: MetadataOperations> CordonRequester<S, M> {
    pub fn new(
        support: S,
        metadata: M,
        settings: CaseSettings,
        template: CaseBodyTemplate,
        options: RequestOptions,
    ) -> Self {
        Self {
            support,
            metadata,
            settings,
            template,
            options,
        }
    }

    /// Read the logs and upload them as one attachment set.
    ///
    /// No upload happens unless every file was read.
    pub async fn upload_logs(&self, paths: &[PathBuf]) -> Result<String> {
        let attachments = read_log_files(paths, self.options.attachment_naming).await?;

        let attachment_set_id = self.support.add_attachments_to_set(attachments).await?;
        if attachment_set_id.is_empty() {
            anyhow::bail!("AWS Support returned an empty attachment set ID");
        }

        info!(attachment_set_id = %attachment_set_id, "Uploaded logs");
        Ok(attachment_set_id)
    }

    /// Render the case body from this instance's identity.
    ///
    /// Fails with [`MetadataError::Unavailable`] before fetching anything when
    /// IMDS does not answer.
    pub async fn generate_case_body(&self) -> Result<String> {
        if !self.metadata.is_available().await {
            return Err(MetadataError::Unavailable.into());
        }

        let identity = self.metadata.instance_identity().await?;
        info!(
            instance_id = %identity.instance_id,
            instance_type = %identity.instance_type,
            region = %identity.region,
            "Fetched instance identity"
        );

        Ok(self.template.render(&identity)?)
    }

    /// Check the configured codes against the backend's catalog.
    pub async fn verify_codes(&self) -> Result<()> {
        let services = self
            .support
            .describe_services(
                vec![self.settings.service_code.clone()],
                self.settings.language.clone(),
            )
            .await?;
        let severity_levels = self
            .support
            .describe_severity_levels(self.settings.language.clone())
            .await?;

        SupportCatalog {
            services,
            severity_levels,
        }
        .check(&self.settings)
        .context("Case codes rejected by the support catalog")?;

        info!(
            service_code = %self.settings.service_code,
            category_code = %self.settings.category_code,
            severity_code = %self.settings.severity_code,
            "Case codes verified"
        );
        Ok(())
    }

    /// Build, validate and submit the case, returning the case ID.
    pub async fn submit_case(&self, case_body: String, attachment_set_id: String) -> Result<String> {
        let request = CaseRequest::new(&self.settings, case_body, Some(attachment_set_id));
        request.validate().context("Invalid support case request")?;

        if self.options.verify_codes {
            self.verify_codes().await?;
        }

        let case_id = self.support.create_case(request).await?;
        if case_id.is_empty() {
            anyhow::bail!("AWS Support returned an empty case ID");
        }

        info!(case_id = %case_id, "Support case created");
        Ok(case_id)
    }

    /// Run the full request: upload, build the body, submit.
    pub async fn run(&self, paths: &[PathBuf]) -> Result<CordonOutcome> {
        let mut tracker = StageTracker::default();

        tracker.advance();
        let attachment_set_id = tracker.check(self.upload_logs(paths).await)?;

        tracker.advance();
        let case_body = tracker.check(self.generate_case_body().await)?;

        tracker.advance();
        let case_id = tracker.check(
            self.submit_case(case_body.clone(), attachment_set_id.clone())
                .await,
        )?;

        tracker.advance();
        Ok(CordonOutcome {
            attachment_set_id,
            case_body,
            case_id,
        })
    }

    /// Do everything except uploading and creating the case.
    ///
    /// Reads the logs, renders the body and validates the request (and the
    /// catalog codes when enabled), so a broken setup shows up before a real
    /// case is filed.
    pub async fn dry_run(&self, paths: &[PathBuf]) -> Result<DryRunReport> {
        let attachments = read_log_files(paths, self.options.attachment_naming).await?;
        let case_body = self.generate_case_body().await?;

        let request = CaseRequest::new(&self.settings, case_body, None);
        request.validate().context("Invalid support case request")?;

        if self.options.verify_codes {
            self.verify_codes().await?;
        }

        Ok(DryRunReport {
            attachments: attachments
                .into_iter()
                .map(|a| AttachmentSummary {
                    size: a.data.len(),
                    file_name: a.file_name,
                })
                .collect(),
            request,
        })
    }
}
