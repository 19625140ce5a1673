//! AWS Support API: attachment sets, cases and the classification catalog

use crate::attachments::LogAttachment;
use crate::aws::context::AwsContext;
use anyhow::{Context, Result};
use aws_sdk_support::Client;
use aws_sdk_support::primitives::Blob;
use aws_sdk_support::types::Attachment;
use gpu_cordon_common::{CaseRequest, CategoryEntry, ServiceEntry, SeverityEntry};
use tracing::{debug, info};

/// AWS Support client
pub struct SupportClient {
    client: Client,
    region: String,
}

impl SupportClient {
    /// Create a Support client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.support_client(),
            region: ctx.region().to_string(),
        }
    }

    /// Upload files as a new attachment set, returning its ID
    pub async fn add_attachments_to_set(&self, attachments: Vec<LogAttachment>) -> Result<String> {
        let total_bytes: usize = attachments.iter().map(|a| a.data.len()).sum();
        info!(
            count = attachments.len(),
            total_bytes,
            region = %self.region,
            "Creating attachment set"
        );

        let attachments = attachments
            .into_iter()
            .map(|a| {
                Attachment::builder()
                    .file_name(a.file_name)
                    .data(Blob::new(a.data))
                    .build()
            })
            .collect();

        let response = self
            .client
            .add_attachments_to_set()
            .set_attachments(Some(attachments))
            .send()
            .await
            .context("Failed to add attachments to set")?;

        let attachment_set_id = response
            .attachment_set_id()
            .context("No attachment set ID returned from AddAttachmentsToSet")?;

        debug!(
            attachment_set_id = %attachment_set_id,
            expiry_time = ?response.expiry_time(),
            "Attachment set created"
        );

        Ok(attachment_set_id.to_string())
    }

    /// Create a support case, returning its ID
    pub async fn create_case(&self, request: CaseRequest) -> Result<String> {
        info!(
            subject = %request.subject,
            service_code = %request.service_code,
            category_code = %request.category_code,
            severity_code = %request.severity_code,
            attachment_set_id = ?request.attachment_set_id,
            "Creating support case"
        );

        let response = self
            .client
            .create_case()
            .subject(request.subject)
            .communication_body(request.communication_body)
            .issue_type(request.issue_type)
            .language(request.language)
            .service_code(request.service_code)
            .category_code(request.category_code)
            .severity_code(request.severity_code)
            .set_cc_email_addresses(Some(request.cc_email_addresses))
            .set_attachment_set_id(request.attachment_set_id)
            .send()
            .await
            .context("Failed to create support case")?;

        let case_id = response
            .case_id()
            .context("No case ID returned from CreateCase")?;

        Ok(case_id.to_string())
    }

    /// List support services and their categories.
    ///
    /// An empty `service_codes` lists every service.
    pub async fn describe_services(
        &self,
        service_codes: Vec<String>,
        language: &str,
    ) -> Result<Vec<ServiceEntry>> {
        let response = self
            .client
            .describe_services()
            .set_service_code_list((!service_codes.is_empty()).then_some(service_codes))
            .language(language)
            .send()
            .await
            .context("Failed to describe support services")?;

        let services = response
            .services()
            .iter()
            .map(|s| ServiceEntry {
                code: s.code().unwrap_or_default().to_string(),
                name: s.name().unwrap_or_default().to_string(),
                categories: s
                    .categories()
                    .iter()
                    .map(|c| CategoryEntry {
                        code: c.code().unwrap_or_default().to_string(),
                        name: c.name().unwrap_or_default().to_string(),
                    })
                    .collect(),
            })
            .collect();

        Ok(services)
    }

    /// List severity levels available to the account's support plan
    pub async fn describe_severity_levels(&self, language: &str) -> Result<Vec<SeverityEntry>> {
        let response = self
            .client
            .describe_severity_levels()
            .language(language)
            .send()
            .await
            .context("Failed to describe support severity levels")?;

        let levels = response
            .severity_levels()
            .iter()
            .map(|l| SeverityEntry {
                code: l.code().unwrap_or_default().to_string(),
                name: l.name().unwrap_or_default().to_string(),
            })
            .collect();

        Ok(levels)
    }
}

/// Trait for AWS Support operations that can be mocked in tests.
///
/// Parameters are owned to work around mockall lifetime limitations.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait SupportOperations: Send + Sync {
    /// Upload files as a new attachment set
    async fn add_attachments_to_set(&self, attachments: Vec<LogAttachment>) -> Result<String>;

    /// Create a support case
    async fn create_case(&self, request: CaseRequest) -> Result<String>;

    /// List support services (all when `service_codes` is empty)
    async fn describe_services(
        &self,
        service_codes: Vec<String>,
        language: String,
    ) -> Result<Vec<ServiceEntry>>;

    /// List severity levels
    async fn describe_severity_levels(&self, language: String) -> Result<Vec<SeverityEntry>>;
}

impl SupportOperations for SupportClient {
    async fn add_attachments_to_set(&self, attachments: Vec<LogAttachment>) -> Result<String> {
        SupportClient::add_attachments_to_set(self, attachments).await
    }

    async fn create_case(&self, request: CaseRequest) -> Result<String> {
        SupportClient::create_case(self, request).await
    }

    async fn describe_services(
        &self,
        service_codes: Vec<String>,
        language: String,
    ) -> Result<Vec<ServiceEntry>> {
        SupportClient::describe_services(self, service_codes, &language).await
    }

    async fn describe_severity_levels(&self, language: String) -> Result<Vec<SeverityEntry>> {
        SupportClient::describe_severity_levels(self, &language).await
    }
}
