//! AWS Support error classification
//!
//! Maps AWS Support error codes to typed errors using the `.code()` method
//! instead of string matching on the Debug format, so failures can be
//! reported with an actionable hint.

use thiserror::Error;

/// AWS Support error categories
#[derive(Debug, Error)]
pub enum AwsError {
    /// The attachment set ID does not exist
    #[error("Attachment set not found: {message}")]
    AttachmentSetNotFound { message: String },

    /// The attachment set expired (sets live for one hour)
    #[error("Attachment set expired")]
    AttachmentSetExpired,

    /// Too many attachments or attachment data too large
    #[error("Attachment limit exceeded: {message}")]
    AttachmentLimitExceeded { message: String },

    /// The account hit its case creation limit
    #[error("Case creation limit exceeded")]
    CaseCreationLimitExceeded,

    /// The account's support plan does not include the Support API
    #[error("AWS Support API requires a Business, Enterprise On-Ramp, or Enterprise support plan")]
    SubscriptionRequired,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Check if the backend rejected the attachment set referenced by a case
    pub fn is_attachment_rejected(&self) -> bool {
        matches!(
            self,
            AwsError::AttachmentSetNotFound { .. } | AwsError::AttachmentSetExpired
        )
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        let code = match self {
            AwsError::AttachmentSetNotFound { .. } => "AttachmentSetIdNotFound",
            AwsError::AttachmentSetExpired => "AttachmentSetExpired",
            AwsError::AttachmentLimitExceeded { .. } => "AttachmentLimitExceeded",
            AwsError::CaseCreationLimitExceeded => "CaseCreationLimitExceeded",
            AwsError::SubscriptionRequired => "SubscriptionRequiredException",
            AwsError::Throttled => "ThrottlingException",
            AwsError::Sdk { code: Some(c), .. } => c.as_str(),
            AwsError::Sdk { code: None, .. } => return None,
        };
        suggestion_for_code(code)
    }
}

/// Known AWS Support error codes for a missing attachment set
const ATTACHMENT_NOT_FOUND_CODES: &[&str] = &["AttachmentSetIdNotFound", "AttachmentIdNotFound"];

/// Known AWS Support error codes for attachment limits
const ATTACHMENT_LIMIT_CODES: &[&str] = &[
    "AttachmentLimitExceeded",
    "AttachmentSetSizeLimitExceeded",
];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "TooManyRequestsException"];

/// Known AWS error codes for a missing support subscription
const SUBSCRIPTION_CODES: &[&str] = &["SubscriptionRequiredException"];

/// Classify an AWS Support error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if ATTACHMENT_NOT_FOUND_CODES.contains(&c) => {
            AwsError::AttachmentSetNotFound { message }
        }
        Some("AttachmentSetExpired") => AwsError::AttachmentSetExpired,
        Some(c) if ATTACHMENT_LIMIT_CODES.contains(&c) => {
            AwsError::AttachmentLimitExceeded { message }
        }
        Some("CaseCreationLimitExceeded") => AwsError::CaseCreationLimitExceeded,
        Some(c) if SUBSCRIPTION_CODES.contains(&c) => AwsError::SubscriptionRequired,
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled,
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify an error from an anyhow::Error by extracting the AWS error code.
///
/// Walks the error chain using `ProvideErrorMetadata` to extract `.code()` and
/// `.message()` from any AWS Support operation error. Falls back to string
/// matching on the Debug representation if no typed error is found.
pub fn classify_anyhow_error(error: &anyhow::Error) -> AwsError {
    use aws_sdk_support::error::{ProvideErrorMetadata, SdkError};
    use aws_sdk_support::operation::{
        add_attachments_to_set::AddAttachmentsToSetError, create_case::CreateCaseError,
        describe_services::DescribeServicesError,
        describe_severity_levels::DescribeSeverityLevelsError,
    };

    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<SdkError<AddAttachmentsToSetError>>() {
            let meta = ProvideErrorMetadata::meta(e);
            return classify_aws_error(meta.code(), meta.message());
        }
        if let Some(e) = cause.downcast_ref::<SdkError<CreateCaseError>>() {
            let meta = ProvideErrorMetadata::meta(e);
            return classify_aws_error(meta.code(), meta.message());
        }
        if let Some(e) = cause.downcast_ref::<SdkError<DescribeServicesError>>() {
            let meta = ProvideErrorMetadata::meta(e);
            return classify_aws_error(meta.code(), meta.message());
        }
        if let Some(e) = cause.downcast_ref::<SdkError<DescribeSeverityLevelsError>>() {
            let meta = ProvideErrorMetadata::meta(e);
            return classify_aws_error(meta.code(), meta.message());
        }
    }

    // Fallback: extract error code from debug string representation
    let debug_str = format!("{:?}", error);
    if let Some(code) = extract_error_code(&debug_str) {
        return classify_aws_error(Some(&code), Some(&error.to_string()));
    }

    AwsError::Sdk {
        code: None,
        message: error.to_string(),
    }
}

/// All known AWS Support error codes for extraction from debug strings
const ALL_KNOWN_CODES: &[&str] = &[
    "AttachmentSetIdNotFound",
    "AttachmentIdNotFound",
    "AttachmentSetExpired",
    "AttachmentSetSizeLimitExceeded",
    "AttachmentLimitExceeded",
    "CaseCreationLimitExceeded",
    "SubscriptionRequiredException",
    "ThrottlingException",
    "TooManyRequestsException",
];

/// Extract an AWS error code from a debug string representation
fn extract_error_code(debug_str: &str) -> Option<String> {
    for code in ALL_KNOWN_CODES {
        if debug_str.contains(code) {
            return Some((*code).to_string());
        }
    }

    // Try to extract any code from `code: Some("...")` pattern
    if let Some(start) = debug_str.find("code: Some(\"") {
        let rest = &debug_str[start + 12..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }

    None
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "AttachmentSetIdNotFound",
        "The attachment set ID is unknown to AWS Support. Re-run to upload the logs again.",
    ),
    (
        "AttachmentSetExpired",
        "Attachment sets expire one hour after creation. Re-run to upload the logs again.",
    ),
    (
        "AttachmentLimitExceeded",
        "An attachment set holds at most 3 files. Pass fewer --log paths.",
    ),
    (
        "AttachmentSetSizeLimitExceeded",
        "Each attachment must be at most 5 MB. Compress or trim the log files.",
    ),
    (
        "CaseCreationLimitExceeded",
        "Too many cases were created recently. Wait before filing another one.",
    ),
    (
        "SubscriptionRequiredException",
        "The AWS Support API needs a Business, Enterprise On-Ramp, or Enterprise support plan.",
    ),
    (
        "AccessDeniedException",
        "The credentials lack support:* permissions. Check the IAM policy.",
    ),
    (
        "ThrottlingException",
        "AWS Support API rate limit hit. Wait a moment and try again.",
    ),
    (
        "TooManyRequestsException",
        "AWS Support API rate limit hit. Wait a moment and try again.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<String> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| (*s).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_not_found_codes() {
        for code in ATTACHMENT_NOT_FOUND_CODES {
            let err = classify_aws_error(Some(code), Some("as-123 not found"));
            assert!(
                err.is_attachment_rejected(),
                "Expected attachment rejection for code: {code}"
            );
        }
        assert!(classify_aws_error(Some("AttachmentSetExpired"), None).is_attachment_rejected());
    }

    #[test]
    fn attachment_limit_codes() {
        for code in ATTACHMENT_LIMIT_CODES {
            let err = classify_aws_error(Some(code), Some("msg"));
            assert!(matches!(err, AwsError::AttachmentLimitExceeded { .. }));
            assert!(!err.is_attachment_rejected());
        }
    }

    #[test]
    fn subscription_and_throttling() {
        assert!(matches!(
            classify_aws_error(Some("SubscriptionRequiredException"), None),
            AwsError::SubscriptionRequired
        ));
        for code in THROTTLING_CODES {
            assert!(matches!(
                classify_aws_error(Some(code), None),
                AwsError::Throttled
            ));
        }
    }

    #[test]
    fn unknown_and_missing_codes() {
        let err = classify_aws_error(Some("SomeNewError"), Some("details"));
        assert!(matches!(err, AwsError::Sdk { .. }));

        let err2 = classify_aws_error(None, Some("something failed"));
        assert!(matches!(err2, AwsError::Sdk { code: None, .. }));
        assert!(err2.suggestion().is_none());
    }

    #[test]
    fn classify_anyhow_fallback() {
        let err = anyhow::anyhow!(
            r#"service error: CreateCaseError {{ code: Some("AttachmentSetIdNotFound"), message: "bad id" }}"#
        );
        assert!(classify_anyhow_error(&err).is_attachment_rejected());

        let err = anyhow::anyhow!("connection refused");
        assert!(matches!(
            classify_anyhow_error(&err),
            AwsError::Sdk { code: None, .. }
        ));
    }

    #[test]
    fn extract_code_from_code_field() {
        let debug_str = r#"SdkError { code: Some("AccessDeniedException"), message: "fail" }"#;
        assert_eq!(
            extract_error_code(debug_str).as_deref(),
            Some("AccessDeniedException")
        );
        assert!(extract_error_code("connection refused").is_none());
    }

    #[test]
    fn suggestions_for_known_codes() {
        for (code, _) in SUGGESTIONS {
            assert!(
                suggestion_for_code(code).is_some(),
                "No suggestion for code: {code}"
            );
        }
        assert!(AwsError::SubscriptionRequired.suggestion().is_some());
        assert!(
            AwsError::Sdk {
                code: Some("AccessDeniedException".to_string()),
                message: "denied".to_string()
            }
            .suggestion()
            .is_some()
        );
    }
}
