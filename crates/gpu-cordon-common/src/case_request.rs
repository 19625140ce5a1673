//! Case settings and the outbound support case request

use crate::defaults;
use crate::error::{SettingsError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Maximum length of a case communication body accepted by AWS Support
pub const MAX_BODY_CHARS: usize = 8000;

/// Maximum number of CC recipients accepted by AWS Support
pub const MAX_CC_EMAILS: usize = 10;

/// Case metadata that does not depend on the instance.
///
/// Codes are opaque strings: only the support backend knows which values
/// are valid, see [`crate::catalog::SupportCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CaseSettings {
    #[serde(default = "defaults::default_subject")]
    pub subject: String,

    #[serde(default = "defaults::default_cc_emails")]
    pub cc_emails: Vec<String>,

    #[serde(default = "defaults::default_issue_type")]
    pub issue_type: String,

    #[serde(default = "defaults::default_language")]
    pub language: String,

    #[serde(default = "defaults::default_service_code")]
    pub service_code: String,

    #[serde(default = "defaults::default_category_code")]
    pub category_code: String,

    #[serde(default = "defaults::default_severity_code")]
    pub severity_code: String,
}

impl Default for CaseSettings {
    fn default() -> Self {
        Self {
            subject: defaults::default_subject(),
            cc_emails: defaults::default_cc_emails(),
            issue_type: defaults::default_issue_type(),
            language: defaults::default_language(),
            service_code: defaults::default_service_code(),
            category_code: defaults::default_category_code(),
            severity_code: defaults::default_severity_code(),
        }
    }
}

impl CaseSettings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| SettingsError::io(&display, e))?;
        serde_json::from_str(&content).map_err(|e| SettingsError::parse(display, e))
    }
}

/// A support case ready for submission.
///
/// Built once from [`CaseSettings`], the rendered body and the attachment set,
/// then validated and sent as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseRequest {
    pub subject: String,
    pub communication_body: String,
    pub issue_type: String,
    pub language: String,
    pub service_code: String,
    pub category_code: String,
    pub severity_code: String,
    pub cc_email_addresses: Vec<String>,
    pub attachment_set_id: Option<String>,
}

impl CaseRequest {
    pub fn new(
        settings: &CaseSettings,
        communication_body: impl Into<String>,
        attachment_set_id: Option<String>,
    ) -> Self {
        Self {
            subject: settings.subject.clone(),
            communication_body: communication_body.into(),
            issue_type: settings.issue_type.clone(),
            language: settings.language.clone(),
            service_code: settings.service_code.clone(),
            category_code: settings.category_code.clone(),
            severity_code: settings.severity_code.clone(),
            cc_email_addresses: settings.cc_emails.clone(),
            attachment_set_id,
        }
    }

    /// Check the request against the support API field constraints.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subject.trim().is_empty() {
            return Err(ValidationError::EmptySubject);
        }

        let body_len = self.communication_body.chars().count();
        if self.communication_body.trim().is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        if body_len > MAX_BODY_CHARS {
            return Err(ValidationError::BodyTooLong {
                len: body_len,
                max: MAX_BODY_CHARS,
            });
        }

        for (name, value) in [
            ("issue_type", &self.issue_type),
            ("language", &self.language),
            ("service_code", &self.service_code),
            ("category_code", &self.category_code),
            ("severity_code", &self.severity_code),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(name));
            }
        }

        if self.cc_email_addresses.len() > MAX_CC_EMAILS {
            return Err(ValidationError::TooManyCcEmails {
                count: self.cc_email_addresses.len(),
                max: MAX_CC_EMAILS,
            });
        }
        if let Some(bad) = self.cc_email_addresses.iter().find(|e| !is_email(e)) {
            return Err(ValidationError::InvalidCcEmail(bad.clone()));
        }

        if self
            .attachment_set_id
            .as_deref()
            .is_some_and(|id| id.trim().is_empty())
        {
            return Err(ValidationError::EmptyAttachmentSetId);
        }

        Ok(())
    }
}

/// Loose `local@domain` shape check; the backend does the real validation.
fn is_email(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    match address.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn valid_request() -> CaseRequest {
        CaseRequest::new(
            &CaseSettings::default(),
            "Please cordon off i-0123456789abcdef0",
            Some("as-123".to_string()),
        )
    }

    #[test]
    fn test_default_settings() {
        let settings = CaseSettings::default();
        assert_eq!(settings.issue_type, "technical");
        assert_eq!(settings.language, "en");
        assert_eq!(settings.service_code, "amazon-elastic-compute-cloud-linux");
        assert_eq!(settings.category_code, "instance-issue");
        assert_eq!(settings.severity_code, "urgent");
        assert_eq!(settings.cc_emails, vec!["foo@foo.com", "baz@baz.com"]);
    }

    #[test]
    fn test_request_copies_settings() {
        let request = valid_request();
        assert_eq!(request.subject, defaults::DEFAULT_SUBJECT);
        assert_eq!(request.severity_code, "urgent");
        assert_eq!(request.cc_email_addresses.len(), 2);
        assert_eq!(request.attachment_set_id.as_deref(), Some("as-123"));
    }

    #[test]
    fn test_valid_request_passes() {
        assert_eq!(valid_request().validate(), Ok(()));

        let mut no_attachments = valid_request();
        no_attachments.attachment_set_id = None;
        assert_eq!(no_attachments.validate(), Ok(()));
    }

    #[test]
    fn test_empty_subject_and_body() {
        let mut request = valid_request();
        request.subject = "  ".to_string();
        assert_eq!(request.validate(), Err(ValidationError::EmptySubject));

        let mut request = valid_request();
        request.communication_body.clear();
        assert_eq!(request.validate(), Err(ValidationError::EmptyBody));
    }

    #[test]
    fn test_body_too_long() {
        let mut request = valid_request();
        request.communication_body = "x".repeat(MAX_BODY_CHARS + 1);
        assert_eq!(
            request.validate(),
            Err(ValidationError::BodyTooLong {
                len: MAX_BODY_CHARS + 1,
                max: MAX_BODY_CHARS
            })
        );

        request.communication_body = "x".repeat(MAX_BODY_CHARS);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_codes() {
        let mut request = valid_request();
        request.severity_code = String::new();
        assert_eq!(
            request.validate(),
            Err(ValidationError::EmptyField("severity_code"))
        );

        let mut request = valid_request();
        request.service_code = String::new();
        assert_eq!(
            request.validate(),
            Err(ValidationError::EmptyField("service_code"))
        );
    }

    #[test]
    fn test_cc_emails() {
        let mut request = valid_request();
        request.cc_email_addresses = vec!["oncall@example.com".to_string(), "nope".to_string()];
        assert_eq!(
            request.validate(),
            Err(ValidationError::InvalidCcEmail("nope".to_string()))
        );

        request.cc_email_addresses = (0..11).map(|i| format!("u{i}@example.com")).collect();
        assert_eq!(
            request.validate(),
            Err(ValidationError::TooManyCcEmails { count: 11, max: 10 })
        );

        request.cc_email_addresses.clear();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_attachment_set_id() {
        let mut request = valid_request();
        request.attachment_set_id = Some(String::new());
        assert_eq!(
            request.validate(),
            Err(ValidationError::EmptyAttachmentSetId)
        );
    }

    #[test]
    fn test_is_email() {
        assert!(is_email("foo@foo.com"));
        assert!(!is_email("@foo.com"));
        assert!(!is_email("foo@"));
        assert!(!is_email("foo@bar@baz"));
        assert!(!is_email("foo @bar.com"));
    }

    #[test]
    fn test_load_settings_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{
                "severity_code": "high",
                "cc_emails": ["gpu-oncall@example.com"]
            }}"#
        )
        .unwrap();

        let settings = CaseSettings::load(file.path()).unwrap();
        assert_eq!(settings.severity_code, "high");
        assert_eq!(settings.cc_emails, vec!["gpu-oncall@example.com"]);
        assert_eq!(settings.service_code, defaults::DEFAULT_SERVICE_CODE);
        assert_eq!(settings.subject, defaults::DEFAULT_SUBJECT);
    }

    #[test]
    fn test_load_settings_errors() {
        let err = CaseSettings::load(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = CaseSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn test_load_settings_rejects_unknown_field() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"severity": "low", "cc": ["oncall@example.com"]}}"#).unwrap();

        let err = CaseSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("settings"), "{err}");
    }
}
