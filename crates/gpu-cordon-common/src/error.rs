//! Case validation, settings and template errors
//!
//! Typed errors for everything checked locally before a request leaves the host.

use thiserror::Error;

/// Case request validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// subject field is empty
    #[error("subject cannot be empty")]
    EmptySubject,

    /// communication body is empty
    #[error("case body cannot be empty")]
    EmptyBody,

    /// communication body exceeds the support API limit
    #[error("case body must be at most {max} characters, got {len}")]
    BodyTooLong { len: usize, max: usize },

    /// A classification field is empty
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// Too many CC recipients
    #[error("at most {max} CC email addresses are allowed, got {count}")]
    TooManyCcEmails { count: usize, max: usize },

    /// CC recipient is not an email address
    #[error("invalid CC email address: '{0}'")]
    InvalidCcEmail(String),

    /// Attachment set ID present but empty
    #[error("attachment_set_id cannot be empty when provided")]
    EmptyAttachmentSetId,

    /// Service code not in the support catalog
    #[error("unknown service code '{0}'")]
    UnknownServiceCode(String),

    /// Category code not offered by the service
    #[error("unknown category code '{category}' for service '{service}'")]
    UnknownCategoryCode { service: String, category: String },

    /// Severity code not in the support catalog
    #[error("unknown severity code '{code}' (available: {})", available.join(", "))]
    UnknownSeverityCode { code: String, available: Vec<String> },
}

/// Case settings loading errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read settings file
    #[error("Failed to read settings file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse settings JSON
    #[error("Failed to parse settings file '{path}'")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SettingsError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error with path context
    pub fn parse(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Case body template errors
#[derive(Debug, Error)]
pub enum CaseBodyError {
    /// Template failed to compile
    #[error("Invalid case body template")]
    Parse(#[source] Box<handlebars::TemplateError>),

    /// Template failed to render
    #[error("Failed to render case body")]
    Render(#[from] handlebars::RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ValidationError::EmptySubject.to_string(), "subject cannot be empty");
        assert_eq!(
            ValidationError::EmptyField("severity_code").to_string(),
            "severity_code cannot be empty"
        );
        assert_eq!(
            ValidationError::BodyTooLong { len: 9000, max: 8000 }.to_string(),
            "case body must be at most 8000 characters, got 9000"
        );
        assert_eq!(
            ValidationError::UnknownSeverityCode {
                code: "panic".to_string(),
                available: vec!["low".to_string(), "urgent".to_string()],
            }
            .to_string(),
            "unknown severity code 'panic' (available: low, urgent)"
        );
    }

    #[test]
    fn test_settings_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SettingsError::io("/etc/gpu-cordon.json", io_err);
        assert_eq!(
            err.to_string(),
            "Failed to read settings file '/etc/gpu-cordon.json'"
        );
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("file not found"));
    }

    #[test]
    fn test_case_body_error_keeps_cause_in_source() {
        let template_err = handlebars::Handlebars::new()
            .register_template_string("body", "{{#if instance_id}}unterminated")
            .unwrap_err();
        let err = CaseBodyError::Parse(Box::new(template_err));
        assert_eq!(err.to_string(), "Invalid case body template");
        assert!(std::error::Error::source(&err).is_some());
    }
}
