//! Default case settings
//!
//! These constants describe the support case filed when no settings file or
//! CLI override is given.

/// Support API region. AWS Support is only served from us-east-1.
pub const SUPPORT_API_REGION: &str = "us-east-1";

/// Diagnostic log uploaded when no `--log` is given
pub const DEFAULT_LOG_PATH: &str = "./nvidia-bug-report.log.gz";

/// Case subject line
pub const DEFAULT_SUBJECT: &str = "GPU Faults/Errors Encountered | Hardware Cordon Requested";

/// Addresses copied on every case
pub const DEFAULT_CC_EMAILS: &[&str] = &["foo@foo.com", "baz@baz.com"];

/// Issue type ("technical" or "customer-service")
pub const DEFAULT_ISSUE_TYPE: &str = "technical";

/// Case language
pub const DEFAULT_LANGUAGE: &str = "en";

/// Service code for EC2 (Linux).
///
/// `aws support describe-services --region=us-east-1` lists the valid codes.
pub const DEFAULT_SERVICE_CODE: &str = "amazon-elastic-compute-cloud-linux";

/// Category code under [`DEFAULT_SERVICE_CODE`]
pub const DEFAULT_CATEGORY_CODE: &str = "instance-issue";

/// Severity code.
///
/// `aws support describe-severity-levels` lists the valid codes.
pub const DEFAULT_SEVERITY_CODE: &str = "urgent";

/// Case body template. Placeholders are filled from the instance identity.
pub const CASE_BODY_TEMPLATE: &str = "
Please cordon off the following ec2 instance:
  * Instance Id: {{instance_id}}
  * Region: {{region}}
  * AZ: {{availability_zone}}
  * Instance Type: {{instance_type}}
  * Account Id: {{account_id}}
  * Image Id: {{image_id}}
  * Kernel Id: {{kernel_id}}

Attached are Nvidia Bug report logs.

Refer to Failure Modes - Require Degrade of the underlying EC2 Host
in the support playbook for more info";

// Serde default functions for struct field defaults

pub fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

pub fn default_cc_emails() -> Vec<String> {
    DEFAULT_CC_EMAILS.iter().map(|s| s.to_string()).collect()
}

pub fn default_issue_type() -> String {
    DEFAULT_ISSUE_TYPE.to_string()
}

pub fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

pub fn default_service_code() -> String {
    DEFAULT_SERVICE_CODE.to_string()
}

pub fn default_category_code() -> String {
    DEFAULT_CATEGORY_CODE.to_string()
}

pub fn default_severity_code() -> String {
    DEFAULT_SEVERITY_CODE.to_string()
}
