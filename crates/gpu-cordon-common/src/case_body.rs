//! Case body rendering
//!
//! Renders an [`InstanceIdentity`] into the text of the support case using a
//! Handlebars template. The template is compiled once at construction; a
//! broken template is reported there rather than on every render.

use crate::defaults::CASE_BODY_TEMPLATE;
use crate::error::CaseBodyError;
use crate::identity::InstanceIdentity;
use handlebars::Handlebars;
use serde::Serialize;

const TEMPLATE_NAME: &str = "case_body";

/// Values available to the template
#[derive(Debug, Serialize)]
struct BodyContext<'a> {
    instance_id: &'a str,
    region: &'a str,
    availability_zone: &'a str,
    instance_type: &'a str,
    account_id: &'a str,
    image_id: &'a str,
    kernel_id: &'a str,
}

impl<'a> From<&'a InstanceIdentity> for BodyContext<'a> {
    fn from(identity: &'a InstanceIdentity) -> Self {
        Self {
            instance_id: &identity.instance_id,
            region: &identity.region,
            availability_zone: &identity.availability_zone,
            instance_type: &identity.instance_type,
            account_id: &identity.account_id,
            image_id: &identity.image_id,
            kernel_id: identity.kernel_id_or_empty(),
        }
    }
}

/// Compiled case body template
#[derive(Debug, Clone)]
pub struct CaseBodyTemplate {
    registry: Handlebars<'static>,
}

impl CaseBodyTemplate {
    /// Compile a template.
    ///
    /// Strict mode is on, so a placeholder naming an unknown field fails at
    /// render time instead of silently rendering as empty. Output is plain
    /// text, HTML escaping is disabled.
    pub fn new(template: &str) -> Result<Self, CaseBodyError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, template)
            .map_err(|e| CaseBodyError::Parse(Box::new(e)))?;
        Ok(Self { registry })
    }

    /// Compile the built-in cordon request template
    pub fn builtin() -> Result<Self, CaseBodyError> {
        Self::new(CASE_BODY_TEMPLATE)
    }

    /// Render the body for an instance
    pub fn render(&self, identity: &InstanceIdentity) -> Result<String, CaseBodyError> {
        let context = BodyContext::from(identity);
        Ok(self.registry.render(TEMPLATE_NAME, &context)?)
    }
}
