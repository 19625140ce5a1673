//! Support service and severity catalog
//!
//! Valid service, category and severity codes are defined by the support
//! backend (`DescribeServices` / `DescribeSeverityLevels`), not locally. This
//! module holds a fetched snapshot and checks case settings against it.

use crate::case_request::CaseSettings;
use crate::error::ValidationError;
use serde::Serialize;

/// A support service and the category codes it accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEntry {
    pub code: String,
    pub name: String,
    pub categories: Vec<CategoryEntry>,
}

/// A category under a support service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub code: String,
    pub name: String,
}

/// A severity level offered by the support plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityEntry {
    pub code: String,
    pub name: String,
}

/// Snapshot of the backend's classification catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SupportCatalog {
    pub services: Vec<ServiceEntry>,
    pub severity_levels: Vec<SeverityEntry>,
}

impl SupportCatalog {
    /// Find a service by code
    pub fn service(&self, code: &str) -> Option<&ServiceEntry> {
        self.services.iter().find(|s| s.code == code)
    }

    /// Check that the settings' service, category and severity codes exist.
    pub fn check(&self, settings: &CaseSettings) -> Result<(), ValidationError> {
        let service = self
            .service(&settings.service_code)
            .ok_or_else(|| ValidationError::UnknownServiceCode(settings.service_code.clone()))?;

        if !service
            .categories
            .iter()
            .any(|c| c.code == settings.category_code)
        {
            return Err(ValidationError::UnknownCategoryCode {
                service: service.code.clone(),
                category: settings.category_code.clone(),
            });
        }

        if !self
            .severity_levels
            .iter()
            .any(|s| s.code == settings.severity_code)
        {
            return Err(ValidationError::UnknownSeverityCode {
                code: settings.severity_code.clone(),
                available: self.severity_levels.iter().map(|s| s.code.clone()).collect(),
            });
        }

        Ok(())
    }
}
