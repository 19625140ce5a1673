//! Pipeline stages of a cordon request
//!
//! A request moves `Start → Uploading → BuildingBody → Submitting → Done`.
//! Any stage may instead end in `Failed`; there are no retries and nothing
//! moves backwards.

/// Stage of a cordon request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    /// Nothing done yet
    #[default]
    Start,
    /// Reading logs and creating the attachment set
    Uploading,
    /// Querying IMDS and rendering the case body
    BuildingBody,
    /// Validating and creating the support case
    Submitting,
    /// Case created
    Done,
    /// A stage failed
    Failed,
}

impl Stage {
    /// Check if the stage is terminal
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// The stage that follows this one on success.
    ///
    /// Terminal stages have no successor.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::Uploading),
            Self::Uploading => Some(Self::BuildingBody),
            Self::BuildingBody => Some(Self::Submitting),
            Self::Submitting => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    /// Human-readable description used in error context
    pub fn description(self) -> &'static str {
        match self {
            Self::Start => "starting",
            Self::Uploading => "uploading logs to AWS Support",
            Self::BuildingBody => "building the case body from instance metadata",
            Self::Submitting => "submitting the support case",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_happy_path_order() {
        let mut stage = Stage::default();
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            stage = next;
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![
                Stage::Start,
                Stage::Uploading,
                Stage::BuildingBody,
                Stage::Submitting,
                Stage::Done
            ]
        );
    }

    #[test]
    fn test_terminal() {
        assert!(Stage::Done.is_terminal());
        assert!(Stage::Failed.is_terminal());
        assert!(!Stage::Submitting.is_terminal());
        assert_eq!(Stage::Failed.next(), None);
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Stage::BuildingBody.to_string(), "building-body");
        assert_eq!(Stage::from_str("submitting").unwrap(), Stage::Submitting);
        assert!(Stage::from_str("rolling-back").is_err());
    }
}
