use serde::{Deserialize, Serialize};
use std::fmt;

use super::completeness::MissingProfileData;
use super::criteria::CriterionCheck;
use super::domain::ScholarshipId;

/// Final answer for one applicant against one scholarship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Eligible,
    Ineligible,
    /// The profile lacks the data needed to decide.
    Indeterminate,
}

impl Outcome {
    pub const fn label(self) -> &'static str {
        match self {
            Outcome::Eligible => "meets requirements",
            Outcome::Ineligible => "does not meet requirements",
            Outcome::Indeterminate => {
                "insufficient profile data: complete your profile to check these requirements"
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Eligible => "eligible",
            Outcome::Ineligible => "ineligible",
            Outcome::Indeterminate => "indeterminate",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome plus the trail that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityAssessment {
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<MissingProfileData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<CriterionCheck>,
}

impl EligibilityAssessment {
    pub(crate) fn indeterminate(missing: Vec<MissingProfileData>) -> Self {
        Self {
            outcome: Outcome::Indeterminate,
            missing,
            checks: Vec::new(),
        }
    }

    pub(crate) fn from_checks(checks: Vec<CriterionCheck>) -> Self {
        let outcome = if checks.iter().all(|check| check.passed) {
            Outcome::Eligible
        } else {
            Outcome::Ineligible
        };
        Self {
            outcome,
            missing: Vec::new(),
            checks,
        }
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CriterionCheck> {
        self.checks.iter().filter(|check| !check.passed)
    }

    pub fn summary(&self) -> String {
        match self.outcome {
            Outcome::Eligible => Outcome::Eligible.label().to_string(),
            Outcome::Ineligible => {
                let reasons: Vec<&str> = self
                    .failed_checks()
                    .map(|check| check.detail.as_str())
                    .collect();
                format!("{}: {}", Outcome::Ineligible.label(), reasons.join("; "))
            }
            Outcome::Indeterminate => {
                if self.missing.is_empty() {
                    Outcome::Indeterminate.label().to_string()
                } else {
                    let fields: Vec<String> =
                        self.missing.iter().map(ToString::to_string).collect();
                    format!("{} (missing {})", Outcome::Indeterminate.label(), fields.join(", "))
                }
            }
        }
    }
}

/// Labelled shortlist row handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistEntry {
    pub scholarship_id: ScholarshipId,
    pub name: String,
    pub outcome: Outcome,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<MissingProfileData>,
}
