//! Scholarship eligibility matching.
//!
//! The engine is a pure decision function over an [`ApplicantProfile`] and a
//! [`RequirementSet`]: it first checks that the profile is complete enough for the requirement
//! set, then runs every criterion and combines them into an [`Outcome`]. No I/O happens here;
//! profiles and candidate scholarships are supplied by the caller.

mod completeness;
mod criteria;
pub mod domain;
mod outcome;
pub mod scale;

#[cfg(test)]
mod tests;

pub use completeness::{check_profile, Completeness, MissingProfileData};
pub use criteria::{age_on, Criterion, CriterionCheck, UNIVERSAL_NATIONALITY};
pub use domain::{
    AcademicRecord, ApplicantProfile, LanguageRequirement, LanguageSkill, RequirementSet,
    ScholarshipCandidate, ScholarshipId,
};
pub use outcome::{EligibilityAssessment, Outcome, ShortlistEntry};
pub use scale::{AcademicLevel, Rank, Scale, ScaleRegistry};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config::MatchingConfig;
use criteria::CriteriaContext;

/// Contract violations raised to collaborators. Business outcomes never use this type.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityError {
    #[error("invalid argument: {argument} is required")]
    InvalidArgument { argument: &'static str },
    #[error("invalid {scale} scale: {reason}")]
    InvalidScale { scale: Scale, reason: String },
}

/// Stateless evaluator sharing one scale registry across calls.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    registry: ScaleRegistry,
    config: MatchingConfig,
}

impl EligibilityEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self::with_registry(ScaleRegistry::standard(), config)
    }

    pub fn with_registry(registry: ScaleRegistry, config: MatchingConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &ScaleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Evaluation date: the configured reference date, else the local calendar date.
    pub fn today(&self) -> NaiveDate {
        self.config
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn evaluate(&self, profile: &ApplicantProfile, requirements: &RequirementSet) -> Outcome {
        self.evaluate_on(profile, requirements, self.today())
    }

    pub fn evaluate_on(
        &self,
        profile: &ApplicantProfile,
        requirements: &RequirementSet,
        today: NaiveDate,
    ) -> Outcome {
        self.assess_on(profile, requirements, today).outcome
    }

    /// Entry point for callers whose lookups may have come back empty.
    pub fn try_evaluate(
        &self,
        profile: Option<&ApplicantProfile>,
        requirements: Option<&RequirementSet>,
    ) -> Result<Outcome, EligibilityError> {
        let profile = profile.ok_or(EligibilityError::InvalidArgument {
            argument: "profile",
        })?;
        let requirements = requirements.ok_or(EligibilityError::InvalidArgument {
            argument: "requirements",
        })?;
        Ok(self.evaluate(profile, requirements))
    }

    pub fn assess(
        &self,
        profile: &ApplicantProfile,
        requirements: &RequirementSet,
    ) -> EligibilityAssessment {
        self.assess_on(profile, requirements, self.today())
    }

    pub fn assess_on(
        &self,
        profile: &ApplicantProfile,
        requirements: &RequirementSet,
        today: NaiveDate,
    ) -> EligibilityAssessment {
        let completeness = check_profile(profile, requirements.requires_language_data());
        if let Completeness::Indeterminate(missing) = completeness {
            info!(missing = missing.len(), "profile incomplete, eligibility indeterminate");
            return EligibilityAssessment::indeterminate(missing);
        }

        let context = CriteriaContext {
            registry: &self.registry,
            config: &self.config,
            today,
        };
        let checks = criteria::run_all(profile, requirements, &context);
        for check in &checks {
            debug!(
                criterion = check.criterion.label(),
                passed = check.passed,
                detail = %check.detail,
                "criterion evaluated"
            );
        }

        let assessment = EligibilityAssessment::from_checks(checks);
        info!(outcome = %assessment.outcome, "eligibility decided");
        assessment
    }

    pub fn shortlist(
        &self,
        profile: &ApplicantProfile,
        candidates: &[ScholarshipCandidate],
    ) -> Vec<ShortlistEntry> {
        self.shortlist_on(profile, candidates, self.today())
    }

    /// Evaluates every candidate and keeps the ones worth showing: eligible scholarships and
    /// those the applicant could qualify for once the profile is complete.
    pub fn shortlist_on(
        &self,
        profile: &ApplicantProfile,
        candidates: &[ScholarshipCandidate],
        today: NaiveDate,
    ) -> Vec<ShortlistEntry> {
        candidates
            .iter()
            .filter_map(|candidate| {
                let assessment = self.assess_on(profile, &candidate.requirements, today);
                debug!(
                    scholarship = %candidate.id.0,
                    outcome = %assessment.outcome,
                    "shortlist candidate evaluated"
                );
                match assessment.outcome {
                    Outcome::Ineligible => None,
                    outcome => Some(ShortlistEntry {
                        scholarship_id: candidate.id.clone(),
                        name: candidate.name.clone(),
                        outcome,
                        label: outcome.label(),
                        missing: assessment.missing,
                    }),
                }
            })
            .collect()
    }
}
