use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{ApplicantProfile, LanguageRequirement, RequirementSet};
use super::scale::{Rank, Scale, ScaleRegistry};
use crate::config::MatchingConfig;

/// Nationality entry that opens a scholarship to every country regardless of configuration.
pub const UNIVERSAL_NATIONALITY: &str = "all";

/// The independent checks combined into an eligibility decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    MaximumAge,
    Nationality,
    MinimumAcademicLevel,
    RequiredLanguages,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::MaximumAge,
        Criterion::Nationality,
        Criterion::MinimumAcademicLevel,
        Criterion::RequiredLanguages,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Criterion::MaximumAge => "maximum_age",
            Criterion::Nationality => "nationality",
            Criterion::MinimumAcademicLevel => "minimum_academic_level",
            Criterion::RequiredLanguages => "required_languages",
        }
    }
}

/// Result of one criterion, kept for audit output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionCheck {
    pub criterion: Criterion,
    pub passed: bool,
    pub detail: String,
}

impl CriterionCheck {
    fn pass(criterion: Criterion, detail: impl Into<String>) -> Self {
        Self {
            criterion,
            passed: true,
            detail: detail.into(),
        }
    }

    fn fail(criterion: Criterion, detail: impl Into<String>) -> Self {
        Self {
            criterion,
            passed: false,
            detail: detail.into(),
        }
    }
}

/// Everything a criterion may consult besides the two input records.
pub(crate) struct CriteriaContext<'a> {
    pub registry: &'a ScaleRegistry,
    pub config: &'a MatchingConfig,
    pub today: NaiveDate,
}

pub(crate) fn run_all(
    profile: &ApplicantProfile,
    requirements: &RequirementSet,
    context: &CriteriaContext<'_>,
) -> Vec<CriterionCheck> {
    Criterion::ALL
        .iter()
        .map(|criterion| match criterion {
            Criterion::MaximumAge => maximum_age(profile, requirements, context.today),
            Criterion::Nationality => nationality(profile, requirements, context.config),
            Criterion::MinimumAcademicLevel => {
                minimum_academic_level(profile, requirements, context.registry, context.today)
            }
            Criterion::RequiredLanguages => {
                required_languages(profile, requirements, context.registry)
            }
        })
        .collect()
}

/// Whole years elapsed since `birth_date`, counting a birthday only once it has been reached.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

pub(crate) fn maximum_age(
    profile: &ApplicantProfile,
    requirements: &RequirementSet,
    today: NaiveDate,
) -> CriterionCheck {
    let Some(max_age) = requirements.max_age else {
        return CriterionCheck::pass(Criterion::MaximumAge, "no age ceiling");
    };
    let Some(birth_date) = profile.birth_date else {
        return CriterionCheck::fail(Criterion::MaximumAge, "birth date unknown");
    };

    let age = age_on(birth_date, today);
    if age <= max_age {
        CriterionCheck::pass(
            Criterion::MaximumAge,
            format!("age {age} within maximum {max_age}"),
        )
    } else {
        CriterionCheck::fail(
            Criterion::MaximumAge,
            format!("age {age} exceeds maximum {max_age}"),
        )
    }
}

pub(crate) fn nationality(
    profile: &ApplicantProfile,
    requirements: &RequirementSet,
    config: &MatchingConfig,
) -> CriterionCheck {
    let allowed = requirements.eligible_nationalities();
    if allowed.is_empty() {
        return CriterionCheck::pass(Criterion::Nationality, "open to every nationality");
    }

    let is_wildcard = |entry: &String| {
        same_text(entry, UNIVERSAL_NATIONALITY)
            || config
                .nationality_wildcards
                .iter()
                .any(|token| same_text(entry, token))
    };
    if allowed.iter().any(is_wildcard) {
        return CriterionCheck::pass(Criterion::Nationality, "open to every nationality");
    }

    let mut citizenships: Vec<&str> = profile.nationality.iter().map(String::as_str).collect();
    if config.match_additional_citizenship {
        citizenships.extend(profile.additional_citizenships.iter().map(String::as_str));
    }

    match citizenships
        .iter()
        .find(|citizenship| allowed.iter().any(|entry| same_text(entry, citizenship)))
    {
        Some(matched) => CriterionCheck::pass(
            Criterion::Nationality,
            format!("nationality {matched} is eligible"),
        ),
        None => CriterionCheck::fail(
            Criterion::Nationality,
            format!(
                "nationality {} not among {}",
                profile.nationality.as_deref().unwrap_or("(none)"),
                allowed.join(", ")
            ),
        ),
    }
}

/// Highest rank among degrees completed before `year`. Degrees outside the vocabulary are
/// skipped; `Some(None)` means completed degrees exist but none of them could be ranked.
fn highest_completed_rank(
    profile: &ApplicantProfile,
    registry: &ScaleRegistry,
    year: i32,
) -> Option<Option<Rank>> {
    let mut completed = profile
        .academic_records
        .iter()
        .filter(|record| record.is_completed_before(year))
        .peekable();
    completed.peek()?;

    Some(
        completed
            .filter_map(|record| {
                let rank = registry.rank(Scale::AcademicLevel, &record.degree_level);
                if rank.is_none() {
                    warn!(degree_level = %record.degree_level, "unknown academic level");
                }
                rank
            })
            .max(),
    )
}

pub(crate) fn minimum_academic_level(
    profile: &ApplicantProfile,
    requirements: &RequirementSet,
    registry: &ScaleRegistry,
    today: NaiveDate,
) -> CriterionCheck {
    let Some(required) = requirements.minimum_academic_level.as_deref() else {
        return CriterionCheck::pass(Criterion::MinimumAcademicLevel, "no minimum level");
    };

    let Some(required_rank) = registry.rank(Scale::AcademicLevel, required) else {
        warn!(required, "requirement names an unknown academic level");
        return CriterionCheck::fail(
            Criterion::MinimumAcademicLevel,
            format!("required level '{required}' is not a known academic level"),
        );
    };

    let applicant_rank = match highest_completed_rank(profile, registry, today.year()) {
        None => 0,
        Some(Some(rank)) => rank,
        Some(None) => {
            return CriterionCheck::fail(
                Criterion::MinimumAcademicLevel,
                "completed degrees use unknown academic levels",
            );
        }
    };
    let applicant_level = registry
        .label_at(Scale::AcademicLevel, applicant_rank)
        .unwrap_or_else(|| registry.lowest(Scale::AcademicLevel));

    if applicant_rank >= required_rank {
        CriterionCheck::pass(
            Criterion::MinimumAcademicLevel,
            format!("{applicant_level} meets minimum {required}"),
        )
    } else {
        CriterionCheck::fail(
            Criterion::MinimumAcademicLevel,
            format!("{applicant_level} below minimum {required}"),
        )
    }
}

fn language_met(
    profile: &ApplicantProfile,
    requirement: &LanguageRequirement,
    registry: &ScaleRegistry,
) -> bool {
    profile.languages.iter().any(|skill| {
        same_text(&skill.language, &requirement.language)
            && registry.satisfies(
                Scale::LanguageProficiency,
                &skill.proficiency_level,
                &requirement.minimum_proficiency_level,
            )
    })
}

pub(crate) fn required_languages(
    profile: &ApplicantProfile,
    requirements: &RequirementSet,
    registry: &ScaleRegistry,
) -> CriterionCheck {
    let required = requirements.required_languages();
    if required.is_empty() {
        return CriterionCheck::pass(Criterion::RequiredLanguages, "no language requirements");
    }

    for requirement in required {
        if registry
            .rank(
                Scale::LanguageProficiency,
                &requirement.minimum_proficiency_level,
            )
            .is_none()
        {
            warn!(
                language = %requirement.language,
                level = %requirement.minimum_proficiency_level,
                "requirement names an unknown proficiency level"
            );
        }
    }

    let unmet: Vec<String> = required
        .iter()
        .filter(|requirement| !language_met(profile, requirement, registry))
        .map(|requirement| {
            format!(
                "{} {}",
                requirement.language, requirement.minimum_proficiency_level
            )
        })
        .collect();

    if unmet.is_empty() {
        CriterionCheck::pass(
            Criterion::RequiredLanguages,
            format!("all {} language requirement(s) met", required.len()),
        )
    } else {
        CriterionCheck::fail(
            Criterion::RequiredLanguages,
            format!("missing {}", unmet.join(", ")),
        )
    }
}

fn same_text(left: &str, right: &str) -> bool {
    left == right || left.to_lowercase() == right.to_lowercase()
}
