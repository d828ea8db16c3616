use chrono::NaiveDate;

use crate::config::MatchingConfig;
use crate::eligibility::domain::{
    AcademicRecord, ApplicantProfile, LanguageRequirement, LanguageSkill, RequirementSet,
    ScholarshipCandidate, ScholarshipId,
};
use crate::eligibility::EligibilityEngine;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(MatchingConfig::default())
}

pub(super) fn record(degree_level: &str, completion_year: Option<i32>) -> AcademicRecord {
    AcademicRecord {
        degree_level: degree_level.to_string(),
        discipline: "Economics".to_string(),
        completion_year,
    }
}

pub(super) fn skill(language: &str, level: &str) -> LanguageSkill {
    LanguageSkill {
        language: language.to_string(),
        proficiency_level: level.to_string(),
    }
}

pub(super) fn language_requirement(language: &str, level: &str) -> LanguageRequirement {
    LanguageRequirement {
        language: language.to_string(),
        minimum_proficiency_level: level.to_string(),
    }
}

/// Complete profile of a 23 year old Argentine graduate (as of `today()`).
pub(super) fn applicant() -> ApplicantProfile {
    ApplicantProfile {
        birth_date: Some(NaiveDate::from_ymd_opt(2002, 3, 10).expect("valid date")),
        nationality: Some("Argentina".to_string()),
        additional_citizenships: vec!["Italy".to_string()],
        academic_records: vec![
            record("Secondary", Some(2019)),
            record("Undergraduate", Some(2024)),
            record("Master", None),
        ],
        languages: vec![skill("Spanish", "C2"), skill("English", "B2")],
    }
}

pub(super) fn requirements() -> RequirementSet {
    RequirementSet {
        max_age: Some(30),
        eligible_nationalities: Some(vec!["Argentina".to_string(), "Uruguay".to_string()]),
        minimum_academic_level: Some("Undergraduate".to_string()),
        required_languages: None,
    }
}

pub(super) fn candidate(id: &str, requirements: RequirementSet) -> ScholarshipCandidate {
    ScholarshipCandidate {
        id: ScholarshipId(id.to_string()),
        name: format!("Scholarship {id}"),
        requirements,
    }
}
