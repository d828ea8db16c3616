use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::ApplicantProfile;

/// Field the applicant still has to fill in before a requirement set can be judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "camelCase")]
pub enum MissingProfileData {
    BirthDate,
    Nationality,
    AcademicRecords,
    DegreeLevel { index: usize },
    Languages,
    LanguageName { index: usize },
    ProficiencyLevel { index: usize },
}

impl fmt::Display for MissingProfileData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingProfileData::BirthDate => f.write_str("birth date"),
            MissingProfileData::Nationality => f.write_str("nationality"),
            MissingProfileData::AcademicRecords => f.write_str("academic records"),
            MissingProfileData::DegreeLevel { index } => {
                write!(f, "degree level of academic record #{}", index + 1)
            }
            MissingProfileData::Languages => f.write_str("languages"),
            MissingProfileData::LanguageName { index } => {
                write!(f, "name of language #{}", index + 1)
            }
            MissingProfileData::ProficiencyLevel { index } => {
                write!(f, "proficiency level of language #{}", index + 1)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completeness {
    Complete,
    Indeterminate(Vec<MissingProfileData>),
}

impl Completeness {
    pub fn is_complete(&self) -> bool {
        matches!(self, Completeness::Complete)
    }

    pub fn missing(&self) -> &[MissingProfileData] {
        match self {
            Completeness::Complete => &[],
            Completeness::Indeterminate(missing) => missing,
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Checks whether the profile carries enough data for a requirement set. Language entries are
/// only inspected when the scholarship asks for languages.
pub fn check_profile(profile: &ApplicantProfile, requires_language_data: bool) -> Completeness {
    let mut missing = Vec::new();

    if profile.birth_date.is_none() {
        missing.push(MissingProfileData::BirthDate);
    }

    if profile.nationality.as_deref().map_or(true, is_blank) {
        missing.push(MissingProfileData::Nationality);
    }

    if profile.academic_records.is_empty() {
        missing.push(MissingProfileData::AcademicRecords);
    }
    for (index, record) in profile.academic_records.iter().enumerate() {
        if is_blank(&record.degree_level) {
            missing.push(MissingProfileData::DegreeLevel { index });
        }
    }

    if requires_language_data {
        if profile.languages.is_empty() {
            missing.push(MissingProfileData::Languages);
        }
        for (index, skill) in profile.languages.iter().enumerate() {
            if is_blank(&skill.language) {
                missing.push(MissingProfileData::LanguageName { index });
            }
            if is_blank(&skill.proficiency_level) {
                missing.push(MissingProfileData::ProficiencyLevel { index });
            }
        }
    }

    if missing.is_empty() {
        Completeness::Complete
    } else {
        Completeness::Indeterminate(missing)
    }
}
