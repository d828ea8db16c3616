//! Ordered vocabularies used for "at least as qualified as" comparisons.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::EligibilityError;

/// The two closed vocabularies the engine ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    AcademicLevel,
    LanguageProficiency,
}

impl Scale {
    pub const fn label(self) -> &'static str {
        match self {
            Scale::AcademicLevel => "academic level",
            Scale::LanguageProficiency => "language proficiency",
        }
    }

    /// Academic levels are matched verbatim, proficiency codes ignore case.
    const fn case_sensitive(self) -> bool {
        matches!(self, Scale::AcademicLevel)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Standard academic ladder, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AcademicLevel {
    Secondary,
    Undergraduate,
    Postgraduate,
    Master,
    Doctorate,
    Postdoctorate,
}

impl AcademicLevel {
    pub const ALL: [AcademicLevel; 6] = [
        AcademicLevel::Secondary,
        AcademicLevel::Undergraduate,
        AcademicLevel::Postgraduate,
        AcademicLevel::Master,
        AcademicLevel::Doctorate,
        AcademicLevel::Postdoctorate,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            AcademicLevel::Secondary => "Secondary",
            AcademicLevel::Undergraduate => "Undergraduate",
            AcademicLevel::Postgraduate => "Postgraduate",
            AcademicLevel::Master => "Master",
            AcademicLevel::Doctorate => "Doctorate",
            AcademicLevel::Postdoctorate => "Postdoctorate",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.label() == value)
    }
}

const PROFICIENCY_LEVELS: [&str; 6] = ["A1", "A2", "B1", "B2", "C1", "C2"];

/// Position inside a scale; larger means more qualified.
pub type Rank = usize;

/// Holds both vocabularies so evaluators share one ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleRegistry {
    academic_levels: Vec<String>,
    proficiency_levels: Vec<String>,
}

impl ScaleRegistry {
    pub fn standard() -> Self {
        Self {
            academic_levels: AcademicLevel::ALL
                .iter()
                .map(|level| level.label().to_string())
                .collect(),
            proficiency_levels: PROFICIENCY_LEVELS
                .iter()
                .map(|level| level.to_string())
                .collect(),
        }
    }

    /// Builds a registry from custom vocabularies, each listed lowest first.
    pub fn new(
        academic_levels: Vec<String>,
        proficiency_levels: Vec<String>,
    ) -> Result<Self, EligibilityError> {
        validate_vocabulary(Scale::AcademicLevel, &academic_levels)?;
        validate_vocabulary(Scale::LanguageProficiency, &proficiency_levels)?;
        Ok(Self {
            academic_levels,
            proficiency_levels,
        })
    }

    pub fn vocabulary(&self, scale: Scale) -> &[String] {
        match scale {
            Scale::AcademicLevel => &self.academic_levels,
            Scale::LanguageProficiency => &self.proficiency_levels,
        }
    }

    /// `None` marks a value outside the vocabulary.
    pub fn rank(&self, scale: Scale, value: &str) -> Option<Rank> {
        let vocabulary = self.vocabulary(scale);
        if scale.case_sensitive() {
            vocabulary.iter().position(|entry| entry == value)
        } else {
            vocabulary
                .iter()
                .position(|entry| entry.eq_ignore_ascii_case(value))
        }
    }

    /// Lowest value of the scale, used when an applicant has nothing better to show.
    pub fn lowest(&self, scale: Scale) -> &str {
        // Vocabularies are never empty: `standard` is fixed and `new` validates.
        self.vocabulary(scale)
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn label_at(&self, scale: Scale, rank: Rank) -> Option<&str> {
        self.vocabulary(scale).get(rank).map(String::as_str)
    }

    /// True when both values are known and `actual` ranks at or above `required`.
    pub fn satisfies(&self, scale: Scale, actual: &str, required: &str) -> bool {
        match (self.rank(scale, actual), self.rank(scale, required)) {
            (Some(actual), Some(required)) => actual >= required,
            _ => false,
        }
    }
}

impl Default for ScaleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_vocabulary(scale: Scale, vocabulary: &[String]) -> Result<(), EligibilityError> {
    if vocabulary.is_empty() {
        return Err(EligibilityError::InvalidScale {
            scale,
            reason: "vocabulary is empty".to_string(),
        });
    }

    for (index, entry) in vocabulary.iter().enumerate() {
        if entry.trim().is_empty() {
            return Err(EligibilityError::InvalidScale {
                scale,
                reason: format!("entry {index} is blank"),
            });
        }
        let duplicate = vocabulary[..index].iter().any(|earlier| {
            if scale.case_sensitive() {
                earlier == entry
            } else {
                earlier.eq_ignore_ascii_case(entry)
            }
        });
        if duplicate {
            return Err(EligibilityError::InvalidScale {
                scale,
                reason: format!("'{entry}' appears more than once"),
            });
        }
    }

    Ok(())
}
