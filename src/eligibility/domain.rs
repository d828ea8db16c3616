use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Applicant snapshot assembled by the profile source. The engine only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantProfile {
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub additional_citizenships: Vec<String>,
    #[serde(default)]
    pub academic_records: Vec<AcademicRecord>,
    #[serde(default)]
    pub languages: Vec<LanguageSkill>,
}

/// One degree held or in progress. A missing or future `completion_year` means in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecord {
    #[serde(default)]
    pub degree_level: String,
    #[serde(default)]
    pub discipline: String,
    #[serde(default)]
    pub completion_year: Option<i32>,
}

impl AcademicRecord {
    pub fn is_completed_before(&self, year: i32) -> bool {
        self.completion_year.map_or(false, |completed| completed < year)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSkill {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub proficiency_level: String,
}

/// Eligibility constraints published for a single scholarship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementSet {
    /// Inclusive age ceiling. Scholarship records store it loosely, so numeric strings are
    /// accepted and anything non-numeric reads as no ceiling.
    #[serde(default, deserialize_with = "deserialize_max_age")]
    pub max_age: Option<i32>,
    #[serde(default)]
    pub eligible_nationalities: Option<Vec<String>>,
    #[serde(default)]
    pub minimum_academic_level: Option<String>,
    #[serde(default)]
    pub required_languages: Option<Vec<LanguageRequirement>>,
}

impl RequirementSet {
    pub fn required_languages(&self) -> &[LanguageRequirement] {
        self.required_languages.as_deref().unwrap_or_default()
    }

    pub fn eligible_nationalities(&self) -> &[String] {
        self.eligible_nationalities.as_deref().unwrap_or_default()
    }

    pub fn requires_language_data(&self) -> bool {
        !self.required_languages().is_empty()
    }
}

fn deserialize_max_age<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(coerce_age))
}

/// Whole-year ceiling from a JSON number or numeric string. Fractions round down since ages
/// are whole years; a negative ceiling is kept and admits nobody.
fn coerce_age(value: &Value) -> Option<i32> {
    let years = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    years.is_finite().then(|| years.floor() as i32)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageRequirement {
    pub language: String,
    pub minimum_proficiency_level: String,
}

/// Identifier wrapper for scholarships handed over by the candidate source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScholarshipId(pub String);

/// Shortlist entry supplied by the external search layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipCandidate {
    pub id: ScholarshipId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub requirements: RequirementSet,
}
