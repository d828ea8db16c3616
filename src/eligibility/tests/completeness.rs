use super::common::*;
use crate::eligibility::completeness::{check_profile, Completeness, MissingProfileData};

#[test]
fn complete_profile_passes() {
    let profile = applicant();

    assert_eq!(check_profile(&profile, true), Completeness::Complete);
    assert!(check_profile(&profile, false).is_complete());
}

#[test]
fn missing_birth_date_is_reported() {
    let mut profile = applicant();
    profile.birth_date = None;

    let result = check_profile(&profile, false);

    assert_eq!(result.missing(), &[MissingProfileData::BirthDate]);
}

#[test]
fn blank_nationality_counts_as_missing() {
    let mut profile = applicant();
    profile.nationality = Some("   ".to_string());

    let result = check_profile(&profile, false);

    assert_eq!(result.missing(), &[MissingProfileData::Nationality]);
}

#[test]
fn academic_history_must_be_present_and_labelled() {
    let mut profile = applicant();
    profile.academic_records.clear();
    assert_eq!(
        check_profile(&profile, false).missing(),
        &[MissingProfileData::AcademicRecords]
    );

    let mut profile = applicant();
    profile.academic_records[1].degree_level = String::new();
    assert_eq!(
        check_profile(&profile, false).missing(),
        &[MissingProfileData::DegreeLevel { index: 1 }]
    );
}

#[test]
fn languages_only_checked_when_required() {
    let mut profile = applicant();
    profile.languages.clear();

    assert!(check_profile(&profile, false).is_complete());
    assert_eq!(
        check_profile(&profile, true).missing(),
        &[MissingProfileData::Languages]
    );
}

#[test]
fn language_entries_need_name_and_level() {
    let mut profile = applicant();
    profile.languages.push(skill("", "B1"));
    profile.languages.push(skill("French", ""));

    assert!(check_profile(&profile, false).is_complete());
    assert_eq!(
        check_profile(&profile, true).missing(),
        &[
            MissingProfileData::LanguageName { index: 2 },
            MissingProfileData::ProficiencyLevel { index: 3 },
        ]
    );
}

#[test]
fn every_violation_is_collected() {
    let profile = crate::eligibility::ApplicantProfile::default();

    let result = check_profile(&profile, true);

    assert_eq!(
        result,
        Completeness::Indeterminate(vec![
            MissingProfileData::BirthDate,
            MissingProfileData::Nationality,
            MissingProfileData::AcademicRecords,
            MissingProfileData::Languages,
        ])
    );
}

#[test]
fn missing_fields_describe_themselves() {
    assert_eq!(
        MissingProfileData::DegreeLevel { index: 0 }.to_string(),
        "degree level of academic record #1"
    );
    assert_eq!(MissingProfileData::BirthDate.to_string(), "birth date");
}
