use chrono::NaiveDate;
use scholar_match::eligibility::{
    EligibilityAssessment, Outcome, Scale, ScaleRegistry, ShortlistEntry,
};

pub(crate) fn assessment(assessment: &EligibilityAssessment, today: NaiveDate) {
    println!("Eligibility check (evaluated {today})");
    println!("Outcome: {} - {}", assessment.outcome, assessment.outcome.label());

    if assessment.outcome == Outcome::Indeterminate {
        println!("\nProfile fields to complete");
        for field in &assessment.missing {
            println!("- {field}");
        }
        return;
    }

    println!("\nCriteria");
    for check in &assessment.checks {
        let mark = if check.passed { "pass" } else { "fail" };
        println!("- [{mark}] {}: {}", check.criterion.label(), check.detail);
    }
}

pub(crate) fn shortlist(entries: &[ShortlistEntry], evaluated: usize, today: NaiveDate) {
    println!(
        "Scholarship shortlist (evaluated {today}): {} of {} shown",
        entries.len(),
        evaluated
    );

    if entries.is_empty() {
        println!("No matching scholarships");
        return;
    }

    for entry in entries {
        println!("- {} ({}): {}", entry.name, entry.scholarship_id.0, entry.label);
        if !entry.missing.is_empty() {
            let fields: Vec<String> = entry.missing.iter().map(ToString::to_string).collect();
            println!("  missing: {}", fields.join(", "));
        }
    }
}

pub(crate) fn scales(registry: &ScaleRegistry) {
    for scale in [Scale::AcademicLevel, Scale::LanguageProficiency] {
        println!("{} (lowest first)", scale.label());
        for (rank, value) in registry.vocabulary(scale).iter().enumerate() {
            println!("  {rank}. {value}");
        }
    }
}
