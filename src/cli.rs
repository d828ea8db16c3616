use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use scholar_match::config::AppConfig;
use scholar_match::eligibility::{ApplicantProfile, EligibilityEngine, ScholarshipCandidate};
use scholar_match::error::AppError;
use scholar_match::input::{read_document, EvaluationRequest};
use scholar_match::telemetry;
use tracing::info;

use crate::render;

#[derive(Parser, Debug)]
#[command(
    name = "scholar-match",
    about = "Check applicant profiles against scholarship eligibility requirements",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one profile against one requirement set
    Evaluate(EvaluateArgs),
    /// Evaluate one profile against a list of candidate scholarships
    Shortlist(ShortlistArgs),
    /// Print the academic level and language proficiency scales
    Scales,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// JSON document with `profile` and `requirements` objects
    #[arg(long)]
    input: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to MATCH_REFERENCE_DATE or today.
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ShortlistArgs {
    /// JSON applicant profile
    #[arg(long)]
    profile: PathBuf,
    /// JSON array of candidate scholarships
    #[arg(long)]
    candidates: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to MATCH_REFERENCE_DATE or today.
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(?config.environment, "scholar-match starting");

    let engine = EligibilityEngine::new(config.matching);

    match cli.command {
        Command::Evaluate(args) => run_evaluate(&engine, args),
        Command::Shortlist(args) => run_shortlist(&engine, args),
        Command::Scales => {
            render::scales(engine.registry());
            Ok(())
        }
    }
}

fn run_evaluate(engine: &EligibilityEngine, args: EvaluateArgs) -> Result<(), AppError> {
    let request: EvaluationRequest = read_document(&args.input)?;
    let (profile, requirements) = request.into_parts()?;
    let today = args.today.unwrap_or_else(|| engine.today());

    let assessment = engine.assess_on(&profile, &requirements, today);
    match args.format {
        OutputFormat::Text => render::assessment(&assessment, today),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&assessment)?),
    }
    Ok(())
}

fn run_shortlist(engine: &EligibilityEngine, args: ShortlistArgs) -> Result<(), AppError> {
    let profile: ApplicantProfile = read_document(&args.profile)?;
    let candidates: Vec<ScholarshipCandidate> = read_document(&args.candidates)?;
    let today = args.today.unwrap_or_else(|| engine.today());

    let entries = engine.shortlist_on(&profile, &candidates, today);
    info!(
        candidates = candidates.len(),
        shown = entries.len(),
        "shortlist evaluated"
    );
    match args.format {
        OutputFormat::Text => render::shortlist(&entries, candidates.len(), today),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }
    Ok(())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_match::config::MatchingConfig;
    use scholar_match::eligibility::EligibilityError;
    use std::io::Write;

    #[test]
    fn parses_evaluate_command() {
        let cli = Cli::try_parse_from([
            "scholar-match",
            "evaluate",
            "--input",
            "request.json",
            "--today",
            "2025-06-15",
            "--format",
            "json",
        ])
        .expect("arguments parse");

        match cli.command {
            Command::Evaluate(args) => {
                assert_eq!(args.input, PathBuf::from("request.json"));
                assert_eq!(args.today, NaiveDate::from_ymd_opt(2025, 6, 15));
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("expected evaluate command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        let result = Cli::try_parse_from([
            "scholar-match",
            "shortlist",
            "--profile",
            "p.json",
            "--candidates",
            "c.json",
            "--today",
            "15/06/2025",
        ]);

        assert!(result.is_err());
        assert!(parse_date("2025-13-01").is_err());
    }

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    fn engine() -> EligibilityEngine {
        EligibilityEngine::new(MatchingConfig {
            reference_date: NaiveDate::from_ymd_opt(2025, 6, 15),
            ..MatchingConfig::default()
        })
    }

    const PROFILE: &str = r#"{
        "birthDate": "2001-05-14",
        "nationality": "Chile",
        "academicRecords": [ { "degreeLevel": "Master", "discipline": "Law", "completionYear": 2024 } ],
        "languages": [ { "language": "English", "proficiencyLevel": "C1" } ]
    }"#;

    #[test]
    fn evaluate_command_reads_request_documents() {
        let request = write_temp(&format!(
            r#"{{ "profile": {PROFILE}, "requirements": {{ "maxAge": "30", "eligibleNationalities": ["All"] }} }}"#
        ));

        for format in [OutputFormat::Text, OutputFormat::Json] {
            let args = EvaluateArgs {
                input: request.path().to_path_buf(),
                today: None,
                format,
            };
            run_evaluate(&engine(), args).expect("evaluation succeeds");
        }
    }

    #[test]
    fn evaluate_command_rejects_requests_without_a_profile() {
        let request = write_temp(r#"{ "requirements": { "maxAge": 30 } }"#);
        let args = EvaluateArgs {
            input: request.path().to_path_buf(),
            today: None,
            format: OutputFormat::Text,
        };

        let err = run_evaluate(&engine(), args).expect_err("profile is required");

        assert!(matches!(
            err,
            AppError::Eligibility(EligibilityError::InvalidArgument {
                argument: "profile"
            })
        ));
        assert_eq!(
            err.to_string(),
            "eligibility error: invalid argument: profile is required"
        );
    }

    #[test]
    fn evaluate_command_reports_unreadable_input() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = EvaluateArgs {
            input: dir.path().join("missing.json"),
            today: None,
            format: OutputFormat::Json,
        };

        let err = run_evaluate(&engine(), args).expect_err("input file is missing");

        assert!(matches!(err, AppError::Input(_)));
    }

    #[test]
    fn shortlist_command_reads_profile_and_candidates() {
        let profile = write_temp(PROFILE);
        let candidates = write_temp(
            r#"[
                { "id": "open", "name": "Open Call" },
                { "id": "juniors", "name": "Juniors", "requirements": { "maxAge": 18 } }
            ]"#,
        );

        for format in [OutputFormat::Text, OutputFormat::Json] {
            let args = ShortlistArgs {
                profile: profile.path().to_path_buf(),
                candidates: candidates.path().to_path_buf(),
                today: NaiveDate::from_ymd_opt(2025, 6, 15),
                format,
            };
            run_shortlist(&engine(), args).expect("shortlist succeeds");
        }
    }
}
