use crate::infra::{build_engine, guest_evaluator};
use clap::Args;
use gradu::config::{AppConfig, PolicyConfig};
use gradu::error::AppError;
use gradu::records::{CourseImporter, SessionId};
use gradu::requirements::{Attestations, Summary};
use gradu::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Course list to evaluate (.csv export or .json array)
    #[arg(long)]
    pub(crate) courses: PathBuf,
    /// Mark the graduation English exam as passed
    #[arg(long)]
    pub(crate) grad_english: bool,
    /// Mark the department-specific extra requirement as passed
    #[arg(long)]
    pub(crate) dept_extra: bool,
    /// Policy JSON to evaluate against (defaults to GRADU_POLICY_PATH or the built-in policy)
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Print the summary as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct GuestImportArgs {
    /// Guest session identifier (letters, digits, '-' and '_')
    #[arg(long)]
    pub(crate) session: String,
    /// CSV export to append to the session
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct GuestSummaryArgs {
    /// Guest session identifier
    #[arg(long)]
    pub(crate) session: String,
    /// Print the summary as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

fn init_cli() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        courses,
        grad_english,
        dept_extra,
        policy,
        json,
    } = args;

    let config = init_cli()?;
    let policy = match policy {
        Some(path) => PolicyConfig { path: Some(path) },
        None => config.policy,
    };
    let engine = build_engine(&policy)?;

    let courses = CourseImporter::from_path(&courses)?;
    info!(courses = courses.len(), "course list loaded");

    let summary = engine.evaluate(&courses, Attestations::new(grad_english, dept_extra));
    print_summary(&summary, json)
}

pub(crate) fn run_guest_import(args: GuestImportArgs) -> Result<(), AppError> {
    let config = init_cli()?;
    let session = SessionId::parse(&args.session)?;
    let engine = build_engine(&config.policy)?;
    let guest = guest_evaluator(&config.guest, engine);

    let courses = CourseImporter::from_path(&args.csv)?;
    let imported = courses.len();
    let summary = guest.add_courses(&session, courses)?;

    println!(
        "Imported {} course(s) into guest session {} ({})",
        imported,
        session,
        config.guest.cache_dir.display()
    );
    render_summary(&summary);
    Ok(())
}

pub(crate) fn run_guest_summary(args: GuestSummaryArgs) -> Result<(), AppError> {
    let config = init_cli()?;
    let session = SessionId::parse(&args.session)?;
    let engine = build_engine(&config.policy)?;
    let guest = guest_evaluator(&config.guest, engine);

    let summary = guest.summary(&session)?;
    print_summary(&summary, args.json)
}

fn print_summary(summary: &Summary, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        render_summary(summary);
    }
    Ok(())
}

fn pass_label(pass: bool) -> &'static str {
    if pass {
        "PASS"
    } else {
        "FAIL"
    }
}

pub(crate) fn render_summary(summary: &Summary) {
    println!("Graduation summary (policy {})", summary.policy_version);

    println!("\nCategories");
    for row in &summary.rows {
        let designed = row
            .designed_earned
            .map(|designed| format!(" (design {designed})"))
            .unwrap_or_default();
        println!(
            "- {} [{}]: {} / {}{} {}",
            row.name,
            row.key,
            row.earned,
            row.grad,
            designed,
            row.status.as_str()
        );
    }

    println!(
        "\nP/F credits: {} (limit {}) {}",
        summary.pf_credits,
        summary.pf_limit,
        pass_label(summary.pf_pass)
    );
    println!(
        "Total credits: {} {}",
        summary.total_credits,
        pass_label(summary.total_pass)
    );
    println!("GPA: {:.3} {}", summary.gpa, pass_label(summary.gpa_pass));
    println!(
        "English-taught credits: major {}, elective {} {}",
        summary.eng_major_credits,
        summary.eng_elective_credits,
        pass_label(summary.english_pass)
    );
    println!(
        "Graduation English exam: {}",
        pass_label(summary.grad_english_passed)
    );
    println!(
        "Department extra requirement: {}",
        pass_label(summary.dept_extra_passed)
    );

    println!("\nFinal determination: {}", pass_label(summary.final_pass));
    if !summary.shortfalls.is_empty() {
        println!("Outstanding");
        for note in summary.shortfall_summaries() {
            println!("- {}", note);
        }
    }
}
