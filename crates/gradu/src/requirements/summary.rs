use super::aggregate::Aggregate;
use super::english::EnglishOutcome;
use super::gpa::GpaOutcome;
use super::policy::GraduationPolicy;
use super::ratio::PassFailRatio;
use super::rows::CategoryRow;
use super::verdict::{collect_shortfalls, final_pass, Attestations, Shortfall, VerdictInputs};
use serde::{Deserialize, Serialize};

/// Complete output of one evaluation. Credits are display values (multiples of 0.5);
/// consumers read the booleans instead of re-deriving them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub policy_version: String,
    pub rows: Vec<CategoryRow>,
    pub pf_credits: f64,
    pub pf_limit: f64,
    pub pf_pass: bool,
    pub total_credits: f64,
    pub total_pass: bool,
    pub gpa: f64,
    pub gpa_pass: bool,
    pub eng_major_credits: f64,
    pub eng_elective_credits: f64,
    pub english_pass: bool,
    pub grad_english_passed: bool,
    pub dept_extra_passed: bool,
    pub final_pass: bool,
    pub shortfalls: Vec<Shortfall>,
}

impl Summary {
    pub fn all_categories_pass(&self) -> bool {
        self.rows.iter().all(|row| row.status.is_pass())
    }

    pub fn shortfall_summaries(&self) -> Vec<String> {
        self.shortfalls.iter().map(Shortfall::summary).collect()
    }
}

pub(crate) struct SummaryParts {
    pub rows: Vec<CategoryRow>,
    pub pass_fail: PassFailRatio,
    pub gpa: GpaOutcome,
    pub english: EnglishOutcome,
    pub attestations: Attestations,
}

pub(crate) fn assemble(acc: &Aggregate, policy: &GraduationPolicy, parts: SummaryParts) -> Summary {
    let SummaryParts {
        rows,
        pass_fail,
        gpa,
        english,
        attestations,
    } = parts;

    let total_credits = acc.total_units.to_credit();
    let total_pass = acc.total_units.get() >= policy.total_credits_min.saturating_mul(2);

    let inputs = VerdictInputs {
        policy,
        rows: &rows,
        designed_earned: acc.designed_earned,
        pass_fail,
        total_credits,
        total_pass,
        gpa,
        english,
        attestations,
    };
    let final_pass = final_pass(&inputs);
    let shortfalls = collect_shortfalls(&inputs);

    Summary {
        policy_version: policy.version.clone(),
        rows,
        pf_credits: pass_fail.pf_units.to_credit(),
        pf_limit: pass_fail.limit_units.to_credit(),
        pf_pass: pass_fail.pass,
        total_credits,
        total_pass,
        gpa: gpa.gpa,
        gpa_pass: gpa.pass,
        eng_major_credits: english.major_credits,
        eng_elective_credits: english.elective_credits,
        english_pass: english.pass,
        grad_english_passed: attestations.grad_english_passed,
        dept_extra_passed: attestations.dept_extra_passed,
        final_pass,
        shortfalls,
    }
}
