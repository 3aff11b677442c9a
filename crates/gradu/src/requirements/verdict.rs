use super::category::Category;
use super::english::EnglishOutcome;
use super::gpa::GpaOutcome;
use super::policy::GraduationPolicy;
use super::ratio::PassFailRatio;
use super::rows::CategoryRow;
use serde::{Deserialize, Serialize};

/// Externally supplied toggles required for graduation. Never derived from course data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attestations {
    #[serde(default)]
    pub grad_english_passed: bool,
    #[serde(default)]
    pub dept_extra_passed: bool,
}

impl Attestations {
    pub const fn new(grad_english_passed: bool, dept_extra_passed: bool) -> Self {
        Self {
            grad_english_passed,
            dept_extra_passed,
        }
    }
}

/// One unmet condition of the final verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shortfall {
    Category {
        key: Category,
        earned: f64,
        required: String,
    },
    DesignCredits {
        earned: u32,
        required: u32,
    },
    PassFailRatio {
        credits: f64,
        limit: f64,
    },
    TotalCredits {
        credits: f64,
        required: u32,
    },
    Gpa {
        gpa: f64,
        required: f64,
    },
    EnglishInstruction {
        major: f64,
        elective: f64,
    },
    GradEnglishExam,
    DepartmentExtra,
}

impl Shortfall {
    pub fn summary(&self) -> String {
        match self {
            Shortfall::Category {
                key,
                earned,
                required,
            } => format!(
                "{} short: earned {earned} of {required}",
                key.label()
            ),
            Shortfall::DesignCredits { earned, required } => {
                format!("design credits short: earned {earned} of {required}")
            }
            Shortfall::PassFailRatio { credits, limit } => {
                format!("pass/fail credits {credits} exceed limit {limit}")
            }
            Shortfall::TotalCredits { credits, required } => {
                format!("total credits {credits} below {required}")
            }
            Shortfall::Gpa { gpa, required } => format!("gpa {gpa:.3} below {required:.3}"),
            Shortfall::EnglishInstruction { major, elective } => format!(
                "english-taught credits insufficient (major {major}, elective {elective})"
            ),
            Shortfall::GradEnglishExam => "graduation english exam not attested".to_string(),
            Shortfall::DepartmentExtra => {
                "department extra requirement not attested".to_string()
            }
        }
    }
}

/// Inputs to the final determination, borrowed from the individual evaluators.
pub(crate) struct VerdictInputs<'a> {
    pub policy: &'a GraduationPolicy,
    pub rows: &'a [CategoryRow],
    pub designed_earned: u32,
    pub pass_fail: PassFailRatio,
    pub total_credits: f64,
    pub total_pass: bool,
    pub gpa: GpaOutcome,
    pub english: EnglishOutcome,
    pub attestations: Attestations,
}

/// Every failed conjunct in evaluation order. Final pass iff the list is empty.
pub(crate) fn collect_shortfalls(inputs: &VerdictInputs<'_>) -> Vec<Shortfall> {
    let policy = inputs.policy;
    let mut shortfalls = Vec::new();

    for row in inputs.rows.iter().filter(|row| !row.status.is_pass()) {
        if row.earned < f64::from(policy.required_for(row.key)) {
            shortfalls.push(Shortfall::Category {
                key: row.key,
                earned: row.earned,
                required: row.grad.clone(),
            });
        }

        if row.key == Category::Major && inputs.designed_earned < policy.major_designed_required
        {
            shortfalls.push(Shortfall::DesignCredits {
                earned: inputs.designed_earned,
                required: policy.major_designed_required,
            });
        }
    }

    if !inputs.pass_fail.pass {
        shortfalls.push(Shortfall::PassFailRatio {
            credits: inputs.pass_fail.pf_units.to_credit(),
            limit: inputs.pass_fail.limit_units.to_credit(),
        });
    }
    if !inputs.total_pass {
        shortfalls.push(Shortfall::TotalCredits {
            credits: inputs.total_credits,
            required: policy.total_credits_min,
        });
    }
    if !inputs.english.pass {
        shortfalls.push(Shortfall::EnglishInstruction {
            major: inputs.english.major_credits,
            elective: inputs.english.elective_credits,
        });
    }
    if !inputs.gpa.pass {
        shortfalls.push(Shortfall::Gpa {
            gpa: inputs.gpa.gpa,
            required: policy.gpa_min,
        });
    }
    if !inputs.attestations.grad_english_passed {
        shortfalls.push(Shortfall::GradEnglishExam);
    }
    if !inputs.attestations.dept_extra_passed {
        shortfalls.push(Shortfall::DepartmentExtra);
    }

    shortfalls
}

/// Logical AND of every requirement. There is no waiver path.
pub(crate) fn final_pass(inputs: &VerdictInputs<'_>) -> bool {
    inputs.rows.iter().all(|row| row.status.is_pass())
        && inputs.pass_fail.pass
        && inputs.total_pass
        && inputs.english.pass
        && inputs.gpa.pass
        && inputs.attestations.grad_english_passed
        && inputs.attestations.dept_extra_passed
}
