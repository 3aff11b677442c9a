//! Graduation-requirement evaluation.
//!
//! Everything under this module is a pure function of the course list, the policy and the
//! two attestation toggles. The authoritative and guest contexts in [`crate::records`]
//! both call [`GraduationEngine::evaluate`]; neither re-implements any of the arithmetic.

mod aggregate;
mod category;
mod course;
mod credit;
mod department;
mod english;
mod gpa;
mod grade;
mod policy;
mod ratio;
mod rows;
mod summary;
mod verdict;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, Aggregate};
pub use category::Category;
pub use course::{normalize_course_name, Course, CourseCategory, Term};
pub use credit::{CreditUnits, UnitConversion};
pub use department::capstone_sequence_completed;
pub use grade::{classify, normalize_grade, GradeClass};
pub use policy::{
    CountOnceRule, EnglishThreshold, EnglishThresholds, GraduationPolicy, PolicyError,
    STANDARD_POLICY_VERSION,
};
pub use rows::{CategoryRow, RowStatus};
pub use summary::Summary;
pub use verdict::{Attestations, Shortfall};

use summary::SummaryParts;

/// Stateless evaluator bound to one policy version.
#[derive(Debug, Clone)]
pub struct GraduationEngine {
    policy: GraduationPolicy,
}

impl GraduationEngine {
    pub fn new(policy: GraduationPolicy) -> Self {
        Self { policy }
    }

    pub fn standard() -> Self {
        Self::new(GraduationPolicy::standard())
    }

    pub fn policy(&self) -> &GraduationPolicy {
        &self.policy
    }

    pub fn policy_version(&self) -> &str {
        &self.policy.version
    }

    pub fn evaluate(&self, courses: &[Course], attestations: Attestations) -> Summary {
        let acc = aggregate(courses, &self.policy);

        let parts = SummaryParts {
            rows: rows::build_rows(&acc, &self.policy),
            pass_fail: ratio::evaluate_pass_fail(&acc, &self.policy),
            gpa: gpa::evaluate_gpa(&acc, &self.policy),
            english: english::evaluate_english(&acc, &self.policy),
            attestations,
        };

        summary::assemble(&acc, &self.policy, parts)
    }
}

impl Default for GraduationEngine {
    fn default() -> Self {
        Self::standard()
    }
}
