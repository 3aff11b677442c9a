use super::aggregate::Aggregate;
use super::policy::{EnglishThreshold, GraduationPolicy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnglishOutcome {
    pub major_credits: f64,
    pub elective_credits: f64,
    pub pass: bool,
}

pub fn evaluate_english(acc: &Aggregate, policy: &GraduationPolicy) -> EnglishOutcome {
    let major_credits = acc.eng_major_units.to_credit();
    let elective_credits = acc.eng_elective_units.to_credit();
    let thresholds = policy.english;

    EnglishOutcome {
        major_credits,
        elective_credits,
        pass: meets(thresholds.primary, major_credits, elective_credits)
            || meets(thresholds.alternate, major_credits, elective_credits),
    }
}

fn meets(threshold: EnglishThreshold, major: f64, elective: f64) -> bool {
    major >= f64::from(threshold.major) && elective >= f64::from(threshold.elective)
}
