use super::aggregate::Aggregate;
use super::policy::GraduationPolicy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpaOutcome {
    pub gpa: f64,
    pub pass: bool,
}

/// Credit-weighted GPA over letter-graded courses, rounded half-up to three decimals.
pub fn evaluate_gpa(acc: &Aggregate, policy: &GraduationPolicy) -> GpaOutcome {
    let gpa = weighted_average(acc.gpa_weighted_milli, u64::from(acc.gpa_units.get()));
    GpaOutcome {
        gpa,
        pass: gpa >= policy.gpa_min,
    }
}

fn weighted_average(weighted_milli: u64, units: u64) -> f64 {
    if units == 0 {
        return 0.0;
    }

    // thousandths = round_half_up(weighted_milli / units)
    let thousandths = (2 * weighted_milli + units) / (2 * units);
    thousandths as f64 / 1000.0
}
