use super::aggregate::Aggregate;
use super::credit::CreditUnits;
use super::policy::GraduationPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassFailRatio {
    pub pf_units: CreditUnits,
    pub limit_units: CreditUnits,
    pub pass: bool,
}

/// Caps pass/fail credits at a share of total credits, never computed against fewer than
/// `pf_min_total_for_limit` credits.
pub fn evaluate_pass_fail(acc: &Aggregate, policy: &GraduationPolicy) -> PassFailRatio {
    let floor_units = CreditUnits::from_whole(policy.pf_min_total_for_limit);
    let base_units = acc.total_units.max(floor_units);
    // 1e-9 absorbs representation error such as 200 * 0.3 = 59.99..
    let limit = (f64::from(base_units.get()) * policy.pf_ratio_max + 1e-9).floor();
    let limit_units = CreditUnits(limit.clamp(0.0, f64::from(u32::MAX)) as u32);

    PassFailRatio {
        pf_units: acc.pf_units,
        limit_units,
        pass: acc.pf_units <= limit_units,
    }
}
