use super::policy::GraduationPolicy;

/// Classification of a normalized grade against the policy's grade table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeClass {
    /// Letter grade above `F`; feeds category credit and GPA.
    Letter { point: f64 },
    /// `F`; counts toward totals and the GPA denominator only.
    Failing { point: f64 },
    /// Pass marker such as `P` or `PD`; feeds category credit and the P/F ratio.
    PassFail,
    /// Empty, missing, or unrecognized; excluded from every aggregate.
    Ungraded,
}

impl GradeClass {
    pub fn is_passing(self) -> bool {
        matches!(self, Self::Letter { .. } | Self::PassFail)
    }

    pub fn is_counted(self) -> bool {
        !matches!(self, Self::Ungraded)
    }

    pub fn gpa_point(self) -> Option<f64> {
        match self {
            Self::Letter { point } | Self::Failing { point } => Some(point),
            Self::PassFail | Self::Ungraded => None,
        }
    }
}

/// Trims, uppercases, and expands bare letters (`A` becomes `A0`).
pub fn normalize_grade(raw: &str) -> String {
    let trimmed = raw.trim().to_uppercase();
    match trimmed.as_str() {
        "A" | "B" | "C" | "D" => format!("{trimmed}0"),
        _ => trimmed,
    }
}

pub const FAILING_GRADE: &str = "F";

/// Classifies a raw grade. `recognized` is false for non-empty grades the policy does not know.
pub fn classify(raw: Option<&str>, policy: &GraduationPolicy) -> (GradeClass, bool) {
    let normalized = raw.map(normalize_grade).unwrap_or_default();
    if normalized.is_empty() {
        return (GradeClass::Ungraded, true);
    }

    if policy.pass_markers.contains(&normalized) {
        return (GradeClass::PassFail, true);
    }

    match policy.grade_points.get(&normalized) {
        Some(&point) if normalized == FAILING_GRADE => (GradeClass::Failing { point }, true),
        Some(&point) => (GradeClass::Letter { point }, true),
        None => (GradeClass::Ungraded, false),
    }
}
