use super::aggregate::Aggregate;
use super::category::Category;
use super::policy::GraduationPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RowStatus {
    Pass,
    Fail,
}

impl RowStatus {
    pub const fn from_bool(pass: bool) -> Self {
        if pass {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

/// One line of the requirement table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    pub key: Category,
    pub name: String,
    /// Requirement text, e.g. `"9"` or `"60(12)"` for the major row.
    pub grad: String,
    pub earned: f64,
    pub designed_earned: Option<u32>,
    pub status: RowStatus,
}

/// Evaluates every category in fixed order.
pub fn build_rows(acc: &Aggregate, policy: &GraduationPolicy) -> Vec<CategoryRow> {
    Category::ordered()
        .into_iter()
        .map(|category| build_row(category, acc, policy))
        .collect()
}

fn build_row(category: Category, acc: &Aggregate, policy: &GraduationPolicy) -> CategoryRow {
    let earned_units = acc.earned(category);
    let required = policy.required_for(category);
    let credits_met = earned_units.get() >= required.saturating_mul(2);

    match category {
        Category::Major => {
            let designed_required = policy.major_designed_required;
            let designed_met = acc.designed_earned >= designed_required;
            CategoryRow {
                key: category,
                name: category.label().to_string(),
                grad: format!("{required}({designed_required})"),
                earned: earned_units.to_credit(),
                designed_earned: Some(acc.designed_earned),
                status: RowStatus::from_bool(credits_met && designed_met),
            }
        }
        _ => CategoryRow {
            key: category,
            name: category.label().to_string(),
            grad: required.to_string(),
            earned: earned_units.to_credit(),
            designed_earned: None,
            status: RowStatus::from_bool(credits_met),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::credit::CreditUnits;

    fn acc_with(category: Category, credits: u32) -> Aggregate {
        let mut acc = Aggregate::default();
        acc.earned_units[category.index()] = CreditUnits::from_whole(credits);
        acc
    }

    #[test]
    fn rows_follow_fixed_order() {
        let rows = build_rows(&Aggregate::default(), &GraduationPolicy::standard());
        let keys: Vec<_> = rows.iter().map(|row| row.key).collect();
        assert_eq!(keys, Category::ordered().to_vec());
    }

    #[test]
    fn zero_threshold_always_passes() {
        let rows = build_rows(&Aggregate::default(), &GraduationPolicy::standard());
        let free = rows
            .iter()
            .find(|row| row.key == Category::FreeElectiveMjr)
            .expect("row present");
        assert_eq!(free.status, RowStatus::Pass);
        assert_eq!(free.grad, "0");
    }

    #[test]
    fn half_credit_shortfall_fails() {
        let mut acc = Aggregate::default();
        acc.earned_units[Category::GeneralEdu.index()] = CreditUnits(9);
        let rows = build_rows(&acc, &GraduationPolicy::standard());
        let row = &rows[Category::GeneralEdu.index()];
        assert_eq!(row.earned, 4.5);
        assert_eq!(row.status, RowStatus::Fail);
    }

    #[test]
    fn major_requires_design_credits_too() {
        let mut acc = acc_with(Category::Major, 60);
        acc.designed_earned = 11;
        let policy = GraduationPolicy::standard();

        let row = build_rows(&acc, &policy).pop().expect("major row");
        assert_eq!(row.grad, "60(12)");
        assert_eq!(row.designed_earned, Some(11));
        assert_eq!(row.status, RowStatus::Fail);

        acc.designed_earned = 12;
        let row = build_rows(&acc, &policy).pop().expect("major row");
        assert_eq!(row.status, RowStatus::Pass);
    }

    #[test]
    fn status_serializes_uppercase() {
        let json = serde_json::to_string(&RowStatus::Pass).expect("serialize");
        assert_eq!(json, "\"PASS\"");
    }
}
