use super::category::Category;
use super::course::{normalize_course_name, Course};
use super::credit::CreditUnits;
use super::grade::{classify, GradeClass};
use super::policy::GraduationPolicy;
use std::collections::HashMap;
use tracing::warn;

/// Single-pass accumulators over a course list. Every later evaluator reads from here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub earned_units: [CreditUnits; Category::COUNT],
    pub designed_earned: u32,
    pub total_units: CreditUnits,
    pub pf_units: CreditUnits,
    pub gpa_units: CreditUnits,
    /// Σ(units × grade point × 1000); grade points are kept in thousandths so the GPA
    /// division can be rounded exactly.
    pub gpa_weighted_milli: u64,
    pub eng_major_units: CreditUnits,
    pub eng_elective_units: CreditUnits,
    pub count_once_skipped: usize,
}

impl Aggregate {
    pub fn earned(&self, category: Category) -> CreditUnits {
        self.earned_units[category.index()]
    }
}

pub fn aggregate(courses: &[Course], policy: &GraduationPolicy) -> Aggregate {
    let mut acc = Aggregate::default();
    let count_once_slots = claim_count_once_slots(courses, policy);

    for (position, course) in courses.iter().enumerate() {
        let (grade, recognized) = classify(course.grade.as_deref(), policy);
        if !recognized {
            warn!(
                course = %course.name,
                grade = ?course.grade,
                "unrecognized grade treated as ungraded"
            );
        }
        if !grade.is_counted() {
            continue;
        }

        let category = course.category.known();
        if category.is_none() {
            warn!(
                course = %course.name,
                category = %course.category,
                "category outside the requirement table; counted toward totals only"
            );
        }

        let normalized_name = normalize_course_name(&course.name);
        if policy.count_once.applies_to(&normalized_name, category)
            && count_once_slots.get(&normalized_name) != Some(&position)
        {
            acc.count_once_skipped += 1;
            continue;
        }

        let conversion = CreditUnits::from_credit(course.credit);
        if !conversion.exact {
            warn!(
                course = %course.name,
                credit = course.credit,
                units = conversion.units.get(),
                "credit is not a multiple of 0.5; rounded to nearest half credit"
            );
        }
        let units = conversion.units;

        acc.total_units += units;
        apply_grade(&mut acc, grade, units);
        apply_category(&mut acc, course, category, grade, units);
        apply_english(&mut acc, course, category, units, policy);
    }

    acc
}

/// Position of the occurrence that counts for each count-once name: the first passing one,
/// or the first graded one when every attempt failed.
fn claim_count_once_slots(courses: &[Course], policy: &GraduationPolicy) -> HashMap<String, usize> {
    let mut slots: HashMap<String, (usize, bool)> = HashMap::new();

    for (position, course) in courses.iter().enumerate() {
        let (grade, _) = classify(course.grade.as_deref(), policy);
        if !grade.is_counted() {
            continue;
        }
        let normalized_name = normalize_course_name(&course.name);
        if !policy
            .count_once
            .applies_to(&normalized_name, course.category.known())
        {
            continue;
        }

        let passing = grade.is_passing();
        match slots.get(&normalized_name) {
            Some(&(_, claimed_by_pass)) if claimed_by_pass || !passing => {}
            _ => {
                slots.insert(normalized_name, (position, passing));
            }
        }
    }

    slots
        .into_iter()
        .map(|(name, (position, _))| (name, position))
        .collect()
}

fn apply_grade(acc: &mut Aggregate, grade: GradeClass, units: CreditUnits) {
    if matches!(grade, GradeClass::PassFail) {
        acc.pf_units += units;
        return;
    }

    if let Some(point) = grade.gpa_point() {
        let milli = (point * 1000.0).round() as u64;
        acc.gpa_weighted_milli = acc
            .gpa_weighted_milli
            .saturating_add(milli.saturating_mul(u64::from(units.get())));
        acc.gpa_units += units;
    }
}

fn apply_category(
    acc: &mut Aggregate,
    course: &Course,
    category: Option<Category>,
    grade: GradeClass,
    units: CreditUnits,
) {
    let Some(category) = category else {
        return;
    };

    if course.designed_credit.is_some() && category != Category::Major {
        warn!(
            course = %course.name,
            %category,
            "design credit recorded outside MAJOR is ignored"
        );
    }

    if !grade.is_passing() {
        return;
    }

    acc.earned_units[category.index()] += units;
    if category == Category::Major {
        acc.designed_earned = acc
            .designed_earned
            .saturating_add(course.designed_credit.unwrap_or(0));
    }
}

fn apply_english(
    acc: &mut Aggregate,
    course: &Course,
    category: Option<Category>,
    units: CreditUnits,
    policy: &GraduationPolicy,
) {
    if !course.is_foreign_taught {
        return;
    }

    match category {
        Some(Category::Major) => acc.eng_major_units += units,
        Some(excluded) if policy.english_elective_excluded.contains(&excluded) => {}
        _ => acc.eng_elective_units += units,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::course::CourseCategory;

    fn policy() -> GraduationPolicy {
        GraduationPolicy::standard()
    }

    #[test]
    fn ungraded_courses_are_invisible() {
        let courses = vec![
            Course::new("Algorithms", Category::Major, 3.0),
            Course::new("Networks", Category::Major, 3.0).graded("  "),
        ];
        assert_eq!(aggregate(&courses, &policy()), Aggregate::default());
    }

    #[test]
    fn failing_grade_counts_toward_totals_only() {
        let courses = vec![Course::new("Compilers", Category::Major, 3.0).graded("F")];
        let acc = aggregate(&courses, &policy());

        assert_eq!(acc.total_units, CreditUnits(6));
        assert_eq!(acc.gpa_units, CreditUnits(6));
        assert_eq!(acc.gpa_weighted_milli, 0);
        assert_eq!(acc.earned(Category::Major), CreditUnits::ZERO);
    }

    #[test]
    fn designed_credit_only_accumulates_for_major() {
        let courses = vec![
            Course::new("Capstone", Category::Major, 3.0)
                .graded("A0")
                .designed(3),
            Course::new("Physics", Category::Bsm, 3.0)
                .graded("A0")
                .designed(2),
            Course::new("OS", Category::Major, 3.0).graded("F").designed(3),
        ];
        let acc = aggregate(&courses, &policy());
        assert_eq!(acc.designed_earned, 3);
    }

    #[test]
    fn count_once_keeps_first_occurrence_only() {
        let courses = vec![
            Course::new("기독교 세계관", Category::FaithWorldview, 3.0).graded("A0"),
            Course::new("기독교세계관", Category::GeneralEdu, 3.0)
                .graded("P")
                .foreign_taught(),
        ];
        let acc = aggregate(&courses, &policy());

        assert_eq!(acc.total_units, CreditUnits(6));
        assert_eq!(acc.earned(Category::FaithWorldview), CreditUnits(6));
        assert_eq!(acc.earned(Category::GeneralEdu), CreditUnits::ZERO);
        assert_eq!(acc.pf_units, CreditUnits::ZERO);
        assert_eq!(acc.eng_elective_units, CreditUnits::ZERO);
        assert_eq!(acc.count_once_skipped, 1);
    }

    #[test]
    fn passing_retake_replaces_failed_count_once_attempt() {
        let courses = vec![
            Course::new("기독교 세계관", Category::FaithWorldview, 3.0).graded("F"),
            Course::new("기독교 세계관", Category::FaithWorldview, 3.0).graded("A0"),
        ];
        let acc = aggregate(&courses, &policy());

        assert_eq!(acc.earned(Category::FaithWorldview), CreditUnits(6));
        assert_eq!(acc.total_units, CreditUnits(6));
        assert_eq!(acc.gpa_units, CreditUnits(6));
        assert_eq!(acc.gpa_weighted_milli, 4000 * 6);
        assert_eq!(acc.count_once_skipped, 1);
    }

    #[test]
    fn failed_count_once_attempt_after_a_pass_is_skipped() {
        let courses = vec![
            Course::new("기독교 세계관", Category::FaithWorldview, 3.0).graded("B0"),
            Course::new("기독교세계관", Category::GeneralEdu, 3.0).graded("F"),
        ];
        let acc = aggregate(&courses, &policy());

        assert_eq!(acc.earned(Category::FaithWorldview), CreditUnits(6));
        assert_eq!(acc.total_units, CreditUnits(6));
        assert_eq!(acc.gpa_weighted_milli, 3000 * 6);
        assert_eq!(acc.count_once_skipped, 1);
    }

    #[test]
    fn repeated_failures_count_once() {
        let courses = vec![
            Course::new("기독교 세계관", Category::FaithWorldview, 3.0).graded("F"),
            Course::new("기독교 세계관", Category::GeneralEdu, 3.0).graded("F"),
        ];
        let acc = aggregate(&courses, &policy());

        assert_eq!(acc.total_units, CreditUnits(6));
        assert_eq!(acc.gpa_units, CreditUnits(6));
        assert_eq!(acc.earned(Category::FaithWorldview), CreditUnits::ZERO);
        assert_eq!(acc.count_once_skipped, 1);
    }

    #[test]
    fn count_once_ignores_ineligible_categories() {
        let courses = vec![
            Course::new("기독교 세계관", Category::FaithWorldview, 3.0).graded("A0"),
            Course::new("기독교 세계관", Category::Major, 3.0).graded("A0"),
        ];
        let acc = aggregate(&courses, &policy());
        assert_eq!(acc.total_units, CreditUnits(12));
        assert_eq!(acc.count_once_skipped, 0);
    }

    #[test]
    fn unrecognized_category_counts_toward_totals() {
        let courses = vec![Course::new(
            "Exchange Seminar",
            CourseCategory::Unrecognized("EXCHANGE".to_string()),
            2.0,
        )
        .graded("P")
        .foreign_taught()];
        let acc = aggregate(&courses, &policy());

        assert_eq!(acc.total_units, CreditUnits(4));
        assert_eq!(acc.pf_units, CreditUnits(4));
        assert_eq!(acc.eng_elective_units, CreditUnits(4));
        assert!(acc.earned_units.iter().all(|units| *units == CreditUnits::ZERO));
    }

    #[test]
    fn english_exclusions_come_from_policy() {
        let mut policy = policy();
        policy
            .english_elective_excluded
            .insert(Category::PracticalEnglish);
        let courses = vec![
            Course::new("English Reading", Category::GeneralEdu, 3.0)
                .graded("A0")
                .foreign_taught(),
            Course::new("Business English", Category::PracticalEnglish, 3.0)
                .graded("A0")
                .foreign_taught(),
        ];
        let acc = aggregate(&courses, &policy);
        assert_eq!(acc.eng_elective_units, CreditUnits(6));
    }
}
