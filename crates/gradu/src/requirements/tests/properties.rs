use super::common::*;
use crate::requirements::{Category, Course, CourseCategory, GraduationEngine, RowStatus};

#[test]
fn repeated_evaluation_is_byte_identical() {
    let courses = graduating_transcript();
    let engine = engine();

    let first = serde_json::to_vec(&engine.evaluate(&courses, attested())).expect("serialize");
    let second = serde_json::to_vec(&engine.evaluate(&courses, attested())).expect("serialize");

    assert_eq!(first, second);
}

#[test]
fn reordering_distinct_courses_does_not_change_the_summary() {
    let courses = graduating_transcript();
    let mut reversed = courses.clone();
    reversed.reverse();

    assert_eq!(
        engine().evaluate(&courses, attested()),
        engine().evaluate(&reversed, attested())
    );
}

#[test]
fn cross_listed_credit_lands_in_the_category_recorded_first() {
    let courses = vec![
        course("기독교 세계관", Category::FaithWorldview, 3.0, "A0"),
        course("Calculus 1", Category::Bsm, 3.0, "B+"),
        course("기독교세계관", Category::GeneralEdu, 3.0, "B0"),
    ];
    let mut reversed = courses.clone();
    reversed.reverse();

    let forward = engine().evaluate(&courses, attested());
    let backward = engine().evaluate(&reversed, attested());

    assert_eq!(forward.total_credits, backward.total_credits);
    assert_eq!(forward.total_credits, 6.0);
    assert_eq!(forward.rows[Category::FaithWorldview.index()].earned, 3.0);
    assert_eq!(forward.rows[Category::GeneralEdu.index()].earned, 0.0);
    assert_eq!(backward.rows[Category::FaithWorldview.index()].earned, 0.0);
    assert_eq!(backward.rows[Category::GeneralEdu.index()].earned, 3.0);
    assert_eq!(forward.gpa, 3.75);
    assert_eq!(backward.gpa, 3.25);
}

#[test]
fn adding_a_passing_course_never_regresses_a_category() {
    let engine = engine();
    let mut courses = Vec::new();

    for category in Category::ordered() {
        let mut previous = engine.evaluate(&courses, attested()).rows[category.index()].status;
        for n in 0..25 {
            let mut added = course(&format!("{category} {n}"), category, 3.0, "B0");
            if category == Category::Major {
                added = added.designed(1);
            }
            courses.push(added);

            let status = engine.evaluate(&courses, attested()).rows[category.index()].status;
            assert!(
                !(previous == RowStatus::Pass && status == RowStatus::Fail),
                "{category} regressed after adding course {n}"
            );
            previous = status;
        }
        assert_eq!(previous, RowStatus::Pass, "{category} never reached its threshold");
    }
}

#[test]
fn pass_fail_cap_never_drops_below_floor() {
    let engine = engine();
    let floor_limit = 39.0;

    for credits in [0.0, 0.5, 3.0, 60.0, 129.5, 130.0] {
        let courses = vec![course("Elective", Category::FreeElectiveMjr, credits, "A0")];
        let summary = engine.evaluate(&courses, attested());
        assert_eq!(summary.pf_limit, floor_limit, "total {credits}");
    }

    let courses = vec![course("Elective", Category::FreeElectiveMjr, 200.0, "A0")];
    assert_eq!(engine.evaluate(&courses, attested()).pf_limit, 60.0);
}

#[test]
fn pass_and_ungraded_courses_carry_no_gpa_weight() {
    let engine = engine();
    let base = vec![
        course("Algorithms", Category::Major, 3.0, "A+"),
        course("Statistics", Category::Bsm, 2.0, "C+"),
    ];
    let baseline = engine.evaluate(&base, attested()).gpa;

    let mut with_pass = base.clone();
    with_pass.push(course("Chapel", Category::FaithWorldview, 3.0, "P"));
    let mut with_ungraded = base.clone();
    with_ungraded.push(Course::new("Thesis", Category::Major, 3.0));

    assert_eq!(engine.evaluate(&with_pass, attested()).gpa, baseline);
    assert_eq!(engine.evaluate(&with_ungraded, attested()).gpa, baseline);
    // (4.5 * 6 + 2.5 * 4) / 10 units
    assert_eq!(baseline, 3.7);
}

#[test]
fn failing_grade_lowers_gpa_and_adds_to_total_only() {
    let courses = vec![
        course("Algorithms", Category::Major, 3.0, "A0"),
        course("Compilers", Category::Major, 3.0, "F"),
    ];

    let summary = engine().evaluate(&courses, attested());

    assert_eq!(summary.gpa, 2.0);
    assert_eq!(summary.total_credits, 6.0);
    assert_eq!(summary.rows[Category::Major.index()].earned, 3.0);
}

#[test]
fn unrecognized_category_is_dropped_from_rows_only() {
    let courses = vec![Course::new(
        "Exchange Program",
        CourseCategory::Unrecognized("EXCHANGE".to_string()),
        6.0,
    )
    .graded("A0")
    .foreign_taught()];

    let summary = engine().evaluate(&courses, attested());

    assert_eq!(summary.total_credits, 6.0);
    assert_eq!(summary.gpa, 4.0);
    assert_eq!(summary.eng_elective_credits, 6.0);
    assert!(summary.rows.iter().all(|row| row.earned == 0.0));
}

#[test]
fn malformed_credit_is_rounded_not_fatal() {
    let courses = vec![course("Lab", Category::Bsm, 1.3, "A0")];

    let summary = engine().evaluate(&courses, attested());

    assert_eq!(summary.total_credits, 1.5);
    assert_eq!(summary.rows[Category::Bsm.index()].earned, 1.5);
}

#[test]
fn engine_reports_policy_version() {
    let mut policy = relaxed_policy();
    policy.version = "2025-pilot".to_string();

    let summary = GraduationEngine::new(policy).evaluate(&[], attested());

    assert_eq!(summary.policy_version, "2025-pilot");
}
