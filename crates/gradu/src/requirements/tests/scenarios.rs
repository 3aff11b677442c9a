use super::common::*;
use crate::requirements::{Attestations, Category, GraduationEngine, RowStatus, Shortfall};

#[test]
fn single_major_course_fails_floor_and_major_row() {
    let courses = vec![course("Data Structures", Category::Major, 3.0, "A0")];

    let summary = engine().evaluate(&courses, attested());

    assert_eq!(summary.gpa, 4.0);
    assert_eq!(summary.total_credits, 3.0);
    assert!(!summary.total_pass);
    let major = summary
        .rows
        .iter()
        .find(|row| row.key == Category::Major)
        .expect("major row present");
    assert_eq!(major.earned, 3.0);
    assert_eq!(major.status, RowStatus::Fail);
    assert!(!summary.final_pass);
}

#[test]
fn pass_fail_share_above_cap_fails_ratio() {
    let mut policy = relaxed_policy();
    policy.pf_min_total_for_limit = 100;
    let engine = GraduationEngine::new(policy);

    let mut courses = Vec::new();
    for n in 1..=20 {
        let grade = if n <= 8 { "P" } else { "A0" };
        courses.push(course(
            &format!("Elective {n}"),
            Category::FreeElectiveMjr,
            5.0,
            grade,
        ));
    }

    let summary = engine.evaluate(&courses, attested());

    assert_eq!(summary.total_credits, 100.0);
    assert_eq!(summary.pf_credits, 40.0);
    assert_eq!(summary.pf_limit, 30.0);
    assert!(!summary.pf_pass);
    assert!(summary
        .shortfalls
        .iter()
        .any(|shortfall| matches!(shortfall, Shortfall::PassFailRatio { .. })));
}

#[test]
fn cross_listed_worldview_counts_once() {
    let single = vec![course("기독교 세계관", Category::FaithWorldview, 3.0, "A0")];
    let mut doubled = single.clone();
    doubled.push(course("기독교세계관 ", Category::GeneralEdu, 3.0, "A0"));

    let once = engine().evaluate(&single, attested());
    let twice = engine().evaluate(&doubled, attested());

    assert_eq!(twice.total_credits, 3.0);
    assert_eq!(once, twice);
}

#[test]
fn worldview_retake_after_failure_earns_the_category_credit() {
    let courses = vec![
        course("기독교 세계관", Category::FaithWorldview, 3.0, "F"),
        course("기독교 세계관", Category::FaithWorldview, 3.0, "A0"),
    ];

    let summary = engine().evaluate(&courses, attested());

    assert_eq!(summary.rows[Category::FaithWorldview.index()].earned, 3.0);
    assert_eq!(summary.total_credits, 3.0);
    assert_eq!(summary.gpa, 4.0);
}

#[test]
fn missing_department_attestation_blocks_graduation() {
    let courses = graduating_transcript();

    let summary = engine().evaluate(&courses, Attestations::new(true, false));

    assert!(summary.all_categories_pass());
    assert!(summary.pf_pass);
    assert!(summary.total_pass);
    assert!(summary.english_pass);
    assert!(summary.gpa_pass);
    assert!(!summary.dept_extra_passed);
    assert!(!summary.final_pass);
    assert_eq!(summary.shortfalls, vec![Shortfall::DepartmentExtra]);
}

#[test]
fn full_transcript_with_attestations_graduates() {
    let summary = engine().evaluate(&graduating_transcript(), attested());

    assert!(summary.final_pass, "{:?}", summary.shortfall_summaries());
    assert!(summary.shortfalls.is_empty());
    assert_eq!(summary.total_credits, 130.0);
    assert_eq!(summary.pf_credits, 15.0);
    assert_eq!(summary.pf_limit, 39.0);
    assert_eq!(summary.eng_major_credits, 21.0);
    assert_eq!(summary.eng_elective_credits, 9.0);
    let major = summary.rows.last().expect("major row");
    assert_eq!(major.grad, "60(12)");
    assert_eq!(major.designed_earned, Some(12));
}

#[test]
fn empty_course_list_reports_every_shortfall_but_zero_rows() {
    let summary = engine().evaluate(&[], Attestations::default());

    assert_eq!(summary.rows.len(), Category::COUNT);
    assert_eq!(summary.gpa, 0.0);
    assert_eq!(summary.pf_limit, 39.0);
    assert!(summary.pf_pass);
    assert!(!summary.final_pass);
    let free = &summary.rows[Category::FreeElectiveMjr.index()];
    assert_eq!(free.status, RowStatus::Pass);
    assert!(summary
        .shortfalls
        .iter()
        .any(|shortfall| matches!(shortfall, Shortfall::DesignCredits { required: 12, .. })));
}
