use crate::requirements::{Attestations, Category, Course, GraduationEngine, GraduationPolicy};

pub(super) fn engine() -> GraduationEngine {
    GraduationEngine::standard()
}

pub(super) fn attested() -> Attestations {
    Attestations::new(true, true)
}

pub(super) fn course(name: &str, category: Category, credit: f64, grade: &str) -> Course {
    Course::new(name, category, credit).graded(grade)
}

fn block(prefix: &str, category: Category, count: usize, credit: f64, grade: &str) -> Vec<Course> {
    (1..=count)
        .map(|n| course(&format!("{prefix} {n}"), category, credit, grade))
        .collect()
}

/// 130 credits that satisfy every category, the P/F cap and the primary English pair.
pub(super) fn graduating_transcript() -> Vec<Course> {
    let mut courses = vec![course("기독교 세계관", Category::FaithWorldview, 3.0, "A0")];
    courses.extend(block("Faith Seminar", Category::FaithWorldview, 2, 3.0, "P"));
    courses.extend(block("Leadership", Category::PersonalityLeadership, 2, 3.0, "B+"));
    courses.extend(block("Practical English", Category::PracticalEnglish, 3, 3.0, "A0"));
    courses.push(course("Global Issues", Category::GeneralEdu, 3.0, "A0").foreign_taught());
    courses.push(course("Writing", Category::GeneralEdu, 2.0, "B0"));
    courses.extend(block("Calculus", Category::Bsm, 6, 3.0, "B+"));
    courses.push(course("Intro to ICT", Category::IctIntro, 2.0, "A0"));
    courses.extend(
        block("Humanities", Category::FreeElectiveBasic, 2, 3.0, "A0")
            .into_iter()
            .map(Course::foreign_taught),
    );
    courses.push(course("Volunteering", Category::FreeElectiveBasic, 3.0, "P"));
    courses.extend(block("Open Elective P", Category::FreeElectiveMjr, 2, 3.0, "P"));
    courses.extend(block("Open Elective", Category::FreeElectiveMjr, 2, 3.0, "A0"));

    for n in 1..=20 {
        let mut major = course(&format!("Major {n}"), Category::Major, 3.0, "A0");
        if n <= 4 {
            major = major.designed(3);
        }
        if n <= 7 {
            major = major.foreign_taught();
        }
        courses.push(major);
    }

    courses
}

pub(super) fn relaxed_policy() -> GraduationPolicy {
    let mut policy = GraduationPolicy::standard();
    policy.pf_min_total_for_limit = 0;
    policy
}
