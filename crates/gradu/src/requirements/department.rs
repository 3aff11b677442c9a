use super::course::{normalize_course_name, Course};
use super::grade::classify;
use super::policy::GraduationPolicy;

const CAPSTONE_ONE: &str = "캡스톤디자인1";
const CAPSTONE_TWO: &str = "캡스톤디자인2";

/// Whether both capstone design courses carry a passing grade.
///
/// Used to pre-fill the department-extra attestation; the engine itself only ever reads
/// the attestation the caller passes in.
pub fn capstone_sequence_completed(courses: &[Course], policy: &GraduationPolicy) -> bool {
    let first = normalize_course_name(CAPSTONE_ONE);
    let second = normalize_course_name(CAPSTONE_TWO);
    let mut has_first = false;
    let mut has_second = false;

    for course in courses {
        let (grade, _) = classify(course.grade.as_deref(), policy);
        if !grade.is_passing() {
            continue;
        }

        let name = normalize_course_name(&course.name);
        has_first |= name == first;
        has_second |= name == second;
        if has_first && has_second {
            return true;
        }
    }

    false
}
