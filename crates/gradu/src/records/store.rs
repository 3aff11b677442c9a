use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::requirements::{Attestations, Category, Course, CreditUnits, Summary};

/// Identifier of an authenticated student record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseId(pub u64);

/// Course as persisted for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCourse {
    pub id: CourseId,
    #[serde(flatten)]
    pub course: Course,
}

/// Last computed summary for a student together with the toggles it was computed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySnapshot {
    pub student_id: StudentId,
    pub summary: Summary,
    pub attestations: Attestations,
    pub recomputed_at: DateTime<Utc>,
}

/// Per-student course storage.
pub trait CourseStore: Send + Sync {
    /// Courses in insertion order.
    fn list(&self, student: &StudentId) -> Result<Vec<StoredCourse>, StoreError>;
    fn insert(&self, student: &StudentId, course: Course) -> Result<StoredCourse, StoreError>;
    fn update(
        &self,
        student: &StudentId,
        id: CourseId,
        course: Course,
    ) -> Result<StoredCourse, StoreError>;
    fn remove(&self, student: &StudentId, id: CourseId) -> Result<(), StoreError>;
}

/// Storage for computed summaries and the attestation toggles.
pub trait SummaryStore: Send + Sync {
    fn fetch(&self, student: &StudentId) -> Result<Option<SummarySnapshot>, StoreError>;
    fn save(&self, snapshot: SummarySnapshot) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Data-entry checks applied before a course reaches storage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CourseValidationError {
    #[error("course name must not be empty")]
    EmptyName,
    #[error("credit {0} must be a non-negative multiple of 0.5")]
    InvalidCredit(f64),
    #[error("design credit is only recorded for MAJOR courses (found on {0})")]
    DesignCreditOutsideMajor(String),
}

pub fn validate_course(course: &Course) -> Result<(), CourseValidationError> {
    if course.name.trim().is_empty() {
        return Err(CourseValidationError::EmptyName);
    }

    if !CreditUnits::from_credit(course.credit).exact {
        return Err(CourseValidationError::InvalidCredit(course.credit));
    }

    if course.designed_credit.is_some() && !course.category.is(Category::Major) {
        return Err(CourseValidationError::DesignCreditOutsideMajor(
            course.category.to_string(),
        ));
    }

    Ok(())
}
