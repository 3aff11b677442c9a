use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use super::store::{
    validate_course, CourseId, CourseStore, CourseValidationError, StoreError, StoredCourse,
    StudentId, SummarySnapshot, SummaryStore,
};
use crate::requirements::{Attestations, Course, GraduationEngine, Summary};

/// Authoritative context: course edits against the student store, each followed by a full
/// re-evaluation whose result is persisted as the student's snapshot.
///
/// Every write for one student runs under that student's lock, from the store mutation
/// through the snapshot save.
pub struct SummaryService<C, S> {
    courses: Arc<C>,
    snapshots: Arc<S>,
    engine: Arc<GraduationEngine>,
    student_locks: Mutex<HashMap<StudentId, Arc<Mutex<()>>>>,
}

impl<C, S> SummaryService<C, S>
where
    C: CourseStore + 'static,
    S: SummaryStore + 'static,
{
    pub fn new(courses: Arc<C>, snapshots: Arc<S>, engine: Arc<GraduationEngine>) -> Self {
        Self {
            courses,
            snapshots,
            engine,
            student_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &GraduationEngine {
        &self.engine
    }

    /// Stored snapshot when it was produced under the active policy, otherwise a fresh one.
    pub fn get_summary(&self, student: &StudentId) -> Result<Summary, SummaryServiceError> {
        match self.snapshots.fetch(student)? {
            Some(snapshot) if snapshot.summary.policy_version == self.engine.policy_version() => {
                Ok(snapshot.summary)
            }
            Some(snapshot) => {
                warn!(
                    %student,
                    stored = %snapshot.summary.policy_version,
                    active = %self.engine.policy_version(),
                    "stored summary was computed under another policy version; recomputing"
                );
                self.recompute_and_save(student)
            }
            None => self.recompute_and_save(student),
        }
    }

    pub fn recompute_and_save(&self, student: &StudentId) -> Result<Summary, SummaryServiceError> {
        let lock = self.student_lock(student);
        let _guard = lock.lock().expect("student mutex poisoned");
        self.recompute_locked(student, None)
    }

    pub fn courses(&self, student: &StudentId) -> Result<Vec<StoredCourse>, SummaryServiceError> {
        Ok(self.courses.list(student)?)
    }

    pub fn add_course(
        &self,
        student: &StudentId,
        course: Course,
    ) -> Result<(StoredCourse, Summary), SummaryServiceError> {
        validate_course(&course)?;
        let lock = self.student_lock(student);
        let _guard = lock.lock().expect("student mutex poisoned");
        let stored = self.courses.insert(student, course)?;
        let summary = self.recompute_locked(student, None)?;
        Ok((stored, summary))
    }

    pub fn update_course(
        &self,
        student: &StudentId,
        id: CourseId,
        course: Course,
    ) -> Result<(StoredCourse, Summary), SummaryServiceError> {
        validate_course(&course)?;
        let lock = self.student_lock(student);
        let _guard = lock.lock().expect("student mutex poisoned");
        let stored = self.courses.update(student, id, course)?;
        let summary = self.recompute_locked(student, None)?;
        Ok((stored, summary))
    }

    pub fn remove_course(
        &self,
        student: &StudentId,
        id: CourseId,
    ) -> Result<Summary, SummaryServiceError> {
        let lock = self.student_lock(student);
        let _guard = lock.lock().expect("student mutex poisoned");
        self.courses.remove(student, id)?;
        self.recompute_locked(student, None)
    }

    pub fn update_attestations(
        &self,
        student: &StudentId,
        attestations: Attestations,
    ) -> Result<Summary, SummaryServiceError> {
        let lock = self.student_lock(student);
        let _guard = lock.lock().expect("student mutex poisoned");
        self.recompute_locked(student, Some(attestations))
    }

    fn student_lock(&self, student: &StudentId) -> Arc<Mutex<()>> {
        let mut locks = self
            .student_locks
            .lock()
            .expect("student lock table poisoned");
        locks.entry(student.clone()).or_default().clone()
    }

    fn stored_attestations(&self, student: &StudentId) -> Result<Attestations, StoreError> {
        Ok(self
            .snapshots
            .fetch(student)?
            .map(|snapshot| snapshot.attestations)
            .unwrap_or_default())
    }

    /// Caller holds the student lock. `None` keeps the stored toggles, read after the
    /// course list so the saved snapshot carries the latest committed values.
    fn recompute_locked(
        &self,
        student: &StudentId,
        attestations: Option<Attestations>,
    ) -> Result<Summary, SummaryServiceError> {
        let courses: Vec<Course> = self
            .courses
            .list(student)?
            .into_iter()
            .map(|stored| stored.course)
            .collect();
        let attestations = match attestations {
            Some(attestations) => attestations,
            None => self.stored_attestations(student)?,
        };

        let summary = self.engine.evaluate(&courses, attestations);
        info!(
            %student,
            courses = courses.len(),
            policy = %summary.policy_version,
            final_pass = summary.final_pass,
            "graduation summary recomputed"
        );

        self.snapshots.save(SummarySnapshot {
            student_id: student.clone(),
            summary: summary.clone(),
            attestations,
            recomputed_at: Utc::now(),
        })?;

        Ok(summary)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummaryServiceError {
    #[error(transparent)]
    Validation(#[from] CourseValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
