use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::guest::{GuestCache, GuestCacheError, GuestState, SessionId};
use super::store::{
    CourseId, CourseStore, StoreError, StoredCourse, StudentId, SummarySnapshot, SummaryStore,
};
use crate::requirements::Course;

/// Process-local course store backing the HTTP service and tests.
#[derive(Default, Clone)]
pub struct MemoryCourseStore {
    records: Arc<Mutex<HashMap<StudentId, Vec<StoredCourse>>>>,
    sequence: Arc<AtomicU64>,
}

impl MemoryCourseStore {
    fn next_id(&self) -> CourseId {
        CourseId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl CourseStore for MemoryCourseStore {
    fn list(&self, student: &StudentId) -> Result<Vec<StoredCourse>, StoreError> {
        let guard = self.records.lock().expect("course store mutex poisoned");
        Ok(guard.get(student).cloned().unwrap_or_default())
    }

    fn insert(&self, student: &StudentId, course: Course) -> Result<StoredCourse, StoreError> {
        let stored = StoredCourse {
            id: self.next_id(),
            course,
        };
        let mut guard = self.records.lock().expect("course store mutex poisoned");
        guard
            .entry(student.clone())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    fn update(
        &self,
        student: &StudentId,
        id: CourseId,
        course: Course,
    ) -> Result<StoredCourse, StoreError> {
        let mut guard = self.records.lock().expect("course store mutex poisoned");
        let existing = guard
            .get_mut(student)
            .and_then(|courses| courses.iter_mut().find(|stored| stored.id == id))
            .ok_or(StoreError::NotFound)?;
        existing.course = course;
        Ok(existing.clone())
    }

    fn remove(&self, student: &StudentId, id: CourseId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("course store mutex poisoned");
        let courses = guard.get_mut(student).ok_or(StoreError::NotFound)?;
        let before = courses.len();
        courses.retain(|stored| stored.id != id);
        if courses.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MemorySummaryStore {
    snapshots: Arc<Mutex<HashMap<StudentId, SummarySnapshot>>>,
}

impl SummaryStore for MemorySummaryStore {
    fn fetch(&self, student: &StudentId) -> Result<Option<SummarySnapshot>, StoreError> {
        let guard = self.snapshots.lock().expect("summary store mutex poisoned");
        Ok(guard.get(student).cloned())
    }

    fn save(&self, snapshot: SummarySnapshot) -> Result<(), StoreError> {
        let mut guard = self.snapshots.lock().expect("summary store mutex poisoned");
        guard.insert(snapshot.student_id.clone(), snapshot);
        Ok(())
    }
}

/// Guest cache that lives only as long as the process.
#[derive(Default, Clone)]
pub struct MemoryGuestCache {
    sessions: Arc<Mutex<HashMap<SessionId, GuestState>>>,
}

impl GuestCache for MemoryGuestCache {
    fn load(&self, session: &SessionId) -> Result<GuestState, GuestCacheError> {
        let guard = self.sessions.lock().expect("guest cache mutex poisoned");
        Ok(guard.get(session).cloned().unwrap_or_default())
    }

    fn store(&self, session: &SessionId, state: &GuestState) -> Result<(), GuestCacheError> {
        let mut guard = self.sessions.lock().expect("guest cache mutex poisoned");
        guard.insert(session.clone(), state.clone());
        Ok(())
    }
}
