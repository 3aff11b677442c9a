use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::records::{
    summary_router, CourseId, CourseStore, MemoryCourseStore, MemorySummaryStore, StoreError,
    StoredCourse, StudentId, SummarySnapshot, SummaryService, SummaryStore,
};
use crate::requirements::{Category, Course, GraduationEngine};

pub(super) fn student() -> StudentId {
    StudentId("22100123".to_string())
}

pub(super) fn engine() -> Arc<GraduationEngine> {
    Arc::new(GraduationEngine::standard())
}

/// A partial transcript touching every accumulator: count-once, P/F, F, design credit,
/// foreign-taught, an ungraded course and an unrecognized category.
pub(super) fn transcript() -> Vec<Course> {
    vec![
        Course::new("기독교 세계관", Category::FaithWorldview, 3.0).graded("A0"),
        Course::new("기독교세계관", Category::GeneralEdu, 3.0).graded("A0"),
        Course::new("Chapel", Category::FaithWorldview, 1.0).graded("P"),
        Course::new("Calculus 1", Category::Bsm, 3.0).graded("B+"),
        Course::new("Physics", Category::Bsm, 3.0).graded("F"),
        Course::new("Capstone Design 1", Category::Major, 3.0)
            .graded("A+")
            .designed(3)
            .foreign_taught(),
        Course::new("Operating Systems", Category::Major, 3.0).foreign_taught(),
        Course::new("Global Issues", Category::GeneralEdu, 2.0)
            .graded("B0")
            .foreign_taught(),
        Course::new("Exchange Seminar", crate::requirements::CourseCategory::parse("EXCHANGE"), 2.0)
            .graded("A0"),
    ]
}

pub(super) type MemoryService = SummaryService<MemoryCourseStore, MemorySummaryStore>;

pub(super) fn build_service() -> (
    MemoryService,
    Arc<MemoryCourseStore>,
    Arc<MemorySummaryStore>,
) {
    let courses = Arc::new(MemoryCourseStore::default());
    let snapshots = Arc::new(MemorySummaryStore::default());
    let service = SummaryService::new(courses.clone(), snapshots.clone(), engine());
    (service, courses, snapshots)
}

pub(super) fn summary_router_with_service(service: MemoryService) -> axum::Router {
    summary_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct UnavailableStore;

impl CourseStore for UnavailableStore {
    fn list(&self, _student: &StudentId) -> Result<Vec<StoredCourse>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _student: &StudentId, _course: Course) -> Result<StoredCourse, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update(
        &self,
        _student: &StudentId,
        _id: CourseId,
        _course: Course,
    ) -> Result<StoredCourse, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _student: &StudentId, _id: CourseId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

impl SummaryStore for UnavailableStore {
    fn fetch(&self, _student: &StudentId) -> Result<Option<SummarySnapshot>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn save(&self, _snapshot: SummarySnapshot) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
