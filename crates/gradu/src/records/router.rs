use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::service::{SummaryService, SummaryServiceError};
use super::store::{
    validate_course, CourseId, CourseStore, StoreError, StoredCourse, StudentId, SummaryStore,
};
use crate::requirements::{Attestations, Course, Summary};

/// Body of the stateless guest evaluation endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSummaryRequest {
    pub courses: Vec<Course>,
    #[serde(default)]
    pub attestations: Attestations,
}

/// Response for course mutations: the stored record plus the recomputed summary.
#[derive(Debug, Clone, Serialize)]
pub struct CourseChangeView {
    pub course: StoredCourse,
    pub summary: Summary,
}

/// Router builder exposing the student summary, course maintenance and guest endpoints.
pub fn summary_router<C, S>(service: Arc<SummaryService<C, S>>) -> Router
where
    C: CourseStore + 'static,
    S: SummaryStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/students/:student_id/summary",
            get(summary_handler::<C, S>),
        )
        .route(
            "/api/v1/students/:student_id/courses",
            get(list_courses_handler::<C, S>).post(add_course_handler::<C, S>),
        )
        .route(
            "/api/v1/students/:student_id/courses/:course_id",
            put(update_course_handler::<C, S>).delete(remove_course_handler::<C, S>),
        )
        .route(
            "/api/v1/students/:student_id/attestations",
            put(attestations_handler::<C, S>),
        )
        .route("/api/v1/guest/summary", post(guest_summary_handler::<C, S>))
        .route("/api/v1/policy", get(policy_handler::<C, S>))
        .with_state(service)
}

pub(crate) async fn summary_handler<C, S>(
    State(service): State<Arc<SummaryService<C, S>>>,
    Path(student_id): Path<String>,
) -> Response
where
    C: CourseStore + 'static,
    S: SummaryStore + 'static,
{
    match service.get_summary(&StudentId(student_id)) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_courses_handler<C, S>(
    State(service): State<Arc<SummaryService<C, S>>>,
    Path(student_id): Path<String>,
) -> Response
where
    C: CourseStore + 'static,
    S: SummaryStore + 'static,
{
    match service.courses(&StudentId(student_id)) {
        Ok(courses) => (StatusCode::OK, axum::Json(courses)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_course_handler<C, S>(
    State(service): State<Arc<SummaryService<C, S>>>,
    Path(student_id): Path<String>,
    axum::Json(course): axum::Json<Course>,
) -> Response
where
    C: CourseStore + 'static,
    S: SummaryStore + 'static,
{
    match service.add_course(&StudentId(student_id), course) {
        Ok((course, summary)) => (
            StatusCode::CREATED,
            axum::Json(CourseChangeView { course, summary }),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_course_handler<C, S>(
    State(service): State<Arc<SummaryService<C, S>>>,
    Path((student_id, course_id)): Path<(String, u64)>,
    axum::Json(course): axum::Json<Course>,
) -> Response
where
    C: CourseStore + 'static,
    S: SummaryStore + 'static,
{
    match service.update_course(&StudentId(student_id), CourseId(course_id), course) {
        Ok((course, summary)) => {
            (StatusCode::OK, axum::Json(CourseChangeView { course, summary })).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_course_handler<C, S>(
    State(service): State<Arc<SummaryService<C, S>>>,
    Path((student_id, course_id)): Path<(String, u64)>,
) -> Response
where
    C: CourseStore + 'static,
    S: SummaryStore + 'static,
{
    match service.remove_course(&StudentId(student_id), CourseId(course_id)) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn attestations_handler<C, S>(
    State(service): State<Arc<SummaryService<C, S>>>,
    Path(student_id): Path<String>,
    axum::Json(attestations): axum::Json<Attestations>,
) -> Response
where
    C: CourseStore + 'static,
    S: SummaryStore + 'static,
{
    match service.update_attestations(&StudentId(student_id), attestations) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn guest_summary_handler<C, S>(
    State(service): State<Arc<SummaryService<C, S>>>,
    axum::Json(request): axum::Json<GuestSummaryRequest>,
) -> Response
where
    C: CourseStore + 'static,
    S: SummaryStore + 'static,
{
    if let Err(err) = request.courses.iter().try_for_each(validate_course) {
        return error_response(err.into());
    }

    let summary = service
        .engine()
        .evaluate(&request.courses, request.attestations);
    (StatusCode::OK, axum::Json(summary)).into_response()
}

pub(crate) async fn policy_handler<C, S>(
    State(service): State<Arc<SummaryService<C, S>>>,
) -> Response
where
    C: CourseStore + 'static,
    S: SummaryStore + 'static,
{
    (StatusCode::OK, axum::Json(service.engine().policy().clone())).into_response()
}

fn error_response(error: SummaryServiceError) -> Response {
    let status = match &error {
        SummaryServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SummaryServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        SummaryServiceError::Store(StoreError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
