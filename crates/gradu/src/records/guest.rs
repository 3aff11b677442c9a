use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::store::{validate_course, CourseValidationError};
use crate::requirements::{Attestations, Course, GraduationEngine, Summary};

/// Session-scoped key for unauthenticated course lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Accepts ASCII letters, digits, `-` and `_` so the id can double as a file stem.
    pub fn parse(raw: &str) -> Result<Self, GuestCacheError> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed.len() <= 64
            && trimmed
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(GuestCacheError::InvalidSession(raw.to_string()))
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a guest session keeps locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestState {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub attestations: Attestations,
}

/// Local cache backing guest evaluation.
pub trait GuestCache: Send + Sync {
    /// Missing sessions load as an empty state.
    fn load(&self, session: &SessionId) -> Result<GuestState, GuestCacheError>;
    fn store(&self, session: &SessionId, state: &GuestState) -> Result<(), GuestCacheError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GuestCacheError {
    #[error("invalid guest session id {0:?}")]
    InvalidSession(String),
    #[error("guest cache io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("guest cache is corrupt: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] CourseValidationError),
}

/// One JSON document per session under a cache directory.
#[derive(Debug, Clone)]
pub struct JsonFileGuestCache {
    dir: PathBuf,
}

impl JsonFileGuestCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, session: &SessionId) -> PathBuf {
        self.dir.join(format!("{}.json", session.0))
    }
}

impl GuestCache for JsonFileGuestCache {
    fn load(&self, session: &SessionId) -> Result<GuestState, GuestCacheError> {
        let path = self.path_for(session);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(GuestState::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, session: &SessionId, state: &GuestState) -> Result<(), GuestCacheError> {
        std::fs::create_dir_all(&self.dir)?;
        let payload = serde_json::to_vec_pretty(state)?;
        std::fs::write(self.path_for(session), payload)?;
        Ok(())
    }
}

/// Offline context: reads the local cache and runs the shared engine.
pub struct GuestEvaluator<G> {
    cache: Arc<G>,
    engine: Arc<GraduationEngine>,
}

impl<G> GuestEvaluator<G>
where
    G: GuestCache + 'static,
{
    pub fn new(cache: Arc<G>, engine: Arc<GraduationEngine>) -> Self {
        Self { cache, engine }
    }

    pub fn summary(&self, session: &SessionId) -> Result<Summary, GuestCacheError> {
        let state = self.cache.load(session)?;
        debug!(%session, courses = state.courses.len(), "evaluating guest course list");
        Ok(self.engine.evaluate(&state.courses, state.attestations))
    }

    /// Appends courses and returns the recomputed summary. Nothing is cached unless every
    /// course passes the same validation as the authoritative write path.
    pub fn add_courses(
        &self,
        session: &SessionId,
        courses: Vec<Course>,
    ) -> Result<Summary, GuestCacheError> {
        for course in &courses {
            validate_course(course)?;
        }
        let mut state = self.cache.load(session)?;
        state.courses.extend(courses);
        self.cache.store(session, &state)?;
        Ok(self.engine.evaluate(&state.courses, state.attestations))
    }

    pub fn set_attestations(
        &self,
        session: &SessionId,
        attestations: Attestations,
    ) -> Result<Summary, GuestCacheError> {
        let mut state = self.cache.load(session)?;
        state.attestations = attestations;
        self.cache.store(session, &state)?;
        Ok(self.engine.evaluate(&state.courses, state.attestations))
    }

    pub fn clear(&self, session: &SessionId) -> Result<(), GuestCacheError> {
        self.cache.store(session, &GuestState::default())
    }
}
