//! Course-list sources and the services that feed them to the engine.
//!
//! The authoritative context ([`SummaryService`]) persists a snapshot after every edit.
//! The guest context ([`GuestEvaluator`]) reads a local cache and never persists a summary.

pub mod guest;
pub mod import;
pub mod memory;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use guest::{
    GuestCache, GuestCacheError, GuestEvaluator, GuestState, JsonFileGuestCache, SessionId,
};
pub use import::{CourseImportError, CourseImporter};
pub use memory::{MemoryCourseStore, MemoryGuestCache, MemorySummaryStore};
pub use router::{summary_router, CourseChangeView, GuestSummaryRequest};
pub use service::{SummaryService, SummaryServiceError};
pub use store::{
    validate_course, CourseId, CourseStore, CourseValidationError, StoreError, StoredCourse,
    StudentId, SummarySnapshot, SummaryStore,
};
