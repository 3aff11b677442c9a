//! Graduation-requirement evaluation engine.
//!
//! The [`requirements`] module holds the pure engine. The [`records`] module wires it to
//! the two places a course list can come from: the authoritative per-student store and the
//! guest cache. Both paths end in the same [`requirements::GraduationEngine::evaluate`].

pub mod config;
pub mod error;
pub mod records;
pub mod requirements;
pub mod telemetry;
