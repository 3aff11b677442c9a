use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

use gradu::config::{GuestConfig, PolicyConfig};
use gradu::error::AppError;
use gradu::records::{
    GuestEvaluator, JsonFileGuestCache, MemoryCourseStore, MemorySummaryStore, SummaryService,
};
use gradu::requirements::GraduationEngine;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type AuthoritativeService = SummaryService<MemoryCourseStore, MemorySummaryStore>;

/// Loads the configured policy (or the built-in one) and wraps it in a shared engine.
pub(crate) fn build_engine(policy: &PolicyConfig) -> Result<Arc<GraduationEngine>, AppError> {
    let policy = policy.load_policy()?;
    info!(
        version = %policy.version,
        total_credits_min = policy.total_credits_min,
        "graduation policy loaded"
    );
    Ok(Arc::new(GraduationEngine::new(policy)))
}

pub(crate) fn authoritative_service(engine: Arc<GraduationEngine>) -> Arc<AuthoritativeService> {
    Arc::new(SummaryService::new(
        Arc::new(MemoryCourseStore::default()),
        Arc::new(MemorySummaryStore::default()),
        engine,
    ))
}

pub(crate) fn guest_evaluator(
    config: &GuestConfig,
    engine: Arc<GraduationEngine>,
) -> GuestEvaluator<JsonFileGuestCache> {
    GuestEvaluator::new(
        Arc::new(JsonFileGuestCache::new(config.cache_dir.clone())),
        engine,
    )
}
