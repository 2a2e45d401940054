use std::sync::Arc;

use crate::llm_client::Completer;
use crate::store::FactbookStore;
use crate::uploads::UploadStorage;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Each collaborator is constructed once in `main` and shared behind a trait
/// object, so tests can swap in in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FactbookStore>,
    pub uploads: Arc<dyn UploadStorage>,
    pub llm: Arc<dyn Completer>,
}
