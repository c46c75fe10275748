use std::sync::Arc;

use crate::config::Config;
use crate::corpus::store::Corpus;
use crate::matching::scoring::MatchScorer;
use crate::model::artifacts::Artifacts;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is loaded once at startup and read-only for the process
/// lifetime; per-request data (category, query, result set) never lands here.
#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<Corpus>,
    /// Fitted vectorizer and trained model. The model is loaded for parity
    /// with training output but the live scoring path only consults the
    /// vectorizer.
    pub artifacts: Arc<Artifacts>,
    /// Pluggable match scorer. Default: `BlendedMatchScorer`.
    pub scorer: Arc<dyn MatchScorer>,
    pub config: Config,
}
