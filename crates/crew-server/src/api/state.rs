use crew_stock::ResearchCrew;
use std::sync::Arc;

/// Shared state for all handlers
///
/// The crew is read-only; every request runs its own kickoff.
pub struct AppState {
    pub crew: ResearchCrew,
}

impl AppState {
    pub fn new(crew: ResearchCrew) -> Arc<Self> {
        Arc::new(Self { crew })
    }
}
