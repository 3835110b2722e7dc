//! Application state shared across handlers

use std::sync::Arc;

use application::{FormController, RecordStorePort, SessionRegistry};
use infrastructure::{AppConfig, TemplateEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Live form sessions and the collaborators they share
    pub sessions: Arc<SessionRegistry>,
    /// Page renderer
    pub templates: Arc<TemplateEngine>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Loaded record store
    pub fn records(&self) -> &Arc<dyn RecordStorePort> {
        self.sessions.records()
    }

    /// A controller that is not tracked by the registry
    ///
    /// Used by the form page, where every request carries the whole form.
    pub fn transient_controller(&self) -> FormController {
        FormController::new(self.sessions.dependencies().clone())
    }
}
