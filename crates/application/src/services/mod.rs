//! Application services - Use case implementations

mod form_controller;
mod session_registry;
mod summary_prompt;

pub use form_controller::{FormController, FormDependencies, SubmitTimeouts};
pub use session_registry::{SessionGuard, SessionRegistry, SessionRegistryConfig};
pub use summary_prompt::build_summary_prompt;
