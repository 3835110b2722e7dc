//! WeatherDesk HTTP presentation layer
//!
//! Serves the form page and the JSON session API.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use middleware::{REQUEST_ID_HEADER, RequestId};
pub use routes::create_router;
pub use state::AppState;
