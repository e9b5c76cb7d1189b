//! HTTP transport for the divisibility classifier.
//!
//! Maps `GET /:command` onto [`gurobi_classifier::classify`] and renders the
//! label as plain text with a 200/400/500 status. Invocation logging is an
//! injected [`InvocationLogger`] rather than process-wide state, so routers
//! built in tests can observe exactly what was reported.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod server;
pub mod types;

pub use config::ServerConfig;
pub use error::{ConfigError, ServerError};
pub use logging::{InvocationLogger, TracingInvocationLogger};
pub use server::{build_router, AppState, ClassifierServer};
pub use types::HealthResponse;
