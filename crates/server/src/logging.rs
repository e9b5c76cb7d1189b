//! Invocation logging capability.
//!
//! Handlers report through an `Arc<dyn InvocationLogger>` held in router
//! state. The default implementation forwards to `tracing`.

use gurobi_classifier::Classification;

/// Receives one event per route invocation and one per internal fault.
pub trait InvocationLogger: Send + Sync {
    /// A route was called. `token` is the raw path parameter, if any.
    fn invocation(&self, route: &str, token: Option<&str>);

    /// A classification finished.
    fn classified(&self, token: &str, outcome: &Classification);

    /// Something unexpected happened while serving `route`.
    fn fault(&self, route: &str, detail: &str);
}

/// Emits invocation events as structured `tracing` records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingInvocationLogger;

impl InvocationLogger for TracingInvocationLogger {
    fn invocation(&self, route: &str, token: Option<&str>) {
        tracing::info!(target: "gurobi::invocation", route, token, "Route: {}. Called", route);
    }

    fn classified(&self, token: &str, outcome: &Classification) {
        tracing::debug!(
            target: "gurobi::invocation",
            token,
            label = %outcome.label,
            status = %outcome.status,
            error = outcome.error.as_deref(),
            "classified"
        );
    }

    fn fault(&self, route: &str, detail: &str) {
        tracing::error!(target: "gurobi::invocation", route, detail, "Route: {}. Error", route);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_logger_is_usable_without_subscriber() {
        let logger = TracingInvocationLogger;
        logger.invocation("/", None);
        logger.classified("6", &gurobi_classifier::classify("6"));
        logger.fault("/:command", "boom");
    }
}
