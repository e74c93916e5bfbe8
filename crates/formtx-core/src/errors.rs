use kit::types::diagnostics::Diagnostic;
use thiserror::Error;

/// Failure taxonomy of the builder core. The store layer never produces these
/// for business logic; they originate in the wizard operations that validate
/// caller input and in the export pipeline, and are caught at the nearest
/// user-facing boundary. No layer retries automatically.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuilderError {
    /// A precondition was violated before any side effect took place.
    #[error("invalid configuration: {0}")]
    ConfigurationInvalid(String),
    /// An adapter call failed; the invoking step surfaces this without
    /// corrupting store state.
    #[error("adapter operation failed: {0}")]
    AdapterOperationFailed(Diagnostic),
    /// Template assembly or packaging failed after validation passed. The
    /// wizard state is left untouched so the export can be re-triggered.
    #[error("export failed: {0}")]
    ExportFailed(String),
    /// Connectivity-looking failure, recognized heuristically so the UI can
    /// point the user at network settings instead of a generic error.
    #[error("network service error: {0}")]
    NetworkService(String),
}

const NETWORK_FAILURE_MARKERS: &[&str] = &[
    "connection refused",
    "connection reset",
    "timed out",
    "timeout",
    "dns",
    "rpc",
    "fetch",
    "socket",
    "unreachable",
    "502",
    "503",
];

/// Promotes adapter failures whose message looks like a connectivity problem
/// to `NetworkService`, leaving everything else as a plain adapter failure.
pub fn classify_adapter_failure(diagnostic: Diagnostic) -> BuilderError {
    let mut haystack = diagnostic.message.to_lowercase();
    if let Some(context) = &diagnostic.context {
        haystack.push(' ');
        haystack.push_str(&context.to_lowercase());
    }
    if NETWORK_FAILURE_MARKERS.iter().any(|marker| haystack.contains(marker)) {
        BuilderError::NetworkService(diagnostic.message)
    } else {
        BuilderError::AdapterOperationFailed(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("connection refused by host"; "refused")]
    #[test_case("request to RPC endpoint timed out"; "rpc timeout")]
    #[test_case("failed to fetch contract metadata"; "fetch")]
    #[test_case("upstream returned 503"; "service unavailable")]
    fn connectivity_failures_are_promoted(message: &str) {
        let classified = classify_adapter_failure(Diagnostic::error(message));
        assert!(matches!(classified, BuilderError::NetworkService(_)));
    }

    #[test]
    fn other_failures_stay_adapter_scoped() {
        let classified = classify_adapter_failure(Diagnostic::error("malformed ABI entry at 3"));
        assert!(matches!(classified, BuilderError::AdapterOperationFailed(_)));
    }

    #[test]
    fn context_participates_in_classification() {
        let diag = Diagnostic::error("contract load aborted")
            .with_context("the explorer socket closed unexpectedly");
        assert!(matches!(classify_adapter_failure(diag), BuilderError::NetworkService(_)));
    }
}
