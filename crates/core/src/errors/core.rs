use thiserror::Error;

/// Core error type for bootstrap resolution
///
/// All variants are fatal: resolution aborts before any layer list is handed
/// to the injector adapter. Errors raised inside discovery providers or the
/// adapter itself are not part of this taxonomy and propagate unmodified.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("unable to bootstrap: no configuration bundle is registered under '{bundle}'; register one on the bundle registry or disable the '{disable_flag}' feature")]
    MissingBootstrapDependency {
        bundle: String,
        disable_flag: &'static str,
    },

    #[error("bootstrap bundle '{bundle}' could not be applied: {source}")]
    BootstrapInstantiationFailure {
        bundle: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl BootstrapError {
    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if the error is a missing bootstrap dependency
    pub fn is_missing_bootstrap(&self) -> bool {
        matches!(self, Self::MissingBootstrapDependency { .. })
    }

    /// Check if the error is a bootstrap instantiation failure
    pub fn is_instantiation_failure(&self) -> bool {
        matches!(self, Self::BootstrapInstantiationFailure { .. })
    }

    /// Check if the error is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// Error returned by [`Bootstrap::start`](crate::bootstrap::Bootstrap::start)
///
/// Keeps resolution failures separate from injector adapter failures so the
/// adapter's own error type reaches the caller unmodified.
#[derive(Debug, Error)]
pub enum StartError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error("injector adapter failed: {0}")]
    Injector(E),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bootstrap_message_names_disable_flag() {
        let err = BootstrapError::MissingBootstrapDependency {
            bundle: "lamina.bootstrap".to_string(),
            disable_flag: "lamina.features.bootstrap",
        };

        assert!(err.is_missing_bootstrap());
        let message = err.to_string();
        assert!(message.contains("lamina.bootstrap"));
        assert!(message.contains("lamina.features.bootstrap"));
    }

    #[test]
    fn test_instantiation_failure_is_distinct() {
        let err = BootstrapError::BootstrapInstantiationFailure {
            bundle: "lamina.bootstrap".to_string(),
            source: Box::new(BootstrapError::configuration("boom")),
        };

        assert!(err.is_instantiation_failure());
        assert!(!err.is_missing_bootstrap());
    }
}
