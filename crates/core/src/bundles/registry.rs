use std::collections::HashMap;

use crate::bundles::ConfigBundle;

/// Well-known identifier under which the bootstrap bundle is looked up
/// during phase 1 of resolution.
pub const BOOTSTRAP_BUNDLE_ID: &str = "lamina.bootstrap";

/// Bundle registry error type
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("no bundle registered under '{name}'")]
    NotRegistered { name: String },

    #[error("bundle '{name}' failed to construct: {message}")]
    ConstructionFailed { name: String, message: String },
}

impl BundleError {
    /// Create a construction failure for a named bundle
    pub fn construction_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConstructionFailed {
            name: name.into(),
            message: message.into(),
        }
    }
}

type BundleFactory = Box<dyn Fn() -> Result<Box<dyn ConfigBundle>, BundleError> + Send + Sync>;

/// Explicit registry of optional, named bundle factories
///
/// Optional integrations register a zero-argument factory under a well-known
/// name; lookups for an unregistered name return a documented
/// [`BundleError::NotRegistered`] result instead of probing for types at
/// load time.
#[derive(Default)]
pub struct BundleRegistry {
    factories: HashMap<String, BundleFactory>,
}

impl BundleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bundle factory under a name, replacing any previous entry
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn ConfigBundle>, BundleError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Check if a bundle is registered
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiate the bundle registered under a name
    pub fn create(&self, name: &str) -> Result<Box<dyn ConfigBundle>, BundleError> {
        match self.factories.get(name) {
            Some(factory) => factory(),
            None => Err(BundleError::NotRegistered {
                name: name.to_string(),
            }),
        }
    }

    /// Get the number of registered bundles
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for BundleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleRegistry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::Bootstrap;
    use crate::errors::BootstrapError;

    struct EmptyBundle;

    impl ConfigBundle for EmptyBundle {
        fn name(&self) -> &'static str {
            "empty"
        }

        fn configure(&self, _boot: &mut Bootstrap) -> Result<(), BootstrapError> {
            Ok(())
        }
    }

    #[test]
    fn test_unregistered_name_is_a_documented_result() {
        let registry = BundleRegistry::new();

        let err = registry.create("nope").unwrap_err();
        assert!(matches!(err, BundleError::NotRegistered { name } if name == "nope"));
    }

    #[test]
    fn test_register_and_create() {
        let mut registry = BundleRegistry::new();
        registry.register("empty", || Ok(Box::new(EmptyBundle)));

        assert!(registry.contains("empty"));
        let bundle = registry.create("empty").unwrap();
        assert_eq!(bundle.name(), "empty");
    }

    #[test]
    fn test_factory_failure_is_construction_failed() {
        let mut registry = BundleRegistry::new();
        registry.register(BOOTSTRAP_BUNDLE_ID, || {
            Err(BundleError::construction_failed(
                BOOTSTRAP_BUNDLE_ID,
                "missing backing store",
            ))
        });

        let err = registry.create(BOOTSTRAP_BUNDLE_ID).unwrap_err();
        assert!(matches!(err, BundleError::ConstructionFailed { .. }));
    }
}
