use crate::bootstrap::Bootstrap;
use crate::errors::BootstrapError;

/// A reusable sequence of builder calls
///
/// Bundles package configuration that several applications share: adding
/// modules, registering discovery providers, replacing the property source.
/// A bundle can be applied anywhere in the accumulation phase via
/// [`Bootstrap::apply`], and the resolver applies the well-known bootstrap
/// and baseline bundles itself during phase 1. `configure` is invoked exactly
/// once per application.
pub trait ConfigBundle {
    /// Bundle name for identification
    fn name(&self) -> &'static str;

    /// Apply this bundle's configuration to the builder
    fn configure(&self, boot: &mut Bootstrap) -> Result<(), BootstrapError>;
}

impl std::fmt::Debug for dyn ConfigBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigBundle")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::NamedModule;

    struct ProfileBundle;

    impl ConfigBundle for ProfileBundle {
        fn name(&self) -> &'static str {
            "profile-bundle"
        }

        fn configure(&self, boot: &mut Bootstrap) -> Result<(), BootstrapError> {
            boot.add_profile("bundled")
                .add_module(NamedModule::new("bundled-module").shared());
            Ok(())
        }
    }

    #[test]
    fn test_apply_mutates_builder() {
        let mut boot = Bootstrap::create();
        boot.apply(&ProfileBundle).unwrap();

        assert!(boot.profiles().contains("bundled"));
        assert_eq!(boot.module_count(), 1);
    }
}
