use crate::bootstrap::Bootstrap;
use crate::bundles::ConfigBundle;
use crate::errors::BootstrapError;
use crate::modules::NamedModule;

/// Default baseline bundle
///
/// Contributes the framework's baseline module to the core layer. Applied by
/// the resolver after the bootstrap phase whenever
/// [`USE_BASE_BUNDLE`](crate::features::USE_BASE_BUNDLE) is enabled;
/// applications that bring their own baseline disable the flag instead of
/// overriding the module.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseBundle;

/// Name of the module contributed by [`BaseBundle`].
pub const BASE_MODULE_NAME: &str = "lamina-defaults";

impl ConfigBundle for BaseBundle {
    fn name(&self) -> &'static str {
        "lamina-base"
    }

    fn configure(&self, boot: &mut Bootstrap) -> Result<(), BootstrapError> {
        boot.add_module(
            NamedModule::new(BASE_MODULE_NAME)
                .with_description("baseline bindings used when the application supplies none")
                .shared(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_bundle_contributes_baseline_module() {
        let mut boot = Bootstrap::create();
        boot.apply(&BaseBundle).unwrap();

        let names: Vec<String> = boot.modules().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names, vec![BASE_MODULE_NAME.to_string()]);
    }
}
