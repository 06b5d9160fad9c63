use std::collections::BTreeSet;
use std::sync::Arc;

use crate::bootstrap::Stage;
use crate::features::{FeatureFlag, FeatureFlagResolver, FlagResolver};
use crate::modules::ModuleRef;
use crate::properties::PropertySource;

/// A single module yielded by a discovery provider, tagged with the layer it
/// belongs to.
#[derive(Debug, Clone)]
pub struct Contribution {
    pub module: ModuleRef,
    pub is_override: bool,
}

impl Contribution {
    /// Contribute a module to the auto layer
    pub fn module(module: ModuleRef) -> Self {
        Self {
            module,
            is_override: false,
        }
    }

    /// Contribute a module to the auto-override layer
    pub fn override_module(module: ModuleRef) -> Self {
        Self {
            module,
            is_override: true,
        }
    }
}

/// Read-only view of the frozen configuration state handed to discovery
/// providers during the main resolution pass
///
/// Providers may consult profiles, properties, flags and the stage but cannot
/// mutate the shared state; they communicate through returned contributions.
pub struct DiscoveryContext<'a> {
    profiles: &'a BTreeSet<String>,
    property_source: &'a Arc<dyn PropertySource>,
    flags: &'a FlagResolver,
    stage: Stage,
}

impl<'a> DiscoveryContext<'a> {
    pub(crate) fn new(
        profiles: &'a BTreeSet<String>,
        property_source: &'a Arc<dyn PropertySource>,
        flags: &'a FlagResolver,
        stage: Stage,
    ) -> Self {
        Self {
            profiles,
            property_source,
            flags,
            stage,
        }
    }

    /// Active profile names
    pub fn profiles(&self) -> &BTreeSet<String> {
        self.profiles
    }

    /// Check whether a profile is active
    pub fn has_profile(&self, profile: &str) -> bool {
        self.profiles.contains(profile)
    }

    /// The active property source
    pub fn property_source(&self) -> &dyn PropertySource {
        self.property_source.as_ref()
    }

    /// Look up a property value
    pub fn property(&self, key: &str) -> Option<String> {
        self.property_source.get(key)
    }

    /// Resolve a feature flag
    pub fn is_enabled(&self, flag: &FeatureFlag) -> bool {
        self.flags.is_enabled(flag)
    }

    /// The resolved execution stage
    pub fn stage(&self) -> Stage {
        self.stage
    }
}

/// Pluggable source of additional modules
///
/// Each registered provider is invoked exactly once per resolution, in
/// registration order, during the main pass. Implementations may use static
/// registration, generated registries or manual lists; the resolver treats
/// them uniformly.
pub trait DiscoveryProvider: Send + Sync {
    /// Provider name for identification
    fn name(&self) -> &'static str;

    /// Produce this provider's contributions for the current state
    fn discover(&self, ctx: &DiscoveryContext<'_>) -> Vec<Contribution>;
}

/// Discovery provider over a fixed contribution list
#[derive(Debug)]
pub struct StaticModuleProvider {
    name: &'static str,
    contributions: Vec<Contribution>,
}

impl StaticModuleProvider {
    /// Create an empty provider
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            contributions: Vec::new(),
        }
    }

    /// Add a module contribution
    pub fn with_module(mut self, module: ModuleRef) -> Self {
        self.contributions.push(Contribution::module(module));
        self
    }

    /// Add an override module contribution
    pub fn with_override(mut self, module: ModuleRef) -> Self {
        self.contributions.push(Contribution::override_module(module));
        self
    }
}

impl DiscoveryProvider for StaticModuleProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn discover(&self, _ctx: &DiscoveryContext<'_>) -> Vec<Contribution> {
        self.contributions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::NamedModule;
    use std::collections::HashMap;

    fn context_parts() -> (BTreeSet<String>, Arc<dyn PropertySource>, FlagResolver) {
        let profiles = BTreeSet::new();
        let source: Arc<dyn PropertySource> = Arc::new(crate::properties::DefaultPropertySource);
        let flags = FlagResolver::new(HashMap::new(), Arc::clone(&source));
        (profiles, source, flags)
    }

    #[test]
    fn test_static_provider_preserves_order_and_tags() {
        let provider = StaticModuleProvider::new("static")
            .with_module(NamedModule::new("c").shared())
            .with_override(NamedModule::new("d").shared());

        let (profiles, source, flags) = context_parts();
        let ctx = DiscoveryContext::new(&profiles, &source, &flags, Stage::Development);

        let contributions = provider.discover(&ctx);
        assert_eq!(contributions.len(), 2);
        assert_eq!(contributions[0].module.name(), "c");
        assert!(!contributions[0].is_override);
        assert_eq!(contributions[1].module.name(), "d");
        assert!(contributions[1].is_override);
    }
}
