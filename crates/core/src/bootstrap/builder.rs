use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::bootstrap::{ResolvedConfiguration, Stage};
use crate::bundles::{BundleRegistry, ConfigBundle};
use crate::discovery::DiscoveryProvider;
use crate::errors::{BootstrapError, StartError};
use crate::features::FeatureFlag;
use crate::injector::InjectorAdapter;
use crate::modules::ModuleRef;
use crate::properties::{DefaultPropertySource, PropertySource};

/// Mutable accumulator for bootstrap configuration
///
/// The caller owns a `Bootstrap` exclusively during setup, accumulates
/// modules, profiles, flags and providers on it, then finalizes with
/// [`resolve`](Bootstrap::resolve) or [`start`](Bootstrap::start) — both take
/// the builder by value, so nothing can be registered or re-invoked once the
/// snapshot is frozen.
///
/// ```
/// use lamina_core::{modules, Bootstrap, NamedModule};
///
/// let mut boot = Bootstrap::create_with(modules![NamedModule::new("app")]);
/// boot.add_profile("test").disable_feature(lamina_core::USE_BOOTSTRAP_BUNDLE);
/// let resolved = boot.resolve().unwrap();
/// assert_eq!(resolved.layers().len(), 2); // app + baseline
/// ```
pub struct Bootstrap {
    pub(crate) modules: Vec<ModuleRef>,
    pub(crate) override_modules: Vec<ModuleRef>,
    pub(crate) bootstrap_modules: Vec<ModuleRef>,
    pub(crate) profiles: BTreeSet<String>,
    pub(crate) features: HashMap<&'static str, bool>,
    pub(crate) stage: Stage,
    pub(crate) providers: Vec<Box<dyn DiscoveryProvider>>,
    pub(crate) property_source: Arc<dyn PropertySource>,
    pub(crate) source_is_default: bool,
    pub(crate) bundles: BundleRegistry,
}

impl Bootstrap {
    /// Create an empty bootstrap configuration
    pub fn create() -> Self {
        Self {
            modules: Vec::new(),
            override_modules: Vec::new(),
            bootstrap_modules: Vec::new(),
            profiles: BTreeSet::new(),
            features: HashMap::new(),
            stage: Stage::default(),
            providers: Vec::new(),
            property_source: Arc::new(DefaultPropertySource),
            source_is_default: true,
            bundles: BundleRegistry::new(),
        }
    }

    /// Create a bootstrap configuration seeded with modules
    pub fn create_with(modules: impl IntoIterator<Item = ModuleRef>) -> Self {
        let mut boot = Self::create();
        boot.add_modules(modules);
        boot
    }

    /// Create a bootstrap configuration by applying bundles in order
    pub fn from_bundles<'a>(
        bundles: impl IntoIterator<Item = &'a dyn ConfigBundle>,
    ) -> Result<Self, BootstrapError> {
        let mut boot = Self::create();
        for bundle in bundles {
            boot.apply(bundle)?;
        }
        Ok(boot)
    }

    /// Add a main module; insertion order is preserved, duplicates allowed
    pub fn add_module(&mut self, module: ModuleRef) -> &mut Self {
        self.modules.push(module);
        self
    }

    /// Add main modules in order
    pub fn add_modules(&mut self, modules: impl IntoIterator<Item = ModuleRef>) -> &mut Self {
        self.modules.extend(modules);
        self
    }

    /// Add an override module
    ///
    /// Override modules always occupy the final layer of the resolved
    /// configuration, regardless of when they were added. Useful for testing
    /// or when an application absolutely needs to replace a binding
    /// contributed by code it does not control.
    pub fn add_override_module(&mut self, module: ModuleRef) -> &mut Self {
        self.override_modules.push(module);
        self
    }

    /// Add override modules in order
    pub fn add_override_modules(
        &mut self,
        modules: impl IntoIterator<Item = ModuleRef>,
    ) -> &mut Self {
        self.override_modules.extend(modules);
        self
    }

    /// Add a module to the bootstrap-exposed layer
    ///
    /// This is the phase-1 channel: bootstrap bundles use it to expose the
    /// modules that back the configuration system itself. Bootstrap-exposed
    /// modules form the lowest-precedence layer.
    pub fn add_bootstrap_module(&mut self, module: ModuleRef) -> &mut Self {
        self.bootstrap_modules.push(module);
        self
    }

    /// Add bootstrap-exposed modules in order
    pub fn add_bootstrap_modules(
        &mut self,
        modules: impl IntoIterator<Item = ModuleRef>,
    ) -> &mut Self {
        self.bootstrap_modules.extend(modules);
        self
    }

    /// Add a runtime profile; profiles form a set, re-adding is a no-op
    pub fn add_profile(&mut self, profile: impl Into<String>) -> &mut Self {
        self.profiles.insert(profile.into());
        self
    }

    /// Add runtime profiles
    pub fn add_profiles<I, S>(&mut self, profiles: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for profile in profiles {
            self.profiles.insert(profile.into());
        }
        self
    }

    /// Enable a feature flag
    pub fn enable_feature(&mut self, flag: FeatureFlag) -> &mut Self {
        self.set_feature(flag, true)
    }

    /// Disable a feature flag
    pub fn disable_feature(&mut self, flag: FeatureFlag) -> &mut Self {
        self.set_feature(flag, false)
    }

    /// Set an explicit feature flag override; the last value wins
    pub fn set_feature(&mut self, flag: FeatureFlag, enabled: bool) -> &mut Self {
        self.features.insert(flag.key(), enabled);
        self
    }

    /// Select the execution stage
    pub fn in_stage(&mut self, stage: Stage) -> &mut Self {
        self.stage = stage;
        self
    }

    /// Replace the active property source
    pub fn set_property_source(&mut self, source: Arc<dyn PropertySource>) -> &mut Self {
        tracing::info!(source = source.name(), "property source replaced");
        self.property_source = source;
        self.source_is_default = false;
        self
    }

    /// The active property source
    pub fn property_source(&self) -> &Arc<dyn PropertySource> {
        &self.property_source
    }

    /// Register a discovery provider; providers run once each, in
    /// registration order, during the main resolution pass
    pub fn add_discovery_provider<P>(&mut self, provider: P) -> &mut Self
    where
        P: DiscoveryProvider + 'static,
    {
        self.providers.push(Box::new(provider));
        self
    }

    /// The registry of optional, named bundles
    pub fn bundle_registry(&self) -> &BundleRegistry {
        &self.bundles
    }

    /// Mutable access to the bundle registry, for registering optional
    /// bundles such as the bootstrap bundle
    pub fn bundle_registry_mut(&mut self) -> &mut BundleRegistry {
        &mut self.bundles
    }

    /// Apply a reusable configuration bundle to this builder
    ///
    /// Can be called anywhere in the accumulation phase.
    pub fn apply(&mut self, bundle: &dyn ConfigBundle) -> Result<&mut Self, BootstrapError> {
        tracing::debug!(bundle = bundle.name(), "applying bundle");
        bundle.configure(self)?;
        Ok(self)
    }

    /// Resolve a feature flag against the current accumulator state
    ///
    /// Same precedence as the frozen resolver: property-source true, then
    /// explicit override, then the flag's default.
    pub fn is_feature_enabled(&self, flag: &FeatureFlag) -> bool {
        crate::features::resolver::evaluate(flag, &self.features, self.property_source.as_ref())
    }

    /// Active profiles accumulated so far
    pub fn profiles(&self) -> &BTreeSet<String> {
        &self.profiles
    }

    /// Selected execution stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Main modules accumulated so far
    pub fn modules(&self) -> &[ModuleRef] {
        &self.modules
    }

    /// Override modules accumulated so far
    pub fn override_modules(&self) -> &[ModuleRef] {
        &self.override_modules
    }

    /// Get the number of main modules
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Get the number of registered discovery providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Run the two-phase resolution and freeze the layered configuration
    ///
    /// Consumes the builder: discovery providers can never be invoked again
    /// after the snapshot exists.
    pub fn resolve(self) -> Result<ResolvedConfiguration, BootstrapError> {
        crate::bootstrap::resolver::resolve(self)
    }

    /// Resolve and hand the frozen configuration to an injector adapter
    pub fn start<A>(self, adapter: &A) -> Result<A::Context, StartError<A::Error>>
    where
        A: InjectorAdapter,
    {
        let resolved = self.resolve()?;
        adapter.create(&resolved).map_err(StartError::Injector)
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::create()
    }
}

impl std::fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap")
            .field("module_count", &self.modules.len())
            .field("override_count", &self.override_modules.len())
            .field("profiles", &self.profiles)
            .field("stage", &self.stage)
            .field("provider_count", &self.providers.len())
            .field("property_source", &self.property_source.name())
            .finish()
    }
}
