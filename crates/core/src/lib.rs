pub mod errors;
pub mod properties;
pub mod features;
pub mod modules;
pub mod discovery;
pub mod bundles;
pub mod bootstrap;
pub mod injector;

// Re-export key types for convenience (specific exports to avoid ambiguity)
pub use errors::{BootstrapError, StartError};
pub use properties::{
    CompositePropertySource, DefaultPropertySource, EnvPropertySource, MapPropertySource,
    PropertySource, PROFILES_PROPERTY,
};
pub use features::{
    FeatureFlag, FeatureFlagResolver, FlagResolver, USE_BASE_BUNDLE, USE_BOOTSTRAP_BUNDLE,
};
pub use modules::{BindingModule, ModuleRef, NamedModule};
pub use discovery::{
    ConditionEvaluator, ConditionalModuleProvider, Contribution, DiscoveryContext,
    DiscoveryProvider, ProfileCondition, PropertyCondition, StaticModuleProvider,
};
pub use bundles::{BaseBundle, BundleError, BundleRegistry, ConfigBundle, BOOTSTRAP_BUNDLE_ID};
pub use bootstrap::{
    Bootstrap, LayerSummary, ResolutionStats, ResolvedConfiguration, ResolvedLayers, Stage,
};
pub use injector::{InjectorAdapter, RunningContext, ShutdownLatch};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Framework information
pub const FRAMEWORK_NAME: &str = "lamina";

/// Get framework version
pub fn version() -> &'static str {
    VERSION
}

/// Get framework name
pub fn name() -> &'static str {
    FRAMEWORK_NAME
}
