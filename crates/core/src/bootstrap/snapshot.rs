use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bootstrap::Stage;
use crate::features::FlagResolver;
use crate::modules::ModuleRef;
use crate::properties::PropertySource;

/// The four precedence layers of a resolved configuration
///
/// Later layers win over earlier ones at bind-conflict time:
///
/// ```text
/// +-------------------+
/// |      Override     |
/// +-------------------+
/// |   Auto Override   |
/// +-------------------+
/// |    Core + Auto    |
/// +-------------------+
/// | Bootstrap Exposed |
/// +-------------------+
/// ```
///
/// Keeping overrides as structurally separate, always-last layers means every
/// override is guaranteed highest precedence without per-module annotation,
/// and without losing the overridden module's source context.
pub struct ResolvedLayers {
    bootstrap_exposed: Vec<ModuleRef>,
    core: Vec<ModuleRef>,
    auto_override: Vec<ModuleRef>,
    overrides: Vec<ModuleRef>,
}

impl ResolvedLayers {
    pub(crate) fn new(
        bootstrap_exposed: Vec<ModuleRef>,
        core: Vec<ModuleRef>,
        auto_override: Vec<ModuleRef>,
        overrides: Vec<ModuleRef>,
    ) -> Self {
        Self {
            bootstrap_exposed,
            core,
            auto_override,
            overrides,
        }
    }

    /// Modules discovered during the bootstrap phase
    pub fn bootstrap_exposed(&self) -> &[ModuleRef] {
        &self.bootstrap_exposed
    }

    /// Explicit modules plus non-override discovered modules
    pub fn core(&self) -> &[ModuleRef] {
        &self.core
    }

    /// Discovered modules marked as overrides, provider order preserved
    pub fn auto_override(&self) -> &[ModuleRef] {
        &self.auto_override
    }

    /// Caller-supplied override modules, insertion order preserved
    pub fn overrides(&self) -> &[ModuleRef] {
        &self.overrides
    }

    /// All modules in fixed precedence order
    pub fn iter(&self) -> impl Iterator<Item = &ModuleRef> {
        self.bootstrap_exposed
            .iter()
            .chain(&self.core)
            .chain(&self.auto_override)
            .chain(&self.overrides)
    }

    /// Concatenate all layers into one ordered module list
    pub fn to_vec(&self) -> Vec<ModuleRef> {
        self.iter().cloned().collect()
    }

    /// Total module count across all layers
    pub fn len(&self) -> usize {
        self.bootstrap_exposed.len()
            + self.core.len()
            + self.auto_override.len()
            + self.overrides.len()
    }

    /// Check if all layers are empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot the layer structure by module name, for logs and diagnostics
    pub fn summary(&self) -> LayerSummary {
        let names = |modules: &[ModuleRef]| {
            modules.iter().map(|m| m.name().to_string()).collect::<Vec<_>>()
        };

        LayerSummary {
            bootstrap_exposed: names(&self.bootstrap_exposed),
            core: names(&self.core),
            auto_override: names(&self.auto_override),
            overrides: names(&self.overrides),
        }
    }
}

impl std::fmt::Debug for ResolvedLayers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedLayers")
            .field("bootstrap_exposed", &self.bootstrap_exposed.len())
            .field("core", &self.core.len())
            .field("auto_override", &self.auto_override.len())
            .field("overrides", &self.overrides.len())
            .finish()
    }
}

/// Serializable layer structure for introspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSummary {
    pub bootstrap_exposed: Vec<String>,
    pub core: Vec<String>,
    pub auto_override: Vec<String>,
    pub overrides: Vec<String>,
}

impl LayerSummary {
    /// Render the summary as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Statistics for the resolution process
#[derive(Debug, Clone, Default)]
pub struct ResolutionStats {
    pub provider_count: usize,
    pub module_count: usize,
    pub bootstrap_time: Duration,
    pub discovery_time: Duration,
    pub total_time: Duration,
}

/// Immutable snapshot of a completed resolution
///
/// Constructed once from the builder's final state so the injector adapter
/// observes a consistent, non-mutating view. Produced per resolution call and
/// consumed immediately; never persisted.
pub struct ResolvedConfiguration {
    id: Uuid,
    resolved_at: DateTime<Utc>,
    layers: ResolvedLayers,
    stage: Stage,
    profiles: BTreeSet<String>,
    property_source: Arc<dyn PropertySource>,
    flags: FlagResolver,
    stats: ResolutionStats,
}

impl ResolvedConfiguration {
    pub(crate) fn new(
        layers: ResolvedLayers,
        stage: Stage,
        profiles: BTreeSet<String>,
        property_source: Arc<dyn PropertySource>,
        flags: FlagResolver,
        stats: ResolutionStats,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            resolved_at: Utc::now(),
            layers,
            stage,
            profiles,
            property_source,
            flags,
            stats,
        }
    }

    /// Unique id of this resolution
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When this resolution completed
    pub fn resolved_at(&self) -> DateTime<Utc> {
        self.resolved_at
    }

    /// The resolved precedence layers
    pub fn layers(&self) -> &ResolvedLayers {
        &self.layers
    }

    /// The final, highest-precedence layer: exactly the caller's override
    /// modules in insertion order
    pub fn override_layer(&self) -> &[ModuleRef] {
        self.layers.overrides()
    }

    /// The resolved execution stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The resolved profile set
    pub fn profiles(&self) -> &BTreeSet<String> {
        &self.profiles
    }

    /// Check whether a profile is active
    pub fn has_profile(&self, profile: &str) -> bool {
        self.profiles.contains(profile)
    }

    /// The active property source
    pub fn property_source(&self) -> &Arc<dyn PropertySource> {
        &self.property_source
    }

    /// The frozen feature flag resolver
    pub fn flags(&self) -> &FlagResolver {
        &self.flags
    }

    /// Resolution statistics
    pub fn stats(&self) -> &ResolutionStats {
        &self.stats
    }
}

impl std::fmt::Debug for ResolvedConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfiguration")
            .field("id", &self.id)
            .field("stage", &self.stage)
            .field("profiles", &self.profiles)
            .field("layers", &self.layers)
            .field("property_source", &self.property_source.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::NamedModule;

    fn layers() -> ResolvedLayers {
        ResolvedLayers::new(
            vec![NamedModule::new("boot").shared()],
            vec![NamedModule::new("a").shared(), NamedModule::new("b").shared()],
            vec![NamedModule::new("auto-override").shared()],
            vec![NamedModule::new("override").shared()],
        )
    }

    #[test]
    fn test_iteration_follows_precedence_order() {
        let layers = layers();
        let names: Vec<&str> = layers.iter().map(|m| m.name()).collect();

        assert_eq!(names, vec!["boot", "a", "b", "auto-override", "override"]);
        assert_eq!(layers.len(), 5);
    }

    #[test]
    fn test_summary_round_trips_through_json() {
        let summary = layers().summary();
        let json = summary.to_json().unwrap();
        let parsed: LayerSummary = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, summary);
        assert_eq!(parsed.overrides, vec!["override"]);
    }
}
