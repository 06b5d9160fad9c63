use std::collections::HashMap;
use std::sync::Arc;

use crate::features::FeatureFlag;
use crate::properties::PropertySource;

/// Contract consumed by discovery providers and the injector adapter to
/// query effective flag values.
pub trait FeatureFlagResolver: Send + Sync {
    fn is_enabled(&self, flag: &FeatureFlag) -> bool;
}

/// Flag resolution over a property source and explicit overrides
///
/// Precedence, highest first:
/// 1. property source value for the flag's key, coerced to boolean — only a
///    present-and-true value is authoritative here; present-and-false falls
///    through to the lower tiers rather than force-disabling
/// 2. explicit override registered on the builder
/// 3. the flag's compiled-in default
///
/// The present-and-true-only first tier is deliberate and load-bearing: a
/// property entry can turn a flag on over any explicit disable, but turning
/// one off always goes through the explicit override tier.
#[derive(Clone)]
pub struct FlagResolver {
    overrides: HashMap<&'static str, bool>,
    source: Arc<dyn PropertySource>,
}

impl FlagResolver {
    pub(crate) fn new(
        overrides: HashMap<&'static str, bool>,
        source: Arc<dyn PropertySource>,
    ) -> Self {
        Self { overrides, source }
    }

    /// Get the number of explicit overrides
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl FeatureFlagResolver for FlagResolver {
    fn is_enabled(&self, flag: &FeatureFlag) -> bool {
        let enabled = evaluate(flag, &self.overrides, self.source.as_ref());
        tracing::debug!(flag = flag.key(), enabled, "resolved feature flag");
        enabled
    }
}

impl std::fmt::Debug for FlagResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagResolver")
            .field("override_count", &self.overrides.len())
            .field("source", &self.source.name())
            .finish()
    }
}

/// Shared precedence walk, used by the builder during accumulation and by
/// [`FlagResolver`] after the snapshot freezes.
pub(crate) fn evaluate(
    flag: &FeatureFlag,
    overrides: &HashMap<&'static str, bool>,
    source: &dyn PropertySource,
) -> bool {
    if source.get_bool(flag.key()) == Some(true) {
        return true;
    }
    match overrides.get(flag.key()) {
        Some(value) => *value,
        None => flag.enabled_by_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{DefaultPropertySource, MapPropertySource};

    const ON_BY_DEFAULT: FeatureFlag = FeatureFlag::new("test.on", true);
    const OFF_BY_DEFAULT: FeatureFlag = FeatureFlag::new("test.off", false);

    fn resolver(
        overrides: &[(&'static str, bool)],
        source: impl PropertySource + 'static,
    ) -> FlagResolver {
        FlagResolver::new(overrides.iter().copied().collect(), Arc::new(source))
    }

    #[test]
    fn test_default_applies_without_override_or_property() {
        let flags = resolver(&[], DefaultPropertySource);

        assert!(flags.is_enabled(&ON_BY_DEFAULT));
        assert!(!flags.is_enabled(&OFF_BY_DEFAULT));
    }

    #[test]
    fn test_explicit_override_beats_default() {
        let flags = resolver(&[("test.on", false), ("test.off", true)], DefaultPropertySource);

        assert!(!flags.is_enabled(&ON_BY_DEFAULT));
        assert!(flags.is_enabled(&OFF_BY_DEFAULT));
    }

    #[test]
    fn test_property_true_beats_explicit_disable() {
        let source = MapPropertySource::new().set("test.off", "true");
        let flags = resolver(&[("test.off", false)], source);

        assert!(flags.is_enabled(&OFF_BY_DEFAULT));
    }

    // Documented property: a present-and-false value never force-disables; it
    // falls through to the explicit override and default tiers.
    #[test]
    fn test_property_false_does_not_override_explicit_enable() {
        let source = MapPropertySource::new().set("test.off", "false");
        let flags = resolver(&[("test.off", true)], source);

        assert!(flags.is_enabled(&OFF_BY_DEFAULT));
    }

    #[test]
    fn test_property_false_falls_through_to_default() {
        let source = MapPropertySource::new().set("test.on", "false");
        let flags = resolver(&[], source);

        assert!(flags.is_enabled(&ON_BY_DEFAULT));
    }

    #[test]
    fn test_malformed_property_falls_through() {
        let source = MapPropertySource::new().set("test.off", "enabled");
        let flags = resolver(&[("test.off", true)], source);

        assert!(flags.is_enabled(&OFF_BY_DEFAULT));

        let source = MapPropertySource::new().set("test.off", "enabled");
        let flags = resolver(&[], source);
        assert!(!flags.is_enabled(&OFF_BY_DEFAULT));
    }
}
