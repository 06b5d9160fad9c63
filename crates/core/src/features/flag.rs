/// Named boolean toggle with a compiled-in default
///
/// A flag is pure identity plus default; the effective value is computed by
/// [`FlagResolver`](crate::features::FlagResolver) from the property source,
/// explicit overrides and the default, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureFlag {
    key: &'static str,
    enabled_by_default: bool,
}

impl FeatureFlag {
    /// Define a flag with its stable key and default value
    pub const fn new(key: &'static str, enabled_by_default: bool) -> Self {
        Self {
            key,
            enabled_by_default,
        }
    }

    /// Stable property key of this flag
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Compiled-in default value
    pub fn enabled_by_default(&self) -> bool {
        self.enabled_by_default
    }
}

/// Controls whether the well-known bootstrap bundle is attempted during
/// phase 1 of resolution.
pub const USE_BOOTSTRAP_BUNDLE: FeatureFlag = FeatureFlag::new("lamina.features.bootstrap", true);

/// Controls whether the default baseline bundle is applied after the
/// bootstrap phase.
pub const USE_BASE_BUNDLE: FeatureFlag = FeatureFlag::new("lamina.features.base-bundle", true);
