use std::collections::HashMap;
use std::sync::Arc;

use crate::properties::PropertySource;

/// The initial, empty property source
///
/// Every [`Bootstrap`](crate::bootstrap::Bootstrap) starts with this source
/// installed. As long as it has not been replaced, the resolver considers the
/// configuration "unbootstrapped" and will attempt the bootstrap bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPropertySource;

impl PropertySource for DefaultPropertySource {
    fn name(&self) -> &str {
        "default"
    }

    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}

/// In-memory property source backed by a map
#[derive(Debug, Clone, Default)]
pub struct MapPropertySource {
    values: HashMap<String, String>,
}

impl MapPropertySource {
    /// Create an empty map source
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get the number of properties
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the source is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, String>> for MapPropertySource {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl PropertySource for MapPropertySource {
    fn name(&self) -> &str {
        "map"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Property source backed by process environment variables
///
/// A key is looked up verbatim first, then in its conventional environment
/// spelling (uppercased, `.` and `-` replaced by `_`), so `lamina.profiles`
/// also matches `LAMINA_PROFILES`. An optional prefix is prepended to every
/// key before lookup.
#[derive(Debug, Clone, Default)]
pub struct EnvPropertySource {
    prefix: Option<String>,
}

impl EnvPropertySource {
    /// Create a source over the whole process environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source that prepends a prefix to every key
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn env_spelling(key: &str) -> String {
        key.chars()
            .map(|c| match c {
                '.' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect()
    }
}

impl PropertySource for EnvPropertySource {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        let full = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, key),
            None => key.to_string(),
        };

        std::env::var(&full)
            .or_else(|_| std::env::var(Self::env_spelling(&full)))
            .ok()
    }
}

/// Explicit ordered chain of property sources, first hit wins
///
/// Compatibility layering between configuration systems is expressed here,
/// visibly at construction time, instead of through process-wide mutable
/// state.
#[derive(Default)]
pub struct CompositePropertySource {
    sources: Vec<Arc<dyn PropertySource>>,
}

impl CompositePropertySource {
    /// Create an empty composite
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source; earlier sources take precedence
    pub fn with_source(mut self, source: Arc<dyn PropertySource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Get the number of chained sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl PropertySource for CompositePropertySource {
    fn name(&self) -> &str {
        "composite"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get(key))
    }
}

impl std::fmt::Debug for CompositePropertySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositePropertySource")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name().to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_source_is_empty() {
        let source = DefaultPropertySource;
        assert_eq!(source.get("anything"), None);
    }

    #[test]
    fn test_map_source_lookup() {
        let source = MapPropertySource::new().set("app.port", "8080");

        assert_eq!(source.get("app.port"), Some("8080".to_string()));
        assert_eq!(source.get("app.host"), None);
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_composite_first_hit_wins() {
        let primary = MapPropertySource::new().set("key", "primary");
        let fallback = MapPropertySource::new()
            .set("key", "fallback")
            .set("other", "present");

        let composite = CompositePropertySource::new()
            .with_source(Arc::new(primary))
            .with_source(Arc::new(fallback));

        assert_eq!(composite.get("key"), Some("primary".to_string()));
        assert_eq!(composite.get("other"), Some("present".to_string()));
        assert_eq!(composite.get("missing"), None);
    }

    #[test]
    #[serial]
    fn test_env_source_conventional_spelling() {
        std::env::set_var("LAMINA_TEST_VALUE", "42");

        let source = EnvPropertySource::new();
        assert_eq!(source.get("lamina.test-value"), Some("42".to_string()));

        std::env::remove_var("LAMINA_TEST_VALUE");
    }

    #[test]
    #[serial]
    fn test_env_source_prefix() {
        std::env::set_var("APP_SERVICE_NAME", "billing");

        let source = EnvPropertySource::with_prefix("app.");
        assert_eq!(source.get("service.name"), Some("billing".to_string()));

        std::env::remove_var("APP_SERVICE_NAME");
    }
}
