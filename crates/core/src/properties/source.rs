/// Key/value lookup abstraction backing explicit and override configuration
///
/// The resolver treats the source as a flat namespace of string values.
/// Implementations decide where values come from (in-memory maps, process
/// environment, explicit composite chains).
pub trait PropertySource: Send + Sync {
    /// Source name for identification in logs and snapshots
    fn name(&self) -> &str;

    /// Look up the raw string value for a key
    fn get(&self, key: &str) -> Option<String>;

    /// Look up a key and coerce it to a boolean
    ///
    /// Accepts `true`/`false` in any casing, surrounding whitespace ignored.
    /// Any other present value is malformed and treated as absent so flag
    /// resolution falls through to its lower tiers; never an error.
    fn get_bool(&self, key: &str) -> Option<bool> {
        let raw = self.get(key)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => {
                tracing::warn!(
                    key,
                    value = %raw,
                    source = self.name(),
                    "ignoring malformed boolean property"
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for dyn PropertySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertySource")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::MapPropertySource;

    #[test]
    fn test_bool_coercion_accepts_case_and_whitespace() {
        let source = MapPropertySource::new()
            .set("a", "true")
            .set("b", " FALSE ")
            .set("c", "True");

        assert_eq!(source.get_bool("a"), Some(true));
        assert_eq!(source.get_bool("b"), Some(false));
        assert_eq!(source.get_bool("c"), Some(true));
    }

    #[test]
    fn test_malformed_bool_is_treated_as_absent() {
        let source = MapPropertySource::new().set("flag", "yes please");

        assert_eq!(source.get_bool("flag"), None);
        assert_eq!(source.get_bool("missing"), None);
    }
}
