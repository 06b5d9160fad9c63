use crate::discovery::{Contribution, DiscoveryContext, DiscoveryProvider};
use crate::modules::ModuleRef;

/// Boolean gate evaluated against the frozen discovery view
///
/// The predicate language lives entirely behind this trait; the resolver only
/// asks yes or no.
pub trait ConditionEvaluator: Send + Sync {
    /// Human-readable description for logs
    fn describe(&self) -> String;

    /// Evaluate the condition against the current state
    fn matches(&self, ctx: &DiscoveryContext<'_>) -> bool;
}

/// Condition on profile membership
#[derive(Debug, Clone)]
pub struct ProfileCondition {
    profile: String,
    negated: bool,
}

impl ProfileCondition {
    /// Matches when the profile is active
    pub fn active(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            negated: false,
        }
    }

    /// Matches when the profile is not active
    pub fn missing(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            negated: true,
        }
    }
}

impl ConditionEvaluator for ProfileCondition {
    fn describe(&self) -> String {
        if self.negated {
            format!("profile '{}' not active", self.profile)
        } else {
            format!("profile '{}' active", self.profile)
        }
    }

    fn matches(&self, ctx: &DiscoveryContext<'_>) -> bool {
        ctx.has_profile(&self.profile) != self.negated
    }
}

/// Condition on a property being present, or equal to an expected value
#[derive(Debug, Clone)]
pub struct PropertyCondition {
    key: String,
    expected: Option<String>,
}

impl PropertyCondition {
    /// Matches when the key has any value
    pub fn present(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            expected: None,
        }
    }

    /// Matches when the key equals the expected value
    pub fn equals(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            expected: Some(expected.into()),
        }
    }
}

impl ConditionEvaluator for PropertyCondition {
    fn describe(&self) -> String {
        match &self.expected {
            Some(expected) => format!("property '{}' == '{}'", self.key, expected),
            None => format!("property '{}' present", self.key),
        }
    }

    fn matches(&self, ctx: &DiscoveryContext<'_>) -> bool {
        match (ctx.property(&self.key), &self.expected) {
            (Some(value), Some(expected)) => value == *expected,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// Discovery provider that yields its contributions only while a condition
/// holds
pub struct ConditionalModuleProvider {
    name: &'static str,
    condition: Box<dyn ConditionEvaluator>,
    contributions: Vec<Contribution>,
}

impl ConditionalModuleProvider {
    /// Create a provider gated by a condition
    pub fn new(name: &'static str, condition: impl ConditionEvaluator + 'static) -> Self {
        Self {
            name,
            condition: Box::new(condition),
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

impl DiscoveryProvider for ConditionalModuleProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn discover(&self, ctx: &DiscoveryContext<'_>) -> Vec<Contribution> {
        if self.condition.matches(ctx) {
            self.contributions.clone()
        } else {
            tracing::debug!(
                provider = self.name,
                condition = %self.condition.describe(),
                "skipping conditional provider"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::Stage;
    use crate::features::FlagResolver;
    use crate::modules::NamedModule;
    use crate::properties::{MapPropertySource, PropertySource};
    use std::collections::{BTreeSet, HashMap};
    use std::sync::Arc;

    struct Fixture {
        profiles: BTreeSet<String>,
        source: Arc<dyn PropertySource>,
        flags: FlagResolver,
    }

    impl Fixture {
        fn new(profiles: &[&str], source: impl PropertySource + 'static) -> Self {
            let source: Arc<dyn PropertySource> = Arc::new(source);
            Self {
                profiles: profiles.iter().map(|p| p.to_string()).collect(),
                flags: FlagResolver::new(HashMap::new(), Arc::clone(&source)),
                source,
            }
        }

        fn ctx(&self) -> DiscoveryContext<'_> {
            DiscoveryContext::new(&self.profiles, &self.source, &self.flags, Stage::Development)
        }
    }

    #[test]
    fn test_profile_condition() {
        let fixture = Fixture::new(&["test"], MapPropertySource::new());

        assert!(ProfileCondition::active("test").matches(&fixture.ctx()));
        assert!(!ProfileCondition::active("prod").matches(&fixture.ctx()));
        assert!(ProfileCondition::missing("prod").matches(&fixture.ctx()));
        assert!(!ProfileCondition::missing("test").matches(&fixture.ctx()));
    }

    #[test]
    fn test_property_condition() {
        let fixture = Fixture::new(&[], MapPropertySource::new().set("db.vendor", "postgres"));

        assert!(PropertyCondition::present("db.vendor").matches(&fixture.ctx()));
        assert!(!PropertyCondition::present("db.host").matches(&fixture.ctx()));
        assert!(PropertyCondition::equals("db.vendor", "postgres").matches(&fixture.ctx()));
        assert!(!PropertyCondition::equals("db.vendor", "mysql").matches(&fixture.ctx()));
    }

    #[test]
    fn test_conditional_provider_gates_contributions() {
        let provider = ConditionalModuleProvider::new("pg", PropertyCondition::present("db.vendor"))
            .with_module(NamedModule::new("postgres").shared());

        let with_property =
            Fixture::new(&[], MapPropertySource::new().set("db.vendor", "postgres"));
        let contributions = provider.discover(&with_property.ctx());
        assert_eq!(contributions.len(), 1);
        assert_eq!(contributions[0].module.name(), "postgres");

        let without_property = Fixture::new(&[], MapPropertySource::new());
        assert!(provider.discover(&without_property.ctx()).is_empty());
    }
}
