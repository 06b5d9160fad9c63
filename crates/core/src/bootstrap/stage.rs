use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BootstrapError;

/// Execution stage the injector adapter wires for
///
/// `Development` keeps singletons lazy so partial graphs start fast;
/// `Production` asks the adapter for eager, fail-fast wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Development,
    Production,
}

impl Stage {
    /// Check if stage is development
    pub fn is_development(&self) -> bool {
        matches!(self, Stage::Development)
    }

    /// Check if stage is production
    pub fn is_production(&self) -> bool {
        matches!(self, Stage::Production)
    }

    /// Whether the adapter should instantiate singletons eagerly
    pub fn eager_singletons(&self) -> bool {
        self.is_production()
    }
}

impl FromStr for Stage {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Stage::Development),
            "production" | "prod" => Ok(Stage::Production),
            _ => Err(BootstrapError::configuration(format!(
                "invalid stage '{}', expected development or production",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stage_str = match self {
            Stage::Development => "development",
            Stage::Production => "production",
        };
        write!(f, "{}", stage_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_parsing() {
        assert_eq!("dev".parse::<Stage>().unwrap(), Stage::Development);
        assert_eq!("Production".parse::<Stage>().unwrap(), Stage::Production);
        assert!("staging".parse::<Stage>().is_err());
    }

    #[test]
    fn test_stage_defaults_to_lazy_development() {
        let stage = Stage::default();
        assert!(stage.is_development());
        assert!(!stage.eager_singletons());
        assert!(Stage::Production.eager_singletons());
    }
}
