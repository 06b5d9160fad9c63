pub mod source;
pub mod sources;

pub use source::*;
pub use sources::*;

/// Reserved property key carrying a comma-delimited list of additional
/// profile names picked up during the bootstrap phase.
pub const PROFILES_PROPERTY: &str = "lamina.profiles";
