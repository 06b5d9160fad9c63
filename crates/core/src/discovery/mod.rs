pub mod provider;
pub mod conditions;

pub use provider::*;
pub use conditions::*;
