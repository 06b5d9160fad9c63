use std::sync::Arc;

/// An opaque, named unit of configuration contributed to the final graph
///
/// The resolver never inspects a module's internals; it only orders
/// containers of modules. Whatever bindings a module carries are the injector
/// adapter's business.
pub trait BindingModule: Send + Sync {
    /// Module name for identification
    fn name(&self) -> &str;

    /// Module description
    fn description(&self) -> Option<&str> {
        None
    }
}

/// Shared handle to a module, cheap to clone across layers
pub type ModuleRef = Arc<dyn BindingModule>;

impl std::fmt::Debug for dyn BindingModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingModule")
            .field("name", &self.name())
            .finish()
    }
}

/// Base module implementation for common functionality
#[derive(Debug, Clone)]
pub struct NamedModule {
    name: String,
    description: Option<String>,
}

impl NamedModule {
    /// Create a new named module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set module description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wrap into a shared handle
    pub fn shared(self) -> ModuleRef {
        Arc::new(self)
    }
}

impl BindingModule for NamedModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Macro to build a module list from module values
#[macro_export]
macro_rules! modules {
    () => {
        Vec::<$crate::modules::ModuleRef>::new()
    };
    ($($module:expr),+ $(,)?) => {
        vec![$(::std::sync::Arc::new($module) as $crate::modules::ModuleRef),+]
    };
}
