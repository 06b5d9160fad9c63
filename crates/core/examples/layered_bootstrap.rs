//! Example: layered bootstrap with conditional discovery and overrides
//!
//! Builds a small application configuration with explicit modules, a
//! profile-gated discovery provider and a test override, resolves it and
//! prints the resulting precedence layers.

use std::convert::Infallible;
use std::sync::Arc;

use lamina_core::{
    modules, Bootstrap, ConditionalModuleProvider, InjectorAdapter, MapPropertySource,
    NamedModule, ProfileCondition, ResolvedConfiguration, RunningContext, ShutdownLatch,
    StaticModuleProvider, USE_BOOTSTRAP_BUNDLE,
};

/// Minimal adapter that "wires" by printing what it received
struct PrintingAdapter;

struct PrintingContext {
    latch: ShutdownLatch,
}

impl RunningContext for PrintingContext {
    fn await_termination(&self) {
        self.latch.await_shutdown();
    }

    fn shutdown(&self) {
        self.latch.shutdown();
    }
}

impl InjectorAdapter for PrintingAdapter {
    type Context = PrintingContext;
    type Error = Infallible;

    fn create(&self, config: &ResolvedConfiguration) -> Result<Self::Context, Self::Error> {
        println!("stage: {}", config.stage());
        println!("profiles: {:?}", config.profiles());
        for module in config.layers().iter() {
            println!("  module: {}", module.name());
        }
        Ok(PrintingContext {
            latch: ShutdownLatch::new(),
        })
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut boot = Bootstrap::create_with(modules![
        NamedModule::new("http-server").with_description("routes and listeners"),
        NamedModule::new("billing"),
    ]);

    boot.disable_feature(USE_BOOTSTRAP_BUNDLE)
        .set_property_source(Arc::new(
            MapPropertySource::new().set("lamina.profiles", "cloud"),
        ))
        .add_discovery_provider(
            ConditionalModuleProvider::new("cloud", ProfileCondition::active("cloud"))
                .with_module(NamedModule::new("cloud-metadata").shared()),
        )
        .add_discovery_provider(
            StaticModuleProvider::new("persistence")
                .with_module(NamedModule::new("postgres").shared()),
        )
        .add_override_modules(modules![NamedModule::new("local-overrides")]);

    let context = boot.start(&PrintingAdapter).expect("bootstrap failed");

    context.shutdown();
    context.await_termination();
}
