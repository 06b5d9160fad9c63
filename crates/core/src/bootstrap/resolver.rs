use std::sync::Arc;
use std::time::Instant;

use crate::bootstrap::{Bootstrap, ResolutionStats, ResolvedConfiguration, ResolvedLayers};
use crate::bundles::{BaseBundle, BundleError, BOOTSTRAP_BUNDLE_ID};
use crate::discovery::DiscoveryContext;
use crate::errors::BootstrapError;
use crate::features::{FlagResolver, USE_BASE_BUNDLE, USE_BOOTSTRAP_BUNDLE};
use crate::modules::ModuleRef;
use crate::properties::PROFILES_PROPERTY;

/// Two-phase bootstrap resolution
///
/// Phase 1 gives the bootstrap bundle a chance to install the real property
/// source, then resolves profiles and applies the baseline bundle. Phase 2
/// invokes every discovery provider exactly once and merges all contributions
/// into the four precedence layers. Any fatal error aborts before a layer
/// list exists; nothing partial is ever handed downstream.
pub(crate) fn resolve(mut boot: Bootstrap) -> Result<ResolvedConfiguration, BootstrapError> {
    let started = Instant::now();
    tracing::info!(stage = %boot.stage, "starting bootstrap resolution");

    // Phase 1: bootstrap bundle, then profiles, then the baseline bundle.
    let bootstrap_started = Instant::now();
    apply_bootstrap_bundle(&mut boot)?;
    resolve_profiles(&mut boot);

    if boot.is_feature_enabled(&USE_BASE_BUNDLE) {
        boot.apply(&BaseBundle)?;
    }
    let bootstrap_time = bootstrap_started.elapsed();

    // Phase 2: main merge across all discovery providers.
    let discovery_started = Instant::now();
    let flags = FlagResolver::new(boot.features.clone(), Arc::clone(&boot.property_source));

    let mut auto_modules: Vec<ModuleRef> = Vec::new();
    let mut auto_override_modules: Vec<ModuleRef> = Vec::new();
    {
        let ctx = DiscoveryContext::new(&boot.profiles, &boot.property_source, &flags, boot.stage);
        for provider in &boot.providers {
            tracing::info!(provider = provider.name(), "invoking discovery provider");
            for contribution in provider.discover(&ctx) {
                if contribution.is_override {
                    auto_override_modules.push(contribution.module);
                } else {
                    auto_modules.push(contribution.module);
                }
            }
        }
    }
    let discovery_time = discovery_started.elapsed();

    let provider_count = boot.providers.len();
    let mut core = boot.modules;
    core.extend(auto_modules);

    let layers = ResolvedLayers::new(
        boot.bootstrap_modules,
        core,
        auto_override_modules,
        boot.override_modules,
    );

    let stats = ResolutionStats {
        provider_count,
        module_count: layers.len(),
        bootstrap_time,
        discovery_time,
        total_time: started.elapsed(),
    };

    tracing::info!(
        modules = stats.module_count,
        providers = stats.provider_count,
        elapsed = ?stats.total_time,
        "bootstrap resolution completed"
    );

    Ok(ResolvedConfiguration::new(
        layers,
        boot.stage,
        boot.profiles,
        boot.property_source,
        flags,
        stats,
    ))
}

/// Attempt the well-known bootstrap bundle
///
/// Only eligible while the property source is still the unmodified default
/// and the bootstrap feature is enabled. Attempted at most once; both failure
/// modes are fatal and distinguishable.
fn apply_bootstrap_bundle(boot: &mut Bootstrap) -> Result<(), BootstrapError> {
    if !boot.source_is_default || !boot.is_feature_enabled(&USE_BOOTSTRAP_BUNDLE) {
        return Ok(());
    }

    let bundle = match boot.bundles.create(BOOTSTRAP_BUNDLE_ID) {
        Ok(bundle) => bundle,
        Err(BundleError::NotRegistered { .. }) => {
            return Err(BootstrapError::MissingBootstrapDependency {
                bundle: BOOTSTRAP_BUNDLE_ID.to_string(),
                disable_flag: USE_BOOTSTRAP_BUNDLE.key(),
            })
        }
        Err(err @ BundleError::ConstructionFailed { .. }) => {
            return Err(BootstrapError::BootstrapInstantiationFailure {
                bundle: BOOTSTRAP_BUNDLE_ID.to_string(),
                source: Box::new(err),
            })
        }
    };

    tracing::info!(bundle = bundle.name(), "applying bootstrap bundle");
    bundle
        .configure(boot)
        .map_err(|err| BootstrapError::BootstrapInstantiationFailure {
            bundle: BOOTSTRAP_BUNDLE_ID.to_string(),
            source: Box::new(err),
        })
}

/// Union explicit profiles with the reserved property-source key
///
/// Runs after the bootstrap bundle so a freshly installed property source is
/// the one consulted. The profile set deduplicates, so a value seen twice
/// still yields one membership.
fn resolve_profiles(boot: &mut Bootstrap) {
    let Some(raw) = boot.property_source.get(PROFILES_PROPERTY) else {
        return;
    };

    for profile in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if boot.profiles.insert(profile.to_string()) {
            tracing::debug!(profile, "profile added from property source");
        }
    }
}
