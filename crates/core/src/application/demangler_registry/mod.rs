//! Demangler Registry - per-module demangler cache
//!
//! Maps a module handle to exactly one demangler, created on first request
//! from toolchain metadata and returned unchanged afterwards. The registry
//! exclusively owns every demangler; callers get [`DemanglerHandle`]s that
//! turn stale (detectably) when the registry is cleared.
//!
//! State per key: `absent -> present` on the first successful
//! `get_or_create`, `present -> absent` on `clear`.

mod handle;

pub use handle::{DemanglerHandle, DemanglerId};

use crate::domain::{ModuleId, ToolchainFamily};
use crate::error::Result;
use crate::port::{Demangler, FactoryTable, ToolchainMetadata};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Registry behaviour knobs
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// Log the GCC fallback for unrecognised toolchains at WARN instead of DEBUG
    pub warn_on_fallback: bool,
}

struct Entry {
    id: DemanglerId,
    family: ToolchainFamily,
    demangler: Arc<dyn Demangler>,
}

impl Entry {
    fn handle(&self) -> DemanglerHandle {
        DemanglerHandle::new(self.id, self.family, Arc::downgrade(&self.demangler))
    }
}

struct RegistryState<K> {
    entries: HashMap<K, Entry>,
}

/// Keyed demangler cache
///
/// All operations take one lock. `get_or_create` holds it across the
/// check-construct-insert sequence, so a key is never constructed twice
/// concurrently and `clear` never interleaves with a lookup. Factories must
/// not call back into the same registry.
pub struct DemanglerRegistry<K = ModuleId> {
    factories: FactoryTable,
    config: RegistryConfig,
    state: Mutex<RegistryState<K>>,
}

impl<K> DemanglerRegistry<K>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new(factories: FactoryTable) -> Self {
        Self::with_config(factories, RegistryConfig::default())
    }

    pub fn with_config(factories: FactoryTable, config: RegistryConfig) -> Self {
        Self {
            factories,
            config,
            state: Mutex::new(RegistryState {
                entries: HashMap::new(),
            }),
        }
    }

    /// Return the cached demangler for `key`, creating it on first request
    ///
    /// `metadata` is consulted only when no demangler exists yet. Exactly one
    /// factory runs per creating call. On construction failure nothing is
    /// cached and a later call may retry.
    ///
    /// # Errors
    /// - `AppError::Construction` if the selected factory fails
    pub fn get_or_create(&self, key: K, metadata: &dyn ToolchainMetadata) -> Result<DemanglerHandle> {
        let mut state = self.state.lock();

        if let Some(entry) = state.entries.get(&key) {
            debug!(key = ?key, demangler_id = %entry.id, "Demangler cache hit");
            return Ok(entry.handle());
        }

        let selection = ToolchainFamily::classify(metadata);
        if selection.fallback {
            if self.config.warn_on_fallback {
                warn!(
                    key = ?key,
                    family = %selection.family,
                    "Unrecognised toolchain, falling back to default demangler"
                );
            } else {
                debug!(
                    key = ?key,
                    family = %selection.family,
                    "Unrecognised toolchain, falling back to default demangler"
                );
            }
        }

        let demangler = match self.factories.create(selection.family) {
            Ok(demangler) => demangler,
            Err(e) => {
                error!(key = ?key, family = %selection.family, error = %e, "Demangler construction failed");
                return Err(e.into());
            }
        };

        let id = DemanglerId::next();

        let entry = Entry {
            id,
            family: selection.family,
            demangler: Arc::from(demangler),
        };
        let handle = entry.handle();
        state.entries.insert(key.clone(), entry);

        info!(
            key = ?key,
            demangler_id = %id,
            family = %selection.family,
            fallback = selection.fallback,
            "Demangler created"
        );
        Ok(handle)
    }

    /// Cached demangler for `key`, if any (never creates)
    pub fn get(&self, key: &K) -> Option<DemanglerHandle> {
        self.state.lock().entries.get(key).map(Entry::handle)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.state.lock().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Destroy every cached demangler
    ///
    /// Previously returned handles become stale. Returns how many demanglers
    /// were released.
    pub fn clear(&self) -> usize {
        let released = {
            let mut state = self.state.lock();
            let released = state.entries.len();
            state.entries.clear();
            released
        };
        info!(released, "Demangler registry cleared");
        released
    }
}

impl<K> Debug for DemanglerRegistry<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemanglerRegistry")
            .field("entries", &self.state.lock().entries.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ToolInfo, ToolInfoContainer};
    use crate::error::AppError;
    use crate::port::demangler::mocks::{stub_factories, CountingFactories};
    use crate::port::toolchain_metadata::MockToolchainMetadata;
    use crate::port::UnknownToolchain;

    fn tools(name: &str) -> ToolInfoContainer {
        ToolInfoContainer::new(vec![ToolInfo::new(name)])
    }

    fn module(n: u128) -> ModuleId {
        ModuleId::from_u128(n)
    }

    #[test]
    fn test_selection_by_family() {
        let registry = DemanglerRegistry::new(stub_factories());

        let gcc = registry.get_or_create(module(1), &tools("gcc")).unwrap();
        let msvc = registry.get_or_create(module(2), &tools("MSVC")).unwrap();
        let borland = registry.get_or_create(module(3), &tools("Borland C++")).unwrap();
        let unknown = registry.get_or_create(module(4), &UnknownToolchain).unwrap();

        assert_eq!(gcc.family(), ToolchainFamily::Gcc);
        assert_eq!(msvc.family(), ToolchainFamily::Msvc);
        assert_eq!(borland.family(), ToolchainFamily::Borland);
        assert_eq!(unknown.family(), ToolchainFamily::Gcc);

        // The constructed instance agrees with the selection
        assert_eq!(msvc.with(|d| d.family()).unwrap(), ToolchainFamily::Msvc);
    }

    #[test]
    fn test_cache_hit_ignores_metadata() {
        let counter = CountingFactories::new();
        let registry = DemanglerRegistry::new(counter.table());

        let first = registry.get_or_create(module(1), &tools("gcc")).unwrap();

        // Metadata must not even be consulted on a hit
        let mut metadata = MockToolchainMetadata::new();
        metadata.expect_is_gcc().never();
        metadata.expect_is_msvc().never();
        metadata.expect_is_borland().never();

        let second = registry.get_or_create(module(1), &metadata).unwrap();
        let third = registry.get_or_create(module(1), &ToolchainFamily::Msvc).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(third.family(), ToolchainFamily::Gcc);
        assert_eq!(counter.total_calls(), 1);
    }

    #[test]
    fn test_exactly_one_factory_per_creation() {
        let counter = CountingFactories::new();
        let registry = DemanglerRegistry::new(counter.table());

        registry.get_or_create(module(1), &UnknownToolchain).unwrap();
        assert_eq!(counter.calls(ToolchainFamily::Gcc), 1);
        assert_eq!(counter.total_calls(), 1);

        registry.get_or_create(module(2), &tools("bcc32")).unwrap();
        assert_eq!(counter.calls(ToolchainFamily::Borland), 1);
        assert_eq!(counter.total_calls(), 2);
    }

    #[test]
    fn test_get_never_creates() {
        let counter = CountingFactories::new();
        let registry = DemanglerRegistry::new(counter.table());

        assert!(registry.get(&module(1)).is_none());
        assert!(registry.is_empty());
        assert_eq!(counter.total_calls(), 0);

        let created = registry.get_or_create(module(1), &tools("gcc")).unwrap();
        assert_eq!(registry.get(&module(1)), Some(created));
        assert!(registry.contains(&module(1)));
    }

    #[test]
    fn test_clear_resets_state_and_invalidates_handles() {
        let registry = DemanglerRegistry::new(stub_factories());

        let before = registry.get_or_create(module(1), &tools("gcc")).unwrap();
        registry.get_or_create(module(2), &tools("msvc")).unwrap();
        assert!(before.is_valid());

        assert_eq!(registry.clear(), 2);
        assert!(registry.get(&module(1)).is_none());
        assert!(registry.get(&module(2)).is_none());
        assert!(registry.is_empty());

        assert!(!before.is_valid());
        let err = before.with(|d| d.family()).unwrap_err();
        assert!(matches!(err, AppError::StaleHandle { id } if id == before.id()));

        let after = registry.get_or_create(module(1), &tools("gcc")).unwrap();
        assert_ne!(after, before);
        assert!(after.id() > before.id());
    }

    #[test]
    fn test_construction_failure_leaves_no_entry() {
        let counter = CountingFactories::failing(1);
        let registry = DemanglerRegistry::new(counter.table());

        let err = registry.get_or_create(module(1), &tools("msvc")).unwrap_err();
        assert!(matches!(err, AppError::Construction(ref e) if e.family == ToolchainFamily::Msvc));
        assert!(registry.get(&module(1)).is_none());
        assert!(registry.is_empty());

        // Retry succeeds once the factory recovers
        let handle = registry.get_or_create(module(1), &tools("msvc")).unwrap();
        assert_eq!(handle.family(), ToolchainFamily::Msvc);
        assert_eq!(counter.calls(ToolchainFamily::Msvc), 2);
    }

    #[test]
    fn test_concurrent_get_or_create_constructs_once() {
        let counter = CountingFactories::new();
        let registry = DemanglerRegistry::new(counter.table());

        let handles: Vec<DemanglerHandle> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..16)
                .map(|_| scope.spawn(|| registry.get_or_create(module(7), &tools("gcc")).unwrap()))
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        assert_eq!(counter.total_calls(), 1);
        assert!(handles.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_handles_from_separate_registries_never_compare_equal() {
        let first = DemanglerRegistry::new(stub_factories());
        let second = DemanglerRegistry::new(stub_factories());

        let a = first.get_or_create(module(1), &tools("gcc")).unwrap();
        let b = second.get_or_create(module(1), &tools("msvc")).unwrap();
        let c = second.get_or_create(module(2), &tools("gcc")).unwrap();

        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
        assert_ne!(a, c);

        let handles: std::collections::HashSet<DemanglerHandle> = [a.clone(), b, c, a].into_iter().collect();
        assert_eq!(handles.len(), 3);
    }

    #[test]
    fn test_registry_accepts_custom_keys() {
        let registry: DemanglerRegistry<&'static str> = DemanglerRegistry::with_config(
            stub_factories(),
            RegistryConfig {
                warn_on_fallback: true,
            },
        );

        let handle = registry.get_or_create("libc.so", &UnknownToolchain).unwrap();
        assert_eq!(handle.family(), ToolchainFamily::Gcc);
        assert_eq!(registry.len(), 1);
    }
}
