// Demangler Port - construction interface supplied by the demangler collaborator
// The registry depends only on these factory entry points, never on how a
// demangler parses names.

use crate::domain::ToolchainFamily;
use std::sync::Arc;
use thiserror::Error;

/// Toolchain-specific symbol demangler
pub trait Demangler: Send + Sync {
    /// Family this demangler was built for
    fn family(&self) -> ToolchainFamily;

    /// Whether `symbol` looks mangled under this demangler's scheme
    fn is_mangled(&self, symbol: &str) -> bool;
}

/// A demangler variant could not be built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to construct {family} demangler: {reason}")]
pub struct ConstructionError {
    pub family: ToolchainFamily,
    pub reason: String,
}

impl ConstructionError {
    pub fn new(family: ToolchainFamily, reason: impl Into<String>) -> Self {
        Self {
            family,
            reason: reason.into(),
        }
    }
}

pub type ConstructionResult = Result<Box<dyn Demangler>, ConstructionError>;

/// Named factory entry point for one family
pub type DemanglerFactory = Arc<dyn Fn() -> ConstructionResult + Send + Sync>;

/// Lookup table of factories, one slot per [`ToolchainFamily`]
///
/// Total by construction: every family has a factory.
#[derive(Clone)]
pub struct FactoryTable {
    factories: [DemanglerFactory; 3],
}

impl FactoryTable {
    pub fn new<G, M, B>(gcc: G, msvc: M, borland: B) -> Self
    where
        G: Fn() -> ConstructionResult + Send + Sync + 'static,
        M: Fn() -> ConstructionResult + Send + Sync + 'static,
        B: Fn() -> ConstructionResult + Send + Sync + 'static,
    {
        Self {
            factories: [Arc::new(gcc), Arc::new(msvc), Arc::new(borland)],
        }
    }

    /// Replace the factory for one family
    pub fn with_factory<F>(mut self, family: ToolchainFamily, factory: F) -> Self
    where
        F: Fn() -> ConstructionResult + Send + Sync + 'static,
    {
        self.factories[family.index()] = Arc::new(factory);
        self
    }

    /// Invoke exactly one factory: the one registered for `family`
    pub fn create(&self, family: ToolchainFamily) -> ConstructionResult {
        (self.factories[family.index()])()
    }
}

impl std::fmt::Debug for FactoryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryTable")
            .field("families", &ToolchainFamily::ALL)
            .finish()
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Demangler that only knows its family
    #[derive(Debug)]
    pub struct StubDemangler {
        family: ToolchainFamily,
    }

    impl StubDemangler {
        pub fn boxed(family: ToolchainFamily) -> Box<dyn Demangler> {
            Box::new(Self { family })
        }
    }

    impl Demangler for StubDemangler {
        fn family(&self) -> ToolchainFamily {
            self.family
        }

        fn is_mangled(&self, symbol: &str) -> bool {
            symbol.starts_with("_Z")
        }
    }

    /// Factory table backed by [`StubDemangler`]
    pub fn stub_factories() -> FactoryTable {
        FactoryTable::new(
            || Ok(StubDemangler::boxed(ToolchainFamily::Gcc)),
            || Ok(StubDemangler::boxed(ToolchainFamily::Msvc)),
            || Ok(StubDemangler::boxed(ToolchainFamily::Borland)),
        )
    }

    /// Counts constructions per family and can fail the first N of them
    #[derive(Debug, Default)]
    pub struct CountingFactories {
        calls: [AtomicUsize; 3],
        failures_left: AtomicUsize,
    }

    impl CountingFactories {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        /// Fail the next `n` constructions with a ConstructionError
        pub fn failing(n: usize) -> Arc<Self> {
            let counter = Self::default();
            counter.failures_left.store(n, Ordering::SeqCst);
            Arc::new(counter)
        }

        pub fn calls(&self, family: ToolchainFamily) -> usize {
            self.calls[family.index()].load(Ordering::SeqCst)
        }

        pub fn total_calls(&self) -> usize {
            ToolchainFamily::ALL.iter().map(|f| self.calls(*f)).sum()
        }

        fn build(&self, family: ToolchainFamily) -> ConstructionResult {
            self.calls[family.index()].fetch_add(1, Ordering::SeqCst);
            let failing = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failing {
                return Err(ConstructionError::new(family, "simulated resource exhaustion"));
            }
            Ok(StubDemangler::boxed(family))
        }

        pub fn table(self: &Arc<Self>) -> FactoryTable {
            let (gcc, msvc, borland) = (self.clone(), self.clone(), self.clone());
            FactoryTable::new(
                move || gcc.build(ToolchainFamily::Gcc),
                move || msvc.build(ToolchainFamily::Msvc),
                move || borland.build(ToolchainFamily::Borland),
            )
        }
    }
}
