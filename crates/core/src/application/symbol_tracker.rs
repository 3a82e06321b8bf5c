// Mangled Symbol Tracker - module observer backed by the demangler registry

use crate::application::demangler_registry::DemanglerRegistry;
use crate::domain::{Module, ModuleEvent, ModuleId};
use crate::port::Observer;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Counters collected from `SymbolAdded` events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SymbolStats {
    pub seen: usize,
    pub mangled: usize,
    /// Symbols added while the module had no live demangler
    pub unresolved: usize,
}

/// Classifies every symbol added to a watched module
///
/// Looks demanglers up with `get` only: tracking never triggers creation.
pub struct MangledSymbolTracker {
    registry: Arc<DemanglerRegistry<ModuleId>>,
    stats: Mutex<SymbolStats>,
}

impl MangledSymbolTracker {
    pub fn new(registry: Arc<DemanglerRegistry<ModuleId>>) -> Self {
        Self {
            registry,
            stats: Mutex::new(SymbolStats::default()),
        }
    }

    pub fn stats(&self) -> SymbolStats {
        *self.stats.lock()
    }
}

impl Observer<Module, ModuleEvent> for MangledSymbolTracker {
    fn update(&self, module: &Module, arg: Option<&ModuleEvent>) {
        let Some(ModuleEvent::SymbolAdded(symbol)) = arg else {
            return;
        };

        let mangled = self
            .registry
            .get(&module.id())
            .and_then(|handle| handle.with(|d| d.is_mangled(symbol)).ok());

        let mut stats = self.stats.lock();
        stats.seen += 1;
        match mangled {
            Some(true) => stats.mangled += 1,
            Some(false) => {}
            None => stats.unresolved += 1,
        }
        debug!(module_id = %module.id(), symbol = %symbol, mangled = ?mangled, "Symbol tracked");
    }
}
