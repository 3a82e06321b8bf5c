// Module Domain Model (compilation artifact)

use crate::domain::error::{DomainError, Result};
use crate::domain::subject::{Observable, Subject};
use crate::domain::toolchain::ToolInfoContainer;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stable identity of a compilation module
///
/// Used purely as a map key; it does not keep the module alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(uuid::Uuid);

impl ModuleId {
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Deterministic id built from a counter (tests, replayed jobs)
    pub fn from_u128(value: u128) -> Self {
        Self(uuid::Uuid::from_u128(value))
    }

    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ModuleId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::InvalidModuleId(s.to_string()))
    }
}

/// Change description passed to module observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleEvent {
    SymbolAdded(String),
    Renamed { from: String, to: String },
    ToolchainUpdated,
}

/// In-memory compilation module
///
/// Acts as a subject: every mutation notifies subscribed pipeline stages.
pub struct Module {
    id: ModuleId,
    name: String,
    toolchain: ToolInfoContainer,
    symbols: Vec<String>,
    subject: Subject<Module, ModuleEvent>,
}

impl Module {
    pub fn new(id: ModuleId, name: impl Into<String>, toolchain: ToolInfoContainer) -> Self {
        Self {
            id,
            name: name.into(),
            toolchain,
            symbols: Vec::new(),
            subject: Subject::new(),
        }
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn toolchain(&self) -> &ToolInfoContainer {
        &self.toolchain
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Record a symbol and notify observers
    pub fn add_symbol(&mut self, symbol: impl Into<String>) {
        let symbol = symbol.into();
        self.symbols.push(symbol.clone());
        self.notify_observers(Some(&ModuleEvent::SymbolAdded(symbol)));
    }

    /// Rename the module and notify observers (no-op when unchanged)
    pub fn rename(&mut self, name: impl Into<String>) {
        let to = name.into();
        if to == self.name {
            return;
        }
        let from = std::mem::replace(&mut self.name, to.clone());
        self.notify_observers(Some(&ModuleEvent::Renamed { from, to }));
    }

    /// Replace detected toolchain metadata and notify observers
    pub fn set_toolchain(&mut self, toolchain: ToolInfoContainer) {
        self.toolchain = toolchain;
        self.notify_observers(Some(&ModuleEvent::ToolchainUpdated));
    }
}

impl Observable<ModuleEvent> for Module {
    fn subject(&self) -> &Subject<Self, ModuleEvent> {
        &self.subject
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("toolchain", &self.toolchain)
            .field("symbols", &self.symbols.len())
            .field("observers", &self.subject.observer_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Observer;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct EventLog {
        events: Mutex<Vec<(String, ModuleEvent)>>,
    }

    impl Observer<Module, ModuleEvent> for EventLog {
        fn update(&self, subject: &Module, arg: Option<&ModuleEvent>) {
            if let Some(event) = arg {
                self.events
                    .lock()
                    .push((subject.name().to_string(), event.clone()));
            }
        }
    }

    #[test]
    fn test_module_id_round_trips_through_display() {
        let id = ModuleId::from_u128(42);
        let parsed: ModuleId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!(matches!(
            "not-a-uuid".parse::<ModuleId>(),
            Err(DomainError::InvalidModuleId(_))
        ));
    }

    #[test]
    fn test_mutations_notify_observers() {
        let log = Arc::new(EventLog::default());
        let observer: Arc<dyn Observer<Module, ModuleEvent>> = log.clone();

        let mut module = Module::new(ModuleId::from_u128(1), "a.out", ToolInfoContainer::default());
        module.subscribe(&observer);

        module.add_symbol("_Z3foov");
        module.rename("a.out"); // unchanged, no event
        module.rename("libfoo.so");
        module.set_toolchain(ToolInfoContainer::default());

        let events = log.events.lock();
        assert_eq!(
            *events,
            vec![
                ("a.out".to_string(), ModuleEvent::SymbolAdded("_Z3foov".into())),
                (
                    "libfoo.so".to_string(),
                    ModuleEvent::Renamed {
                        from: "a.out".into(),
                        to: "libfoo.so".into()
                    }
                ),
                ("libfoo.so".to_string(), ModuleEvent::ToolchainUpdated),
            ]
        );
        assert_eq!(module.symbols(), ["_Z3foov".to_string()]);
    }
}
