// ID Provider Port (for deterministic testing)

use crate::domain::ModuleId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Module ID provider interface (allows deterministic IDs in tests)
pub trait IdProvider: Send + Sync {
    /// Mint a new unique module ID
    fn next_module_id(&self) -> ModuleId;
}

/// UUID v4 provider (production)
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn next_module_id(&self) -> ModuleId {
        ModuleId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Sequential provider (tests, replayed jobs): 1, 2, 3, ...
#[derive(Debug, Default)]
pub struct SequentialIdProvider {
    counter: AtomicU64,
}

impl IdProvider for SequentialIdProvider {
    fn next_module_id(&self) -> ModuleId {
        let next = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        ModuleId::from_u128(u128::from(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_distinct_and_ordered() {
        let provider = SequentialIdProvider::default();
        let first = provider.next_module_id();
        let second = provider.next_module_id();
        assert_eq!(first, ModuleId::from_u128(1));
        assert!(first < second);
    }

    #[test]
    fn test_uuid_ids_are_distinct_v4() {
        let id = UuidProvider.next_module_id();
        assert_eq!(id.as_uuid().get_version_num(), 4);
        assert_ne!(id, UuidProvider.next_module_id());
    }
}
