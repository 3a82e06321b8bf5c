// Demangler Handle - non-owning, validity-scoped access to a cached demangler

use crate::domain::ToolchainFamily;
use crate::error::{AppError, Result};
use crate::port::Demangler;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Weak;

static NEXT_DEMANGLER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one constructed demangler instance
///
/// Drawn from a process-wide monotonic counter, so ids are unique across
/// registries and never reused, even after `clear()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DemanglerId(u64);

impl DemanglerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_DEMANGLER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DemanglerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "demangler#{}", self.0)
    }
}

/// Caller-side reference to a demangler owned by a `DemanglerRegistry`
///
/// Holding a handle does not keep the demangler alive. Once the registry
/// releases the entry (`clear()` or drop), [`DemanglerHandle::with`] reports
/// [`AppError::StaleHandle`] instead of touching freed state.
#[derive(Clone)]
pub struct DemanglerHandle {
    id: DemanglerId,
    family: ToolchainFamily,
    demangler: Weak<dyn Demangler>,
}

impl DemanglerHandle {
    pub(crate) fn new(id: DemanglerId, family: ToolchainFamily, demangler: Weak<dyn Demangler>) -> Self {
        Self {
            id,
            family,
            demangler,
        }
    }

    pub fn id(&self) -> DemanglerId {
        self.id
    }

    /// Family selected when the demangler was created
    pub fn family(&self) -> ToolchainFamily {
        self.family
    }

    /// False once the owning registry entry has been released
    pub fn is_valid(&self) -> bool {
        self.demangler.strong_count() > 0
    }

    /// Run `f` against the demangler if it is still owned by the registry
    ///
    /// The demangler stays alive for the duration of `f` even if another
    /// thread clears the registry meanwhile.
    pub fn with<R>(&self, f: impl FnOnce(&dyn Demangler) -> R) -> Result<R> {
        let demangler = self
            .demangler
            .upgrade()
            .ok_or(AppError::StaleHandle { id: self.id })?;
        Ok(f(demangler.as_ref()))
    }
}

impl PartialEq for DemanglerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Weak::ptr_eq(&self.demangler, &other.demangler)
    }
}

impl Eq for DemanglerHandle {}

impl Hash for DemanglerHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for DemanglerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemanglerHandle")
            .field("id", &self.id)
            .field("family", &self.family)
            .field("valid", &self.is_valid())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let a = DemanglerId::next();
        let b = DemanglerId::next();
        assert!(b.as_u64() > a.as_u64());
        assert_eq!(a.to_string(), format!("demangler#{}", a.as_u64()));
    }
}
