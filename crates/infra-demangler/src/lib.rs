// Decomp Infrastructure - Demangler Adapters
// Implements: Demangler, plus the named factories behind FactoryTable

mod borland;
mod gcc;
mod msvc;

pub use borland::BorlandDemangler;
pub use gcc::GccDemangler;
pub use msvc::MsDemangler;

use decomp_core::port::{ConstructionResult, FactoryTable};

/// Create a demangler for the Itanium C++ ABI (GCC, Clang, MinGW)
pub fn create_gcc() -> ConstructionResult {
    Ok(Box::new(GccDemangler::new()))
}

/// Create a demangler for Microsoft Visual C++ decorated names
pub fn create_ms() -> ConstructionResult {
    Ok(Box::new(MsDemangler::new()))
}

/// Create a demangler for Borland/Embarcadero C++ names
pub fn create_borland() -> ConstructionResult {
    Ok(Box::new(BorlandDemangler::new()))
}

/// Factory table wired to the built-in demanglers
pub fn builtin_factories() -> FactoryTable {
    tracing::debug!("Building built-in demangler factory table");
    FactoryTable::new(create_gcc, create_ms, create_borland)
}
