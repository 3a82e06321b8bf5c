// Port Layer - Interfaces supplied by pipeline collaborators

pub mod demangler;
pub mod id_provider; // For deterministic testing
pub mod observer;
pub mod toolchain_metadata;

// Re-exports
pub use demangler::{ConstructionError, ConstructionResult, Demangler, DemanglerFactory, FactoryTable};
pub use id_provider::{IdProvider, SequentialIdProvider, UuidProvider};
pub use observer::Observer;
pub use toolchain_metadata::{ToolchainMetadata, UnknownToolchain};
