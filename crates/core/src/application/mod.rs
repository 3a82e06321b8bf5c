// Application Layer - Pipeline services built on the domain and ports

pub mod demangler_registry;
pub mod pipeline;
pub mod symbol_tracker;

// Re-exports
pub use demangler_registry::{DemanglerHandle, DemanglerId, DemanglerRegistry, RegistryConfig};
pub use pipeline::PipelineContext;
pub use symbol_tracker::{MangledSymbolTracker, SymbolStats};
