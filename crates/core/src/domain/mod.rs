// Domain Layer - Artifacts, toolchain classification, change notification

pub mod error;
pub mod module;
pub mod subject;
pub mod toolchain;

// Re-exports
pub use error::DomainError;
pub use module::{Module, ModuleEvent, ModuleId};
pub use subject::{Observable, Subject};
pub use toolchain::{Selection, ToolInfo, ToolInfoContainer, ToolchainFamily};
