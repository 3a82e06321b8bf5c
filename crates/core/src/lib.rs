// Decomp Core - Pipeline Mechanisms & Ports
// NO demangling algorithms, NO IR construction (Hexagonal Architecture)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
