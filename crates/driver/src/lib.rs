//! Decomp Driver - composition root library
//! Configuration, manifests and the job runner used by the `decomp-driver` binary.

pub mod config;
pub mod job;
pub mod manifest;
pub mod observers;

pub use config::{DriverConfig, LogFormat};
pub use job::{collect_reports, run_job, JobOutcome, JobReport, ModuleReport};
pub use manifest::{JobManifest, ModuleSpec};
