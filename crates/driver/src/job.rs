//! Job Runner - one pipeline context per manifest
//!
//! For each module: create it, attach observers, resolve its demangler, then
//! feed its symbols through the module (which notifies the observers). The
//! context is finished at the end so every demangler is released.

use crate::manifest::JobManifest;
use crate::observers::ModuleEventLogger;
use decomp_core::application::{
    DemanglerId, MangledSymbolTracker, PipelineContext, RegistryConfig, SymbolStats,
};
use decomp_core::domain::{Module, ModuleEvent, ModuleId, Observable, ToolchainFamily};
use decomp_core::port::{FactoryTable, IdProvider, Observer};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    pub name: String,
    pub module_id: ModuleId,
    pub family: Option<ToolchainFamily>,
    pub demangler_id: Option<DemanglerId>,
    pub stats: SymbolStats,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub job: String,
    pub modules: Vec<ModuleReport>,
    /// Demanglers released when the job finished
    pub released: usize,
}

/// Run every module of `manifest` through a fresh pipeline context
pub fn run_job(
    manifest: &JobManifest,
    factories: FactoryTable,
    config: RegistryConfig,
    id_provider: Arc<dyn IdProvider>,
) -> JobReport {
    let job = manifest.job.clone().unwrap_or_else(|| "unnamed".to_string());
    let ctx = PipelineContext::new(job.clone(), factories, config, id_provider);
    let logger: Arc<dyn Observer<Module, ModuleEvent>> = Arc::new(ModuleEventLogger::new(job.clone()));

    let mut modules = Vec::with_capacity(manifest.modules.len());
    for spec in &manifest.modules {
        let mut module = ctx.create_module(spec.name.clone(), spec.tools.clone());
        let tracker = Arc::new(MangledSymbolTracker::new(Arc::clone(ctx.registry())));
        let tracker_observer: Arc<dyn Observer<Module, ModuleEvent>> = tracker.clone();
        module.subscribe(&logger);
        module.subscribe(&tracker_observer);

        let (family, demangler_id, error) = match ctx.demangler_for(&module) {
            Ok(handle) => (Some(handle.family()), Some(handle.id()), None),
            Err(e) => {
                warn!(job = %job, module = %spec.name, error = %e, "No demangler for module");
                (None, None, Some(e.to_string()))
            }
        };

        for symbol in &spec.symbols {
            module.add_symbol(symbol.clone());
        }

        let stats = tracker.stats();
        info!(
            job = %job,
            module = %spec.name,
            family = ?family,
            symbols = stats.seen,
            mangled = stats.mangled,
            "Module processed"
        );
        modules.push(ModuleReport {
            name: spec.name.clone(),
            module_id: module.id(),
            family,
            demangler_id,
            stats,
            error,
        });
    }

    let released = ctx.finish();
    JobReport {
        job,
        modules,
        released,
    }
}

/// Reports gathered from a set of concurrently running jobs
#[derive(Debug, Default)]
pub struct JobOutcome {
    pub reports: Vec<JobReport>,
    pub failed: usize,
}

/// Drain `jobs`, keeping every successful report
///
/// A job that returned an error and a job whose task panicked both count as
/// failed. Collection always continues with the remaining jobs.
pub async fn collect_reports(mut jobs: JoinSet<anyhow::Result<JobReport>>) -> JobOutcome {
    let mut outcome = JobOutcome::default();
    while let Some(joined) = jobs.join_next().await {
        match joined {
            Ok(Ok(report)) => outcome.reports.push(report),
            Ok(Err(e)) => {
                error!(error = ?e, "Job failed");
                outcome.failed += 1;
            }
            Err(e) => {
                error!(error = %e, "Job task panicked");
                outcome.failed += 1;
            }
        }
    }
    outcome
}
