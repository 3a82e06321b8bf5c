//! Pipeline Context - owns per-job services
//!
//! One context per decompilation job. The demangler registry lives exactly as
//! long as the context, so no demangler state leaks between jobs.

use crate::application::demangler_registry::{DemanglerHandle, DemanglerRegistry, RegistryConfig};
use crate::domain::{Module, ModuleId, ToolInfoContainer};
use crate::error::Result;
use crate::port::{FactoryTable, IdProvider};
use std::sync::Arc;
use tracing::info;

pub struct PipelineContext {
    job: String,
    registry: Arc<DemanglerRegistry<ModuleId>>,
    id_provider: Arc<dyn IdProvider>,
    finished: bool,
}

impl PipelineContext {
    /// Create a context for `job`
    ///
    /// # Arguments
    /// * `job` - Job label used in logs
    /// * `factories` - Demangler construction interface
    /// * `config` - Registry configuration
    /// * `id_provider` - Source of module identities
    pub fn new(
        job: impl Into<String>,
        factories: FactoryTable,
        config: RegistryConfig,
        id_provider: Arc<dyn IdProvider>,
    ) -> Self {
        let job = job.into();
        info!(job = %job, "Pipeline context created");
        Self {
            job,
            registry: Arc::new(DemanglerRegistry::with_config(factories, config)),
            id_provider,
            finished: false,
        }
    }

    pub fn job(&self) -> &str {
        &self.job
    }

    /// Shared registry (for stages that outlive a single call, e.g. observers)
    pub fn registry(&self) -> &Arc<DemanglerRegistry<ModuleId>> {
        &self.registry
    }

    /// Create a module with a fresh identity
    pub fn create_module(&self, name: impl Into<String>, toolchain: ToolInfoContainer) -> Module {
        Module::new(self.id_provider.next_module_id(), name, toolchain)
    }

    /// Demangler for `module`, selected from its toolchain on first use
    pub fn demangler_for(&self, module: &Module) -> Result<DemanglerHandle> {
        self.registry.get_or_create(module.id(), module.toolchain())
    }

    /// End the job and release every demangler it created
    ///
    /// Returns the number of released demanglers.
    pub fn finish(mut self) -> usize {
        self.finished = true;
        let released = self.registry.clear();
        info!(job = %self.job, released, "Pipeline context finished");
        released
    }
}

impl Drop for PipelineContext {
    fn drop(&mut self) {
        if !self.finished {
            let released = self.registry.clear();
            info!(job = %self.job, released, "Pipeline context dropped");
        }
    }
}

impl std::fmt::Debug for PipelineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineContext")
            .field("job", &self.job)
            .field("registry", &self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ToolInfo, ToolchainFamily};
    use crate::port::demangler::mocks::stub_factories;
    use crate::port::SequentialIdProvider;

    fn context(job: &str) -> PipelineContext {
        PipelineContext::new(
            job,
            stub_factories(),
            RegistryConfig::default(),
            Arc::new(SequentialIdProvider::default()),
        )
    }

    #[test]
    fn test_modules_get_distinct_ids() {
        let ctx = context("job-1");
        let a = ctx.create_module("a.out", ToolInfoContainer::default());
        let b = ctx.create_module("b.out", ToolInfoContainer::default());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_demangler_follows_module_toolchain() {
        let ctx = context("job-1");
        let module = ctx.create_module("app.exe", ToolInfoContainer::new(vec![ToolInfo::new("msvc")]));

        let handle = ctx.demangler_for(&module).unwrap();
        assert_eq!(handle.family(), ToolchainFamily::Msvc);
        assert_eq!(ctx.demangler_for(&module).unwrap(), handle);
    }

    #[test]
    fn test_finish_releases_demanglers() {
        let ctx = context("job-1");
        let module = ctx.create_module("a.out", ToolInfoContainer::default());
        let handle = ctx.demangler_for(&module).unwrap();
        let registry = Arc::clone(ctx.registry());

        assert_eq!(ctx.finish(), 1);
        assert!(!handle.is_valid());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_drop_releases_demanglers() {
        let ctx = context("job-2");
        let module = ctx.create_module("a.out", ToolInfoContainer::default());
        let handle = ctx.demangler_for(&module).unwrap();

        drop(ctx);
        assert!(!handle.is_valid());
    }

    #[test]
    fn test_jobs_do_not_share_state() {
        let first = context("job-a");
        let second = context("job-b");
        let module = first.create_module("a.out", ToolInfoContainer::default());

        first.demangler_for(&module).unwrap();
        assert!(second.registry().get(&module.id()).is_none());
    }
}
