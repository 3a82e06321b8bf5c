// Module Observers - structured logging of module changes

use decomp_core::domain::{Module, ModuleEvent};
use decomp_core::port::Observer;
use tracing::{debug, info};

/// Logs every module change under the job label
pub struct ModuleEventLogger {
    job: String,
}

impl ModuleEventLogger {
    pub fn new(job: impl Into<String>) -> Self {
        Self { job: job.into() }
    }
}

impl Observer<Module, ModuleEvent> for ModuleEventLogger {
    fn update(&self, module: &Module, arg: Option<&ModuleEvent>) {
        match arg {
            Some(ModuleEvent::SymbolAdded(symbol)) => {
                debug!(job = %self.job, module = %module.name(), symbol = %symbol, "Symbol added")
            }
            Some(ModuleEvent::Renamed { from, to }) => {
                info!(job = %self.job, module_id = %module.id(), from = %from, to = %to, "Module renamed")
            }
            Some(ModuleEvent::ToolchainUpdated) => {
                info!(job = %self.job, module = %module.name(), "Module toolchain updated")
            }
            None => debug!(job = %self.job, module = %module.name(), "Module changed"),
        }
    }
}
