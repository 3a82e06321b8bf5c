// Job Manifest - modules to process in one decompilation job
//
// {
//   "job": "firmware-1",
//   "modules": [
//     { "name": "a.out", "tools": [{"name": "gcc", "version": "7.3"}], "symbols": ["_Z3foov"] }
//   ]
// }

use decomp_core::domain::ToolInfoContainer;
use decomp_core::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobManifest {
    /// Job label; defaults to the manifest file stem
    #[serde(default)]
    pub job: Option<String>,
    pub modules: Vec<ModuleSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub name: String,
    #[serde(default)]
    pub tools: ToolInfoContainer,
    #[serde(default)]
    pub symbols: Vec<String>,
}

impl JobManifest {
    /// Read and parse a manifest file
    ///
    /// # Errors
    /// - `AppError::Io` if the file cannot be read
    /// - `AppError::Serialization` if it is not a valid manifest
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let mut manifest: JobManifest = serde_json::from_str(&raw)?;
        if manifest.job.is_none() {
            manifest.job = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned());
        }
        Ok(manifest)
    }
}
