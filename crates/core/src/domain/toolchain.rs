// Toolchain Domain Model

use crate::domain::error::{DomainError, Result};
use crate::port::ToolchainMetadata;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Compiler family a demangler variant is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolchainFamily {
    Gcc,
    Msvc,
    Borland,
}

impl ToolchainFamily {
    /// All families, in selection priority order
    pub const ALL: [ToolchainFamily; 3] = [
        ToolchainFamily::Gcc,
        ToolchainFamily::Msvc,
        ToolchainFamily::Borland,
    ];

    /// Family used when metadata matches none of the known families
    pub const DEFAULT: ToolchainFamily = ToolchainFamily::Gcc;

    /// Slot of this family in a factory table
    pub const fn index(self) -> usize {
        match self {
            ToolchainFamily::Gcc => 0,
            ToolchainFamily::Msvc => 1,
            ToolchainFamily::Borland => 2,
        }
    }

    /// Classify toolchain metadata into exactly one family.
    ///
    /// Predicates are checked in fixed priority order: GCC, MSVC, Borland.
    /// Metadata matching none of them resolves to [`ToolchainFamily::DEFAULT`]
    /// with `fallback` set, so callers can surface the guess.
    pub fn classify(metadata: &dyn ToolchainMetadata) -> Selection {
        let matched = if metadata.is_gcc() {
            Some(ToolchainFamily::Gcc)
        } else if metadata.is_msvc() {
            Some(ToolchainFamily::Msvc)
        } else if metadata.is_borland() {
            Some(ToolchainFamily::Borland)
        } else {
            None
        };

        match matched {
            Some(family) => Selection {
                family,
                fallback: false,
            },
            None => Selection {
                family: Self::DEFAULT,
                fallback: true,
            },
        }
    }
}

impl std::fmt::Display for ToolchainFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolchainFamily::Gcc => write!(f, "GCC"),
            ToolchainFamily::Msvc => write!(f, "MSVC"),
            ToolchainFamily::Borland => write!(f, "BORLAND"),
        }
    }
}

impl FromStr for ToolchainFamily {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gcc" => Ok(ToolchainFamily::Gcc),
            "msvc" | "ms" => Ok(ToolchainFamily::Msvc),
            "borland" => Ok(ToolchainFamily::Borland),
            other => Err(DomainError::UnknownFamily(other.to_string())),
        }
    }
}

/// Outcome of classifying toolchain metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub family: ToolchainFamily,
    /// True when no predicate matched and the default family was chosen
    pub fallback: bool,
}

/// A single tool detected in a binary (compiler, linker, packer...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl ToolInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Case-insensitive check of the tool name against any of `needles`
    pub fn name_contains_any(&self, needles: &[&str]) -> bool {
        let name = self.name.to_ascii_lowercase();
        needles.iter().any(|needle| name.contains(needle))
    }
}

/// Tools detected for one module (serde-friendly metadata container)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolInfoContainer {
    tools: Vec<ToolInfo>,
}

impl ToolInfoContainer {
    pub fn new(tools: Vec<ToolInfo>) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &[ToolInfo] {
        &self.tools
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub(crate) fn any_named(&self, needles: &[&str]) -> bool {
        self.tools.iter().any(|t| t.name_contains_any(needles))
    }
}

impl FromIterator<ToolInfo> for ToolInfoContainer {
    fn from_iter<I: IntoIterator<Item = ToolInfo>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
