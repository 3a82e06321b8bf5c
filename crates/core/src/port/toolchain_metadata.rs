// Toolchain Metadata Port
// Supplied by the toolchain detection collaborator; consulted only when a
// demangler has to be created.

use crate::domain::{ToolInfoContainer, ToolchainFamily};

/// Tool name fragments identifying each family (case-insensitive)
///
/// Matching is by substring, so `clang++` counts as GCC through `g++`. Clang
/// emits Itanium-mangled names, which is what the GCC demangler handles.
pub const GCC_TOOL_NAMES: &[&str] = &["gcc", "g++", "mingw"];
pub const MSVC_TOOL_NAMES: &[&str] = &["msvc", "visual studio", "visual c++"];
pub const BORLAND_TOOL_NAMES: &[&str] = &["borland", "bcc"];

/// Queryable toolchain family membership
#[cfg_attr(test, mockall::automock)]
pub trait ToolchainMetadata {
    fn is_gcc(&self) -> bool;
    fn is_msvc(&self) -> bool;
    fn is_borland(&self) -> bool;
}

impl ToolchainMetadata for ToolInfoContainer {
    fn is_gcc(&self) -> bool {
        self.any_named(GCC_TOOL_NAMES)
    }

    fn is_msvc(&self) -> bool {
        self.any_named(MSVC_TOOL_NAMES)
    }

    fn is_borland(&self) -> bool {
        self.any_named(BORLAND_TOOL_NAMES)
    }
}

/// An already classified family answers for itself
impl ToolchainMetadata for ToolchainFamily {
    fn is_gcc(&self) -> bool {
        *self == ToolchainFamily::Gcc
    }

    fn is_msvc(&self) -> bool {
        *self == ToolchainFamily::Msvc
    }

    fn is_borland(&self) -> bool {
        *self == ToolchainFamily::Borland
    }
}

/// Metadata for modules whose toolchain could not be detected
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownToolchain;

impl ToolchainMetadata for UnknownToolchain {
    fn is_gcc(&self) -> bool {
        false
    }

    fn is_msvc(&self) -> bool {
        false
    }

    fn is_borland(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ToolInfo;

    #[test]
    fn test_container_predicates_match_tool_names() {
        let container: ToolInfoContainer = vec![
            ToolInfo::new("MinGW").with_version("4.9"),
            ToolInfo::new("Borland Delphi"),
        ]
        .into_iter()
        .collect();

        assert!(container.is_gcc());
        assert!(!container.is_msvc());
        assert!(container.is_borland());
    }

    #[test]
    fn test_clang_plus_plus_counts_as_gcc() {
        let container = ToolInfoContainer::new(vec![ToolInfo::new("clang++").with_version("17")]);

        assert!(container.is_gcc());
        assert!(!container.is_msvc());
        assert!(!container.is_borland());
        assert_eq!(ToolchainFamily::classify(&container).family, ToolchainFamily::Gcc);
        assert!(!ToolchainFamily::classify(&container).fallback);
    }

    #[test]
    fn test_unknown_toolchain_matches_nothing() {
        assert!(!UnknownToolchain.is_gcc());
        assert!(!UnknownToolchain.is_msvc());
        assert!(!UnknownToolchain.is_borland());
    }

    #[test]
    fn test_classify_consults_predicates_in_priority_order() {
        let mut metadata = MockToolchainMetadata::new();
        metadata.expect_is_gcc().times(1).return_const(false);
        metadata.expect_is_msvc().times(1).return_const(true);
        metadata.expect_is_borland().never();

        let selection = ToolchainFamily::classify(&metadata);
        assert_eq!(selection.family, ToolchainFamily::Msvc);
        assert!(!selection.fallback);
    }
}
