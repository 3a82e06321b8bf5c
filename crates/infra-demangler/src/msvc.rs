// Microsoft Visual C++ decorated-name demangler (MSVC family)

use decomp_core::domain::ToolchainFamily;
use decomp_core::port::Demangler;

#[derive(Debug)]
pub struct MsDemangler {
    marker: char,
}

impl MsDemangler {
    pub fn new() -> Self {
        Self { marker: '?' }
    }
}

impl Default for MsDemangler {
    fn default() -> Self {
        Self::new()
    }
}

impl Demangler for MsDemangler {
    fn family(&self) -> ToolchainFamily {
        ToolchainFamily::Msvc
    }

    /// Decorated names start with `?` and carry an `@` scope separator
    fn is_mangled(&self, symbol: &str) -> bool {
        symbol
            .strip_prefix(self.marker)
            .is_some_and(|rest| rest.contains('@'))
    }
}
