// Borland C++ demangler (Borland family)

use decomp_core::domain::ToolchainFamily;
use decomp_core::port::Demangler;

#[derive(Debug)]
pub struct BorlandDemangler {
    marker: char,
    args_separator: char,
}

impl BorlandDemangler {
    pub fn new() -> Self {
        Self {
            marker: '@',
            args_separator: '$',
        }
    }
}

impl Default for BorlandDemangler {
    fn default() -> Self {
        Self::new()
    }
}

impl Demangler for BorlandDemangler {
    fn family(&self) -> ToolchainFamily {
        ToolchainFamily::Borland
    }

    /// `@Scope@name$qv`: leading `@`, argument list after `$`
    fn is_mangled(&self, symbol: &str) -> bool {
        symbol
            .strip_prefix(self.marker)
            .is_some_and(|rest| rest.contains(self.args_separator))
    }
}
