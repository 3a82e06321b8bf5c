// Itanium C++ ABI demangler (GCC family)

use decomp_core::domain::ToolchainFamily;
use decomp_core::port::Demangler;

/// Prefixes of Itanium-mangled names (`__Z` on Mach-O)
const ITANIUM_PREFIXES: &[&str] = &["_Z", "__Z", "_GLOBAL__"];

#[derive(Debug)]
pub struct GccDemangler {
    prefixes: &'static [&'static str],
}

impl GccDemangler {
    pub fn new() -> Self {
        Self {
            prefixes: ITANIUM_PREFIXES,
        }
    }
}

impl Default for GccDemangler {
    fn default() -> Self {
        Self::new()
    }
}

impl Demangler for GccDemangler {
    fn family(&self) -> ToolchainFamily {
        ToolchainFamily::Gcc
    }

    fn is_mangled(&self, symbol: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| symbol.len() > prefix.len() && symbol.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognises_itanium_names() {
        let d = GccDemangler::new();
        assert!(d.is_mangled("_Z3foov"));
        assert!(d.is_mangled("__ZN3bar3bazEv"));
        assert!(d.is_mangled("_GLOBAL__sub_I_main"));
        assert!(!d.is_mangled("_Z"));
        assert!(!d.is_mangled("main"));
        assert!(!d.is_mangled("?foo@@YAXXZ"));
    }
}
