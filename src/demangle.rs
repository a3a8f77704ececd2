use cpp_demangle::{DemangleOptions, Symbol as CppSymbol};

use crate::buffer::ScratchBuffer;

fn demangled(name: &str) -> Option<String> {
    if name.starts_with("_R") {
        return rustc_demangle::try_demangle(name)
            .ok()
            .map(|d| format!("{:#}", d));
    }
    if name.starts_with("_Z") {
        return match CppSymbol::new(name) {
            Ok(symbol) => symbol.demangle(&DemangleOptions::default()).ok(),
            Err(_) => rustc_demangle::try_demangle(name)
                .ok()
                .map(|d| format!("{:#}", d)),
        };
    }
    None
}

/// Demangles a native symbol name.
///
/// Names without a mangling prefix, and names that fail to demangle, are
/// returned as they are. Otherwise the demangled text is written to `out`,
/// cut to its capacity.
pub fn demangle<'a>(name: &'a str, out: &'a mut ScratchBuffer) -> &'a str {
    match demangled(name) {
        Some(text) => {
            out.clear();
            out.push_str_lossy(&text);
            out.as_str()
        }
        None => {
            if name.starts_with("_Z") || name.starts_with("_R") {
                log::debug!("cannot demangle native symbol {}", name);
            }
            name
        }
    }
}
