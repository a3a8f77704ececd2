use std::collections::btree_map::{BTreeMap, Entry};

use crate::buffer::{decimal, ScratchBuffer, DECIMAL_LEN};
use crate::introspect::{IntrospectionError, Introspector, MethodId};
use crate::signature;
use crate::Style;

/// Suffix marking a Java method when [`Style::ANNOTATE`] is set.
pub const JAVA_METHOD_SUFFIX: &str = "_[j]";

/// Builds the display name of a Java method. Does no caching.
#[derive(Clone, Copy, Debug)]
pub struct MethodResolver {
    style: Style,
}

impl MethodResolver {
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    /// Writes the name of `method` to `out`, replacing its contents.
    ///
    /// A failing VM query yields `[introspection error N]` rather than an
    /// error.
    pub fn resolve<I: Introspector + ?Sized>(
        &self,
        vm: &I,
        method: MethodId,
        out: &mut ScratchBuffer,
    ) {
        out.clear();
        if let Err(err) = self.write_name(vm, method, out) {
            log::debug!("cannot resolve method {:#x}: {}", method.0, err);
            let mut num = [0u8; DECIMAL_LEN];
            out.clear();
            out.push_unit(&["[introspection error ", decimal(err.0.into(), &mut num), "]"]);
        }
    }

    fn write_name<I: Introspector + ?Sized>(
        &self,
        vm: &I,
        method: MethodId,
        out: &mut ScratchBuffer,
    ) -> Result<(), IntrospectionError> {
        let info = vm.method_name(method)?;
        let class = vm.declaring_class(method)?;
        let class_signature = vm.class_signature(class)?;

        signature::decode(&class_signature, self.style, out);
        out.push_str(".");
        signature::write_escaped(&info.name, out);
        if self.style.contains(Style::SIGNATURES) {
            signature::decode(&info.signature, self.style, out);
        }
        if self.style.contains(Style::ANNOTATE) {
            out.push_str(JAVA_METHOD_SUFFIX);
        }
        Ok(())
    }
}

/// Method names resolved so far. Grows for the lifetime of its owner and
/// never evicts.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    names: BTreeMap<MethodId, Box<str>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached name of `method`, resolving and storing it first
    /// if this is the first request. `scratch` is clobbered on a miss.
    pub fn resolve_cached<'a, I: Introspector + ?Sized>(
        &'a mut self,
        resolver: &MethodResolver,
        vm: &I,
        method: MethodId,
        scratch: &mut ScratchBuffer,
    ) -> &'a str {
        let name = match self.names.entry(method) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                log::trace!("resolving method {:#x}", method.0);
                resolver.resolve(vm, method, scratch);
                entry.insert(scratch.as_str().into())
            }
        };
        &**name
    }

    pub fn get(&self, method: MethodId) -> Option<&str> {
        self.names.get(&method).map(|name| &**name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
