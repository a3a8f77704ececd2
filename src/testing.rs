//! In-memory VM used by the unit tests.

use std::cell::Cell;
use std::collections::HashMap;

use crate::introspect::{
    ClassId, IntrospectionError, Introspector, LineTable, MethodId, MethodInfo, SymbolId,
};

// JVMTI status codes
pub const INVALID_METHODID: i32 = 23;
pub const INVALID_CLASS: i32 = 21;
pub const ABSENT_INFORMATION: i32 = 101;

struct Method {
    class: ClassId,
    info: MethodInfo,
}

struct Class {
    signature: String,
    source_file: Option<String>,
}

#[derive(Default)]
pub struct MockVm {
    methods: HashMap<MethodId, Method>,
    classes: HashMap<u64, Class>,
    lines: HashMap<MethodId, LineTable>,
    symbols: HashMap<u64, Vec<u8>>,
    strings: HashMap<u64, String>,
    lookups: Cell<usize>,
}

impl MockVm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, id: u64, signature: &str, source_file: Option<&str>) -> Self {
        self.classes.insert(
            id,
            Class {
                signature: signature.to_owned(),
                source_file: source_file.map(str::to_owned),
            },
        );
        self
    }

    pub fn method(mut self, id: u64, class: u64, name: &str, signature: &str) -> Self {
        self.methods.insert(
            MethodId(id),
            Method {
                class: ClassId(class),
                info: MethodInfo {
                    name: name.to_owned(),
                    signature: signature.to_owned(),
                },
            },
        );
        self
    }

    pub fn lines(mut self, method: u64, table: &[(i32, u32)]) -> Self {
        self.lines
            .insert(MethodId(method), table.iter().copied().collect());
        self
    }

    pub fn symbol(mut self, addr: u64, body: &str) -> Self {
        self.symbols.insert(addr, body.as_bytes().to_vec());
        self
    }

    pub fn string(mut self, addr: u64, text: &str) -> Self {
        self.strings.insert(addr, text.to_owned());
        self
    }

    /// Number of `method_name` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl Introspector for MockVm {
    fn method_name(&self, method: MethodId) -> Result<MethodInfo, IntrospectionError> {
        self.lookups.set(self.lookups.get() + 1);
        self.methods
            .get(&method)
            .map(|m| m.info.clone())
            .ok_or(IntrospectionError(INVALID_METHODID))
    }

    fn declaring_class(&self, method: MethodId) -> Result<ClassId, IntrospectionError> {
        self.methods
            .get(&method)
            .map(|m| m.class)
            .ok_or(IntrospectionError(INVALID_METHODID))
    }

    fn class_signature(&self, class: ClassId) -> Result<String, IntrospectionError> {
        self.classes
            .get(&class.0)
            .map(|c| c.signature.clone())
            .ok_or(IntrospectionError(INVALID_CLASS))
    }

    fn source_file_name(&self, class: ClassId) -> Result<String, IntrospectionError> {
        let class = self
            .classes
            .get(&class.0)
            .ok_or(IntrospectionError(INVALID_CLASS))?;
        class
            .source_file
            .clone()
            .ok_or(IntrospectionError(ABSENT_INFORMATION))
    }

    fn line_number_table(&self, method: MethodId) -> Result<LineTable, IntrospectionError> {
        self.lines
            .get(&method)
            .cloned()
            .ok_or(IntrospectionError(ABSENT_INFORMATION))
    }

    fn symbol_body(&self, symbol: SymbolId) -> Option<&[u8]> {
        self.symbols.get(&symbol.0).map(Vec::as_slice)
    }

    fn native_name(&self, handle: u64) -> Option<&str> {
        self.strings.get(&handle).map(String::as_str)
    }

    fn error_text(&self, handle: u64) -> Option<&str> {
        self.strings.get(&handle).map(String::as_str)
    }
}
