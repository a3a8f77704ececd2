//! The data this crate needs from the VM, described as a trait.
//!
//! An implementation typically wraps JVMTI (`GetMethodName`,
//! `GetMethodDeclaringClass`, `GetClassSignature`, `GetSourceFileName`,
//! `GetLineNumberTable`) plus whatever reads symbol bodies and C strings out
//! of the sampled process. JVMTI results are returned owned, so nothing
//! the VM allocates outlives a single formatting call. Symbols and C
//! strings live in the sampled process and are only borrowed.

use smallvec::SmallVec;

/// Opaque method handle (a `jmethodID`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodId(pub u64);

/// Opaque class handle (a `jclass`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClassId(pub u64);

/// Address of a VM symbol, with any tag bits already cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u64);

/// Nonzero status code returned by the collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("introspection error {0}")]
pub struct IntrospectionError(pub i32);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub signature: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineEntry {
    pub start_bci: i32,
    pub line: u32,
}

/// Line number table of one method, ascending by `start_bci`.
///
/// Most methods have only a handful of entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineTable {
    entries: SmallVec<[LineEntry; 8]>,
}

impl LineTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, start_bci: i32, line: u32) {
        self.entries.push(LineEntry { start_bci, line });
    }

    pub fn entries(&self) -> &[LineEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Line of the entry with the greatest start offset not above `bci`.
    pub fn line_for(&self, bci: i32) -> Option<u32> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.start_bci <= bci)
            .map(|entry| entry.line)
    }
}

impl FromIterator<(i32, u32)> for LineTable {
    fn from_iter<I: IntoIterator<Item = (i32, u32)>>(iter: I) -> Self {
        let mut table = LineTable::new();
        for (start_bci, line) in iter {
            table.push(start_bci, line);
        }
        table
    }
}

pub trait Introspector {
    fn method_name(&self, method: MethodId) -> Result<MethodInfo, IntrospectionError>;

    fn declaring_class(&self, method: MethodId) -> Result<ClassId, IntrospectionError>;

    /// Class signature in descriptor form, e.g. `Ljava/lang/String;`.
    fn class_signature(&self, class: ClassId) -> Result<String, IntrospectionError>;

    fn source_file_name(&self, class: ClassId) -> Result<String, IntrospectionError>;

    fn line_number_table(&self, method: MethodId) -> Result<LineTable, IntrospectionError>;

    /// Body of a VM symbol holding a class name in internal form.
    fn symbol_body(&self, symbol: SymbolId) -> Option<&[u8]>;

    /// Mangled or plain name of a native frame.
    fn native_name(&self, handle: u64) -> Option<&str>;

    /// Diagnostic message attached to an error frame.
    fn error_text(&self, handle: u64) -> Option<&str>;
}
