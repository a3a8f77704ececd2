use crate::introspect::{MethodId, SymbolId};
use crate::threads::Tid;

/// Bytecode index values the sampler uses to mark non-method frames.
pub const BCI_NATIVE_FRAME: i32 = -10;
pub const BCI_SYMBOL: i32 = -11;
pub const BCI_SYMBOL_OUTSIDE_TLAB: i32 = -12;
pub const BCI_THREAD_ID: i32 = -13;
pub const BCI_ERROR: i32 = -14;

/// How the handle of a [`FrameRecord`] is to be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Native,
    TypeSymbol,
    /// Allocated outside the thread-local buffer. The handle carries a tag
    /// in its low bit.
    TypeSymbolTransient,
    ThreadMarker,
    ErrorMarker,
    /// Java method; `bci` is negative when the offset is unknown.
    Method { bci: i32 },
}

impl FrameKind {
    pub fn from_bci(bci: i32) -> Self {
        match bci {
            BCI_NATIVE_FRAME => FrameKind::Native,
            BCI_SYMBOL => FrameKind::TypeSymbol,
            BCI_SYMBOL_OUTSIDE_TLAB => FrameKind::TypeSymbolTransient,
            BCI_THREAD_ID => FrameKind::ThreadMarker,
            BCI_ERROR => FrameKind::ErrorMarker,
            bci => FrameKind::Method { bci },
        }
    }
}

/// One frame of a sampled stack as the sampler hands it over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRecord {
    pub handle: u64,
    pub kind: FrameKind,
}

impl FrameRecord {
    pub fn new(handle: u64, kind: FrameKind) -> Self {
        Self { handle, kind }
    }

    /// Builds a record from the sampler's `(method_id, bci)` pair.
    pub fn from_raw(handle: u64, bci: i32) -> Self {
        Self::new(handle, FrameKind::from_bci(bci))
    }

    pub fn method(method: MethodId, bci: i32) -> Self {
        Self::new(method.0, FrameKind::Method { bci })
    }

    pub fn thread(tid: Tid) -> Self {
        Self::new(tid as u32 as u64, FrameKind::ThreadMarker)
    }

    /// Decodes the handle according to the frame kind. Tag bits are stripped
    /// here, so nothing downstream sees a tagged handle.
    pub fn classify(&self) -> Frame {
        if self.handle == 0 {
            return Frame::Unknown;
        }
        match self.kind {
            FrameKind::Native => Frame::Native(self.handle),
            FrameKind::TypeSymbol => Frame::Symbol {
                symbol: SymbolId(self.handle),
                transient: false,
            },
            FrameKind::TypeSymbolTransient => Frame::Symbol {
                symbol: SymbolId(self.handle & !1),
                transient: true,
            },
            FrameKind::ThreadMarker => Frame::Thread(self.handle as u32 as Tid),
            FrameKind::ErrorMarker => Frame::Error(self.handle),
            FrameKind::Method { bci } => Frame::Method {
                method: MethodId(self.handle),
                bci: (bci >= 0).then(|| bci),
            },
        }
    }
}

/// A classified frame with a typed handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    Unknown,
    Native(u64),
    Symbol { symbol: SymbolId, transient: bool },
    Thread(Tid),
    Error(u64),
    Method { method: MethodId, bci: Option<i32> },
}
