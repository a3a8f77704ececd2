//! Display names for frames sampled from a JVM.
//!
//! A profiler records each stack frame as a handle plus a tag telling what
//! the handle is: a Java method, a native symbol, an allocated class, a
//! thread marker or an error message. [`FrameName`] turns such records into
//! the short strings that flame graphs and collapsed stacks are made of:
//!
//! ```text
//! java.util.HashMap.put(java.lang.Object, java.lang.Object) java.lang.Object
//! MyClass::method(int)
//! java.lang.String (out)
//! [worker-1 tid=42]
//! ```
//!
//! Everything the VM knows about a handle is obtained through the
//! [`Introspector`] trait.

pub mod buffer;
pub mod demangle;
mod frame_name;
pub mod frames;
pub mod introspect;
pub mod lines;
pub mod resolver;
pub mod signature;
mod style;
pub mod threads;

#[cfg(test)]
mod testing;

pub use frame_name::{FrameName, FrameNameBuilder, UNKNOWN};
pub use frames::{Frame, FrameKind, FrameRecord};
pub use introspect::{
    ClassId, IntrospectionError, Introspector, LineTable, MethodId, MethodInfo, SymbolId,
};
pub use style::Style;
pub use threads::{ThreadNameRegistry, Tid};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Introspection(#[from] IntrospectionError),
    #[error("no line number information for bci {0}")]
    NoLineInfo(i32),
    #[error("unknown style option `{0}`")]
    UnknownStyle(String),
}

pub type Result<T> = std::result::Result<T, Error>;
