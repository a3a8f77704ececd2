use std::sync::Arc;

use crate::buffer::{decimal, ScratchBuffer, DECIMAL_LEN, DEFAULT_CAPACITY};
use crate::frames::{Frame, FrameRecord};
use crate::introspect::Introspector;
use crate::resolver::{MethodResolver, ResolutionCache};
use crate::threads::ThreadNameRegistry;
use crate::{demangle, lines, signature, Style};

pub const UNKNOWN: &str = "[unknown]";

/// Turns sampled frames into display names.
///
/// One instance serves one consumer. The string returned by
/// [`format`](Self::format) borrows the instance and stays valid until the
/// next call. Method names are cached for the lifetime of the instance.
pub struct FrameName<I> {
    vm: I,
    style: Style,
    line_numbers: bool,
    resolver: MethodResolver,
    cache: ResolutionCache,
    scratch: ScratchBuffer,
    thread_names: Arc<ThreadNameRegistry>,
}

impl<I: Introspector> FrameName<I> {
    pub fn new(vm: I, style: Style, thread_names: Arc<ThreadNameRegistry>) -> Self {
        FrameNameBuilder::default()
            .style(style)
            .thread_names(thread_names)
            .build(vm)
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn introspector(&self) -> &I {
        &self.vm
    }

    /// Formats a frame given as the sampler's raw `(method_id, bci)` pair.
    pub fn format_raw(&mut self, handle: u64, bci: i32) -> &str {
        self.format(&FrameRecord::from_raw(handle, bci))
    }

    pub fn format(&mut self, frame: &FrameRecord) -> &str {
        match frame.classify() {
            Frame::Unknown => UNKNOWN,

            Frame::Native(handle) => match self.vm.native_name(handle) {
                Some(name) => demangle::demangle(name, &mut self.scratch),
                None => UNKNOWN,
            },

            Frame::Symbol { symbol, transient } => {
                let body = match self.vm.symbol_body(symbol) {
                    Some(body) => String::from_utf8_lossy(body),
                    None => return UNKNOWN,
                };
                self.scratch.clear();
                signature::decode_class_name(&body, self.style | Style::DOTTED, &mut self.scratch);
                let dotted = self.style.contains(Style::DOTTED);
                let suffix = match (transient, dotted) {
                    (false, true) => "",
                    (false, false) => "_[i]",
                    (true, true) => " (out)",
                    (true, false) => "_[k]",
                };
                self.scratch.push_str(suffix);
                self.scratch.as_str()
            }

            Frame::Thread(tid) => {
                // the registry lock is released before anything is written
                let name = self.thread_names.lookup(tid);
                let mut num = [0u8; DECIMAL_LEN];
                let tid = decimal(tid.into(), &mut num);
                self.scratch.clear();
                match name {
                    Some(name) => {
                        self.scratch.push_str("[");
                        self.scratch.push_str_lossy(&name);
                        self.scratch.push_unit(&[" tid=", tid, "]"]);
                    }
                    None => {
                        self.scratch.push_str("[tid=");
                        self.scratch.push_unit(&[tid, "]"]);
                    }
                }
                self.scratch.as_str()
            }

            Frame::Error(handle) => match self.vm.error_text(handle) {
                Some(text) => {
                    self.scratch.clear();
                    self.scratch.push_str("[");
                    self.scratch.push_str_lossy(text);
                    self.scratch.push_str("]");
                    self.scratch.as_str()
                }
                None => UNKNOWN,
            },

            Frame::Method { method, bci } => {
                let name =
                    self.cache
                        .resolve_cached(&self.resolver, &self.vm, method, &mut self.scratch);
                match bci {
                    Some(bci) if self.line_numbers => {
                        lines::enrich(&self.vm, name, method, bci, &mut self.scratch)
                    }
                    _ => name,
                }
            }
        }
    }
}

/// Configuration of a [`FrameName`].
#[derive(Clone, Debug)]
pub struct FrameNameBuilder {
    style: Style,
    line_numbers: bool,
    capacity: usize,
    thread_names: Option<Arc<ThreadNameRegistry>>,
}

impl Default for FrameNameBuilder {
    fn default() -> FrameNameBuilder {
        FrameNameBuilder {
            style: Style::empty(),
            line_numbers: false,
            capacity: DEFAULT_CAPACITY,
            thread_names: None,
        }
    }
}

impl FrameNameBuilder {
    pub fn style(self, style: Style) -> Self {
        Self { style, ..self }
    }

    /// Appends source file and line to method frames with a known bci.
    pub fn line_numbers(self, line_numbers: bool) -> Self {
        Self {
            line_numbers,
            ..self
        }
    }

    /// Upper bound, in bytes, of any formatted name.
    pub fn capacity(self, capacity: usize) -> Self {
        Self { capacity, ..self }
    }

    pub fn thread_names(self, thread_names: Arc<ThreadNameRegistry>) -> Self {
        Self {
            thread_names: Some(thread_names),
            ..self
        }
    }

    pub fn build<I: Introspector>(self, vm: I) -> FrameName<I> {
        log::info!(
            "frame names: style {:?}, line numbers {}",
            self.style,
            self.line_numbers
        );
        FrameName {
            vm,
            style: self.style,
            line_numbers: self.line_numbers,
            resolver: MethodResolver::new(self.style),
            cache: ResolutionCache::new(),
            scratch: ScratchBuffer::with_capacity(self.capacity),
            thread_names: self.thread_names.unwrap_or_default(),
        }
    }
}
