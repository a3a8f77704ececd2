/// Default capacity of the scratch buffer. Large enough for a class name, a
/// method name and a method signature.
pub const DEFAULT_CAPACITY: usize = 800;

/// Position in a [`ScratchBuffer`] that output can be rolled back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark {
    len: usize,
    truncated: bool,
}

/// Fixed-capacity text buffer reused across formatting calls.
///
/// Every write is all-or-nothing: a piece that does not fit is dropped and
/// the buffer latches into the truncated state, after which all writes are
/// dropped until [`clear`](Self::clear) or [`rollback`](Self::rollback).
/// The length never exceeds the capacity.
#[derive(Debug)]
pub struct ScratchBuffer {
    buf: String,
    capacity: usize,
    truncated: bool,
}

impl ScratchBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.truncated = false;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Appends `s` whole, or nothing at all if it does not fit.
    pub fn push_str(&mut self, s: &str) -> bool {
        if self.truncated {
            return false;
        }
        if self.buf.len() + s.len() > self.capacity {
            self.truncated = true;
            return false;
        }
        self.buf.push_str(s);
        true
    }

    /// Appends the concatenation of `parts` as one unit.
    pub fn push_unit(&mut self, parts: &[&str]) -> bool {
        if self.truncated {
            return false;
        }
        let len: usize = parts.iter().map(|part| part.len()).sum();
        if self.buf.len() + len > self.capacity {
            self.truncated = true;
            return false;
        }
        for part in parts {
            self.buf.push_str(part);
        }
        true
    }

    pub fn push_char(&mut self, c: char) -> bool {
        let mut tmp = [0u8; 4];
        self.push_str(c.encode_utf8(&mut tmp))
    }

    /// Appends as many whole characters of `s` as fit, latching if any are
    /// dropped.
    ///
    /// Used for free text (demangled names, diagnostics) where keeping a
    /// prefix is more useful than dropping the whole piece.
    pub fn push_str_lossy(&mut self, s: &str) {
        if self.truncated || self.push_str(s) {
            return;
        }
        self.truncated = false;
        for c in s.chars() {
            if !self.push_char(c) {
                break;
            }
        }
        self.truncated = true;
    }

    pub fn mark(&self) -> Mark {
        Mark {
            len: self.buf.len(),
            truncated: self.truncated,
        }
    }

    /// Discards everything written since `mark` was taken.
    pub fn rollback(&mut self, mark: Mark) {
        if mark.len <= self.buf.len() {
            self.buf.truncate(mark.len);
            self.truncated = mark.truncated;
        }
    }
}

impl Default for ScratchBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

/// Longest decimal rendering of an `i64`, sign included.
pub const DECIMAL_LEN: usize = 20;

/// Renders `n` in decimal into `buf` and returns the text, so that a number
/// can be pushed as part of a single unit without allocating.
pub fn decimal(n: i64, buf: &mut [u8; DECIMAL_LEN]) -> &str {
    let mut pos = buf.len();
    let mut v = n.unsigned_abs();
    loop {
        pos -= 1;
        buf[pos] = b'0' + (v % 10) as u8;
        v /= 10;
        if v == 0 {
            break;
        }
    }
    if n < 0 {
        pos -= 1;
        buf[pos] = b'-';
    }
    std::str::from_utf8(&buf[pos..]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_is_all_or_nothing() {
        let mut buf = ScratchBuffer::with_capacity(4);
        assert!(buf.push_str("abc"));
        assert!(!buf.push_str("\\,"));
        assert_eq!(buf.as_str(), "abc");
        assert!(buf.is_truncated());

        // latched: a piece that would fit is still refused
        assert!(!buf.push_str("d"));
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn multibyte_chars_are_never_split() {
        let mut buf = ScratchBuffer::with_capacity(4);
        buf.push_str("ab");
        buf.push_str_lossy("xé");
        assert_eq!(buf.as_str(), "abx");
        assert!(buf.len() <= buf.capacity());
    }

    #[test]
    fn rollback_restores_length_and_state() {
        let mut buf = ScratchBuffer::with_capacity(8);
        buf.push_str("java");
        let mark = buf.mark();
        buf.push_str("/lang/");
        assert!(buf.is_truncated());
        buf.rollback(mark);
        assert_eq!(buf.as_str(), "java");
        assert!(!buf.is_truncated());
        assert!(buf.push_str(".x"));
    }

    #[test]
    fn units_are_never_split() {
        let mut num = [0u8; DECIMAL_LEN];
        let mut buf = ScratchBuffer::with_capacity(10);
        buf.push_str("[tid=");
        assert!(!buf.push_unit(&[decimal(-5000, &mut num), "]"]));
        assert_eq!(buf.as_str(), "[tid=");

        buf.clear();
        buf.push_str("[tid=");
        assert!(buf.push_unit(&[decimal(42, &mut num), "]"]));
        assert_eq!(buf.as_str(), "[tid=42]");
    }

    #[test]
    fn decimal_rendering() {
        let mut num = [0u8; DECIMAL_LEN];
        assert_eq!(decimal(0, &mut num), "0");
        assert_eq!(decimal(1234567, &mut num), "1234567");
        assert_eq!(decimal(-5000, &mut num), "-5000");
        assert_eq!(decimal(i64::MIN, &mut num), "-9223372036854775808");
        assert_eq!(decimal(i64::MAX, &mut num), "9223372036854775807");
    }
}
