//! Decoder for JVM type and method descriptors.
//!
//! Descriptors such as `(ILjava/lang/String;)V` are turned into display text
//! like `(int, java.lang.String) void`. Characters that renderers use as
//! delimiters (`,`, `\`, `(`, `)`) are escaped with a backslash wherever they
//! occur inside a class or method name.

use crate::buffer::ScratchBuffer;
use crate::Style;

/// Emitted for a type code the grammar does not know.
pub const INVALID_TYPE: &str = "<?>";

pub fn primitive_name(code: u8) -> Option<&'static str> {
    match code {
        b'B' => Some("byte"),
        b'C' => Some("char"),
        b'D' => Some("double"),
        b'F' => Some("float"),
        b'I' => Some("int"),
        b'J' => Some("long"),
        b'S' => Some("short"),
        b'V' => Some("void"),
        b'Z' => Some("boolean"),
        _ => None,
    }
}

// Descriptors coming from the VM may carry a trailing NUL.
fn terminated(s: &str) -> &str {
    s.split('\0').next().unwrap_or_default()
}

/// Appends the display form of a type or method descriptor to `out`.
///
/// Malformed input never fails: unknown codes produce [`INVALID_TYPE`] and
/// the scan continues with the next character.
pub fn decode(descriptor: &str, style: Style, out: &mut ScratchBuffer) {
    let sig = terminated(descriptor);
    let bytes = sig.as_bytes();
    let mut pos = 0;
    let mut dims = 0;
    let mut in_args = false;

    while pos < bytes.len() {
        match bytes[pos] {
            b'[' => {
                dims += 1;
                pos += 1;
                continue;
            }
            b'(' => {
                out.push_str("(");
                in_args = true;
                pos += 1;
                continue;
            }
            b')' => {
                out.push_str(") ");
                in_args = false;
                pos += 1;
                continue;
            }
            b'L' => {
                let end = sig[pos + 1..]
                    .find(';')
                    .map_or(bytes.len(), |i| pos + 1 + i);
                write_qualifier(&sig[pos + 1..end], style, out);
                pos = (end + 1).min(bytes.len());
            }
            code => {
                out.push_str(primitive_name(code).unwrap_or(INVALID_TYPE));
                pos += sig[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }

        push_dims(dims, out);
        dims = 0;

        if in_args && pos < bytes.len() && bytes[pos] != b')' {
            out.push_str(", ");
        }
    }
}

/// Appends a class name in the VM's internal form, as found in symbol
/// bodies: `java/lang/String`, `[I` or `[[Ljava/lang/Object;`.
pub fn decode_class_name(body: &str, style: Style, out: &mut ScratchBuffer) {
    let body = terminated(body);
    let dims = body.bytes().take_while(|&b| b == b'[').count();
    let rest = &body[dims..];

    if dims > 0 && rest.starts_with('L') {
        let name = rest[1..].split(';').next().unwrap_or_default();
        write_qualifier(name, style, out);
    } else if dims > 0 && rest.len() == 1 {
        let name = primitive_name(rest.as_bytes()[0]).unwrap_or(INVALID_TYPE);
        out.push_str(name);
    } else {
        write_qualifier(rest, style, out);
    }

    push_dims(dims, out);
}

/// Appends free text such as a method name, escaped like a class name but
/// without any separator rewriting.
pub fn write_escaped(text: &str, out: &mut ScratchBuffer) {
    write_qualifier(terminated(text), Style::empty(), out);
}

fn write_qualifier(name: &str, style: Style, out: &mut ScratchBuffer) {
    let start = out.mark();
    for c in name.chars() {
        match c {
            ',' => out.push_str("\\,"),
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '/' if style.contains(Style::SIMPLE) => {
                out.rollback(start);
                true
            }
            '/' if style.contains(Style::DOTTED) => out.push_char('.'),
            c => out.push_char(c),
        };
    }
}

fn push_dims(dims: usize, out: &mut ScratchBuffer) {
    for _ in 0..dims {
        out.push_str("[]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(descriptor: &str, style: Style) -> String {
        let mut out = ScratchBuffer::default();
        decode(descriptor, style, &mut out);
        out.as_str().to_owned()
    }

    fn class(body: &str, style: Style) -> String {
        let mut out = ScratchBuffer::default();
        decode_class_name(body, style, &mut out);
        out.as_str().to_owned()
    }

    #[test]
    fn primitives() {
        let expected = [
            ("B", "byte"),
            ("C", "char"),
            ("D", "double"),
            ("F", "float"),
            ("I", "int"),
            ("J", "long"),
            ("S", "short"),
            ("V", "void"),
            ("Z", "boolean"),
        ];
        for (code, name) in expected {
            assert_eq!(run(code, Style::empty()), name);
        }
        assert_eq!(run("Q", Style::empty()), INVALID_TYPE);
    }

    #[test]
    fn array_dimensions() {
        assert_eq!(run("[I", Style::empty()), "int[]");
        assert_eq!(run("[[[J", Style::empty()), "long[][][]");
        assert_eq!(
            run("[[Ljava/lang/Object;", Style::DOTTED),
            "java.lang.Object[][]"
        );
    }

    #[test]
    fn qualifier_styles() {
        assert_eq!(run("Ljava/lang/String;", Style::DOTTED), "java.lang.String");
        assert_eq!(run("Ljava/lang/String;", Style::SIMPLE), "String");
        assert_eq!(run("Ljava/lang/String;", Style::empty()), "java/lang/String");
        assert_eq!(
            run("Ljava/lang/String;", Style::SIMPLE | Style::DOTTED),
            "String"
        );
    }

    #[test]
    fn method_descriptor() {
        assert_eq!(
            run("(ILjava/lang/String;)V", Style::DOTTED),
            "(int, java.lang.String) void"
        );
        assert_eq!(run("()V", Style::empty()), "() void");
        assert_eq!(
            run("([BIZ)[Ljava/util/List;", Style::SIMPLE),
            "(byte[], int, boolean) List[]"
        );
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(run("La,b\\c(d)e;", Style::empty()), "a\\,b\\\\c\\(d\\)e");
        assert_eq!(run("Lpkg/x,y/Foo(1);", Style::SIMPLE), "Foo\\(1\\)");

        let mut out = ScratchBuffer::default();
        write_escaped("lambda$run(0)", &mut out);
        assert_eq!(out.as_str(), "lambda$run\\(0\\)");
    }

    #[test]
    fn malformed_input_terminates() {
        assert_eq!(run("", Style::empty()), "");
        assert_eq!(run("(I", Style::empty()), "(int");
        assert_eq!(run("Ljava/lang/String", Style::DOTTED), "java.lang.String");
        assert_eq!(run("(Xé)V", Style::empty()), "(<?>, <?>) void");
        assert_eq!(run("[", Style::empty()), "");
        assert_eq!(run("I\0J", Style::empty()), "int");
    }

    #[test]
    fn truncation_never_splits_escapes() {
        let mut out = ScratchBuffer::with_capacity(4);
        decode("Labc,def;", Style::empty(), &mut out);
        assert_eq!(out.as_str(), "abc");
        assert!(out.is_truncated());

        let mut out = ScratchBuffer::with_capacity(16);
        decode("(ILjava/lang/String;)V", Style::DOTTED, &mut out);
        assert!(out.len() <= 16);
        assert_eq!(out.as_str(), "(int, java.lang.");
    }

    #[test]
    fn class_names_from_symbols() {
        assert_eq!(class("java/lang/String", Style::DOTTED), "java.lang.String");
        assert_eq!(class("[I", Style::DOTTED), "int[]");
        assert_eq!(
            class("[[Ljava/lang/Object;", Style::DOTTED | Style::SIMPLE),
            "Object[][]"
        );
        assert_eq!(class("", Style::DOTTED), "");
    }
}
