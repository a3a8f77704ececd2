use crate::buffer::{decimal, ScratchBuffer, DECIMAL_LEN};
use crate::introspect::{Introspector, MethodId};
use crate::signature;
use crate::{Error, Result};

/// Source file and line of `bci` within `method`.
pub fn source_line<I: Introspector + ?Sized>(
    vm: &I,
    method: MethodId,
    bci: i32,
) -> Result<(String, u32)> {
    let class = vm.declaring_class(method)?;
    let file = vm.source_file_name(class)?;
    let table = vm.line_number_table(method)?;
    let line = table.line_for(bci).ok_or(Error::NoLineInfo(bci))?;
    Ok((file, line))
}

/// Appends ` [File.java:42]` to `name` when the line of `bci` is known.
///
/// Lookup failures are logged and leave `name` as it is. The suffix is
/// written whole or not at all.
pub fn enrich<'a, I: Introspector + ?Sized>(
    vm: &I,
    name: &'a str,
    method: MethodId,
    bci: i32,
    out: &'a mut ScratchBuffer,
) -> &'a str {
    let (file, line) = match source_line(vm, method, bci) {
        Ok(location) => location,
        Err(err) => {
            log::debug!("no source line for {} at bci {}: {}", name, bci, err);
            return name;
        }
    };

    out.clear();
    out.push_str_lossy(name);
    let mark = out.mark();
    out.push_str(" [");
    signature::write_escaped(&file, out);
    let mut num = [0u8; DECIMAL_LEN];
    out.push_unit(&[":", decimal(line.into(), &mut num), "]"]);
    if out.is_truncated() {
        out.rollback(mark);
    }
    out.as_str()
}
