use std::collections::HashMap;
use std::sync::Arc;

use frame_name::frames::{BCI_NATIVE_FRAME, BCI_SYMBOL, BCI_THREAD_ID};
use frame_name::{
    ClassId, FrameNameBuilder, IntrospectionError, Introspector, LineTable, MethodId, MethodInfo,
    Style, SymbolId, ThreadNameRegistry,
};

struct Vm {
    strings: HashMap<u64, &'static str>,
}

impl Introspector for Vm {
    fn method_name(&self, method: MethodId) -> Result<MethodInfo, IntrospectionError> {
        match method.0 {
            1 => Ok(MethodInfo {
                name: "main".into(),
                signature: "([Ljava/lang/String;)V".into(),
            }),
            _ => Err(IntrospectionError(23)),
        }
    }

    fn declaring_class(&self, _method: MethodId) -> Result<ClassId, IntrospectionError> {
        Ok(ClassId(1))
    }

    fn class_signature(&self, _class: ClassId) -> Result<String, IntrospectionError> {
        Ok("Lcom/example/App;".into())
    }

    fn source_file_name(&self, _class: ClassId) -> Result<String, IntrospectionError> {
        Ok("App.java".into())
    }

    fn line_number_table(&self, _method: MethodId) -> Result<LineTable, IntrospectionError> {
        Ok([(0, 7), (6, 8)].into_iter().collect())
    }

    fn symbol_body(&self, symbol: SymbolId) -> Option<&[u8]> {
        self.strings.get(&symbol.0).map(|s| s.as_bytes())
    }

    fn native_name(&self, handle: u64) -> Option<&str> {
        self.strings.get(&handle).copied()
    }

    fn error_text(&self, handle: u64) -> Option<&str> {
        self.strings.get(&handle).copied()
    }
}

fn main() {
    pretty_env_logger::init();

    let style: Style = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("dot,sig")
        .parse()
        .unwrap();

    let threads = Arc::new(ThreadNameRegistry::new());
    let tid = threads.register_current("main");

    let vm = Vm {
        strings: [(0x10, "_ZN7MyClass6methodEi"), (0x20, "java/lang/String")]
            .into_iter()
            .collect(),
    };
    let mut names = FrameNameBuilder::default()
        .style(style)
        .line_numbers(true)
        .thread_names(threads)
        .build(vm);

    let stack = [
        (0x10, BCI_NATIVE_FRAME),
        (0x20, BCI_SYMBOL),
        (1, 6),
        (2, 0),
        (tid as u64, BCI_THREAD_ID),
    ];
    for (handle, bci) in stack {
        println!("{}", names.format_raw(handle, bci));
    }
}
