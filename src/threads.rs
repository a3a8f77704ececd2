use std::collections::HashMap;

use parking_lot::Mutex;

/// OS thread id as reported in thread marker frames.
pub type Tid = libc::pid_t;

/// Thread names collected during a profiling session.
///
/// Written by whoever observes thread starts, read by every
/// [`FrameName`](crate::FrameName). Each operation holds the lock only for
/// its own duration.
#[derive(Debug, Default)]
pub struct ThreadNameRegistry {
    names: Mutex<HashMap<Tid, String>>,
}

impl ThreadNameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&self, tid: Tid, name: S) -> Option<String> {
        self.names.lock().insert(tid, name.into())
    }

    pub fn remove(&self, tid: Tid) -> Option<String> {
        self.names.lock().remove(&tid)
    }

    pub fn lookup(&self, tid: Tid) -> Option<String> {
        self.names.lock().get(&tid).cloned()
    }

    /// Records `name` for the calling thread and returns its id.
    pub fn register_current<S: Into<String>>(&self, name: S) -> Tid {
        let tid = current_tid();
        self.insert(tid, name);
        tid
    }

    pub fn len(&self) -> usize {
        self.names.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

cfg_if::cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        pub fn current_tid() -> Tid {
            nix::unistd::gettid().as_raw()
        }
    } else {
        pub fn current_tid() -> Tid {
            // no kernel thread id here, use the low bits of the pthread handle
            (unsafe { libc::pthread_self() } as usize & (Tid::MAX as usize)) as Tid
        }
    }
}
