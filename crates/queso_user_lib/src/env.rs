//! Program arguments.
//!
//! The kernel places `argc`/`argv` in the first two argument registers
//! when a process starts; the runtime records them here before `main`
//! runs.

use core::ffi::{CStr, c_char};

#[cfg(not(feature = "test"))]
mod store {
    use core::sync::atomic::{AtomicUsize, Ordering};

    static ARGC: AtomicUsize = AtomicUsize::new(0);
    static ARGV: AtomicUsize = AtomicUsize::new(0);

    pub(super) fn set(argc: usize, argv: usize) {
        ARGC.store(argc, Ordering::Relaxed);
        ARGV.store(argv, Ordering::Relaxed);
    }

    pub(super) fn get() -> (usize, usize) {
        (ARGC.load(Ordering::Relaxed), ARGV.load(Ordering::Relaxed))
    }
}

// Host tests run in parallel threads; give each its own argument vector.
#[cfg(feature = "test")]
mod store {
    use core::cell::Cell;

    std::thread_local! {
        static ARGS: Cell<(usize, usize)> = const { Cell::new((0, 0)) };
    }

    pub(super) fn set(argc: usize, argv: usize) {
        ARGS.with(|a| a.set((argc, argv)));
    }

    pub(super) fn get() -> (usize, usize) {
        ARGS.with(Cell::get)
    }
}

/// Records the argument vector for this process.
///
/// # Safety
///
/// `argv` must point to `argc` pointers to NUL-terminated strings, all
/// valid for the rest of the process's life.
pub(crate) unsafe fn set_args(argc: usize, argv: *const *const c_char) {
    store::set(argc, argv as usize);
}

/// Program name (argv\[0\]) as a C string.
pub fn arg0_cstr() -> Option<&'static CStr> {
    let (argc, argv) = store::get();
    if argc == 0 || argv == 0 {
        return None;
    }
    let ptr = unsafe { (argv as *const *const c_char).read() };
    Some(unsafe { CStr::from_ptr(ptr) })
}

/// Program name for diagnostics.
#[must_use]
pub fn arg0() -> &'static str {
    arg0_cstr()
        .and_then(|s| s.to_str().ok())
        .unwrap_or("<unknown>")
}

/// Arguments following the program name, as C strings.
#[must_use]
pub fn args_cstr() -> ArgsCStr {
    let (argc, argv) = store::get();
    ArgsCStr {
        base: argv as *const *const c_char,
        idx: 1,
        len: argc,
    }
}

/// Arguments following the program name; entries that are not valid
/// UTF-8 are skipped.
#[must_use]
pub fn args() -> Args {
    Args { inner: args_cstr() }
}

pub struct ArgsCStr {
    base: *const *const c_char,
    idx: usize,
    len: usize,
}

impl Iterator for ArgsCStr {
    type Item = &'static CStr;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.len {
            return None;
        }
        let ptr = unsafe { self.base.add(self.idx).read() };
        self.idx += 1;
        Some(unsafe { CStr::from_ptr(ptr) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.len - self.idx.min(self.len);
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for ArgsCStr {}

pub struct Args {
    inner: ArgsCStr,
}

impl Args {
    /// Number of raw arguments left, counting ones `next` would skip.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Iterator for Args {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let arg = self.inner.next()?;
            if let Ok(s) = arg.to_str() {
                return Some(s);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::os::queso::hosted;

    #[test]
    fn test_args_skip_program_name() {
        hosted::set_args(&["prog", "first", "second"]);
        assert_eq!(arg0(), "prog");
        assert_eq!(
            arg0_cstr().and_then(|s| s.to_str().ok()),
            Some("prog")
        );
        let collected: std::vec::Vec<_> = args().collect();
        assert_eq!(collected, ["first", "second"]);
        assert_eq!(args_cstr().len(), 2);
    }

    #[test]
    fn test_no_arguments_staged() {
        assert_eq!(arg0(), "<unknown>");
        assert!(arg0_cstr().is_none());
        assert!(args().next().is_none());
        assert_eq!(args_cstr().len(), 0);
    }

    #[test]
    fn test_program_name_only() {
        hosted::set_args(&["prog"]);
        assert_eq!(arg0(), "prog");
        assert!(args().next().is_none());
        assert!(args().is_empty());
    }

    #[test]
    fn test_invalid_utf8_arguments_skipped() {
        use std::{boxed::Box, ffi::CString, vec, vec::Vec};

        let strings = vec![
            CString::new("prog").unwrap(),
            CString::new(vec![0xFF, 0xFE]).unwrap(),
            CString::new("ok").unwrap(),
        ];
        let strings = Box::leak(strings.into_boxed_slice());
        let ptrs: Vec<*const c_char> = strings.iter().map(|s| s.as_ptr()).collect();
        let argv = Box::leak(ptrs.into_boxed_slice());
        unsafe { set_args(argv.len(), argv.as_ptr()) };

        let collected: Vec<_> = args().collect();
        assert_eq!(collected, ["ok"]);
        // the raw view still sees both
        assert_eq!(args_cstr().count(), 2);
    }
}
