//! In-process kernel stand-in for host-side tests.
//!
//! With the `test` feature enabled, the trap layer hands every system
//! call to a handler installed on the current thread, so library code
//! can run under `cargo test` with no machine underneath. Handlers see
//! the raw register values and answer with a raw `v0`; the helpers in
//! this module poke through the address arguments the way the kernel
//! would.

use core::ffi::{CStr, c_char};
use std::{boxed::Box, cell::RefCell, ffi::CString, string::String, vec::Vec};

use queso_syscall::{MAX_SYSCALL_ARGS, SyscallCode};

/// Receives every system call trapped on the thread it is installed on.
///
/// The handler slot stays borrowed while a call is being handled, so a
/// handler must not issue system calls of its own.
pub trait SyscallHandler {
    fn syscall(&mut self, code: SyscallCode, args: &[usize]) -> isize;
}

impl<F> SyscallHandler for F
where
    F: FnMut(SyscallCode, &[usize]) -> isize,
{
    fn syscall(&mut self, code: SyscallCode, args: &[usize]) -> isize {
        self(code, args)
    }
}

std::thread_local! {
    static HANDLER: RefCell<Option<Box<dyn SyscallHandler>>> = const { RefCell::new(None) };
}

/// Installs `handler` as the current thread's kernel until the returned
/// guard is dropped.
///
/// # Panics
///
/// Panics if a handler is already installed on this thread.
#[must_use = "the handler is removed when the guard is dropped"]
pub fn install<H>(handler: H) -> HandlerGuard
where
    H: SyscallHandler + 'static,
{
    HANDLER.with(|slot| {
        let mut slot = slot.borrow_mut();
        assert!(
            slot.is_none(),
            "a syscall handler is already installed on this thread"
        );
        *slot = Some(Box::new(handler));
    });
    HandlerGuard {}
}

/// Removes the thread's syscall handler when dropped.
#[derive(Debug)]
pub struct HandlerGuard {}

impl Drop for HandlerGuard {
    fn drop(&mut self) {
        HANDLER.with(|slot| slot.borrow_mut().take());
    }
}

pub(crate) fn dispatch(code: SyscallCode, args: [usize; MAX_SYSCALL_ARGS]) -> usize {
    HANDLER
        .with(|slot| {
            let mut slot = slot.borrow_mut();
            let Some(handler) = slot.as_mut() else {
                panic!("no syscall handler installed for {code}");
            };
            handler.syscall(code, &args)
        })
        .cast_unsigned()
}

/// Reads the NUL-terminated string a call argument points at.
///
/// # Safety
///
/// `addr` must be a string address from the call currently being
/// handled.
#[must_use]
pub unsafe fn cstr_at(addr: usize) -> String {
    let s = unsafe { CStr::from_ptr(addr as *const c_char) };
    String::from_utf8_lossy(s.to_bytes()).into_owned()
}

/// Reads an `argc`/`argv` pair the way the kernel loader would.
///
/// # Safety
///
/// `argv` must point at `argc` string addresses from the call currently
/// being handled.
#[must_use]
pub unsafe fn args_at(argc: usize, argv: usize) -> Vec<String> {
    let ptrs = unsafe { std::slice::from_raw_parts(argv as *const usize, argc) };
    ptrs.iter().map(|&p| unsafe { cstr_at(p) }).collect()
}

/// Stores an exit status through the pointer argument of a `join` call.
///
/// # Safety
///
/// `addr` must be the status pointer of the call currently being
/// handled.
pub unsafe fn store_i32(addr: usize, value: i32) {
    unsafe { (addr as *mut i32).write(value) }
}

/// Copies `data` into the caller's read buffer, returning how many
/// bytes fit.
///
/// # Safety
///
/// `addr` and `len` must be the buffer arguments of the call currently
/// being handled.
pub unsafe fn fill_buf(addr: usize, len: usize, data: &[u8]) -> usize {
    let n = len.min(data.len());
    unsafe { (addr as *mut u8).copy_from_nonoverlapping(data.as_ptr(), n) }
    n
}

/// Copies the caller's write buffer out.
///
/// # Safety
///
/// `addr` and `len` must be the buffer arguments of the call currently
/// being handled.
#[must_use]
pub unsafe fn bytes_at(addr: usize, len: usize) -> Vec<u8> {
    unsafe { std::slice::from_raw_parts(addr as *const u8, len) }.to_vec()
}

/// Stages an argument vector for the current thread, as process start
/// would. The strings are leaked; tests stage a handful of short
/// arguments.
pub fn set_args(args: &[&str]) {
    let ptrs: Vec<*const c_char> = args
        .iter()
        .map(|s| {
            let s = CString::new(*s).expect("argument must not contain NUL");
            Box::leak(s.into_boxed_c_str()).as_ptr()
        })
        .collect();
    let ptrs = Box::leak(ptrs.into_boxed_slice());
    unsafe { crate::env::set_args(ptrs.len(), ptrs.as_ptr()) }
}
