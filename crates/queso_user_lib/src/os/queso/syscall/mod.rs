//! Safe wrappers around the queso system calls.
//!
//! Each wrapper encodes its arguments, issues the trap, and names the
//! kernel's bare failure sentinel after the operation that produced it.

use core::{convert::Infallible, ffi::CStr};

use arrayvec::ArrayVec;
use queso_syscall::{
    MAX_EXEC_ARGS, SyscallError, UserCStr, UserCStrArray, UserMutRef, UserMutSlice, UserSlice,
};
pub use queso_syscall::JoinOutcome;
use queso_types::{fs::RawFd, process::ProcId};

use self::ffi::SyscallExt as _;
use crate::{
    error::QuesoError,
    os::fd::{AsRawFd as _, BorrowedFd, FromRawFd as _, OwnedFd},
};

pub mod ffi;

/// Stops the machine.
///
/// Only the first process on the machine may do this; for anyone else
/// the call fails and execution continues.
pub fn halt() -> Result<Infallible, QuesoError> {
    ffi::syscall::Halt::call(()).map_err(|SyscallError::Failed| QuesoError::HaltDenied)
}

/// Terminates the calling process with `status`.
pub fn exit(status: i32) -> ! {
    match ffi::syscall::Exit::call((status,)) {}
}

/// Launches the program `name` with the given argument vector and
/// returns the new process identifier without waiting for it.
pub fn exec(name: &CStr, args: &[&CStr]) -> Result<ProcId, QuesoError> {
    if args.len() > MAX_EXEC_ARGS {
        return Err(QuesoError::ArgumentListTooLong);
    }
    let argv: ArrayVec<UserCStr, MAX_EXEC_ARGS> = args.iter().map(|s| UserCStr::new(s)).collect();
    ffi::syscall::Exec::call((UserCStr::new(name), UserCStrArray::new(&argv)))
        .map_err(|SyscallError::Failed| QuesoError::ExecFailed)
}

/// Waits for the child `pid` to exit.
///
/// On a normal exit the child's status is stored in `status`; when the
/// child died on an unhandled exception `status` is left untouched.
/// Fails without blocking if `pid` is not an unjoined child of the
/// caller.
pub fn join(pid: ProcId, status: &mut i32) -> Result<JoinOutcome, QuesoError> {
    ffi::syscall::Join::call((pid, UserMutRef::new(status)))
        .map_err(|SyscallError::Failed| QuesoError::NotAChild)
}

/// Creates (or truncates) the named file and opens it.
pub fn create(name: &CStr) -> Result<OwnedFd, QuesoError> {
    let fd = ffi::syscall::Create::call((UserCStr::new(name),))
        .map_err(|SyscallError::Failed| QuesoError::CreateFailed)?;
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}

/// Opens the named file for reading and writing.
pub fn open(name: &CStr) -> Result<OwnedFd, QuesoError> {
    let fd = ffi::syscall::Open::call((UserCStr::new(name),))
        .map_err(|SyscallError::Failed| QuesoError::OpenFailed)?;
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}

/// Reads up to `buf.len()` bytes from `fd`. A return of zero means end
/// of file.
pub fn read(fd: BorrowedFd<'_>, buf: &mut [u8]) -> Result<usize, QuesoError> {
    ffi::syscall::Read::call((fd.as_raw_fd(), UserMutSlice::new(buf)))
        .map_err(|SyscallError::Failed| QuesoError::Io)
}

/// Writes `buf` to `fd`, returning how many bytes were accepted.
pub fn write(fd: BorrowedFd<'_>, buf: &[u8]) -> Result<usize, QuesoError> {
    ffi::syscall::Write::call((fd.as_raw_fd(), UserSlice::new(buf)))
        .map_err(|SyscallError::Failed| QuesoError::Io)
}

/// Closes `fd`.
///
/// # Safety
///
/// `fd` must not be used after this call.
pub unsafe fn close(fd: RawFd) -> Result<(), QuesoError> {
    ffi::syscall::Close::call((fd,)).map_err(|SyscallError::Failed| QuesoError::Io)
}

/// Removes the named file.
pub fn unlink(name: &CStr) -> Result<(), QuesoError> {
    ffi::syscall::Unlink::call((UserCStr::new(name),))
        .map_err(|SyscallError::Failed| QuesoError::UnlinkFailed)
}
