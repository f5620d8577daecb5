//! Owned and borrowed file descriptors.

use core::{fmt, marker::PhantomData};

pub use queso_types::fs::RawFd;

use super::queso::syscall;

/// File descriptor that is closed when dropped.
pub struct OwnedFd {
    fd: RawFd,
}

impl Drop for OwnedFd {
    fn drop(&mut self) {
        // nothing useful to do with a close failure here
        let _ = unsafe { syscall::close(self.fd) };
    }
}

impl fmt::Debug for OwnedFd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedFd").field("fd", &self.fd).finish()
    }
}

/// Borrowed view of a file descriptor.
#[derive(Clone, Copy)]
pub struct BorrowedFd<'fd> {
    fd: RawFd,
    _phantom: PhantomData<&'fd OwnedFd>,
}

impl fmt::Debug for BorrowedFd<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BorrowedFd").field("fd", &self.fd).finish()
    }
}

impl BorrowedFd<'_> {
    /// # Safety
    ///
    /// `fd` must stay open for the duration of the returned lifetime.
    pub const unsafe fn borrow_raw(fd: RawFd) -> Self {
        Self {
            fd,
            _phantom: PhantomData,
        }
    }
}

pub trait AsFd {
    fn as_fd(&self) -> BorrowedFd<'_>;
}

impl AsFd for OwnedFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        BorrowedFd {
            fd: self.fd,
            _phantom: PhantomData,
        }
    }
}

impl AsFd for BorrowedFd<'_> {
    fn as_fd(&self) -> BorrowedFd<'_> {
        *self
    }
}

pub trait AsRawFd {
    fn as_raw_fd(&self) -> RawFd;
}

impl AsRawFd for OwnedFd {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl AsRawFd for BorrowedFd<'_> {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl AsRawFd for RawFd {
    fn as_raw_fd(&self) -> RawFd {
        *self
    }
}

pub trait FromRawFd {
    /// # Safety
    ///
    /// `fd` must be an open descriptor owned by nothing else; the new
    /// value takes over closing it.
    unsafe fn from_raw_fd(fd: RawFd) -> Self;
}

impl FromRawFd for OwnedFd {
    unsafe fn from_raw_fd(fd: RawFd) -> Self {
        Self { fd }
    }
}
