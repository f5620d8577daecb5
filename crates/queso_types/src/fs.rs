//! File system types.

use core::fmt;

/// Raw file descriptor.
///
/// Descriptors index a small per-process table. Descriptors 0 and 1 are
/// open on the console before a program starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[must_use]
pub struct RawFd(usize);

impl RawFd {
    pub const fn new(fd: usize) -> Self {
        Self(fd)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for RawFd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
