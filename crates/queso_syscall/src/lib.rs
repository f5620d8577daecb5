//! System call interface of the queso kernel.
//!
//! A system call places its number in register `v0` and up to four
//! word-sized arguments in `a0`-`a3`, then traps. The kernel writes a
//! single word back to `v0`. This crate gives that wire format a typed
//! description shared by user programs and by hosts that stand in for
//! the kernel in tests.

#![cfg_attr(not(test), no_std)]

use core::{ffi::CStr, fmt, marker::PhantomData};

use strum::{Display, EnumString, FromRepr};

pub use self::error::SyscallError;

pub mod error;
mod register;
pub mod syscall;

/// Word written to `v0` by every failing system call.
///
/// The wire carries no reason code; success values never collide with
/// the sentinel (identifiers, descriptors, and transfer counts are all
/// non-negative).
pub const SYSCALL_FAILED: isize = -1;

/// Number of argument registers reserved for system calls (`a0`-`a3`).
pub const MAX_SYSCALL_ARGS: usize = 4;

/// Longest string the kernel reads from user space, including the NUL.
pub const MAX_ARG_STRLEN: usize = 256;

/// Most argument strings `exec` accepts.
pub const MAX_EXEC_ARGS: usize = 16;

/// Size of the per-process descriptor table.
pub const OPEN_MAX: usize = 16;

/// Identifies a system call on the trap interface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr, EnumString, Display,
)]
#[strum(serialize_all = "snake_case")]
#[repr(usize)]
pub enum SyscallCode {
    Halt = 0,
    Exit = 1,
    Exec = 2,
    Join = 3,
    Create = 4,
    Open = 5,
    Read = 6,
    Write = 7,
    Close = 8,
    Unlink = 9,
}

/// Associates a system call with its argument and return types.
pub trait Syscall {
    const CODE: SyscallCode;
    type Arg: RegisterValue;
    type Return: RegisterValue;
}

pub type ArgType<S> = <S as Syscall>::Arg;
pub type ReturnType<S> = <S as Syscall>::Return;
pub type ArgTypeRepr<S> = <ArgType<S> as RegisterValue>::Repr;
pub type ReturnTypeRepr<S> = <ReturnType<S> as RegisterValue>::Repr;

/// `N` machine words tagged with the Rust type they encode.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct Register<T, const N: usize> {
    pub a: [usize; N],
    _phantom: PhantomData<T>,
}

/// Conversion between a Rust value and its register representation.
///
/// Encoding is infallible; decoding reports malformed words as typed
/// errors so the receiving side can reject them deliberately.
pub trait RegisterValue: Sized {
    type DecodeError: fmt::Debug;
    type Repr;

    fn encode(self) -> Self::Repr;
    fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError>;
}

/// Malformed register contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegisterDecodeError {
    #[error("integer out of range")]
    IntConversion(#[from] core::num::TryFromIntError),
    #[error("invalid error number: {0}")]
    InvalidErrorNumber(isize),
    #[error("invalid join outcome: {0}")]
    InvalidJoinOutcome(isize),
    #[error("unexpected return value: {0}")]
    UnexpectedReturnValue(usize),
}

impl From<core::convert::Infallible> for RegisterDecodeError {
    fn from(never: core::convert::Infallible) -> Self {
        match never {}
    }
}

/// Outcome of a successful `join`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[repr(isize)]
#[must_use]
pub enum JoinOutcome {
    /// The child died on an unhandled exception; no status was stored.
    Faulted = 0,
    /// The child exited normally and its status was stored through the
    /// caller's pointer.
    Exited = 1,
}

/// Address of a NUL-terminated string in the calling process.
///
/// `repr(transparent)` over the address word, so a slice of these is
/// laid out exactly like the argument array `exec` expects.
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
#[must_use]
pub struct UserCStr {
    addr: usize,
}

impl UserCStr {
    pub fn new(s: &CStr) -> Self {
        Self {
            addr: s.as_ptr() as usize,
        }
    }

    pub const fn from_addr(addr: usize) -> Self {
        Self { addr }
    }

    #[must_use]
    pub const fn addr(self) -> usize {
        self.addr
    }
}

/// Address of a `T` the kernel writes through.
#[must_use]
pub struct UserMutRef<T> {
    addr: usize,
    _phantom: PhantomData<T>,
}

impl<T> UserMutRef<T> {
    pub fn new(value: &mut T) -> Self {
        Self {
            addr: core::ptr::from_mut(value) as usize,
            _phantom: PhantomData,
        }
    }

    pub const fn from_addr(addr: usize) -> Self {
        Self {
            addr,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub const fn addr(&self) -> usize {
        self.addr
    }
}

impl<T> fmt::Debug for UserMutRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserMutRef<{}>({:#x})", core::any::type_name::<T>(), self.addr)
    }
}

/// Buffer the kernel reads from, encoded as `(address, length)`.
#[must_use]
pub struct UserSlice<T> {
    addr: usize,
    len: usize,
    _phantom: PhantomData<T>,
}

impl<T> UserSlice<T> {
    pub fn new(values: &[T]) -> Self {
        Self {
            addr: values.as_ptr() as usize,
            len: values.len(),
            _phantom: PhantomData,
        }
    }

    pub const fn from_raw_parts(addr: usize, len: usize) -> Self {
        Self {
            addr,
            len,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub const fn addr(&self) -> usize {
        self.addr
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Buffer the kernel writes into, encoded as `(address, length)`.
#[must_use]
pub struct UserMutSlice<T> {
    addr: usize,
    len: usize,
    _phantom: PhantomData<T>,
}

impl<T> UserMutSlice<T> {
    pub fn new(values: &mut [T]) -> Self {
        Self {
            addr: values.as_mut_ptr() as usize,
            len: values.len(),
            _phantom: PhantomData,
        }
    }

    pub const fn from_raw_parts(addr: usize, len: usize) -> Self {
        Self {
            addr,
            len,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub const fn addr(&self) -> usize {
        self.addr
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Argument array for `exec`, encoded as `(count, base address)`.
///
/// The count register comes first because the kernel reads the argument
/// count before the array base.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct UserCStrArray {
    addr: usize,
    len: usize,
}

impl UserCStrArray {
    pub fn new(args: &[UserCStr]) -> Self {
        Self {
            addr: args.as_ptr() as usize,
            len: args.len(),
        }
    }

    pub const fn from_raw_parts(addr: usize, len: usize) -> Self {
        Self { addr, len }
    }

    #[must_use]
    pub const fn addr(self) -> usize {
        self.addr
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}
