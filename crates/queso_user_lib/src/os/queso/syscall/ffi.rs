//! Raw system call plumbing.
//!
//! Arguments are encoded into `a0`-`a3`, the call number goes to `v0`,
//! and the kernel's reply comes back in `v0`. On targets other than the
//! machine the trap either routes to the hosted test handler or is
//! unavailable.

pub use queso_syscall::{SyscallCode, syscall};
use queso_syscall::{ArgTypeRepr, MAX_SYSCALL_ARGS, Register, RegisterValue, ReturnTypeRepr, Syscall};

#[cfg(target_arch = "mips")]
fn trap(code: SyscallCode, args: [usize; MAX_SYSCALL_ARGS]) -> usize {
    let [a0, a1, a2, a3] = args;
    let v0: usize;
    unsafe {
        // $2 = v0, $4-$7 = a0-a3
        core::arch::asm!(
            "syscall",
            inlateout("$2") code as usize => v0,
            in("$4") a0,
            in("$5") a1,
            in("$6") a2,
            in("$7") a3,
        );
    }
    v0
}

#[cfg(all(not(target_arch = "mips"), feature = "test"))]
fn trap(code: SyscallCode, args: [usize; MAX_SYSCALL_ARGS]) -> usize {
    crate::os::queso::hosted::dispatch(code, args)
}

#[cfg(all(not(target_arch = "mips"), not(feature = "test")))]
fn trap(_code: SyscallCode, _args: [usize; MAX_SYSCALL_ARGS]) -> usize {
    unimplemented!()
}

trait IntoRawArgs {
    fn into_raw_args(self) -> [usize; MAX_SYSCALL_ARGS];
}

impl<T, const N: usize> IntoRawArgs for Register<T, N> {
    fn into_raw_args(self) -> [usize; MAX_SYSCALL_ARGS] {
        const {
            assert!(N <= MAX_SYSCALL_ARGS);
        }
        let mut raw = [0; MAX_SYSCALL_ARGS];
        raw[..N].copy_from_slice(&self.a);
        raw
    }
}

trait FromRawReturn {
    fn from_raw(v0: usize) -> Self;
}

impl<T> FromRawReturn for Register<T, 0> {
    fn from_raw(_v0: usize) -> Self {
        Self::new([])
    }
}

impl<T> FromRawReturn for Register<T, 1> {
    fn from_raw(v0: usize) -> Self {
        Self::new([v0])
    }
}

pub trait SyscallExt: Syscall {
    /// Encodes `arg`, issues the trap, and returns the raw reply.
    fn call_raw(arg: Self::Arg) -> ReturnTypeRepr<Self>;

    fn try_call(
        arg: Self::Arg,
    ) -> Result<Self::Return, <Self::Return as RegisterValue>::DecodeError> {
        let ret = Self::call_raw(arg);
        Self::Return::try_decode(ret)
    }

    /// Issues the call, panicking if the kernel's reply is malformed.
    fn call(arg: Self::Arg) -> Self::Return {
        match Self::try_call(arg) {
            Ok(ret) => ret,
            Err(e) => panic!("kernel returned an invalid {} value: {e:?}", Self::CODE),
        }
    }
}

impl<S> SyscallExt for S
where
    S: Syscall,
    ArgTypeRepr<S>: IntoRawArgs,
    ReturnTypeRepr<S>: FromRawReturn,
{
    fn call_raw(arg: Self::Arg) -> ReturnTypeRepr<Self> {
        let raw = trap(Self::CODE, arg.encode().into_raw_args());
        FromRawReturn::from_raw(raw)
    }
}
