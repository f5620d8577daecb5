//! Marker types for each system call.

use core::convert::Infallible;

use queso_types::{fs::RawFd, process::ProcId};

use crate::{
    JoinOutcome, Syscall, SyscallCode, UserCStr, UserCStrArray, UserMutRef, UserMutSlice,
    UserSlice, error::SyscallError,
};

macro_rules! syscall {
    ($( struct $name:ident (fn($($arg:ty),* $(,)?) -> $ret:ty ) ;) *) => {
        $(
            pub struct $name {}

            impl Syscall for $name {
                type Arg = ( $($arg ,)* );
                type Return = $ret;

                const CODE: SyscallCode = SyscallCode::$name;
            }
        )*
    };
}

syscall! {
    struct Halt(fn() -> Result<Infallible, SyscallError>);
    struct Exit(fn(i32) -> Infallible);
    struct Exec(fn(UserCStr, UserCStrArray) -> Result<ProcId, SyscallError>);
    struct Join(fn(ProcId, UserMutRef<i32>) -> Result<JoinOutcome, SyscallError>);
    struct Create(fn(UserCStr) -> Result<RawFd, SyscallError>);
    struct Open(fn(UserCStr) -> Result<RawFd, SyscallError>);
    struct Read(fn(RawFd, UserMutSlice<u8>) -> Result<usize, SyscallError>);
    struct Write(fn(RawFd, UserSlice<u8>) -> Result<usize, SyscallError>);
    struct Close(fn(RawFd) -> Result<(), SyscallError>);
    struct Unlink(fn(UserCStr) -> Result<(), SyscallError>);
}
