use strum::FromRepr;

/// Failure reported by the kernel.
///
/// The trap interface carries no reason code; every failing call writes
/// the same sentinel to `v0`. Libraries name the failure by the
/// operation that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, thiserror::Error)]
#[repr(isize)]
pub enum SyscallError {
    #[error("system call failed")]
    Failed = -1,
}
