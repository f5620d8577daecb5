//! Launching and joining child processes.
//!
//! `exec` on queso is spawn-like: it loads a program, hands it an
//! argument vector, and returns the child's pid without waiting. The
//! handle returned by [`spawn`] must be joined to observe how the child
//! ended; the kernel disowns a child once joined, so [`Child::join`]
//! consumes the handle.

use core::{ffi::CStr, fmt};

use arrayvec::ArrayVec;
use queso_syscall::{JoinOutcome, MAX_EXEC_ARGS};
use queso_types::process::ProcId;

pub use crate::os::queso::syscall::{exit, halt};
use crate::{error::QuesoError, os::queso::syscall};

/// How a joined child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    code: Option<i32>,
}

impl ExitStatus {
    /// `true` when the child exited normally with status 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// The status of a normal exit, or `None` when the child died on an
    /// unhandled exception.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    #[must_use]
    pub fn unhandled_exception(&self) -> bool {
        self.code.is_none()
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "unhandled exception"),
        }
    }
}

/// A running child process.
#[must_use = "a child is joinable exactly once and should be joined"]
#[derive(Debug)]
pub struct Child {
    pid: ProcId,
}

impl Child {
    #[must_use]
    pub fn id(&self) -> ProcId {
        self.pid
    }

    /// Blocks until the child exits and reports how it ended.
    pub fn join(self) -> Result<ExitStatus, QuesoError> {
        let mut status = 0;
        let outcome = syscall::join(self.pid, &mut status)?;
        Ok(match outcome {
            JoinOutcome::Exited => ExitStatus { code: Some(status) },
            JoinOutcome::Faulted => ExitStatus { code: None },
        })
    }
}

/// Launches the program `name` as a child process.
///
/// The child sees `name` as its first argument and `args` after it.
pub fn spawn(name: &CStr, args: &[&CStr]) -> Result<Child, QuesoError> {
    let mut argv = ArrayVec::<&CStr, MAX_EXEC_ARGS>::new();
    argv.try_push(name)
        .map_err(|_| QuesoError::ArgumentListTooLong)?;
    argv.try_extend_from_slice(args)
        .map_err(|_| QuesoError::ArgumentListTooLong)?;
    let pid = syscall::exec(name, &argv)?;
    Ok(Child { pid })
}

#[cfg(test)]
mod tests {
    use queso_syscall::{SYSCALL_FAILED, SyscallCode};

    use super::*;
    use crate::os::queso::hosted;

    #[test]
    fn test_spawn_sends_name_and_argument_vector() {
        let _guard = hosted::install(|code: SyscallCode, args: &[usize]| {
            assert_eq!(code, SyscallCode::Exec);
            assert_eq!(unsafe { hosted::cstr_at(args[0]) }, "echo");
            assert_eq!(
                unsafe { hosted::args_at(args[1], args[2]) },
                ["echo", "hello", "world"]
            );
            7
        });

        let child = spawn(c"echo", &[c"hello", c"world"]).unwrap();
        assert_eq!(child.id(), ProcId::new(7));
    }

    #[test]
    fn test_spawn_failure_reports_launch_error() {
        let _guard = hosted::install(|code: SyscallCode, _args: &[usize]| {
            assert_eq!(code, SyscallCode::Exec);
            SYSCALL_FAILED
        });

        assert_eq!(
            spawn(c"missing", &[]).map(|c| c.id()),
            Err(QuesoError::ExecFailed)
        );
    }

    #[test]
    fn test_spawn_rejects_oversized_argument_vector() {
        let args = [c"x"; MAX_EXEC_ARGS];
        assert_eq!(
            spawn(c"prog", &args).map(|c| c.id()),
            Err(QuesoError::ArgumentListTooLong)
        );
    }

    #[test]
    fn test_join_returns_stored_exit_status() {
        let _guard = hosted::install(|code: SyscallCode, args: &[usize]| match code {
            SyscallCode::Exec => 5,
            SyscallCode::Join => {
                assert_eq!(args[0], 5);
                unsafe { hosted::store_i32(args[1], 42) };
                1
            }
            _ => panic!("unexpected syscall {code}"),
        });

        let status = spawn(c"exitcode", &[c"42"]).unwrap().join().unwrap();
        assert_eq!(status.code(), Some(42));
        assert!(!status.success());
        assert!(!status.unhandled_exception());
    }

    #[test]
    fn test_join_reports_unhandled_exception() {
        let _guard = hosted::install(|code: SyscallCode, _args: &[usize]| match code {
            SyscallCode::Exec => 3,
            SyscallCode::Join => 0,
            _ => panic!("unexpected syscall {code}"),
        });

        let status = spawn(c"crasher", &[]).unwrap().join().unwrap();
        assert_eq!(status.code(), None);
        assert!(status.unhandled_exception());
        assert!(!status.success());
    }

    #[test]
    fn test_join_rejects_non_child() {
        let _guard = hosted::install(|code: SyscallCode, _args: &[usize]| match code {
            SyscallCode::Exec => 9,
            SyscallCode::Join => SYSCALL_FAILED,
            _ => panic!("unexpected syscall {code}"),
        });

        let child = spawn(c"orphan", &[]).unwrap();
        assert_eq!(child.join(), Err(QuesoError::NotAChild));
    }

    #[test]
    fn test_exit_status_zero_is_success() {
        let _guard = hosted::install(|code: SyscallCode, args: &[usize]| match code {
            SyscallCode::Exec => 2,
            SyscallCode::Join => {
                unsafe { hosted::store_i32(args[1], 0) };
                1
            }
            _ => panic!("unexpected syscall {code}"),
        });

        let status = spawn(c"write1", &[]).unwrap().join().unwrap();
        assert!(status.success());
    }
}
