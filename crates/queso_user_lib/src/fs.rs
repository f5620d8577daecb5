//! File handling on the queso flat filesystem.
//!
//! There are no directories and no open modes: every descriptor reads
//! and writes, [`File::create`] truncates, and names are limited to
//! what a syscall string argument may carry.

use core::ffi::CStr;

use crate::{
    error::QuesoError,
    io::{Read, Write},
    os::{
        fd::{AsFd, AsRawFd, BorrowedFd, FromRawFd, OwnedFd, RawFd},
        queso::syscall,
    },
};

#[derive(Debug)]
pub struct File {
    fd: OwnedFd,
}

impl File {
    /// Opens an existing file.
    pub fn open(path: &CStr) -> Result<Self, QuesoError> {
        let fd = syscall::open(path)?;
        Ok(Self { fd })
    }

    /// Creates the file, truncating it if it already exists.
    pub fn create(path: &CStr) -> Result<Self, QuesoError> {
        let fd = syscall::create(path)?;
        Ok(Self { fd })
    }
}

impl AsFd for File {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}

impl AsRawFd for File {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl FromRawFd for File {
    unsafe fn from_raw_fd(fd: RawFd) -> Self {
        Self {
            fd: unsafe { OwnedFd::from_raw_fd(fd) },
        }
    }
}

impl Write for File {
    fn write(&mut self, buf: &[u8]) -> Result<usize, QuesoError> {
        syscall::write(self.fd.as_fd(), buf)
    }
}

impl Write for &'_ File {
    fn write(&mut self, buf: &[u8]) -> Result<usize, QuesoError> {
        syscall::write(self.fd.as_fd(), buf)
    }
}

impl Read for File {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, QuesoError> {
        syscall::read(self.fd.as_fd(), buf)
    }
}

impl Read for &'_ File {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, QuesoError> {
        syscall::read(self.fd.as_fd(), buf)
    }
}

pub fn remove_file(path: &CStr) -> Result<(), QuesoError> {
    syscall::unlink(path)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, vec::Vec};

    use queso_syscall::{SYSCALL_FAILED, SyscallCode};

    use super::*;
    use crate::os::queso::hosted;

    #[test]
    fn test_create_write_and_close_on_drop() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&calls);
        let _guard = hosted::install(move |code: SyscallCode, args: &[usize]| {
            log.borrow_mut().push(code);
            match code {
                SyscallCode::Create => {
                    assert_eq!(unsafe { hosted::cstr_at(args[0]) }, "out.txt");
                    3
                }
                SyscallCode::Write => {
                    assert_eq!(args[0], 3);
                    assert_eq!(unsafe { hosted::bytes_at(args[1], args[2]) }, b"data");
                    isize::try_from(args[2]).unwrap()
                }
                SyscallCode::Close => {
                    assert_eq!(args[0], 3);
                    0
                }
                _ => panic!("unexpected syscall {code}"),
            }
        });

        let mut file = File::create(c"out.txt").unwrap();
        file.write_all(b"data").unwrap();
        drop(file);
        assert_eq!(
            *calls.borrow(),
            [SyscallCode::Create, SyscallCode::Write, SyscallCode::Close]
        );
    }

    #[test]
    fn test_open_reads_until_eof() {
        let content = b"hello";
        let mut offset = 0;
        let _guard = hosted::install(move |code: SyscallCode, args: &[usize]| match code {
            SyscallCode::Open => 4,
            SyscallCode::Read => {
                assert_eq!(args[0], 4);
                let n = unsafe { hosted::fill_buf(args[1], args[2], &content[offset..]) };
                offset += n;
                isize::try_from(n).unwrap()
            }
            SyscallCode::Close => 0,
            _ => panic!("unexpected syscall {code}"),
        });

        let mut file = File::open(c"in.txt").unwrap();
        let mut buf = [0; 5];
        file.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"hello");
        assert_eq!(file.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let _guard = hosted::install(|code: SyscallCode, _args: &[usize]| {
            assert_eq!(code, SyscallCode::Open);
            SYSCALL_FAILED
        });

        assert_eq!(
            File::open(c"nope").map(|_| ()),
            Err(QuesoError::OpenFailed)
        );
    }

    #[test]
    fn test_remove_file() {
        let _guard = hosted::install(|code: SyscallCode, args: &[usize]| {
            assert_eq!(code, SyscallCode::Unlink);
            assert_eq!(unsafe { hosted::cstr_at(args[0]) }, "stale.tmp");
            0
        });

        remove_file(c"stale.tmp").unwrap();
    }
}
