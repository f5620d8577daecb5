use core::fmt;

use queso_types::fs::RawFd;

use super::{Read, Write};
use crate::{
    error::QuesoError,
    os::{
        fd::{AsFd, AsRawFd, BorrowedFd},
        queso::syscall,
    },
};

pub const STDIN_FD: RawFd = RawFd::new(0);
pub const STDOUT_FD: RawFd = RawFd::new(1);

#[track_caller]
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    match stdout().write_fmt(args) {
        Ok(()) => {}
        Err(_) => panic!("error writing to stdout"),
    }
}

#[must_use]
pub fn stdout() -> Stdout {
    Stdout {}
}

#[must_use]
pub fn stdin() -> Stdin {
    Stdin {}
}

/// Handle to the console output descriptor.
pub struct Stdout {}

impl Write for Stdout {
    fn write(&mut self, buf: &[u8]) -> Result<usize, QuesoError> {
        syscall::write(self.as_fd(), buf)
    }
}

impl Write for &'_ Stdout {
    fn write(&mut self, buf: &[u8]) -> Result<usize, QuesoError> {
        syscall::write(self.as_fd(), buf)
    }
}

impl AsFd for Stdout {
    fn as_fd(&self) -> BorrowedFd<'_> {
        unsafe { BorrowedFd::borrow_raw(STDOUT_FD) }
    }
}

impl AsRawFd for Stdout {
    fn as_raw_fd(&self) -> RawFd {
        STDOUT_FD
    }
}

/// Handle to the console input descriptor.
pub struct Stdin {}

impl Stdin {
    /// Reads bytes into `buf` until a newline arrives or the buffer is
    /// full, returning how many bytes were stored.
    ///
    /// The console hands bytes over as they are typed, so this pulls
    /// one byte per call until the line ends.
    pub fn read_line(&mut self, buf: &mut [u8]) -> Result<usize, QuesoError> {
        let mut n = 0;
        while n < buf.len() {
            let mut byte = [0];
            if self.read(&mut byte)? == 0 {
                break;
            }
            buf[n] = byte[0];
            n += 1;
            if byte[0] == b'\n' {
                break;
            }
        }
        Ok(n)
    }
}

impl Read for Stdin {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, QuesoError> {
        syscall::read(self.as_fd(), buf)
    }
}

impl AsFd for Stdin {
    fn as_fd(&self) -> BorrowedFd<'_> {
        unsafe { BorrowedFd::borrow_raw(STDIN_FD) }
    }
}

impl AsRawFd for Stdin {
    fn as_raw_fd(&self) -> RawFd {
        STDIN_FD
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use queso_syscall::SyscallCode;

    use super::*;
    use crate::os::queso::hosted;

    #[test]
    fn test_read_line_stops_at_newline() {
        let input = b"hi\nrest";
        let mut served = 0;
        let _guard = hosted::install(move |code: SyscallCode, args: &[usize]| {
            assert_eq!(code, SyscallCode::Read);
            assert_eq!(args[0], STDIN_FD.get());
            let n = unsafe { hosted::fill_buf(args[1], args[2], &input[served..]) };
            served += n;
            isize::try_from(n).unwrap()
        });

        let mut buf = [0; 16];
        let n = stdin().read_line(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"hi\n");
    }

    #[test]
    fn test_read_line_fills_short_buffer() {
        let input = b"abcdef\n";
        let mut served = 0;
        let _guard = hosted::install(move |_code: SyscallCode, args: &[usize]| {
            let n = unsafe { hosted::fill_buf(args[1], args[2], &input[served..]) };
            served += n;
            isize::try_from(n).unwrap()
        });

        let mut buf = [0; 4];
        let n = stdin().read_line(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"abcd");
    }

    #[test]
    fn test_read_line_handles_eof() {
        let _guard = hosted::install(|code: SyscallCode, _args: &[usize]| {
            assert_eq!(code, SyscallCode::Read);
            0
        });

        let mut buf = [0; 8];
        let n = stdin().read_line(&mut buf).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn test_formatted_write_reaches_console_descriptor() {
        let sink = std::rc::Rc::new(core::cell::RefCell::new(Vec::new()));
        let tap = std::rc::Rc::clone(&sink);
        let _guard = hosted::install(move |code: SyscallCode, args: &[usize]| {
            assert_eq!(code, SyscallCode::Write);
            assert_eq!(args[0], STDOUT_FD.get());
            let bytes = unsafe { hosted::bytes_at(args[1], args[2]) };
            tap.borrow_mut().extend_from_slice(&bytes);
            isize::try_from(bytes.len()).unwrap()
        });

        stdout()
            .write_fmt(format_args!("{} + {} = {}\n", 1, 2, 1 + 2))
            .unwrap();
        assert_eq!(*sink.borrow(), b"1 + 2 = 3\n");
    }
}
