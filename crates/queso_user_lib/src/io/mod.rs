//! Console and file descriptor i/o.

use core::{cmp, fmt};

pub use self::stdio::{STDIN_FD, STDOUT_FD, Stdin, Stdout, _print, stdin, stdout};
use crate::error::QuesoError;

mod stdio;

pub trait Read {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, QuesoError>;

    fn read_exact(&mut self, mut buf: &mut [u8]) -> Result<(), QuesoError> {
        while !buf.is_empty() {
            let n = match self.read(buf)? {
                0 => break,
                n => n,
            };
            buf = &mut buf[n..];
        }

        if !buf.is_empty() {
            return Err(QuesoError::UnexpectedEof);
        }

        Ok(())
    }
}

pub trait Write {
    fn write(&mut self, buf: &[u8]) -> Result<usize, QuesoError>;

    fn write_all(&mut self, mut buf: &[u8]) -> Result<(), QuesoError> {
        while !buf.is_empty() {
            let n = match self.write(buf)? {
                0 => return Err(QuesoError::WriteZero),
                n => n,
            };
            buf = &buf[n..];
        }
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), QuesoError> {
        struct Adapter<'a, T: ?Sized> {
            inner: &'a mut T,
            error: Result<(), QuesoError>,
        }

        impl<T: Write + ?Sized> fmt::Write for Adapter<'_, T> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                match self.inner.write_all(s.as_bytes()) {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        self.error = Err(e);
                        Err(fmt::Error)
                    }
                }
            }
        }

        let mut output = Adapter {
            inner: self,
            error: Ok(()),
        };
        match fmt::write(&mut output, args) {
            Ok(()) => Ok(()),
            // the stream took every byte, so a formatting impl failed
            Err(fmt::Error) => output.error.and(Err(QuesoError::FormatFailed)),
        }
    }
}

impl<R> Read for &mut R
where
    R: Read,
{
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, QuesoError> {
        (**self).read(buf)
    }
}

impl Read for &[u8] {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, QuesoError> {
        let amt = cmp::min(buf.len(), self.len());
        let (a, b) = self.split_at(amt);
        buf[..amt].copy_from_slice(a);
        *self = b;
        Ok(amt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_exact_from_slice() {
        let mut src: &[u8] = b"abcdef";
        let mut buf = [0; 4];
        src.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"abcd");
        assert_eq!(src, b"ef");
    }

    #[test]
    fn test_read_exact_reports_short_input() {
        let mut src: &[u8] = b"ab";
        let mut buf = [0; 4];
        assert_eq!(
            src.read_exact(&mut buf),
            Err(QuesoError::UnexpectedEof)
        );
    }

    #[test]
    fn test_write_all_retries_partial_writes() {
        struct OneByte(std::vec::Vec<u8>);

        impl Write for OneByte {
            fn write(&mut self, buf: &[u8]) -> Result<usize, QuesoError> {
                self.0.push(buf[0]);
                Ok(1)
            }
        }

        let mut sink = OneByte(std::vec::Vec::new());
        sink.write_all(b"abc").unwrap();
        assert_eq!(sink.0, b"abc");
    }

    #[test]
    fn test_write_all_flags_stuck_sink() {
        struct Stuck;

        impl Write for Stuck {
            fn write(&mut self, _buf: &[u8]) -> Result<usize, QuesoError> {
                Ok(0)
            }
        }

        assert_eq!(Stuck.write_all(b"x"), Err(QuesoError::WriteZero));
    }
}
