/// Error type for queso library calls.
///
/// The kernel reports failure without a reason code, so the library
/// names each failure after the operation that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QuesoError {
    #[error("program could not be launched")]
    ExecFailed,
    #[error("argument list too long")]
    ArgumentListTooLong,
    #[error("process is not an unjoined child")]
    NotAChild,
    #[error("file could not be created")]
    CreateFailed,
    #[error("file could not be opened")]
    OpenFailed,
    #[error("file could not be removed")]
    UnlinkFailed,
    #[error("bad file descriptor or i/o failure")]
    Io,
    #[error("only the root process may halt the machine")]
    HaltDenied,
    #[error("failed to fill whole buffer")]
    UnexpectedEof,
    #[error("failed to write whole buffer")]
    WriteZero,
    #[error("formatter error")]
    FormatFailed,
}
