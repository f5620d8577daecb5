use core::{convert::Infallible, marker::PhantomData};

use queso_types::{fs::RawFd, process::ProcId};

use crate::{
    JoinOutcome, Register, RegisterDecodeError, RegisterValue, SYSCALL_FAILED, UserCStr,
    UserCStrArray, UserMutRef, UserMutSlice, UserSlice, error::SyscallError,
};

impl<T, const N: usize> Register<T, N> {
    pub fn new(a: [usize; N]) -> Self {
        Self {
            a,
            _phantom: PhantomData,
        }
    }

    fn map_type<U>(self) -> Register<U, N> {
        Register {
            a: self.a,
            _phantom: PhantomData,
        }
    }

    pub fn try_decode(self) -> Result<T, T::DecodeError>
    where
        T: RegisterValue<Repr = Self>,
    {
        T::try_decode(self)
    }
}

macro_rules! impl_value {
    ([$($bound:tt)*] $ty:ty, $err:ty, $n:expr, $enc:ident, $dec:ident) => {
        impl<$($bound)*> RegisterValue for $ty {
            type DecodeError = $err;
            type Repr = Register<Self, $n>;

            fn encode(self) -> Self::Repr {
                $enc(self)
            }

            fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
                $dec(repr)
            }
        }
    };
}

impl RegisterValue for Infallible {
    type DecodeError = Self;
    type Repr = Register<Self, 0>;

    fn encode(self) -> Self::Repr {
        unreachable!()
    }

    fn try_decode(_repr: Self::Repr) -> Result<Self, Self::DecodeError> {
        unreachable!()
    }
}

impl RegisterValue for () {
    type DecodeError = Infallible;
    type Repr = Register<(), 0>;

    fn encode(self) -> Self::Repr {
        Register::new([])
    }

    fn try_decode(_: Self::Repr) -> Result<Self, Self::DecodeError> {
        Ok(())
    }
}

impl RegisterValue for usize {
    type DecodeError = Infallible;
    type Repr = Register<Self, 1>;

    fn encode(self) -> Self::Repr {
        Register::new([self])
    }

    fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
        let [a0] = repr.a;
        Ok(a0)
    }
}

impl RegisterValue for isize {
    type DecodeError = Infallible;
    type Repr = Register<Self, 1>;

    fn encode(self) -> Self::Repr {
        Register::new([self.cast_unsigned()])
    }

    fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
        let [a0] = repr.a;
        Ok(a0.cast_signed())
    }
}

macro_rules! impl_number {
    ($base_ty:ty, $ty:ty) => {
        impl RegisterValue for $ty {
            type DecodeError = RegisterDecodeError;
            type Repr = Register<Self, 1>;

            fn encode(self) -> Self::Repr {
                const _: () = const {
                    assert!(size_of::<$ty>() <= size_of::<$base_ty>());
                };
                // never fails, the register is at least as wide
                let n: $base_ty = self.try_into().unwrap();
                n.encode().map_type()
            }

            fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
                let n: $base_ty = repr.map_type().try_decode()?;
                Ok(n.try_into()?)
            }
        }
    };
}

impl_number!(usize, u32);
impl_number!(isize, i32);

impl RegisterValue for SyscallError {
    type DecodeError = RegisterDecodeError;
    type Repr = Register<Self, 1>;

    fn encode(self) -> Self::Repr {
        (self as isize).encode().map_type()
    }

    fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
        let n = repr.map_type().try_decode()?;
        Self::from_repr(n).ok_or(RegisterDecodeError::InvalidErrorNumber(n))
    }
}

impl RegisterValue for JoinOutcome {
    type DecodeError = RegisterDecodeError;
    type Repr = Register<Self, 1>;

    fn encode(self) -> Self::Repr {
        (self as isize).encode().map_type()
    }

    fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
        let n = repr.map_type().try_decode()?;
        Self::from_repr(n).ok_or(RegisterDecodeError::InvalidJoinOutcome(n))
    }
}

impl RegisterValue for ProcId {
    type DecodeError = RegisterDecodeError;
    type Repr = Register<Self, 1>;

    fn encode(self) -> Self::Repr {
        self.get().encode().map_type()
    }

    fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
        let n = repr.map_type().try_decode()?;
        Ok(Self::new(n))
    }
}

impl RegisterValue for RawFd {
    type DecodeError = Infallible;
    type Repr = Register<Self, 1>;

    fn encode(self) -> Self::Repr {
        self.get().encode().map_type()
    }

    fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
        let n = repr.map_type().try_decode()?;
        Ok(Self::new(n))
    }
}

impl RegisterValue for UserCStr {
    type DecodeError = Infallible;
    type Repr = Register<Self, 1>;

    fn encode(self) -> Self::Repr {
        self.addr().encode().map_type()
    }

    fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
        let addr = repr.map_type().try_decode()?;
        Ok(Self::from_addr(addr))
    }
}

impl<T> RegisterValue for UserMutRef<T> {
    type DecodeError = Infallible;
    type Repr = Register<Self, 1>;

    fn encode(self) -> Self::Repr {
        self.addr().encode().map_type()
    }

    fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
        let addr = repr.map_type().try_decode()?;
        Ok(Self::from_addr(addr))
    }
}

impl<T> RegisterValue for UserSlice<T> {
    type DecodeError = Infallible;
    type Repr = Register<Self, 2>;

    fn encode(self) -> Self::Repr {
        Register::new([self.addr(), self.len()])
    }

    fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
        let [addr, len] = repr.a;
        Ok(Self::from_raw_parts(addr, len))
    }
}

impl<T> RegisterValue for UserMutSlice<T> {
    type DecodeError = Infallible;
    type Repr = Register<Self, 2>;

    fn encode(self) -> Self::Repr {
        Register::new([self.addr(), self.len()])
    }

    fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
        let [addr, len] = repr.a;
        Ok(Self::from_raw_parts(addr, len))
    }
}

impl RegisterValue for UserCStrArray {
    type DecodeError = Infallible;
    type Repr = Register<Self, 2>;

    fn encode(self) -> Self::Repr {
        Register::new([self.len(), self.addr()])
    }

    fn try_decode(repr: Self::Repr) -> Result<Self, Self::DecodeError> {
        let [len, addr] = repr.a;
        Ok(Self::from_raw_parts(addr, len))
    }
}

fn result_encode<T>(res: Result<T, SyscallError>) -> Register<Result<T, SyscallError>, 1>
where
    T: RegisterValue<Repr = Register<T, 1>>,
{
    match res {
        Ok(v) => Register::new(v.encode().a),
        Err(e) => Register::new(e.encode().a),
    }
}

fn result_decode<T>(
    repr: Register<Result<T, SyscallError>, 1>,
) -> Result<Result<T, SyscallError>, RegisterDecodeError>
where
    T: RegisterValue<Repr = Register<T, 1>>,
    RegisterDecodeError: From<T::DecodeError>,
{
    let [a0] = repr.a;
    if a0.cast_signed() == SYSCALL_FAILED {
        return Ok(Err(SyscallError::Failed));
    }
    let v = Register::new([a0]).try_decode()?;
    Ok(Ok(v))
}

fn result_encode_unit(
    res: Result<(), SyscallError>,
) -> Register<Result<(), SyscallError>, 1> {
    match res {
        Ok(()) => Register::new([0]),
        Err(e) => Register::new(e.encode().a),
    }
}

fn result_decode_unit(
    repr: Register<Result<(), SyscallError>, 1>,
) -> Result<Result<(), SyscallError>, RegisterDecodeError> {
    let [a0] = repr.a;
    match a0.cast_signed() {
        SYSCALL_FAILED => Ok(Err(SyscallError::Failed)),
        0 => Ok(Ok(())),
        _ => Err(RegisterDecodeError::UnexpectedReturnValue(a0)),
    }
}

fn result_encode_never(
    res: Result<Infallible, SyscallError>,
) -> Register<Result<Infallible, SyscallError>, 1> {
    match res {
        Ok(never) => match never {},
        Err(e) => Register::new(e.encode().a),
    }
}

fn result_decode_never(
    repr: Register<Result<Infallible, SyscallError>, 1>,
) -> Result<Result<Infallible, SyscallError>, RegisterDecodeError> {
    let [a0] = repr.a;
    if a0.cast_signed() == SYSCALL_FAILED {
        return Ok(Err(SyscallError::Failed));
    }
    Err(RegisterDecodeError::UnexpectedReturnValue(a0))
}

impl_value!([] Result<ProcId, SyscallError>, RegisterDecodeError, 1, result_encode, result_decode);
impl_value!([] Result<RawFd, SyscallError>, RegisterDecodeError, 1, result_encode, result_decode);
impl_value!([] Result<usize, SyscallError>, RegisterDecodeError, 1, result_encode, result_decode);
impl_value!([] Result<JoinOutcome, SyscallError>, RegisterDecodeError, 1, result_encode, result_decode);
impl_value!([] Result<(), SyscallError>, RegisterDecodeError, 1, result_encode_unit, result_decode_unit);
impl_value!([] Result<Infallible, SyscallError>, RegisterDecodeError, 1, result_encode_never, result_decode_never);

fn tuple1_encode<T, const N: usize>((v0,): (T,)) -> Register<(T,), N>
where
    T: RegisterValue<Repr = Register<T, N>>,
{
    Register::new(v0.encode().a)
}

fn tuple1_decode<T, const N: usize>(repr: Register<(T,), N>) -> Result<(T,), T::DecodeError>
where
    T: RegisterValue<Repr = Register<T, N>>,
{
    let v0 = Register::new(repr.a).try_decode()?;
    Ok((v0,))
}

fn tuple_encode_11<T, U>((v0, v1): (T, U)) -> Register<(T, U), 2>
where
    T: RegisterValue<Repr = Register<T, 1>>,
    U: RegisterValue<Repr = Register<U, 1>>,
{
    let [a0] = v0.encode().a;
    let [a1] = v1.encode().a;
    Register::new([a0, a1])
}

fn tuple_decode_11<T, U, E>(repr: Register<(T, U), 2>) -> Result<(T, U), E>
where
    T: RegisterValue<Repr = Register<T, 1>>,
    U: RegisterValue<Repr = Register<U, 1>>,
    E: From<T::DecodeError> + From<U::DecodeError>,
{
    let [a0, a1] = repr.a;
    let v0 = Register::new([a0]).try_decode()?;
    let v1 = Register::new([a1]).try_decode()?;
    Ok((v0, v1))
}

fn tuple_encode_12<T, U>((v0, v1): (T, U)) -> Register<(T, U), 3>
where
    T: RegisterValue<Repr = Register<T, 1>>,
    U: RegisterValue<Repr = Register<U, 2>>,
{
    let [a0] = v0.encode().a;
    let [a1, a2] = v1.encode().a;
    Register::new([a0, a1, a2])
}

fn tuple_decode_12<T, U, E>(repr: Register<(T, U), 3>) -> Result<(T, U), E>
where
    T: RegisterValue<Repr = Register<T, 1>>,
    U: RegisterValue<Repr = Register<U, 2>>,
    E: From<T::DecodeError> + From<U::DecodeError>,
{
    let [a0, a1, a2] = repr.a;
    let v0 = Register::new([a0]).try_decode()?;
    let v1 = Register::new([a1, a2]).try_decode()?;
    Ok((v0, v1))
}

impl_value!([] (i32,), RegisterDecodeError, 1, tuple1_encode, tuple1_decode);
impl_value!([] (UserCStr,), Infallible, 1, tuple1_encode, tuple1_decode);
impl_value!([] (RawFd,), Infallible, 1, tuple1_encode, tuple1_decode);

impl_value!([T] (ProcId, UserMutRef<T>), RegisterDecodeError, 2, tuple_encode_11, tuple_decode_11);
impl_value!([] (UserCStr, UserCStrArray), Infallible, 3, tuple_encode_12, tuple_decode_12);
impl_value!([T] (RawFd, UserSlice<T>), Infallible, 3, tuple_encode_12, tuple_decode_12);
impl_value!([T] (RawFd, UserMutSlice<T>), Infallible, 3, tuple_encode_12, tuple_decode_12);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyscallCode;

    fn regs<T: RegisterValue>(value: T) -> <T as RegisterValue>::Repr {
        value.encode()
    }

    #[test]
    fn test_code_table_matches_kernel() {
        assert_eq!(SyscallCode::from_repr(0), Some(SyscallCode::Halt));
        assert_eq!(SyscallCode::from_repr(2), Some(SyscallCode::Exec));
        assert_eq!(SyscallCode::from_repr(3), Some(SyscallCode::Join));
        assert_eq!(SyscallCode::from_repr(9), Some(SyscallCode::Unlink));
        assert_eq!(SyscallCode::from_repr(10), None);
        assert_eq!("exec".parse(), Ok(SyscallCode::Exec));
        assert_eq!(SyscallCode::Join.to_string(), "join");
    }

    #[test]
    fn test_exec_arguments_keep_kernel_order() {
        // the kernel reads (name, argc, argv)
        let argv = [UserCStr::from_addr(0x2000), UserCStr::from_addr(0x2010)];
        let arg = (UserCStr::from_addr(0x1000), UserCStrArray::new(&argv));
        let encoded = regs(arg);
        assert_eq!(encoded.a[0], 0x1000);
        assert_eq!(encoded.a[1], 2);
        assert_eq!(encoded.a[2], argv.as_ptr() as usize);

        let (name, args) = encoded.try_decode().unwrap();
        assert_eq!(name.addr(), 0x1000);
        assert_eq!(args.len(), 2);
        assert_eq!(args.addr(), argv.as_ptr() as usize);
    }

    #[test]
    fn test_write_arguments_keep_kernel_order() {
        // the kernel reads (fd, address, length)
        let buf = [0_u8; 64];
        let encoded = regs((RawFd::new(1), UserSlice::new(&buf)));
        assert_eq!(encoded.a, [1, buf.as_ptr() as usize, 64]);
    }

    #[test]
    fn test_failure_sentinel_decodes_to_error() {
        let repr = Register::<Result<ProcId, SyscallError>, 1>::new([SYSCALL_FAILED.cast_unsigned()]);
        assert_eq!(repr.try_decode(), Ok(Err(SyscallError::Failed)));

        let repr = Register::<Result<ProcId, SyscallError>, 1>::new([7]);
        assert_eq!(repr.try_decode(), Ok(Ok(ProcId::new(7))));

        // pid 0 is the root process, a valid value
        let repr = Register::<Result<ProcId, SyscallError>, 1>::new([0]);
        assert_eq!(repr.try_decode(), Ok(Ok(ProcId::new(0))));
    }

    #[test]
    fn test_join_outcome_decoding() {
        let decode = |word: isize| {
            Register::<Result<JoinOutcome, SyscallError>, 1>::new([word.cast_unsigned()])
                .try_decode()
        };
        assert_eq!(decode(1), Ok(Ok(JoinOutcome::Exited)));
        assert_eq!(decode(0), Ok(Ok(JoinOutcome::Faulted)));
        assert_eq!(decode(-1), Ok(Err(SyscallError::Failed)));
        assert_eq!(decode(5), Err(RegisterDecodeError::InvalidJoinOutcome(5)));
    }

    #[test]
    fn test_unit_result_rejects_garbage() {
        let decode = |word: isize| {
            Register::<Result<(), SyscallError>, 1>::new([word.cast_unsigned()]).try_decode()
        };
        assert_eq!(decode(0), Ok(Ok(())));
        assert_eq!(decode(-1), Ok(Err(SyscallError::Failed)));
        assert!(decode(3).is_err());
    }

    #[test]
    fn test_exit_status_roundtrips_negative() {
        let encoded = regs((-1_i32,));
        let (status,) = encoded.try_decode().unwrap();
        assert_eq!(status, -1);
    }
}
