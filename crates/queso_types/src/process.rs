//! Process types.

use core::{fmt, num::ParseIntError, str::FromStr};

/// Process identifier.
///
/// Identifiers are assigned from zero in launch order and are never
/// reused. The first process on the machine has identifier zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[must_use]
pub struct ProcId(u32);

impl ProcId {
    /// Identifier of the first process launched on the machine.
    pub const ROOT: Self = Self(0);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ProcId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_zero() {
        assert_eq!(ProcId::ROOT.get(), 0);
    }

    #[test]
    fn test_display_and_parse() {
        let pid = ProcId::new(42);
        assert_eq!(pid.to_string(), "42");
        assert_eq!("42".parse::<ProcId>().unwrap(), pid);
        assert!("-1".parse::<ProcId>().is_err());
    }
}
