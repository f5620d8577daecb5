//! queso-specific interfaces.

#[cfg(all(feature = "test", not(target_arch = "mips")))]
pub mod hosted;
pub mod syscall;
