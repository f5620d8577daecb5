//! OS-specific functionality.

pub mod fd;
pub mod queso;
