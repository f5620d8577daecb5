//! Common types shared by queso user programs and the syscall ABI.

#![cfg_attr(not(test), no_std)]

pub mod fs;
pub mod process;
