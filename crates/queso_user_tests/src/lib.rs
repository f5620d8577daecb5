//! Machinery shared by the on-machine test binaries.
//!
//! The binaries in `src/bin` carry the test bodies; this library holds
//! the test table entry type, flag parsing, and the child-per-test
//! execution loop.

#![cfg_attr(not(test), no_std)]

pub mod runner;
