//! Standard library for queso user programs.
//!
//! Programs are `no_std` binaries that take their arguments from
//! [`env`], talk to the world through the console and file descriptors
//! in [`io`] and [`fs`], and launch and join children through
//! [`process`]. On the machine the program's `main` is reached from the
//! `_start` symbol defined here; on other targets the same code builds
//! against a host, and with the `test` feature system calls are served
//! by a handler installed through `os::queso::hosted`.

#![cfg_attr(target_arch = "mips", feature(asm_experimental_arch))]
#![no_std]

#[cfg(feature = "test")]
extern crate std;

pub mod env;
pub mod error;
pub mod fs;
pub mod io;
mod macros;
pub mod os;
pub mod process;

#[cfg(target_os = "none")]
unsafe extern "Rust" {
    fn main();
}

#[cfg(target_os = "none")]
#[unsafe(export_name = "_start")]
extern "C" fn start(argc: i32, argv: *const *const core::ffi::c_char) -> ! {
    let argc = usize::try_from(argc).unwrap_or(0);
    unsafe {
        env::set_args(argc, argv);
        main();
    }
    process::exit(0);
}

#[cfg(target_os = "none")]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    // bypass `_print` so a failing console write cannot re-enter panic
    use crate::io::Write as _;
    let _ = io::stdout().write_fmt(format_args!("panic: {info}\n"));
    process::exit(1);
}
