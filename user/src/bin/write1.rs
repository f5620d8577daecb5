//! Write exactly one line to the console, checking the write.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

use queso_user_lib::{
    io::{self, Write as _},
    process,
};
use queso_utilities::try_or_exit;

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
fn main() {
    try_or_exit!(
        io::stdout().write_all(b"write1: the only line\n"),
        e => "console write failed: {e}"
    );
    process::exit(0);
}
