//! Write ten numbered lines to the console, checking every write.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

use queso_user_lib::{
    io::{self, Write as _},
    process,
};
use queso_utilities::try_or_exit;

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
fn main() {
    let mut stdout = io::stdout();
    for i in 1..=10 {
        try_or_exit!(
            stdout.write_fmt(format_args!("write10: line {i} of 10\n")),
            e => "console write failed: {e}"
        );
    }
    process::exit(0);
}
