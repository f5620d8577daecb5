//! Exit with the status given as the first argument (default 0).

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

use queso_user_lib::{env, process};
use queso_utilities::{try_or_exit, usage_and_exit};

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
fn main() {
    let mut args = env::args();
    if args.len() > 1 {
        usage_and_exit!("[status]");
    }

    let code = try_or_exit!(
        args.next().map(str::parse).transpose(),
        e => "invalid status: {e}"
    )
    .unwrap_or(0);

    process::exit(code);
}
