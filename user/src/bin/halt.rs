//! Stop the machine. Only the root process may; anyone else gets told
//! no and exits 1.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

use queso_user_lib::process;
use queso_utilities::try_or_exit;

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
fn main() {
    try_or_exit!(
        process::halt(),
        e => "halt failed: {e}"
    );
}
