#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

use queso_user_lib::{env, print, println};

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
fn main() {
    for (i, arg) in env::args().enumerate() {
        if i > 0 {
            print!(" {arg}");
        } else {
            print!("{arg}");
        }
    }
    println!();
}
