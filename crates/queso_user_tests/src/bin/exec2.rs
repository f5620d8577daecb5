//! Launch two programs in sequence, joining each before starting the
//! next. Any launch failure, join failure, or unclean child exit
//! terminates the harness with status -1.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

use core::ffi::CStr;

use queso_user_lib::{println, process};
use queso_utilities::message;

const FIRST: &CStr = c"write10";
const SECOND: &CStr = c"write1";

fn run_child(name: &CStr) {
    let prog = name.to_str().unwrap_or("?");
    let child = match process::spawn(name, &[]) {
        Ok(child) => child,
        Err(e) => {
            message!("could not launch {prog}: {e}");
            process::exit(-1);
        }
    };
    match child.join() {
        Ok(status) if status.success() => {}
        Ok(status) => {
            message!("{prog} ended with {status}");
            process::exit(-1);
        }
        Err(e) => {
            message!("could not join {prog}: {e}");
            process::exit(-1);
        }
    }
}

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
fn main() {
    run_child(FIRST);
    run_child(SECOND);
    println!("both children finished");
    process::exit(0);
}
