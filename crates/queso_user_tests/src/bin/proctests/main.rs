//! Regression suite for the process and file syscall surface.
//!
//! Each test body runs in a freshly spawned copy of this binary
//! (`proctests run <name>`), so a panicking test is just a child that
//! exits 1.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

mod exec;
mod fsio;
mod join;

use queso_user_lib::{env, println, process};
use queso_user_tests::runner::{self, RunConfig, TestEntry};
use queso_utilities::{ensure_or_exit, exit, message, usage_and_exit};

const TESTS: &[TestEntry] = &[
    TestEntry {
        name: c"exec_missing",
        test: exec::exec_missing,
    },
    TestEntry {
        name: c"exec_then_join",
        test: exec::exec_then_join,
    },
    TestEntry {
        name: c"exec_argv",
        test: exec::exec_argv,
    },
    TestEntry {
        name: c"two_children_in_order",
        test: exec::two_children_in_order,
    },
    TestEntry {
        name: c"join_not_child",
        test: join::join_not_child,
    },
    TestEntry {
        name: c"join_twice",
        test: join::join_twice,
    },
    TestEntry {
        name: c"exit_status",
        test: join::exit_status,
    },
    TestEntry {
        name: c"file_roundtrip",
        test: fsio::file_roundtrip,
    },
    TestEntry {
        name: c"unlink_missing",
        test: fsio::unlink_missing,
    },
];

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
fn main() {
    let mut args = env::args_cstr();
    if args.next() == Some(c"run") {
        let Some(name) = args.next() else {
            usage_and_exit!("run <test>");
        };
        ensure_or_exit!(args.next().is_none(), "unexpected extra arguments");
        let Some(entry) = TESTS.iter().find(|t| t.name == name) else {
            exit!("no such test: {name}", name = name.to_str().unwrap_or("?"));
        };
        (entry.test)();
        process::exit(0);
    }

    let config = match RunConfig::parse_from(env::args()) {
        Ok(config) => config,
        Err(e) => {
            message!("{e}");
            usage_and_exit!("[-c | -C] [-T] [test]");
        }
    };
    if let Some(name) = config.filter {
        if !TESTS.iter().any(|t| t.name_str() == name) {
            exit!("no such test: {name}");
        }
    }

    let Some(self_name) = env::arg0_cstr() else {
        exit!("cannot determine own program name");
    };

    if runner::run_suite(self_name, TESTS, &config) {
        println!("ALL TESTS PASSED");
        if config.halt_after {
            if let Err(e) = process::halt() {
                exit!("{e}");
            }
        }
        process::exit(0);
    }
    println!("SOME TESTS FAILED");
    process::exit(1);
}
