#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

use queso_user_lib::{
    env,
    fs::File,
    io::{self, Read, Write},
    process,
};
use queso_utilities::exit;

fn cat<T>(mut input: T)
where
    T: Read,
{
    let mut stdout = io::stdout();
    let mut buf = [0; 512];
    loop {
        let Ok(nread) = input.read(&mut buf) else {
            exit!("read error");
        };
        if nread == 0 {
            break;
        }
        let Ok(nwrite) = stdout.write(&buf[..nread]) else {
            exit!("write error");
        };
        if nwrite != nread {
            exit!("write error: {nwrite} vs {nread}");
        }
    }
}

#[cfg_attr(target_os = "none", unsafe(no_mangle))]
fn main() {
    let args = env::args_cstr();
    if args.len() == 0 {
        cat(io::stdin());
        process::exit(0);
    }

    for arg in args {
        let Ok(file) = File::open(arg) else {
            exit!("cannot open {name}", name = arg.to_str().unwrap_or("?"));
        };
        cat(&file);
    }
}
