use queso_types::process::ProcId;
use queso_user_lib::{error::QuesoError, os::queso::syscall, process};

pub fn join_not_child() {
    let mut status = 0;
    let err = syscall::join(ProcId::new(4242), &mut status).unwrap_err();
    assert_eq!(err, QuesoError::NotAChild);
}

pub fn join_twice() {
    let child = process::spawn(c"write1", &[]).unwrap();
    let pid = child.id();
    assert!(child.join().unwrap().success());

    // the first join disowned the child
    let mut status = 0;
    let err = syscall::join(pid, &mut status).unwrap_err();
    assert_eq!(err, QuesoError::NotAChild);
}

pub fn exit_status() {
    let child = process::spawn(c"exitcode", &[c"42"]).unwrap();
    let status = child.join().unwrap();
    assert_eq!(status.code(), Some(42));
}
