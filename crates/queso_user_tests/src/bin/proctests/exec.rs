use queso_user_lib::{error::QuesoError, process};

pub fn exec_missing() {
    let err = process::spawn(c"no_such_program", &[]).unwrap_err();
    assert_eq!(err, QuesoError::ExecFailed);
}

pub fn exec_then_join() {
    let child = process::spawn(c"write1", &[]).unwrap();
    let status = child.join().unwrap();
    assert_eq!(status.code(), Some(0));
}

pub fn exec_argv() {
    let child = process::spawn(c"echo", &[c"alpha", c"beta", c"gamma"]).unwrap();
    let status = child.join().unwrap();
    assert!(status.success(), "echo ended with {status}");
}

pub fn two_children_in_order() {
    for prog in [c"write10", c"write1"] {
        let child = process::spawn(prog, &[]).unwrap();
        let status = child.join().unwrap();
        assert!(status.success(), "{prog:?} ended with {status}");
    }
}
