use queso_user_lib::{
    error::QuesoError,
    fs::{self, File},
    io::{Read as _, Write as _},
};

pub fn file_roundtrip() {
    const PAYLOAD: &[u8] = b"queso file roundtrip payload";

    let mut file = File::create(c"qtest.tmp").unwrap();
    file.write_all(PAYLOAD).unwrap();
    drop(file);

    let mut file = File::open(c"qtest.tmp").unwrap();
    let mut buf = [0; PAYLOAD.len()];
    file.read_exact(&mut buf).unwrap();
    assert_eq!(&buf[..], PAYLOAD);
    assert_eq!(file.read(&mut buf).unwrap(), 0);
    drop(file);

    fs::remove_file(c"qtest.tmp").unwrap();
}

pub fn unlink_missing() {
    let err = fs::remove_file(c"never_created.tmp").unwrap_err();
    assert_eq!(err, QuesoError::UnlinkFailed);
}
