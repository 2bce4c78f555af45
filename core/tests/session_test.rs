//! Session persistence tests

mod common;

use beltwatch_core::Session;
use std::path::PathBuf;

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("beltwatch-session-{}-{}", std::process::id(), name))
        .join("token")
}

#[test]
fn token_survives_a_restart() {
    let path = scratch_path("restart");
    let token = common::long_lived_jwt();

    let first = Session::persistent(&path);
    assert!(!first.is_valid());
    first.login(token.clone());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), token);

    let second = Session::persistent(&path);
    assert!(second.is_valid());
    assert_eq!(second.token(), Some(token));

    second.logout();
    assert!(!path.exists());
    assert!(!Session::persistent(&path).is_valid());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn stored_expired_token_is_not_valid() {
    let path = scratch_path("expired");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, common::jwt(1)).unwrap();

    let session = Session::persistent(&path);
    assert!(!session.is_valid());
    assert_eq!(session.token(), None);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
