//! Process-level exit behavior of the worker binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn worker() -> Command {
    let mut cmd = Command::cargo_bin("monarch-worker").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn non_numeric_port_exits_non_zero() {
    worker()
        .env("MONARCH_PORT", "notaport")
        .assert()
        .failure()
        .code(70)
        .stderr(predicate::str::contains("Starting Monarch Worker"))
        .stderr(predicate::str::contains("tcp://"))
        .stderr(predicate::str::contains("notaport"));
}

#[cfg(unix)]
#[test]
fn non_unicode_port_is_forwarded_not_defaulted() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    worker()
        .env("MONARCH_PORT", OsStr::from_bytes(b"70\xff0"))
        .assert()
        .failure()
        .code(70)
        .stderr(predicate::str::contains("invalid port"))
        .stderr(predicate::str::contains(":26600").not());
}

#[test]
fn oversized_connection_limit_exits_before_bootstrap() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[listener]\nmax_connections = 3000000000000000000\n")
        .unwrap();

    worker()
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .code(78)
        .stderr(predicate::str::contains("exceeds the limit"));
}

#[test]
fn unsupported_trust_policy_exits_non_zero() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[trust]\npolicy = \"certificate\"\nca_path = \"/etc/monarch/ca.pem\"\n")
        .unwrap();

    worker()
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .code(70)
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn invalid_config_exits_before_bootstrap() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[listener]\nmax_connections = 0\n").unwrap();

    worker()
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .code(78)
        .stderr(predicate::str::contains("max_connections"))
        .stderr(predicate::str::contains("Starting Monarch Worker").not());
}

#[test]
fn invalid_log_level_exits_non_zero() {
    worker()
        .args(["--log-level", "monarch_worker=loud"])
        .assert()
        .failure()
        .code(78);
}

#[test]
fn invalid_rust_log_exits_non_zero() {
    worker()
        .env("RUST_LOG", "monarch_worker=loud")
        .assert()
        .failure()
        .code(78)
        .stderr(predicate::str::contains("invalid log filter"));
}
