use assert_cmd::Command;

#[test]
fn test_server_command_available() {
    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("server"));
}

#[test]
fn test_server_rejects_invalid_port() {
    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("server").arg("--port").arg("not-a-port");

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("not-a-port"));
}
