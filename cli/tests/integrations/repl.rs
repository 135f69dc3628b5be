use assert_cmd::Command;

#[test]
fn test_repl_command_available() {
    // The REPL needs a terminal, so only its help is exercised here
    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("repl").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("one solution at a time"));
}
