use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_check_well_formed_workspace() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("zoo.friends"),
        "すごーい！ かばんちゃん は ヒトの フレンズ なんだね！\n\nだれ は ヒトの フレンズ なんですか？\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("check").arg("--dir").arg(temp_dir.path());

    cmd.assert().success().stdout(
        "> すごーい！ かばんちゃん は ヒトの フレンズ なんだね！\n> だれ は ヒトの フレンズ なんですか？\n",
    );
}

#[test]
fn test_cli_check_reports_each_malformed_paragraph() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("zoo.friends"),
        "かばんちゃん は フレンズ\n\nすごーい！ かばんちゃん は ヒトの フレンズ なんだね！\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("check").arg("--dir").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("> かばんちゃん は フレンズ\n"))
        .stdout(predicate::str::contains("the statement is not well-formed"))
        .stdout(predicate::str::contains(
            "> すごーい！ かばんちゃん は ヒトの フレンズ なんだね！",
        ))
        .stderr(predicate::str::contains("1 statement(s) are not well-formed"));
}
