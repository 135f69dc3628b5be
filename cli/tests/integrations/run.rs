use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ZOO: &str = r#"※ ジャパリパークの フレンズ たち

すごーい！ あなた が ヒトの フレンズ なら
  あなた は 定命の フレンズ なんだね！

すごーい！ かばんちゃん は ヒトの フレンズ なんだね！

だれ は 定命の フレンズ なんですか？
"#;

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(temp_dir.path().join(name), content).unwrap();
    }
    temp_dir
}

#[test]
fn test_cli_run_answers_queries() {
    let temp_dir = workspace(&[("zoo.friends", ZOO)]);

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("run").arg("--dir").arg(temp_dir.path());

    cmd.assert().success().stdout(
        "> すごーい！ あなた が ヒトの フレンズ なら あなた は 定命の フレンズ なんだね！\n\
         > すごーい！ かばんちゃん は ヒトの フレンズ なんだね！\n\
         > だれ は 定命の フレンズ なんですか？\n\
         だれ は かばんちゃん 、\n\
         なのです\n\
         解なしなのです\n",
    );
}

#[test]
fn test_cli_run_reads_files_in_name_order() {
    let temp_dir = workspace(&[
        ("b_query.friends", "だれ は ヒトの フレンズ なんですか？\n"),
        (
            "a_rules.friends",
            "すごーい！ かばんちゃん は ヒトの フレンズ なんだね！\n",
        ),
    ]);

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("run").arg("--dir").arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("だれ は かばんちゃん 、"));
}

#[test]
fn test_cli_run_ignores_other_files() {
    let temp_dir = workspace(&[
        ("zoo.friends", ZOO),
        ("notes.txt", "これは フレンズ ではない"),
    ]);

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("run").arg("--dir").arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ではない").not());
}

#[test]
fn test_cli_run_without_solutions() {
    let temp_dir = workspace(&[("zoo.friends", "だれ は ヒトの フレンズ なんですか？\n")]);

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("run").arg("--dir").arg(temp_dir.path());

    cmd.assert().success().stdout(
        "> だれ は ヒトの フレンズ なんですか？\n解なしなのです\n",
    );
}

#[test]
fn test_cli_run_limits_solutions() {
    let temp_dir = workspace(&[(
        "nat.friends",
        "すごーい！ ゼロ は 自然数の フレンズ なんだね！\n\n\
         すごーい！ あなた が 自然数の フレンズ なら あなた の つぎ は 自然数の フレンズ なんだね！\n\n\
         だれ は 自然数の フレンズ なんですか？\n",
    )]);

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("run")
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--max-solutions")
        .arg("2");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("だれ は ゼロ 、"))
        .stdout(predicate::str::contains("だれ は ゼロ の つぎ 、"))
        .stdout(predicate::str::contains("だれ は ゼロ の つぎ の つぎ").not())
        .stdout(predicate::str::contains("stopped after 2 solutions"));
}

#[test]
fn test_cli_run_step_limit() {
    let temp_dir = workspace(&[(
        "loop.friends",
        "すごーい！ あなた が くりかえしの フレンズ なら あなた は くりかえしの フレンズ なんだね！\n\n\
         だれ は くりかえしの フレンズ なんですか？\n",
    )]);

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("run")
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--max-steps")
        .arg("1000");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("max_query_steps"))
        .stderr(predicate::str::contains("1 statement(s) failed"));
}

#[test]
fn test_cli_run_parse_error_handling() {
    let temp_dir = workspace(&[(
        "broken.friends",
        "すごーい！ かばんちゃん は ヒトの フレンズ\n\nだれ は ヒトの フレンズ なんですか？\n",
    )]);

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("run").arg("--dir").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("the statement is not well-formed"))
        .stdout(predicate::str::contains("解なしなのです"));
}

#[test]
fn test_cli_list_summary() {
    let temp_dir = workspace(&[("zoo.friends", ZOO)]);

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("list").arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Workspace contains 1 files, 2 rules"))
        .stdout(predicate::str::contains("ヒトの"))
        .stdout(predicate::str::contains("定命の"));
}

#[test]
fn test_cli_show_predicate() {
    let temp_dir = workspace(&[("zoo.friends", ZOO)]);

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("show")
        .arg("定命の")
        .arg("--dir")
        .arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("rules (1):"))
        .stdout(predicate::str::contains(
            "すごーい！ あなた は ヒトの フレンズ なら あなた は 定命の フレンズ なんだね！",
        ));
}

#[test]
fn test_cli_show_unknown_predicate() {
    let temp_dir = workspace(&[("zoo.friends", ZOO)]);

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("show")
        .arg("ゆうれいの")
        .arg("--dir")
        .arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Predicate 'ゆうれいの' not found"));
}

#[test]
fn test_cli_list_reports_parse_errors_with_location() {
    let temp_dir = workspace(&[("zoo.friends", "\n\nかばんちゃん は フレンズ\n")]);

    let mut cmd = Command::cargo_bin("friends").unwrap();
    cmd.arg("list").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("zoo.friends:3"));
}
