use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn create_test_tree(files: &[&str]) -> Result<TempDir> {
    let dir = tempdir()?;
    for name in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, "content")?;
    }
    Ok(dir)
}

fn zfind(root: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("zfind")?;
    cmd.current_dir(root);
    Ok(cmd)
}

#[test]
fn test_list_prints_relative_paths() -> Result<()> {
    let dir = create_test_tree(&["README.md", "src/main.rs", "src/util/mod.rs", ".git/HEAD"])?;

    zfind(dir.path())?
        .args(["list", "--sort", "-d", "."])
        .assert()
        .success()
        .stdout("README.md\nsrc/main.rs\nsrc/util/mod.rs\n");
    Ok(())
}

#[test]
fn test_list_with_each_strategy() -> Result<()> {
    let dir = create_test_tree(&["a.txt", "b/c.txt"])?;

    for strategy in ["channel", "lock", "auto"] {
        zfind(dir.path())?
            .args(["list", "--sort", "-s", strategy])
            .assert()
            .success()
            .stdout("a.txt\nb/c.txt\n");
    }
    Ok(())
}

#[test]
fn test_list_query_ranks_matches() -> Result<()> {
    let dir = create_test_tree(&["src/main.rs", "docs/guide.md", "Cargo.toml"])?;

    zfind(dir.path())?
        .args(["list", "-q", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/main.rs"))
        .stdout(predicate::str::contains("guide.md").not());
    Ok(())
}

#[test]
fn test_list_limit() -> Result<()> {
    let dir = create_test_tree(&["1.txt", "2.txt", "3.txt", "4.txt"])?;

    zfind(dir.path())?
        .args(["list", "--sort", "--limit", "2"])
        .assert()
        .success()
        .stdout("1.txt\n2.txt\n");
    Ok(())
}

#[test]
fn test_list_stats() -> Result<()> {
    let dir = create_test_tree(&["a.txt", "b.txt", ".git/config"])?;

    zfind(dir.path())?
        .args(["list", "--stats", "--no-color", "-s", "lock"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"))
        .stdout(predicate::str::contains("using the lock strategy"))
        .stdout(predicate::str::contains("pruned: 1"));
    Ok(())
}

#[test]
fn test_missing_root_fails() -> Result<()> {
    let dir = tempdir()?;

    zfind(dir.path())?
        .args(["list", "-d", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error getting files"));
    Ok(())
}

#[test]
fn test_unknown_strategy_fails() -> Result<()> {
    let dir = create_test_tree(&["a.txt"])?;

    zfind(dir.path())?
        .args(["list", "-s", "bogus"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn test_log_file_is_written() -> Result<()> {
    let dir = create_test_tree(&["a.txt"])?;
    let logs = tempdir()?;
    let log_path = logs.path().join("debug.log");

    zfind(dir.path())?
        .args(["list", "--log-level", "info", "--log-file"])
        .arg(&log_path)
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout("a.txt\n");

    let contents = fs::read_to_string(&log_path)?;
    assert!(contents.contains("Files loaded: 1"));
    Ok(())
}

#[test]
fn test_config_file_sets_strategy() -> Result<()> {
    let dir = create_test_tree(&["a.txt"])?;
    let config_dir = tempdir()?;
    let config_path = config_dir.path().join("zfind.yaml");
    fs::write(&config_path, "strategy: channel\nchannel_capacity: 4\n")?;

    zfind(dir.path())?
        .args(["list", "--stats", "--no-color", "-c"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("using the channel strategy"));
    Ok(())
}

#[test]
fn test_config_command_prints_effective_settings() -> Result<()> {
    let dir = tempdir()?;

    zfind(dir.path())?
        .args(["config", "-s", "lock", "--capacity", "32", "--no-follow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strategy: lock"))
        .stdout(predicate::str::contains("channel_capacity: 32"))
        .stdout(predicate::str::contains("follow_links: false"));
    Ok(())
}
