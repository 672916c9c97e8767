use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn git_swift_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_git-swift"))
}

fn git(dir: &Path, args: &[&str]) -> Output {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

fn init_test_repo(dir: &Path) {
    git(dir, &["init", "-b", "main"]);
    git(dir, &["config", "user.email", "test@test.com"]);
    git(dir, &["config", "user.name", "Test"]);
    fs::write(dir.join("README.md"), "# test").unwrap();
    git(dir, &["add", "."]);
    git(dir, &["commit", "-m", "init"]);
}

fn current_branch(dir: &Path) -> String {
    let output = git(dir, &["branch", "--show-current"]);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

struct TestEnv {
    tmp: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("config")).unwrap();
        fs::create_dir_all(tmp.path().join("cache")).unwrap();
        Self { tmp }
    }

    /// A repo on `main` with `feature/x` and `feature/y` branches.
    fn repo(&self) -> PathBuf {
        let repo = self.tmp.path().join("repo");
        fs::create_dir_all(&repo).unwrap();
        init_test_repo(&repo);
        git(&repo, &["branch", "feature/x"]);
        git(&repo, &["branch", "feature/y"]);
        repo
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Output {
        Command::new(git_swift_binary())
            .args(args)
            .current_dir(dir)
            .env("XDG_CONFIG_HOME", self.tmp.path().join("config"))
            .env("XDG_CACHE_HOME", self.tmp.path().join("cache"))
            .env("GIT_CEILING_DIRECTORIES", self.tmp.path())
            .output()
            .unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

#[test]
fn test_e2e_exact_branch_switch() {
    let env = TestEnv::new();
    let repo = env.repo();

    let output = env.run(&repo, &["feature/y"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "▶ Switched to branch 'feature/y'");
    assert_eq!(current_branch(&repo), "feature/y");
}

#[test]
fn test_e2e_unique_fuzzy_match_switches() {
    let env = TestEnv::new();
    let repo = env.repo();

    let output = env.run(&repo, &["fx"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "▶ Fuzzy match found; switched to branch 'feature/x'"
    );
    assert_eq!(current_branch(&repo), "feature/x");
}

#[test]
fn test_e2e_already_on_branch() {
    let env = TestEnv::new();
    let repo = env.repo();

    let output = env.run(&repo, &["main"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "▶ Already on branch 'main'");
    assert_eq!(current_branch(&repo), "main");
}

#[test]
fn test_e2e_fuzzy_match_of_current_branch() {
    let env = TestEnv::new();
    let repo = env.repo();

    let output = env.run(&repo, &["mn"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "▶ Already on branch 'main'");
}

#[test]
fn test_e2e_outside_repository_fails() {
    let env = TestEnv::new();
    let not_a_repo = env.tmp.path().join("plain");
    fs::create_dir_all(&not_a_repo).unwrap();

    let output = env.run(&not_a_repo, &["main"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).starts_with("Error: error getting branches"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_e2e_invalid_config_fails() {
    let env = TestEnv::new();
    let repo = env.repo();
    let config_dir = env.tmp.path().join("config").join("git-swift");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[ui]\nunknown_field = 1\n").unwrap();

    let output = env.run(&repo, &["feature/x"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error: "));
    assert_eq!(current_branch(&repo), "main");
}

#[test]
fn test_e2e_missing_config_override_fails() {
    let env = TestEnv::new();
    let repo = env.repo();
    let missing = env.tmp.path().join("nope.toml");

    let output = env.run(&repo, &["--config", missing.to_str().unwrap(), "feature/x"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(current_branch(&repo), "main");
}

#[test]
fn test_e2e_config_override_is_used() {
    let env = TestEnv::new();
    let repo = env.repo();
    let config = env.tmp.path().join("custom.toml");
    fs::write(&config, "[log]\nlevel = \"debug\"\n").unwrap();

    let output = env.run(&repo, &["-c", config.to_str().unwrap(), "feature/x"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let log = env
        .tmp
        .path()
        .join("cache")
        .join("git-swift")
        .join("git-swift.log");
    let contents = fs::read_to_string(log).unwrap();
    assert!(contents.contains("running git"), "log: {contents}");
}

#[test]
fn test_e2e_log_level_flag_overrides_config() {
    let env = TestEnv::new();
    let repo = env.repo();

    let output = env.run(&repo, &["--log-level", "off", "feature/x"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(
        !env.tmp
            .path()
            .join("cache")
            .join("git-swift")
            .join("git-swift.log")
            .exists()
    );

    let output = env.run(&repo, &["--log-level", "loud", "main"]);
    assert!(!output.status.success());
}
