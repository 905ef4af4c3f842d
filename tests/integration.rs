use std::{
    env, fs,
    io::Write,
    path::PathBuf,
    process::{Command, Output, Stdio},
};

fn run_bin(args: &[&str], stdin: &str) -> Output {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_meanlib"));

    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to execute command");

    child
        .stdin
        .take()
        .expect("failed to open stdin")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");

    child.wait_with_output().expect("failed to wait for command")
}

fn run_ok(args: &[&str], stdin: &str) -> String {
    let output = run_bin(args, stdin);

    let stdout_str =
        std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

    assert!(
        output.status.success(),
        "failed to run binary with {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
    );

    stdout_str.to_string()
}

#[test]
fn one_shot_means() {
    assert_eq!(run_ok(&["mean", "1", "2", "6"], ""), "3.0\n");
    assert_eq!(run_ok(&["mean"], ""), "none\n");
    assert_eq!(run_ok(&["mean", "1", "2+3j"], ""), "(1.5+1.5j)\n");
    assert_eq!(
        run_ok(
            &["weighted", "--values", "3,5,8,10", "--weights", "1,2,3,4"],
            ""
        ),
        "7.7\n"
    );
    assert_eq!(
        run_ok(&["weighted", "--values", "-2+3j,4", "--weights", "1,1"], ""),
        "(1.0+1.5j)\n"
    );
    assert_eq!(
        run_ok(&["weighted", "--values", "-1,3", "--weights", "-1,3"], ""),
        "5.0\n"
    );
    assert_eq!(run_ok(&["geometric", "4", "9"], ""), "6.0\n");
    assert_eq!(run_ok(&["harmonic", "2", "2"], ""), "2.0\n");
}

#[test]
fn one_shot_errors_fail_the_command() {
    let output = run_bin(&["harmonic", "1", "0"], "");
    assert!(!output.status.success());

    let output = run_bin(&["weighted", "--values", "1,2", "--weights", "1"], "");
    assert!(!output.status.success());

    let output = run_bin(&["mean", "1", "two"], "");
    assert!(!output.status.success());
}

#[test]
fn stream_window_mean() {
    let stdin = "10\n20\n30\n40\n50\n60\n70 80\n\n90 100\n";
    let stdout = run_ok(&["stream", "--max-size", "5"], stdin);
    assert_eq!(
        stdout,
        "10.0\n15.0\n20.0\n25.0\n30.0\n40.0\n60.0\n80.0\n"
    );
}

#[test]
fn stream_running_mean_skips_bad_lines() {
    let stdin = "5\n10 15 20\nabc\n2+3j\n";
    let stdout = run_ok(&["stream", "--kind", "simple"], stdin);
    assert_eq!(stdout, "5.0\n12.5\n(10.4+0.6j)\n");
}

#[test]
fn stream_from_config_file() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("stream_from_config_file");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir_all(&test_dir).expect("failed to create test directory");

    let config_path = test_dir.join("config.toml");
    let config_contents = String::new()
        + "[stream]\n"
        + "kind = \"geometric\"\n"
        + "max_size = \"2\"\n";
    fs::write(&config_path, config_contents).expect("failed to write config file");

    let config_str = config_path
        .to_str()
        .expect("failed to convert config path to string");

    let stdout = run_ok(&["stream", "--config", config_str], "2\n8\n-1\n1 9\n");
    assert_eq!(stdout, "2.0\n4.0\n3.0\n");

    // Flags take precedence over the file.
    let stdout = run_ok(
        &["stream", "--config", config_str, "--kind", "arithmetic", "--max-size", "3"],
        "2\n8\n-1\n1 9\n",
    );
    assert_eq!(stdout, "2.0\n5.0\n3.0\n3.0\n");

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn stream_with_huge_max_size() {
    let stdout = run_ok(&["stream", "--max-size", "100000000000000"], "1\n2 3\n");
    assert_eq!(stdout, "1.0\n2.0\n");
}

#[test]
fn stream_rejects_invalid_max_size() {
    for max_size in ["0", "-2", "abc"] {
        let output = run_bin(&["stream", "--max-size", max_size], "");
        assert!(!output.status.success(), "{max_size:?}");
    }

    let output = run_bin(&["stream", "--kind", "simple", "--max-size", "2"], "");
    assert!(!output.status.success());
}
