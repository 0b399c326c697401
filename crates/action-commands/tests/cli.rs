use std::process::{Command, Output};

fn action_cmd(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_action-cmd"))
        .args(args)
        .env_remove("RUNNER_DEBUG")
        .env_remove("ACTION_CMD_LOG")
        .output()
        .expect("run action-cmd")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn command_with_params_and_json() {
    let out = action_cmd(&[
        "command",
        "cmd",
        "-p",
        "dict={\"test\":\"me\"}",
        "-p",
        "bool=true",
        "--json",
        "{\"test\":\"me\"}",
    ]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "::cmd dict={\"test\"%3A\"me\"},bool=true::{\"test\":\"me\"}\n"
    );
}

#[test]
fn set_output_escapes_value() {
    let out = action_cmd(&["set-output", "rpm", "a\nb"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "::set-output name=rpm::a%0Ab\n");
}

#[test]
fn get_input_reads_env() {
    let out = Command::new(env!("CARGO_BIN_EXE_action-cmd"))
        .args(["get-input", "source-dir"])
        .env("INPUT_SOURCE_DIR", "  rpm/ ")
        .output()
        .expect("run action-cmd");
    assert!(out.status.success());
    assert_eq!(stdout(&out), "rpm/\n");
}

#[test]
fn missing_required_input_fails() {
    let out = Command::new(env!("CARGO_BIN_EXE_action-cmd"))
        .args(["get-input", "specfile", "--required"])
        .env_remove("INPUT_SPECFILE")
        .output()
        .expect("run action-cmd");
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        stdout(&out),
        "::error::Input required and not supplied: specfile\n"
    );
}

#[test]
fn fail_exits_non_zero() {
    let out = action_cmd(&["fail", "docker build failed"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "::error::docker build failed\n");
}

#[test]
fn echo_toggles() {
    assert_eq!(stdout(&action_cmd(&["echo", "on"])), "::echo::on\n");
    assert_eq!(stdout(&action_cmd(&["echo", "off"])), "::echo::off\n");
}

#[test]
fn release_dry_run_reports_tags() {
    let out = action_cmd(&["release", "v1.2.3", "--dry-run"]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "::set-output name=tags::[\"v1\",\"v1.2\",\"v1.2.3\"]\n"
    );
}

#[cfg(unix)]
#[test]
fn group_propagates_child_exit_code() {
    let out = action_cmd(&["group", "Build", "--", "sh", "-c", "echo inside; exit 4"]);
    assert_eq!(out.status.code(), Some(4));
    assert_eq!(
        stdout(&out),
        "::group::Build\ninside\n::endgroup::\n::error::command failed with 4: sh -c echo inside; exit 4\n"
    );
}

#[test]
fn whitespace_input_counts_as_supplied() {
    let out = Command::new(env!("CARGO_BIN_EXE_action-cmd"))
        .args(["get-input", "arch", "--required", "--default", "armv7hl"])
        .env("INPUT_ARCH", "   ")
        .output()
        .expect("run action-cmd");
    assert!(out.status.success());
    assert_eq!(stdout(&out), "\n");
}

#[test]
fn help_describes_every_subcommand() {
    let out = action_cmd(&["--help"]);
    assert!(out.status.success());
    let help = stdout(&out);
    for line in [
        "Emit a debug message",
        "Emit a warning annotation",
        "Emit an error annotation",
        "Register a named step output",
        "Save a value for a later step",
        "Turn echoing of workflow commands",
        "Mask a value",
    ] {
        assert!(help.contains(line), "missing {line:?} in:\n{help}");
    }

    let release = stdout(&action_cmd(&["release", "--help"]));
    assert!(release.contains("Git remote to push the tags to"));
    assert!(release.contains("Print the git commands without running them"));
}
