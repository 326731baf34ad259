use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::sync::OnceLock;

use recast_testkit::{fixture_path as shared_fixture_path, target_dir as workspace_target_dir};

static RECAST_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture_arg(name: &str) -> String {
	shared_fixture_path(name).to_string_lossy().into_owned()
}

pub(crate) fn run_recast(args: &[&str]) -> Output {
	Command::new(recast_bin()).args(args).output().expect("recast command executes")
}

pub(crate) fn run_recast_with_stdin(args: &[&str], input: &str) -> Output {
	let mut child = Command::new(recast_bin())
		.args(args)
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.expect("recast command spawns");
	child
		.stdin
		.take()
		.expect("stdin is piped")
		.write_all(input.as_bytes())
		.expect("stdin accepts input");
	child.wait_with_output().expect("recast command completes")
}

pub(crate) fn run_recast_json(args: &[&str]) -> serde_json::Value {
	let output = run_recast(args);
	assert!(
		output.status.success(),
		"recast command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn recast_bin() -> &'static PathBuf {
	RECAST_BIN.get_or_init(resolve_recast_bin)
}

fn resolve_recast_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_recast") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "recast.exe" } else { "recast" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "recast"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build recast binary at {}", bin.display());

	bin
}
