use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CORPUS: &str = "the cat sat on the mat. the rat ate the hat. that is that.\n";

fn workspace_with_corpus() -> TempDir {
	let workspace = tempfile::tempdir().expect("create tempdir");
	fs::write(workspace.path().join("corpus.txt"), CORPUS).expect("write corpus");
	workspace
}

fn run(dir: &Path, args: &[&str]) -> String {
	let output = Command::cargo_bin("rs-markov")
		.expect("binary exists")
		.current_dir(dir)
		.args(args)
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();
	String::from_utf8(output).expect("stdout is utf-8")
}

#[test]
fn prints_initial_and_generated_text() {
	let workspace = workspace_with_corpus();
	let stdout = run(workspace.path(), &["3", "say the", "40", "fixed", "corpus.txt"]);

	let lines: Vec<&str> = stdout.lines().collect();
	assert_eq!(lines[0], "say the");
	assert!(lines[1].starts_with("the"), "generation starts from the trailing window");
}

#[test]
fn fixed_mode_is_reproducible() {
	let workspace = workspace_with_corpus();
	let args = ["2", "th", "200", "fixed", "corpus.txt", "--seed", "42"];
	assert_eq!(run(workspace.path(), &args), run(workspace.path(), &args));
}

#[test]
fn short_initial_text_is_echoed() {
	let workspace = workspace_with_corpus();
	let stdout = run(workspace.path(), &["4", "ab", "50", "random", "corpus.txt"]);
	assert_eq!(stdout, "ab\nab\n");
}

#[test]
fn dump_writes_table_to_stderr() {
	let workspace = workspace_with_corpus();
	let output = Command::cargo_bin("rs-markov")
		.expect("binary exists")
		.current_dir(workspace.path())
		.args(["8", "the cat ", "0", "fixed", "corpus.txt", "--dump", "json"])
		.assert()
		.success()
		.get_output()
		.clone();

	let stderr = String::from_utf8(output.stderr).expect("stderr is utf-8");
	let json: serde_json::Value = serde_json::from_str(&stderr).expect("dump is valid JSON");
	assert_eq!(json["window_length"], 8);
	assert!(json["table"]["the cat "].is_object());
}

#[test]
fn missing_corpus_fails() {
	let workspace = tempfile::tempdir().expect("create tempdir");
	let output = Command::cargo_bin("rs-markov")
		.expect("binary exists")
		.current_dir(workspace.path())
		.args(["3", "abc", "10", "fixed", "missing.txt"])
		.assert()
		.failure()
		.get_output()
		.clone();

	let stderr = String::from_utf8(output.stderr).expect("stderr is utf-8");
	assert!(stderr.contains("missing.txt"));
}

#[test]
fn corpus_shorter_than_window_fails() {
	let workspace = workspace_with_corpus();
	fs::write(workspace.path().join("tiny.txt"), "ab").expect("write corpus");
	Command::cargo_bin("rs-markov")
		.expect("binary exists")
		.current_dir(workspace.path())
		.args(["5", "abcde", "10", "fixed", "tiny.txt"])
		.assert()
		.failure();
}

#[test]
fn zero_window_fails() {
	let workspace = workspace_with_corpus();
	Command::cargo_bin("rs-markov")
		.expect("binary exists")
		.current_dir(workspace.path())
		.args(["0", "abc", "10", "fixed", "corpus.txt"])
		.assert()
		.failure();
}

#[test]
fn invalid_arguments_are_rejected() {
	Command::cargo_bin("rs-markov")
		.expect("binary exists")
		.args(["three", "abc", "10", "fixed", "corpus.txt"])
		.assert()
		.failure()
		.code(2);
}
