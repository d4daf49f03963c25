//! Spawns the `smia` binary against an in-process backend.

use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;

#[derive(Default)]
struct Backend {
	executed: Vec<String>,
	session: Option<Value>,
}

type Shared = Arc<Mutex<Backend>>;

async fn session(State(backend): State<Shared>) -> Json<Value> {
	match &backend.lock().unwrap().session {
		Some(session) => Json(json!({ "success": true, "session": session })),
		None => Json(json!({})),
	}
}

async fn execute(State(backend): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
	let command = body["command"].as_str().unwrap_or_default().to_string();
	let mut backend = backend.lock().unwrap();
	backend.executed.push(command.clone());
	if command.contains("/missing") {
		return Json(json!({ "success": false, "error": "disk not found" }));
	}
	if command.starts_with("login") {
		backend.session = Some(json!({ "partitionId": "341A", "username": "root", "isLoggedIn": true, "isRoot": true }));
	} else if command == "logout" {
		backend.session = None;
	}
	Json(json!({ "success": true, "output": format!("ok: {command}") }))
}

fn disk_listing(mounted_only: bool) -> Value {
	let mut partitions = vec![
		json!({ "name": "Part1", "id": "341A", "size": 2048, "type": "P", "isMounted": true, "status": "mounted" }),
		json!({ "name": "Part2", "id": "342A", "size": 2048, "type": "P", "isMounted": true, "status": "mounted" }),
		json!({ "name": "Part3", "id": "343A", "size": 1024, "type": "L", "isMounted": false, "status": "unmounted" }),
	];
	if mounted_only {
		partitions.retain(|p| p["isMounted"] == true);
	}
	json!({ "count": 1, "disks": [{ "path": "/tmp/Disco1.mia", "size": 10, "unit": "M", "fit": "FF", "partitions": partitions }] })
}

async fn disks() -> Json<Value> {
	Json(disk_listing(false))
}

async fn mounted() -> Json<Value> {
	Json(disk_listing(true))
}

async fn files(Json(body): Json<Value>) -> Json<Value> {
	Json(json!({
		"success": true,
		"path": body["path"],
		"files": [{ "name": "users.txt", "type": "file", "size": 27, "permissions": "664", "owner": "root", "group": "root" }]
	}))
}

async fn read_file() -> Json<Value> {
	Json(json!({ "success": true, "content": "1,G,root\n1,U,root,root,123\n" }))
}

async fn journaling() -> Json<Value> {
	Json(json!({
		"success": true,
		"entries": [
			{ "operation": "mkdir", "path": "/home", "content": "", "timestamp": "1700000000", "user": "root", "permissions": "664" },
			{ "operation": "mkfile", "path": "/home/a.txt", "content": "hola", "timestamp": "1700000060", "user": "root", "permissions": "664" }
		]
	}))
}

async fn repair() -> Json<Value> {
	Json(json!({ "success": true, "recovered": 2 }))
}

async fn spawn_backend(backend: Shared) -> String {
	let app = Router::new()
		.route("/health", get(|| async { "ok" }))
		.route("/session", get(session))
		.route("/execute", post(execute))
		.route("/disks", get(disks))
		.route("/disks/mounted", get(mounted))
		.route("/files", post(files))
		.route("/file/read", post(read_file))
		.route("/journaling", post(journaling))
		.route("/journaling/repair", post(repair))
		.with_state(backend);

	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});
	format!("http://{addr}")
}

fn logged_in_root() -> Shared {
	let backend = Shared::default();
	backend.lock().unwrap().session = Some(json!({ "partitionId": "341A", "username": "root", "isLoggedIn": true, "isRoot": true }));
	backend
}

fn unreachable_url() -> String {
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	let url = format!("http://{}", listener.local_addr().unwrap());
	drop(listener);
	url
}

/// Runs `smia` with an isolated home directory. Returns (success, stdout, stderr).
async fn run_smia(home: &Path, args: &[&str]) -> (bool, String, String) {
	let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_smia"))
		.current_dir(home)
		.env("HOME", home)
		.env("NO_COLOR", "1")
		.env_remove("SMIA_BACKEND_URL")
		.env_remove("RUST_LOG")
		.args(args)
		.output()
		.await
		.expect("failed to execute smia");

	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	(output.status.success(), stdout, stderr)
}

async fn run_json(home: &Path, url: &str, args: &[&str]) -> (bool, Value, String) {
	let mut full = vec!["-f", "json", "--backend", url, "--delay-ms", "0"];
	full.extend_from_slice(args);
	let (success, stdout, stderr) = run_smia(home, &full).await;
	let parsed = serde_json::from_str::<Value>(&stdout).unwrap_or_else(|_| json!({ "raw": stdout }));
	(success, parsed, stderr)
}

fn write_script(dir: &Path, name: &str, body: &str) -> String {
	let path = dir.join(name);
	std::fs::write(&path, body).unwrap();
	path.display().to_string()
}

#[tokio::test]
async fn run_executes_script_in_order() {
	let tmp = TempDir::new().unwrap();
	let backend = Shared::default();
	let url = spawn_backend(backend.clone()).await;
	let script = write_script(
		tmp.path(),
		"setup.smia",
		"# disks\nmkdisk -size=10 -unit=M -path=/tmp/Disco1.mia\nfdisk -size=2 -path=/tmp/Disco1.mia -name=Part1\n",
	);

	let (success, json, stderr) = run_json(tmp.path(), &url, &["run", &script]).await;

	assert!(success, "run failed: {stderr}");
	assert_eq!(json["ok"], true);
	assert_eq!(json["data"]["status"], "completed");
	assert_eq!(json["data"]["summary"]["succeeded"], 2);
	assert_eq!(
		backend.lock().unwrap().executed,
		["mkdisk -size=10 -unit=M -path=/tmp/Disco1.mia", "fdisk -size=2 -path=/tmp/Disco1.mia -name=Part1"]
	);
	let outputs: Vec<&str> = json["data"]["entries"]
		.as_array()
		.unwrap()
		.iter()
		.filter(|e| e["command"] != "")
		.map(|e| e["output"].as_str().unwrap())
		.collect();
	assert_eq!(outputs, ["ok: mkdisk -size=10 -unit=M -path=/tmp/Disco1.mia", "ok: fdisk -size=2 -path=/tmp/Disco1.mia -name=Part1"]);
}

#[tokio::test]
async fn failed_command_makes_exit_status_nonzero() {
	let tmp = TempDir::new().unwrap();
	let backend = Shared::default();
	let url = spawn_backend(backend.clone()).await;
	let script = write_script(tmp.path(), "bad.smia", "mkdisk -path=/tmp/missing.mia\nmkdisk -path=/tmp/ok.mia\n");

	let (success, json, _) = run_json(tmp.path(), &url, &["run", &script]).await;

	assert!(!success);
	assert_eq!(json["error"]["code"], "SCRIPT_FAILED");
	assert_eq!(json["data"]["summary"]["failed"], 1);
	assert_eq!(json["data"]["summary"]["succeeded"], 1);
	assert_eq!(backend.lock().unwrap().executed.len(), 2);
}

#[tokio::test]
async fn protected_script_is_blocked_without_session() {
	let tmp = TempDir::new().unwrap();
	let backend = Shared::default();
	let url = spawn_backend(backend.clone()).await;
	let script = write_script(tmp.path(), "files.smia", "mkdir -path=/home\nmkfile -path=/home/a.txt\n");

	let (success, json, _) = run_json(tmp.path(), &url, &["run", &script]).await;

	assert!(!success);
	assert_eq!(json["error"]["code"], "AUTH_ERROR");
	assert_eq!(json["data"]["blockedBy"], "mkdir -path=/home");
	assert!(backend.lock().unwrap().executed.is_empty());
}

#[tokio::test]
async fn reconciled_session_unblocks_protected_script() {
	let tmp = TempDir::new().unwrap();
	let backend = logged_in_root();
	let url = spawn_backend(backend.clone()).await;
	let script = write_script(tmp.path(), "files.smia", "mkdir -path=/home\n");

	let (success, json, stderr) = run_json(tmp.path(), &url, &["run", &script]).await;

	assert!(success, "run failed: {stderr}");
	assert_eq!(json["data"]["summary"]["succeeded"], 1);
	assert_eq!(backend.lock().unwrap().executed, ["mkdir -path=/home"]);
}

#[tokio::test]
async fn wrong_extension_is_rejected_before_connecting() {
	let tmp = TempDir::new().unwrap();
	let script = write_script(tmp.path(), "setup.txt", "mkdisk -size=5\n");

	let (success, json, _) = run_json(tmp.path(), &unreachable_url(), &["run", &script]).await;

	assert!(!success);
	assert_eq!(json["ok"], false);
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
	assert!(json["error"]["message"].as_str().unwrap().contains(".smia"));
}

#[tokio::test]
async fn unreachable_backend_rejects_run() {
	let tmp = TempDir::new().unwrap();
	let script = write_script(tmp.path(), "setup.smia", "mkdisk -size=5\n");

	let (success, json, _) = run_json(tmp.path(), &unreachable_url(), &["run", &script]).await;

	assert!(!success);
	assert_eq!(json["error"]["code"], "BACKEND_UNAVAILABLE");
	assert_eq!(json["data"]["status"], "rejected");

	let outputs: Vec<&str> = json["data"]["entries"]
		.as_array()
		.unwrap()
		.iter()
		.filter_map(|e| e["output"].as_str())
		.collect();
	assert_eq!(outputs.iter().filter(|o| o.starts_with("Backend unavailable")).count(), 2);
	assert!(outputs.contains(&"Trying to reconnect..."));
}

#[tokio::test]
async fn ndjson_streams_log_events_then_result() {
	let tmp = TempDir::new().unwrap();
	let url = spawn_backend(Shared::default()).await;
	let script = write_script(tmp.path(), "one.smia", "mkdisk -size=5\n");

	let (success, stdout, stderr) = run_smia(tmp.path(), &["-f", "ndjson", "--backend", &url, "run", &script]).await;
	assert!(success, "run failed: {stderr}");

	let lines: Vec<Value> = stdout.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
	let committed: Vec<&Value> = lines.iter().filter(|l| l["event"] == "committed").collect();
	assert_eq!(committed.len(), 1);
	assert_eq!(committed[0]["entry"]["status"], "success");
	assert!(lines.iter().any(|l| l["event"] == "appended" && l["entry"]["status"] == "running"));

	let last = lines.last().unwrap();
	assert_eq!(last["command"], "run");
	assert_eq!(last["ok"], true);
	assert!(last["data"].get("entries").is_none());
}

#[tokio::test]
async fn text_run_prints_entries_and_summary() {
	let tmp = TempDir::new().unwrap();
	let url = spawn_backend(Shared::default()).await;
	let script = write_script(tmp.path(), "one.smia", "mkdisk -size=5\n");

	let (success, stdout, stderr) = run_smia(tmp.path(), &["--backend", &url, "--delay-ms", "0", "run", &script]).await;

	assert!(success, "run failed: {stderr}");
	assert!(stdout.contains("Connected to backend"));
	assert!(stdout.contains("ok: mkdisk -size=5"));
	assert!(stdout.trim_end().ends_with("Done: 1 succeeded"), "{stdout}");
}

#[tokio::test]
async fn session_reports_backend_session() {
	let tmp = TempDir::new().unwrap();
	let url = spawn_backend(logged_in_root()).await;

	let (success, json, stderr) = run_json(tmp.path(), &url, &["session"]).await;

	assert!(success, "session failed: {stderr}");
	assert_eq!(json["data"]["session"]["username"], "root");
	assert_eq!(json["data"]["session"]["partitionId"], "341A");
	assert_eq!(json["data"]["session"]["isRoot"], true);
}

#[tokio::test]
async fn login_defaults_to_first_mounted_partition() {
	let tmp = TempDir::new().unwrap();
	let backend = Shared::default();
	let url = spawn_backend(backend.clone()).await;

	let (success, json, stderr) = run_json(tmp.path(), &url, &["login", "--user", "root", "--pass", "123"]).await;

	assert!(success, "login failed: {stderr}");
	assert_eq!(json["data"]["session"]["partitionId"], "341A");
	assert_eq!(backend.lock().unwrap().executed, ["login -user=root -pass=123 -id=341A"]);
}

#[tokio::test]
async fn logout_closes_backend_session() {
	let tmp = TempDir::new().unwrap();
	let backend = logged_in_root();
	let url = spawn_backend(backend.clone()).await;

	let (success, json, _) = run_json(tmp.path(), &url, &["logout"]).await;

	assert!(success);
	assert_eq!(json["data"]["loggedOut"], true);
	assert_eq!(json["data"]["previous"], "root@341A");
	assert!(backend.lock().unwrap().session.is_none());
}

#[tokio::test]
async fn listing_another_partition_is_denied() {
	let tmp = TempDir::new().unwrap();
	let backend = Shared::default();
	backend.lock().unwrap().session = Some(json!({ "partitionId": "341A", "username": "user1", "isLoggedIn": true, "isRoot": false }));
	let url = spawn_backend(backend).await;

	let (success, json, _) = run_json(tmp.path(), &url, &["ls", "--id", "342A"]).await;
	assert!(!success);
	assert_eq!(json["error"]["code"], "ACCESS_DENIED");

	let (success, json, stderr) = run_json(tmp.path(), &url, &["ls", "--id", "341a"]).await;
	assert!(success, "ls failed: {stderr}");
	assert_eq!(json["data"]["files"][0]["name"], "users.txt");
}

#[tokio::test]
async fn cat_prints_file_content_as_text() {
	let tmp = TempDir::new().unwrap();
	let url = spawn_backend(logged_in_root()).await;

	let (success, stdout, stderr) = run_smia(tmp.path(), &["--backend", &url, "cat", "--id", "343A", "/users.txt"]).await;

	assert!(success, "cat failed: {stderr}");
	assert_eq!(stdout, "1,G,root\n1,U,root,root,123\n");
}

#[tokio::test]
async fn journal_show_filters_entries() {
	let tmp = TempDir::new().unwrap();
	let url = spawn_backend(logged_in_root()).await;

	let (success, json, stderr) = run_json(tmp.path(), &url, &["journal", "show", "--filter", "A.TXT"]).await;

	assert!(success, "journal failed: {stderr}");
	assert_eq!(json["data"]["partitionId"], "341A");
	assert_eq!(json["data"]["total"], 2);
	let entries = json["data"]["entries"].as_array().unwrap();
	assert_eq!(entries.len(), 1);
	assert_eq!(entries[0]["operation"], "mkfile");
	assert_eq!(entries[0]["content"], "hola");
}

#[tokio::test]
async fn journal_without_session_needs_partition() {
	let tmp = TempDir::new().unwrap();
	let url = spawn_backend(Shared::default()).await;

	let (success, json, _) = run_json(tmp.path(), &url, &["journal", "show"]).await;

	assert!(!success);
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
	assert!(json["error"]["message"].as_str().unwrap().contains("Select a mounted partition or log in to a partition"));
}

#[tokio::test]
async fn logged_out_journal_by_id_is_refused() {
	let tmp = TempDir::new().unwrap();
	let url = spawn_backend(Shared::default()).await;

	let (success, json, _) = run_json(tmp.path(), &url, &["journal", "show", "--id", "341A"]).await;
	assert!(!success);
	assert_eq!(json["error"]["code"], "AUTH_ERROR");

	let (success, json, _) = run_json(tmp.path(), &url, &["journal", "repair", "--id", "341A"]).await;
	assert!(!success);
	assert_eq!(json["error"]["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn journal_repair_reports_recovered_count() {
	let tmp = TempDir::new().unwrap();
	let url = spawn_backend(logged_in_root()).await;

	let (success, json, _) = run_json(tmp.path(), &url, &["journal", "repair", "--id", "341A"]).await;

	assert!(success);
	assert_eq!(json["data"]["recovered"], 2);
}

#[tokio::test]
async fn backend_url_comes_from_config_file() {
	let tmp = TempDir::new().unwrap();
	let url = spawn_backend(Shared::default()).await;
	let config_dir = tmp.path().join(".config").join("smia");
	std::fs::create_dir_all(&config_dir).unwrap();
	std::fs::write(config_dir.join("config.json"), json!({ "backendUrl": url }).to_string()).unwrap();

	let (success, stdout, stderr) = run_smia(tmp.path(), &["-f", "json", "disks", "--mounted"]).await;

	assert!(success, "disks failed: {stderr}");
	let json: Value = serde_json::from_str(&stdout).unwrap();
	let partitions = json["data"]["disks"][0]["partitions"].as_array().unwrap();
	assert_eq!(partitions.len(), 2);
}
