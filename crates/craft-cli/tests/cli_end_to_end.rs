use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;

const TOKEN: &str = "test-token";

/// A `craft` invocation pointed at `server`, with a clean environment
fn craft(server: &MockServer) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("craft"));
    cmd.env("CRAFT_API_URL", server.url("/api/v1"))
        .env("CRAFT_API_TOKEN", TOKEN)
        .env_remove("CRAFT_LOG");
    cmd
}

#[test]
fn blocks_get_markdown_end_to_end() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/blocks")
            .query_param("date", "today")
            .header("accept", "text/markdown")
            .header("authorization", format!("Bearer {TOKEN}"));
        then.status(200)
            .header("content-type", "text/markdown")
            .body("# Today\n- standup");
    });

    craft(&server)
        .args(["blocks", "get", "--date", "today", "--accept", "markdown", "--raw"])
        .assert()
        .success()
        .stdout(contains("# Today\n- standup"));

    mock.assert();
}

#[test]
fn json_responses_are_pretty_printed() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/tasks")
            .query_param("scope", "inbox");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"items":[{"id":"t1"}]}"#);
    });

    let assert = craft(&server)
        .args(["tasks", "list", "--scope", "inbox"])
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("\"id\": \"t1\""));
    mock.assert();
}

#[test]
fn insert_markdown_sends_text_with_position_query() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/blocks")
            .query_param("position", r#"{"position":"end","date":"today"}"#)
            .header("content-type", "text/markdown")
            .body("# Hello");
        then.status(200).body("{}");
    });

    craft(&server)
        .args([
            "blocks",
            "insert",
            "--markdown",
            "# Hello",
            "--position",
            r#"{"position":"end","date":"today"}"#,
        ])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn delete_without_confirm_sends_nothing() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/blocks");
        then.status(200);
    });

    craft(&server)
        .args(["blocks", "delete", "--ids", "b1"])
        .assert()
        .code(1)
        .stderr(contains(
            "Refusing to run blocks delete without --confirm (destructive action).",
        ));

    mock.assert_calls(0);
}

#[test]
fn delete_with_confirm_sends_ids() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/api/v1/tasks")
            .header("content-type", "application/json")
            .json_body(serde_json::json!({"idsToDelete": ["t1", "t2"]}));
        then.status(200).body(r#"{"deleted":2}"#);
    });

    craft(&server)
        .args(["tasks", "delete", "--ids", "t1", "--ids", "t2", "--confirm"])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn body_file_dash_reads_stdin() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/tasks")
            .json_body(serde_json::json!({"tasks": [{"markdown": "Call Sam"}]}));
        then.status(201).body(r#"{"items":[]}"#);
    });

    craft(&server)
        .args(["tasks", "add", "--body-file", "-"])
        .write_stdin(r#"{"tasks": [{"markdown": "Call Sam"}]}"#)
        .assert()
        .success();

    mock.assert();
}

#[test]
fn error_status_goes_to_stderr_with_exit_one() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/collections/missing/items");
        then.status(404).body(r#"{"error":"not found"}"#);
    });

    craft(&server)
        .args(["collections", "items", "missing"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(contains("404 Not Found"))
        .stderr(contains("\"error\": \"not found\""));

    mock.assert();
}

#[test]
fn url_flag_overrides_environment() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/collections")
            .header("authorization", "Bearer flag-token");
        then.status(200).body("[]");
    });

    Command::new(assert_cmd::cargo::cargo_bin!("craft"))
        .env("CRAFT_API_URL", "http://127.0.0.1:1/unused")
        .env("CRAFT_API_TOKEN", "env-token")
        .args(["collections", "list"])
        .args(["--url", &server.url("/api/v1/"), "--token", "flag-token"])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn missing_base_url_fails_fast() {
    Command::new(assert_cmd::cargo::cargo_bin!("craft"))
        .env_remove("CRAFT_API_URL")
        .env_remove("CRAFT_API_TOKEN")
        .args(["tasks", "list", "--scope", "active"])
        .assert()
        .code(1)
        .stderr(contains("Missing API base URL"));
}

#[test]
fn validation_runs_before_configuration() {
    Command::new(assert_cmd::cargo::cargo_bin!("craft"))
        .env_remove("CRAFT_API_URL")
        .args(["tasks", "list"])
        .assert()
        .code(1)
        .stderr(contains("--scope is required"));
}

#[test]
fn request_passes_query_and_headers() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/api/v1/custom/endpoint")
            .query_param("a", "2")
            .header("x-trace", "abc")
            .header("content-type", "text/plain")
            .body("hello");
        then.status(204);
    });

    craft(&server)
        .args(["request", "patch", "custom/endpoint"])
        .args(["--query", "a=1", "--query", "a=2"])
        .args(["--header", "X-Trace=abc"])
        .args(["--data", "hello", "--content-type", "text/plain"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    mock.assert();
}

#[test]
fn daily_notes_search_repeats_terms() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/daily-notes/search")
            .query_param("include", "alpha")
            .query_param("include", "beta")
            .query_param("regexps", "^todo");
        then.status(200).body("[]");
    });

    craft(&server)
        .args(["daily-notes", "search", "--include", "alpha", "--include", "beta"])
        .args(["--regex", "^todo"])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn unreachable_server_is_reported() {
    Command::new(assert_cmd::cargo::cargo_bin!("craft"))
        .env("CRAFT_API_URL", "http://127.0.0.1:1/api/v1")
        .args(["collections", "list"])
        .assert()
        .code(1)
        .stderr(contains("Error: Request failed"));
}
