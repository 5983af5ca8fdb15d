use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::thread;
use tempfile::tempdir;

fn dashboard() -> Command {
    let mut cmd = Command::cargo_bin("dashboard").unwrap();
    cmd.env_remove("DASHBOARD_CONFIG");
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}

fn write_report(dir: &tempfile::TempDir, name: &str, json: &str) -> String {
    let file = dir.path().join(name);
    fs::write(&file, json).unwrap();
    file.to_str().unwrap().to_string()
}

mod render_tests {
    use super::*;

    #[test]
    fn test_render_local_file() {
        let dir = tempdir().unwrap();
        let file = write_report(
            &dir,
            "duplicates.json",
            r#"[{"crate":"serde","versions":2},{"crate":"syn","versions":3}]"#,
        );

        dashboard()
            .args(["render", &file, "--id", "duplicates", "--title", "Duplicates"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"<div id="duplicates""#))
            .stdout(predicate::str::contains(r#"<h3 class="card-title">Duplicates</h3>"#))
            .stdout(predicate::str::contains("<th>crate</th><th>versions</th>"))
            .stdout(predicate::str::contains("<td>serde</td><td>2</td>"))
            .stdout(predicate::str::contains("ul class=\"pagination\"").not());
    }

    #[test]
    fn test_render_empty_report_is_all_good() {
        let dir = tempdir().unwrap();
        let file = write_report(&dir, "empty.json", "[]");

        dashboard()
            .args(["render", &file])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"<p class="alert alert-success">All good</p>"#,
            ));
    }

    #[test]
    fn test_render_selected_page_and_columns() {
        let dir = tempdir().unwrap();
        let records: Vec<Value> = (0..12)
            .map(|i| serde_json::json!({ "name": format!("crate-{i}"), "size": i }))
            .collect();
        let file = write_report(&dir, "bloat.json", &Value::Array(records).to_string());

        dashboard()
            .args(["render", &file, "--columns", "size,name", "--page", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("<th>size</th><th>name</th>"))
            .stdout(predicate::str::contains("<td>10</td><td>crate-10</td>"))
            .stdout(predicate::str::contains("<td>0</td>").not())
            .stdout(predicate::str::contains(r#"<a class="active" data-index="2">3</a>"#));
    }

    #[test]
    fn test_render_missing_file_fails() {
        dashboard()
            .args(["render", "/nonexistent/report.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read file"));
    }

    #[test]
    fn test_render_rejects_non_array() {
        let dir = tempdir().unwrap();
        let file = write_report(&dir, "object.json", r#"{"crate":"serde"}"#);

        dashboard()
            .args(["render", &file])
            .assert()
            .failure()
            .stderr(predicate::str::contains("JSON array"));
    }

    #[test]
    fn test_render_rejects_rows_wider_than_columns() {
        let dir = tempdir().unwrap();
        let file = write_report(&dir, "rows.json", r#"[["tokio","1.42","extra"]]"#);

        dashboard()
            .args(["render", &file, "--columns", "crate,version"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("3 cells but only 2 columns"));
    }

    #[test]
    fn test_render_http_error_reports_status() {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let response =
                    tiny_http::Response::from_string(r#"{"error":"gone"}"#).with_status_code(404);
                let _ = request.respond(response);
            }
        });

        dashboard()
            .args(["render", &format!("http://127.0.0.1:{port}/report.json")])
            .assert()
            .failure()
            .stderr(predicate::str::contains("HTTP status 404"));
    }

    #[test]
    fn test_render_http_source() {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let response = tiny_http::Response::from_string(r#"[["tokio","1.42"]]"#);
                let _ = request.respond(response);
            }
        });

        dashboard()
            .args([
                "render",
                &format!("http://127.0.0.1:{port}/report.json"),
                "--columns",
                "crate,version",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("<td>tokio</td><td>1.42</td>"));
    }
}

mod window_tests {
    use super::*;

    #[test]
    fn test_window_centered() {
        let output = dashboard()
            .args(["window", "100", "10"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["start"], 8);
        assert_eq!(json["data"]["end"], 13);
        assert_eq!(json["data"]["page_count"], 20);
        assert_eq!(json["data"]["leading_ellipsis"], true);
        assert_eq!(json["data"]["trailing_ellipsis"], true);
    }

    #[test]
    fn test_window_single_page() {
        let output = dashboard()
            .args(["window", "5", "0"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["paginated"], false);
        assert_eq!(json["data"]["page_count"], 1);
    }

    #[test]
    fn test_window_uses_config_file() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, "[pagination]\npage_size = 10\nmax_handles = 3\n").unwrap();

        let output = dashboard()
            .args(["--config", config.to_str().unwrap(), "window", "95", "4"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["page_count"], 10);
        assert_eq!(json["data"]["start"], 3);
        assert_eq!(json["data"]["end"], 6);
    }

    #[test]
    fn test_invalid_config_fails() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, "[pagination]\npage_size = 0\n").unwrap();

        dashboard()
            .args(["--config", config.to_str().unwrap(), "window", "10", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("page_size"));
    }
}

#[test]
fn test_completions() {
    dashboard()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"));
}
