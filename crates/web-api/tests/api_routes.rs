use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use bot_panel_core::{PanelConfig, ProcessTable};
use bot_panel_web_api::{ApiServer, AppState};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Process table that reports a fixed set of PIDs.
struct FixedTable(Vec<u32>);

#[async_trait]
impl ProcessTable for FixedTable {
    async fn locate(&self) -> Vec<u32> {
        self.0.clone()
    }
}

struct Panel {
    dir: TempDir,
    server: ApiServer,
}

impl Panel {
    fn new(pids: Vec<u32>) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("bot")).unwrap();

        let mut config = PanelConfig::default();
        config.bot.base_dir = dir.path().to_path_buf();
        config.bot.restart_delay_ms = 0;
        config.probe.timeout_secs = 2;
        let state = AppState::new(Arc::new(config), Arc::new(FixedTable(pids)));

        Self {
            dir,
            server: ApiServer::new(state),
        }
    }

    fn path(&self, relative: &str) -> std::path::PathBuf {
        self.dir.path().join(relative)
    }

    fn write(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    async fn send(&self, method: &str, uri: &str) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = self.server.service().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec(), headers)
    }

    async fn json(&self, method: &str, uri: &str) -> (StatusCode, Value) {
        let (status, body, _) = self.send(method, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}

#[tokio::test]
async fn test_status_end_to_end() {
    let panel = Panel::new(vec![1234]);
    panel.write("bot/state_v5.json", r#"{"capital":100,"total_pnl":5}"#);
    let trades: Vec<Value> = (1..=7).map(|i| json!({"id": i, "side": "buy"})).collect();
    panel.write("bot/trades_v5.json", &serde_json::to_string(&trades).unwrap());

    let (status, body) = panel.json("GET", "/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["running"], json!(true));
    assert_eq!(body["pids"], json!([1234]));
    assert_eq!(body["trade_count"], json!(7));
    assert_eq!(body["recent_trades"].as_array().unwrap().len(), 5);
    assert_eq!(body["recent_trades"][4]["id"], json!(7));
    assert_eq!(body["state"]["capital"], json!(100));
    assert!(body["checked_at"].is_string());
}

#[tokio::test]
async fn test_status_without_state_files() {
    let panel = Panel::new(vec![]);
    panel.write("bot/state_v5.json", "{\"capital\": 1");

    let (status, body) = panel.json("GET", "/api/status/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["running"], json!(false));
    assert_eq!(body["state"], json!({}));
    assert_eq!(body["recent_trades"], json!([]));
    assert_eq!(body["trade_count"], json!(0));
}

#[tokio::test]
async fn test_json_is_pretty_utf8_with_cors() {
    let panel = Panel::new(vec![]);
    panel.write("bot/state_v5.json", r#"{"strategy":"추세추종"}"#);

    let (status, body, headers) = panel.send("GET", "/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_TYPE],
        "application/json; charset=utf-8"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("\n  \"running\": false"));
    assert!(text.contains("추세추종"));
}

#[tokio::test]
async fn test_system_always_answers() {
    let panel = Panel::new(vec![]);

    let (status, body) = panel.json("GET", "/api/system").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["uptime"].is_string());
    assert!(body["disk"].is_object());
    assert!(body["memory_raw"].is_string());
    assert!(body["tailscale"]["online"].is_boolean());
}

#[tokio::test]
async fn test_logs_tail() {
    let panel = Panel::new(vec![]);
    panel.write("bot/logs/bot.log", "one\ntwo\nthree\nfour\nfive\n");

    let (status, body) = panel.json("GET", "/api/logs?lines=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logs"], json!("three\nfour\nfive"));
}

#[tokio::test]
async fn test_logs_repeated_lines_uses_first() {
    let panel = Panel::new(vec![]);
    panel.write("bot/logs/bot.log", "one\ntwo\nthree\n");

    let (status, body) = panel.json("GET", "/api/logs?lines=1&lines=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logs"], json!("three"));

    let (status, body) = panel.json("GET", "/api/logs?lines=x&lines=2&verbose").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logs"], json!("one\ntwo\nthree"));
}

#[tokio::test]
async fn test_logs_default_and_placeholder() {
    let panel = Panel::new(vec![]);

    let (_, body) = panel.json("GET", "/api/logs").await;
    assert_eq!(body["logs"], json!("log directory not found"));

    std::fs::create_dir_all(panel.path("bot/logs")).unwrap();
    let (_, body) = panel.json("GET", "/api/logs?lines=abc").await;
    assert_eq!(body["logs"], json!("no log files found"));

    let lines: Vec<String> = (1..=60).map(|i| format!("line {i}")).collect();
    panel.write("bot/logs/bot.log", &lines.join("\n"));
    let (_, body) = panel.json("GET", "/api/logs").await;
    let text = body["logs"].as_str().unwrap();
    assert_eq!(text.lines().count(), 50);
    assert!(text.starts_with("line 11\n"));
}

#[tokio::test]
async fn test_dashboard_passthrough() {
    let panel = Panel::new(vec![]);

    let (_, body) = panel.json("GET", "/api/dashboard").await;
    assert_eq!(body, json!({}));

    panel.write(
        "dashboard_data.json",
        r#"{"account": {"equity": 1520.5}, "positions": []}"#,
    );
    let (status, body) = panel.json("GET", "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account"]["equity"], json!(1520.5));
}

#[tokio::test]
async fn test_pages() {
    let panel = Panel::new(vec![]);

    let (status, body) = panel.json("GET", "/control").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"ok": false, "msg": "File not found"}));

    panel.write("control.html", "<h1>control</h1>");
    panel.write("index.html", "<h1>dashboard</h1>");

    for uri in ["/", "/control", "/control/"] {
        let (status, body, headers) = panel.send("GET", uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(body, b"<h1>control</h1>");
    }

    let (status, body, _) = panel.send("GET", "/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>dashboard</h1>");
}

#[tokio::test]
async fn test_static_fallback() {
    let panel = Panel::new(vec![]);
    panel.write("assets/app.js", "console.log('panel');");

    let (status, body, _) = panel.send("GET", "/assets/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"console.log('panel');");

    let (status, _, _) = panel.send("GET", "/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_post_is_404() {
    let panel = Panel::new(vec![]);

    for uri in ["/api/bot/pause", "/api/nope", "/api/status"] {
        let (status, body) = panel.json("POST", uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({"ok": false, "msg": "Unknown endpoint"}));
    }
}

#[tokio::test]
async fn test_start_refused_when_running() {
    let panel = Panel::new(vec![999_999]);

    let (status, body) = panel.json("POST", "/api/bot/start").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(false));
    assert!(body["msg"].as_str().unwrap().contains("already running"));
}

#[tokio::test]
async fn test_stop_when_not_running() {
    let panel = Panel::new(vec![]);

    let (status, body) = panel.json("POST", "/api/bot/stop/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": false, "msg": "bot not running"}));
}

#[tokio::test]
async fn test_restart_without_script() {
    let panel = Panel::new(vec![]);

    let (status, body) = panel.json("POST", "/api/bot/restart").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(false));
    let msg = body["msg"].as_str().unwrap();
    assert!(msg.contains("stop: bot not running"));
    assert!(msg.contains("start: bot script not found"));
}

#[tokio::test]
async fn test_update_runs_script() {
    if !Path::new("/bin/sh").exists() {
        return;
    }
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("update.sh"), "echo 'dashboard refreshed'\n").unwrap();
    let mut config = PanelConfig::default();
    config.bot.base_dir = dir.path().to_path_buf();
    config.bot.interpreter = "sh".to_string();
    config.update.script = "update.sh".into();
    let server = ApiServer::new(AppState::new(Arc::new(config), Arc::new(FixedTable(vec![]))));

    let request = Request::builder()
        .method("POST")
        .uri("/api/update")
        .body(Body::empty())
        .unwrap();
    let response = server.service().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({"ok": true, "msg": "dashboard refreshed"}));
}
