use super::*;
use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

async fn spawn_status_server(status: StatusCode, body: &'static str) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new().route(STATUS_PATH, get(move || async move { (status, body) }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[test]
fn endpoints_keep_device_path_prefix() {
    let api = HttpFeederApi::new("http://feeder.local/proxy", None).expect("api");
    assert_eq!(
        api.status_url().as_str(),
        "http://feeder.local/proxy/api/status"
    );

    let api = HttpFeederApi::new("http://192.168.4.1", None).expect("api");
    assert_eq!(api.status_url().as_str(), "http://192.168.4.1/api/status");
}

#[test]
fn rejects_non_http_device_url() {
    assert!(HttpFeederApi::new("ftp://feeder.local", None).is_err());
    assert!(HttpFeederApi::new("not a url", None).is_err());
}

#[tokio::test]
async fn fetch_status_returns_raw_json() {
    let url = spawn_status_server(StatusCode::OK, r#"{"weight": 3, "extra": [1]}"#)
        .await
        .expect("spawn server");
    let api = HttpFeederApi::new(&url, Some(Duration::from_secs(2))).expect("api");

    let body = api.fetch_status().await.expect("status");
    assert_eq!(body["weight"], 3);
    assert_eq!(body["extra"][0], 1);
}

#[tokio::test]
async fn fetch_status_reports_http_failure() {
    let url = spawn_status_server(StatusCode::SERVICE_UNAVAILABLE, "busy")
        .await
        .expect("spawn server");
    let api = HttpFeederApi::new(&url, None).expect("api");

    let err = api.fetch_status().await.expect_err("must fail");
    assert!(matches!(err, PollError::Status { status: 503 }), "{err}");
}

#[tokio::test]
async fn fetch_status_reports_malformed_json() {
    let url = spawn_status_server(StatusCode::OK, "{weight:")
        .await
        .expect("spawn server");
    let api = HttpFeederApi::new(&url, None).expect("api");

    let err = api.fetch_status().await.expect_err("must fail");
    assert!(matches!(err, PollError::Decode(_)), "{err}");
}

#[tokio::test]
async fn unreachable_device_is_a_network_error_for_commands() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let api = HttpFeederApi::new(&format!("http://{addr}"), Some(Duration::from_secs(2)))
        .expect("api");
    let err = api.reset().await.expect_err("must fail");
    assert!(err.is_network(), "{err}");

    let err = api.fetch_status().await.expect_err("must fail");
    assert!(matches!(err, PollError::Transport(_)), "{err}");
}
