//! Integration-style tests covering the fetch-and-copy flow against a local HTTP responder.

use async_trait::async_trait;
use htmlclip::{
    ButtonLabels, ButtonPhase, ClickOutcome, ClipboardWriter, CopyButton, CopyConfig, CopyError,
    FetchConfig, FetchError, FetchMode, PageFetcher, PageSource, Payload,
};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Answers exactly one request and hands back the raw request text
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.expect("read");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{}/page", addr), handle)
}

fn fetcher() -> PageFetcher {
    PageFetcher::new(&FetchConfig {
        timeout: Duration::from_secs(5),
        use_system_proxy: false,
        ..Default::default()
    })
    .expect("client")
}

#[derive(Default)]
struct RecordingClipboard {
    writes: Mutex<Vec<String>>,
}

#[async_trait]
impl ClipboardWriter for RecordingClipboard {
    fn id(&self) -> &str {
        "recording"
    }

    async fn write_text(&self, text: &str) -> Result<(), CopyError> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn fetch_sends_get_with_requested_with_header() {
    let (url, server) = serve_once("200 OK", "<html>ok</html>").await;

    let payload = fetcher().fetch(&url, FetchMode::Text).await.expect("fetch");
    assert_eq!(payload, Payload::Text("<html>ok</html>".to_string()));

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /page HTTP/1.1"));
    assert!(request
        .to_lowercase()
        .contains("x-requested-with: xmlhttprequest"));
}

#[tokio::test]
async fn fetch_reports_client_and_server_errors() {
    for (status_line, code) in [("404 Not Found", 404u16), ("500 Internal Server Error", 500)] {
        let (url, _server) = serve_once(status_line, "nope").await;
        let err = fetcher().fetch(&url, FetchMode::Text).await.unwrap_err();
        assert!(
            matches!(err, FetchError::Status(c) if c == code),
            "unexpected error for {}: {:?}",
            status_line,
            err
        );
    }
}

#[tokio::test]
async fn fetch_parses_structured_payloads() {
    let (url, _server) = serve_once("200 OK", r#"{"html":"<p>hi</p>"}"#).await;
    let payload = fetcher().fetch(&url, FetchMode::Structured).await.expect("fetch");
    match payload {
        Payload::Structured(value) => assert_eq!(value["html"], "<p>hi</p>"),
        other => panic!("expected structured payload, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_rejects_malformed_structured_payloads() {
    let (url, _server) = serve_once("200 OK", "<html>ok</html>").await;
    let err = fetcher().fetch(&url, FetchMode::Structured).await.unwrap_err();
    assert!(matches!(err, FetchError::MalformedPayload(_)));
}

#[tokio::test]
async fn fetch_reports_transport_errors() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetcher()
        .fetch(&format!("http://{}/page", addr), FetchMode::Text)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn button_copies_page_and_restores_after_delay() {
    let (url, _server) = serve_once("200 OK", "<html>ok</html>").await;
    let clipboard = Arc::new(RecordingClipboard::default());
    let config = CopyConfig {
        restore_delay: Duration::from_millis(100),
        ..Default::default()
    };
    let button = CopyButton::new(
        url,
        ButtonLabels::default(),
        config,
        Arc::new(fetcher()),
        clipboard.clone(),
    );
    let mut events = button.subscribe();

    assert!(button.click().await.is_copied());
    let settled = Instant::now();
    assert_eq!(button.state().label, "Copied!");
    assert_eq!(
        clipboard.writes.lock().unwrap().clone(),
        vec!["<html>ok</html>".to_string()]
    );

    button.wait_restored().await;
    assert!(settled.elapsed() >= Duration::from_millis(90));
    assert_eq!(button.state().phase, ButtonPhase::Idle);

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push((event.label, event.interactive));
    }
    assert_eq!(
        seen,
        vec![
            ("Copying...".to_string(), false),
            ("Copied!".to_string(), false),
            ("Copy HTML".to_string(), true),
        ]
    );
}

#[tokio::test]
async fn button_reverts_immediately_on_not_found() {
    let (url, _server) = serve_once("404 Not Found", "missing").await;
    let clipboard = Arc::new(RecordingClipboard::default());
    let button = CopyButton::new(
        url,
        ButtonLabels::default(),
        CopyConfig::default(),
        Arc::new(fetcher()),
        clipboard.clone(),
    );
    let mut events = button.subscribe();
    assert!(button.url().ends_with("/page"));

    let outcome = button.click().await;
    assert!(matches!(outcome, ClickOutcome::FetchFailed(FetchError::Status(404))));
    assert_eq!(button.state().label, "Copy HTML");
    assert!(button.state().interactive);
    assert!(clipboard.writes.lock().unwrap().is_empty());

    while let Ok(event) = events.try_recv() {
        assert_ne!(event.label, "Copied!");
        assert_ne!(event.label, "Copy failed");
    }
}

#[cfg(unix)]
#[tokio::test]
async fn button_with_command_fallback_copies_and_cleans_up() {
    use htmlclip::{CommandClipboard, SystemClipboard};
    use tempfile::TempDir;

    let (url, _server) = serve_once("200 OK", "<html>ok</html>").await;
    let staging = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("clipboard.txt");

    let command = CommandClipboard::new(
        "sh",
        vec!["-c".to_string(), format!("cat > '{}'", out.display())],
    )
    .with_staging_dir(staging.path());
    let clipboard = SystemClipboard::new(None, Some(Arc::new(command)));

    let button = CopyButton::new(
        url,
        ButtonLabels::default(),
        CopyConfig {
            restore_delay: Duration::from_millis(10),
            ..Default::default()
        },
        Arc::new(fetcher()),
        Arc::new(clipboard),
    );

    assert!(button.click().await.is_copied());
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "<html>ok</html>");
    assert_eq!(std::fs::read_dir(staging.path()).unwrap().count(), 0);
    button.wait_restored().await;
}

#[cfg(unix)]
#[tokio::test]
async fn failing_fallback_shows_error_label() {
    use htmlclip::{CommandClipboard, SystemClipboard};
    use tempfile::TempDir;

    let (url, _server) = serve_once("200 OK", "<html>ok</html>").await;
    let staging = TempDir::new().unwrap();
    let command = CommandClipboard::new("sh", vec!["-c".to_string(), "exit 1".to_string()])
        .with_staging_dir(staging.path());

    let button = CopyButton::new(
        url,
        ButtonLabels::default(),
        CopyConfig {
            restore_delay: Duration::from_millis(10),
            ..Default::default()
        },
        Arc::new(fetcher()),
        Arc::new(SystemClipboard::new(None, Some(Arc::new(command)))),
    );

    assert!(matches!(button.click().await, ClickOutcome::CopyFailed(_)));
    assert_eq!(button.state().label, "Copy failed");
    assert_eq!(std::fs::read_dir(staging.path()).unwrap().count(), 0);

    button.wait_restored().await;
    assert_eq!(button.state().label, "Copy HTML");
}
