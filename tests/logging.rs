//! Single test on purpose: the logger is process-global.

use sketchgen::{
    logger::{self, LogLevel, LoggerConfig},
    GenerationProxy, MockGateway,
};
use std::sync::Arc;

#[tokio::test]
async fn proxy_diagnostics_are_captured_without_image_bytes() {
    logger::init_with_config(LoggerConfig::silent().with_capture(true)).unwrap();
    logger::clear_captured();

    let error_page = format!("<html><body>throttled{}</body></html>", " ".repeat(20_000));
    let mock = Arc::new(MockGateway::replying(503, error_page));
    let proxy = GenerationProxy::with_gateway(mock);
    let secret_image = "U0VDUkVUSU1BR0VEQVRB";

    let body = format!(r#"{{"imageData":"{}","style":"vaporwave"}}"#, secret_image);
    let err = proxy.handle(body.as_bytes()).await.unwrap_err();
    assert_eq!(err.status_code(), 503);

    let entries = logger::captured();
    assert!(entries
        .iter()
        .any(|e| e.level == LogLevel::Warn && e.message.contains("Unknown style 'vaporwave'")));
    assert!(entries
        .iter()
        .any(|e| e.message.contains("Gateway status 503")));
    assert!(entries
        .iter()
        .any(|e| e.level == LogLevel::Error && e.message.contains("upstream error")));
    assert!(entries.iter().all(|e| !e.message.contains(secret_image)));
    assert!(entries.iter().all(|e| e.message.len() < 1_000));
    assert!(entries
        .iter()
        .any(|e| e.level == LogLevel::Warn && e.message.contains("<html><body>throttled")));
}
