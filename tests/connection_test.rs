mod common;

use anyhow::Result;
use common::*;
use dotfit_orders::DotFitError;
use httpmock::prelude::*;
use std::sync::Arc;

#[tokio::test]
async fn test_client_is_built_once_and_reused() -> Result<()> {
    let server = MockServer::start();
    let wsdl_mock = mock_wsdl(&server);
    let client = client_for(&server);

    let first = client.client().await?;
    let second = client.client().await?;

    assert!(Arc::ptr_eq(&first, &second));
    wsdl_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_session_carries_club_auth_header() -> Result<()> {
    let server = MockServer::start();
    mock_wsdl(&server);
    let client = client_for(&server);

    let session = client.client().await?;
    let headers = session.headers();

    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].name, "ClubAuthHeader");
    assert_eq!(headers[0].attribute("xmlns"), Some("http://services.dotfit.com/"));
    assert_eq!(headers[0].child_text("ClubID"), Some("CLUB1"));
    assert_eq!(headers[0].child_text("ClubPassword"), Some("secret"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_calls_share_one_session() -> Result<()> {
    let server = MockServer::start();
    let wsdl_mock = server.mock(|when, then| {
        when.method(GET).path(SERVICE_PATH);
        then.status(200)
            .delay(std::time::Duration::from_millis(200))
            .body(wsdl(&server.url(SERVICE_PATH)));
    });
    let client = Arc::new(client_for(&server));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.client().await })
        })
        .collect();

    let mut sessions = Vec::new();
    for handle in handles {
        sessions.push(handle.await??);
    }

    assert!(sessions
        .iter()
        .all(|session| Arc::ptr_eq(session, &sessions[0])));
    wsdl_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_operations_share_the_session() -> Result<()> {
    let server = MockServer::start();
    let wsdl_mock = mock_wsdl(&server);
    let inventory_mock = mock_operation(
        &server,
        "GetInventory",
        soap_envelope(
            r#"<GetInventoryResponse xmlns="http://services.dotfit.com/"><GetInventoryResult /></GetInventoryResponse>"#,
        ),
    );
    let client = client_for(&server);

    client.describe().await?;
    client.inventory().await?;
    client.inventory().await?;

    wsdl_mock.assert_hits(1);
    inventory_mock.assert_hits(2);
    Ok(())
}

#[tokio::test]
async fn test_failed_build_is_retried_on_next_call() -> Result<()> {
    let server = MockServer::start();
    let mut failing = server.mock(|when, then| {
        when.method(GET).path(SERVICE_PATH);
        then.status(500).body("Server Error");
    });
    let client = client_for(&server);

    let err = client.client().await.unwrap_err();
    assert!(matches!(err, DotFitError::HttpStatus { status: 500, .. }));
    failing.assert_hits(1);
    failing.delete();

    let wsdl_mock = mock_wsdl(&server);
    let session = client.client().await?;

    wsdl_mock.assert_hits(1);
    assert_eq!(session.describe().target_namespace, "http://services.dotfit.com/");
    Ok(())
}

#[tokio::test]
async fn test_malformed_wsdl_is_an_error() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(SERVICE_PATH);
        then.status(200).body("<html><body>maintenance</body>");
    });
    let client = client_for(&server);

    let err = client.inventory().await.unwrap_err();
    assert!(err.is_transport_fault());
    Ok(())
}

#[tokio::test]
async fn test_reset_forces_a_new_session() -> Result<()> {
    let server = MockServer::start();
    let wsdl_mock = mock_wsdl(&server);
    let mut client = client_for(&server);

    // 尚未連線時 reset 沒有作用
    assert!(!client.reset());

    let first = client.client().await?;
    assert!(client.reset());
    let second = client.client().await?;

    assert!(!Arc::ptr_eq(&first, &second));
    wsdl_mock.assert_hits(2);
    Ok(())
}

#[tokio::test]
async fn test_debug_logging_reports_initialization() -> Result<()> {
    let server = MockServer::start();
    mock_wsdl(&server);
    let (client, sink) = client_with_sink(&server, true);

    client.client().await?;
    client.client().await?;

    let messages = sink.messages();
    assert_eq!(messages[0], "Debug logging enabled");
    assert_eq!(
        messages
            .iter()
            .filter(|message| *message == "Client not initialized, initializing...")
            .count(),
        1
    );
    assert!(messages
        .iter()
        .any(|message| message.starts_with("Creating client for WSDL: http://127.0.0.1")));
    Ok(())
}

#[tokio::test]
async fn test_logging_disabled_emits_nothing() -> Result<()> {
    let server = MockServer::start();
    mock_wsdl(&server);
    let (client, sink) = client_with_sink(&server, false);

    client.client().await?;
    client.log(&["info"], "should not appear");

    assert!(sink.entries().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_log_passes_tags_and_message_through() -> Result<()> {
    let server = MockServer::start();
    let (client, sink) = client_with_sink(&server, true);

    client.log(&["orders", "warn"], format!("order {} is late", 1001));

    let entries = sink.entries();
    let last = entries.last().expect("log entry");
    assert_eq!(last.0, vec!["orders".to_string(), "warn".to_string()]);
    assert_eq!(last.1, "order 1001 is late");
    Ok(())
}
