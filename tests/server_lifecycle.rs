//! Serving over a real socket: config updates and graceful shutdown.

use std::time::Duration;

use subrouter::http::HttpServer;
use subrouter::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

mod common;
use common::{route, tenant_config};

async fn raw_get(addr: std::net::SocketAddr, host: &str, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_serves_reloads_and_shuts_down() {
    let server = HttpServer::new(tenant_config()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_tx, config_updates) = mpsc::unbounded_channel();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, config_updates, server_shutdown).await });

    let response = raw_get(addr, "fuga.example.com", "/fugara").await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains(r#""path":"/fuga/fugara""#), "{response}");
    assert!(response.to_ascii_lowercase().contains("x-request-id"), "{response}");

    let mut config = tenant_config();
    config.routes.push(route("/moge", Some("moge")));
    config_tx.send(config).unwrap();

    let mut reloaded = false;
    for _ in 0..50 {
        let response = raw_get(addr, "moge.example.com", "/x").await;
        if response.contains(r#""path":"/moge/x""#) {
            reloaded = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(reloaded, "config update was not applied");

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
