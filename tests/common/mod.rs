//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;

use fixture_mock_server::{HttpServer, MockServerConfig, Shutdown};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A running mock server with its own fixture directory.
///
/// The server is told to stop when this value is dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    fixtures: TempDir,
    shutdown: Shutdown,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    #[allow(dead_code)]
    pub async fn start_with(configure: impl FnOnce(&mut MockServerConfig)) -> Self {
        let fixtures = tempfile::tempdir().unwrap();

        let mut config = MockServerConfig::default();
        config.listener.host = "127.0.0.1".into();
        config.listener.port = 0;
        config.fixtures.dir = fixtures.path().to_path_buf();
        configure(&mut config);

        // Bound before spawning, so requests queue until the server polls.
        let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config);
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        Self {
            addr,
            fixtures,
            shutdown,
        }
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }

    #[allow(dead_code)]
    pub fn fixtures_dir(&self) -> &Path {
        self.fixtures.path()
    }

    #[allow(dead_code)]
    pub fn write_fixture(&self, filename: &str, content: &str) {
        std::fs::write(self.fixtures.path().join(filename), content).unwrap();
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
