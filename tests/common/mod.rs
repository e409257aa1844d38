//! Shared utilities for integration testing.

use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hookpress::assets::HttpProbe;
use hookpress::config::SiteConfig;
use hookpress::http::HttpServer;
use hookpress::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// A running site plus the handles a test needs to steer it.
#[allow(dead_code)]
pub struct TestSite {
    pub addr: SocketAddr,
    pub config_tx: mpsc::UnboundedSender<SiteConfig>,
    pub shutdown: Shutdown,
    pub themes: tempfile::TempDir,
}

impl TestSite {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// HTTP client that never goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Create a themes directory holding one theme called `plain`.
///
/// `theme.css` and `index.html` get defaults unless listed in `files`.
pub fn themes_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let theme = dir.path().join("plain");
    fs::create_dir_all(&theme).unwrap();
    fs::write(
        theme.join("theme.css"),
        "/*\nName: Plain\nVersion: 1.0\n*/\nbody { margin: 0; }\n",
    )
    .unwrap();
    fs::write(theme.join("index.html"), "INDEX").unwrap();
    for (name, body) in files {
        fs::write(theme.join(name), body).unwrap();
    }
    dir
}

/// Start a site on an ephemeral port serving `themes`.
///
/// The site URL points back at the server itself, so theme-relative
/// assets are probed against its own static file service.
pub async fn start_site(
    themes: tempfile::TempDir,
    configure: impl FnOnce(&mut SiteConfig),
) -> TestSite {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = SiteConfig::default();
    config.site.name = "Test Site".into();
    config.site.theme = "plain".into();
    config.site.url = format!("http://{addr}");
    config.listener.bind_address = addr.to_string();
    config.paths.themes_dir = themes.path().to_string_lossy().into_owned();
    configure(&mut config);

    let probe = HttpProbe::with_client(client());
    let server = HttpServer::with_probe(config, Arc::new(probe));

    let shutdown = Shutdown::new();
    let (config_tx, config_rx) = mpsc::unbounded_channel();
    tokio::spawn(server.run(listener, config_rx, shutdown.subscribe()));

    TestSite {
        addr,
        config_tx,
        shutdown,
        themes,
    }
}

/// Start a backend that answers every path with a fixed content type.
///
/// `/style.css` is `text/css`, `/app.js` is `application/javascript`,
/// `/plain.css` is `text/plain` and `/bare.js` has no content type.
#[allow(dead_code)]
pub async fn start_asset_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let mut read = 0;
                        while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut buf[read..]).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => read += n,
                            }
                            if read == buf.len() {
                                break;
                            }
                        }

                        let request = String::from_utf8_lossy(&buf[..read]);
                        let path = request.split_whitespace().nth(1).unwrap_or("/");
                        let content_type = match path {
                            "/style.css" => Some("text/css"),
                            "/app.js" => Some("application/javascript"),
                            "/plain.css" => Some("text/plain"),
                            _ => None,
                        };

                        let header = content_type
                            .map(|ct| format!("Content-Type: {ct}\r\n"))
                            .unwrap_or_default();
                        let response = format!(
                            "HTTP/1.1 200 OK\r\n{header}Content-Length: 2\r\nConnection: close\r\n\r\nok"
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
