//! Test helpers for integration tests
//!
//! Spawns the API and gateway on ephemeral ports and provides thin HTTP and
//! WebSocket clients for talking to them.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use parlor_common::AppConfig;
use parlor_core::MessageStore;
use parlor_db::MemoryMessageStore;
use parlor_service::ServiceContext;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::fixtures::Frame;

/// How long to wait for an expected frame
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

async fn bind_ephemeral() -> Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    Ok((listener, addr))
}

fn context(store: Arc<dyn MessageStore>, config: &AppConfig) -> ServiceContext {
    ServiceContext::new(store, config.chat)
}

/// API and gateway sharing one in-memory store
pub struct TestStack {
    pub api: TestServer,
    pub gateway: GatewayServer,
    pub store: Arc<MemoryMessageStore>,
}

impl TestStack {
    pub async fn start() -> Result<Self> {
        let store = Arc::new(MemoryMessageStore::default());
        let api = TestServer::start_with_store(store.clone()).await?;
        let gateway = GatewayServer::start_with_store(store.clone()).await?;
        Ok(Self {
            api,
            gateway,
            store,
        })
    }
}

/// Test API server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with a fresh in-memory store
    pub async fn start() -> Result<Self> {
        Self::start_with_store(Arc::new(MemoryMessageStore::default())).await
    }

    /// Start a test server on top of `store`
    pub async fn start_with_store(store: Arc<dyn MessageStore>) -> Result<Self> {
        let config = AppConfig::default();
        let state = parlor_api::AppState::new(context(store, &config), config);

        let (listener, addr) = bind_ephemeral().await?;
        let handle = tokio::spawn(async move {
            parlor_api::serve(listener, state).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }
}

/// Test gateway server instance
pub struct GatewayServer {
    pub addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl GatewayServer {
    /// Start a new gateway with a fresh in-memory store
    pub async fn start() -> Result<Self> {
        Self::start_with_store(Arc::new(MemoryMessageStore::default())).await
    }

    pub async fn start_with_store(store: Arc<dyn MessageStore>) -> Result<Self> {
        let config = AppConfig::default();
        let state = parlor_gateway::GatewayState::new(context(store, &config));

        let (listener, addr) = bind_ephemeral().await?;
        let handle = tokio::spawn(async move {
            parlor_gateway::serve(listener, state).await.ok();
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/gateway", self.addr)
    }

    /// Open a new client connection
    pub async fn connect(&self) -> Result<WsClient> {
        WsClient::connect(&self.ws_url()).await
    }
}

/// Minimal gateway client
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _) = connect_async(url)
            .await
            .with_context(|| format!("failed to connect to {url}"))?;
        Ok(Self { stream })
    }

    /// Send one event
    pub async fn emit(&mut self, event: &str, data: Value) -> Result<()> {
        let json = serde_json::to_string(&Frame::new(event, data))?;
        self.send_raw(Message::Text(json.into())).await
    }

    pub async fn send_raw(&mut self, message: Message) -> Result<()> {
        self.stream.send(message).await?;
        Ok(())
    }

    /// Next JSON frame, skipping control frames
    pub async fn recv(&mut self) -> Result<Frame> {
        loop {
            let message = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .context("timed out waiting for a frame")?
                .context("connection closed")??;

            if let Message::Text(text) = message {
                return Ok(serde_json::from_str(text.as_str())?);
            }
        }
    }

    /// Next frame, which must be `event`
    pub async fn expect(&mut self, event: &str) -> Result<Frame> {
        let frame = self.recv().await?;
        anyhow::ensure!(
            frame.event == event,
            "expected `{event}`, got `{}` with {}",
            frame.event,
            frame.data
        );
        Ok(frame)
    }

    /// Assert nothing arrives for a short while
    pub async fn expect_silence(&mut self, window: Duration) -> Result<()> {
        match tokio::time::timeout(window, self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(message))) => anyhow::bail!("unexpected frame: {message:?}"),
            Ok(other) => anyhow::bail!("connection ended: {other:?}"),
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
