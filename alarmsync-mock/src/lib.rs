use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::app::create_app;
use crate::settings::Settings;
use crate::state::MockState;

pub mod app;
pub mod handles;
pub mod settings;
pub mod state;

pub async fn run(settings: &Arc<Settings>) -> io::Result<()> {
    let state = MockState::from_seed(&settings.seed).await;
    let app = create_app(state);

    let ip_addr = settings
        .server
        .host
        .parse::<IpAddr>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let address = SocketAddr::from((ip_addr, settings.server.port));

    let listener = TcpListener::bind(&address).await?;

    tracing::info!("listening on {:?}", address);

    axum::serve(listener, app).await
}

/// Backend bound to an ephemeral local port, aborted on drop.
pub struct MockServer {
    pub state: MockState,
    address: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(state: MockState) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        let app = create_app(state.clone());

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("mock backend stopped: {e}");
            }
        });

        tracing::debug!("mock backend listening on {:?}", address);

        Ok(Self {
            state,
            address,
            handle,
        })
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.address)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
