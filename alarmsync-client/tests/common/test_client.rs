use std::net::TcpListener;
use std::sync::Arc;

use alarmsync_api::models::Alarm;
use alarmsync_client::storage::{LocalStorage, MemoryStorage, TOKEN_KEY};
use alarmsync_client::{AlarmClient, Settings};
use alarmsync_mock::MockServer;
use alarmsync_mock::state::MockState;

pub const MAC: &str = "AA:BB:CC";
pub const TOKEN: &str = "abc123";
pub const EMAIL: &str = "demo@cti.test";
pub const PASSWORD: &str = "demo";

pub fn alarm(id_alarm: i32, texto: &str, habilitado: bool, armado: bool) -> Alarm {
    Alarm {
        id_alarm,
        texto: texto.to_string(),
        habilitado,
        armado,
    }
}

pub fn settings(development_url: &str, production_url: &str) -> Settings {
    Settings::from_toml(&format!(
        r#"
        [logger]
        level = "debug"

        [api]
        mode = "development"
        development_url = "{development_url}"
        production_url = "{production_url}"
        timeout = 5
        connect_timeout = 2

        [storage]
        path = "unused.json"
        "#
    ))
    .unwrap()
}

/// Address nothing listens on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{}", address)
}

/// Address that accepts connections but never answers. The listener must
/// stay alive for as long as the address is used.
pub fn silent_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    (listener, url)
}

pub struct TestClient {
    pub server: MockServer,
    pub storage: Arc<MemoryStorage>,
    pub client: AlarmClient,
}

impl TestClient {
    pub async fn new() -> Self {
        Self::with_settings(|_| {}).await
    }

    /// Like `new`, with the client settings adjusted before it is built.
    pub async fn with_settings<F: FnOnce(&mut Settings)>(configure: F) -> Self {
        let state = MockState::new();
        state.add_user(EMAIL, PASSWORD).await;
        state.issue_token(TOKEN).await;
        state
            .set_alarms(
                MAC,
                vec![
                    alarm(1, "Puerta", true, false),
                    alarm(2, "Ventana", false, false),
                    alarm(3, "Garaje", true, true),
                ],
            )
            .await;

        let server = MockServer::start(state).await.unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let mut settings = settings(&server.url(), &unreachable_url());
        configure(&mut settings);
        let client = AlarmClient::new(&settings, storage.clone()).unwrap();

        Self {
            server,
            storage,
            client,
        }
    }

    /// Stores the seeded token as if a previous run had logged in.
    pub async fn with_token(self) -> Self {
        self.storage.set_item(TOKEN_KEY, TOKEN).await.unwrap();
        self
    }
}
