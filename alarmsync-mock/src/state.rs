use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use alarmsync_api::models::{Alarm, Id};
use tokio::sync::RwLock;

use crate::settings::Seed;

#[derive(Debug, Default)]
struct Backend {
    users: HashMap<String, String>,
    tokens: HashSet<String>,
    devices: HashMap<String, Vec<Alarm>>,
    fail_commands: bool,
    hits: HashMap<String, usize>,
    validated: Vec<String>,
}

/// In-memory backend shared by every handler.
#[derive(Debug, Clone, Default)]
pub struct MockState {
    inner: Arc<RwLock<Backend>>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn from_seed(seed: &Seed) -> Self {
        let state = Self::new();

        for user in &seed.users {
            state.add_user(&user.email, &user.password).await;
        }
        for token in &seed.tokens {
            state.issue_token(token).await;
        }
        for device in &seed.devices {
            state.set_alarms(&device.mac, device.alarms.clone()).await;
        }

        state
    }

    pub async fn add_user(&self, email: &str, password: &str) {
        self.inner
            .write()
            .await
            .users
            .insert(email.to_string(), password.to_string());
    }

    pub async fn issue_token(&self, token: &str) {
        self.inner.write().await.tokens.insert(token.to_string());
    }

    pub async fn revoke_token(&self, token: &str) {
        self.inner.write().await.tokens.remove(token);
    }

    pub async fn set_alarms(&self, mac: &str, alarms: Vec<Alarm>) {
        self.inner
            .write()
            .await
            .devices
            .insert(mac.to_string(), alarms);
    }

    pub async fn alarms(&self, mac: &str) -> Option<Vec<Alarm>> {
        self.inner.read().await.devices.get(mac).cloned()
    }

    /// Makes every arm command answer 500 until switched back.
    pub async fn set_fail_commands(&self, fail: bool) {
        self.inner.write().await.fail_commands = fail;
    }

    /// Number of requests received on `route`.
    pub async fn hits(&self, route: &str) -> usize {
        self.inner
            .read()
            .await
            .hits
            .get(route)
            .copied()
            .unwrap_or_default()
    }

    /// Tokens received by the validation endpoint, oldest first.
    pub async fn validated_tokens(&self) -> Vec<String> {
        self.inner.read().await.validated.clone()
    }

    pub(crate) async fn record_hit(&self, route: &str) {
        *self
            .inner
            .write()
            .await
            .hits
            .entry(route.to_string())
            .or_default() += 1;
    }

    /// Checks credentials and issues a fresh token on success.
    pub(crate) async fn login(&self, email: &str, password: &str) -> Option<String> {
        let mut backend = self.inner.write().await;
        if backend.users.get(email).is_none_or(|stored| stored != password) {
            return None;
        }

        let token = uuid::Uuid::new_v4().simple().to_string();
        backend.tokens.insert(token.clone());

        Some(token)
    }

    pub(crate) async fn validate(&self, token: &str) -> bool {
        let mut backend = self.inner.write().await;
        backend.validated.push(token.to_string());
        backend.tokens.contains(token)
    }

    pub(crate) async fn is_authorized(&self, token: &str) -> bool {
        self.inner.read().await.tokens.contains(token)
    }

    pub(crate) async fn device_alarms(&self, mac: &str) -> Vec<Alarm> {
        self.alarms(mac).await.unwrap_or_default()
    }

    pub(crate) async fn arm(&self, mac: &str, id_alarm: Id, armed: bool) -> ArmResult {
        let mut backend = self.inner.write().await;
        if backend.fail_commands {
            return ArmResult::Failed;
        }

        let alarm = backend
            .devices
            .get_mut(mac)
            .and_then(|alarms| alarms.iter_mut().find(|alarm| alarm.id_alarm == id_alarm));

        match alarm {
            Some(alarm) => {
                alarm.armado = armed;
                ArmResult::Applied
            }
            None => ArmResult::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArmResult {
    Applied,
    NotFound,
    Failed,
}
