use alarmsync_api::models::{Alarm, AlarmStatusQuery, ArmQuery, ArmState, Id};
use alarmsync_api::routes;
use reqwest::Method;

use crate::error::{Error, Result};
use crate::http::HttpClient;

/// Backend confirmation of an arm/disarm command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmAck {
    pub id_alarm: Id,
    pub armed: bool,
}

/// Caller-side copy of one device's enabled alarms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmList {
    mac: String,
    alarms: Vec<Alarm>,
}

impl AlarmList {
    pub fn new<S: Into<String>>(mac: S) -> Self {
        Self {
            mac: mac.into(),
            alarms: Vec::new(),
        }
    }

    pub fn mac(&self) -> &str {
        &self.mac
    }

    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alarm> {
        self.alarms.iter()
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    pub fn get(&self, id_alarm: Id) -> Option<&Alarm> {
        self.alarms.iter().find(|alarm| alarm.id_alarm == id_alarm)
    }

    /// Swaps in a freshly fetched list; disabled alarms never enter it.
    pub fn replace(&mut self, alarms: Vec<Alarm>) {
        self.alarms = enabled_only(alarms);
    }

    /// Applies a confirmed command to the matching alarm only.
    pub fn apply(&mut self, ack: &ArmAck) -> Option<&Alarm> {
        let alarm = self
            .alarms
            .iter_mut()
            .find(|alarm| alarm.id_alarm == ack.id_alarm)?;
        alarm.armado = ack.armed;

        Some(&*alarm)
    }
}

fn enabled_only(alarms: Vec<Alarm>) -> Vec<Alarm> {
    alarms.into_iter().filter(|alarm| alarm.habilitado).collect()
}

/// Rejects a blank mac; anything else is passed through untouched.
fn require_mac(mac: &str) -> Result<&str> {
    if mac.trim().is_empty() {
        return Err(Error::MissingDeviceIdentifier);
    }
    Ok(mac)
}

/// Reads the enabled alarms of a device and sends arm/disarm commands.
#[derive(Clone)]
pub struct AlarmService {
    http: HttpClient,
}

impl AlarmService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Full, idempotent fetch of the device's enabled alarms in backend order.
    pub async fn fetch_alarms(&self, mac: &str) -> Result<Vec<Alarm>> {
        let mac = require_mac(mac)?;

        let request = self
            .http
            .request(Method::GET, routes::ALARM_STATUS)
            .await?
            .query(&AlarmStatusQuery {
                mac: mac.to_string(),
            });

        let alarms: Vec<Alarm> = self.http.send_json(request).await.map_err(|e| {
            tracing::error!(mac, error = %e, "failed to load alarms");
            e
        })?;

        let total = alarms.len();
        let alarms = enabled_only(alarms);

        tracing::debug!(mac, total, enabled = alarms.len(), "alarms fetched");

        Ok(alarms)
    }

    /// Sends the command; the caller's list must only change on `Ok`.
    pub async fn set_armed(&self, mac: &str, id_alarm: Id, armed: bool) -> Result<ArmAck> {
        let mac = require_mac(mac)?;
        let state = ArmState::from(armed);

        if let Err(e) = self.send_command(mac, id_alarm, state).await {
            tracing::warn!(mac, id_alarm, %state, error = %e, "alarm command failed");
            return Err(Error::CommandFailed(Box::new(e)));
        }

        tracing::info!(mac, id_alarm, %state, "alarm command acknowledged");

        Ok(ArmAck { id_alarm, armed })
    }

    async fn send_command(&self, mac: &str, id_alarm: Id, state: ArmState) -> Result<()> {
        let request = self
            .http
            .request(Method::POST, routes::ARM)
            .await?
            .query(&ArmQuery {
                mac: mac.to_string(),
                alarm: id_alarm,
                status: state.code(),
            })
            .json(&serde_json::Map::new());

        self.http.send_ack(request).await?;

        Ok(())
    }

    /// Sends the command and, once acknowledged, updates the one matching
    /// entry of `list`. Returns `None` if the id is not in the list.
    pub async fn update_alarm(
        &self,
        list: &mut AlarmList,
        id_alarm: Id,
        armed: bool,
    ) -> Result<Option<Alarm>> {
        let ack = self.set_armed(list.mac(), id_alarm, armed).await?;

        Ok(list.apply(&ack).cloned())
    }
}
