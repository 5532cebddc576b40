use alarmsync_api::models::{Alarm, ArmState, Id};

use super::Notice;
use crate::alarm::{AlarmList, AlarmService};

pub struct AlarmListScreen {
    service: AlarmService,
    list: AlarmList,
    loading: bool,
    selected: Option<Id>,
    notice: Option<Notice>,
}

impl AlarmListScreen {
    pub fn new<S: Into<String>>(service: AlarmService, mac: S) -> Self {
        Self {
            service,
            list: AlarmList::new(mac),
            loading: false,
            selected: None,
            notice: None,
        }
    }

    pub fn alarms(&self) -> &AlarmList {
        &self.list
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Text for a loaded but empty list.
    pub fn empty_message(&self) -> Option<&'static str> {
        (!self.loading && self.list.is_empty()).then_some("No hay alarmas habilitadas")
    }

    /// Reloads the list. On failure the previous list is kept.
    pub async fn refresh(&mut self) -> bool {
        self.loading = true;

        let loaded = match self.service.fetch_alarms(self.list.mac()).await {
            Ok(alarms) => {
                self.list.replace(alarms);
                if self.selected.is_some_and(|id| self.list.get(id).is_none()) {
                    self.selected = None;
                }
                true
            }
            Err(e) => {
                tracing::error!(mac = self.list.mac(), error = %e, "could not refresh alarms");
                self.notice = Some(Notice::AlarmsUnavailable);
                false
            }
        };

        self.loading = false;
        loaded
    }

    /// Opens the arm/disarm options for one alarm.
    pub fn select(&mut self, id_alarm: Id) -> Option<&Alarm> {
        let alarm = self.list.get(id_alarm)?;
        self.selected = Some(id_alarm);
        Some(alarm)
    }

    pub fn selected(&self) -> Option<&Alarm> {
        self.selected.and_then(|id| self.list.get(id))
    }

    pub fn close_options(&mut self) {
        self.selected = None;
    }

    /// Applies the chosen state to the selected alarm. The options close only
    /// once the backend confirms; on failure the list is left untouched.
    pub async fn choose(&mut self, state: ArmState) -> Option<Alarm> {
        let id_alarm = self.selected?;

        match self
            .service
            .update_alarm(&mut self.list, id_alarm, state.is_armed())
            .await
        {
            Ok(updated) => {
                self.selected = None;
                updated
            }
            Err(e) => {
                tracing::error!(id_alarm, error = %e, "could not change alarm state");
                self.notice = Some(Notice::CommandFailed);
                None
            }
        }
    }
}
