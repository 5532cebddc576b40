use alarmsync_api::models::Alarm;
use alarmsync_mock::app::create_app;
use alarmsync_mock::state::MockState;
use axum::Router;

pub const MAC: &str = "AA:BB:CC";
pub const TOKEN: &str = "abc123";

pub struct MockApp {
    pub router: Router,
    pub state: MockState,
}

impl MockApp {
    pub async fn new() -> Self {
        let state = MockState::new();
        state.add_user("test@test.com", "password123").await;
        state.issue_token(TOKEN).await;
        state
            .set_alarms(
                MAC,
                vec![
                    Alarm {
                        id_alarm: 1,
                        texto: "Puerta".to_string(),
                        habilitado: true,
                        armado: false,
                    },
                    Alarm {
                        id_alarm: 2,
                        texto: "Ventana".to_string(),
                        habilitado: false,
                        armado: false,
                    },
                ],
            )
            .await;

        Self {
            router: create_app(state.clone()),
            state,
        }
    }
}
