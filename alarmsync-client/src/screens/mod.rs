//! Headless state for the login and alarm-list screens. Rendering belongs to
//! whatever front-end drives these; each failed action leaves exactly one
//! [`Notice`] behind.

mod alarm_list;
mod login;

pub use alarm_list::*;
pub use login::*;

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidCredentials,
    LoginFailed,
    AlarmsUnavailable,
    CommandFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::InvalidCredentials => "Correo electrónico o contraseña incorrectos",
            Notice::LoginFailed => "Algo salió mal",
            Notice::AlarmsUnavailable => "No se pudieron cargar las alarmas.",
            Notice::CommandFailed => "No se pudo cambiar el estado de la alarma.",
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
