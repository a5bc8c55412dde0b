use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod codes;
#[cfg(test)]
mod mock;
pub mod serial;

use crate::config::Preferences;
use crate::model::{Connection, Model, StatusLevel};
use crate::view;
use codes::CommandCode;
use serial::{LinkError, PortDriver, SerialLink};

const PORT_REFRESH_PERIOD: Duration = Duration::from_millis(2000);

/// Application context: the serial link, what the window shows and the saved preferences.
pub struct Controller<D: PortDriver> {
    link: SerialLink<D>,
    model: Model,
    preferences: Preferences,
    preferences_path: Option<PathBuf>,
    portts: Instant,
}

impl<D: PortDriver> Controller<D> {
    pub fn new(driver: D, preferences: Preferences, preferences_path: Option<PathBuf>) -> Self {
        let mut controller = Controller {
            link: SerialLink::new(driver),
            model: Model::default(),
            preferences,
            preferences_path,
            portts: Instant::now(),
        };
        controller.refresh_ports();
        controller
    }

    pub fn model(self: &Self) -> &Model {
        &self.model
    }

    pub fn preferences(self: &Self) -> &Preferences {
        &self.preferences
    }

    pub fn handle(self: &mut Self, msg: view::Message) {
        use view::Message::*;
        match msg {
            ConnectToPort(port, baud) => self.connect(&port, baud),
            Disconnect => self.disconnect(),
            RefreshPorts => self.refresh_ports(),
            Send(code) => {
                self.dispatch(code).ok();
            }
            SetTheme(theme) => {
                self.preferences.theme = theme;
                self.save_preferences();
            }
        }
    }

    /// Periodic housekeeping, called once per frame.
    pub fn tick(self: &mut Self, now: Instant) {
        self.model.expire_command(now);

        if !self.link.is_connected() && now.duration_since(self.portts) > PORT_REFRESH_PERIOD {
            self.refresh_ports();
            self.portts = now;
        }
    }

    /// Writes `code` to the radio and reports the outcome on the status line.
    pub fn dispatch(self: &mut Self, code: CommandCode) -> Result<(), LinkError> {
        match self.link.send(code) {
            Ok(()) => {
                let level = if code == CommandCode::Stop {
                    StatusLevel::Idle
                } else {
                    StatusLevel::Ok
                };
                self.model
                    .status(format!("{} command sent", code.label()), level);
                self.model.command_sent(code.payload(), Instant::now());
                Ok(())
            }
            Err(e) => {
                let text = match &e {
                    LinkError::NotConnected => e.to_string(),
                    _ => format!("Send failed: {}", e),
                };
                self.model.status(text, StatusLevel::Error);
                Err(e)
            }
        }
    }

    fn connect(self: &mut Self, port: &str, baud: u32) {
        let port = port.trim();
        if port.is_empty() {
            self.model
                .status("Choose a serial port first.".into(), StatusLevel::Error);
            return;
        }

        match self.link.connect(port, baud) {
            Ok(()) => {
                self.sync_connection();
                self.model
                    .status(format!("Connected: {} @ {}", port, baud), StatusLevel::Ok);
                self.preferences.port = Some(port.into());
                self.preferences.baud = baud;
                self.save_preferences();
            }
            Err(e) => {
                self.sync_connection();
                self.model
                    .status(format!("Open failed: {}", e), StatusLevel::Error);
            }
        }
    }

    fn disconnect(self: &mut Self) {
        self.link.disconnect();
        self.sync_connection();
        self.model.status("Idle".into(), StatusLevel::Idle);
    }

    fn sync_connection(self: &mut Self) {
        self.model.connection = match (self.link.port_name(), self.link.baud()) {
            (Some(name), Some(baud)) => Connection::Connected(name.into(), baud),
            _ => Connection::Disconnected,
        };
    }

    fn refresh_ports(self: &mut Self) {
        self.model.ports = self.link.driver().list();
    }

    fn save_preferences(self: &Self) {
        if let Some(path) = &self.preferences_path {
            self.preferences.save(path);
        }
    }
}
