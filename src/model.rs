use std::time::{Duration, Instant, SystemTime};
use time::{format_description, OffsetDateTime};

pub const COMMAND_DISPLAY_TIME: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Connection {
    Connected(String, u32),
    Disconnected,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Idle,
    Ok,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub level: StatusLevel,
}

/// Echo of the last payload written to the radio.
#[derive(Clone, Debug)]
pub struct LastCommand {
    pub text: String,
    pub timestamp: String,
    pub sent_at: Instant,
}

#[derive(Clone, Debug)]
pub struct Model {
    pub ports: Vec<String>,
    pub connection: Connection,
    pub status: Status,
    pub last_command: Option<LastCommand>,
}

impl Default for Model {
    fn default() -> Self {
        Model {
            ports: Vec::new(),
            connection: Connection::Disconnected,
            status: Status {
                text: "Idle".into(),
                level: StatusLevel::Idle,
            },
            last_command: None,
        }
    }
}

impl Model {
    pub fn is_connected(self: &Self) -> bool {
        match self.connection {
            Connection::Connected(..) => true,
            Connection::Disconnected => false,
        }
    }

    pub fn status(self: &mut Self, text: String, level: StatusLevel) {
        match level {
            StatusLevel::Error => log::warn!("{}", text),
            _ => log::info!("{}", text),
        }
        self.status = Status { text, level };
    }

    pub fn command_sent(self: &mut Self, payload: &[u8], now: Instant) {
        let timestamp = format_description::parse("[hour]:[minute]:[second]")
            .ok()
            .and_then(|format| OffsetDateTime::from(SystemTime::now()).format(&format).ok())
            .unwrap_or_default();

        self.last_command = Some(LastCommand {
            text: String::from_utf8_lossy(payload).into_owned(),
            timestamp,
            sent_at: now,
        });
    }

    /// Clears the command echo once it has been shown long enough.
    pub fn expire_command(self: &mut Self, now: Instant) {
        let expired = match &self.last_command {
            Some(cmd) => now.saturating_duration_since(cmd.sent_at) >= COMMAND_DISPLAY_TIME,
            None => false,
        };
        if expired {
            self.last_command = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_disconnected() {
        let model = Model::default();
        assert!(!model.is_connected());
        assert_eq!(model.status.text, "Idle");
        assert_eq!(model.status.level, StatusLevel::Idle);
    }

    #[test]
    fn command_echo_expires() {
        let mut model = Model::default();
        let start = Instant::now();
        model.command_sent(b"P", start);
        assert_eq!(model.last_command.as_ref().unwrap().text, "P");

        model.expire_command(start + Duration::from_secs(4));
        assert!(model.last_command.is_some());

        model.expire_command(start + COMMAND_DISPLAY_TIME);
        assert!(model.last_command.is_none());
    }

    #[test]
    fn status_overwrites_previous() {
        let mut model = Model::default();
        model.status("Play command sent".into(), StatusLevel::Ok);
        model.status("Send failed: broken pipe".into(), StatusLevel::Error);
        assert_eq!(model.status.text, "Send failed: broken pipe");
        assert_eq!(model.status.level, StatusLevel::Error);
    }
}
