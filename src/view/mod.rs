pub mod app;

use crate::config::Theme;
use crate::controller::codes::CommandCode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    ConnectToPort(String, u32),
    Disconnect,
    RefreshPorts,
    Send(CommandCode),
    SetTheme(Theme),
}
