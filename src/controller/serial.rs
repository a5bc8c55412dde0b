use super::codes::CommandCode;
use regex::Regex;
use serialport::available_ports;
use std::io::{self, Write};
use std::time::Duration;
use std::vec::Vec;

pub const DEFAULT_BAUD: u32 = 9600;
pub const BAUD_RATES: [u32; 10] = [300, 600, 1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200];

const WRITE_TIMEOUT: Duration = Duration::from_millis(1000);

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("{port}: {reason}")]
    Connection { port: String, reason: String },

    #[error("Port is not open!")]
    NotConnected,

    #[error("{0}")]
    Write(#[from] io::Error),
}

/// Where ports come from. The desktop build talks to the OS, tests swap in a mock.
pub trait PortDriver {
    fn list(&self) -> Vec<String>;
    fn open(&self, name: &str, baud: u32) -> Result<Box<dyn Write>, LinkError>;
}

pub struct NativeDriver;

impl PortDriver for NativeDriver {
    fn list(&self) -> Vec<String> {
        get_serial_ports()
    }

    fn open(&self, name: &str, baud: u32) -> Result<Box<dyn Write>, LinkError> {
        let builder = serialport::new(name, baud)
            .timeout(WRITE_TIMEOUT)
            .stop_bits(serialport::StopBits::One)
            .data_bits(serialport::DataBits::Eight);
        match builder.open() {
            Ok(opened_port) => Ok(Box::new(opened_port)),
            Err(e) => {
                log::warn!("Port connection error: {:?}", e);
                Err(LinkError::Connection {
                    port: name.into(),
                    reason: e.description,
                })
            }
        }
    }
}

pub fn get_serial_ports() -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    match available_ports() {
        Ok(ports) => {
            for p in ports {
                result.push(p.port_name);
            }
        }
        Err(e) => {
            log::error!("Error listing serial ports: {:?}", e);
        }
    }

    return result;
}

/// Picks the port a JUMA USB adapter most likely shows up as on `os`
/// (a `std::env::consts::OS` value).
pub fn preferred_port(ports: &[String], os: &str) -> String {
    fn first_or(candidates: Vec<&String>, ports: &[String], fallback: &str) -> String {
        candidates
            .first()
            .map(|p| p.to_string())
            .or_else(|| ports.first().cloned())
            .unwrap_or_else(|| fallback.into())
    }

    match os {
        "macos" => {
            let usb = Regex::new(r"(?i)usb(serial|modem)").ok();
            let mut prefer: Vec<&String> = ports.iter().filter(|p| p.contains("/dev/cu.")).collect();
            prefer.sort_by_key(|p| {
                let is_usb = usb.as_ref().map_or(false, |re| re.is_match(p));
                (!is_usb, p.to_string())
            });
            first_or(prefer, ports, "/dev/cu.usbserial")
        }
        "linux" => {
            let tty = Regex::new(r"/dev/tty(USB|ACM)\d+").ok();
            let mut prefer: Vec<&String> = ports
                .iter()
                .filter(|p| tty.as_ref().map_or(false, |re| re.is_match(p)))
                .collect();
            prefer.sort();
            first_or(prefer, ports, "/dev/ttyUSB0")
        }
        _ => {
            let com = Regex::new(r"(?i)^COM\d+$").ok();
            let prefer: Vec<&String> = ports
                .iter()
                .filter(|p| com.as_ref().map_or(false, |re| re.is_match(p)))
                .collect();
            first_or(prefer, ports, "COM3")
        }
    }
}

struct OpenPort {
    name: String,
    baud: u32,
    writer: Box<dyn Write>,
}

/// Owns the single connection to the transceiver.
pub struct SerialLink<D: PortDriver> {
    driver: D,
    port: Option<OpenPort>,
}

impl<D: PortDriver> SerialLink<D> {
    pub fn new(driver: D) -> Self {
        SerialLink { driver, port: None }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    pub fn port_name(&self) -> Option<&str> {
        self.port.as_ref().map(|p| p.name.as_str())
    }

    pub fn baud(&self) -> Option<u32> {
        self.port.as_ref().map(|p| p.baud)
    }

    /// Opens `name`, closing any port that is already open first.
    pub fn connect(&mut self, name: &str, baud: u32) -> Result<(), LinkError> {
        self.disconnect();

        let writer = self.driver.open(name, baud)?;
        log::info!("Opened {} @ {}", name, baud);
        self.port = Some(OpenPort {
            name: name.into(),
            baud,
            writer,
        });
        Ok(())
    }

    pub fn send(&mut self, code: CommandCode) -> Result<(), LinkError> {
        let port = self.port.as_mut().ok_or(LinkError::NotConnected)?;

        port.writer.write_all(code.payload())?;
        port.writer.flush()?;
        log::info!("Sent {:?} ({:?}) to {}", code, code.payload(), port.name);
        Ok(())
    }

    pub fn disconnect(&mut self) {
        if let Some(port) = self.port.take() {
            log::info!("Closing {}", port.name);
        }
    }
}

impl<D: PortDriver> Drop for SerialLink<D> {
    fn drop(&mut self) {
        self.disconnect();
    }
}
