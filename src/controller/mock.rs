use super::serial::{LinkError, PortDriver};
use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;

#[derive(Default)]
struct Shared {
    ports: Vec<String>,
    writes: RefCell<Vec<Vec<u8>>>,
    fail_writes: Cell<bool>,
    opens: Cell<usize>,
}

/// In-memory ports that record every write.
#[derive(Clone, Default)]
pub struct MockDriver {
    shared: Rc<Shared>,
}

impl MockDriver {
    pub fn with_ports(ports: &[&str]) -> Self {
        MockDriver {
            shared: Rc::new(Shared {
                ports: ports.iter().map(|p| p.to_string()).collect(),
                ..Shared::default()
            }),
        }
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.shared.writes.borrow().clone()
    }

    pub fn open_count(&self) -> usize {
        self.shared.opens.get()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.shared.fail_writes.set(fail);
    }
}

impl PortDriver for MockDriver {
    fn list(&self) -> Vec<String> {
        self.shared.ports.clone()
    }

    fn open(&self, name: &str, _baud: u32) -> Result<Box<dyn Write>, LinkError> {
        if !self.shared.ports.iter().any(|p| p == name) {
            return Err(LinkError::Connection {
                port: name.into(),
                reason: "No such file or directory".into(),
            });
        }
        self.shared.opens.set(self.shared.opens.get() + 1);
        Ok(Box::new(MockPort {
            shared: Rc::clone(&self.shared),
        }))
    }
}

struct MockPort {
    shared: Rc<Shared>,
}

impl Write for MockPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.shared.fail_writes.get() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device disconnected"));
        }
        self.shared.writes.borrow_mut().push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
