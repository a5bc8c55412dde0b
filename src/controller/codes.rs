// JUMA voice memory command set

const CODE_PAYLOAD: [(CommandCode, &[u8]); 15] = [
    (CommandCode::MicRecord, b"M"),
    (CommandCode::RxRecord, b"R"),
    (CommandCode::Play, b"P"),
    (CommandCode::Transmit, b"T"),
    (CommandCode::Stop, b"S"),
    (CommandCode::Memory0, b"0"),
    (CommandCode::Memory1, b"1"),
    (CommandCode::Memory2, b"2"),
    (CommandCode::Memory3, b"3"),
    (CommandCode::Memory4, b"4"),
    (CommandCode::Memory5, b"5"),
    (CommandCode::Memory6, b"6"),
    (CommandCode::Memory7, b"7"),
    (CommandCode::Memory8, b"8"),
    (CommandCode::Memory9, b"9"),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommandCode {
    MicRecord,
    RxRecord,
    Play,
    Transmit,
    Stop,
    Memory0,
    Memory1,
    Memory2,
    Memory3,
    Memory4,
    Memory5,
    Memory6,
    Memory7,
    Memory8,
    Memory9,
}

impl CommandCode {
    pub const ACTIONS: [CommandCode; 5] = [
        CommandCode::MicRecord,
        CommandCode::RxRecord,
        CommandCode::Play,
        CommandCode::Transmit,
        CommandCode::Stop,
    ];

    /// Memory slot selector for a single decimal digit.
    pub fn memory(digit: u8) -> Option<Self> {
        if digit > 9 {
            return None;
        }
        Self::try_from(b'0' + digit).ok()
    }

    /// Bytes written to the radio for this code.
    pub fn payload(self) -> &'static [u8] {
        for &(code, payload) in &CODE_PAYLOAD {
            if code == self {
                return payload;
            }
        }

        &[]
    }

    pub fn label(self) -> String {
        use CommandCode::*;
        match self {
            MicRecord => "MIC record".into(),
            RxRecord => "RX record".into(),
            Play => "Play".into(),
            Transmit => "Transmit".into(),
            Stop => "Stop".into(),
            _ => format!("Memory {}", String::from_utf8_lossy(self.payload())),
        }
    }
}

/// Reverse lookup from a payload byte; hotkeys use the same letters.
impl TryFrom<u8> for CommandCode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        let byte = byte.to_ascii_uppercase();
        for &(code, payload) in &CODE_PAYLOAD {
            if payload == [byte] {
                return Ok(code);
            }
        }

        Err(byte)
    }
}

impl core::fmt::Display for CommandCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_digit_has_its_own_payload() {
        let mut seen = HashSet::new();
        for digit in 0..10u8 {
            let code = CommandCode::memory(digit).unwrap();
            assert_eq!(code.payload(), &[b'0' + digit]);
            assert!(seen.insert(code), "digit {} reused a code", digit);
        }
        assert_eq!(CommandCode::memory(10), None);
    }

    #[test]
    fn payloads_are_distinct() {
        let payloads: HashSet<&[u8]> = CODE_PAYLOAD.iter().map(|(_, p)| *p).collect();
        assert_eq!(payloads.len(), CODE_PAYLOAD.len());
        assert!(CODE_PAYLOAD.iter().all(|(c, _)| !c.payload().is_empty()));
    }

    #[test]
    fn action_payloads() {
        assert_eq!(CommandCode::MicRecord.payload(), b"M");
        assert_eq!(CommandCode::RxRecord.payload(), b"R");
        assert_eq!(CommandCode::Play.payload(), b"P");
        assert_eq!(CommandCode::Transmit.payload(), b"T");
        assert_eq!(CommandCode::Stop.payload(), b"S");
    }

    #[test]
    fn hotkeys_ignore_case() {
        assert_eq!(CommandCode::try_from(b'p'), Ok(CommandCode::Play));
        assert_eq!(CommandCode::try_from(b'S'), Ok(CommandCode::Stop));
        assert_eq!(CommandCode::try_from(b'7'), Ok(CommandCode::Memory7));
        assert_eq!(CommandCode::try_from(b'x'), Err(b'X'));
    }

    #[test]
    fn labels() {
        assert_eq!(CommandCode::Play.to_string(), "Play");
        assert_eq!(CommandCode::MicRecord.to_string(), "MIC record");
        assert_eq!(CommandCode::Memory3.to_string(), "Memory 3");
    }
}
