//! Console key classification

use crate::message::INVALID_SYMBOL;

/// ASCII DEL, sent by most terminals for the backspace key
pub const BACKSPACE: u8 = 127;

/// Help block printed for `?`
pub const HELP: &[&[u8]] = &[
    b"****** HELP ******\r\n",
    b"? - Show this help\r\n",
    b": - Modify message\r\n",
    b"@ - System reset\r\n",
    b"= - Dump flash\r\n",
];

/// Startup banner
pub const BANNER: &[&[u8]] = &[
    b"Type anything to set beacon message. Type '?' for help.\r\n",
    b"'>' symbol indicates ongoing transmission. During that, typing is disabled.\r\n",
];

/// What a received byte asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Carriage return: store the buffer and send it
    Submit,
    /// Drop the last character
    Backspace,
    /// Append a symbol (already uppercased)
    Symbol(u8),
    /// `@`: restart the device
    Reset,
    /// `:`: load the stored message for editing
    Reload,
    /// `?`: print the help block
    Help,
    /// `=`: print every flash page
    Dump,
    /// Anything else: append the invalid marker
    Invalid,
}

impl Key {
    pub fn classify(byte: u8) -> Self {
        match byte {
            b'\r' => Key::Submit,
            BACKSPACE => Key::Backspace,
            b'a'..=b'z' => Key::Symbol(byte.to_ascii_uppercase()),
            b'A'..=b'Z' | b'0'..=b'9' => Key::Symbol(byte),
            b'@' => Key::Reset,
            b':' => Key::Reload,
            b'?' => Key::Help,
            b'=' => Key::Dump,
            _ => Key::Invalid,
        }
    }

    /// Byte appended to the message buffer, if any
    pub fn stored(self) -> Option<u8> {
        match self {
            Key::Symbol(byte) => Some(byte),
            Key::Invalid => Some(INVALID_SYMBOL),
            _ => None,
        }
    }

    /// Single-byte echo for keys that append
    pub fn echo(self) -> Option<u8> {
        match self {
            Key::Symbol(byte) => Some(byte),
            Key::Invalid => Some(b' '),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_uppercased() {
        assert_eq!(Key::classify(b's'), Key::Symbol(b'S'));
        assert_eq!(Key::classify(b'S'), Key::Symbol(b'S'));
        assert_eq!(Key::classify(b'7'), Key::Symbol(b'7'));
    }

    #[test]
    fn test_commands() {
        assert_eq!(Key::classify(b'\r'), Key::Submit);
        assert_eq!(Key::classify(127), Key::Backspace);
        assert_eq!(Key::classify(b'@'), Key::Reset);
        assert_eq!(Key::classify(b':'), Key::Reload);
        assert_eq!(Key::classify(b'?'), Key::Help);
        assert_eq!(Key::classify(b'='), Key::Dump);
    }

    #[test]
    fn test_everything_else_is_invalid() {
        for byte in [0x01, b' ', b'\n', 0x08, b'!', 0xFF] {
            let key = Key::classify(byte);
            assert_eq!(key, Key::Invalid, "byte {byte:#04x}");
            assert_eq!(key.stored(), Some(INVALID_SYMBOL));
            assert_eq!(key.echo(), Some(b' '));
        }
    }

    #[test]
    fn test_help_lines() {
        assert_eq!(HELP.len(), 5);
        assert!(HELP.iter().all(|line| line.ends_with(b"\r\n")));
    }
}
