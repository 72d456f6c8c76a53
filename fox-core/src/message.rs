//! Beacon message buffer
//!
//! A message is a short run of symbol bytes: uppercase letters, digits and
//! the invalid-symbol marker that stands in for anything else the operator
//! typed. The same bytes are stored in flash and fed to the encoder.

use heapless::Vec;

/// Maximum message length in bytes (one flash page)
pub const MESSAGE_CAPACITY: usize = 128;

/// Stored in place of any unsupported character
///
/// The encoder has no code for it and plays a long silence instead.
pub const INVALID_SYMBOL: u8 = b'?';

/// Whether `byte` has a Morse code (`A`-`Z`, `0`-`9`)
#[inline]
pub fn is_symbol(byte: u8) -> bool {
    byte.is_ascii_uppercase() || byte.is_ascii_digit()
}

/// Map a stored byte to what the console shows for it
///
/// Symbols print as themselves, everything else as a space.
#[inline]
pub fn printable(byte: u8) -> u8 {
    if is_symbol(byte) {
        byte
    } else {
        b' '
    }
}

/// Map a raw flash byte to its page-dump character
///
/// Erased bytes show as `|`, retired (zeroed) bytes as `.`.
#[inline]
pub fn dump_char(byte: u8) -> u8 {
    match byte {
        0x00 => b'.',
        0xFF => b'|',
        other => printable(other),
    }
}

/// Fixed-capacity message buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message {
    bytes: Vec<u8, MESSAGE_CAPACITY>,
}

impl Message {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Build a message from raw bytes, truncating at capacity
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut message = Self::new();
        message.replace(bytes);
        message
    }

    /// Replace the contents, truncating at capacity
    pub fn replace(&mut self, bytes: &[u8]) {
        let len = bytes.len().min(MESSAGE_CAPACITY);
        self.bytes.clear();
        // Cannot fail: `len` is within capacity
        let _ = self.bytes.extend_from_slice(&bytes[..len]);
    }

    /// Append a byte; returns false when the buffer is full
    pub fn push(&mut self, byte: u8) -> bool {
        self.bytes.push(byte).is_ok()
    }

    /// Remove and return the last byte
    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.pop()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_classes() {
        assert!(is_symbol(b'A'));
        assert!(is_symbol(b'Z'));
        assert!(is_symbol(b'0'));
        assert!(is_symbol(b'9'));
        assert!(!is_symbol(b'a'));
        assert!(!is_symbol(INVALID_SYMBOL));
        assert!(!is_symbol(b' '));
        assert!(!is_symbol(0xFF));
    }

    #[test]
    fn test_printable_masks_non_symbols() {
        assert_eq!(printable(b'K'), b'K');
        assert_eq!(printable(INVALID_SYMBOL), b' ');
        assert_eq!(printable(0x00), b' ');
        assert_eq!(printable(0xFF), b' ');
    }

    #[test]
    fn test_dump_char() {
        assert_eq!(dump_char(0x00), b'.');
        assert_eq!(dump_char(0xFF), b'|');
        assert_eq!(dump_char(b'7'), b'7');
        assert_eq!(dump_char(INVALID_SYMBOL), b' ');
        assert_eq!(dump_char(0x1B), b' ');
    }

    #[test]
    fn test_push_stops_at_capacity() {
        let mut message = Message::new();
        for _ in 0..MESSAGE_CAPACITY {
            assert!(message.push(b'E'));
        }
        assert!(message.is_full());
        assert!(!message.push(b'T'));
        assert_eq!(message.len(), MESSAGE_CAPACITY);
    }

    #[test]
    fn test_replace_truncates() {
        let long = [b'A'; MESSAGE_CAPACITY + 10];
        let message = Message::from_slice(&long);
        assert_eq!(message.len(), MESSAGE_CAPACITY);
    }

    #[test]
    fn test_pop() {
        let mut message = Message::from_slice(b"SOS");
        assert_eq!(message.pop(), Some(b'S'));
        assert_eq!(message.as_bytes(), b"SO");
        message.clear();
        assert_eq!(message.pop(), None);
    }
}
