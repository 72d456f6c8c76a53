//! Morse symbol table
//!
//! Codes are written out as dot/dash strings and packed at compile time
//! into a 256-entry lookup. Marks are consumed most significant bit first.

use super::{DASH_UNITS, DOT_UNITS};

/// One element of a Morse character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mark {
    Dot,
    Dash,
}

impl Mark {
    /// Key-down duration in time units
    pub fn units(self) -> u8 {
        match self {
            Mark::Dot => DOT_UNITS,
            Mark::Dash => DASH_UNITS,
        }
    }
}

/// Packed Morse code of one symbol
///
/// `pattern` holds one bit per mark starting at bit 7; a set bit is a
/// dash. `marks == 0` means the symbol has no code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Code {
    marks: u8,
    pattern: u8,
}

impl Code {
    /// Code of every unsupported symbol: no marks, silence only
    pub const GAP: Code = Code {
        marks: 0,
        pattern: 0,
    };

    /// Pack a `.`/`-` string
    pub const fn from_pattern(text: &str) -> Code {
        let bytes = text.as_bytes();
        assert!(bytes.len() <= 8, "at most 8 marks per symbol");

        let mut pattern = 0u8;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'-' {
                pattern |= 0x80 >> i;
            }
            i += 1;
        }

        Code {
            marks: bytes.len() as u8,
            pattern,
        }
    }

    /// Number of marks still encoded
    pub fn marks(&self) -> u8 {
        self.marks
    }

    pub fn is_gap(&self) -> bool {
        self.marks == 0
    }

    /// The next mark to play, if any
    pub fn first_mark(&self) -> Option<Mark> {
        if self.marks == 0 {
            None
        } else if self.pattern & 0x80 != 0 {
            Some(Mark::Dash)
        } else {
            Some(Mark::Dot)
        }
    }

    /// Drop the first mark
    pub fn shifted(self) -> Code {
        Code {
            marks: self.marks.saturating_sub(1),
            pattern: self.pattern << 1,
        }
    }
}

/// Symbol table in ITU notation
const TABLE: [(u8, &str); 36] = [
    (b'A', ".-"),
    (b'B', "-..."),
    (b'C', "-.-."),
    (b'D', "-.."),
    (b'E', "."),
    (b'F', "..-."),
    (b'G', "--."),
    (b'H', "...."),
    (b'I', ".."),
    (b'J', ".---"),
    (b'K', "-.-"),
    (b'L', ".-.."),
    (b'M', "--"),
    (b'N', "-."),
    (b'O', "---"),
    (b'P', ".--."),
    (b'Q', "--.-"),
    (b'R', ".-."),
    (b'S', "..."),
    (b'T', "-"),
    (b'U', "..-"),
    (b'V', "...-"),
    (b'W', ".--"),
    (b'X', "-..-"),
    (b'Y', "-.--"),
    (b'Z', "--.."),
    (b'0', "-----"),
    (b'1', ".----"),
    (b'2', "..---"),
    (b'3', "...--"),
    (b'4', "....-"),
    (b'5', "....."),
    (b'6', "-...."),
    (b'7', "--..."),
    (b'8', "---.."),
    (b'9', "----."),
];

const fn build() -> [Code; 256] {
    let mut codes = [Code::GAP; 256];
    let mut i = 0;
    while i < TABLE.len() {
        let (symbol, text) = TABLE[i];
        codes[symbol as usize] = Code::from_pattern(text);
        i += 1;
    }
    codes
}

static CODES: [Code; 256] = build();

/// Code for a message byte
pub fn lookup(symbol: u8) -> Code {
    CODES[symbol as usize]
}
