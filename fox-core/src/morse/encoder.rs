//! Tick-driven Morse encoder
//!
//! Advances exactly one step per time unit and reports the level the
//! keying line should have for that unit. The encoder knows nothing about
//! pins, timers or the console; it reads the message it is handed and its
//! caller decides when the beacon is finished (see [`Encoder::is_complete`]).
//!
//! Per character the unit sequence is:
//!
//! ```text
//! CharFetch  (low)
//! ┌ SymbolFetch (low)
//! │ PlayMark    (high × 1 for a dot, × 3 for a dash)
//! └ PlaySpace   (low × 1)           repeated per mark
//! CharEnd    (low, cursor advance)
//! ```
//!
//! A symbol without a code replaces the marks with a four-unit PlaySpace.

use super::table::{lookup, Code};
use super::{GAP_UNITS, SPACE_UNITS};

/// Keying line level for one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

/// Outcome of one encoder step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// Level of the keying line for this unit
    pub key: Level,
    /// A character has just been fully played
    pub char_end: bool,
}

impl Tick {
    const fn low() -> Self {
        Self {
            key: Level::Low,
            char_end: false,
        }
    }
}

/// Encoder states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderState {
    /// Load the code of the next message byte
    CharFetch,
    /// Schedule the next mark of the current character
    SymbolFetch,
    /// Key down for the scheduled duration
    PlayMark,
    /// Key up for the scheduled duration
    PlaySpace,
    /// Character finished
    CharEnd,
}

/// Morse encoder progress
#[derive(Debug, Clone)]
pub struct Encoder {
    state: EncoderState,
    /// Marks left in the current character
    marks_left: u8,
    /// Units left in the current mark or space
    units_left: u8,
    /// Index of the next message byte to fetch
    position: usize,
    /// Current character, shifted past the marks already scheduled
    code: Code,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub const fn new() -> Self {
        Self {
            state: EncoderState::CharFetch,
            marks_left: 0,
            units_left: 0,
            position: 0,
            code: Code::GAP,
        }
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> EncoderState {
        self.state
    }

    /// Number of message bytes fetched so far
    ///
    /// Reaches `len + 1` once the slot after the last character has been
    /// fetched.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether every character of a `len`-byte message has been played
    pub fn is_complete(&self, len: usize) -> bool {
        self.position > len
    }

    /// Advance one time unit
    pub fn tick(&mut self, message: &[u8]) -> Tick {
        match self.state {
            EncoderState::CharFetch => {
                // The slot past the end reads as a gap and marks completion
                let code = message
                    .get(self.position)
                    .map_or(Code::GAP, |&symbol| lookup(symbol));
                self.position += 1;
                self.code = code;
                self.marks_left = code.marks();

                if code.is_gap() {
                    self.units_left = GAP_UNITS;
                    self.state = EncoderState::PlaySpace;
                } else {
                    self.state = EncoderState::SymbolFetch;
                }
                Tick::low()
            }

            EncoderState::SymbolFetch => {
                match self.code.first_mark() {
                    Some(mark) => {
                        self.units_left = mark.units();
                        self.code = self.code.shifted();
                        self.marks_left = self.marks_left.saturating_sub(1);
                        self.state = EncoderState::PlayMark;
                    }
                    None => {
                        self.marks_left = 0;
                        self.state = EncoderState::CharEnd;
                    }
                }
                Tick::low()
            }

            EncoderState::PlayMark => {
                self.units_left = self.units_left.saturating_sub(1);
                if self.units_left == 0 {
                    self.units_left = SPACE_UNITS;
                    self.state = EncoderState::PlaySpace;
                }
                Tick {
                    key: Level::High,
                    char_end: false,
                }
            }

            EncoderState::PlaySpace => {
                self.units_left = self.units_left.saturating_sub(1);
                if self.units_left == 0 {
                    self.state = if self.marks_left == 0 {
                        EncoderState::CharEnd
                    } else {
                        EncoderState::SymbolFetch
                    };
                }
                Tick::low()
            }

            EncoderState::CharEnd => {
                self.state = EncoderState::CharFetch;
                Tick {
                    key: Level::Low,
                    char_end: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::INVALID_SYMBOL;
    use std::vec::Vec;

    /// Step until complete, the way the beacon drives the encoder
    fn play(message: &[u8]) -> Vec<Tick> {
        let mut encoder = Encoder::new();
        let mut ticks = Vec::new();
        while !encoder.is_complete(message.len()) {
            ticks.push(encoder.tick(message));
            assert!(ticks.len() < 10_000, "encoder never completed");
        }
        ticks
    }

    /// Lengths of consecutive runs of the given level
    fn runs(ticks: &[Tick], level: Level) -> Vec<usize> {
        let mut out = Vec::new();
        let mut current = 0;
        for tick in ticks {
            if tick.key == level {
                current += 1;
            } else if current > 0 {
                out.push(current);
                current = 0;
            }
        }
        if current > 0 {
            out.push(current);
        }
        out
    }

    fn levels(ticks: &[Tick]) -> Vec<u8> {
        ticks.iter().map(|t| t.key.is_high() as u8).collect()
    }

    #[test]
    fn test_single_dot() {
        let ticks = play(b"E");
        // fetch, symbol, mark, space, char end, sentinel fetch
        assert_eq!(levels(&ticks), [0, 0, 1, 0, 0, 0]);
        assert!(ticks[4].char_end);
    }

    #[test]
    fn test_single_dash() {
        let ticks = play(b"T");
        assert_eq!(levels(&ticks), [0, 0, 1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_sos_pulse_train() {
        let ticks = play(b"SOS");

        assert_eq!(runs(&ticks, Level::High), [1, 1, 1, 3, 3, 3, 1, 1, 1]);
        assert_eq!(ticks.iter().filter(|t| t.char_end).count(), 3);

        // S = 11 units, O = 17 units, plus the sentinel fetch
        assert_eq!(ticks.len(), 11 + 17 + 11 + 1);

        // Letter boundary: space, char end, fetch, symbol fetch
        let s_end = 11;
        assert_eq!(levels(&ticks[s_end - 2..s_end + 2]), [0, 0, 0, 0]);
        assert!(ticks[s_end - 1].char_end);
    }

    #[test]
    fn test_invalid_symbol_is_silent_gap() {
        let mut encoder = Encoder::new();
        let message = [INVALID_SYMBOL];

        let fetch = encoder.tick(&message);
        assert_eq!(fetch.key, Level::Low);
        assert_eq!(encoder.state(), EncoderState::PlaySpace);

        for _ in 0..4 {
            assert_eq!(encoder.tick(&message).key, Level::Low);
        }
        assert_eq!(encoder.state(), EncoderState::CharEnd);
        assert!(encoder.tick(&message).char_end);

        let ticks = play(&message);
        assert!(ticks.iter().all(|t| t.key == Level::Low));
        assert_eq!(ticks.len(), 1 + 4 + 1 + 1);
    }

    #[test]
    fn test_gap_between_valid_symbols() {
        let ticks = play(&[b'E', INVALID_SYMBOL, b'E']);
        assert_eq!(runs(&ticks, Level::High), [1, 1]);
        // Silence between the two dots: space, end, fetch, 4 gap, end, fetch, symbol
        assert_eq!(runs(&ticks, Level::Low)[1], 1 + 1 + 1 + 4 + 1 + 1 + 1);
    }

    #[test]
    fn test_empty_message_completes_after_sentinel() {
        let mut encoder = Encoder::new();
        assert!(!encoder.is_complete(0));
        encoder.tick(&[]);
        assert!(encoder.is_complete(0));
        assert_eq!(encoder.position(), 1);
    }

    #[test]
    fn test_reset() {
        let mut encoder = Encoder::new();
        for _ in 0..5 {
            encoder.tick(b"OK");
        }
        encoder.reset();
        assert_eq!(encoder.state(), EncoderState::CharFetch);
        assert_eq!(encoder.position(), 0);
    }
}
