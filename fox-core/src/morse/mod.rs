//! Morse code generation
//!
//! A declarative symbol table and the tick-driven encoder that turns a
//! message into keying levels, one time unit per tick.

pub mod encoder;
pub mod table;

pub use encoder::{EncoderState, Encoder, Level, Tick};
pub use table::{lookup, Code, Mark};

/// Units the key stays down for a dot
pub const DOT_UNITS: u8 = 1;

/// Units the key stays down for a dash
pub const DASH_UNITS: u8 = 3;

/// Units of silence after every mark
pub const SPACE_UNITS: u8 = 1;

/// Units of silence played for a symbol without a code
///
/// Longer than a letter gap so skipped characters remain audible.
pub const GAP_UNITS: u8 = 4;
