//! Events raised by the timers and the serial receiver

/// Something the beacon has to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Idle timer expired (or a message was just submitted)
    BeaconDue,
    /// A byte arrived on the console
    Byte(u8),
    /// One Morse unit elapsed
    Tick,
}

/// Set of events waiting to be handled
///
/// Each kind is a flag, so raising an event twice before it is handled
/// counts once. The received byte behaves like a receive register: a new
/// byte replaces one that was never picked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingEvents {
    beacon_due: bool,
    byte: Option<u8>,
    tick: bool,
}

impl PendingEvents {
    pub const fn new() -> Self {
        Self {
            beacon_due: false,
            byte: None,
            tick: false,
        }
    }

    pub fn raise(&mut self, event: Event) {
        match event {
            Event::BeaconDue => self.beacon_due = true,
            Event::Byte(byte) => self.byte = Some(byte),
            Event::Tick => self.tick = true,
        }
    }

    pub fn raise_beacon_due(&mut self) {
        self.beacon_due = true;
    }

    pub fn raise_byte(&mut self, byte: u8) {
        self.byte = Some(byte);
    }

    pub fn raise_tick(&mut self) {
        self.tick = true;
    }

    /// Clear and return the beacon flag
    pub fn take_beacon_due(&mut self) -> bool {
        core::mem::take(&mut self.beacon_due)
    }

    /// Clear and return the latched byte
    pub fn take_byte(&mut self) -> Option<u8> {
        self.byte.take()
    }

    /// Clear and return the tick flag
    pub fn take_tick(&mut self) -> bool {
        core::mem::take(&mut self.tick)
    }

    pub fn is_empty(&self) -> bool {
        !self.beacon_due && self.byte.is_none() && !self.tick
    }
}
