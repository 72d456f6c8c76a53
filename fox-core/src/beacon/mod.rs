//! Beacon application context
//!
//! Owns the message buffer, the encoder and the store, and reacts to the
//! three events the platform raises: beacon due, byte received and unit
//! tick. Handlers never run concurrently; the platform only records
//! events and calls [`Beacon::poll`] from a single loop.
//!
//! ## Cycle
//!
//! ```text
//!            key / CR                 idle timer
//! Editing ───────────────► BeaconDue ◄──────────── (quiet)
//!    ▲                         │
//!    │ sentinel reached        │ reload stored message, start ticks
//!    └──────── Transmitting ◄──┘
//! ```
//!
//! While transmitting, console intake is disabled and keystrokes are
//! dropped. Only committed messages are ever sent: the buffer is reloaded
//! from flash at the start of every beacon, discarding unsaved edits.

pub mod console;
pub mod editor;
pub mod events;

pub use console::Console;
pub use editor::Key;
pub use events::{Event, PendingEvents};

use fox_hal::{Backoff, NvRegion, OutputPin, SystemReset, Timer, UartError, UartRx, UartTx};

use crate::message::{dump_char, Message};
use crate::morse::Encoder;
use crate::store::{LogStore, StoreError, PAGE_COUNT, PAGE_SIZE};

use console::CURSOR_RIGHT;
use editor::{BANNER, HELP};

/// Hardware the beacon runs on
pub trait Board {
    /// Transmitter keying line
    type Key: OutputPin;
    /// Operator console
    type Serial: UartTx + UartRx;
    /// Unit tick and idle timers
    type Timer: Timer;
    /// Flash sector holding the message log
    type Region: NvRegion;
    type Reset: SystemReset;
    /// Busy-wait strategy for flash and console
    type Backoff: Backoff;
}

/// Devices handed to [`Beacon::new`]
pub struct Parts<B: Board> {
    pub key: B::Key,
    pub serial: B::Serial,
    pub tick_timer: B::Timer,
    pub idle_timer: B::Timer,
    pub region: B::Region,
    pub reset: B::Reset,
    pub flash_backoff: B::Backoff,
    pub console_backoff: B::Backoff,
}

/// Beacon errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    Store(StoreError),
    Console(UartError),
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Store(e)
    }
}

impl From<UartError> for Error {
    fn from(e: UartError) -> Self {
        Error::Console(e)
    }
}

pub struct Beacon<B: Board> {
    key: B::Key,
    console: Console<B::Serial, B::Backoff>,
    tick_timer: B::Timer,
    idle_timer: B::Timer,
    reset: B::Reset,
    store: LogStore<B::Region, B::Backoff>,
    buffer: Message,
    encoder: Encoder,
    events: PendingEvents,
    transmitting: bool,
}

impl<B: Board> Beacon<B> {
    /// Take ownership of the devices and recover the stored message position
    pub fn new(parts: Parts<B>) -> Result<Self, Error> {
        let Parts {
            mut key,
            serial,
            mut tick_timer,
            mut idle_timer,
            region,
            reset,
            flash_backoff,
            console_backoff,
        } = parts;

        let mut store = LogStore::new(region, flash_backoff)?;
        store.initialize()?;

        key.set_low();
        tick_timer.stop();
        idle_timer.stop();

        Ok(Self {
            key,
            console: Console::new(serial, console_backoff),
            tick_timer,
            idle_timer,
            reset,
            store,
            buffer: Message::new(),
            encoder: Encoder::new(),
            events: PendingEvents::new(),
            transmitting: false,
        })
    }

    /// Print the banner and schedule the first beacon
    pub fn start(&mut self) -> Result<(), Error> {
        self.events.raise_beacon_due();
        for line in BANNER {
            self.console.try_write(line)?;
        }
        Ok(())
    }

    /// Record an event for the next [`poll`](Self::poll)
    pub fn raise(&mut self, event: Event) {
        self.events.raise(event);
    }

    /// Handle pending events: beacon first, then the byte, then the tick
    ///
    /// Returns whether anything was handled.
    pub fn poll(&mut self) -> bool {
        let mut handled = false;

        if self.events.take_beacon_due() {
            handled = true;
            self.handle_beacon_due();
        }

        if let Some(byte) = self.events.take_byte() {
            handled = true;
            if let Err(e) = self.handle_byte(byte) {
                warn!("beacon: key {=u8:#x} failed: {}", byte, e);
            }
        }

        if self.events.take_tick() {
            handled = true;
            self.handle_tick();
        }

        handled
    }

    /// Start sending the stored message
    pub fn handle_beacon_due(&mut self) {
        if self.transmitting {
            debug!("beacon: already transmitting");
            return;
        }

        self.console.serial_mut().unlisten();
        self.console.write(b">");
        self.load_message();
        self.console.write(b"\r");
        self.console.write(CURSOR_RIGHT);

        self.encoder.reset();
        self.transmitting = true;
        self.tick_timer.start();
        self.idle_timer.stop();

        info!("beacon: sending {} symbols", self.buffer.len());
    }

    /// Apply one console byte to the buffer
    pub fn handle_byte(&mut self, byte: u8) -> Result<(), Error> {
        if self.transmitting {
            trace!("beacon: dropped {=u8:#x} during transmission", byte);
            return Ok(());
        }

        self.idle_timer.stop();

        let key = Key::classify(byte);
        match key {
            Key::Submit => {
                let saved = self.store.save(self.buffer.as_bytes());
                self.events.raise_beacon_due();
                self.console.write(b"\r");
                saved?;
            }
            Key::Backspace => {
                if self.buffer.pop().is_some() {
                    self.console.write(b"\x08 \x08");
                }
            }
            Key::Symbol(_) | Key::Invalid => {
                if let (Some(stored), Some(echo)) = (key.stored(), key.echo()) {
                    if self.buffer.push(stored) {
                        self.console.write(&[echo]);
                    } else {
                        debug!("beacon: buffer full");
                    }
                }
            }
            Key::Reset => {
                info!("beacon: reset requested");
                self.reset.reset();
            }
            Key::Reload => {
                self.console.write(b"\r\n:");
                self.load_message();
            }
            Key::Help => {
                for line in HELP {
                    self.console.write(line);
                }
            }
            Key::Dump => return self.dump(),
        }
        Ok(())
    }

    /// Advance the encoder one unit, or finish the beacon
    pub fn handle_tick(&mut self) {
        if !self.transmitting {
            trace!("beacon: stray tick");
            return;
        }

        if self.encoder.is_complete(self.buffer.len()) {
            self.finish();
            return;
        }

        let tick = self.encoder.tick(self.buffer.as_bytes());
        self.key.set_state(tick.key.is_high());
        if tick.char_end {
            self.console.write(CURSOR_RIGHT);
        }
    }

    fn finish(&mut self) {
        self.tick_timer.stop();

        let serial = self.console.serial_mut();
        let dropped = serial.drain();
        serial.listen();
        if dropped > 0 {
            debug!("beacon: discarded {} bytes typed during transmission", dropped);
        }

        self.idle_timer.start();
        self.key.set_low();
        self.console.write(b"\n\r");

        self.encoder.reset();
        self.buffer.clear();
        self.transmitting = false;
        info!("beacon: done");
    }

    /// Replace the buffer with the stored message and print it
    fn load_message(&mut self) {
        match self.store.load() {
            Ok(message) => self.buffer = message,
            Err(e) => {
                warn!("beacon: load failed: {}", e);
                self.buffer.clear();
            }
        }
        self.console.write_printable(self.buffer.as_bytes());
    }

    fn dump(&mut self) -> Result<(), Error> {
        self.console.serial_mut().unlisten();
        self.console.write(b"\r\n");

        let result = self.dump_pages();

        self.console.write(self.buffer.as_bytes());
        self.console.serial_mut().listen();
        result
    }

    fn dump_pages(&mut self) -> Result<(), Error> {
        let mut page = [0u8; PAGE_SIZE];
        for index in 0..PAGE_COUNT {
            self.store.dump_page(index, &mut page)?;
            self.console.write_mapped(&page, dump_char);
            self.console.write(b"\r\n");
        }
        Ok(())
    }

    pub fn is_transmitting(&self) -> bool {
        self.transmitting
    }

    pub fn buffer(&self) -> &Message {
        &self.buffer
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn events(&self) -> &PendingEvents {
        &self.events
    }

    pub fn key(&self) -> &B::Key {
        &self.key
    }

    pub fn tick_timer(&self) -> &B::Timer {
        &self.tick_timer
    }

    pub fn idle_timer(&self) -> &B::Timer {
        &self.idle_timer
    }

    pub fn store(&self) -> &LogStore<B::Region, B::Backoff> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut LogStore<B::Region, B::Backoff> {
        &mut self.store
    }

    pub fn console_mut(&mut self) -> &mut Console<B::Serial, B::Backoff> {
        &mut self.console
    }
}
