//! Simulated devices for host tests

use std::vec;
use std::vec::Vec;

use fox_hal::{Backoff, FlashError, NvRegion, OutputPin, SystemReset, Timer, UartError, UartRx, UartTx, ERASED};

use crate::beacon::Board;
use crate::store::REGION_SIZE;

/// Backoff that only counts how often it was asked to wait
#[derive(Debug, Default)]
pub struct CountingBackoff {
    pub snoozes: u32,
}

impl Backoff for CountingBackoff {
    fn snooze(&mut self) {
        self.snoozes += 1;
    }
}

/// NOR flash sector held in memory
///
/// Programming ANDs into the stored bytes, so writing zeros retires data
/// and writing 0xFF leaves it alone.
#[derive(Debug)]
pub struct SimRegion {
    data: Vec<u8>,
    unlocked: bool,
    /// Polls for which the device reports busy after each operation
    pub busy_polls: u32,
    busy_left: u32,
    /// Fail the next program call without touching the array
    pub fail_next_program: bool,
    /// Program only this many bytes of the next page, then fail
    pub cut_power_after: Option<usize>,
    pub programs: u32,
    pub erases: u32,
    pub busy_checks: u32,
}

impl SimRegion {
    pub fn new() -> Self {
        Self {
            data: vec![ERASED; REGION_SIZE],
            unlocked: false,
            busy_polls: 0,
            busy_left: 0,
            fail_next_program: false,
            cut_power_after: None,
            programs: 0,
            erases: 0,
            busy_checks: 0,
        }
    }

    pub fn contents(&self) -> &[u8] {
        &self.data
    }

    pub fn contents_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn is_locked(&self) -> bool {
        !self.unlocked
    }
}

impl NvRegion for SimRegion {
    fn capacity(&self) -> usize {
        self.data.len()
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), FlashError> {
        let src = self
            .data
            .get(offset..offset + buf.len())
            .ok_or(FlashError::OutOfBounds)?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn is_busy(&mut self) -> bool {
        self.busy_checks += 1;
        if self.busy_left == 0 {
            false
        } else {
            self.busy_left -= 1;
            true
        }
    }

    fn unlock(&mut self) {
        self.unlocked = true;
    }

    fn lock(&mut self) {
        self.unlocked = false;
    }

    fn program(&mut self, offset: usize, data: &[u8]) -> Result<(), FlashError> {
        if !self.unlocked {
            return Err(FlashError::Locked);
        }
        if self.fail_next_program {
            self.fail_next_program = false;
            return Err(FlashError::Program);
        }
        let cells = self
            .data
            .get_mut(offset..offset + data.len())
            .ok_or(FlashError::OutOfBounds)?;

        let (count, result) = match self.cut_power_after.take() {
            Some(n) => (n.min(data.len()), Err(FlashError::Program)),
            None => (data.len(), Ok(())),
        };
        for (cell, byte) in cells.iter_mut().zip(data).take(count) {
            *cell &= *byte;
        }

        self.programs += 1;
        self.busy_left = self.busy_polls;
        result
    }

    fn erase_sector(&mut self) -> Result<(), FlashError> {
        if !self.unlocked {
            return Err(FlashError::Locked);
        }
        self.data.fill(ERASED);
        self.erases += 1;
        self.busy_left = self.busy_polls;
        Ok(())
    }
}

/// Keying line that records every level written
#[derive(Debug, Default)]
pub struct SimPin {
    high: bool,
    pub history: Vec<bool>,
}

impl OutputPin for SimPin {
    fn set_high(&mut self) {
        self.high = true;
        self.history.push(true);
    }

    fn set_low(&mut self) {
        self.high = false;
        self.history.push(false);
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Console capturing transmitted bytes
#[derive(Debug)]
pub struct SimSerial {
    pub sent: Vec<u8>,
    listening: bool,
    /// Bytes waiting in the receiver
    pub pending_rx: usize,
    pub drained: usize,
    /// Polls before each byte reports transmit-complete
    pub tx_latency: u32,
    tx_left: u32,
}

impl Default for SimSerial {
    fn default() -> Self {
        Self {
            sent: Vec::new(),
            listening: true,
            pending_rx: 0,
            drained: 0,
            tx_latency: 0,
            tx_left: 0,
        }
    }
}

impl SimSerial {
    pub fn take_sent(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.sent)
    }
}

impl UartTx for SimSerial {
    fn write_byte(&mut self, byte: u8) -> Result<(), UartError> {
        if self.tx_left != 0 {
            return Err(UartError::Other);
        }
        self.sent.push(byte);
        self.tx_left = self.tx_latency;
        Ok(())
    }

    fn is_transmit_complete(&mut self) -> bool {
        if self.tx_left == 0 {
            true
        } else {
            self.tx_left -= 1;
            false
        }
    }
}

impl UartRx for SimSerial {
    fn listen(&mut self) {
        self.listening = true;
    }

    fn unlisten(&mut self) {
        self.listening = false;
    }

    fn is_listening(&self) -> bool {
        self.listening
    }

    fn drain(&mut self) -> usize {
        let n = core::mem::take(&mut self.pending_rx);
        self.drained += n;
        n
    }
}

#[derive(Debug, Default)]
pub struct SimTimer {
    running: bool,
    pub starts: u32,
}

impl Timer for SimTimer {
    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[derive(Debug, Default)]
pub struct SimReset;

impl SystemReset for SimReset {
    fn reset(&mut self) -> ! {
        panic!("system reset");
    }
}

/// Board made of simulated devices
pub struct SimBoard;

impl Board for SimBoard {
    type Key = SimPin;
    type Serial = SimSerial;
    type Timer = SimTimer;
    type Region = SimRegion;
    type Reset = SimReset;
    type Backoff = CountingBackoff;
}
