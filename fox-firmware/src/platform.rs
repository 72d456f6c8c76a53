//! Board glue
//!
//! Binds the beacon's device traits to the embassy tasks and the
//! RP2040 peripherals.

use embassy_rp::gpio::Output;
use embassy_rp::uart::Async;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::Ordering;

use fox_core::Board;
use fox_hal::{Spin, Timer, UartError, UartRx, UartTx};
use fox_hal_rp2040::{ConsoleTx, CortexReset, KeyLine, UserRegion};

use crate::channels::{TimerCommand, INTAKE, RX_BYTES};

/// Timer backed by a timer task
///
/// Expiry arrives as an event on the controller's channel.
pub struct SignalTimer {
    ctrl: &'static Signal<CriticalSectionRawMutex, TimerCommand>,
    running: bool,
}

impl SignalTimer {
    pub const fn new(ctrl: &'static Signal<CriticalSectionRawMutex, TimerCommand>) -> Self {
        Self {
            ctrl,
            running: false,
        }
    }
}

impl Timer for SignalTimer {
    fn start(&mut self) {
        self.ctrl.signal(TimerCommand::Start);
        self.running = true;
    }

    fn stop(&mut self) {
        self.ctrl.signal(TimerCommand::Stop);
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Console: blocking transmitter plus the gate on the receive task
pub struct ConsolePort {
    tx: ConsoleTx<'static, Async>,
}

impl ConsolePort {
    pub fn new(tx: ConsoleTx<'static, Async>) -> Self {
        Self { tx }
    }
}

impl UartTx for ConsolePort {
    fn write_byte(&mut self, byte: u8) -> Result<(), UartError> {
        self.tx.write_byte(byte)
    }

    fn is_transmit_complete(&mut self) -> bool {
        self.tx.is_transmit_complete()
    }
}

impl UartRx for ConsolePort {
    fn listen(&mut self) {
        INTAKE.store(true, Ordering::Release);
    }

    fn unlisten(&mut self) {
        INTAKE.store(false, Ordering::Release);
    }

    fn is_listening(&self) -> bool {
        INTAKE.load(Ordering::Acquire)
    }

    fn drain(&mut self) -> usize {
        let mut dropped = 0;
        while RX_BYTES.try_receive().is_ok() {
            dropped += 1;
        }
        dropped
    }
}

/// The RP2040 beacon board
pub struct FirmwareBoard;

impl Board for FirmwareBoard {
    type Key = KeyLine<Output<'static>>;
    type Serial = ConsolePort;
    type Timer = SignalTimer;
    type Region = UserRegion<'static>;
    type Reset = CortexReset;
    type Backoff = Spin;
}
