//! Inter-task communication channels
//!
//! Timer tasks and the serial receiver only push into these; the
//! controller task is the single consumer and owns all beacon state.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicBool;

use fox_core::Event;

/// Channel capacity for timer events
const EVENT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for received console bytes
const RX_CHANNEL_SIZE: usize = 16;

/// Start/stop request for a timer task
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum TimerCommand {
    /// Restart counting from zero
    Start,
    Stop,
}

/// Beacon-due and tick events from the timer tasks
pub static EVENTS: Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_SIZE> = Channel::new();

/// Console bytes accepted while intake is enabled
pub static RX_BYTES: Channel<CriticalSectionRawMutex, u8, RX_CHANNEL_SIZE> = Channel::new();

/// Control of the Morse unit timer
pub static TICK_CTRL: Signal<CriticalSectionRawMutex, TimerCommand> = Signal::new();

/// Control of the idle (beacon) timer
pub static IDLE_CTRL: Signal<CriticalSectionRawMutex, TimerCommand> = Signal::new();

/// Whether the serial receiver forwards bytes
pub static INTAKE: AtomicBool = AtomicBool::new(true);
