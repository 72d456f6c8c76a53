//! Unit tick and idle timer tasks
//!
//! Each timer idles until it is started, then pushes its event into the
//! controller channel once per period. A start while running restarts the
//! period from zero; a stop parks the task again.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};

use fox_core::Event;

use crate::channels::{TimerCommand, EVENTS, IDLE_CTRL, TICK_CTRL};

async fn run(ctrl: &Signal<CriticalSectionRawMutex, TimerCommand>, period: Duration, event: Event) {
    loop {
        while ctrl.wait().await != TimerCommand::Start {}

        let mut ticker = Ticker::every(period);
        loop {
            match select(ticker.next(), ctrl.wait()).await {
                Either::First(()) => {
                    // Events are flags on the controller side; a full channel
                    // already holds one
                    if EVENTS.try_send(event).is_err() {
                        trace!("timer: channel full, dropped {}", event);
                    }
                }
                Either::Second(TimerCommand::Start) => ticker = Ticker::every(period),
                Either::Second(TimerCommand::Stop) => break,
            }
        }
    }
}

/// Morse unit timer
#[embassy_executor::task]
pub async fn tick_task(period: Duration) {
    info!("Tick task started ({} ms)", period.as_millis());
    run(&TICK_CTRL, period, Event::Tick).await;
}

/// Idle timer that schedules the next beacon
#[embassy_executor::task]
pub async fn idle_task(period: Duration) {
    info!("Idle task started ({} ms)", period.as_millis());
    run(&IDLE_CTRL, period, Event::BeaconDue).await;
}
