//! Main controller task
//!
//! Owns the beacon. Waits for a timer event or a console byte, records
//! it, then lets the beacon handle everything pending before waiting
//! again.

use defmt::*;
use embassy_futures::select::{select, Either};

use fox_core::{Beacon, Event};

use crate::channels::{EVENTS, RX_BYTES};
use crate::platform::FirmwareBoard;

#[embassy_executor::task]
pub async fn controller_task(mut beacon: Beacon<FirmwareBoard>) {
    info!("Controller task started");

    if let Err(e) = beacon.start() {
        warn!("Banner not sent: {}", e);
    }

    loop {
        while beacon.poll() {}

        match select(EVENTS.receive(), RX_BYTES.receive()).await {
            Either::First(event) => beacon.raise(event),
            Either::Second(byte) => beacon.raise(Event::Byte(byte)),
        }
    }
}
