//! Console receive task
//!
//! Reads the console one byte at a time and forwards bytes to the
//! controller while intake is enabled. Anything typed during a
//! transmission or a flash dump is dropped here.

use defmt::*;
use embassy_rp::uart::{Async, UartRx};
use portable_atomic::Ordering;

use crate::channels::{INTAKE, RX_BYTES};

#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: UartRx<'static, Async>) {
    info!("Serial RX task started");

    let mut byte = [0u8; 1];
    loop {
        match rx.read(&mut byte).await {
            Ok(()) => {
                if !INTAKE.load(Ordering::Acquire) {
                    trace!("RX: dropped {=u8:#x}, intake disabled", byte[0]);
                    continue;
                }
                if RX_BYTES.try_send(byte[0]).is_err() {
                    warn!("RX: channel full, dropping {=u8:#x}", byte[0]);
                }
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
