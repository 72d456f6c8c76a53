//! Fox - Morse code beacon firmware
//!
//! Sends a stored message in Morse code on a keying line, over and over,
//! with a serial console for editing the message. The message lives in
//! the last flash sector and survives power cycles.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{InterruptHandler as UartInterruptHandler, Uart};
use {defmt_rtt as _, panic_probe as _};

use fox_core::{Beacon, Parts};
use fox_hal::uart::UartConfig;
use fox_hal::Spin;
use fox_hal_rp2040::{embassy_config, user_region, ConsoleTx, CortexReset, KeyLine};

use crate::channels::{IDLE_CTRL, TICK_CTRL};
use crate::platform::{ConsolePort, FirmwareBoard, SignalTimer};

mod channels;
mod config;
mod platform;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => UartInterruptHandler<UART0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Fox beacon firmware starting...");

    let config = config::BEACON_CONFIG;
    info!(
        "Config: {} ms unit ({} WPM), {} ms idle, {} baud",
        config.unit_ms,
        config.wpm(),
        config.idle_timeout_ms,
        config.baudrate
    );

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());

    // Console on UART0 (GPIO0 TX, GPIO1 RX)
    let uart_config = embassy_config(&UartConfig::with_baudrate(config.baudrate));
    let uart = Uart::new(p.UART0, p.PIN_0, p.PIN_1, Irqs, p.DMA_CH0, p.DMA_CH1, uart_config);
    let (tx, rx) = uart.split();

    // Transmitter key on GPIO2
    let key = KeyLine::new(Output::new(p.PIN_2, Level::Low));

    let region = unwrap!(user_region(p.FLASH));

    let beacon = unwrap!(Beacon::<FirmwareBoard>::new(Parts {
        key,
        serial: ConsolePort::new(ConsoleTx::new(tx)),
        tick_timer: SignalTimer::new(&TICK_CTRL),
        idle_timer: SignalTimer::new(&IDLE_CTRL),
        region,
        reset: CortexReset,
        flash_backoff: Spin,
        console_backoff: Spin,
    }));
    info!("Message store ready, {} bytes stored", beacon.store().len());

    spawner.spawn(tasks::tick_task(config::unit(&config))).unwrap();
    spawner.spawn(tasks::idle_task(config::idle_timeout(&config))).unwrap();
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner.spawn(tasks::controller_task(beacon)).unwrap();

    info!("All tasks spawned, beacon running");
}
