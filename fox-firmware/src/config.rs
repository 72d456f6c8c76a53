//! Build-time configuration
//!
//! `build.rs` validates `beacon.toml` and generates `BEACON_CONFIG`.

use embassy_time::Duration;
use fox_core::BeaconConfig;

include!(concat!(env!("OUT_DIR"), "/beacon_config.rs"));

/// Length of one Morse unit
pub fn unit(config: &BeaconConfig) -> Duration {
    Duration::from_millis(config.unit_ms as u64)
}

/// Quiet period before the next beacon
pub fn idle_timeout(config: &BeaconConfig) -> Duration {
    Duration::from_millis(config.idle_timeout_ms as u64)
}
