//! Beacon configuration
//!
//! Timing and console settings. The firmware reads them from `beacon.toml`
//! at build time; host code can construct them directly.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shortest supported Morse unit
pub const MIN_UNIT_MS: u32 = 20;

/// Longest supported Morse unit
pub const MAX_UNIT_MS: u32 = 2_000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unit duration outside [`MIN_UNIT_MS`]..=[`MAX_UNIT_MS`]
    UnitOutOfRange,
    /// Idle timeout not longer than one unit
    IdleTooShort,
    /// Unsupported console baud rate
    BadBaudrate,
}

/// Beacon timing and console settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct BeaconConfig {
    /// Duration of one Morse unit (a dot) in milliseconds
    pub unit_ms: u32,
    /// Quiet time after the last keystroke or transmission before the
    /// message is sent again
    pub idle_timeout_ms: u32,
    /// Console baud rate
    pub baudrate: u32,
}

impl BeaconConfig {
    pub const DEFAULT: Self = Self {
        unit_ms: 100,
        idle_timeout_ms: 5_000,
        baudrate: 9_600,
    };

    /// Check the values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_UNIT_MS..=MAX_UNIT_MS).contains(&self.unit_ms) {
            return Err(ConfigError::UnitOutOfRange);
        }
        if self.idle_timeout_ms <= self.unit_ms {
            return Err(ConfigError::IdleTooShort);
        }
        if !matches!(self.baudrate, 1_200 | 2_400 | 4_800 | 9_600 | 19_200 | 38_400 | 57_600 | 115_200) {
            return Err(ConfigError::BadBaudrate);
        }
        Ok(())
    }

    /// Words per minute for the PARIS standard word of 50 units
    pub fn wpm(&self) -> u32 {
        60_000 / (50 * self.unit_ms.max(1))
    }
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = BeaconConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.unit_ms, 100);
        assert_eq!(config.idle_timeout_ms, 5_000);
        assert_eq!(config.baudrate, 9_600);
    }

    #[test]
    fn test_wpm() {
        assert_eq!(BeaconConfig::DEFAULT.wpm(), 12);
        let fast = BeaconConfig {
            unit_ms: 60,
            ..BeaconConfig::DEFAULT
        };
        assert_eq!(fast.wpm(), 20);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = BeaconConfig::DEFAULT;
        config.unit_ms = 5;
        assert_eq!(config.validate(), Err(ConfigError::UnitOutOfRange));

        let mut config = BeaconConfig::DEFAULT;
        config.idle_timeout_ms = config.unit_ms;
        assert_eq!(config.validate(), Err(ConfigError::IdleTooShort));

        let mut config = BeaconConfig::DEFAULT;
        config.baudrate = 12_345;
        assert_eq!(config.validate(), Err(ConfigError::BadBaudrate));
    }
}
