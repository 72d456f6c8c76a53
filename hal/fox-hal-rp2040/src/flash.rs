//! User-data flash sector for RP2040
//!
//! The message log lives in the last erase sector of the 2 MB flash. The
//! linker script keeps program code out of it.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use fox_hal::{FlashError, NorRegion};

/// Flash size on the Pico and most RP2040 boards
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// One erase sector: 32 pages of 128 bytes
pub const USER_DATA_SIZE: usize = ERASE_SIZE;

pub const USER_DATA_START: usize = FLASH_SIZE - USER_DATA_SIZE;

/// Blocking flash driver for the whole chip
pub type BeaconFlash<'d> = Flash<'d, FLASH, Blocking, FLASH_SIZE>;

/// The user-data sector as an `NvRegion`
pub type UserRegion<'d> = NorRegion<BeaconFlash<'d>>;

/// Claim the flash and wrap the user-data sector
pub fn user_region<'d>(flash: Peri<'d, FLASH>) -> Result<UserRegion<'d>, FlashError> {
    let flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(flash);
    NorRegion::new(flash, USER_DATA_START as u32, USER_DATA_SIZE as u32)
}
