//! Non-volatile region abstraction
//!
//! The beacon keeps its message in a small window of NOR flash that it
//! manages byte by byte. The trait exposes exactly what the log store
//! needs: raw reads, programming with NOR semantics (bits can only be
//! cleared), a whole-region erase, and the busy/lock controls that wrap a
//! programming sequence.

use embedded_storage::nor_flash::{NorFlash, NorFlashError, NorFlashErrorKind};

/// Value of every byte after an erase
pub const ERASED: u8 = 0xFF;

/// Errors from flash operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Offset or length outside the region
    OutOfBounds,
    /// Region geometry does not match the erase granularity
    NotAligned,
    /// Programming attempted while write protection is engaged
    Locked,
    /// Programming failed
    Program,
    /// Erase failed
    Erase,
    /// Read failed
    Read,
}

/// Raw non-volatile byte region
///
/// Offsets are relative to the start of the region.
pub trait NvRegion {
    /// Size of the region in bytes
    fn capacity(&self) -> usize;

    /// Copy `buf.len()` bytes starting at `offset`
    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), FlashError>;

    /// Whether a program or erase operation is still in progress
    fn is_busy(&mut self) -> bool;

    /// Release write protection
    fn unlock(&mut self);

    /// Engage write protection
    fn lock(&mut self);

    /// Program `data` at `offset`
    ///
    /// Only clears bits: the stored byte becomes `old & new`. The region
    /// must be unlocked.
    fn program(&mut self, offset: usize, data: &[u8]) -> Result<(), FlashError>;

    /// Erase the whole region back to [`ERASED`]
    fn erase_sector(&mut self) -> Result<(), FlashError>;
}

impl From<NorFlashErrorKind> for FlashError {
    fn from(kind: NorFlashErrorKind) -> Self {
        match kind {
            NorFlashErrorKind::NotAligned => FlashError::NotAligned,
            NorFlashErrorKind::OutOfBounds => FlashError::OutOfBounds,
            _ => FlashError::Program,
        }
    }
}

/// A window of an `embedded-storage` NOR flash used as an [`NvRegion`]
///
/// The underlying driver is synchronous, so the region is never busy once
/// a call returns. Write protection is tracked in software.
pub struct NorRegion<F> {
    flash: F,
    base: u32,
    len: u32,
    unlocked: bool,
}

impl<F: NorFlash> NorRegion<F> {
    /// Wrap `[base, base + len)` of `flash`
    ///
    /// Both bounds must sit on erase boundaries so the region can be erased
    /// without touching its neighbours.
    pub fn new(flash: F, base: u32, len: u32) -> Result<Self, FlashError> {
        let erase = F::ERASE_SIZE as u32;
        if len == 0 || base % erase != 0 || len % erase != 0 {
            return Err(FlashError::NotAligned);
        }
        let end = base.checked_add(len).ok_or(FlashError::OutOfBounds)?;
        if end as usize > flash.capacity() {
            return Err(FlashError::OutOfBounds);
        }
        Ok(Self {
            flash,
            base,
            len,
            unlocked: false,
        })
    }

    /// Give back the underlying driver
    pub fn release(self) -> F {
        self.flash
    }

    fn absolute(&self, offset: usize, len: usize) -> Result<u32, FlashError> {
        let end = offset.checked_add(len).ok_or(FlashError::OutOfBounds)?;
        if end > self.len as usize {
            return Err(FlashError::OutOfBounds);
        }
        Ok(self.base + offset as u32)
    }
}

impl<F: NorFlash> NvRegion for NorRegion<F> {
    fn capacity(&self) -> usize {
        self.len as usize
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), FlashError> {
        let address = self.absolute(offset, buf.len())?;
        self.flash
            .read(address, buf)
            .map_err(|e| match e.kind() {
                NorFlashErrorKind::OutOfBounds => FlashError::OutOfBounds,
                _ => FlashError::Read,
            })
    }

    fn is_busy(&mut self) -> bool {
        false
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
        let address = self.absolute(offset, data.len())?;
        self.flash
            .write(address, data)
            .map_err(|e| FlashError::from(e.kind()))
    }

    fn erase_sector(&mut self) -> Result<(), FlashError> {
        if !self.unlocked {
            return Err(FlashError::Locked);
        }
        self.flash
            .erase(self.base, self.base + self.len)
            .map_err(|e| match e.kind() {
                NorFlashErrorKind::NotAligned => FlashError::NotAligned,
                NorFlashErrorKind::OutOfBounds => FlashError::OutOfBounds,
                _ => FlashError::Erase,
            })
    }
}
