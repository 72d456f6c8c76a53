//! Log-structured message store
//!
//! One erase sector of NOR flash is split into [`PAGE_COUNT`] pages of
//! [`PAGE_SIZE`] bytes. Messages are appended inside the active page; the
//! bytes in front of the current message are retired (programmed to
//! `0x00`) and the bytes behind it stay erased (`0xFF`). No length or
//! checksum is stored: on boot the store finds the current message as the
//! run between the first non-retired byte and the next erased byte.
//!
//! ```text
//! page p:  00 00 00 00 | S O S | FF FF FF ... FF
//!          retired       start   end
//! ```
//!
//! When a message no longer fits, the whole page is retired and the next
//! page is used. After the last page the sector is erased and writing
//! restarts at page 0.

use core::ops::{Deref, DerefMut};

use fox_hal::{wait_until, Backoff, FlashError, NvRegion, ERASED};

use crate::message::Message;

/// Bytes per page, also the longest message
pub const PAGE_SIZE: usize = 128;

/// Pages per erase sector
pub const PAGE_COUNT: usize = 32;

/// Bytes of flash the store manages
pub const REGION_SIZE: usize = PAGE_SIZE * PAGE_COUNT;

/// Value written over bytes that no longer belong to a message
pub const RETIRED: u8 = 0x00;

/// Store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Underlying flash operation failed
    Flash(FlashError),
    /// Message longer than a page
    TooLong,
    /// Message contains a retired or erased byte, which would not survive
    /// a rescan
    UnstorableByte,
    /// Output buffer cannot hold the stored message
    BufferTooSmall,
    /// Page index past the last page
    PageOutOfRange,
    /// Region smaller than one sector of pages
    RegionTooSmall,
}

impl From<FlashError> for StoreError {
    fn from(e: FlashError) -> Self {
        StoreError::Flash(e)
    }
}

/// Write access to a region for the lifetime of the guard
///
/// Unlocks on creation and locks again when dropped, so every exit path
/// leaves the flash write-protected.
struct Unlocked<'a, R: NvRegion> {
    region: &'a mut R,
}

impl<'a, R: NvRegion> Unlocked<'a, R> {
    fn new(region: &'a mut R) -> Self {
        region.unlock();
        Self { region }
    }
}

impl<R: NvRegion> Deref for Unlocked<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.region
    }
}

impl<R: NvRegion> DerefMut for Unlocked<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.region
    }
}

impl<R: NvRegion> Drop for Unlocked<'_, R> {
    fn drop(&mut self) {
        self.region.lock();
    }
}

/// Append-only message store over one flash sector
pub struct LogStore<R, B> {
    region: R,
    backoff: B,
    /// Active page index
    page: usize,
    /// Page-relative offset of the current message
    start: usize,
    /// Page-relative offset one past the current message
    end: usize,
}

impl<R: NvRegion, B: Backoff> LogStore<R, B> {
    /// Wrap a region
    ///
    /// The position is unknown until [`initialize`](Self::initialize) has
    /// scanned the flash.
    pub fn new(region: R, backoff: B) -> Result<Self, StoreError> {
        if region.capacity() < REGION_SIZE {
            return Err(StoreError::RegionTooSmall);
        }
        Ok(Self {
            region,
            backoff,
            page: 0,
            start: 0,
            end: 0,
        })
    }

    /// Recover the current message position from the flash contents
    pub fn initialize(&mut self) -> Result<(), StoreError> {
        let mut chunk = [0u8; PAGE_SIZE];

        let mut first_live = None;
        let mut first_erased = None;

        for page in 0..PAGE_COUNT {
            let base = page * PAGE_SIZE;
            self.region.read(base, &mut chunk)?;

            for (i, &byte) in chunk.iter().enumerate() {
                let offset = base + i;
                if first_live.is_none() && byte != RETIRED {
                    first_live = Some(offset);
                }
                if first_live.is_some() && byte == ERASED {
                    first_erased = Some(offset);
                    break;
                }
            }
            if first_erased.is_some() {
                break;
            }
        }

        match first_live {
            Some(start) => {
                let end = first_erased.unwrap_or(REGION_SIZE);
                self.page = start / PAGE_SIZE;
                self.start = start - self.page * PAGE_SIZE;
                let span = end - self.page * PAGE_SIZE;
                if span > PAGE_SIZE {
                    debug!("store: message runs past page {}, clamped", self.page);
                }
                self.end = span.min(PAGE_SIZE);
            }
            None => {
                // Every byte retired: the next save has to erase
                self.page = PAGE_COUNT - 1;
                self.start = PAGE_SIZE;
                self.end = PAGE_SIZE;
            }
        }

        info!(
            "store: page {} message {}..{} ({} bytes)",
            self.page,
            self.start,
            self.end,
            self.len()
        );
        Ok(())
    }

    /// Copy the current message into `out`, returning its length
    pub fn read(&mut self, out: &mut [u8]) -> Result<usize, StoreError> {
        let len = self.len();
        let dst = out.get_mut(..len).ok_or(StoreError::BufferTooSmall)?;
        let offset = self.page * PAGE_SIZE + self.start;
        let region = &mut self.region;

        critical_section::with(|_| region.read(offset, dst))?;
        Ok(len)
    }

    /// Read the current message into a [`Message`]
    pub fn load(&mut self) -> Result<Message, StoreError> {
        let mut buf = [0u8; PAGE_SIZE];
        let len = self.read(&mut buf)?;
        Ok(Message::from_slice(&buf[..len]))
    }

    /// Append `data` as the new current message
    ///
    /// On a flash failure the position is re-derived from the flash so the
    /// store keeps agreeing with what survived.
    pub fn save(&mut self, data: &[u8]) -> Result<(), StoreError> {
        if data.len() > PAGE_SIZE {
            return Err(StoreError::TooLong);
        }
        if data.iter().any(|&b| b == RETIRED || b == ERASED) {
            return Err(StoreError::UnstorableByte);
        }

        let result = self.append(data);
        if let Err(e) = result {
            warn!("store: save failed: {}", e);
            if let Err(e) = self.initialize() {
                error!("store: rescan failed: {}", e);
            }
        }
        result
    }

    fn append(&mut self, data: &[u8]) -> Result<(), StoreError> {
        let len = data.len();

        if len > PAGE_SIZE - self.end {
            // Retire the full page before moving on
            self.program_page(self.page, &[RETIRED; PAGE_SIZE])?;

            self.page += 1;
            if self.page >= PAGE_COUNT {
                info!("store: sector exhausted, erasing");
                self.erase()?;
                self.page = 0;
            } else {
                debug!("store: rolled over to page {}", self.page);
            }
            self.start = 0;
        } else {
            self.start = self.end;
        }
        self.end = self.start + len;

        let mut image = [ERASED; PAGE_SIZE];
        image[..self.start].fill(RETIRED);
        image[self.start..self.end].copy_from_slice(data);

        self.program_page(self.page, &image)?;
        debug!(
            "store: saved {} bytes at page {} offset {}",
            len, self.page, self.start
        );
        Ok(())
    }

    fn program_page(&mut self, page: usize, image: &[u8; PAGE_SIZE]) -> Result<(), StoreError> {
        let Self {
            region, backoff, ..
        } = self;

        wait_until(&mut *backoff, || !region.is_busy());

        critical_section::with(|_| {
            let mut flash = Unlocked::new(region);
            flash.program(page * PAGE_SIZE, image)?;
            wait_until(&mut *backoff, || !flash.is_busy());
            Ok(())
        })
    }

    fn erase(&mut self) -> Result<(), StoreError> {
        let Self {
            region, backoff, ..
        } = self;

        wait_until(&mut *backoff, || !region.is_busy());

        critical_section::with(|_| {
            let mut flash = Unlocked::new(region);
            flash.erase_sector()?;
            wait_until(&mut *backoff, || !flash.is_busy());
            Ok(())
        })
    }

    /// Raw copy of one page
    pub fn dump_page(&mut self, page: usize, out: &mut [u8; PAGE_SIZE]) -> Result<(), StoreError> {
        if page >= PAGE_COUNT {
            return Err(StoreError::PageOutOfRange);
        }
        let region = &mut self.region;
        critical_section::with(|_| region.read(page * PAGE_SIZE, out))?;
        Ok(())
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Length of the current message
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn region(&self) -> &R {
        &self.region
    }

    pub fn region_mut(&mut self) -> &mut R {
        &mut self.region
    }

    /// Give back the region and backoff
    pub fn release(self) -> (R, B) {
        (self.region, self.backoff)
    }
}
