//! Reserved zero region
//!
//! A fixed number of `u64` words that read as zero at process start and
//! cost nothing in the executable image.
//!
//! Two properties are configured rather than assumed:
//!
//! - **zero**: [`ReservedRegion::new`] is an all-zero constant initializer,
//!   so the bytes are zero by definition, never "uninitialized";
//! - **no file bytes**: the process-wide [`RESERVED_REGION`] is placed in
//!   `.bss.reserved_region`. The `.bss.` prefix makes the compiler emit a
//!   `SHT_NOBITS` section and the linker merge it into the output `.bss`,
//!   which the loader zero-fills.
//!
//! The crate only ever reads the region, with volatile loads so the reads
//! observe memory instead of the initializer.

use core::cell::UnsafeCell;
use core::fmt;
use core::ptr;

use x86_64::VirtAddr;

use crate::constants::{RESERVED_WORDS, WORD_SIZE};

/// The process-wide reserved zero region
///
/// Exported unmangled so debuggers and the image inspector can find it.
#[unsafe(no_mangle)]
#[unsafe(link_section = ".bss.reserved_region")]
pub static RESERVED_REGION: ReservedRegion<RESERVED_WORDS> = ReservedRegion::new();

/// `WORDS` zero-initialized machine words of static storage
#[repr(transparent)]
pub struct ReservedRegion<const WORDS: usize> {
    words: UnsafeCell<[u64; WORDS]>,
}

// SAFETY: the crate exposes no write access; callers that write through
// `as_ptr` take on the synchronization themselves.
unsafe impl<const WORDS: usize> Sync for ReservedRegion<WORDS> {}

impl<const WORDS: usize> ReservedRegion<WORDS> {
    /// Size of one word in bytes
    pub const WORD_SIZE: usize = WORD_SIZE;

    /// Size of the region in bytes
    pub const LEN: usize = WORDS * WORD_SIZE;

    /// An all-zero region
    ///
    /// Being a size-only, all-zero initializer, a `static` built from this
    /// lands in zero-fill storage rather than initialized data.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: UnsafeCell::new([0; WORDS]),
        }
    }

    /// Runtime address of the first byte
    #[must_use]
    pub fn addr(&self) -> VirtAddr {
        VirtAddr::new_truncate(self.as_ptr() as u64)
    }

    /// Raw pointer to the first word
    #[must_use]
    pub const fn as_ptr(&self) -> *mut u64 {
        self.words.get().cast()
    }

    /// Number of words
    #[must_use]
    pub const fn words(&self) -> usize {
        WORDS
    }

    /// Size in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        Self::LEN
    }

    /// Whether the region has no bytes at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        Self::LEN == 0
    }

    /// Read byte `offset`, `None` past the end
    #[must_use]
    pub fn read_byte(&self, offset: usize) -> Option<u8> {
        if offset >= Self::LEN {
            return None;
        }
        // SAFETY: `offset` is in bounds of the static array.
        Some(unsafe { ptr::read_volatile(self.as_ptr().cast::<u8>().add(offset)) })
    }

    /// Read word `index`, `None` past the end
    #[must_use]
    pub fn read_word(&self, index: usize) -> Option<u64> {
        if index >= WORDS {
            return None;
        }
        // SAFETY: `index` is in bounds and the array is u64-aligned.
        Some(unsafe { ptr::read_volatile(self.as_ptr().add(index)) })
    }

    /// Number of bytes that are not zero
    #[must_use]
    pub fn nonzero_bytes(&self) -> usize {
        (0..Self::LEN)
            .filter(|&offset| self.read_byte(offset) != Some(0))
            .count()
    }

    /// Whether every byte reads as zero
    #[must_use]
    pub fn is_zeroed(&self) -> bool {
        self.nonzero_bytes() == 0
    }

    /// Whether `[addr, addr + len)` lies inside `range`
    #[must_use]
    pub fn lies_within(&self, range: core::ops::Range<u64>) -> bool {
        let start = self.addr().as_u64();
        let end = start + Self::LEN as u64;
        range.start <= start && end <= range.end
    }
}

impl<const WORDS: usize> Default for ReservedRegion<WORDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const WORDS: usize> fmt::Debug for ReservedRegion<WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservedRegion")
            .field("addr", &self.addr())
            .field("words", &WORDS)
            .field("len", &Self::LEN)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_region_is_128_zero_bytes() {
        assert_eq!(RESERVED_REGION.words(), 16);
        assert_eq!(RESERVED_REGION.len(), 128);
        assert!(!RESERVED_REGION.is_empty());
        for offset in 0..128 {
            assert_eq!(RESERVED_REGION.read_byte(offset), Some(0), "byte {offset}");
        }
        assert!(RESERVED_REGION.is_zeroed());
    }

    #[test]
    fn reads_past_the_end_are_rejected() {
        assert_eq!(RESERVED_REGION.read_byte(128), None);
        assert_eq!(RESERVED_REGION.read_word(16), None);
        assert_eq!(RESERVED_REGION.read_word(15), Some(0));
    }

    #[test]
    fn address_matches_pointer_and_is_word_aligned() {
        let addr = RESERVED_REGION.addr();
        assert_eq!(addr.as_u64(), RESERVED_REGION.as_ptr() as u64);
        assert_eq!(addr.as_u64() % ReservedRegion::<16>::WORD_SIZE as u64, 0);
    }

    #[test]
    fn local_region_counts_written_bytes() {
        let region = ReservedRegion::<2>::new();
        assert!(region.is_zeroed());

        // SAFETY: `region` is local and unshared.
        unsafe {
            region.as_ptr().add(1).write(0x00ff_0000_0000_0001);
        }
        assert_eq!(region.nonzero_bytes(), 2);
        assert_eq!(region.read_byte(8), Some(1));
        assert_eq!(region.read_byte(14), Some(0xff));
        assert_eq!(region.read_word(1), Some(0x00ff_0000_0000_0001));
    }

    #[test]
    fn lies_within_checks_both_ends() {
        let start = RESERVED_REGION.addr().as_u64();
        assert!(RESERVED_REGION.lies_within(start..start + 128));
        assert!(!RESERVED_REGION.lies_within(start + 1..start + 256));
        assert!(!RESERVED_REGION.lies_within(start..start + 127));
    }

    #[test]
    fn debug_names_the_layout() {
        let text = format!("{:?}", ReservedRegion::<4>::new());
        assert!(text.contains("words: 4"), "{text}");
        assert!(text.contains("len: 32"), "{text}");
    }
}
