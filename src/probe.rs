//! Zero-region self-check
//!
//! Run at start-up by the `zero_probe` program: confirms from inside the
//! process that [`RESERVED_REGION`] reads as zero and that the loader
//! placed it in zero-fill memory.

use core::ops::Range;

use crate::process;
use crate::region::{ReservedRegion, RESERVED_REGION};

#[allow(non_upper_case_globals)]
unsafe extern "C" {
    // Provided by the linker around the output `.bss`
    safe static __bss_start: u8;
    safe static _end: u8;
}

/// Address range the linker reserves for zero-fill data
#[must_use]
pub fn zero_fill_range() -> Range<u64> {
    let start = (&raw const __bss_start) as u64;
    let end = (&raw const _end) as u64;
    start..end
}

/// Outcome of [`probe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    /// Bytes of the region that did not read as zero
    pub nonzero_bytes: usize,
    /// Whether the region lies inside [`zero_fill_range`]
    pub in_zero_fill: bool,
}

impl ProbeReport {
    /// Status bit: some byte was not zero
    pub const NONZERO: i32 = 1 << 0;
    /// Status bit: the region is outside zero-fill memory
    pub const OUTSIDE_ZERO_FILL: i32 = 1 << 1;

    /// Whether both checks passed
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.nonzero_bytes == 0 && self.in_zero_fill
    }

    /// Exit status encoding of the report, `0` when clean
    #[must_use]
    pub const fn status(&self) -> i32 {
        let mut status = 0;
        if self.nonzero_bytes != 0 {
            status |= Self::NONZERO;
        }
        if !self.in_zero_fill {
            status |= Self::OUTSIDE_ZERO_FILL;
        }
        status
    }
}

/// Check `region` against zero content and zero-fill placement
#[must_use]
pub fn probe<const WORDS: usize>(region: &ReservedRegion<WORDS>) -> ProbeReport {
    ProbeReport {
        nonzero_bytes: region.nonzero_bytes(),
        in_zero_fill: region.lies_within(zero_fill_range()),
    }
}

/// Probe [`RESERVED_REGION`] and exit with the report's status
pub fn exit_with_probe() -> ! {
    let report = probe(&RESERVED_REGION);

    crate::trace!(
        "[zerostart] probe: {} nonzero bytes, in zero fill: {}\n",
        report.nonzero_bytes,
        report.in_zero_fill
    );

    process::exit(report.status())
}
