//! Shared types for the residue comparison kernels

/// Maximum number of vector steps between two reductions of the 8-bit lane
/// counters. Each step adds at most 1 to a lane, so a lane holds at most
/// `u8::MAX` when it is reduced and never wraps.
pub const LANE_FLUSH_INTERVAL: usize = u8::MAX as usize;

/// Raw counts from comparing two aligned sequences.
///
/// `length` counts kept positions where at least one residue is neither a gap
/// nor the indeterminate symbol; `matches` counts the subset where both
/// residues are valid and equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairCounts {
    pub matches: u32,
    pub length: u32,
}

impl PairCounts {
    /// `1 - matches/length`, or `None` when no position was comparable.
    #[inline]
    pub fn distance(&self) -> Option<f32> {
        if self.length == 0 {
            None
        } else {
            Some(1.0f32 - (self.matches as f32 / self.length as f32))
        }
    }

    /// `matches/length`, or `None` when no position was comparable.
    #[inline]
    pub fn identity(&self) -> Option<f32> {
        if self.length == 0 {
            None
        } else {
            Some(self.matches as f32 / self.length as f32)
        }
    }
}

impl std::ops::AddAssign for PairCounts {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.matches += rhs.matches;
        self.length += rhs.length;
    }
}

/// Byte stored in a skip mask for a residue column that must be ignored.
pub const SKIP: u8 = 0xFF;
/// Byte stored in a skip mask for a residue column that is compared.
pub const KEEP: u8 = 0x00;
