use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier of a training sample.
///
/// - `u32` keeps the neighbor index small
/// - `NonZero` enables `Option<SampleId>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SampleId(NonZeroU32);

impl SampleId {
    /// Create a SampleId from a 0-based sample row by storing index+1.
    pub fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index).unwrap_or(u32::MAX - 1);
        // raw+1 is nonzero because raw < u32::MAX
        Self(NonZeroU32::MIN.saturating_add(raw))
    }

    /// Recover the 0-based sample row.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SampleId({})", self.index())
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_id_round_trip_index() {
        for i in [0_usize, 1, 2, 42, 10_000] {
            let id = SampleId::from_index(i);
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn option_sample_id_is_small() {
        assert_eq!(
            core::mem::size_of::<SampleId>(),
            core::mem::size_of::<Option<SampleId>>()
        );
    }

    #[test]
    fn display_is_zero_based() {
        assert_eq!(SampleId::from_index(3).to_string(), "3");
    }
}
