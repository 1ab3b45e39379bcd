//! Strip bank state
//!
//! Owns the logical on/off mask of the eight LED strips and the mask of
//! strips that take part in motion-driven on/off. Every change to the
//! on/off mask is pushed to the [`StripOutput`] before the call returns.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::traits::{BusError, StripOutput};

/// Set of strips, one bit per strip
///
/// Strip `n` (1-based) is bit `n - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StripMask(u8);

impl StripMask {
    /// Number of strips in the bank
    pub const COUNT: u8 = 8;

    /// No strips
    pub const NONE: Self = Self(0x00);

    /// Every strip
    pub const ALL: Self = Self(0xFF);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Mask for a single strip numbered `1..=8`
    pub const fn strip(number: u8) -> Option<Self> {
        if number >= 1 && number <= Self::COUNT {
            Some(Self(1 << (number - 1)))
        } else {
            None
        }
    }

    /// Check if strip `number` is in the set
    ///
    /// Out-of-range strip numbers are never in the set.
    pub const fn is_on(self, number: u8) -> bool {
        match Self::strip(number) {
            Some(single) => self.0 & single.0 != 0,
            None => false,
        }
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of strips in the set
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl From<u8> for StripMask {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<StripMask> for u8 {
    fn from(mask: StripMask) -> Self {
        mask.0
    }
}

impl BitOr for StripMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for StripMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitXor for StripMask {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for StripMask {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl BitOrAssign for StripMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAndAssign for StripMask {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitXorAssign for StripMask {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

/// Logical state of the strip bank
///
/// The on/off mask is updated before the output is written, so a bus
/// fault never rolls it back; the next successful write brings the
/// register back in line.
pub struct StripBank<O> {
    output: O,
    /// Strips currently on
    state: StripMask,
    /// Strips that take part in motion on/off
    motion_enabled: StripMask,
}

impl<O: StripOutput> StripBank<O> {
    /// Create a bank with every strip off and every strip motion-eligible
    ///
    /// Nothing is written until the first operation or [`StripBank::flush`].
    pub fn new(output: O) -> Self {
        Self {
            output,
            state: StripMask::NONE,
            motion_enabled: StripMask::ALL,
        }
    }

    /// Strips currently on
    pub fn state(&self) -> StripMask {
        self.state
    }

    /// Strips that take part in motion on/off
    pub fn motion_enabled(&self) -> StripMask {
        self.motion_enabled
    }

    /// Get access to the underlying output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Turn on the strips in `mask`, leaving the others unchanged
    pub fn on(&mut self, mask: StripMask) -> Result<(), BusError> {
        self.state |= mask;
        self.flush()
    }

    /// Turn off the strips in `mask`, leaving the others unchanged
    pub fn off(&mut self, mask: StripMask) -> Result<(), BusError> {
        self.state &= !mask;
        self.flush()
    }

    /// Turn on exactly the strips in `mask`
    pub fn set(&mut self, mask: StripMask) -> Result<(), BusError> {
        self.state = mask;
        self.flush()
    }

    /// Invert the strips in `mask`
    pub fn toggle(&mut self, mask: StripMask) -> Result<(), BusError> {
        self.state ^= mask;
        self.flush()
    }

    /// Let the strips in `mask` follow motion
    ///
    /// Does not change what is currently lit.
    pub fn enable_motion(&mut self, mask: StripMask) {
        self.motion_enabled |= mask;
    }

    /// Stop the strips in `mask` from following motion
    ///
    /// Does not change what is currently lit.
    pub fn disable_motion(&mut self, mask: StripMask) {
        self.motion_enabled &= !mask;
    }

    /// Write the current state to the output
    pub fn flush(&mut self) -> Result<(), BusError> {
        self.output.write(self.state.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock output recording what was written
    struct MockOutput {
        last: Option<u8>,
        writes: u32,
        fail: bool,
    }

    impl MockOutput {
        fn new() -> Self {
            Self {
                last: None,
                writes: 0,
                fail: false,
            }
        }
    }

    impl StripOutput for MockOutput {
        fn write(&mut self, state: u8) -> Result<(), BusError> {
            self.writes += 1;
            if self.fail {
                return Err(BusError::Timeout);
            }
            self.last = Some(state);
            Ok(())
        }
    }

    #[test]
    fn test_strip_numbering() {
        assert_eq!(StripMask::strip(1), Some(StripMask::from_bits(0x01)));
        assert_eq!(StripMask::strip(8), Some(StripMask::from_bits(0x80)));
        assert_eq!(StripMask::strip(0), None);
        assert_eq!(StripMask::strip(9), None);

        let mask = StripMask::from_bits(0b0000_0101);
        assert!(mask.is_on(1));
        assert!(!mask.is_on(2));
        assert!(mask.is_on(3));
        assert!(!mask.is_on(9));
        assert_eq!(mask.count(), 2);
        assert!(StripMask::ALL.contains(mask));
        assert!(!mask.contains(StripMask::ALL));
        assert!(StripMask::NONE.is_empty());
    }

    #[test]
    fn test_new_bank_defaults() {
        let bank = StripBank::new(MockOutput::new());
        assert_eq!(bank.state(), StripMask::NONE);
        assert_eq!(bank.motion_enabled(), StripMask::ALL);
        assert_eq!(bank.output().writes, 0);
    }

    #[test]
    fn test_on_off_set_toggle() {
        let mut bank = StripBank::new(MockOutput::new());

        bank.on(StripMask::from_bits(0x03)).unwrap();
        bank.on(StripMask::from_bits(0x0C)).unwrap();
        assert_eq!(bank.state().bits(), 0x0F);
        assert_eq!(bank.output().last, Some(0x0F));

        bank.off(StripMask::from_bits(0x05)).unwrap();
        assert_eq!(bank.state().bits(), 0x0A);

        bank.set(StripMask::from_bits(0xF0)).unwrap();
        assert_eq!(bank.state().bits(), 0xF0);

        bank.toggle(StripMask::from_bits(0xFF)).unwrap();
        assert_eq!(bank.state().bits(), 0x0F);
        assert_eq!(bank.output().last, Some(0x0F));

        // One write per operation, none coalesced
        assert_eq!(bank.output().writes, 5);
    }

    #[test]
    fn test_unchanged_state_still_writes() {
        let mut bank = StripBank::new(MockOutput::new());
        bank.off(StripMask::ALL).unwrap();
        bank.off(StripMask::ALL).unwrap();
        assert_eq!(bank.output().writes, 2);
        assert_eq!(bank.output().last, Some(0x00));
    }

    #[test]
    fn test_motion_eligibility_does_not_write() {
        let mut bank = StripBank::new(MockOutput::new());
        bank.set(StripMask::from_bits(0x81)).unwrap();

        bank.disable_motion(StripMask::from_bits(0x01));
        assert_eq!(bank.motion_enabled().bits(), 0xFE);
        bank.enable_motion(StripMask::from_bits(0x01));
        assert_eq!(bank.motion_enabled(), StripMask::ALL);

        assert_eq!(bank.state().bits(), 0x81);
        assert_eq!(bank.output().writes, 1);
    }

    #[test]
    fn test_bus_fault_keeps_logical_state() {
        let mut output = MockOutput::new();
        output.fail = true;
        let mut bank = StripBank::new(output);

        assert_eq!(bank.on(StripMask::from_bits(0x10)), Err(BusError::Timeout));
        assert_eq!(bank.state().bits(), 0x10);
    }
}
