use crate::{CidrError, Result};
use netaddr_core::{IpNumber, Version};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A subnet mask: `ones` leading fixed bits over a `bits`-wide address
///
/// Masks order by the numeric value of their bit pattern (a /24 over 32
/// bits is `0xFFFFFF00`), with the width as a final tie-break so distinct
/// masks never compare equal.
///
/// # Examples
///
/// ```
/// use netaddr_cidr::IpMask;
/// use netaddr_core::IpNumber;
///
/// let mask = IpMask::new(24, 32).unwrap();
/// assert_eq!(mask.length(), IpNumber::from(256u32));
/// assert_eq!(mask.as_number(), IpNumber::from(0xFFFFFF00u32));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IpMask {
    ones: u32,
    bits: u32,
}

impl IpMask {
    /// Build a mask with `ones` leading bits over a `bits`-wide address
    ///
    /// Fails with [`CidrError::InvalidPrefixLength`] when `ones > bits`.
    pub fn new(ones: u32, bits: u32) -> Result<Self> {
        if ones > bits {
            return Err(CidrError::InvalidPrefixLength { prefix: ones, bits });
        }
        Ok(IpMask { ones, bits })
    }

    /// The full-width host mask of a family (/32 or /128)
    pub fn host(version: Version) -> Self {
        IpMask {
            ones: version.bit_length(),
            bits: version.bit_length(),
        }
    }

    // Callers guarantee ones <= bits.
    pub(crate) fn new_unchecked(ones: u32, bits: u32) -> Self {
        debug_assert!(ones <= bits);
        IpMask { ones, bits }
    }

    /// Number of leading fixed bits
    pub const fn prefix_len(&self) -> u32 {
        self.ones
    }

    /// Total address width in bits
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of addresses the mask spans, `2^(bits - ones)`
    pub fn length(&self) -> IpNumber {
        IpNumber::from(2u32).exp(self.bits - self.ones)
    }

    /// Numeric value of the mask bits
    pub fn as_number(&self) -> IpNumber {
        ((IpNumber::one() << self.ones) - IpNumber::one()) << (self.bits - self.ones)
    }
}

impl Ord for IpMask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_number()
            .cmp(&other.as_number())
            .then_with(|| self.bits.cmp(&other.bits))
    }
}

impl PartialOrd for IpMask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let mask = IpMask::new(8, 32).unwrap();
        assert_eq!(mask.prefix_len(), 8);
        assert_eq!(mask.bits(), 32);
    }

    #[test]
    fn test_new_invalid() {
        assert_eq!(
            IpMask::new(33, 32),
            Err(CidrError::InvalidPrefixLength { prefix: 33, bits: 32 })
        );
        assert!(IpMask::new(129, 128).is_err());
    }

    #[test]
    fn test_host() {
        assert_eq!(IpMask::host(Version::V4), IpMask::new(32, 32).unwrap());
        assert_eq!(IpMask::host(Version::V6), IpMask::new(128, 128).unwrap());
    }

    #[test]
    fn test_length() {
        assert_eq!(IpMask::new(24, 32).unwrap().length(), IpNumber::from(256u32));
        assert_eq!(IpMask::new(32, 32).unwrap().length(), IpNumber::one());
        assert_eq!(
            IpMask::new(0, 32).unwrap().length(),
            IpNumber::from(1u128 << 32)
        );
    }

    #[test]
    fn test_as_number() {
        assert_eq!(
            IpMask::new(24, 32).unwrap().as_number(),
            IpNumber::from(0xFFFFFF00u32)
        );
        assert_eq!(IpMask::new(0, 32).unwrap().as_number(), IpNumber::zero());
        assert_eq!(
            IpMask::new(32, 32).unwrap().as_number(),
            IpNumber::from(u32::MAX)
        );
    }

    #[test]
    fn test_ordering_by_numeric_value() {
        let wide = IpMask::new(16, 32).unwrap();
        let narrow = IpMask::new(24, 32).unwrap();
        // More fixed bits means a larger numeric pattern.
        assert!(wide < narrow);

        // Same numeric value, different width: the width breaks the tie.
        let v4_zero = IpMask::new(0, 32).unwrap();
        let v6_zero = IpMask::new(0, 128).unwrap();
        assert!(v4_zero < v6_zero);
    }
}
