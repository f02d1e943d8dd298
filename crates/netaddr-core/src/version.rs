use crate::IpNumber;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol family of an address (IPv4 or IPv6)
///
/// A plain value tag: exactly two families exist, they compare by value,
/// and mixed-family operations fail instead of coercing.
///
/// # Examples
///
/// ```
/// use netaddr_core::Version;
///
/// assert_eq!(Version::V4.bit_length(), 32);
/// assert_eq!(Version::V6.byte_length(), 16);
/// assert!(Version::V4 < Version::V6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Version {
    /// The 32-bit dotted-quad family
    V4,
    /// The 128-bit colon-hex family
    V6,
}

impl Version {
    /// Family number (4 or 6)
    pub const fn number(&self) -> u8 {
        match self {
            Version::V4 => 4,
            Version::V6 => 6,
        }
    }

    /// Address width in bytes (4 or 16)
    pub const fn byte_length(&self) -> usize {
        match self {
            Version::V4 => 4,
            Version::V6 => 16,
        }
    }

    /// Address width in bits (32 or 128)
    pub const fn bit_length(&self) -> u32 {
        match self {
            Version::V4 => 32,
            Version::V6 => 128,
        }
    }

    /// Largest representable address value, `2^bit_length - 1`
    pub fn max_number(&self) -> IpNumber {
        (IpNumber::one() << self.bit_length()) - IpNumber::one()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::V4 => write!(f, "IPv4"),
            Version::V6 => write!(f, "IPv6"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(Version::V4.number(), 4);
        assert_eq!(Version::V4.byte_length(), 4);
        assert_eq!(Version::V4.bit_length(), 32);
        assert_eq!(Version::V6.number(), 6);
        assert_eq!(Version::V6.byte_length(), 16);
        assert_eq!(Version::V6.bit_length(), 128);
    }

    #[test]
    fn test_max_number() {
        assert_eq!(Version::V4.max_number(), IpNumber::from(u32::MAX));
        assert_eq!(Version::V6.max_number(), IpNumber::from(u128::MAX));
    }

    #[test]
    fn test_ordering() {
        // Byte-length order: the v4 family sorts before v6.
        assert!(Version::V4 < Version::V6);
        assert_eq!(Version::V4, Version::V4);
    }

    #[test]
    fn test_display() {
        assert_eq!(Version::V4.to_string(), "IPv4");
        assert_eq!(Version::V6.to_string(), "IPv6");
    }
}
