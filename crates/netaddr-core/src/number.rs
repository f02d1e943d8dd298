use num_bigint::{BigInt, Sign};
use num_traits::Pow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, BitAnd, Neg, Shl, Sub};

/// Arbitrary-precision integer view of an IP address
///
/// Wraps a signed big integer so the CIDR algorithms can use the masking
/// idiom `n & -(1 << shift)` at either address width without overflow.
/// Bitwise operations follow two's-complement semantics; arithmetic never
/// truncates and never fails. Range validity against a protocol family is
/// checked by callers, not here.
///
/// # Examples
///
/// ```
/// use netaddr_core::IpNumber;
///
/// let n = IpNumber::from(0xC0A80101u32); // 192.168.1.1
/// let floored = &n & &(-(IpNumber::one() << 8u32));
/// assert_eq!(floored, IpNumber::from(0xC0A80100u32));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct IpNumber(BigInt);

impl IpNumber {
    /// The value zero
    pub fn zero() -> Self {
        IpNumber(BigInt::from(0))
    }

    /// The value one
    pub fn one() -> Self {
        IpNumber(BigInt::from(1))
    }

    /// Build a value from big-endian bytes
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        IpNumber(BigInt::from_bytes_be(Sign::Plus, bytes))
    }

    /// The low `width` bytes of the value in big-endian order, left-padded
    /// with zeros
    ///
    /// Values in `[0, 2^(8 * width))` round-trip exactly through
    /// [`IpNumber::from_be_bytes`].
    pub fn to_be_bytes(&self, width: usize) -> Vec<u8> {
        let (_, raw) = self.0.to_bytes_be();
        let mut out = vec![0u8; width];
        let n = raw.len().min(width);
        out[width - n..].copy_from_slice(&raw[raw.len() - n..]);
        out
    }

    /// `self` raised to the power `exp`
    ///
    /// Used to compute block sizes as powers of two.
    pub fn exp(&self, exp: u32) -> Self {
        IpNumber(Pow::pow(&self.0, exp))
    }
}

impl fmt::Display for IpNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for IpNumber {
    fn from(value: u32) -> Self {
        IpNumber(BigInt::from(value))
    }
}

impl From<i64> for IpNumber {
    fn from(value: i64) -> Self {
        IpNumber(BigInt::from(value))
    }
}

impl From<u128> for IpNumber {
    fn from(value: u128) -> Self {
        IpNumber(BigInt::from(value))
    }
}

impl Add for IpNumber {
    type Output = IpNumber;

    fn add(self, rhs: IpNumber) -> IpNumber {
        IpNumber(self.0 + rhs.0)
    }
}

impl Add for &IpNumber {
    type Output = IpNumber;

    fn add(self, rhs: &IpNumber) -> IpNumber {
        IpNumber(&self.0 + &rhs.0)
    }
}

impl Sub for IpNumber {
    type Output = IpNumber;

    fn sub(self, rhs: IpNumber) -> IpNumber {
        IpNumber(self.0 - rhs.0)
    }
}

impl Sub for &IpNumber {
    type Output = IpNumber;

    fn sub(self, rhs: &IpNumber) -> IpNumber {
        IpNumber(&self.0 - &rhs.0)
    }
}

impl BitAnd for IpNumber {
    type Output = IpNumber;

    fn bitand(self, rhs: IpNumber) -> IpNumber {
        IpNumber(self.0 & rhs.0)
    }
}

impl BitAnd for &IpNumber {
    type Output = IpNumber;

    fn bitand(self, rhs: &IpNumber) -> IpNumber {
        IpNumber(&self.0 & &rhs.0)
    }
}

impl Shl<u32> for IpNumber {
    type Output = IpNumber;

    fn shl(self, rhs: u32) -> IpNumber {
        IpNumber(self.0 << rhs)
    }
}

impl Shl<u32> for &IpNumber {
    type Output = IpNumber;

    fn shl(self, rhs: u32) -> IpNumber {
        IpNumber(&self.0 << rhs)
    }
}

impl Neg for IpNumber {
    type Output = IpNumber;

    fn neg(self) -> IpNumber {
        IpNumber(-self.0)
    }
}

impl Neg for &IpNumber {
    type Output = IpNumber;

    fn neg(self) -> IpNumber {
        IpNumber(-&self.0)
    }
}
