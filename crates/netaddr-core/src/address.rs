use crate::{AddrError, IpNumber, Result, Version};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// An IP address tagged with its protocol family
///
/// A thin value wrapper around [`std::net::IpAddr`]: the 4-byte/16-byte
/// width invariant is carried by the inner representation and the family
/// tag is derived from it. Addresses are immutable; arithmetic such as
/// [`IpAddress::increment`] returns a new value and leaves the receiver
/// untouched.
///
/// The derived ordering compares family first (IPv4 before IPv6), then
/// numeric address value. This is the order used to sort and deduplicate
/// collections of addresses and networks.
///
/// # Examples
///
/// ```
/// use netaddr_core::{IpAddress, Version};
///
/// let addr = IpAddress::parse("10.0.0.1").unwrap();
/// assert_eq!(addr.version(), Version::V4);
///
/// let next = addr.increment(&1i64.into()).unwrap();
/// assert_eq!(next.to_string(), "10.0.0.2");
/// assert_eq!(addr.to_string(), "10.0.0.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IpAddress(IpAddr);

impl IpAddress {
    /// Parse a literal address, detecting the family from its format
    ///
    /// Any syntactically valid dotted-quad or colon-hex literal parses;
    /// malformed text is an explicit error, never a sentinel value.
    pub fn parse(text: &str) -> Result<Self> {
        text.parse::<IpAddr>()
            .map(IpAddress)
            .map_err(|_| AddrError::InvalidAddress(text.to_string()))
    }

    /// The address family
    pub fn version(&self) -> Version {
        match self.0 {
            IpAddr::V4(_) => Version::V4,
            IpAddr::V6(_) => Version::V6,
        }
    }

    /// The underlying standard-library address
    pub fn as_ip_addr(&self) -> IpAddr {
        self.0
    }

    /// Integer value of the address
    pub fn to_number(&self) -> IpNumber {
        match self.0 {
            IpAddr::V4(v4) => IpNumber::from_be_bytes(&v4.octets()),
            IpAddr::V6(v6) => IpNumber::from_be_bytes(&v6.octets()),
        }
    }

    /// Rebuild an address of the given family from its integer value
    ///
    /// Fails with [`AddrError::OutOfBounds`] when the value is negative or
    /// exceeds the family's maximum. Round-trip law:
    /// `IpAddress::from_number(a.version(), &a.to_number()) == Ok(a)`.
    pub fn from_number(version: Version, num: &IpNumber) -> Result<Self> {
        if *num < IpNumber::zero() || *num > version.max_number() {
            return Err(AddrError::OutOfBounds);
        }
        let bytes = num.to_be_bytes(version.byte_length());
        Ok(match version {
            Version::V4 => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(&bytes);
                IpAddress(IpAddr::V4(Ipv4Addr::from(octets)))
            }
            Version::V6 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&bytes);
                IpAddress(IpAddr::V6(Ipv6Addr::from(octets)))
            }
        })
    }

    /// A new address offset from this one by `delta` (which may be
    /// negative)
    ///
    /// Fails with [`AddrError::OutOfBounds`] when the result falls outside
    /// `[0, version.max_number()]`.
    pub fn increment(&self, delta: &IpNumber) -> Result<Self> {
        let next = &self.to_number() + delta;
        Self::from_number(self.version(), &next)
    }
}

/// The numerically smaller of two addresses; `a` wins a tie
///
/// The tie-break is deterministic so callers building merge boundaries get
/// stable results.
pub fn min_address(a: &IpAddress, b: &IpAddress) -> IpAddress {
    if a.to_number() <= b.to_number() {
        *a
    } else {
        *b
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for IpAddress {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<IpAddr> for IpAddress {
    fn from(value: IpAddr) -> Self {
        IpAddress(value)
    }
}

impl From<Ipv4Addr> for IpAddress {
    fn from(value: Ipv4Addr) -> Self {
        IpAddress(IpAddr::V4(value))
    }
}

impl From<Ipv6Addr> for IpAddress {
    fn from(value: Ipv6Addr) -> Self {
        IpAddress(IpAddr::V6(value))
    }
}
