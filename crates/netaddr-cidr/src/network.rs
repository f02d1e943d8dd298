use crate::{CidrError, IpMask, Result};
use netaddr_core::{AddrError, IpAddress, IpNumber, Version};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use tracing::trace;

/// A CIDR block: a floor address plus a prefix mask
///
/// The stored start is always aligned to the mask; constructors floor the
/// given address to the prefix boundary. First and last addresses and the
/// block length are computed, not stored.
///
/// Networks order by family, then start address, then mask: a strict
/// total order with no ties among distinct networks.
///
/// # Examples
///
/// ```
/// use netaddr_cidr::IpNetwork;
///
/// let nw = IpNetwork::parse("192.168.1.0/24").unwrap();
/// assert_eq!(nw.first().to_string(), "192.168.1.0");
/// assert_eq!(nw.last().to_string(), "192.168.1.255");
/// assert_eq!(nw.prefix_length(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IpNetwork {
    start: IpNumber,
    version: Version,
    mask: IpMask,
}

impl IpNetwork {
    /// Parse CIDR notation (`a.b.c.d/n` or the IPv6 equivalent)
    ///
    /// The address part is floored to the prefix boundary, so
    /// `"10.0.0.7/8"` parses to the block starting at `10.0.0.0`.
    pub fn parse(cidr: &str) -> Result<Self> {
        let (addr_text, prefix_text) = cidr.split_once('/').ok_or_else(|| {
            CidrError::InvalidNotation(format!("expected address/prefix: {cidr}"))
        })?;
        let addr = IpAddress::parse(addr_text)?;
        let ones: u32 = prefix_text
            .parse()
            .map_err(|_| CidrError::InvalidNotation(format!("invalid prefix: {prefix_text}")))?;
        Self::new(&addr, ones)
    }

    /// Network from an address and prefix length
    ///
    /// Fails with [`CidrError::InvalidPrefixLength`] when the prefix
    /// exceeds the family's address width.
    pub fn new(addr: &IpAddress, ones: u32) -> Result<Self> {
        let version = addr.version();
        let width = version.bit_length();
        let mask = IpMask::new(ones, width)?;
        let start = floor_to_prefix(&addr.to_number(), ones, width);
        Ok(IpNetwork {
            start,
            version,
            mask,
        })
    }

    /// Host network for a single address (full-width mask)
    pub fn from_address(addr: &IpAddress) -> Self {
        IpNetwork {
            start: addr.to_number(),
            version: addr.version(),
            mask: IpMask::host(addr.version()),
        }
    }

    // Callers guarantee start is aligned to the prefix and within the
    // family's range.
    pub(crate) fn from_parts(start: IpNumber, version: Version, ones: u32) -> Self {
        let width = version.bit_length();
        debug_assert_eq!(floor_to_prefix(&start, ones, width), start);
        IpNetwork {
            start,
            version,
            mask: IpMask::new_unchecked(ones, width),
        }
    }

    /// The smallest-prefix single network whose bounds straddle
    /// `[first, last]`
    ///
    /// Widens one bit of specificity at a time, re-flooring `last` to the
    /// candidate boundary, until the floored value no longer exceeds
    /// `first` (at most bit-width iterations). The result always contains
    /// the pair but usually overshoots on one or both sides; trimming it
    /// to an exact cover is [`ip_range_to_cidrs`]'s job.
    ///
    /// Fails with [`AddrError::VersionMismatch`] when the two addresses
    /// belong to different families.
    ///
    /// [`ip_range_to_cidrs`]: crate::ip_range_to_cidrs
    pub fn from_boundaries(first: &IpAddress, last: &IpAddress) -> Result<Self> {
        if first.version() != last.version() {
            return Err(AddrError::VersionMismatch {
                left: first.version(),
                right: last.version(),
            }
            .into());
        }

        let version = first.version();
        let width = version.bit_length();
        let lowest = first.to_number();
        let mut ip = last.to_number();
        let mut prefix = width;

        // Search outwards from the longest prefix until the candidate
        // block reaches down to `first`.
        while prefix > 0 && ip > lowest {
            prefix -= 1;
            ip = floor_to_prefix(&ip, prefix, width);
        }
        trace!(first = %first, last = %last, prefix, "reduced boundaries to network");

        Ok(Self::from_parts(ip, version, prefix))
    }

    /// The address family
    pub fn version(&self) -> Version {
        self.version
    }

    /// The network mask
    pub fn mask(&self) -> IpMask {
        self.mask
    }

    /// Number of leading fixed bits
    pub fn prefix_length(&self) -> u32 {
        self.mask.prefix_len()
    }

    /// Number of addresses in the block, `2^(bits - prefix)`
    pub fn length(&self) -> IpNumber {
        self.mask.length()
    }

    /// First address in the block
    pub fn first(&self) -> IpAddress {
        address_of(self.version, &self.start)
    }

    /// Last address in the block
    pub fn last(&self) -> IpAddress {
        address_of(self.version, &self.last_number())
    }

    /// Integer value of the first address
    pub fn first_number(&self) -> IpNumber {
        self.start.clone()
    }

    /// Integer value of the last address, `start + length - 1`
    pub fn last_number(&self) -> IpNumber {
        &(&self.start + &self.length()) - &IpNumber::one()
    }

    /// Whether the block covers `addr`
    ///
    /// Always false for an address of the other family.
    pub fn contains_address(&self, addr: &IpAddress) -> bool {
        if addr.version() != self.version {
            return false;
        }
        let num = addr.to_number();
        self.start <= num && num <= self.last_number()
    }

    /// Whether the block covers the whole of `other`
    ///
    /// Always false for a network of the other family.
    pub fn contains_subnetwork(&self, other: &Self) -> bool {
        self.version == other.version
            && self.start <= other.start
            && other.last_number() <= self.last_number()
    }

    /// Subdivide into the equal-size blocks at a longer prefix
    ///
    /// Returns an empty list when `new_prefix` is shorter than this
    /// block's own prefix, and fails when it exceeds the address width.
    ///
    /// # Examples
    ///
    /// ```
    /// use netaddr_cidr::IpNetwork;
    ///
    /// let nw = IpNetwork::parse("192.168.0.0/24").unwrap();
    /// let halves = nw.subnet(25).unwrap();
    /// assert_eq!(halves, vec![
    ///     IpNetwork::parse("192.168.0.0/25").unwrap(),
    ///     IpNetwork::parse("192.168.0.128/25").unwrap(),
    /// ]);
    /// ```
    pub fn subnet(&self, new_prefix: u32) -> Result<Vec<IpNetwork>> {
        let width = self.version.bit_length();
        let step = IpMask::new(new_prefix, width)?.length();
        if new_prefix < self.prefix_length() {
            return Ok(Vec::new());
        }

        let last = self.last_number();
        let mut results = Vec::new();
        let mut cursor = self.start.clone();
        while cursor <= last {
            results.push(Self::from_parts(cursor.clone(), self.version, new_prefix));
            cursor = &cursor + &step;
        }
        Ok(results)
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first(), self.mask.prefix_len())
    }
}

impl FromStr for IpNetwork {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Ord for IpNetwork {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.mask.cmp(&other.mask))
    }
}

impl PartialOrd for IpNetwork {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Clears the low (width - prefix) bits: n & -(1 << (width - prefix)).
pub(crate) fn floor_to_prefix(num: &IpNumber, prefix: u32, width: u32) -> IpNumber {
    num & &(-(IpNumber::one() << (width - prefix)))
}

// Number-to-address conversion for values already inside the family's
// range (network starts and ends are bounds-checked at construction).
pub(crate) fn address_of(version: Version, num: &IpNumber) -> IpAddress {
    let bytes = num.to_be_bytes(version.byte_length());
    match version {
        Version::V4 => {
            let mut octets = [0u8; 4];
            octets.copy_from_slice(&bytes);
            IpAddress::from(Ipv4Addr::from(octets))
        }
        Version::V6 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&bytes);
            IpAddress::from(Ipv6Addr::from(octets))
        }
    }
}
