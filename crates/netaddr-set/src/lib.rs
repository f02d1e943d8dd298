//! Range ordering and CIDR merge
//!
//! Thin application layer over [`netaddr_cidr`]:
//! - [`IpRange`] - an inclusive address span with a total sort order
//! - [`merge_cidrs`] - coalesce a list of CIDR blocks into the minimal
//!   equivalent list
//!
//! # Examples
//!
//! ```
//! use netaddr_cidr::IpNetwork;
//! use netaddr_set::merge_cidrs;
//!
//! let blocks = vec![
//!     IpNetwork::parse("192.168.1.0/24").unwrap(),
//!     IpNetwork::parse("192.168.0.0/24").unwrap(),
//! ];
//!
//! let merged = merge_cidrs(&blocks).unwrap();
//! assert_eq!(merged, vec![IpNetwork::parse("192.168.0.0/23").unwrap()]);
//! ```

use netaddr_cidr::{ip_range_to_cidrs, CidrError, IpNetwork, Result};
use netaddr_core::{AddrError, IpAddress, IpNumber, Version};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// An inclusive span of addresses of one family
///
/// Ranges order by family, then first address, then last address, so a
/// sorted list of distinct ranges has no ties.
///
/// # Examples
///
/// ```
/// use netaddr_core::IpAddress;
/// use netaddr_set::IpRange;
///
/// let range = IpRange::new(
///     IpAddress::parse("10.0.0.0").unwrap(),
///     IpAddress::parse("10.0.0.255").unwrap(),
/// ).unwrap();
/// assert_eq!(range.to_cidrs().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IpRange {
    version: Version,
    first: IpAddress,
    last: IpAddress,
}

impl IpRange {
    /// Build a span from its endpoints
    ///
    /// Fails when the endpoints belong to different families or are
    /// inverted.
    pub fn new(first: IpAddress, last: IpAddress) -> Result<Self> {
        if first.version() != last.version() {
            return Err(AddrError::VersionMismatch {
                left: first.version(),
                right: last.version(),
            }
            .into());
        }
        if first.to_number() > last.to_number() {
            return Err(CidrError::InvalidRange {
                start: first.to_string(),
                end: last.to_string(),
            });
        }
        Ok(IpRange {
            version: first.version(),
            first,
            last,
        })
    }

    /// The span covered by a network
    pub fn from_network(network: &IpNetwork) -> Self {
        IpRange {
            version: network.version(),
            first: network.first(),
            last: network.last(),
        }
    }

    /// The address family
    pub fn version(&self) -> Version {
        self.version
    }

    /// First address of the span
    pub fn first(&self) -> IpAddress {
        self.first
    }

    /// Last address of the span
    pub fn last(&self) -> IpAddress {
        self.last
    }

    /// The minimal CIDR cover of the span
    pub fn to_cidrs(&self) -> Result<Vec<IpNetwork>> {
        ip_range_to_cidrs(self.version, &self.first, &self.last)
    }
}

impl Ord for IpRange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.first.cmp(&other.first))
            .then_with(|| self.last.cmp(&other.last))
    }
}

impl PartialOrd for IpRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Coalesce a list of CIDR blocks into the minimal equivalent list
///
/// Sorts the blocks as ranges, folds overlapping and back-to-back spans
/// of the same family together, then re-expresses each merged span as
/// maximal CIDR blocks. Duplicates collapse; families never mix.
///
/// # Examples
///
/// ```
/// use netaddr_cidr::IpNetwork;
/// use netaddr_set::merge_cidrs;
///
/// let blocks = vec![
///     IpNetwork::parse("10.0.0.0/16").unwrap(),
///     IpNetwork::parse("10.0.0.0/8").unwrap(),
/// ];
/// assert_eq!(
///     merge_cidrs(&blocks).unwrap(),
///     vec![IpNetwork::parse("10.0.0.0/8").unwrap()],
/// );
/// ```
pub fn merge_cidrs(cidrs: &[IpNetwork]) -> Result<Vec<IpNetwork>> {
    let mut ranges: Vec<IpRange> = cidrs.iter().map(IpRange::from_network).collect();
    ranges.sort();

    let mut merged: Vec<IpRange> = Vec::new();
    for range in ranges {
        match merged.last_mut() {
            Some(prev)
                if prev.version == range.version
                    && range.first.to_number()
                        <= &prev.last.to_number() + &IpNumber::one() =>
            {
                // Overlapping or back-to-back: widen the previous span.
                if range.last.to_number() > prev.last.to_number() {
                    prev.last = range.last;
                }
            }
            _ => merged.push(range),
        }
    }
    debug!(input = cidrs.len(), spans = merged.len(), "merged CIDR list");

    let mut out = Vec::new();
    for range in &merged {
        out.extend(range.to_cidrs()?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(cidr: &str) -> IpNetwork {
        IpNetwork::parse(cidr).unwrap()
    }

    fn networks(cidrs: &[&str]) -> Vec<IpNetwork> {
        cidrs.iter().map(|c| network(c)).collect()
    }

    fn range(first: &str, last: &str) -> IpRange {
        IpRange::new(
            IpAddress::parse(first).unwrap(),
            IpAddress::parse(last).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_mixed_versions() {
        let err = IpRange::new(
            IpAddress::parse("1.1.1.1").unwrap(),
            IpAddress::parse("2001:db8::1").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, CidrError::Addr(AddrError::VersionMismatch { .. })));
    }

    #[test]
    fn test_new_rejects_inverted_endpoints() {
        let err = IpRange::new(
            IpAddress::parse("1.1.1.2").unwrap(),
            IpAddress::parse("1.1.1.1").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, CidrError::InvalidRange { .. }));
    }

    #[test]
    fn test_from_network() {
        let r = IpRange::from_network(&network("10.0.0.0/8"));
        assert_eq!(r.first().to_string(), "10.0.0.0");
        assert_eq!(r.last().to_string(), "10.255.255.255");
        assert_eq!(r.version(), Version::V4);
    }

    #[test]
    fn test_to_cidrs() {
        assert_eq!(
            range("1.1.1.0", "1.1.2.255").to_cidrs().unwrap(),
            networks(&["1.1.1.0/24", "1.1.2.0/24"])
        );
    }

    #[test]
    fn test_sort_order() {
        let mut ranges = vec![
            range("10.0.0.0", "10.0.1.255"),
            range("9.0.0.0", "9.0.0.255"),
            range("10.0.0.0", "10.0.0.255"),
        ];
        ranges.sort();
        assert_eq!(
            ranges,
            vec![
                range("9.0.0.0", "9.0.0.255"),
                range("10.0.0.0", "10.0.0.255"),
                range("10.0.0.0", "10.0.1.255"),
            ]
        );
    }

    #[test]
    fn test_merge_adjacent_blocks() {
        let merged = merge_cidrs(&networks(&["192.168.1.0/24", "192.168.0.0/24"])).unwrap();
        assert_eq!(merged, networks(&["192.168.0.0/23"]));
    }

    #[test]
    fn test_merge_keeps_unmergeable_neighbours() {
        // Back-to-back but misaligned: 1.1.1.0/24 + 1.1.2.0/24 is not a
        // valid single block.
        let merged = merge_cidrs(&networks(&["1.1.2.0/24", "1.1.1.0/24"])).unwrap();
        assert_eq!(merged, networks(&["1.1.1.0/24", "1.1.2.0/24"]));
    }

    #[test]
    fn test_merge_collapses_contained_and_duplicate_blocks() {
        let merged = merge_cidrs(&networks(&[
            "10.0.0.0/8",
            "10.1.0.0/16",
            "10.0.0.0/8",
        ]))
        .unwrap();
        assert_eq!(merged, networks(&["10.0.0.0/8"]));
    }

    #[test]
    fn test_merge_keeps_families_apart() {
        let merged = merge_cidrs(&networks(&["2001:db8::/32", "0.0.0.0/0"])).unwrap();
        assert_eq!(merged, networks(&["0.0.0.0/0", "2001:db8::/32"]));
    }

    #[test]
    fn test_merge_disjoint_blocks() {
        let merged = merge_cidrs(&networks(&["10.0.0.0/24", "10.0.2.0/24"])).unwrap();
        assert_eq!(merged, networks(&["10.0.0.0/24", "10.0.2.0/24"]));
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_cidrs(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let r = range("10.0.0.0", "10.0.0.255");
        let json = serde_json::to_string(&r).expect("serialization failed");
        let back: IpRange = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(back, r);
    }
}
