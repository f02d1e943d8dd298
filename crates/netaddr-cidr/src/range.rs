use crate::{CidrError, IpNetwork, Result};
use netaddr_core::{AddrError, IpAddress, IpNumber, Version};
use tracing::debug;

/// Convert an inclusive address range into the minimal ascending list of
/// CIDR blocks exactly covering it
///
/// The boundary reducer supplies a single covering network, which is then
/// trimmed: once against `start - 1` when it overshoots low (keeping the
/// partition's after-side) and once against `end + 1` when it overshoots
/// high (keeping the before-side). The returned blocks are pairwise
/// disjoint with no gaps, and maximal: no two neighbours form a valid
/// single block.
///
/// Fails with a version mismatch when the endpoints and `version`
/// disagree, and with [`CidrError::InvalidRange`] when `start > end`.
/// Incrementing past the family maximum while trimming the high side
/// only means there is nothing to trim, so that one out-of-bounds case is
/// absorbed rather than surfaced.
///
/// # Examples
///
/// ```
/// use netaddr_cidr::{ip_range_to_cidrs, IpNetwork};
/// use netaddr_core::{IpAddress, Version};
///
/// let start = IpAddress::parse("1.1.1.0").unwrap();
/// let end = IpAddress::parse("1.1.2.255").unwrap();
///
/// let cidrs = ip_range_to_cidrs(Version::V4, &start, &end).unwrap();
/// assert_eq!(cidrs, vec![
///     IpNetwork::parse("1.1.1.0/24").unwrap(),
///     IpNetwork::parse("1.1.2.0/24").unwrap(),
/// ]);
/// ```
pub fn ip_range_to_cidrs(
    version: Version,
    start: &IpAddress,
    end: &IpAddress,
) -> Result<Vec<IpNetwork>> {
    if start.version() != version {
        return Err(AddrError::VersionMismatch {
            left: version,
            right: start.version(),
        }
        .into());
    }
    if end.version() != version {
        return Err(AddrError::VersionMismatch {
            left: version,
            right: end.version(),
        }
        .into());
    }
    if start.to_number() > end.to_number() {
        return Err(CidrError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let mut cidrs = Vec::new();
    let mut subnet = IpNetwork::from_boundaries(start, end)?;
    debug!(%start, %end, covering = %subnet, "converting range to CIDRs");

    if subnet.first_number() < start.to_number() {
        // The covering block reaches below the range: everything at or
        // above `start` survives, and its highest piece may still
        // overshoot on the high side.
        let exclude_addr = start.increment(&-IpNumber::one())?;
        let exclude = IpNetwork::from_address(&exclude_addr);
        let mut after = subnet.partition(&exclude).after;
        if let Some(highest) = after.pop() {
            subnet = highest;
        }
        cidrs.extend(after);
    }

    if subnet.last_number() > end.to_number() {
        // The remaining block reaches above the range.
        match end.increment(&IpNumber::one()) {
            Ok(exclude_addr) => {
                let exclude = IpNetwork::from_address(&exclude_addr);
                cidrs.extend(subnet.partition(&exclude).before);
            }
            // `end` is the family maximum: nothing overshoots.
            Err(AddrError::OutOfBounds) => cidrs.push(subnet),
            Err(err) => return Err(err.into()),
        }
    } else {
        cidrs.push(subnet);
    }

    Ok(cidrs)
}
