use crate::IpNetwork;
use netaddr_core::IpNumber;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Result of splitting a network around an excluded sub-network
///
/// `before` and `after` hold the maximal sibling blocks of the target
/// strictly below and strictly above the exclusion, each in ascending
/// address order. Flattening `before`, the overlapped block and `after`
/// back to address ranges reconstructs the target's range exactly, with
/// no gaps and no overlaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Maximal blocks of the target strictly below the excluded network
    pub before: Vec<IpNetwork>,
    /// The block the exclusion overlaps: the excluded network itself, or
    /// the whole target when the target is at least as specific
    pub partition: Option<IpNetwork>,
    /// Maximal blocks of the target strictly above the excluded network
    pub after: Vec<IpNetwork>,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .before
            .iter()
            .chain(self.partition.iter())
            .chain(self.after.iter())
            .map(|nw| nw.to_string())
            .collect();
        write!(f, "[{}]", names.join(", "))
    }
}

impl IpNetwork {
    /// Split this network into the maximal blocks before an excluded
    /// sub-network, the exclusion itself, and the maximal blocks after
    ///
    /// A disjoint exclusion returns the target whole on the matching
    /// side; an exclusion no more specific than the target returns the
    /// target as the overlapped block. Otherwise the target's range is
    /// bisected one prefix bit at a time: the half not holding the
    /// exclusion's first address is emitted as a finished sibling and the
    /// other half becomes the narrower search region, until the
    /// exclusion's own prefix is reached. At most bit-width iterations.
    ///
    /// # Examples
    ///
    /// ```
    /// use netaddr_cidr::IpNetwork;
    ///
    /// let target = IpNetwork::parse("192.168.1.0/24").unwrap();
    /// let exclude = IpNetwork::parse("192.168.1.128/25").unwrap();
    ///
    /// let parts = target.partition(&exclude);
    /// assert_eq!(parts.before, vec![IpNetwork::parse("192.168.1.0/25").unwrap()]);
    /// assert_eq!(parts.partition, Some(exclude));
    /// assert!(parts.after.is_empty());
    /// ```
    pub fn partition(&self, exclude: &IpNetwork) -> Partition {
        if exclude.last_number() < self.first_number() {
            // Exclusion lies entirely below the target.
            return Partition {
                after: vec![self.clone()],
                ..Partition::default()
            };
        }
        if self.last_number() < exclude.first_number() {
            // Exclusion lies entirely above the target.
            return Partition {
                before: vec![self.clone()],
                ..Partition::default()
            };
        }

        if self.prefix_length() >= exclude.prefix_length() {
            // The exclusion cannot subdivide an equally or more specific
            // target.
            return Partition {
                partition: Some(self.clone()),
                ..Partition::default()
            };
        }

        debug!(network = %self, exclude = %exclude, "partitioning network");

        let version = self.version();
        let width = version.bit_length();
        let exclude_first = exclude.first_number();

        let mut left = Vec::new();
        let mut right = Vec::new();

        let mut new_prefix = self.prefix_length() + 1;
        let mut lower = self.first_number();
        let mut upper = &lower + &half_length(width, new_prefix);

        loop {
            if exclude.prefix_length() < new_prefix {
                break;
            }

            // The half not holding the exclusion is complete; the other
            // half is searched next.
            let matched = if exclude_first >= upper {
                left.push(IpNetwork::from_parts(lower.clone(), version, new_prefix));
                trace!(prefix = new_prefix, "kept lower half");
                upper.clone()
            } else {
                right.push(IpNetwork::from_parts(upper.clone(), version, new_prefix));
                trace!(prefix = new_prefix, "kept upper half");
                lower.clone()
            };

            new_prefix += 1;
            if new_prefix > width {
                break;
            }

            lower = matched;
            upper = &lower + &half_length(width, new_prefix);
        }

        // The walk collects the after-side from widest to narrowest.
        right.reverse();

        Partition {
            before: left,
            partition: Some(exclude.clone()),
            after: right,
        }
    }
}

// Size of one half of a block split at `prefix`, 2^(width - prefix).
fn half_length(width: u32, prefix: u32) -> IpNumber {
    IpNumber::from(2u32).exp(width - prefix)
}
