//! CIDR networks and range partitioning
//!
//! Provides the block-level algebra on top of [`netaddr_core`]:
//! - Parse CIDR notation (e.g., "192.168.0.0/24" or "2001:db8::/32")
//! - [`IpNetwork::from_boundaries`] - smallest-prefix network straddling a
//!   first/last address pair
//! - [`IpNetwork::partition`] - split a network around an excluded
//!   sub-network into maximal before/after blocks
//! - [`ip_range_to_cidrs`] - minimal CIDR list exactly covering an
//!   arbitrary address range
//!
//! # Examples
//!
//! ```
//! use netaddr_cidr::{ip_range_to_cidrs, IpNetwork};
//! use netaddr_core::{IpAddress, Version};
//!
//! let start = IpAddress::parse("1.1.1.0").unwrap();
//! let end = IpAddress::parse("1.1.2.255").unwrap();
//!
//! let cidrs = ip_range_to_cidrs(Version::V4, &start, &end).unwrap();
//! assert_eq!(cidrs, vec![
//!     IpNetwork::parse("1.1.1.0/24").unwrap(),
//!     IpNetwork::parse("1.1.2.0/24").unwrap(),
//! ]);
//! ```

use netaddr_core::AddrError;
use thiserror::Error;

mod mask;
mod network;
mod partition;
mod range;

pub use mask::IpMask;
pub use network::IpNetwork;
pub use partition::Partition;
pub use range::ip_range_to_cidrs;

/// CIDR errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// Malformed CIDR notation
    #[error("invalid CIDR notation: {0}")]
    InvalidNotation(String),

    /// Prefix length exceeds the address width
    #[error("invalid prefix length: {prefix} (must be 0-{bits})")]
    InvalidPrefixLength {
        /// The rejected prefix length
        prefix: u32,
        /// Address width of the family
        bits: u32,
    },

    /// Range endpoints are inverted
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange {
        /// Textual form of the range start
        start: String,
        /// Textual form of the range end
        end: String,
    },

    /// Underlying address error
    #[error(transparent)]
    Addr(#[from] AddrError),
}

/// Result type alias for CIDR operations
pub type Result<T> = std::result::Result<T, CidrError>;
