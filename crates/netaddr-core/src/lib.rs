//! Core types for IP address arithmetic
//!
//! This crate provides the foundational types used throughout the NetAddr
//! workspace:
//! - [`Version`] - Protocol family tag (IPv4 or IPv6)
//! - [`IpNumber`] - Arbitrary-precision integer view of an address
//! - [`IpAddress`] - An address value with its family
//! - [`AddrError`] - Error types
//!
//!
//! ```
//! use netaddr_core::{IpAddress, Version};
//!
//! let addr = IpAddress::parse("192.168.1.1").unwrap();
//! assert_eq!(addr.version(), Version::V4);
//! assert_eq!(addr.to_string(), "192.168.1.1");
//! ```

use thiserror::Error;

mod address;
mod number;
mod version;

pub use address::{min_address, IpAddress};
pub use number::IpNumber;
pub use version::Version;

/// Error types for address operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddrError {
    /// Operands belong to different protocol families
    #[error("version mismatch: {left} vs {right}")]
    VersionMismatch {
        /// Family of the left operand
        left: Version,
        /// Family of the right operand
        right: Version,
    },

    /// An address value left the range representable by its family
    #[error("address out of range of the version boundary")]
    OutOfBounds,

    /// Malformed textual address
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),
}

/// Result type alias for address operations
pub type Result<T> = std::result::Result<T, AddrError>;
