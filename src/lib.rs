//! crate for recovering unknown 8-bit checksum schemes
//!
//! Given several frames captured from an unknown protocol, all the
//! same length and believed to end in (or contain) the same kind of
//! checksum byte, this crate searches for a checksum family, its
//! parameters and the span of bytes it covers that reproduce the
//! checksum byte of every frame.
//!
//! Three families are considered: an MSB-first CRC-8 with free
//! initial value and polynomial, an XOR of all bytes and a modulo-256
//! sum, the latter two with a free initial value.
//!
//! # Examples
//!
//! ```
//! use checksum_cracker::{search, Family};
//!
//! let frames: [&[u8]; 3] = [
//!     &[0xD5, 0x15, 0x7B, 0x93, 0xCE, 0x9C, 0x00, 0x62, 0x3D],
//!     &[0xD9, 0xB6, 0x22, 0x85, 0xD5, 0x9C, 0x80, 0x54, 0x8A],
//!     &[0xD3, 0xC7, 0x1F, 0xD3, 0xDF, 0x1E, 0x00, 0x41, 0x96],
//! ];
//!
//! match search(&frames, 5) {
//!     Ok(Some(found)) => assert_eq!(found.family(), Family::Crc8),
//!     Ok(None) => panic!("no scheme fits every frame"),
//!     Err(e) => panic!("bad input: {}", e),
//! }
//! ```
#![warn(missing_docs)]
#![warn(unsafe_code)]
#![no_std]

pub mod candidate;
pub mod corpus;
pub mod crc8;
pub mod error;
pub mod search;
pub mod sum8;
pub mod window;
pub mod xor8;

pub use candidate::{Candidate, Family, Match, SweepOrder};
pub use corpus::Corpus;
pub use error::ValidationError;
pub use search::{search, Search, SearchConfiguration};
pub use window::{Window, Windows};

/// Checksum trait all checksum algorithms should implement
/// This provides several compute operations
///
/// There are multiple uses of the term check or checksum.  The term
/// in this context is a computation of a error-detecting code for a
/// set of data.
/// Sometimes a checksum is specifically used to refer to computation
/// of a checksum value that should equal zero.  That's not the
/// meaning here.  The Checksum trait provides an interface for
/// algorithms that can calculate checksums.
pub trait Checksum<T> {
    /// Compute a checksum over a u8 byte slice
    ///
    /// Every call to compute resets the state of the checksum to an
    /// initial state.  So calling it twice with the same parameters
    /// should yield the same result.
    ///
    /// # Examples
    ///
    /// ```
    /// use crate::checksum_cracker::Checksum;
    /// use checksum_cracker::crc8::Crc8;
    ///
    /// let expected: u8 = 0xF4;
    /// let data = "123456789".as_bytes();
    /// let mut crc = Crc8::new(0x00, 0x07);
    /// let result = crc.compute(data);
    /// assert_eq!(result, expected);
    /// ```
    fn compute(&mut self, data: &[u8]) -> T;

    /// Perform a rolling update on the checksum.
    ///
    /// Update the checksum with a new byte, computing and returning
    /// the checksum.
    ///
    /// # Examples
    ///
    /// ```
    /// use crate::checksum_cracker::Checksum;
    /// use checksum_cracker::sum8::Sum8;
    ///
    /// let mut sum = Sum8::new(250);
    /// let result = sum.update(10);
    /// assert_eq!(result, 4);
    /// let result = sum.update(10);
    /// assert_eq!(result, 14);
    /// ```
    fn update(&mut self, data: u8) -> T;

    /// Reset the checksum to the original state.
    /// This resets the checksum to the state it was in when it was
    /// created.
    /// If it was created with non-default parameters, those should be
    /// preserved.
    /// If an initial value was specified when originally creating the checksum,
    /// it should be preserved and initialized to that value.
    fn reset(&mut self);
}
