//! 8-bit XOR checksums
//!
//! # Examples
//!
//! ```
//! use checksum_cracker::xor8::Xor8;
//! use checksum_cracker::Checksum;
//!
//! let expected: u8 = 0xF3;
//! let data = [0xAA, 0x0F, 0x03];
//! let mut xor = Xor8::new(0x55);
//!
//! let result = xor.compute(&data);
//!
//! assert_eq!(result, expected);
//! ```
use core::default::Default;

use crate::Checksum;

/// XOR an initial value with every byte of `data`
///
/// Byte order doesn't affect the result.
pub fn xor8(data: &[u8], init: u8) -> u8 {
    data.iter().fold(init, |acc, &byte| acc ^ byte)
}

/// The data structure used for the XOR checksum
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Xor8 {
    /// The value the checksum starts from
    pub init: u8,

    acc: u8,
}

impl Xor8 {
    /// Create a new XOR checksum seeded with `init`
    pub fn new(init: u8) -> Self {
        Xor8 { init, acc: init }
    }
}

impl Default for Xor8 {
    fn default() -> Xor8 {
        Xor8::new(0)
    }
}

impl Checksum<u8> for Xor8 {
    fn compute(&mut self, data: &[u8]) -> u8 {
        self.reset();

        for byte in data {
            self.update(*byte);
        }

        self.acc
    }

    fn update(&mut self, data: u8) -> u8 {
        self.acc ^= data;
        self.acc
    }

    fn reset(&mut self) {
        self.acc = self.init;
    }
}
