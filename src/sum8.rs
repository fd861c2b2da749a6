//! 8-bit additive checksums
//!
//! # Examples
//!
//! ```
//! use checksum_cracker::sum8::Sum8;
//! use checksum_cracker::Checksum;
//!
//! let mut sum = Sum8::new(250);
//!
//! assert_eq!(sum.compute(&[10, 10]), 14);
//! ```
use core::default::Default;

use crate::Checksum;

/// Add every byte of `data` to an initial value, modulo 256
pub fn sum8(data: &[u8], init: u8) -> u8 {
    data.iter().fold(init, |acc, &byte| acc.wrapping_add(byte))
}

/// The data structure used for the modulo-256 sum checksum
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sum8 {
    /// The value the sum starts from
    pub init: u8,

    acc: u8,
}

impl Sum8 {
    /// Create a new sum checksum seeded with `init`
    pub fn new(init: u8) -> Self {
        Sum8 { init, acc: init }
    }
}

impl Default for Sum8 {
    fn default() -> Sum8 {
        Sum8::new(0)
    }
}

impl Checksum<u8> for Sum8 {
    fn compute(&mut self, data: &[u8]) -> u8 {
        self.reset();

        for byte in data {
            self.update(*byte);
        }

        self.acc
    }

    fn update(&mut self, data: u8) -> u8 {
        self.acc = self.acc.wrapping_add(data);
        self.acc
    }

    fn reset(&mut self) {
        self.acc = self.init;
    }
}
