//! 8-bit CRC checksums
//!
//! This is the plain most-significant-bit-first, byte-at-a-time CRC-8
//! with no final XOR and no reflection.  The polynomial and initial
//! value are free parameters, which is what makes it a useful
//! hypothesis when reverse-engineering a protocol.
//!
//! # Examples
//!
//! ```
//! use checksum_cracker::crc8::{crc8, Crc8};
//! use checksum_cracker::Checksum;
//!
//! // CRC-8/SMBUS check value
//! let expected: u8 = 0xF4;
//! let data = "123456789".as_bytes();
//!
//! assert_eq!(crc8(data, 0x00, 0x07), expected);
//!
//! let mut crc = Crc8::new(0x00, 0x07);
//! assert_eq!(crc.compute(data), expected);
//! ```
use core::fmt::{Debug, Display, Formatter};

use crate::Checksum;

/// Fold one byte into a running CRC-8 value
///
/// # Arguments
///
/// * `crc` - The running CRC value
/// * `byte` - The next message byte
/// * `poly` - The generator polynomial without the implicit x^8 term
///
/// # Returns
///
/// The updated CRC value
#[inline]
fn step(mut crc: u8, byte: u8, poly: u8) -> u8 {
    crc ^= byte;
    for _ in 0..8 {
        if (crc & 0x80) != 0 {
            crc = (crc << 1) ^ poly;
        } else {
            crc <<= 1;
        }
    }
    crc
}

/// Compute a CRC-8 over a byte slice
///
/// Any polynomial is accepted here, odd or even.  Only the parameter
/// sweep restricts itself to odd polynomials.
///
/// With `poly` set to 0x01 every shift is a rotate-left, so eight
/// shifts leave the byte unchanged and the result is the same as
/// [`crate::xor8::xor8`] with the same `init`.
///
/// # Examples
///
/// ```
/// use checksum_cracker::crc8::crc8;
///
/// assert_eq!(crc8(&[0x01, 0x02, 0x03], 0x00, 0x07), 0x48);
/// ```
pub fn crc8(data: &[u8], init: u8, poly: u8) -> u8 {
    data.iter().fold(init, |crc, &byte| step(crc, byte, poly))
}

/// Rolling CRC-8 state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc8 {
    /// The initial value the CRC is reset to
    pub init: u8,
    /// The generator polynomial, without the x^8 term
    pub poly: u8,

    crc: u8,
}

impl Crc8 {
    /// Create a new CRC-8 with the given initial value and polynomial
    pub fn new(init: u8, poly: u8) -> Self {
        Crc8 {
            init,
            poly,
            crc: init,
        }
    }

    /// Get the current state of the CRC
    pub fn state(&self) -> u8 {
        self.crc
    }

    /// The generator polynomial in a printable form
    pub fn polynomial(&self) -> Crc8Polynomial {
        Crc8Polynomial(self.poly)
    }
}

impl Checksum<u8> for Crc8 {
    fn compute(&mut self, data: &[u8]) -> u8 {
        self.reset();

        for byte in data {
            self.update(*byte);
        }

        self.crc
    }

    fn update(&mut self, data: u8) -> u8 {
        self.crc = step(self.crc, data, self.poly);
        self.crc
    }

    fn reset(&mut self) {
        self.crc = self.init;
    }
}

/// A CRC-8 generator polynomial encoded most-significant-bit first
/// with the high-order x^8 coefficient left out.
///
/// For example x^8 + x^2 + x + 1 is encoded as 0x07.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Crc8Polynomial(pub u8);

impl Crc8Polynomial {
    /// Return the full generator polynomial, including the x^8 term,
    /// with the smallest term (x^0) as the least-significant bit.
    pub fn actual_polynomial(&self) -> u16 {
        0x100 | u16::from(self.0)
    }

    fn write(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        let actual_polynomial = self.actual_polynomial();
        let w: u8 = 8;

        for i in 0..=w {
            let term = w - i;
            if ((actual_polynomial >> term) & 1) == 1 {
                if i != 0 {
                    write!(f, " + ")?;
                }
                if i == w {
                    write!(f, "1")?;
                } else if i == (w - 1) {
                    write!(f, "x")?;
                } else {
                    write!(f, "x^{}", term)?;
                }
            }
        }

        Ok(())
    }
}

impl Debug for Crc8Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "0x{:02X} (", self.0)?;
        self.write(f)?;
        write!(f, ")")
    }
}

impl Display for Crc8Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        self.write(f)
    }
}

/// A named CRC-8 parameter set
///
/// Only MSB-first, non-reflected presets with no final XOR are
/// listed.  Those are the only ones the search can ever report.
/// Names follow Greg Cook's CRC RevEng catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc8Preset {
    /// The catalogue name
    pub name: &'static str,
    /// Initial value
    pub init: u8,
    /// Generator polynomial
    pub poly: u8,
}

/// Well-known CRC-8 parameter sets
pub const CRC8_PRESETS: [Crc8Preset; 10] = [
    Crc8Preset {
        name: "CRC-8/SMBUS",
        init: 0x00,
        poly: 0x07,
    },
    Crc8Preset {
        name: "CRC-8/GSM-A",
        init: 0x00,
        poly: 0x1D,
    },
    Crc8Preset {
        name: "CRC-8/HITAG",
        init: 0xFF,
        poly: 0x1D,
    },
    Crc8Preset {
        name: "CRC-8/I-CODE",
        init: 0xFD,
        poly: 0x1D,
    },
    Crc8Preset {
        name: "CRC-8/MIFARE-MAD",
        init: 0xC7,
        poly: 0x1D,
    },
    Crc8Preset {
        name: "CRC-8/OPENSAFETY",
        init: 0x00,
        poly: 0x2F,
    },
    Crc8Preset {
        name: "CRC-8/NRSC-5",
        init: 0xFF,
        poly: 0x31,
    },
    Crc8Preset {
        name: "CRC-8/LTE",
        init: 0x00,
        poly: 0x9B,
    },
    Crc8Preset {
        name: "CRC-8/CDMA2000",
        init: 0xFF,
        poly: 0x9B,
    },
    Crc8Preset {
        name: "CRC-8/DVB-S2",
        init: 0x00,
        poly: 0xD5,
    },
];

impl Crc8Preset {
    /// Find the catalogue entry for an initial value and polynomial
    ///
    /// # Examples
    ///
    /// ```
    /// use checksum_cracker::crc8::Crc8Preset;
    ///
    /// let preset = Crc8Preset::lookup(0x00, 0x07).unwrap();
    /// assert_eq!(preset.name, "CRC-8/SMBUS");
    /// assert!(Crc8Preset::lookup(0x80, 0x07).is_none());
    /// ```
    pub fn lookup(init: u8, poly: u8) -> Option<&'static Crc8Preset> {
        CRC8_PRESETS
            .iter()
            .find(|preset| preset.init == init && preset.poly == poly)
    }

    /// A rolling checksum configured with this preset
    pub fn checksum(&self) -> Crc8 {
        Crc8::new(self.init, self.poly)
    }
}
