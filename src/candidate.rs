//! Checksum hypotheses and the order they are tried in
//!
//! A [`Candidate`] is one checksum family with concrete parameters.
//! [`Candidates`] walks every candidate the search considers for a
//! window, in a fixed [`SweepOrder`], and [`match_window`] returns the
//! first one the whole corpus agrees with.
use core::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    corpus::Corpus,
    crc8::{crc8, Crc8Polynomial, Crc8Preset},
    sum8::sum8,
    window::Window,
    xor8::xor8,
};

/// The checksum families the search knows about
///
/// The derived ordering is the family priority used within a
/// parameter value: CRC8, then XOR8, then SUM8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// MSB-first CRC-8, see [`crate::crc8`]
    Crc8,
    /// XOR of all bytes, see [`crate::xor8`]
    Xor8,
    /// Modulo-256 sum of all bytes, see [`crate::sum8`]
    Sum8,
}

impl Display for Family {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        match self {
            Family::Crc8 => write!(f, "CRC8"),
            Family::Xor8 => write!(f, "XOR8"),
            Family::Sum8 => write!(f, "SUM8"),
        }
    }
}

/// A checksum family with concrete parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Candidate {
    /// CRC-8 with an initial value and a generator polynomial
    Crc8 {
        /// Initial value
        init: u8,
        /// Generator polynomial without the x^8 term
        poly: u8,
    },
    /// XOR checksum with an initial value
    Xor8 {
        /// Initial value
        init: u8,
    },
    /// Sum checksum with an initial value
    Sum8 {
        /// Initial value
        init: u8,
    },
}

impl Candidate {
    /// The family of this candidate
    pub fn family(&self) -> Family {
        match self {
            Candidate::Crc8 { .. } => Family::Crc8,
            Candidate::Xor8 { .. } => Family::Xor8,
            Candidate::Sum8 { .. } => Family::Sum8,
        }
    }

    /// The initial value
    pub fn init(&self) -> u8 {
        match *self {
            Candidate::Crc8 { init, .. } | Candidate::Xor8 { init } | Candidate::Sum8 { init } => {
                init
            }
        }
    }

    /// The generator polynomial, only CRC8 has one
    pub fn poly(&self) -> Option<u8> {
        match *self {
            Candidate::Crc8 { poly, .. } => Some(poly),
            Candidate::Xor8 { .. } | Candidate::Sum8 { .. } => None,
        }
    }

    /// Compute this candidate's checksum over a span
    ///
    /// # Examples
    ///
    /// ```
    /// use checksum_cracker::candidate::Candidate;
    ///
    /// let candidate = Candidate::Crc8 { init: 0x00, poly: 0x07 };
    /// assert_eq!(candidate.compute(&[0x01, 0x02, 0x03]), 0x48);
    /// ```
    pub fn compute(&self, span: &[u8]) -> u8 {
        match *self {
            Candidate::Crc8 { init, poly } => crc8(span, init, poly),
            Candidate::Xor8 { init } => xor8(span, init),
            Candidate::Sum8 { init } => sum8(span, init),
        }
    }
}

/// The order candidates are tried in within one window
///
/// Within a window the first candidate the corpus agrees with is
/// reported, so the order picks the winner when more than one
/// parameter set fits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepOrder {
    /// For each odd polynomial, for each initial value: CRC8, XOR8
    /// then SUM8.
    ///
    /// XOR8 and SUM8 don't depend on the polynomial but are tried
    /// again for every one of them, so a SUM8 or XOR8 candidate can
    /// win over a CRC8 candidate with a larger polynomial.
    #[default]
    Legacy,

    /// Every CRC8 candidate (odd polynomial ascending, then initial
    /// value ascending), then every XOR8 candidate, then every SUM8
    /// candidate.
    ///
    /// Each candidate is tried once.  When a SUM8 candidate and a
    /// CRC8 candidate with a larger polynomial both fit, Legacy
    /// reports the SUM8 one and this order reports the CRC8 one.
    FamilyFirst,
}

/// Lazy sweep over the candidates for one window
///
/// # Examples
///
/// ```
/// use checksum_cracker::candidate::{Candidate, Candidates, SweepOrder};
///
/// let mut candidates = Candidates::new(SweepOrder::Legacy);
///
/// assert_eq!(candidates.next(), Some(Candidate::Crc8 { init: 0, poly: 1 }));
/// assert_eq!(candidates.next(), Some(Candidate::Xor8 { init: 0 }));
/// assert_eq!(candidates.next(), Some(Candidate::Sum8 { init: 0 }));
/// assert_eq!(candidates.next(), Some(Candidate::Crc8 { init: 1, poly: 1 }));
/// ```
#[derive(Clone, Debug)]
pub struct Candidates {
    order: SweepOrder,
    family: Family,
    poly: u8,
    init: u8,
    done: bool,
}

impl Candidates {
    /// Start a sweep in the given order
    pub fn new(order: SweepOrder) -> Self {
        Candidates {
            order,
            family: Family::Crc8,
            poly: 1,
            init: 0,
            done: false,
        }
    }

    /// The order this sweep follows
    pub fn order(&self) -> SweepOrder {
        self.order
    }

    fn current(&self) -> Candidate {
        match self.family {
            Family::Crc8 => Candidate::Crc8 {
                init: self.init,
                poly: self.poly,
            },
            Family::Xor8 => Candidate::Xor8 { init: self.init },
            Family::Sum8 => Candidate::Sum8 { init: self.init },
        }
    }

    // Step to the next odd polynomial, false once 0xFF has been swept
    fn next_poly(&mut self) -> bool {
        match self.poly.checked_add(2) {
            Some(poly) => {
                self.poly = poly;
                true
            }
            None => false,
        }
    }

    fn advance(&mut self) {
        match self.order {
            SweepOrder::Legacy => match self.family {
                Family::Crc8 => self.family = Family::Xor8,
                Family::Xor8 => self.family = Family::Sum8,
                Family::Sum8 => {
                    self.family = Family::Crc8;
                    match self.init.checked_add(1) {
                        Some(init) => self.init = init,
                        None => {
                            self.init = 0;
                            self.done = !self.next_poly();
                        }
                    }
                }
            },
            SweepOrder::FamilyFirst => match self.init.checked_add(1) {
                Some(init) => self.init = init,
                None => {
                    self.init = 0;
                    match self.family {
                        Family::Crc8 => {
                            if !self.next_poly() {
                                self.family = Family::Xor8;
                            }
                        }
                        Family::Xor8 => self.family = Family::Sum8,
                        Family::Sum8 => self.done = true,
                    }
                }
            },
        }
    }

    /// Total number of items a full sweep produces
    fn total(order: SweepOrder) -> usize {
        let crc_items = 128 * 256;
        match order {
            SweepOrder::Legacy => crc_items * 3,
            SweepOrder::FamilyFirst => crc_items + 256 + 256,
        }
    }

    // Number of items already produced
    fn produced(&self) -> usize {
        if self.done {
            return Candidates::total(self.order);
        }
        let poly_index = usize::from(self.poly / 2);
        let init = usize::from(self.init);
        let family = self.family as usize;
        match self.order {
            SweepOrder::Legacy => (poly_index * 256 + init) * 3 + family,
            SweepOrder::FamilyFirst => match self.family {
                Family::Crc8 => poly_index * 256 + init,
                Family::Xor8 => 128 * 256 + init,
                Family::Sum8 => 128 * 256 + 256 + init,
            },
        }
    }
}

impl Iterator for Candidates {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        if self.done {
            return None;
        }
        let candidate = self.current();
        self.advance();
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = Candidates::total(self.order) - self.produced();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Candidates {}

/// Find the first candidate, in `order`, that every frame of the
/// corpus agrees with under `window`
///
/// # Arguments
///
/// * `corpus` - The frames that must all agree
/// * `window` - The span and checksum position to test
/// * `order` - The order to sweep candidates in
///
/// # Returns
///
/// The first agreeing candidate, or None if no candidate fits
pub fn match_window<F: AsRef<[u8]>>(
    corpus: &Corpus<'_, F>,
    window: &Window,
    order: SweepOrder,
) -> Option<Candidate> {
    Candidates::new(order).find(|candidate| corpus.satisfies(window, candidate))
}

/// A window and candidate the whole corpus agrees with
///
/// Serializes as a flat record with `family`, `start`, `end`, `init`
/// and, for CRC8 only, `poly`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Match {
    family: Family,
    start: usize,
    end: usize,
    init: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    poly: Option<u8>,
}

impl Match {
    /// Pair a window with the candidate found for it
    pub fn new(window: Window, candidate: Candidate) -> Self {
        Match {
            family: candidate.family(),
            start: window.start,
            end: window.end,
            init: candidate.init(),
            poly: candidate.poly(),
        }
    }

    /// The checksum family
    pub fn family(&self) -> Family {
        self.family
    }

    /// Index of the first byte fed to the checksum
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index of the checksum byte
    pub fn end(&self) -> usize {
        self.end
    }

    /// The initial value
    pub fn init(&self) -> u8 {
        self.init
    }

    /// The generator polynomial, present for CRC8 only
    pub fn poly(&self) -> Option<u8> {
        self.poly
    }

    /// The window the checksum covers
    pub fn window(&self) -> Window {
        Window {
            start: self.start,
            end: self.end,
        }
    }

    /// The checksum family and parameters
    pub fn candidate(&self) -> Candidate {
        match (self.family, self.poly) {
            (Family::Crc8, poly) => Candidate::Crc8 {
                init: self.init,
                poly: poly.unwrap_or_default(),
            },
            (Family::Xor8, _) => Candidate::Xor8 { init: self.init },
            (Family::Sum8, _) => Candidate::Sum8 { init: self.init },
        }
    }

    /// The generator polynomial in printable form, for CRC8 only
    pub fn polynomial(&self) -> Option<Crc8Polynomial> {
        self.poly.map(Crc8Polynomial)
    }

    /// The well-known CRC-8 preset these parameters correspond to, if any
    pub fn preset(&self) -> Option<&'static Crc8Preset> {
        match self.family {
            Family::Crc8 => Crc8Preset::lookup(self.init, self.poly?),
            Family::Xor8 | Family::Sum8 => None,
        }
    }

    /// Compute the checksum byte this match predicts for a frame
    ///
    /// Returns None if the frame is too short for the window.
    pub fn checksum(&self, frame: &[u8]) -> Option<u8> {
        self.window()
            .span(frame)
            .map(|span| self.candidate().compute(span))
    }

    /// Check the match against a set of frames, such as new captures
    /// of the same protocol
    ///
    /// Every frame must carry the predicted checksum byte.  Frames too
    /// short for the window fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use checksum_cracker::search;
    ///
    /// let frames: [&[u8]; 2] = [&[0x01, 0x02, 0x03, 0x06], &[0x10, 0x20, 0x30, 0x60]];
    /// let found = search(&frames, 4).unwrap().unwrap();
    ///
    /// assert!(found.verify(&[[0x05, 0x05, 0x05, found.checksum(&[5, 5, 5]).unwrap()]]));
    /// assert!(!found.verify(&[[0x05, 0x05, 0x05, 0x00]]));
    /// ```
    pub fn verify<F: AsRef<[u8]>>(&self, frames: &[F]) -> bool {
        let window = self.window();
        let candidate = self.candidate();
        frames
            .iter()
            .all(|frame| window.agrees(frame.as_ref(), &candidate))
    }
}

impl Display for Match {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "{} MATCH start={} end={} init=0x{:02X}",
            self.family, self.start, self.end, self.init
        )?;
        if let Some(poly) = self.poly {
            write!(f, " poly=0x{:02X}", poly)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{match_window, Candidate, Candidates, Family, Match, SweepOrder};
    use crate::corpus::Corpus;
    use crate::window::Window;

    use core::fmt::{self, Write};

    /// Fixed-size formatting target, no allocator needed
    struct Wrapper<'a> {
        buf: &'a mut [u8],
        offset: usize,
    }

    impl<'a> Wrapper<'a> {
        fn new(buf: &'a mut [u8]) -> Self {
            Wrapper { buf, offset: 0 }
        }
    }

    impl<'a> fmt::Write for Wrapper<'a> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let bytes = s.as_bytes();

            let remainder = &mut self.buf[self.offset..];
            if remainder.len() < bytes.len() {
                return Err(core::fmt::Error);
            }
            let remainder = &mut remainder[..bytes.len()];
            remainder.copy_from_slice(bytes);

            self.offset += bytes.len();

            Ok(())
        }
    }

    fn display(m: &Match, buf: &mut [u8]) {
        write!(Wrapper::new(buf), "{}", m).expect("Can't write Match");
    }

    #[test]
    fn family_priority_works() {
        assert!(Family::Crc8 < Family::Xor8);
        assert!(Family::Xor8 < Family::Sum8);
    }

    #[test]
    fn candidate_accessors_work() {
        let crc = Candidate::Crc8 {
            init: 0x80,
            poly: 0x07,
        };
        assert_eq!(crc.family(), Family::Crc8);
        assert_eq!(crc.init(), 0x80);
        assert_eq!(crc.poly(), Some(0x07));

        let sum = Candidate::Sum8 { init: 0x20 };
        assert_eq!(sum.family(), Family::Sum8);
        assert_eq!(sum.init(), 0x20);
        assert_eq!(sum.poly(), None);
    }

    #[test]
    fn candidate_compute_works() {
        assert_eq!(Candidate::Sum8 { init: 250 }.compute(&[10, 10]), 14);
        assert_eq!(Candidate::Xor8 { init: 0x55 }.compute(&[0xAA, 0x0F, 0x03]), 0xF3);
        assert_eq!(
            Candidate::Crc8 {
                init: 0x00,
                poly: 0x07
            }
            .compute(&[0x01, 0x02, 0x03]),
            0x48
        );
    }

    #[test]
    fn legacy_sweep_order_works() {
        let mut candidates = Candidates::new(SweepOrder::Legacy);

        // First poly, walking the initial values
        for init in 0..=255u8 {
            assert_eq!(candidates.next(), Some(Candidate::Crc8 { init, poly: 1 }));
            assert_eq!(candidates.next(), Some(Candidate::Xor8 { init }));
            assert_eq!(candidates.next(), Some(Candidate::Sum8 { init }));
        }
        // Even polynomials are skipped
        assert_eq!(candidates.next(), Some(Candidate::Crc8 { init: 0, poly: 3 }));
        assert_eq!(candidates.next(), Some(Candidate::Xor8 { init: 0 }));
    }

    #[test]
    fn legacy_sweep_ends_after_poly_ff() {
        let candidates = Candidates::new(SweepOrder::Legacy);
        assert_eq!(candidates.len(), 128 * 256 * 3);

        let last = candidates.last();
        assert_eq!(last, Some(Candidate::Sum8 { init: 255 }));
        assert_eq!(Candidates::new(SweepOrder::Legacy).count(), 98304);
    }

    #[test]
    fn legacy_sweep_only_offers_odd_polynomials() {
        assert!(Candidates::new(SweepOrder::Legacy)
            .filter_map(|candidate| candidate.poly())
            .all(|poly| poly & 1 == 1));
    }

    #[test]
    fn family_first_sweep_order_works() {
        let mut candidates = Candidates::new(SweepOrder::FamilyFirst);

        assert_eq!(candidates.next(), Some(Candidate::Crc8 { init: 0, poly: 1 }));
        assert_eq!(candidates.next(), Some(Candidate::Crc8 { init: 1, poly: 1 }));

        let mut candidates = candidates.skip(254);
        assert_eq!(candidates.next(), Some(Candidate::Crc8 { init: 0, poly: 3 }));

        let rest: std::vec::Vec<Candidate> = Candidates::new(SweepOrder::FamilyFirst)
            .skip(128 * 256)
            .collect();
        assert_eq!(rest.len(), 512);
        assert_eq!(rest[0], Candidate::Xor8 { init: 0 });
        assert_eq!(rest[255], Candidate::Xor8 { init: 255 });
        assert_eq!(rest[256], Candidate::Sum8 { init: 0 });
        assert_eq!(rest[511], Candidate::Sum8 { init: 255 });
    }

    /// FamilyFirst visits every candidate exactly once
    #[test]
    fn family_first_sweep_has_no_repeats() {
        let seen: std::collections::HashSet<Candidate> =
            Candidates::new(SweepOrder::FamilyFirst).collect();
        assert_eq!(seen.len(), 128 * 256 + 512);
        assert_eq!(Candidates::new(SweepOrder::FamilyFirst).len(), seen.len());
    }

    #[test]
    fn candidates_size_hint_tracks_progress() {
        for order in [SweepOrder::Legacy, SweepOrder::FamilyFirst] {
            let mut candidates = Candidates::new(order);
            let total = candidates.len();
            for taken in 1..=1000 {
                candidates.next();
                assert_eq!(candidates.len(), total - taken);
            }
            let mut candidates = candidates.skip(total - 1000 - 1);
            assert!(candidates.next().is_some());
            assert!(candidates.next().is_none());
        }
    }

    #[test]
    fn match_window_works() {
        let frames: [[u8; 4]; 3] = [
            [0xAA, 0x0F, 0x03, 0xF3],
            [0x12, 0x34, 0x56, 0x25],
            [0x99, 0x01, 0x02, 0xCF],
        ];
        let corpus = Corpus::new(&frames).expect("frames should be valid");
        let window = Window { start: 0, end: 3 };

        // A polynomial of 1 is a rotation, so CRC8 ties XOR8 and is
        // tried first
        assert_eq!(
            match_window(&corpus, &window, SweepOrder::Legacy),
            Some(Candidate::Crc8 {
                init: 0x55,
                poly: 0x01
            })
        );
        assert_eq!(
            match_window(&corpus, &window, SweepOrder::FamilyFirst),
            Some(Candidate::Crc8 {
                init: 0x55,
                poly: 0x01
            })
        );
    }

    /// A SUM8 corpus where a CRC8 with a larger polynomial also fits
    #[test]
    fn match_window_order_changes_tie_break() {
        let frames: [[u8; 3]; 2] = [[0x7C, 0x29, 0xC5], [0x99, 0xFD, 0xB6]];
        let corpus = Corpus::new(&frames).expect("frames should be valid");
        let window = Window { start: 0, end: 2 };

        assert_eq!(
            match_window(&corpus, &window, SweepOrder::Legacy),
            Some(Candidate::Sum8 { init: 0x20 })
        );
        assert_eq!(
            match_window(&corpus, &window, SweepOrder::FamilyFirst),
            Some(Candidate::Crc8 {
                init: 0xAF,
                poly: 0x53
            })
        );
    }

    #[test]
    fn match_new_works() {
        let window = Window { start: 0, end: 8 };
        let candidate = Candidate::Crc8 {
            init: 0x80,
            poly: 0x07,
        };
        let m = Match::new(window, candidate);

        assert_eq!(m.family(), Family::Crc8);
        assert_eq!(m.start(), 0);
        assert_eq!(m.end(), 8);
        assert_eq!(m.init(), 0x80);
        assert_eq!(m.poly(), Some(0x07));
        assert_eq!(m.window(), window);
        assert_eq!(m.candidate(), candidate);
        assert!(m.preset().is_none());

        let m = Match::new(window, Candidate::Xor8 { init: 0x55 });
        assert_eq!(m.poly(), None);
        assert_eq!(m.candidate(), Candidate::Xor8 { init: 0x55 });
        assert!(m.polynomial().is_none());
    }

    #[test]
    fn match_preset_works() {
        let m = Match::new(
            Window { start: 0, end: 9 },
            Candidate::Crc8 {
                init: 0x00,
                poly: 0x07,
            },
        );
        assert_eq!(m.preset().map(|preset| preset.name), Some("CRC-8/SMBUS"));
    }

    #[test]
    fn match_checksum_and_verify_work() {
        let m = Match::new(Window { start: 1, end: 3 }, Candidate::Sum8 { init: 250 });

        assert_eq!(m.checksum(&[0xFF, 10, 10, 0x00]), Some(14));
        assert_eq!(m.checksum(&[0xFF, 10]), None);

        let frames: [[u8; 4]; 2] = [[0xFF, 10, 10, 14], [0x00, 1, 2, 253]];
        assert!(m.verify(&frames));

        let frames: [[u8; 4]; 2] = [[0xFF, 10, 10, 14], [0x00, 1, 2, 254]];
        assert!(!m.verify(&frames));

        let short: [&[u8]; 1] = [&[0xFF, 10, 10]];
        assert!(!m.verify(&short));
    }

    /// One report line per match, poly only for CRC8
    #[test]
    fn match_display_works() {
        let mut buf: [u8; 64] = [0; 64];
        let m = Match::new(
            Window { start: 0, end: 8 },
            Candidate::Crc8 {
                init: 0x80,
                poly: 0x07,
            },
        );
        display(&m, &mut buf);
        let buf_str = core::str::from_utf8(buf.as_slice())
            .expect("Should be able to convert to str")
            .trim_matches(char::from(0));
        assert_eq!(buf_str, "CRC8 MATCH start=0 end=8 init=0x80 poly=0x07");

        let mut buf: [u8; 64] = [0; 64];
        let m = Match::new(Window { start: 0, end: 3 }, Candidate::Xor8 { init: 0x55 });
        display(&m, &mut buf);
        let buf_str = core::str::from_utf8(buf.as_slice())
            .expect("Should be able to convert to str")
            .trim_matches(char::from(0));
        assert_eq!(buf_str, "XOR8 MATCH start=0 end=3 init=0x55");
    }

    #[test]
    fn match_serializes_flat() {
        let m = Match::new(Window { start: 2, end: 5 }, Candidate::Sum8 { init: 0x11 });
        let json = serde_json::to_string(&m).expect("Match should serialize");
        assert_eq!(json, r#"{"family":"sum8","start":2,"end":5,"init":17}"#);

        let m = Match::new(
            Window { start: 0, end: 8 },
            Candidate::Crc8 {
                init: 0x80,
                poly: 0x07,
            },
        );
        let json = serde_json::to_string(&m).expect("Match should serialize");
        assert_eq!(
            json,
            r#"{"family":"crc8","start":0,"end":8,"init":128,"poly":7}"#
        );
    }

    #[test]
    fn sweep_order_deserializes() {
        let order: SweepOrder =
            serde_json::from_str(r#""family_first""#).expect("order should parse");
        assert_eq!(order, SweepOrder::FamilyFirst);
        assert_eq!(SweepOrder::default(), SweepOrder::Legacy);
    }
}
