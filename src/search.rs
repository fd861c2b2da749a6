//! Exhaustive search for a checksum scheme shared by a set of frames
//!
//! Windows are tried in [`Windows`] order and, for each window, every
//! candidate in the configured [`SweepOrder`].  The first window and
//! candidate the whole corpus agrees with is returned; nothing is
//! ranked and no further combinations are examined.
//!
//! # Examples
//!
//! ```
//! use checksum_cracker::search::{Search, SearchConfiguration};
//! use checksum_cracker::{Family, SweepOrder};
//!
//! // Toyota TPMS frames: the last byte is a CRC-8 of the rest
//! let frames: [&[u8]; 3] = [
//!     b"\xD5\x15\x7B\x93\xCE\x9C\x00\x62\x3D",
//!     b"\xD9\xB6\x22\x85\xD5\x9C\x80\x54\x8A",
//!     b"\xD3\xC7\x1F\xD3\xDF\x1E\x00\x41\x96",
//! ];
//!
//! let search = Search::new(SearchConfiguration::new(5, Some(SweepOrder::Legacy)));
//! let found = search.run(&frames).unwrap().expect("scheme should be found");
//!
//! assert_eq!(found.family(), Family::Crc8);
//! assert_eq!((found.start(), found.end()), (0, 8));
//! assert_eq!((found.init(), found.poly()), (0x80, Some(0x07)));
//! ```
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{
    candidate::{match_window, Match, SweepOrder},
    corpus::Corpus,
    error::ValidationError,
    window::Windows,
};

/// Settings for one search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfiguration {
    /// Minimum number of bytes a window covers, checksum byte included
    pub minlen: usize,

    /// The order candidates are tried in within a window
    #[serde(default)]
    pub order: SweepOrder,
}

impl SearchConfiguration {
    /// Create a new SearchConfiguration
    ///
    /// If `order` is None the default [`SweepOrder::Legacy`] is used.
    pub fn new(minlen: usize, order: Option<SweepOrder>) -> SearchConfiguration {
        let order = order.unwrap_or_default();

        SearchConfiguration { minlen, order }
    }
}

/// The search driver
///
/// A search holds only its configuration, every call to
/// [`Search::run`] starts from scratch.
#[derive(Clone, Copy, Debug)]
pub struct Search {
    configuration: SearchConfiguration,
}

impl Search {
    /// Create a new search
    pub fn new(configuration: SearchConfiguration) -> Self {
        Search { configuration }
    }

    /// The configuration this search runs with
    pub fn configuration(&self) -> &SearchConfiguration {
        &self.configuration
    }

    /// Look for a window and candidate every frame agrees with
    ///
    /// # Arguments
    ///
    /// * `frames` - The captured frames, at least one, all the same
    ///   length of at least two bytes
    ///
    /// # Returns
    ///
    /// `Ok(Some(match))` for the first agreeing combination,
    /// `Ok(None)` when the whole space was searched without success,
    /// or a [`ValidationError`] if the frames or the minimum span
    /// length are unusable.  Validation happens before any window is
    /// examined.
    pub fn run<F: AsRef<[u8]>>(&self, frames: &[F]) -> Result<Option<Match>, ValidationError> {
        let corpus = self.validate(frames).map_err(|e| {
            warn!("Rejecting search input: {}", e);
            e
        })?;

        debug!(
            "Searching {} frames of {} bytes, minlen {}, order {:?}",
            corpus.len(),
            corpus.frame_len(),
            self.configuration.minlen,
            self.configuration.order
        );

        Ok(self.run_corpus(&corpus))
    }

    fn validate<'a, F: AsRef<[u8]>>(
        &self,
        frames: &'a [F],
    ) -> Result<Corpus<'a, F>, ValidationError> {
        let corpus = Corpus::new(frames)?;
        corpus.check_minlen(self.configuration.minlen)?;
        Ok(corpus)
    }

    /// Search an already validated corpus
    ///
    /// A minimum span length longer than the frames yields no windows,
    /// so the result is None without any candidate being tried.
    pub fn run_corpus<F: AsRef<[u8]>>(&self, corpus: &Corpus<'_, F>) -> Option<Match> {
        let order = self.configuration.order;
        let mut examined: usize = 0;

        for window in Windows::new(corpus.frame_len(), self.configuration.minlen) {
            trace!("Trying window start={} end={}", window.start, window.end);
            examined += 1;

            if let Some(candidate) = match_window(corpus, &window, order) {
                let found = Match::new(window, candidate);
                info!("{}", found);
                return Some(found);
            }
        }

        debug!("No match after {} windows", examined);
        None
    }
}

/// Search frames for a shared checksum scheme with the default
/// sweep order
///
/// This is shorthand for
/// `Search::new(SearchConfiguration::new(minlen, None)).run(frames)`.
///
/// # Examples
///
/// ```
/// use checksum_cracker::{search, Family};
///
/// // Two data bytes, then their sum plus 0x20
/// let frames: [[u8; 3]; 2] = [[0x7C, 0x29, 0xC5], [0x99, 0xFD, 0xB6]];
/// let found = search(&frames, 3).unwrap().unwrap();
///
/// assert_eq!(found.family(), Family::Sum8);
/// assert_eq!(found.init(), 0x20);
/// ```
pub fn search<F: AsRef<[u8]>>(
    frames: &[F],
    minlen: usize,
) -> Result<Option<Match>, ValidationError> {
    Search::new(SearchConfiguration::new(minlen, None)).run(frames)
}
