//! Errors returned when a search is handed inputs it can't work with
use thiserror::Error;

/// Reasons a set of frames or a search configuration is rejected
/// before any window is examined.
///
/// Running out of windows without finding a match is not an error,
/// that's reported as `Ok(None)` by the search.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No frames were supplied.
    #[error("the corpus contains no frames")]
    EmptyCorpus,

    /// Frames need at least one data byte and one checksum byte.
    #[error("frames are {len} bytes long, at least 2 are required")]
    FrameTooShort {
        /// The shared frame length
        len: usize,
    },

    /// A frame doesn't have the same length as the first frame.
    #[error("frame {index} is {found} bytes long, expected {expected}")]
    LengthMismatch {
        /// Position of the offending frame in the corpus
        index: usize,
        /// Length of the first frame
        expected: usize,
        /// Length of the offending frame
        found: usize,
    },

    /// The minimum span length must be between 1 and the frame length.
    #[error("minimum span length {minlen} is outside 1..={frame_len}")]
    MinLenOutOfRange {
        /// The requested minimum span length
        minlen: usize,
        /// The shared frame length
        frame_len: usize,
    },
}
