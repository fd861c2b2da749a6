//! Candidate checksum positions and the spans they cover
//!
//! A window says which byte of a frame holds the checksum (`end`) and
//! which bytes feed the checksum function (`start..end`).  Windows are
//! enumerated with the checksum position moving from the end of the
//! frame towards the front, and for each position the span starting
//! as early as possible first.  The search reports the first match, so
//! this order decides which window wins when several would work.
use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;

/// A span `[start, end)` and the checksum byte at `end`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    /// Index of the first byte fed to the checksum
    pub start: usize,
    /// Index of the checksum byte, one past the last byte fed to the
    /// checksum
    pub end: usize,
}

impl Window {
    /// Number of bytes fed to the checksum
    pub fn span_len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Number of bytes the window covers, counting the checksum byte
    pub fn len(&self) -> usize {
        self.span_len() + 1
    }

    /// A window always covers at least the checksum byte
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The bytes of `frame` fed to the checksum, if the window fits
    pub fn span<'f>(&self, frame: &'f [u8]) -> Option<&'f [u8]> {
        frame.get(self.start..self.end)
    }

    /// The checksum byte of `frame`, if the window fits
    pub fn checksum_byte(&self, frame: &[u8]) -> Option<u8> {
        frame.get(self.end).copied()
    }

    /// Whether `candidate` applied to this window's span of `frame`
    /// reproduces the frame's checksum byte
    ///
    /// A window that doesn't fit the frame never agrees.
    pub fn agrees(&self, frame: &[u8], candidate: &Candidate) -> bool {
        match (self.span(frame), self.checksum_byte(frame)) {
            (Some(span), Some(expected)) => candidate.compute(span) == expected,
            _ => false,
        }
    }
}

/// Lazy enumeration of the windows of a frame length
///
/// `end` runs from `frame_len - 1` down to 1, and for each `end`,
/// `start` runs upward from 0.  Windows covering fewer than `minlen`
/// bytes (checksum byte included) are skipped.  Clone the iterator to
/// restart it.
///
/// # Examples
///
/// ```
/// use checksum_cracker::window::{Window, Windows};
///
/// let mut windows = Windows::new(4, 3);
///
/// assert_eq!(windows.next(), Some(Window { start: 0, end: 3 }));
/// assert_eq!(windows.next(), Some(Window { start: 1, end: 3 }));
/// assert_eq!(windows.next(), Some(Window { start: 0, end: 2 }));
/// assert_eq!(windows.next(), None);
/// ```
#[derive(Clone, Debug)]
pub struct Windows {
    frame_len: usize,
    minlen: usize,
    // Next window to consider, not yet checked against minlen
    start: usize,
    end: usize,
}

impl Windows {
    /// Create the enumeration for frames of `frame_len` bytes
    ///
    /// If `minlen` is larger than the frame length, or the frame is
    /// shorter than two bytes, nothing is produced.
    pub fn new(frame_len: usize, minlen: usize) -> Self {
        Windows {
            frame_len,
            minlen,
            start: 0,
            end: frame_len.saturating_sub(1),
        }
    }

    /// The frame length windows are produced for
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// The minimum number of bytes a window covers
    pub fn minlen(&self) -> usize {
        self.minlen
    }

    // Last start index whose window still covers minlen bytes
    fn last_start(&self) -> Option<usize> {
        (self.end + 1).checked_sub(self.minlen.max(1))
    }
}

impl Iterator for Windows {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        while self.end >= 1 {
            if let Some(last_start) = self.last_start() {
                if self.start < self.end && self.start <= last_start {
                    let window = Window {
                        start: self.start,
                        end: self.end,
                    };
                    self.start += 1;
                    return Some(window);
                }
            }
            // Every remaining start for this end is too short
            self.end -= 1;
            self.start = 0;
        }

        None
    }
}
