//! A validated set of captured frames
//!
//! Every frame in a corpus has the same length and there is at least
//! one of them, so windows computed from the frame length are valid
//! for every frame.
use crate::{candidate::Candidate, error::ValidationError, window::Window};

/// Frames believed to share one checksum scheme
///
/// The corpus borrows the frames, it never copies them.
#[derive(Debug)]
pub struct Corpus<'a, F: AsRef<[u8]>> {
    frames: &'a [F],
    frame_len: usize,
}

// Manual impls, a derive would require F: Clone
impl<'a, F: AsRef<[u8]>> Clone for Corpus<'a, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, F: AsRef<[u8]>> Copy for Corpus<'a, F> {}

impl<'a, F: AsRef<[u8]>> Corpus<'a, F> {
    /// Validate a set of frames
    ///
    /// # Arguments
    ///
    /// * `frames` - The captured frames, each at least two bytes and
    ///   all the same length
    ///
    /// # Returns
    ///
    /// The corpus, or the first problem found with the frames
    ///
    /// # Examples
    ///
    /// ```
    /// use checksum_cracker::corpus::Corpus;
    /// use checksum_cracker::error::ValidationError;
    ///
    /// let frames: [&[u8]; 2] = [&[0x01, 0x02, 0x03, 0x04], &[0x01, 0x02, 0x03, 0x04, 0x05]];
    /// let err = Corpus::new(&frames).unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     ValidationError::LengthMismatch { index: 1, expected: 4, found: 5 }
    /// );
    /// ```
    pub fn new(frames: &'a [F]) -> Result<Self, ValidationError> {
        let first = frames.first().ok_or(ValidationError::EmptyCorpus)?;
        let frame_len = first.as_ref().len();

        if let Some((index, frame)) = frames
            .iter()
            .enumerate()
            .find(|(_, frame)| frame.as_ref().len() != frame_len)
        {
            return Err(ValidationError::LengthMismatch {
                index,
                expected: frame_len,
                found: frame.as_ref().len(),
            });
        }

        if frame_len < 2 {
            return Err(ValidationError::FrameTooShort { len: frame_len });
        }

        Ok(Corpus { frames, frame_len })
    }

    /// The length shared by every frame
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// The number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false, a corpus holds at least one frame
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate over the frames in order
    pub fn frames(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.frames.iter().map(|frame| frame.as_ref())
    }

    /// Check a minimum span length against the frame length
    pub fn check_minlen(&self, minlen: usize) -> Result<(), ValidationError> {
        if minlen == 0 || minlen > self.frame_len {
            return Err(ValidationError::MinLenOutOfRange {
                minlen,
                frame_len: self.frame_len,
            });
        }
        Ok(())
    }

    /// Whether `candidate` reproduces the checksum byte of every frame
    /// under `window`
    ///
    /// A single disagreeing frame rules the candidate out.
    pub fn satisfies(&self, window: &Window, candidate: &Candidate) -> bool {
        self.frames().all(|frame| window.agrees(frame, candidate))
    }
}
