use crate::types::Index;

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One finite pass over a clip: yields 0, stride, 2*stride, ... strictly
/// below the frame count, then ends for good.
///
/// Purely a schedule; it neither renders nor keeps time. The viewer drains it
/// from a timer, and a plain `for` loop over it replays a clip offline.
#[derive(Debug, Clone)]
pub struct Playback {
    next: Index,
    num_frames: usize,
    stride: usize,
}

impl Playback {
    /// Panics if `stride` is zero.
    pub fn new(num_frames: usize, stride: usize) -> Self {
        assert!(stride > 0, "playback stride must be positive");
        Playback {
            next: 0,
            num_frames,
            stride,
        }
    }
}

impl Iterator for Playback {
    type Item = Index;

    fn next(&mut self) -> Option<Index> {
        if self.next >= self.num_frames {
            return None;
        }
        let frame = self.next;
        self.next = self.next.saturating_add(self.stride);
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next >= self.num_frames {
            0
        } else {
            (self.num_frames - self.next).div_ceil(self.stride)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Playback {}

impl std::iter::FusedIterator for Playback {}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
