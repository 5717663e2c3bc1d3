use cgmath::Vector3;

/////////////////////////////////////////////////////////////////////////////////////////////////

pub type Index = usize;
pub type Position = Vector3<f64>;

/// Transient view of one frame: every marker's position, in marker-table order.
/// Borrowed from [`Trajectory`] for the duration of a single render call.
pub type Frame<'a> = &'a [Position];

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Fixed view extents, applied identically to all three axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        AxisBounds { min, max }
    }
}

/// Capture volumes are calibrated in millimetres; a 2 m cube covers a full
/// gait stride.
impl Default for AxisBounds {
    fn default() -> Self {
        AxisBounds::new(0.0, 2000.0)
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Recorded marker positions for a whole clip, indexed by (frame, marker).
///
/// The buffer is row-major: the position of marker `m` at frame `f` lives at
/// `f * num_markers + m`. Immutable once constructed; frame and marker counts
/// come from the input file's shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    num_frames: usize,
    num_markers: usize,
    positions: Vec<Position>,
}

impl Trajectory {
    /// Wrap a flat row-major position buffer.
    ///
    /// Panics if `positions.len() != num_frames * num_markers`; the loader
    /// guarantees this, so a mismatch is a bug in the caller.
    pub fn new(num_frames: usize, num_markers: usize, positions: Vec<Position>) -> Self {
        assert_eq!(
            positions.len(),
            num_frames * num_markers,
            "position buffer does not match the declared (frames, markers) shape"
        );
        Trajectory {
            num_frames,
            num_markers,
            positions,
        }
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    pub fn num_markers(&self) -> usize {
        self.num_markers
    }

    /// All marker positions at `frame`, in marker-table order.
    ///
    /// Panics on an out-of-range `frame`; indices produced by
    /// [`Playback`](crate::playback::Playback) are always in range.
    pub fn frame(&self, frame: Index) -> Frame<'_> {
        let start = frame * self.num_markers;
        &self.positions[start..start + self.num_markers]
    }

    /// Position of a single marker at `frame`. Panics when out of range.
    pub fn position(&self, frame: Index, marker: Index) -> Position {
        self.frame(frame)[marker]
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////
