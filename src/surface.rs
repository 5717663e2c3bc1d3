use crate::types::{AxisBounds, Position};

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Drawing target for one animation frame.
///
/// The renderer only ever talks to this trait, so "what to draw" stays
/// independent of any window or graphics backend: the viewer supplies a
/// gizmo-backed implementation, tests and benches a [`CaptureSurface`].
/// Styling (colors, widths, font sizes) belongs to the backend; the trait
/// carries geometry and text only.
pub trait DrawSurface {
    /// Discard everything drawn for the previous frame.
    fn clear(&mut self);

    /// Headline text for the current frame.
    fn set_title(&mut self, title: &str);

    /// Fixed view extents; the backend also draws/records the X/Y/Z axis
    /// labelling that goes with them.
    fn set_axes(&mut self, bounds: AxisBounds);

    /// One marker point.
    fn point(&mut self, at: Position);

    /// Text anchored at a world position.
    fn label(&mut self, at: Position, text: &str);

    /// Straight bone segment between two marker positions, styled
    /// distinctly from points.
    fn segment(&mut self, from: Position, to: Position);
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Surface that records every call instead of rendering.
///
/// `clear` wipes the recorded primitives just like a real surface discards
/// the previous frame, so after rendering frame `k` the fields hold exactly
/// frame `k`'s drawing. `clears` keeps counting across wipes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureSurface {
    pub clears: usize,
    pub titles: Vec<String>,
    pub axes: Vec<AxisBounds>,
    pub points: Vec<Position>,
    pub labels: Vec<(Position, String)>,
    pub segments: Vec<(Position, Position)>,
}

impl CaptureSurface {
    pub fn new() -> Self {
        CaptureSurface::default()
    }

    pub fn last_title(&self) -> Option<&str> {
        self.titles.last().map(String::as_str)
    }
}

impl DrawSurface for CaptureSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.titles.clear();
        self.axes.clear();
        self.points.clear();
        self.labels.clear();
        self.segments.clear();
    }

    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn set_axes(&mut self, bounds: AxisBounds) {
        self.axes.push(bounds);
    }

    fn point(&mut self, at: Position) {
        self.points.push(at);
    }

    fn label(&mut self, at: Position, text: &str) {
        self.labels.push((at, text.to_string()));
    }

    fn segment(&mut self, from: Position, to: Position) {
        self.segments.push((from, to));
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////
