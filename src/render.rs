use crate::markers::MarkerSet;
use crate::surface::DrawSurface;
use crate::types::{AxisBounds, Index, Trajectory};

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Produces one visual frame of the animation at a time.
///
/// Owns the static topology (marker set and bone list) and the recorded
/// trajectory; never mutates any of it after construction. All drawing goes
/// through a caller-supplied [`DrawSurface`], so the same renderer serves the
/// interactive viewer and the capturing test surface.
#[derive(Debug)]
pub struct FrameRenderer {
    trajectory: Trajectory,
    markers: MarkerSet,
    bones: Vec<(String, String)>,
    bounds: AxisBounds,
}

impl FrameRenderer {
    /// Marry the loaded trajectory with the fixed topology.
    ///
    /// Bones referencing names absent from `markers` are kept but will never
    /// be drawn; they are reported once here with a warning so a topology
    /// typo is visible without polluting the per-frame path. Panics if the
    /// trajectory's marker count does not match the marker set (the loader
    /// rules that out for file-backed data).
    pub fn new(
        trajectory: Trajectory,
        markers: MarkerSet,
        bones: &[(&str, &str)],
        bounds: AxisBounds,
    ) -> Self {
        assert_eq!(
            trajectory.num_markers(),
            markers.len(),
            "trajectory marker count does not match the marker set"
        );

        let mut unknown: Vec<&str> = bones
            .iter()
            .flat_map(|&(from, to)| [from, to])
            .filter(|name| markers.lookup(name).is_none())
            .collect();
        unknown.sort_unstable();
        unknown.dedup();
        if !unknown.is_empty() {
            tracing::warn!(
                endpoints = ?unknown,
                "bone endpoints missing from the marker set; those bones will not be drawn"
            );
        }

        FrameRenderer {
            trajectory,
            markers,
            bones: bones
                .iter()
                .map(|&(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            bounds,
        }
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn bounds(&self) -> AxisBounds {
        self.bounds
    }

    /// Configure the surface with the fixed view extents and axis labels.
    pub fn init(&self, surface: &mut dyn DrawSurface) {
        surface.set_axes(self.bounds);
    }

    /// Redraw the surface from scratch for `frame`.
    ///
    /// Never fails for data reasons: markers are drawn exactly as stored and
    /// a bone whose endpoint name does not resolve is skipped without a
    /// sound. An out-of-range `frame` is a caller bug and panics.
    pub fn render_frame(&self, frame: Index, surface: &mut dyn DrawSurface) {
        surface.clear();
        surface.set_title(&format!("3D Marker Movement - Frame {frame}"));
        surface.set_axes(self.bounds);

        let positions = self.trajectory.frame(frame);

        //// plot every marker and its name
        for (index, name) in self.markers.names().enumerate() {
            surface.point(positions[index]);
            surface.label(positions[index], name);
        }

        //// draw the skeleton
        for (from, to) in &self.bones {
            match (self.markers.lookup(from), self.markers.lookup(to)) {
                (Some(i), Some(j)) => surface.segment(positions[i], positions[j]),
                _ => continue, // skip if marker is missing
            }
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{BONES, MARKERS};
    use crate::surface::CaptureSurface;
    use crate::types::Position;

    /// Trajectory whose value at (frame, marker, axis) is derived from the
    /// indices, so every plotted coordinate can be checked exactly.
    fn indexed_trajectory(frames: usize, markers: usize) -> Trajectory {
        let positions = (0..frames)
            .flat_map(|f| {
                (0..markers).map(move |m| {
                    Position::new(m as f64, f as f64, (f * markers + m) as f64)
                })
            })
            .collect();
        Trajectory::new(frames, markers, positions)
    }

    fn two_marker_renderer() -> FrameRenderer {
        let trajectory = Trajectory::new(
            3,
            2,
            vec![
                Position::new(0.0, 0.0, 0.0),
                Position::new(1.0, 1.0, 1.0),
                Position::new(0.5, 0.5, 0.5),
                Position::new(1.5, 1.5, 1.5),
                Position::new(2.0, 2.0, 2.0),
                Position::new(3.0, 3.0, 3.0),
            ],
        );
        FrameRenderer::new(
            trajectory,
            MarkerSet::from_names(&["A", "B"]),
            &[("A", "B"), ("A", "X")],
            AxisBounds::default(),
        )
    }

    #[test]
    fn plots_both_markers_and_one_bone_skipping_the_unknown_endpoint() {
        let renderer = two_marker_renderer();
        let mut surface = CaptureSurface::new();
        renderer.render_frame(0, &mut surface);

        assert_eq!(
            surface.points,
            vec![Position::new(0.0, 0.0, 0.0), Position::new(1.0, 1.0, 1.0)]
        );
        assert_eq!(surface.labels.len(), 2);
        assert_eq!(surface.labels[0], (Position::new(0.0, 0.0, 0.0), "A".to_string()));
        assert_eq!(surface.labels[1], (Position::new(1.0, 1.0, 1.0), "B".to_string()));
        // ("A", "X") is dropped without an error, leaving the single real bone
        assert_eq!(
            surface.segments,
            vec![(Position::new(0.0, 0.0, 0.0), Position::new(1.0, 1.0, 1.0))]
        );
    }

    #[test]
    fn standard_topology_plots_every_marker_and_bone() {
        let trajectory = indexed_trajectory(4, MARKERS.len());
        let renderer = FrameRenderer::new(
            trajectory,
            MarkerSet::standard(),
            &BONES,
            AxisBounds::default(),
        );
        let mut surface = CaptureSurface::new();
        renderer.render_frame(2, &mut surface);

        assert_eq!(surface.points.len(), MARKERS.len());
        for (index, name) in MARKERS.iter().enumerate() {
            let expected = renderer.trajectory().position(2, index);
            assert_eq!(surface.points[index], expected);
            assert_eq!(surface.labels[index], (expected, name.to_string()));
        }
        assert_eq!(surface.segments.len(), BONES.len());

        // first bone is C7 -> LA, columns 0 and 1
        assert_eq!(
            surface.segments[0],
            (
                renderer.trajectory().position(2, 0),
                renderer.trajectory().position(2, 1)
            )
        );
    }

    #[test]
    fn rendering_the_same_frame_twice_is_identical() {
        let renderer = two_marker_renderer();
        let mut first = CaptureSurface::new();
        let mut second = CaptureSurface::new();
        renderer.render_frame(1, &mut first);
        renderer.render_frame(1, &mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn every_render_starts_from_a_cleared_surface() {
        let renderer = two_marker_renderer();
        let mut surface = CaptureSurface::new();
        renderer.render_frame(0, &mut surface);
        renderer.render_frame(1, &mut surface);

        assert_eq!(surface.clears, 2);
        // only the second frame's drawing remains
        assert_eq!(surface.points.len(), 2);
        assert_eq!(surface.points[0], Position::new(0.5, 0.5, 0.5));
        assert_eq!(surface.axes, vec![AxisBounds::default()]);
    }

    #[test]
    fn title_names_the_current_frame() {
        let renderer = two_marker_renderer();
        let mut surface = CaptureSurface::new();
        renderer.render_frame(2, &mut surface);
        assert_eq!(surface.last_title(), Some("3D Marker Movement - Frame 2"));
    }

    #[test]
    fn init_applies_the_fixed_bounds() {
        let renderer = two_marker_renderer();
        let mut surface = CaptureSurface::new();
        renderer.init(&mut surface);
        assert_eq!(surface.axes, vec![AxisBounds::default()]);
        assert!(surface.points.is_empty());
    }

    #[test]
    #[should_panic]
    fn marker_count_mismatch_is_a_constructor_bug() {
        let trajectory = indexed_trajectory(1, 3);
        let _ = FrameRenderer::new(
            trajectory,
            MarkerSet::from_names(&["A", "B"]),
            &[],
            AxisBounds::default(),
        );
    }
}
