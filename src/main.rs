use color_eyre::Report;

use mocap_marker_viewer::markers::{MarkerSet, BONES};
use mocap_marker_viewer::parse::load_trajectory_from_file;
use mocap_marker_viewer::render::FrameRenderer;
use mocap_marker_viewer::types::AxisBounds;
use mocap_marker_viewer::visualize::visualize_markers;

const TRAJECTORY_PATH: &str = "./1.npy";
const PLAYBACK_STRIDE: usize = 10;
/// millimetre capture shown at metre scale.
const SCENE_SCALE: f32 = 0.001;

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let markers = MarkerSet::standard();
    let trajectory = load_trajectory_from_file(TRAJECTORY_PATH, markers.len())?;
    tracing::info!(
        path = TRAJECTORY_PATH,
        frames = trajectory.num_frames(),
        markers = trajectory.num_markers(),
        "loaded trajectory"
    );

    let renderer = FrameRenderer::new(trajectory, markers, &BONES, AxisBounds::default());
    visualize_markers(renderer, PLAYBACK_STRIDE, SCENE_SCALE);
    Ok(())
}
