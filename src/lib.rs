//! Animated 3D viewer for motion capture marker trajectories.
//!
//! Loads a `(frame, marker, axis)` position array from a `.npy` file, pairs
//! it with a fixed marker set and bone list, and redraws the scene one frame
//! at a time through the [`surface::DrawSurface`] abstraction. The optional
//! `visualize` feature adds the interactive window.

pub mod markers;
pub mod parse;
pub mod playback;
pub mod render;
pub mod surface;
pub mod types;

#[cfg(feature = "visualize")]
pub mod visualize;
