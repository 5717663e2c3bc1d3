use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};
use bevy::prelude::*;

use crate::playback::Playback;
use crate::render::FrameRenderer;
use crate::surface::DrawSurface;
use crate::types::{AxisBounds, Index, Position};

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// seconds between animation steps.
const FRAME_INTERVAL: f32 = 0.2;

/// radius of a marker sphere, in scene units.
const MARKER_RADIUS: f32 = 0.02;

/// overlay label slots taken by the axis names.
const AXIS_LABELS: usize = 3;

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Resource)]
pub struct ViewerState {
    pub renderer: FrameRenderer,
    pub playback: Playback,
    pub frame: Option<Index>,
    pub timer: Timer,
    pub scale: f32,
    pub finished: bool,
}

/// Text produced while rendering a frame: the title and every positioned
/// label, held here until the UI systems have placed them on screen.
#[derive(Debug, Default, Resource)]
pub struct OverlayBuffer {
    pub title: String,
    pub labels: Vec<(Vec3, String)>,
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Open a window and play the clip through once, one playback step every
/// [`FRAME_INTERVAL`]. The window stays open for orbiting afterwards.
pub fn visualize_markers(renderer: FrameRenderer, stride: usize, scale: f32) {
    let mut playback = Playback::new(renderer.trajectory().num_frames(), stride);
    //// show the first frame before the timer ever fires
    let frame = playback.next();

    App::new()
        .insert_resource(ViewerState {
            renderer,
            playback,
            frame,
            timer: Timer::from_seconds(FRAME_INTERVAL, TimerMode::Repeating),
            scale,
            finished: false,
        })
        .init_resource::<OverlayBuffer>()
        .add_plugins(DefaultPlugins)
        .add_plugins(PanOrbitCameraPlugin)
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (advance_playback, draw_frame, update_title, position_labels).chain(),
        )
        .run();
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// A unit struct to help identify the title UI component, since there may be many Text components
#[derive(Component)]
struct TitleText;

// Which overlay label slot this UI text node displays
#[derive(Component)]
struct OverlayLabel(usize);

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Map a Z-up capture position into the Y-up scene, `scale` scene units per
/// trajectory unit.
fn to_render_space(position: Position, scale: f32) -> Vec3 {
    Vec3::new(
        position.x as f32,
        position.z as f32,
        -(position.y as f32),
    ) * scale
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<ViewerState>,
) {
    let bounds = state.renderer.bounds();
    let middle = (bounds.min + bounds.max) / 2.0;
    let center = to_render_space(Position::new(middle, middle, middle), state.scale);

    //// Orbit camera, focused on the middle of the capture volume
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(center + Vec3::new(2.5, 1.5, 5.0))
                .looking_at(center, Vec3::Y),
            ..default()
        },
        PanOrbitCamera {
            focus: center,
            ..default()
        },
    ));

    // draw plane under the capture volume
    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(5.0, 5.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::rgba(1., 1., 1., 0.5),
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        }),
        transform: Transform::from_xyz(center.x, 0.0, center.z),
        ..default()
    });

    // title, rewritten as frames advance
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 17.,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
        TitleText,
    ));

    //// one screen-space text node per overlay label slot
    let label_slots = state.renderer.markers().len() + AXIS_LABELS;
    for index in 0..label_slots {
        commands.spawn((
            TextBundle::from_section(
                "",
                TextStyle {
                    font_size: 12.,
                    color: Color::rgba(1.0, 1.0, 1.0, 0.8),
                    ..default()
                },
            )
            .with_style(Style {
                position_type: PositionType::Absolute,
                ..default()
            }),
            OverlayLabel(index),
        ));
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Immediate-mode backend: marker and bone geometry goes straight to bevy's
/// gizmos, text goes into the overlay buffer for the UI systems to place.
struct GizmoSurface<'w, 's, 'a> {
    gizmos: &'a mut Gizmos<'w, 's>,
    overlay: &'a mut OverlayBuffer,
    scale: f32,
}

impl DrawSurface for GizmoSurface<'_, '_, '_> {
    fn clear(&mut self) {
        //// gizmos only live for one render tick; just the text persists
        self.overlay.title.clear();
        self.overlay.labels.clear();
    }

    fn set_title(&mut self, title: &str) {
        self.overlay.title = title.to_string();
    }

    fn set_axes(&mut self, bounds: AxisBounds) {
        let middle = (bounds.min + bounds.max) / 2.0;
        let center = to_render_space(Position::new(middle, middle, middle), self.scale);
        let extent = (bounds.max - bounds.min) as f32 * self.scale;
        self.gizmos.cuboid(
            Transform::from_translation(center).with_scale(Vec3::splat(extent)),
            Color::rgba(1.0, 1.0, 1.0, 0.25),
        );

        //// name the capture axes at their far corners
        let (lo, hi) = (bounds.min, bounds.max);
        for (name, corner) in [
            ("X", Position::new(hi, lo, lo)),
            ("Y", Position::new(lo, hi, lo)),
            ("Z", Position::new(lo, lo, hi)),
        ] {
            self.overlay
                .labels
                .push((to_render_space(corner, self.scale), name.to_string()));
        }
    }

    fn point(&mut self, position: Position) {
        self.gizmos.sphere(
            to_render_space(position, self.scale),
            Quat::IDENTITY,
            MARKER_RADIUS,
            Color::BLUE,
        );
    }

    fn label(&mut self, position: Position, text: &str) {
        self.overlay
            .labels
            .push((to_render_space(position, self.scale), text.to_string()));
    }

    fn segment(&mut self, from: Position, to: Position) {
        self.gizmos.line(
            to_render_space(from, self.scale),
            to_render_space(to, self.scale),
            Color::RED,
        );
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn advance_playback(time: Res<Time>, mut state: ResMut<ViewerState>) {
    if !state.timer.tick(time.delta()).just_finished() {
        return;
    }
    match state.playback.next() {
        Some(frame) => state.frame = Some(frame),
        None => {
            if !state.finished {
                state.finished = true;
                tracing::info!("playback finished; close the window to exit");
            }
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn draw_frame(mut gizmos: Gizmos, mut overlay: ResMut<OverlayBuffer>, state: Res<ViewerState>) {
    //// an empty clip never has a frame to show
    let Some(frame) = state.frame else {
        return;
    };

    let mut surface = GizmoSurface {
        gizmos: &mut gizmos,
        overlay: &mut overlay,
        scale: state.scale,
    };
    state.renderer.render_frame(frame, &mut surface);
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn update_title(mut query: Query<&mut Text, With<TitleText>>, overlay: Res<OverlayBuffer>) {
    for mut text in &mut query {
        text.sections[0].value.clone_from(&overlay.title);
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn position_labels(
    mut labels: Query<(&mut Text, &mut Style, &OverlayLabel)>,
    cameras: Query<(&Camera, &GlobalTransform), With<PanOrbitCamera>>,
    overlay: Res<OverlayBuffer>,
) {
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };

    for (mut text, mut style, slot) in &mut labels {
        let placed = overlay.labels.get(slot.0).and_then(|(world, value)| {
            camera
                .world_to_viewport(camera_transform, *world)
                .map(|viewport| (viewport, value))
        });
        match placed {
            Some((viewport, value)) => {
                text.sections[0].value.clone_from(value);
                style.left = Val::Px(viewport.x);
                style.top = Val::Px(viewport.y);
            }
            // off screen or unused this frame
            None => text.sections[0].value.clear(),
        }
    }
}
