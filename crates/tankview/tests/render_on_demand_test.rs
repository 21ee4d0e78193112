//! Redraw policy tests using a recording surface instead of a GPU.

use proptest::prelude::*;
use tankview::*;

/// Records the camera state seen at every draw.
struct RecordingSurface {
    width: u32,
    height: u32,
    frames: Vec<Frame>,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    aspect_ratio: f32,
    projection_aspect: f32,
    camera_position: Vec3,
    size: (u32, u32),
}

impl RecordingSurface {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames: Vec::new(),
        }
    }
}

impl RenderSurface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, scene: &Scene) -> RenderResult<()> {
        let camera = scene.camera();
        let proj = camera.projection_matrix();
        self.frames.push(Frame {
            aspect_ratio: camera.aspect_ratio,
            // proj[1][1] / proj[0][0] recovers the aspect baked into the matrix
            projection_aspect: proj.y_axis.y / proj.x_axis.x,
            camera_position: camera.position,
            size: (self.width, self.height),
        });
        Ok(())
    }
}

fn setup(width: u32, height: u32) -> (AssembledScene, RenderOnDemand<RecordingSurface>) {
    let assembled = assemble_scene(&SceneOptions::default(), width, height);
    let controller = RenderOnDemand::new(RecordingSurface::new(width, height));
    (assembled, controller)
}

#[test]
fn test_initial_load_draws_once() {
    let (mut assembled, mut controller) = setup(800, 600);
    assert_eq!(controller.redraw_count(), 0);

    let drawn = controller
        .trigger(&mut assembled.scene, Trigger::InitialLoad)
        .unwrap();
    assert!(drawn);
    assert_eq!(controller.redraw_count(), 1);
    assert!(!controller.is_render_requested());

    // Nothing happens without another trigger
    assert!(!controller.render_if_requested(&assembled.scene).unwrap());
    assert_eq!(controller.surface().frames.len(), 1);
}

#[test]
fn test_controls_change_redraws_with_new_camera() {
    let (mut assembled, mut controller) = setup(800, 600);
    controller
        .trigger(&mut assembled.scene, Trigger::InitialLoad)
        .unwrap();

    let before = assembled.scene.camera().position;
    let event = assembled.controls.handle(
        assembled.scene.camera_mut(),
        ControlInput::Rotate { dx: 40.0, dy: 0.0 },
    );
    assert_eq!(event, Some(ControlEvent::Changed));
    controller
        .trigger(&mut assembled.scene, Trigger::ControlsChanged)
        .unwrap();

    let frames = &controller.surface().frames;
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].camera_position, before);
    assert_eq!(frames[1].camera_position, assembled.scene.camera().position);
    assert_ne!(frames[1].camera_position, before);
}

#[test]
fn test_resize_updates_aspect_before_drawing() {
    let (mut assembled, mut controller) = setup(800, 600);
    controller
        .trigger(&mut assembled.scene, Trigger::InitialLoad)
        .unwrap();

    controller
        .trigger(
            &mut assembled.scene,
            Trigger::Resized {
                width: 400,
                height: 300,
            },
        )
        .unwrap();
    controller
        .trigger(
            &mut assembled.scene,
            Trigger::Resized {
                width: 300,
                height: 600,
            },
        )
        .unwrap();

    let frames = &controller.surface().frames;
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[1].size, (400, 300));
    assert!((frames[1].aspect_ratio - 400.0 / 300.0).abs() < 1e-6);
    assert!((frames[1].projection_aspect - 400.0 / 300.0).abs() < 1e-4);

    assert_eq!(frames[2].size, (300, 600));
    assert!((frames[2].aspect_ratio - 0.5).abs() < 1e-6);
    assert!((frames[2].projection_aspect - 0.5).abs() < 1e-4);
}

#[test]
fn test_zero_size_resize_keeps_previous_aspect() {
    let (mut assembled, mut controller) = setup(800, 600);
    controller
        .trigger(&mut assembled.scene, Trigger::InitialLoad)
        .unwrap();
    controller
        .trigger(
            &mut assembled.scene,
            Trigger::Resized {
                width: 0,
                height: 0,
            },
        )
        .unwrap();

    let frames = &controller.surface().frames;
    assert_eq!(frames[1].size, (800, 600));
    assert!((frames[1].aspect_ratio - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn test_resize_then_window_redraw_draws_one_frame() {
    let (mut assembled, mut controller) = setup(800, 600);
    controller
        .trigger(&mut assembled.scene, Trigger::InitialLoad)
        .unwrap();

    // The window system reports the resize and then asks for a repaint,
    // possibly more than once
    controller.schedule(
        &mut assembled.scene,
        Trigger::Resized {
            width: 400,
            height: 300,
        },
    );
    assert!(controller.render_if_requested(&assembled.scene).unwrap());
    assert!(!controller.render_if_requested(&assembled.scene).unwrap());

    let frames = &controller.surface().frames;
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1].size, (400, 300));
    assert!((frames[1].projection_aspect - 400.0 / 300.0).abs() < 1e-4);
}

#[test]
fn test_scheduled_initial_load_draws_once() {
    let (mut assembled, mut controller) = setup(800, 600);
    controller.schedule(&mut assembled.scene, Trigger::InitialLoad);
    assert_eq!(controller.redraw_count(), 0);

    // Window mapping and the explicit redraw request each deliver an event
    controller.render_if_requested(&assembled.scene).unwrap();
    controller.render_if_requested(&assembled.scene).unwrap();
    assert_eq!(controller.redraw_count(), 1);
}

#[test]
fn test_control_change_consumes_pending_resize() {
    let (mut assembled, mut controller) = setup(800, 600);
    controller
        .trigger(&mut assembled.scene, Trigger::InitialLoad)
        .unwrap();
    controller.schedule(
        &mut assembled.scene,
        Trigger::Resized {
            width: 400,
            height: 300,
        },
    );
    controller
        .trigger(&mut assembled.scene, Trigger::ControlsChanged)
        .unwrap();
    assert!(!controller.render_if_requested(&assembled.scene).unwrap());

    let frames = &controller.surface().frames;
    assert_eq!(frames.len(), 2);
    assert!((frames[1].aspect_ratio - 400.0 / 300.0).abs() < 1e-6);
}

proptest! {
    #[test]
    fn prop_one_redraw_per_trigger(changes in 0usize..32) {
        let (mut assembled, mut controller) = setup(640, 480);
        controller.trigger(&mut assembled.scene, Trigger::InitialLoad).unwrap();
        for _ in 0..changes {
            controller.trigger(&mut assembled.scene, Trigger::ControlsChanged).unwrap();
        }
        prop_assert_eq!(controller.redraw_count(), changes as u64 + 1);
        prop_assert_eq!(controller.surface().frames.len(), changes + 1);
        prop_assert!(!controller.is_render_requested());
    }
}
